use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, text, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::catalog::ImageSize;
use crate::components::icon;
use crate::media::{
    truncate_description, MediaItem, Message, TrailerSlot, SURFACE_DARK_GRAY, TEXT_WHITE,
};
use crate::Flixview;

const HERO_HEIGHT: f32 = 620.0;
const ICON_PLAY_FILL: char = '\u{F4F4}';
const ICON_INFO_CIRCLE: char = '\u{F431}';

impl Flixview {
    pub fn view_hero_section(&self) -> Element<'_, Message> {
        match &self.featured {
            Some(item) => self.view_hero_with_content(item),
            None => Space::new().width(Length::Fill).height(80).into(),
        }
    }

    fn view_hero_with_content(&self, item: &MediaItem) -> Element<'_, Message> {
        let hero_title = text(item.display_title.clone())
            .size(56)
            .color(TEXT_WHITE)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            });

        let hero_description = container(
            text(truncate_description(&item.overview, 300))
                .size(18)
                .color(TEXT_WHITE),
        )
        .max_width(640.0);

        let button_row = row![
            self.view_hero_play_button(),
            self.view_hero_more_info_button(item)
        ]
        .spacing(16)
        .align_y(iced::Alignment::Center);

        let hero_text_content = column![hero_title, hero_description, button_row]
            .spacing(24)
            .padding(Padding::new(64.0).left(64.0).right(64.0));

        let dimmer = container(Space::new().width(Length::Fill).height(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(Color::from_rgba(
                    0.0, 0.0, 0.0, 0.4,
                ))),
                ..Default::default()
            });

        let hero_left_gradient = container(hero_text_content)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_y(iced::alignment::Vertical::Center)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Gradient(iced::Gradient::Linear(
                    iced::gradient::Linear::new(std::f32::consts::FRAC_PI_2)
                        .add_stop(0.0, Color::BLACK)
                        .add_stop(0.5, Color::TRANSPARENT),
                ))),
                ..Default::default()
            });

        let hero_bottom_gradient = container(Space::new().width(Length::Fill).height(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Gradient(iced::Gradient::Linear(
                    iced::gradient::Linear::new(0.0)
                        .add_stop(0.0, Color::BLACK)
                        .add_stop(0.2, Color::TRANSPARENT),
                ))),
                ..Default::default()
            });

        iced::widget::stack![
            self.view_hero_backdrop(item),
            dimmer,
            hero_bottom_gradient,
            hero_left_gradient
        ]
        .width(Length::Fill)
        .height(Length::Fixed(HERO_HEIGHT))
        .into()
    }

    /// Loaded backdrop for `item`. Items without a backdrop get `None`, never
    /// the poster-shaped placeholder.
    pub fn backdrop_handle(&self, item: &MediaItem) -> Option<&Handle> {
        let backdrop = item.backdrop_path.as_deref()?;
        let image_url = self.catalog.image_url(Some(backdrop), ImageSize::Backdrop);
        self.image_cache.get(&image_url)
    }

    fn view_hero_backdrop(&self, item: &MediaItem) -> Element<'_, Message> {
        let Some(handle) = self.backdrop_handle(item) else {
            return container(Space::new().width(Length::Fill).height(Length::Fill))
                .width(Length::Fill)
                .height(Length::Fixed(HERO_HEIGHT))
                .style(|_theme| container::Style {
                    background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                    ..Default::default()
                })
                .into();
        };
        iced::widget::image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(HERO_HEIGHT))
            .content_fit(iced::ContentFit::Cover)
            .into()
    }

    /// Without a trailer the button stays enabled but does nothing.
    fn view_hero_play_button(&self) -> Element<'_, Message> {
        button(
            row![
                icon(ICON_PLAY_FILL).size(16).color(Color::BLACK),
                text("Play").size(18).color(Color::BLACK)
            ]
            .spacing(8)
            .align_y(iced::Alignment::Center),
        )
        .padding(Padding::new(12.0).left(32.0).right(32.0))
        .style(|_theme, status| {
            let background_color = match status {
                button::Status::Hovered => Color::from_rgb(0.898, 0.906, 0.922),
                _ => TEXT_WHITE,
            };
            button::Style {
                background: Some(iced::Background::Color(background_color)),
                text_color: Color::BLACK,
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 4.0.into(),
                },
                shadow: Shadow::default(),
                snap: false,
            }
        })
        .on_press(Message::PlayTrailer(TrailerSlot::Hero))
        .into()
    }

    fn view_hero_more_info_button(&self, item: &MediaItem) -> Element<'_, Message> {
        button(
            row![
                icon(ICON_INFO_CIRCLE).size(16).color(TEXT_WHITE),
                text("More Info").size(18).color(TEXT_WHITE)
            ]
            .spacing(8)
            .align_y(iced::Alignment::Center),
        )
        .padding(Padding::new(12.0).left(32.0).right(32.0))
        .style(|_theme, status| {
            let alpha = match status {
                button::Status::Hovered => 0.5,
                _ => 0.7,
            };
            button::Style {
                background: Some(iced::Background::Color(Color::from_rgba(
                    0.42, 0.45, 0.5, alpha,
                ))),
                text_color: TEXT_WHITE,
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 4.0.into(),
                },
                shadow: Shadow::default(),
                snap: false,
            }
        })
        .on_press(Message::OpenDetails(item.clone()))
        .into()
    }
}
