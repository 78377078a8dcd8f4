use iced::widget::{button, column, container, row, scrollable, text, Column, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::components::{hidden_scrollbar_style, icon};
use crate::media::{
    format_runtime, DetailModal, MediaItem, Message, TrailerSlot, MATCH_GREEN, MODAL_GRAY,
    SURFACE_DARK_GRAY, TEXT_GRAY, TEXT_WHITE,
};
use crate::Flixview;

const POPUP_WIDTH: f32 = 896.0;
const TRAILER_HEIGHT: f32 = 504.0;

const ICON_X_LG: char = '\u{F659}';
const ICON_PLAY_FILL: char = '\u{F4F4}';

pub fn format_rating(vote_average: f32) -> String {
    format!("{:.1}/10", vote_average)
}

fn popup_container_style(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(MODAL_GRAY)),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 8.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.5),
            offset: iced::Vector::new(0.0, 25.0),
            blur_radius: 50.0,
        },
        ..Default::default()
    }
}

impl Flixview {
    pub fn view_detail_popup_overlay<'a>(&'a self, modal: &'a DetailModal) -> Element<'a, Message> {
        let popup_with_close = iced::widget::stack![
            self.view_detail_popup_content(modal),
            self.view_detail_close_button()
        ]
        .width(Length::Fixed(POPUP_WIDTH));

        let popup = container(popup_with_close)
            .max_width(POPUP_WIDTH)
            .clip(true)
            .style(popup_container_style);

        // Swallows clicks so they do not reach the backdrop and close the modal.
        let popup_mouse_area = iced::widget::mouse_area(popup);

        let overlay_bg = iced::widget::mouse_area(
            container(Space::new().width(Length::Fill).height(Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_theme| container::Style {
                    background: Some(iced::Background::Color(Color::from_rgba(
                        0.0, 0.0, 0.0, 0.75,
                    ))),
                    ..Default::default()
                }),
        )
        .on_press(Message::CloseDetails);

        let centered_popup = container(popup_mouse_area)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .padding(Padding::new(40.0));

        iced::widget::stack![overlay_bg, centered_popup]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn view_detail_close_button(&self) -> Element<'_, Message> {
        let close_button = button(
            container(icon(ICON_X_LG).size(18).color(TEXT_WHITE))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill),
        )
        .width(Length::Fixed(40.0))
        .height(Length::Fixed(40.0))
        .padding(0)
        .style(|_theme, status| {
            let bg_alpha = match status {
                button::Status::Hovered => 0.75,
                _ => 0.5,
            };
            button::Style {
                background: Some(iced::Background::Color(Color::from_rgba(
                    0.0, 0.0, 0.0, bg_alpha,
                ))),
                text_color: TEXT_WHITE,
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 20.0.into(),
                },
                shadow: Shadow::default(),
                snap: false,
            }
        })
        .on_press(Message::CloseDetails);

        container(close_button)
            .width(Length::Fill)
            .align_x(iced::alignment::Horizontal::Right)
            .padding(16)
            .into()
    }

    fn view_detail_popup_content<'a>(&'a self, modal: &'a DetailModal) -> Element<'a, Message> {
        let body = row![
            self.view_detail_main_column(modal),
            self.view_detail_side_column(modal)
        ]
        .spacing(24)
        .padding(Padding::new(24.0));

        scrollable(column![self.view_detail_trailer_area(modal), body])
            .direction(scrollable::Direction::Vertical(
                scrollable::Scrollbar::new().width(0).scroller_width(0),
            ))
            .width(Length::Fill)
            .style(hidden_scrollbar_style)
            .into()
    }

    fn view_detail_trailer_area(&self, modal: &DetailModal) -> Element<'_, Message> {
        let backdrop = self.view_detail_backdrop(&modal.item);

        let overlay_content: Element<Message> = if modal.trailer.is_some() {
            button(
                row![
                    icon(ICON_PLAY_FILL).size(16).color(Color::BLACK),
                    text("Play Trailer").size(18).color(Color::BLACK)
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
            .on_press(Message::PlayTrailer(TrailerSlot::Modal))
            .into()
        } else {
            text("No trailer available").size(18).color(TEXT_WHITE).into()
        };

        let overlay = container(overlay_content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(Color::from_rgba(
                    0.0, 0.0, 0.0, 0.5,
                ))),
                ..Default::default()
            });

        iced::widget::stack![backdrop, overlay]
            .width(Length::Fill)
            .height(Length::Fixed(TRAILER_HEIGHT))
            .into()
    }

    fn view_detail_backdrop(&self, item: &MediaItem) -> Element<'_, Message> {
        match self.backdrop_handle(item) {
            Some(handle) => iced::widget::image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fixed(TRAILER_HEIGHT))
                .content_fit(iced::ContentFit::Cover)
                .into(),
            None => container(Space::new().width(Length::Fill).height(Length::Fill))
                .width(Length::Fill)
                .height(Length::Fixed(TRAILER_HEIGHT))
                .style(|_theme| container::Style {
                    background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                    ..Default::default()
                })
                .into(),
        }
    }

    fn view_detail_main_column<'a>(&'a self, modal: &'a DetailModal) -> Element<'a, Message> {
        let item = &modal.item;

        let title = text(item.display_title.clone())
            .size(32)
            .color(TEXT_WHITE)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            });

        let mut metadata = row![
            text(format!("{}% Match", item.match_percent()))
                .size(14)
                .color(MATCH_GREEN),
            text(item.year_label()).size(14).color(TEXT_WHITE)
        ]
        .spacing(16)
        .align_y(iced::Alignment::Center);

        if let Some(minutes) = modal.details.as_ref().and_then(|d| d.runtime_minutes()) {
            metadata = metadata.push(text(format_runtime(minutes)).size(14).color(TEXT_WHITE));
        }

        let overview = text(item.overview.clone()).size(16).color(TEXT_WHITE);

        column![title, metadata, overview]
            .spacing(16)
            .width(Length::FillPortion(2))
            .into()
    }

    fn view_detail_side_column<'a>(&'a self, modal: &'a DetailModal) -> Element<'a, Message> {
        let mut entries: Vec<Element<Message>> = Vec::new();

        if let Some(details) = &modal.details {
            if !details.genres.is_empty() {
                entries.push(labeled("Genres", details.genre_names()));
            }
        }

        entries.push(labeled("Rating", format_rating(modal.item.vote_average)));

        if let Some(studio) = modal.details.as_ref().and_then(|d| d.studio()) {
            entries.push(labeled("Studio", studio.to_string()));
        }

        Column::with_children(entries)
            .spacing(8)
            .width(Length::FillPortion(1))
            .into()
    }
}

fn labeled<'a>(label: &'a str, value: String) -> Element<'a, Message> {
    row![
        text(format!("{}:", label)).size(14).color(TEXT_WHITE),
        text(value).size(14).color(TEXT_GRAY)
    ]
    .spacing(6)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rating_one_decimal() {
        assert_eq!(format_rating(8.7), "8.7/10");
        assert_eq!(format_rating(7.0), "7.0/10");
        assert_eq!(format_rating(6.456), "6.5/10");
    }
}
