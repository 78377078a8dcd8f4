use iced::widget::{button, column, container, row, scrollable, text, Row, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::catalog::ImageSize;
use crate::components::{hidden_scrollbar_style, icon};
use crate::handlers::row_id;
use crate::media::{
    CardKey, ContentRow, MediaItem, Message, ScrollDirection, MATCH_GREEN, SURFACE_DARK_GRAY,
    TEXT_GRAY, TEXT_WHITE,
};
use crate::Flixview;

const ICON_CHEVRON_LEFT: char = '\u{F284}';
const ICON_CHEVRON_RIGHT: char = '\u{F285}';

const CARD_WIDTH: f32 = 200.0;
const CARD_HEIGHT: f32 = 300.0;
const CARD_SPACING: f32 = 8.0;
const MAX_CARDS: usize = 20;

impl Flixview {
    pub fn view_content_row<'a>(
        &'a self,
        content_row: &'a ContentRow,
        row_index: usize,
    ) -> Element<'a, Message> {
        let row_title = text(content_row.title.clone())
            .size(24)
            .color(TEXT_WHITE)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            });

        let cards: Vec<Element<Message>> = content_row
            .items
            .iter()
            .take(MAX_CARDS)
            .enumerate()
            .map(|(position, item)| {
                self.view_media_card(item, CardKey { row: row_index, position })
            })
            .collect();

        let cards_row = Row::with_children(cards)
            .spacing(CARD_SPACING)
            .align_y(iced::Alignment::Start);

        let mut scrollable_cards = scrollable(cards_row)
            .direction(scrollable::Direction::Horizontal(
                scrollable::Scrollbar::new().width(0).scroller_width(0),
            ))
            .on_scroll(move |viewport| {
                Message::RowScrolled(row_index, viewport.absolute_offset().x)
            })
            .width(Length::Fill)
            .style(hidden_scrollbar_style);
        if let Some(id) = row_id(row_index) {
            scrollable_cards = scrollable_cards.id(iced::widget::Id::new(id));
        }

        let scroll_offset = self
            .row_scroll_offsets
            .get(row_index)
            .copied()
            .unwrap_or(0.0);

        let left_arrow: Element<Message> = if scroll_offset > 0.0 {
            self.view_scroll_arrow(row_index, ScrollDirection::Left)
        } else {
            Space::new().width(0).height(0).into()
        };
        let right_arrow = self.view_scroll_arrow(row_index, ScrollDirection::Right);

        let left_overlay = container(left_arrow)
            .width(Length::Fill)
            .height(Length::Fixed(CARD_HEIGHT))
            .padding(Padding::new(0.0).left(8.0))
            .align_x(iced::alignment::Horizontal::Left)
            .align_y(iced::alignment::Vertical::Center);

        let right_overlay = container(right_arrow)
            .width(Length::Fill)
            .height(Length::Fixed(CARD_HEIGHT))
            .padding(Padding::new(0.0).right(8.0))
            .align_x(iced::alignment::Horizontal::Right)
            .align_y(iced::alignment::Vertical::Center);

        let cards_with_arrows = iced::widget::stack![scrollable_cards, left_overlay, right_overlay]
            .width(Length::Fill)
            .height(Length::Fixed(CARD_HEIGHT));

        column![row_title, cards_with_arrows]
            .spacing(16)
            .padding(Padding::new(0.0).left(64.0).right(64.0))
            .width(Length::Fill)
            .into()
    }

    fn view_scroll_arrow(
        &self,
        row_index: usize,
        direction: ScrollDirection,
    ) -> Element<'_, Message> {
        let icon_char = match direction {
            ScrollDirection::Left => ICON_CHEVRON_LEFT,
            ScrollDirection::Right => ICON_CHEVRON_RIGHT,
        };

        button(
            container(icon(icon_char).size(24).color(TEXT_WHITE))
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
        .on_press(Message::ScrollRow(row_index, direction))
        .into()
    }

    fn view_media_card(&self, item: &MediaItem, key: CardKey) -> Element<'_, Message> {
        let poster = self.view_card_poster(item);

        let content: Element<Message> = if self.hovered_card == Some(key) {
            iced::widget::stack![poster, self.view_card_hover_overlay(item)].into()
        } else {
            poster
        };

        let card_container = container(content)
            .width(Length::Fixed(CARD_WIDTH))
            .height(Length::Fixed(CARD_HEIGHT))
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 6.0.into(),
                },
                ..Default::default()
            });

        iced::widget::mouse_area(card_container)
            .on_enter(Message::HoverCard(Some(key)))
            .on_exit(Message::HoverCard(None))
            .on_press(Message::OpenDetails(item.clone()))
            .into()
    }

    /// Poster image, the placeholder when the poster failed or is absent, or
    /// an empty surface while either is still loading.
    fn view_card_poster(&self, item: &MediaItem) -> Element<'_, Message> {
        let poster_url = self
            .catalog
            .image_url(item.poster_path.as_deref(), ImageSize::Poster);

        let handle = if self.image_cache.has_failed(&poster_url) {
            self.image_cache.get(self.catalog.placeholder_image_url())
        } else {
            self.image_cache.get(&poster_url)
        };

        match handle {
            Some(handle) => iced::widget::image(handle.clone())
                .width(Length::Fixed(CARD_WIDTH))
                .height(Length::Fixed(CARD_HEIGHT))
                .content_fit(iced::ContentFit::Cover)
                .into(),
            None => {
                let label = if self.image_cache.is_pending(&poster_url) {
                    ""
                } else {
                    "No Image"
                };
                container(text(label).size(14).color(TEXT_GRAY))
                    .width(Length::Fixed(CARD_WIDTH))
                    .height(Length::Fixed(CARD_HEIGHT))
                    .center_x(Length::Fill)
                    .center_y(Length::Fill)
                    .into()
            }
        }
    }

    fn view_card_hover_overlay(&self, item: &MediaItem) -> Element<'_, Message> {
        let title = text(item.display_title.clone())
            .size(18)
            .color(TEXT_WHITE)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            });

        let metadata = row![
            text(format!("{}% Match", item.match_percent()))
                .size(14)
                .color(MATCH_GREEN),
            text(item.year_label()).size(14).color(TEXT_GRAY)
        ]
        .spacing(8)
        .align_y(iced::Alignment::Center);

        container(column![title, metadata].spacing(8))
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(16)
            .align_y(iced::alignment::Vertical::Bottom)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(Color::from_rgba(
                    0.0, 0.0, 0.0, 0.7,
                ))),
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 6.0.into(),
                },
                ..Default::default()
            })
            .into()
    }
}
