use iced::widget::{
    button, column, container, row, scrollable, text, text_input, Column, Row, Space,
};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::handlers::SEARCH_ROW_INDEX;
use crate::media::{LoadingState, Message, NETFLIX_RED, SURFACE_DARK_GRAY, TEXT_GRAY, TEXT_WHITE};
use crate::Flixview;

const ICON_PERSON_FILL: char = '\u{F4DA}';
const ICON_SEARCH: char = '\u{F52A}';
const ICON_X: char = '\u{F659}';

const HEADER_HEIGHT: f32 = 80.0;

const NAV_LABELS: [&str; 5] = ["Home", "TV Shows", "Movies", "New & Popular", "My List"];

const FOOTER_COLUMNS: [[&str; 4]; 4] = [
    ["Audio Description", "Help Center", "Gift Cards", "Media Center"],
    ["Investor Relations", "Jobs", "Terms of Use", "Privacy"],
    ["Cookie Preferences", "Corporate Information", "Contact Us", "Speed Test"],
    ["Account", "Redeem Gift Cards", "Legal Notices", "Only on Flixview"],
];

pub fn icon(icon_char: char) -> iced::widget::Text<'static> {
    text(icon_char.to_string()).font(iced::Font {
        family: iced::font::Family::Name("bootstrap-icons"),
        ..Default::default()
    })
}

pub fn hidden_scrollbar_style(_theme: &iced::Theme, _status: scrollable::Status) -> scrollable::Style {
    let hidden_rail = scrollable::Rail {
        background: None,
        border: Border::default(),
        scroller: scrollable::Scroller {
            background: iced::Background::Color(Color::TRANSPARENT),
            border: Border::default(),
        },
    };

    scrollable::Style {
        container: container::Style::default(),
        vertical_rail: hidden_rail.clone(),
        horizontal_rail: hidden_rail,
        gap: None,
        auto_scroll: scrollable::AutoScroll {
            background: iced::Background::Color(Color::TRANSPARENT),
            border: Border::default(),
            shadow: Shadow::default(),
            icon: Color::TRANSPARENT,
        },
    }
}

impl Flixview {
    pub fn view_header(&self) -> Element<'_, Message> {
        let left_section = row![self.view_logo(), self.view_navigation()]
            .spacing(32)
            .align_y(iced::Alignment::Center);

        let right_section = row![self.view_search_bar(), self.view_profile_button()]
            .spacing(16)
            .align_y(iced::Alignment::Center);

        let header_content = row![
            left_section,
            Space::new().width(Length::Fill),
            right_section
        ]
        .padding(Padding::new(16.0).left(48.0).right(48.0))
        .align_y(iced::Alignment::Center);

        let is_scrolled = self.main_scroll_offset > 0.0;

        container(header_content)
            .width(Length::Fill)
            .height(Length::Fixed(HEADER_HEIGHT))
            .style(move |_theme| {
                if is_scrolled {
                    container::Style {
                        background: Some(iced::Background::Color(Color::from_rgba(
                            0.0, 0.0, 0.0, 0.9,
                        ))),
                        ..Default::default()
                    }
                } else {
                    container::Style {
                        background: Some(iced::Background::Gradient(iced::Gradient::Linear(
                            iced::gradient::Linear::new(std::f32::consts::PI)
                                .add_stop(0.0, Color::from_rgba(0.0, 0.0, 0.0, 0.8))
                                .add_stop(1.0, Color::TRANSPARENT),
                        ))),
                        ..Default::default()
                    }
                }
            })
            .into()
    }

    fn view_logo(&self) -> Element<'_, Message> {
        text("FLIXVIEW")
            .size(28)
            .color(NETFLIX_RED)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            })
            .into()
    }

    /// Navigation labels are decorative; there is only one page.
    fn view_navigation(&self) -> Element<'_, Message> {
        let labels: Vec<Element<Message>> = NAV_LABELS
            .into_iter()
            .map(|label| {
                text(label)
                    .size(14)
                    .color(TEXT_WHITE)
                    .shaping(text::Shaping::Advanced)
                    .into()
            })
            .collect();

        Row::with_children(labels)
            .spacing(24)
            .align_y(iced::Alignment::Center)
            .into()
    }

    fn view_search_bar(&self) -> Element<'_, Message> {
        let toggle_icon = if self.search_open { ICON_X } else { ICON_SEARCH };
        let toggle = button(icon(toggle_icon).size(16).color(TEXT_WHITE))
            .padding(8)
            .style(|_theme, status| {
                let text_color = match status {
                    button::Status::Hovered => TEXT_GRAY,
                    _ => TEXT_WHITE,
                };
                button::Style {
                    background: Some(iced::Background::Color(Color::TRANSPARENT)),
                    text_color,
                    border: Border::default(),
                    shadow: Shadow::default(),
                    snap: false,
                }
            })
            .on_press(Message::ToggleSearch);

        if !self.search_open {
            return toggle.into();
        }

        let search_input = text_input("Search movies, TV shows...", &self.search_query)
            .on_input(Message::SearchQueryChanged)
            .padding(Padding::new(8.0).left(16.0).right(16.0))
            .width(Length::Fixed(256.0))
            .style(|_theme, status| {
                let border_color = match status {
                    text_input::Status::Focused { .. } => TEXT_WHITE,
                    _ => TEXT_GRAY,
                };
                text_input::Style {
                    background: iced::Background::Color(Color::BLACK),
                    border: Border {
                        color: border_color,
                        width: 1.0,
                        radius: 4.0.into(),
                    },
                    icon: TEXT_GRAY,
                    placeholder: TEXT_GRAY,
                    value: TEXT_WHITE,
                    selection: NETFLIX_RED,
                }
            });

        row![search_input, toggle]
            .spacing(8)
            .align_y(iced::Alignment::Center)
            .into()
    }

    fn view_profile_button(&self) -> Element<'_, Message> {
        let profile_icon = container(icon(ICON_PERSON_FILL).size(18).color(TEXT_WHITE))
            .width(Length::Fixed(32.0))
            .height(Length::Fixed(32.0))
            .center_x(Length::Fill)
            .center_y(Length::Fill);

        button(profile_icon)
            .width(Length::Fixed(32.0))
            .height(Length::Fixed(32.0))
            .padding(0)
            .style(|_theme, _status| button::Style {
                background: Some(iced::Background::Color(NETFLIX_RED)),
                text_color: TEXT_WHITE,
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 4.0.into(),
                },
                shadow: Shadow::default(),
                snap: false,
            })
            .on_press(Message::ProfileClicked)
            .into()
    }

    pub fn view_main_content(&self) -> Element<'_, Message> {
        match self.loading_state {
            LoadingState::Loading => self.view_loading_state(),
            LoadingState::Idle => self.view_idle_state(),
        }
    }

    fn view_loading_state(&self) -> Element<'_, Message> {
        let spinner_ring = container(Space::new().width(48).height(48)).style(|_theme| {
            container::Style {
                border: Border {
                    color: NETFLIX_RED,
                    width: 4.0,
                    radius: 24.0.into(),
                },
                ..Default::default()
            }
        });

        let label = text("Loading Flixview...").size(20).color(TEXT_WHITE);

        container(
            column![spinner_ring, label]
                .spacing(16)
                .align_x(iced::Alignment::Center),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
    }

    fn view_idle_state(&self) -> Element<'_, Message> {
        let search_row = self
            .search_results
            .as_ref()
            .filter(|results| !results.items.is_empty());

        let page: Column<Message> = match search_row {
            Some(results) => column![
                Space::new().height(HEADER_HEIGHT + 16.0),
                self.view_content_row(results, SEARCH_ROW_INDEX)
            ],
            None => {
                let rows: Vec<Element<Message>> = self
                    .rows
                    .iter()
                    .enumerate()
                    .map(|(index, content_row)| self.view_content_row(content_row, index))
                    .collect();

                let mut page = column![self.view_hero_section(), Column::with_children(rows).spacing(32)];
                if self.search_results.is_none() {
                    page = page.push(
                        self.view_content_row(&self.continue_watching, self.rows.len()),
                    );
                }
                page
            }
        };

        let page = page.push(self.view_footer()).spacing(32).width(Length::Fill);

        iced::widget::stack![
            scrollable(page)
                .direction(scrollable::Direction::Vertical(
                    scrollable::Scrollbar::new().width(0).scroller_width(0),
                ))
                .on_scroll(|viewport| Message::MainScrolled(viewport.absolute_offset().y))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(hidden_scrollbar_style),
            self.view_header()
        ]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    fn view_footer(&self) -> Element<'_, Message> {
        let link_columns: Vec<Element<Message>> = FOOTER_COLUMNS
            .iter()
            .map(|links| {
                let entries: Vec<Element<Message>> = links
                    .iter()
                    .map(|label| text(*label).size(13).color(TEXT_GRAY).into())
                    .collect();
                Column::with_children(entries)
                    .spacing(8)
                    .width(Length::FillPortion(1))
                    .into()
            })
            .collect();

        let notice = text("© 2024 Flixview. This is a demo project for educational purposes.")
            .size(12)
            .color(TEXT_GRAY);

        container(
            column![Row::with_children(link_columns).spacing(32), notice].spacing(32),
        )
        .width(Length::Fill)
        .padding(Padding::new(48.0).left(64.0).right(64.0))
        .style(|_theme| container::Style {
            border: Border {
                color: SURFACE_DARK_GRAY,
                width: 1.0,
                radius: 0.0.into(),
            },
            ..Default::default()
        })
        .into()
    }
}
