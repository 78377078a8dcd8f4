mod cards;
mod catalog;
mod components;
mod config;
mod content;
mod credentials;
mod detail_popup;
mod handlers;
mod hero;
mod media;
mod trailer;

use iced::widget::container;
use iced::{Element, Font, Length, Size, Task, Theme};
use tracing_subscriber::filter::EnvFilter;

use catalog::CatalogClient;
use config::CatalogSettings;
use content::{continue_watching_row, load_featured, load_rows};
use media::{
    CardKey, ContentRow, DetailModal, ImageCache, LoadingState, MediaItem, Message,
    BACKGROUND_BLACK,
};
use trailer::TrailerVideo;

pub struct Flixview {
    pub catalog: CatalogClient,
    pub loading_state: LoadingState,
    pub pending_loads: u8,
    pub featured: Option<MediaItem>,
    pub hero_trailer: Option<TrailerVideo>,
    pub rows: Vec<ContentRow>,
    pub continue_watching: ContentRow,
    pub search_open: bool,
    pub search_query: String,
    pub search_generation: u64,
    pub search_results: Option<ContentRow>,
    pub hovered_card: Option<CardKey>,
    pub row_scroll_offsets: Vec<f32>,
    pub main_scroll_offset: f32,
    pub detail_modal: Option<DetailModal>,
    pub image_cache: ImageCache,
}

impl Flixview {
    fn new(catalog: CatalogClient) -> (Self, Task<Message>) {
        // Rows start once featured has resolved, so a failing first key is
        // rotated away before the first category is requested.
        let load_home = Task::perform(load_featured(catalog.clone()), Message::FeaturedLoaded)
            .chain(Task::perform(load_rows(catalog.clone()), Message::RowsLoaded));
        let placeholder = Task::done(Message::LoadImage(
            catalog.placeholder_image_url().to_string(),
        ));

        (
            Self {
                catalog,
                loading_state: LoadingState::Loading,
                pending_loads: 2,
                featured: None,
                hero_trailer: None,
                rows: Vec::new(),
                continue_watching: continue_watching_row(),
                search_open: false,
                search_query: String::new(),
                search_generation: 0,
                search_results: None,
                hovered_card: None,
                row_scroll_offsets: Vec::new(),
                main_scroll_offset: 0.0,
                detail_modal: None,
                image_cache: ImageCache::default(),
            },
            Task::batch([load_home, placeholder]),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        handlers::handle_message(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        let main_content = container(self.view_main_content())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(BACKGROUND_BLACK)),
                ..Default::default()
            });

        if let Some(modal) = &self.detail_modal {
            let popup_overlay = self.view_detail_popup_overlay(modal);
            return iced::widget::stack![main_content, popup_overlay]
                .width(Length::Fill)
                .height(Length::Fill)
                .into();
        }

        main_content.into()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let catalog = match CatalogClient::new(&CatalogSettings::default()) {
        Ok(client) => client,
        Err(error) => {
            tracing::error!(%error, "invalid catalog configuration");
            return Ok(());
        }
    };
    tracing::info!(api_keys = catalog.credentials().len(), "catalog client ready");

    iced::application(move || Flixview::new(catalog.clone()), Flixview::update, Flixview::view)
        .title("Flixview")
        .theme(Flixview::theme)
        .window_size(Size::new(1280.0, 720.0))
        .font(iced_fonts::BOOTSTRAP_FONT_BYTES)
        .default_font(Font::DEFAULT)
        .run()
}
