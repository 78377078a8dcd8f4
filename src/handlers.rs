use std::time::Duration;

use iced::widget::image::Handle;
use iced::Task;

use crate::catalog::{fetch_image_bytes, ImageSize};
use crate::content;
use crate::media::{
    ContentRow, DetailModal, LoadingState, MediaDetails, MediaId, MediaItem, Message,
    ScrollDirection, TrailerSlot,
};
use crate::trailer::{open_in_browser, TrailerVideo};
use crate::Flixview;

const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
const ROW_SCROLL_STEP: f32 = 400.0;
const IMAGES_PER_ROW: usize = 20;

pub const SEARCH_ROW_INDEX: usize = 11;

pub const ROW_IDS: [&str; 12] = [
    "row-0", "row-1", "row-2", "row-3", "row-4", "row-5", "row-6", "row-7", "row-8", "row-9",
    "row-10", "row-search",
];

pub fn row_id(index: usize) -> Option<&'static str> {
    ROW_IDS.get(index).copied()
}

pub fn handle_message(app: &mut Flixview, message: Message) -> Task<Message> {
    match message {
        Message::ToggleSearch => {
            app.search_open = !app.search_open;
            Task::none()
        }
        Message::SearchQueryChanged(query) => handle_search_query_changed(app, query),
        Message::SearchDebounceElapsed(generation) => handle_search_debounce(app, generation),
        Message::SearchResultsLoaded(generation, row) => {
            handle_search_results(app, generation, row)
        }
        Message::FeaturedLoaded(featured) => handle_featured_loaded(app, featured),
        Message::RowsLoaded(rows) => handle_rows_loaded(app, rows),
        Message::LoadImage(url) => handle_load_image(app, url),
        Message::ImageLoaded(url, result) => handle_image_loaded(app, url, result),
        Message::TrailerLoaded(slot, id, trailer) => handle_trailer_loaded(app, slot, id, trailer),
        Message::DetailsLoaded(id, details) => handle_details_loaded(app, id, details),
        Message::HoverCard(key) => {
            if app.detail_modal.is_none() {
                app.hovered_card = key;
            }
            Task::none()
        }
        Message::ScrollRow(index, direction) => handle_scroll_row(app, index, direction),
        Message::RowScrolled(index, offset) => {
            set_row_offset(app, index, offset);
            Task::none()
        }
        Message::MainScrolled(offset) => {
            app.main_scroll_offset = offset;
            Task::none()
        }
        Message::OpenDetails(item) => handle_open_details(app, item),
        Message::CloseDetails => {
            app.detail_modal = None;
            Task::none()
        }
        Message::PlayTrailer(slot) => {
            handle_play_trailer(app, slot);
            Task::none()
        }
        Message::ProfileClicked => {
            tracing::info!("profile clicked");
            Task::none()
        }
    }
}

fn handle_search_query_changed(app: &mut Flixview, query: String) -> Task<Message> {
    app.search_query = query;
    app.search_generation = app.search_generation.wrapping_add(1);

    if app.search_query.trim().is_empty() {
        clear_search(app);
        return Task::none();
    }

    let generation = app.search_generation;
    Task::perform(
        async move { tokio::time::sleep(SEARCH_DEBOUNCE).await },
        move |()| Message::SearchDebounceElapsed(generation),
    )
}

fn handle_search_debounce(app: &mut Flixview, generation: u64) -> Task<Message> {
    if generation != app.search_generation {
        return Task::none();
    }
    let client = app.catalog.clone();
    let query = app.search_query.clone();
    Task::perform(content::search(client, query), move |row| {
        Message::SearchResultsLoaded(generation, row)
    })
}

fn handle_search_results(
    app: &mut Flixview,
    generation: u64,
    row: Option<ContentRow>,
) -> Task<Message> {
    if generation != app.search_generation {
        return Task::none();
    }
    let Some(row) = row else {
        clear_search(app);
        return Task::none();
    };
    set_row_offset(app, SEARCH_ROW_INDEX, 0.0);
    let image_task = load_row_images(app, &row);
    app.search_results = Some(row);
    image_task
}

fn clear_search(app: &mut Flixview) {
    if app.search_results.take().is_some() {
        tracing::info!("search cleared");
    }
    app.hovered_card = None;
}

fn finish_initial_load(app: &mut Flixview) {
    app.pending_loads = app.pending_loads.saturating_sub(1);
    if app.pending_loads == 0 {
        app.loading_state = LoadingState::Idle;
    }
}

fn handle_featured_loaded(app: &mut Flixview, featured: Option<MediaItem>) -> Task<Message> {
    finish_initial_load(app);
    app.featured = featured;
    let Some(item) = &app.featured else {
        return Task::none();
    };

    let mut tasks = Vec::new();
    if let Some(backdrop) = item.backdrop_path.as_deref() {
        tasks.push(Task::done(Message::LoadImage(
            app.catalog.image_url(Some(backdrop), ImageSize::Backdrop),
        )));
    }
    tasks.push(lookup_trailer(app, TrailerSlot::Hero, item));
    Task::batch(tasks)
}

fn handle_rows_loaded(app: &mut Flixview, rows: Vec<ContentRow>) -> Task<Message> {
    finish_initial_load(app);
    app.rows = rows;
    app.row_scroll_offsets = vec![0.0; ROW_IDS.len()];

    let tasks: Vec<Task<Message>> = app
        .rows
        .iter()
        .chain(std::iter::once(&app.continue_watching))
        .map(|row| load_row_images(app, row))
        .collect();
    Task::batch(tasks)
}

fn load_row_images(app: &Flixview, row: &ContentRow) -> Task<Message> {
    let tasks: Vec<Task<Message>> = row
        .items
        .iter()
        .take(IMAGES_PER_ROW)
        .map(|item| app.catalog.image_url(item.poster_path.as_deref(), ImageSize::Poster))
        .filter(|url| !app.image_cache.is_known(url))
        .map(|url| Task::done(Message::LoadImage(url)))
        .collect();
    Task::batch(tasks)
}

fn handle_load_image(app: &mut Flixview, url: String) -> Task<Message> {
    if app.image_cache.is_known(&url) {
        return Task::none();
    }
    app.image_cache.mark_pending(url.clone());
    Task::perform(fetch_image_bytes(url.clone()), move |result| {
        Message::ImageLoaded(url, result.map(Handle::from_bytes))
    })
}

fn handle_image_loaded(
    app: &mut Flixview,
    url: String,
    result: Result<Handle, String>,
) -> Task<Message> {
    match result {
        Ok(handle) => {
            app.image_cache.insert(url, handle);
            Task::none()
        }
        Err(error) => {
            tracing::debug!(%url, %error, "image unavailable");
            let placeholder = app.catalog.placeholder_image_url().to_string();
            let needs_placeholder = url != placeholder;
            app.image_cache.mark_failed(url);
            if needs_placeholder {
                Task::done(Message::LoadImage(placeholder))
            } else {
                Task::none()
            }
        }
    }
}

fn lookup_trailer(app: &Flixview, slot: TrailerSlot, item: &MediaItem) -> Task<Message> {
    let client = app.catalog.clone();
    let id = item.id.clone();
    let kind = item.kind;
    Task::perform(
        async move {
            let trailer = client.fetch_trailer(&id, kind).await;
            (id, trailer)
        },
        move |(id, trailer)| Message::TrailerLoaded(slot, id, trailer),
    )
}

fn handle_trailer_loaded(
    app: &mut Flixview,
    slot: TrailerSlot,
    id: MediaId,
    trailer: Option<TrailerVideo>,
) -> Task<Message> {
    match slot {
        TrailerSlot::Hero => {
            if app.featured.as_ref().map(|f| &f.id) == Some(&id) {
                app.hero_trailer = trailer;
            }
        }
        TrailerSlot::Modal => {
            if let Some(modal) = app.detail_modal.as_mut().filter(|m| m.item.id == id) {
                modal.trailer = trailer;
            }
        }
    }
    Task::none()
}

fn handle_open_details(app: &mut Flixview, item: MediaItem) -> Task<Message> {
    app.hovered_card = None;

    let client = app.catalog.clone();
    let id = item.id.clone();
    let kind = item.kind;
    let details_task = Task::perform(
        async move {
            let details = client.fetch_details(&id, kind).await;
            (id, details)
        },
        |(id, details)| Message::DetailsLoaded(id, details),
    );
    let trailer_task = lookup_trailer(app, TrailerSlot::Modal, &item);

    let mut tasks = vec![details_task, trailer_task];
    if let Some(backdrop) = item.backdrop_path.as_deref() {
        tasks.push(Task::done(Message::LoadImage(
            app.catalog.image_url(Some(backdrop), ImageSize::Backdrop),
        )));
    }

    app.detail_modal = Some(DetailModal {
        item,
        details: None,
        trailer: None,
    });
    Task::batch(tasks)
}

fn handle_details_loaded(
    app: &mut Flixview,
    id: MediaId,
    details: Option<MediaDetails>,
) -> Task<Message> {
    if let Some(modal) = app.detail_modal.as_mut().filter(|m| m.item.id == id) {
        modal.details = details;
    }
    Task::none()
}

fn handle_play_trailer(app: &Flixview, slot: TrailerSlot) {
    match slot {
        TrailerSlot::Hero => {
            if let Some(trailer) = &app.hero_trailer {
                open_in_browser(&trailer.watch_url());
            }
        }
        TrailerSlot::Modal => {
            if let Some(trailer) = app.detail_modal.as_ref().and_then(|m| m.trailer.as_ref()) {
                open_in_browser(&trailer.embed_url());
            }
        }
    }
}

fn set_row_offset(app: &mut Flixview, index: usize, offset: f32) {
    if app.row_scroll_offsets.len() <= index {
        app.row_scroll_offsets.resize(index + 1, 0.0);
    }
    if let Some(slot) = app.row_scroll_offsets.get_mut(index) {
        *slot = offset;
    }
}

fn handle_scroll_row(app: &mut Flixview, index: usize, direction: ScrollDirection) -> Task<Message> {
    let Some(id) = row_id(index) else {
        return Task::none();
    };
    let current = app.row_scroll_offsets.get(index).copied().unwrap_or(0.0);
    let target = match direction {
        ScrollDirection::Left => (current - ROW_SCROLL_STEP).max(0.0),
        ScrollDirection::Right => current + ROW_SCROLL_STEP,
    };
    set_row_offset(app, index, target);

    let offset = iced::widget::scrollable::AbsoluteOffset { x: target, y: 0.0 };
    iced::widget::operation::scroll_to(iced::widget::Id::new(id), offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{fallback_page, CatalogClient};
    use crate::config::CatalogSettings;

    fn app() -> Flixview {
        let client = CatalogClient::new(&CatalogSettings::default()).unwrap();
        Flixview::new(client).0
    }

    fn row_of(title: &str) -> ContentRow {
        ContentRow {
            title: title.to_string(),
            items: fallback_page().results,
        }
    }

    #[test]
    fn test_loading_ends_after_featured_and_rows() {
        // Arrange
        let mut app = app();

        // Act
        let _ = handle_message(&mut app, Message::RowsLoaded(vec![row_of("Trending Now")]));
        let after_rows = app.loading_state.clone();
        let _ = handle_message(&mut app, Message::FeaturedLoaded(None));

        // Assert
        assert_eq!(after_rows, LoadingState::Loading);
        assert_eq!(app.loading_state, LoadingState::Idle);
        assert_eq!(app.rows.len(), 1);
        assert!(app.featured.is_none());
    }

    #[test]
    fn test_stale_search_results_are_ignored() {
        // Arrange
        let mut app = app();
        let _ = handle_message(&mut app, Message::SearchQueryChanged("wit".into()));
        let stale = app.search_generation;
        let _ = handle_message(&mut app, Message::SearchQueryChanged("witcher".into()));

        // Act
        let _ = handle_message(
            &mut app,
            Message::SearchResultsLoaded(stale, Some(row_of("Search Results"))),
        );

        // Assert
        assert!(app.search_results.is_none());
    }

    #[test]
    fn test_blank_query_clears_search_results() {
        // Arrange
        let mut app = app();
        let _ = handle_message(&mut app, Message::SearchQueryChanged("witcher".into()));
        let generation = app.search_generation;
        let _ = handle_message(
            &mut app,
            Message::SearchResultsLoaded(generation, Some(row_of("Search Results"))),
        );
        assert!(app.search_results.is_some());

        // Act
        let _ = handle_message(&mut app, Message::SearchQueryChanged("   ".into()));

        // Assert
        assert!(app.search_results.is_none());
        assert_eq!(app.search_query, "   ");
    }

    #[test]
    fn test_scroll_left_clamps_at_zero() {
        // Arrange
        let mut app = app();

        // Act
        let _ = handle_message(&mut app, Message::ScrollRow(2, ScrollDirection::Right));
        let _ = handle_message(&mut app, Message::ScrollRow(2, ScrollDirection::Left));
        let _ = handle_message(&mut app, Message::ScrollRow(2, ScrollDirection::Left));

        // Assert
        assert_eq!(app.row_scroll_offsets[2], 0.0);
    }

    #[test]
    fn test_scroll_right_moves_by_step() {
        // Arrange
        let mut app = app();

        // Act
        let _ = handle_message(&mut app, Message::ScrollRow(0, ScrollDirection::Right));
        let _ = handle_message(&mut app, Message::ScrollRow(0, ScrollDirection::Right));

        // Assert
        assert_eq!(app.row_scroll_offsets[0], 2.0 * ROW_SCROLL_STEP);
    }

    #[test]
    fn test_late_modal_lookups_for_other_item_are_dropped() {
        // Arrange
        let mut app = app();
        let page = fallback_page();
        let _ = handle_message(&mut app, Message::OpenDetails(page.results[0].clone()));
        let trailer = TrailerVideo {
            key: "abc".into(),
            site: "YouTube".into(),
            video_type: "Trailer".into(),
        };

        // Act
        let _ = handle_message(
            &mut app,
            Message::TrailerLoaded(TrailerSlot::Modal, page.results[1].id.clone(), Some(trailer.clone())),
        );
        let ignored = app.detail_modal.as_ref().and_then(|m| m.trailer.clone());
        let _ = handle_message(
            &mut app,
            Message::TrailerLoaded(TrailerSlot::Modal, page.results[0].id.clone(), Some(trailer)),
        );

        // Assert
        assert!(ignored.is_none());
        assert_eq!(
            app.detail_modal.and_then(|m| m.trailer).map(|t| t.key),
            Some(String::from("abc"))
        );
    }

    #[test]
    fn test_failed_image_falls_back_to_placeholder() {
        // Arrange
        let mut app = app();
        let url = String::from("https://image.tmdb.org/t/p/w500/missing.jpg");
        let _ = handle_message(&mut app, Message::LoadImage(url.clone()));
        assert!(app.image_cache.is_pending(&url));

        // Act
        let _ = handle_message(&mut app, Message::ImageLoaded(url.clone(), Err("404".into())));

        // Assert
        assert!(app.image_cache.has_failed(&url));
        assert!(!app.image_cache.is_pending(&url));
    }

    #[test]
    fn test_hover_ignored_while_modal_open() {
        // Arrange
        let mut app = app();
        let _ = handle_message(&mut app, Message::OpenDetails(fallback_page().results[0].clone()));

        // Act
        let _ = handle_message(
            &mut app,
            Message::HoverCard(Some(crate::media::CardKey { row: 0, position: 1 })),
        );

        // Assert
        assert!(app.hovered_card.is_none());
    }
}
