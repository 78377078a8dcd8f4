use std::collections::{HashMap, HashSet};
use std::fmt;

use iced::widget::image::Handle;
use iced::Color;
use serde::Deserialize;

use crate::trailer::TrailerVideo;

pub const BACKGROUND_BLACK: Color = Color::from_rgb(0.0, 0.0, 0.0);
pub const SURFACE_DARK_GRAY: Color = Color::from_rgb(0.078, 0.078, 0.078);
pub const MODAL_GRAY: Color = Color::from_rgb(0.067, 0.094, 0.153);
pub const NETFLIX_RED: Color = Color::from_rgb(0.898, 0.035, 0.078);
pub const MATCH_GREEN: Color = Color::from_rgb(0.133, 0.773, 0.369);
pub const TEXT_WHITE: Color = Color::from_rgb(1.0, 1.0, 1.0);
pub const TEXT_GRAY: Color = Color::from_rgb(0.702, 0.702, 0.702);

/// Catalog ids are integers from the API, but locally defined items use strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum MediaId {
    Number(u64),
    Text(String),
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaId::Number(n) => write!(f, "{}", n),
            MediaId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for MediaId {
    fn from(id: &str) -> Self {
        MediaId::Text(id.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaKind {
    #[default]
    Movie,
    Tv,
}

impl MediaKind {
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("tv") => MediaKind::Tv,
            _ => MediaKind::Movie,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }
}

/// A single catalog record as the API returns it; movies and TV shows name
/// their title and date fields differently.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRecord {
    pub id: MediaId,
    pub title: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f32>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub media_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRecordPage {
    #[serde(default)]
    pub results: Vec<CatalogRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    pub id: MediaId,
    pub kind: MediaKind,
    pub display_title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: f32,
    pub display_date: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<CatalogRecord> for MediaItem {
    fn from(record: CatalogRecord) -> Self {
        Self {
            id: record.id,
            kind: MediaKind::from_tag(record.media_type.as_deref()),
            display_title: non_empty(record.title)
                .or(non_empty(record.name))
                .unwrap_or_default(),
            overview: record.overview.unwrap_or_default(),
            poster_path: non_empty(record.poster_path),
            backdrop_path: non_empty(record.backdrop_path),
            vote_average: record.vote_average.unwrap_or(0.0),
            display_date: non_empty(record.release_date).or(non_empty(record.first_air_date)),
        }
    }
}

impl MediaItem {
    pub fn year(&self) -> Option<u32> {
        self.display_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse().ok())
    }

    pub fn year_label(&self) -> String {
        self.year()
            .map_or_else(|| String::from("N/A"), |y| y.to_string())
    }

    pub fn match_percent(&self) -> u32 {
        (self.vote_average * 10.0).round().max(0.0) as u32
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogPage {
    pub results: Vec<MediaItem>,
}

impl From<CatalogRecordPage> for CatalogPage {
    fn from(page: CatalogRecordPage) -> Self {
        Self {
            results: page.results.into_iter().map(MediaItem::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentRow {
    pub title: String,
    pub items: Vec<MediaItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductionCompany {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaDetails {
    pub runtime: Option<u32>,
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
}

impl MediaDetails {
    pub fn runtime_minutes(&self) -> Option<u32> {
        self.runtime
            .filter(|m| *m > 0)
            .or_else(|| self.episode_run_time.first().copied())
    }

    pub fn genre_names(&self) -> String {
        self.genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn studio(&self) -> Option<&str> {
        self.production_companies.first().map(|c| c.name.as_str())
    }
}

pub fn format_runtime(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailerSlot {
    Hero,
    Modal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardKey {
    pub row: usize,
    pub position: usize,
}

#[derive(Debug, Clone)]
pub struct DetailModal {
    pub item: MediaItem,
    pub details: Option<MediaDetails>,
    pub trailer: Option<TrailerVideo>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadingState {
    Loading,
    Idle,
}

#[derive(Debug, Clone, Default)]
pub struct ImageCache {
    cache: HashMap<String, Handle>,
    pending: HashSet<String>,
    failed: HashSet<String>,
}

impl ImageCache {
    pub fn get(&self, url: &str) -> Option<&Handle> {
        self.cache.get(url)
    }

    pub fn insert(&mut self, url: String, handle: Handle) {
        self.pending.remove(&url);
        self.cache.insert(url, handle);
    }

    pub fn mark_failed(&mut self, url: String) {
        self.pending.remove(&url);
        self.failed.insert(url);
    }

    pub fn has_failed(&self, url: &str) -> bool {
        self.failed.contains(url)
    }

    pub fn is_pending(&self, url: &str) -> bool {
        self.pending.contains(url)
    }

    pub fn mark_pending(&mut self, url: String) {
        self.pending.insert(url);
    }

    pub fn is_known(&self, url: &str) -> bool {
        self.cache.contains_key(url) || self.pending.contains(url) || self.failed.contains(url)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ScrollDirection {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub enum Message {
    ToggleSearch,
    SearchQueryChanged(String),
    SearchDebounceElapsed(u64),
    SearchResultsLoaded(u64, Option<ContentRow>),
    FeaturedLoaded(Option<MediaItem>),
    RowsLoaded(Vec<ContentRow>),
    LoadImage(String),
    ImageLoaded(String, Result<Handle, String>),
    TrailerLoaded(TrailerSlot, MediaId, Option<TrailerVideo>),
    DetailsLoaded(MediaId, Option<MediaDetails>),
    HoverCard(Option<CardKey>),
    ScrollRow(usize, ScrollDirection),
    RowScrolled(usize, f32),
    MainScrolled(f32),
    OpenDetails(MediaItem),
    CloseDetails,
    PlayTrailer(TrailerSlot),
    ProfileClicked,
}

pub fn truncate_description(description: &str, max_length: usize) -> String {
    if description.chars().count() <= max_length {
        return description.to_string();
    }
    let truncated: String = description.chars().take(max_length).collect();
    let cut = truncated.rfind(' ').map_or(truncated.as_str(), |i| &truncated[..i]);
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> CatalogRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_movie_record_uses_title_and_release_date() {
        // Arrange
        let raw = record(
            r#"{"id": 550, "title": "Fight Club", "overview": "x", "poster_path": "/p.jpg",
                "backdrop_path": "/b.jpg", "vote_average": 8.4, "release_date": "1999-10-15",
                "media_type": "movie"}"#,
        );

        // Act
        let item = MediaItem::from(raw);

        // Assert
        assert_eq!(item.id, MediaId::Number(550));
        assert_eq!(item.kind, MediaKind::Movie);
        assert_eq!(item.display_title, "Fight Club");
        assert_eq!(item.display_date.as_deref(), Some("1999-10-15"));
        assert_eq!(item.year(), Some(1999));
    }

    #[test]
    fn test_tv_record_uses_name_and_first_air_date() {
        // Arrange
        let raw = record(
            r#"{"id": 1399, "name": "Game of Thrones", "first_air_date": "2011-04-17",
                "media_type": "tv", "vote_average": 8.5}"#,
        );

        // Act
        let item = MediaItem::from(raw);

        // Assert
        assert_eq!(item.kind, MediaKind::Tv);
        assert_eq!(item.display_title, "Game of Thrones");
        assert_eq!(item.display_date.as_deref(), Some("2011-04-17"));
        assert_eq!(item.overview, "");
    }

    #[test]
    fn test_missing_media_type_defaults_to_movie() {
        // Arrange
        let raw = record(r#"{"id": 7, "title": "Untyped"}"#);

        // Act
        let item = MediaItem::from(raw);

        // Assert
        assert_eq!(item.kind, MediaKind::Movie);
        assert_eq!(item.vote_average, 0.0);
        assert_eq!(item.year_label(), "N/A");
    }

    #[test]
    fn test_string_id_and_null_paths() {
        // Arrange
        let raw = record(
            r#"{"id": "continue-1", "title": "Breaking Bad", "poster_path": null,
                "backdrop_path": ""}"#,
        );

        // Act
        let item = MediaItem::from(raw);

        // Assert
        assert_eq!(item.id, MediaId::from("continue-1"));
        assert_eq!(item.poster_path, None);
        assert_eq!(item.backdrop_path, None);
    }

    #[test]
    fn test_page_without_results_is_empty() {
        // Arrange
        let raw: CatalogRecordPage = serde_json::from_str(r#"{"page": 1}"#).unwrap();

        // Act
        let page = CatalogPage::from(raw);

        // Assert
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_match_percent_rounds() {
        // Arrange
        let mut item = MediaItem::from(record(r#"{"id": 1, "title": "t"}"#));
        item.vote_average = 8.66;

        // Act & Assert
        assert_eq!(item.match_percent(), 87);
    }

    #[test]
    fn test_details_runtime_and_fields() {
        // Arrange
        let details: MediaDetails = serde_json::from_str(
            r#"{"runtime": 139, "genres": [{"id": 18, "name": "Drama"}, {"id": 53, "name": "Thriller"}],
                "production_companies": [{"id": 1, "name": "Fox 2000 Pictures"}]}"#,
        )
        .unwrap();

        // Act & Assert
        assert_eq!(details.runtime_minutes(), Some(139));
        assert_eq!(format_runtime(139), "2h 19m");
        assert_eq!(details.genre_names(), "Drama, Thriller");
        assert_eq!(details.studio(), Some("Fox 2000 Pictures"));
    }

    #[test]
    fn test_tv_details_fall_back_to_episode_run_time() {
        // Arrange
        let details: MediaDetails =
            serde_json::from_str(r#"{"episode_run_time": [50, 60]}"#).unwrap();

        // Act & Assert
        assert_eq!(details.runtime_minutes(), Some(50));
        assert_eq!(details.studio(), None);
        assert_eq!(details.genre_names(), "");
    }

    #[test]
    fn test_truncate_description_cuts_at_word() {
        // Arrange & Act
        let out = truncate_description("one two three four", 9);

        // Assert
        assert_eq!(out, "one two...");
    }
}
