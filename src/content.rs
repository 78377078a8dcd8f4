//! Home page content: the featured title, the fixed category rows and search.
//!
//! None of these operations can fail. They inherit the catalog client's
//! contract, so a broken API shows up as fallback titles or missing rows.

use crate::catalog::CatalogClient;
use crate::media::{ContentRow, MediaId, MediaItem, MediaKind};

pub const SEARCH_RESULTS_TITLE: &str = "Search Results";
pub const CONTINUE_WATCHING_TITLE: &str = "Continue Watching for John";

const FEATURED_ENDPOINT: &str = "/trending/all/day";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub title: &'static str,
    pub endpoint: &'static str,
    pub query: &'static str,
}

const fn category(title: &'static str, endpoint: &'static str, query: &'static str) -> Category {
    Category {
        title,
        endpoint,
        query,
    }
}

/// Display order of the home page rows.
pub const CATEGORIES: [Category; 9] = [
    category("Trending Now", "/trending/all/day", "?"),
    category("Popular Movies", "/movie/popular", "?"),
    category("Top Rated Movies", "/movie/top_rated", "?"),
    category("Popular TV Shows", "/tv/popular", "?"),
    category("Action Movies", "/discover/movie", "?with_genres=28&"),
    category("Comedy Movies", "/discover/movie", "?with_genres=35&"),
    category("Horror Movies", "/discover/movie", "?with_genres=27&"),
    category("Romance Movies", "/discover/movie", "?with_genres=10749&"),
    category("Documentaries", "/discover/movie", "?with_genres=99&"),
];

pub async fn load_featured(client: CatalogClient) -> Option<MediaItem> {
    let featured = client
        .fetch(FEATURED_ENDPOINT, "?")
        .await
        .results
        .into_iter()
        .next();
    match &featured {
        Some(item) => tracing::info!(title = %item.display_title, "featured content selected"),
        None => tracing::info!("no featured content available"),
    }
    featured
}

/// Fetches every category one after another; empty categories are dropped.
pub async fn load_rows(client: CatalogClient) -> Vec<ContentRow> {
    let mut rows = Vec::with_capacity(CATEGORIES.len());
    for category in &CATEGORIES {
        let page = client.fetch(category.endpoint, category.query).await;
        if page.results.is_empty() {
            tracing::debug!(category = category.title, "category empty, skipped");
            continue;
        }
        rows.push(ContentRow {
            title: String::from(category.title),
            items: page.results,
        });
    }
    tracing::info!(rows = rows.len(), "content rows loaded");
    rows
}

/// `None` means the query was blank: search state should be cleared and no
/// request was made.
pub async fn search(client: CatalogClient, query: String) -> Option<ContentRow> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }
    tracing::info!(query = trimmed, "searching catalog");
    let search_query = format!("?query={}&", urlencoding::encode(&query));
    let page = client.fetch("/search/multi", &search_query).await;
    Some(ContentRow {
        title: String::from(SEARCH_RESULTS_TITLE),
        items: page.results,
    })
}

pub fn continue_watching_row() -> ContentRow {
    let entry = |id: &str, title: &str, poster: &str, vote: f32, date: &str| MediaItem {
        id: MediaId::from(id),
        kind: MediaKind::Movie,
        display_title: title.to_string(),
        overview: String::new(),
        poster_path: Some(poster.to_string()),
        backdrop_path: None,
        vote_average: vote,
        display_date: Some(date.to_string()),
    };
    ContentRow {
        title: String::from(CONTINUE_WATCHING_TITLE),
        items: vec![
            entry(
                "continue-1",
                "Breaking Bad",
                "/rweIrveL43TaxUN0akQEaAXL6x0.jpg",
                9.5,
                "2008-01-20",
            ),
            entry(
                "continue-2",
                "The Office",
                "/7DJKHzAi83BmQrWLrYYOqcoKfhR.jpg",
                8.8,
                "2005-03-24",
            ),
        ],
    }
}
