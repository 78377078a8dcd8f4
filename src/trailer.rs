use serde::Deserialize;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";
const EMBED_URL: &str = "https://www.youtube.com/embed/";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrailerVideo {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideosResponse {
    #[serde(default)]
    pub results: Vec<TrailerVideo>,
}

/// First YouTube video whose type is exactly "Trailer"; teasers and clips do not count.
pub fn find_trailer(videos: &[TrailerVideo]) -> Option<&TrailerVideo> {
    videos
        .iter()
        .find(|v| v.video_type == "Trailer" && v.site == "YouTube")
}

impl TrailerVideo {
    pub fn watch_url(&self) -> String {
        format!("{}{}", WATCH_URL, self.key)
    }

    /// Embeddable player URL, autoplaying and muted.
    pub fn embed_url(&self) -> String {
        format!("{}{}?autoplay=1&mute=1", EMBED_URL, self.key)
    }
}

pub fn open_in_browser(url: &str) {
    match webbrowser::open(url) {
        Ok(()) => tracing::info!(url, "opened trailer"),
        Err(error) => tracing::warn!(url, %error, "failed to open trailer"),
    }
}
