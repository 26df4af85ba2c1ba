use serde::{Deserialize, Serialize};

/// File extensions treated as video when classifying carousel items.
const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".mov"];

/// Kind of media a container is created for.
///
/// Carousel children reuse `Image` / `Video` and are flagged with
/// `is_carousel_item` in the create request instead of a separate kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaKind {
    Image,
    Video,
    Reels,
    /// Aggregating container whose `children` are previously created containers.
    Carousel,
}

impl MediaKind {
    /// Classify a source URL by its file extension.
    ///
    /// Query strings and fragments are ignored, matching is case-insensitive.
    /// Anything that is not `.mp4` / `.mov` is an image.
    pub fn from_url(url: &str) -> Self {
        let path = url
            .split(['?', '#'])
            .next()
            .unwrap_or(url)
            .to_ascii_lowercase();

        if VIDEO_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }

    /// Value for the `media_type` request field. Images omit the field.
    pub fn wire_media_type(&self) -> Option<&'static str> {
        match self {
            MediaKind::Image => None,
            MediaKind::Video => Some("VIDEO"),
            MediaKind::Reels => Some("REELS"),
            MediaKind::Carousel => Some("CAROUSEL"),
        }
    }

    /// Returns `true` if the provider processes this kind asynchronously.
    pub fn needs_processing(&self) -> bool {
        matches!(self, MediaKind::Video | MediaKind::Reels)
    }
}

/// Media type accepted by the single-video publish workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoMediaType {
    #[default]
    Video,
    Reels,
}

impl VideoMediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoMediaType::Video => "VIDEO",
            VideoMediaType::Reels => "REELS",
        }
    }
}

impl From<VideoMediaType> for MediaKind {
    fn from(value: VideoMediaType) -> Self {
        match value {
            VideoMediaType::Video => MediaKind::Video,
            VideoMediaType::Reels => MediaKind::Reels,
        }
    }
}
