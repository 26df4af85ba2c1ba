mod batch;
pub use batch::{BatchOutcome, ItemOutcome};

mod container;
pub use container::ContainerStatus;

mod media;
pub use media::{MediaKind, VideoMediaType};

mod media_field;
pub use media_field::MediaField;

mod fetch;
pub use fetch::{FetchOutput, FetchType};

mod insight;
pub use insight::{
    DatePreset, InsightMetric, InsightPeriod, InsightWindow, MediaInsight, PostInsights,
};

mod messaging;
pub use messaging::MessagingType;

mod publish;
pub use publish::PublishResult;

/// Provider-side identifier of a media container.
pub type ContainerId = String;

/// Identifier of a published Instagram media object.
pub type MediaId = String;

/// Facebook post identifier, usually `<pageId>_<postId>`.
pub type PostId = String;

/// Duration value in milliseconds.
///
/// Used by poll policies and HTTP timeouts.
pub type DurationMs = u64;
