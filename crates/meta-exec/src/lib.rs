//! Graph API task operations.
//!
//! Every operation takes a [`GraphClient`](meta_core::GraphClient) owned by the
//! current invocation plus a plain request struct, and returns a serialisable
//! output. Long-running operations also take a
//! [`CancellationToken`](meta_core::CancellationToken).

mod util;

#[cfg(feature = "facebook")]
pub mod facebook;

#[cfg(feature = "instagram")]
pub mod instagram;

#[cfg(feature = "messenger")]
pub mod messenger;

pub mod prelude {
    pub use meta_core::{CancellationToken, GraphClient, GraphConfig, MetaError, PollPolicy, Result};
    pub use meta_model::{FetchOutput, FetchType, PublishResult};

    #[cfg(feature = "facebook")]
    pub use crate::facebook::{
        insights::PostInsightsRequest,
        posts::{CreatePost, ListPosts, SchedulePost},
    };

    #[cfg(feature = "instagram")]
    pub use crate::instagram::{
        insights::MediaInsightsRequest,
        list::ListMedia,
        media::{CarouselPost, ImagePost, VideoPost},
    };

    #[cfg(feature = "messenger")]
    pub use crate::messenger::SendText;
}
