use serde::{Deserialize, Serialize};

use super::{ContainerId, MediaId};

/// Terminal output of a media publish workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResult {
    pub media_id: MediaId,
    /// Container that was published. For carousels this is the aggregating container.
    pub container_id: ContainerId,
    /// Child containers of a carousel, in slide order. Empty otherwise.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_container_ids: Vec<ContainerId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl PublishResult {
    pub fn new(media_id: impl Into<MediaId>, container_id: impl Into<ContainerId>) -> Self {
        Self {
            media_id: media_id.into(),
            container_id: container_id.into(),
            child_container_ids: Vec::new(),
            media_urls: Vec::new(),
            caption: None,
            media_type: None,
        }
    }

    pub fn with_children(mut self, children: Vec<ContainerId>) -> Self {
        self.child_container_ids = children;
        self
    }

    pub fn with_media_urls(mut self, urls: Vec<String>) -> Self {
        self.media_urls = urls;
        self
    }

    pub fn with_caption(mut self, caption: Option<String>) -> Self {
        self.caption = caption;
        self
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }
}
