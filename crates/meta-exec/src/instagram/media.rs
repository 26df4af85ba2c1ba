//! Instagram media publishing.
//!
//! Every post is published in two steps: create a media container, then
//! publish it with `media_publish`. Video containers are processed
//! asynchronously by the provider and must reach `FINISHED` first.

use meta_core::{CancellationToken, GraphClient, MetaError, PollPolicy, Result, await_ready};
use meta_model::{ContainerId, MediaId, MediaKind, PublishResult, VideoMediaType};
use serde_json::{Map, Value, json};
use tracing::{debug, info, instrument};

use crate::util::require;

pub const MIN_CAROUSEL_ITEMS: usize = 2;
pub const MAX_CAROUSEL_ITEMS: usize = 10;

/// Body of a container-create request.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerRequest {
    pub kind: MediaKind,
    /// `image_url` or `video_url` depending on `kind`. Unused for carousels.
    pub media_url: Option<String>,
    /// Child container ids of a carousel, in slide order.
    pub children: Vec<ContainerId>,
    pub caption: Option<String>,
    pub carousel_item: bool,
}

impl ContainerRequest {
    pub fn image(url: impl Into<String>) -> Self {
        Self::single(MediaKind::Image, url.into())
    }

    pub fn video(url: impl Into<String>, media_type: VideoMediaType) -> Self {
        Self::single(media_type.into(), url.into())
    }

    /// Carousel slide; the kind is inferred from the URL extension.
    pub fn carousel_item(url: impl Into<String>) -> Self {
        let url = url.into();
        let mut req = Self::single(MediaKind::from_url(&url), url);
        req.carousel_item = true;
        req
    }

    pub fn carousel(children: Vec<ContainerId>) -> Self {
        Self {
            kind: MediaKind::Carousel,
            media_url: None,
            children,
            caption: None,
            carousel_item: false,
        }
    }

    pub fn with_caption(mut self, caption: Option<String>) -> Self {
        self.caption = caption;
        self
    }

    fn single(kind: MediaKind, url: String) -> Self {
        Self {
            kind,
            media_url: Some(url),
            children: Vec::new(),
            caption: None,
            carousel_item: false,
        }
    }

    pub fn body(&self) -> Value {
        let mut body = Map::new();

        if let Some(url) = &self.media_url {
            let key = match self.kind {
                MediaKind::Image => "image_url",
                _ => "video_url",
            };
            body.insert(key.into(), json!(url));
        }
        if let Some(media_type) = self.kind.wire_media_type() {
            body.insert("media_type".into(), json!(media_type));
        }
        if !self.children.is_empty() {
            body.insert("children".into(), json!(self.children.join(",")));
        }
        if self.carousel_item {
            body.insert("is_carousel_item".into(), json!(true));
        }
        if let Some(caption) = &self.caption {
            body.insert("caption".into(), json!(caption));
        }

        Value::Object(body)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImagePost {
    pub account_id: String,
    pub image_url: String,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct VideoPost {
    pub account_id: String,
    pub video_url: String,
    pub media_type: VideoMediaType,
    pub caption: Option<String>,
    pub poll: PollPolicy,
}

#[derive(Debug, Clone, Default)]
pub struct CarouselPost {
    pub account_id: String,
    /// Between 2 and 10 image or video URLs, in slide order.
    pub media_urls: Vec<String>,
    pub caption: Option<String>,
    /// Applied to each video slide.
    pub poll: PollPolicy,
}

/// `POST {account}/media`, returning the new container id.
#[instrument(level = "debug", skip(client, req), fields(kind = ?req.kind))]
pub async fn create_container(
    client: &GraphClient,
    account_id: &str,
    req: &ContainerRequest,
) -> Result<ContainerId> {
    let id = client
        .post_for_id(&format!("{account_id}/media"), &req.body())
        .await?;
    debug!(container_id = %id, "media container created");
    Ok(id)
}

/// `POST {account}/media_publish` for a ready container.
#[instrument(level = "debug", skip(client))]
pub async fn publish(
    client: &GraphClient,
    account_id: &str,
    container_id: &str,
) -> Result<MediaId> {
    let body = json!({ "creation_id": container_id });
    let media_id = client
        .post_for_id(&format!("{account_id}/media_publish"), &body)
        .await?;
    info!(media_id = %media_id, container_id, "media published");
    Ok(media_id)
}

/// Publish a single image. Images need no processing wait.
pub async fn create_image(client: &GraphClient, req: &ImagePost) -> Result<PublishResult> {
    require("accountId", &req.account_id)?;
    require("imageUrl", &req.image_url)?;

    let container = ContainerRequest::image(&req.image_url).with_caption(req.caption.clone());
    let container_id = create_container(client, &req.account_id, &container).await?;
    let media_id = publish(client, &req.account_id, &container_id).await?;

    Ok(PublishResult::new(media_id, container_id)
        .with_media_urls(vec![req.image_url.clone()])
        .with_caption(req.caption.clone())
        .with_media_type("IMAGE"))
}

/// Create a video or reel container, wait for processing, then publish it.
pub async fn create_video(
    client: &GraphClient,
    req: &VideoPost,
    cancel: &CancellationToken,
) -> Result<PublishResult> {
    require("accountId", &req.account_id)?;
    require("videoUrl", &req.video_url)?;
    req.poll.validate()?;

    let container =
        ContainerRequest::video(&req.video_url, req.media_type).with_caption(req.caption.clone());
    let container_id = create_container(client, &req.account_id, &container).await?;

    await_ready(client, &container_id, &req.poll, cancel).await?;
    ensure_not_cancelled(cancel)?;

    let media_id = publish(client, &req.account_id, &container_id).await?;

    Ok(PublishResult::new(media_id, container_id)
        .with_media_urls(vec![req.video_url.clone()])
        .with_caption(req.caption.clone())
        .with_media_type(req.media_type.as_str()))
}

/// Create one child container per URL, aggregate them into a carousel and publish it.
///
/// Children are created strictly in input order and video slides are awaited
/// before the carousel container is created.
pub async fn create_carousel(
    client: &GraphClient,
    req: &CarouselPost,
    cancel: &CancellationToken,
) -> Result<PublishResult> {
    require("accountId", &req.account_id)?;
    let count = req.media_urls.len();
    if !(MIN_CAROUSEL_ITEMS..=MAX_CAROUSEL_ITEMS).contains(&count) {
        return Err(MetaError::InvalidArgument(format!(
            "carousel needs {MIN_CAROUSEL_ITEMS} to {MAX_CAROUSEL_ITEMS} media urls, got {count}"
        )));
    }
    req.poll.validate()?;

    let mut children = Vec::with_capacity(count);
    for url in &req.media_urls {
        ensure_not_cancelled(cancel)?;

        let child = ContainerRequest::carousel_item(url);
        let child_id = create_container(client, &req.account_id, &child).await?;
        if child.kind.needs_processing() {
            await_ready(client, &child_id, &req.poll, cancel).await?;
        }
        children.push(child_id);
    }
    ensure_not_cancelled(cancel)?;

    let carousel = ContainerRequest::carousel(children.clone()).with_caption(req.caption.clone());
    let container_id = create_container(client, &req.account_id, &carousel).await?;
    let media_id = publish(client, &req.account_id, &container_id).await?;

    info!(media_id = %media_id, slides = count, "carousel published");
    Ok(PublishResult::new(media_id, container_id)
        .with_children(children)
        .with_media_urls(req.media_urls.clone())
        .with_caption(req.caption.clone())
        .with_media_type("CAROUSEL"))
}

fn ensure_not_cancelled(cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        return Err(MetaError::Cancelled);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn video_body() {
        let body = ContainerRequest::video("https://cdn.x/v.mp4", VideoMediaType::Reels)
            .with_caption(Some("hi".into()))
            .body();
        assert_eq!(
            body,
            json!({"video_url": "https://cdn.x/v.mp4", "media_type": "REELS", "caption": "hi"})
        );
    }

    #[test]
    fn carousel_item_bodies() {
        assert_eq!(
            ContainerRequest::carousel_item("https://cdn.x/a.JPG").body(),
            json!({"image_url": "https://cdn.x/a.JPG", "is_carousel_item": true})
        );
        assert_eq!(
            ContainerRequest::carousel_item("https://cdn.x/b.MOV?sig=1").body(),
            json!({
                "video_url": "https://cdn.x/b.MOV?sig=1",
                "media_type": "VIDEO",
                "is_carousel_item": true
            })
        );
    }

    #[test]
    fn carousel_body_joins_children_in_order() {
        let body = ContainerRequest::carousel(vec!["c1".into(), "c2".into(), "c3".into()])
            .with_caption(None)
            .body();
        assert_eq!(body, json!({"media_type": "CAROUSEL", "children": "c1,c2,c3"}));
    }

    #[test]
    fn image_body_omits_media_type() {
        assert_eq!(
            ContainerRequest::image("https://cdn.x/p.png").body(),
            json!({"image_url": "https://cdn.x/p.png"})
        );
    }
}
