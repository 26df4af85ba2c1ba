//! Page feed operations: create, schedule, list and delete posts.

use meta_core::{CancellationToken, GraphClient, MetaError, Result, process_batch};
use meta_model::{FetchOutput, FetchType, PostId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::{info, instrument, warn};

use crate::util::require;

/// Page size used when the caller does not set one.
pub const DEFAULT_LIST_LIMIT: u32 = 100;

#[derive(Debug, Clone, Default)]
pub struct CreatePost {
    pub page_id: String,
    pub message: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SchedulePost {
    pub page_id: String,
    pub message: String,
    pub link: Option<String>,
    /// Unix timestamp in seconds or an RFC 3339 date-time. Sent as given.
    pub scheduled_publish_time: String,
}

#[derive(Debug, Clone)]
pub struct ListPosts {
    pub page_id: String,
    /// Comma-separated Graph fields; provider defaults when `None`.
    pub fields: Option<String>,
    pub limit: u32,
    pub fetch_type: FetchType,
}

impl Default for ListPosts {
    fn default() -> Self {
        Self {
            page_id: String::new(),
            fields: None,
            limit: DEFAULT_LIST_LIMIT,
            fetch_type: FetchType::Fetch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostOutput {
    /// Post id as returned by the provider, usually `<pageId>_<postId>`.
    pub post_id: PostId,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutput {
    pub deleted_post_ids: Vec<PostId>,
    pub failed_post_ids: Vec<PostId>,
    pub total_deleted: usize,
    pub total_failed: usize,
    pub all_success: bool,
}

#[instrument(level = "debug", skip(client, req), fields(page_id = %req.page_id))]
pub async fn create(client: &GraphClient, req: &CreatePost) -> Result<CreatePostOutput> {
    require("pageId", &req.page_id)?;
    require("message", &req.message)?;

    let body = feed_body(&req.message, req.link.as_deref(), true, None);
    let post_id = client.post_for_id(&format!("{}/feed", req.page_id), &body).await?;

    info!(post_id = %post_id, "facebook post created");
    Ok(CreatePostOutput { post_id })
}

#[instrument(level = "debug", skip(client, req), fields(page_id = %req.page_id))]
pub async fn schedule(client: &GraphClient, req: &SchedulePost) -> Result<CreatePostOutput> {
    require("pageId", &req.page_id)?;
    require("message", &req.message)?;
    validate_publish_time(&req.scheduled_publish_time)?;

    let body = feed_body(
        &req.message,
        req.link.as_deref(),
        false,
        Some(&req.scheduled_publish_time),
    );
    let post_id = client.post_for_id(&format!("{}/feed", req.page_id), &body).await?;

    info!(post_id = %post_id, at = %req.scheduled_publish_time, "facebook post scheduled");
    Ok(CreatePostOutput { post_id })
}

/// Fetch one page of the page feed.
#[instrument(level = "debug", skip(client, req), fields(page_id = %req.page_id))]
pub async fn list(client: &GraphClient, req: &ListPosts) -> Result<FetchOutput> {
    require("pageId", &req.page_id)?;

    let mut query = Vec::with_capacity(2);
    if let Some(fields) = req.fields.as_deref().filter(|f| !f.is_empty()) {
        query.push(("fields", fields.to_string()));
    }
    query.push(("limit", req.limit.to_string()));

    let rows = client
        .get(&format!("{}/feed", req.page_id), &query)
        .await?
        .ensure_success()?
        .data()?;

    let out = FetchOutput::from_rows(req.fetch_type, rows);
    info!(size = out.size, "facebook posts listed");
    Ok(out)
}

/// Delete every post in `post_ids`, one request each.
///
/// A post counts as deleted only when the provider answers `{"success": true}`.
pub async fn delete(
    client: &GraphClient,
    post_ids: &[PostId],
    cancel: &CancellationToken,
) -> Result<DeleteOutput> {
    let outcome = process_batch(post_ids, cancel, |post_id| async move {
        let response = client.delete(&post_id).await?.ensure_success()?;
        let confirmed = response
            .json()?
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        if confirmed {
            Ok(())
        } else {
            warn!(post_id = %post_id, "provider did not confirm deletion");
            Err(MetaError::RemoteApi {
                status: response.status,
                body: response.body,
            })
        }
    })
    .await?;

    Ok(DeleteOutput {
        deleted_post_ids: outcome.succeeded_ids(),
        failed_post_ids: outcome.failed_ids(),
        total_deleted: outcome.total_succeeded(),
        total_failed: outcome.total_failed(),
        all_success: outcome.all_success(),
    })
}

fn feed_body(message: &str, link: Option<&str>, published: bool, at: Option<&str>) -> Value {
    let mut body = Map::new();
    body.insert("message".into(), json!(message));
    if let Some(link) = link {
        body.insert("link".into(), json!(link));
    }
    body.insert("published".into(), json!(published));
    if let Some(at) = at {
        body.insert("scheduled_publish_time".into(), json!(at));
    }
    Value::Object(body)
}

/// Accept a Unix timestamp (seconds) or an RFC 3339 date-time.
fn validate_publish_time(raw: &str) -> Result<()> {
    let raw = raw.trim();
    let is_unix = !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit());
    if is_unix || OffsetDateTime::parse(raw, &Rfc3339).is_ok() {
        return Ok(());
    }
    Err(MetaError::InvalidArgument(format!(
        "scheduledPublishTime must be a unix timestamp or RFC 3339 date-time, got: {raw:?}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn publish_time_formats() {
        assert!(validate_publish_time("1767225600").is_ok());
        assert!(validate_publish_time("2026-01-01T00:00:00Z").is_ok());
        assert!(validate_publish_time("2026-01-01T09:30:00+02:00").is_ok());

        assert!(validate_publish_time("").is_err());
        assert!(validate_publish_time("tomorrow").is_err());
        assert!(validate_publish_time("2026-01-01").is_err());
        assert!(validate_publish_time("-5").is_err());
    }

    #[test]
    fn feed_body_shape() {
        assert_eq!(
            feed_body("hi", None, true, None),
            json!({"message": "hi", "published": true})
        );
        assert_eq!(
            feed_body("hi", Some("https://x.io"), false, Some("1767225600")),
            json!({
                "message": "hi",
                "link": "https://x.io",
                "published": false,
                "scheduled_publish_time": "1767225600"
            })
        );
    }

    #[test]
    fn delete_output_is_camel_case() {
        let out = DeleteOutput {
            deleted_post_ids: vec!["A".into()],
            failed_post_ids: vec![],
            total_deleted: 1,
            total_failed: 0,
            all_success: true,
        };
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!({
                "deletedPostIds": ["A"],
                "failedPostIds": [],
                "totalDeleted": 1,
                "totalFailed": 0,
                "allSuccess": true
            })
        );
    }
}
