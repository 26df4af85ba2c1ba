//! Messenger text messages sent from a page to a list of recipients.

use meta_core::{CancellationToken, GraphClient, MetaError, Result, process_batch};
use meta_model::MessagingType;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::util::require;

#[derive(Debug, Clone, Default)]
pub struct SendText {
    pub page_id: String,
    /// Page-scoped ids (PSID) of the recipients.
    pub recipient_ids: Vec<String>,
    pub text: String,
    pub messaging_type: MessagingType,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOutput {
    pub sent_recipient_ids: Vec<String>,
    pub failed_recipient_ids: Vec<String>,
    /// `message_id` of each successful send, in recipient order.
    pub message_ids: Vec<String>,
    pub total_sent: usize,
    pub total_failed: usize,
    pub all_success: bool,
}

/// Send `text` to every recipient, one request each.
#[instrument(
    level = "debug",
    skip(client, req, cancel),
    fields(page_id = %req.page_id, recipients = req.recipient_ids.len())
)]
pub async fn send_text(
    client: &GraphClient,
    req: &SendText,
    cancel: &CancellationToken,
) -> Result<SendOutput> {
    require("pageId", &req.page_id)?;
    require("text", &req.text)?;
    if req.recipient_ids.is_empty() {
        return Err(MetaError::InvalidArgument("at least one recipient id is required".into()));
    }

    let path = format!("{}/messages", req.page_id);
    let outcome = process_batch(&req.recipient_ids, cancel, |recipient| {
        let path = &path;
        async move {
            let body = message_body(&recipient, &req.text, req.messaging_type);
            let response = client.post(path, &body).await?.ensure_success()?;
            let json = response.json()?;
            Ok(json
                .get("message_id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string())
        }
    })
    .await?;

    info!(
        sent = outcome.total_succeeded(),
        failed = outcome.total_failed(),
        "messenger batch finished"
    );

    Ok(SendOutput {
        sent_recipient_ids: outcome.succeeded_ids(),
        failed_recipient_ids: outcome.failed_ids(),
        message_ids: outcome.succeeded().into_iter().cloned().collect(),
        total_sent: outcome.total_succeeded(),
        total_failed: outcome.total_failed(),
        all_success: outcome.all_success(),
    })
}

fn message_body(recipient: &str, text: &str, messaging_type: MessagingType) -> Value {
    json!({
        "recipient": { "id": recipient },
        "messaging_type": messaging_type.as_str(),
        "message": { "text": text },
    })
}
