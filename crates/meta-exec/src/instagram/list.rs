//! Listing the media of an Instagram business account.

use meta_core::{GraphClient, Result};
use meta_model::{FetchOutput, FetchType, MediaField};
use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::util::require;

pub const DEFAULT_MEDIA_LIMIT: u32 = 25;

#[derive(Debug, Clone)]
pub struct ListMedia {
    pub account_id: String,
    pub fields: Vec<MediaField>,
    pub limit: u32,
    pub fetch_type: FetchType,
}

impl Default for ListMedia {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            fields: MediaField::DEFAULTS.to_vec(),
            limit: DEFAULT_MEDIA_LIMIT,
            fetch_type: FetchType::Fetch,
        }
    }
}

/// Fetch one page of media. Rows carry the requested fields under camelCase keys.
#[instrument(level = "debug", skip(client, req), fields(account_id = %req.account_id))]
pub async fn list(client: &GraphClient, req: &ListMedia) -> Result<FetchOutput> {
    require("accountId", &req.account_id)?;

    let fields: &[MediaField] = if req.fields.is_empty() {
        &MediaField::DEFAULTS
    } else {
        &req.fields
    };
    let query = [
        ("fields", MediaField::join(fields)),
        ("limit", req.limit.to_string()),
    ];

    let rows: Vec<Value> = client
        .get(&format!("{}/media", req.account_id), &query)
        .await?
        .ensure_success()?
        .data()?
        .iter()
        .map(|row| normalize(row, fields))
        .collect();

    let out = FetchOutput::from_rows(req.fetch_type, rows);
    info!(size = out.size, "instagram media listed");
    Ok(out)
}

/// Re-key a raw media row; requested fields the provider omitted become `null`.
fn normalize(row: &Value, fields: &[MediaField]) -> Value {
    let mut out = Map::with_capacity(fields.len());
    for field in fields {
        let value = row.get(field.as_str()).cloned().unwrap_or(Value::Null);
        out.insert(field.output_key().to_string(), value);
    }
    Value::Object(out)
}
