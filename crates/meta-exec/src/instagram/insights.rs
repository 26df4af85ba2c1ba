//! Insights of a single Instagram media object.

use meta_core::{GraphClient, Result};
use meta_model::{InsightMetric, MediaId, MediaInsight};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use crate::util::require;

#[derive(Debug, Clone)]
pub struct MediaInsightsRequest {
    pub media_id: MediaId,
    pub metrics: Vec<InsightMetric>,
}

impl Default for MediaInsightsRequest {
    fn default() -> Self {
        Self {
            media_id: MediaId::new(),
            metrics: InsightMetric::DEFAULTS.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInsightsOutput {
    pub media_id: MediaId,
    pub insights: Vec<MediaInsight>,
    pub total_insights: usize,
}

#[instrument(level = "debug", skip(client, req), fields(media_id = %req.media_id))]
pub async fn get_media_insights(
    client: &GraphClient,
    req: &MediaInsightsRequest,
) -> Result<MediaInsightsOutput> {
    require("mediaId", &req.media_id)?;

    let metrics: &[InsightMetric] = if req.metrics.is_empty() {
        &InsightMetric::DEFAULTS
    } else {
        &req.metrics
    };
    let metric = metrics.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(",");

    let insights: Vec<MediaInsight> = client
        .get(&format!("{}/insights", req.media_id), &[("metric", metric)])
        .await?
        .ensure_success()?
        .data()?
        .iter()
        .map(to_insight)
        .collect();

    info!(total = insights.len(), "media insights fetched");
    Ok(MediaInsightsOutput {
        media_id: req.media_id.clone(),
        total_insights: insights.len(),
        insights,
    })
}

fn to_insight(raw: &Value) -> MediaInsight {
    let text = |key: &str| raw.get(key).and_then(Value::as_str).map(str::to_string);
    let value = raw
        .get("values")
        .and_then(Value::as_array)
        .and_then(|values| values.first())
        .and_then(|first| first.get("value"))
        .and_then(Value::as_i64);

    MediaInsight {
        name: text("name"),
        period: text("period"),
        title: text("title"),
        description: text("description"),
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn first_value_is_used() {
        let raw = json!({
            "name": "reach",
            "period": "lifetime",
            "title": "Accounts reached",
            "values": [{"value": 42}, {"value": 7}]
        });
        assert_eq!(
            to_insight(&raw),
            MediaInsight {
                name: Some("reach".into()),
                period: Some("lifetime".into()),
                title: Some("Accounts reached".into()),
                description: None,
                value: Some(42),
            }
        );
    }

    #[test]
    fn missing_values_leave_value_empty() {
        let raw = json!({"name": "saves", "values": []});
        assert_eq!(to_insight(&raw).value, None);
    }
}
