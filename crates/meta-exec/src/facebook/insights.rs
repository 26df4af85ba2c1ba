//! Post insights for a batch of Facebook posts.

use meta_core::{CancellationToken, GraphClient, GraphResponse, Result, process_batch};
use meta_model::{InsightPeriod, InsightWindow, ItemOutcome, PostId, PostInsights};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

/// Metrics requested when the caller does not pick any.
pub const DEFAULT_POST_METRICS: [&str; 6] = [
    "post_reactions_like_total",
    "post_reactions_love_total",
    "post_reactions_wow_total",
    "post_reactions_haha_total",
    "post_reactions_sorry_total",
    "post_reactions_anger_total",
];

#[derive(Debug, Clone)]
pub struct PostInsightsRequest {
    pub post_ids: Vec<PostId>,
    pub metrics: Vec<String>,
    pub period: InsightPeriod,
    pub window: InsightWindow,
}

impl Default for PostInsightsRequest {
    fn default() -> Self {
        Self {
            post_ids: Vec::new(),
            metrics: DEFAULT_POST_METRICS.iter().map(|m| m.to_string()).collect(),
            period: InsightPeriod::Lifetime,
            window: InsightWindow::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostInsightsOutput {
    /// One entry per requested post, in request order. Failed lookups are placeholders.
    pub posts: Vec<PostInsights>,
    pub total_posts: usize,
    /// Sum of `total_insights` over all entries.
    pub total_insights: usize,
}

/// Fetch insights for every post in the request.
///
/// A post that cannot be fetched does not fail the call; it shows up with
/// `error = "Failed: <reason>"` and no insights.
pub async fn get_post_insights(
    client: &GraphClient,
    req: &PostInsightsRequest,
    cancel: &CancellationToken,
) -> Result<PostInsightsOutput> {
    let mut query = vec![
        ("period", req.period.as_str().to_string()),
        ("metric", req.metrics.join(",")),
    ];
    query.extend(req.window.query_pairs());

    let outcome = process_batch(&req.post_ids, cancel, |post_id| {
        let query = &query;
        async move {
            let response = client
                .get(&format!("{post_id}/insights"), query)
                .await?
                .ensure_success()?;
            parse_post_insights(&post_id, &response, req.period)
        }
    })
    .await?;

    let posts: Vec<PostInsights> = outcome
        .into_items()
        .into_iter()
        .map(|(post_id, item)| match item {
            ItemOutcome::Succeeded(insights) => insights,
            ItemOutcome::Failed { reason } => PostInsights::failed(post_id, reason),
        })
        .collect();

    let total_insights = posts.iter().map(|p| p.total_insights).sum();
    let failed = posts.iter().filter(|p| p.is_failed()).count();
    info!(posts = posts.len(), failed, total_insights, "post insights collected");

    Ok(PostInsightsOutput {
        total_posts: posts.len(),
        total_insights,
        posts,
    })
}

fn parse_post_insights(
    post_id: &str,
    response: &GraphResponse,
    period: InsightPeriod,
) -> Result<PostInsights> {
    let insights = response.data()?;

    let mut summary = Map::new();
    for insight in &insights {
        if let (Some(name), Some(values)) = (insight.get("name"), insight.get("values")) {
            let key = match name {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            summary.insert(key, values.clone());
        }
    }

    Ok(PostInsights {
        post_id: post_id.to_string(),
        total_insights: insights.len(),
        insights,
        insights_summary: summary,
        period: Some(period.as_str().to_string()),
        error: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn summary_maps_names_to_values() {
        let body = json!({
            "data": [
                {
                    "name": "post_reactions_like_total",
                    "period": "lifetime",
                    "values": [{"value": 4}]
                },
                {
                    "name": "post_reactions_love_total",
                    "period": "lifetime",
                    "values": [{"value": 1}]
                },
                {"period": "lifetime"}
            ]
        });
        let response = GraphResponse::new(200, body.to_string());

        let parsed = parse_post_insights("1_2", &response, InsightPeriod::Lifetime).unwrap();
        assert_eq!(parsed.total_insights, 3);
        assert_eq!(parsed.period.as_deref(), Some("lifetime"));
        assert_eq!(parsed.insights_summary.len(), 2);
        assert_eq!(
            parsed.insights_summary["post_reactions_like_total"],
            json!([{"value": 4}])
        );
        assert!(!parsed.is_failed());
    }

    #[test]
    fn defaults() {
        let req = PostInsightsRequest::default();
        assert_eq!(req.metrics.len(), 6);
        assert_eq!(req.period, InsightPeriod::Lifetime);
        assert_eq!(req.window, InsightWindow::default());
    }
}
