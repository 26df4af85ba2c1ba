use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Preset date range understood by the insights endpoint (`date_preset`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DatePreset {
    #[default]
    Today,
    Yesterday,
    ThisMonth,
    LastMonth,
    ThisQuarter,
    Maximum,
    DataMaximum,
    #[serde(rename = "LAST_3D")]
    Last3d,
    #[serde(rename = "LAST_7D")]
    Last7d,
    #[serde(rename = "LAST_14D")]
    Last14d,
    #[serde(rename = "LAST_28D")]
    Last28d,
    #[serde(rename = "LAST_30D")]
    Last30d,
    #[serde(rename = "LAST_90D")]
    Last90d,
    LastWeekMonSun,
    LastWeekSunSat,
    LastQuarter,
    LastYear,
    ThisWeekMonToday,
    ThisWeekSunToday,
    ThisYear,
}

impl DatePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatePreset::Today => "today",
            DatePreset::Yesterday => "yesterday",
            DatePreset::ThisMonth => "this_month",
            DatePreset::LastMonth => "last_month",
            DatePreset::ThisQuarter => "this_quarter",
            DatePreset::Maximum => "maximum",
            DatePreset::DataMaximum => "data_maximum",
            DatePreset::Last3d => "last_3d",
            DatePreset::Last7d => "last_7d",
            DatePreset::Last14d => "last_14d",
            DatePreset::Last28d => "last_28d",
            DatePreset::Last30d => "last_30d",
            DatePreset::Last90d => "last_90d",
            DatePreset::LastWeekMonSun => "last_week_mon_sun",
            DatePreset::LastWeekSunSat => "last_week_sun_sat",
            DatePreset::LastQuarter => "last_quarter",
            DatePreset::LastYear => "last_year",
            DatePreset::ThisWeekMonToday => "this_week_mon_today",
            DatePreset::ThisWeekSunToday => "this_week_sun_today",
            DatePreset::ThisYear => "this_year",
        }
    }
}

/// Aggregation period of an insights request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsightPeriod {
    Day,
    Week,
    #[serde(rename = "DAYS_28")]
    Days28,
    Month,
    #[default]
    Lifetime,
    TotalOverRange,
}

impl InsightPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightPeriod::Day => "day",
            InsightPeriod::Week => "week",
            InsightPeriod::Days28 => "days_28",
            InsightPeriod::Month => "month",
            InsightPeriod::Lifetime => "lifetime",
            InsightPeriod::TotalOverRange => "total_over_range",
        }
    }
}

/// Time window of an insights request.
///
/// An explicit range wins over a preset, so the two are mutually exclusive here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsightWindow {
    Preset(DatePreset),
    Range { since: String, until: String },
}

impl InsightWindow {
    /// Query parameters describing this window.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            InsightWindow::Preset(preset) => vec![("date_preset", preset.as_str().to_string())],
            InsightWindow::Range { since, until } => {
                vec![("since", since.clone()), ("until", until.clone())]
            }
        }
    }
}

impl Default for InsightWindow {
    fn default() -> Self {
        InsightWindow::Preset(DatePreset::default())
    }
}

/// Instagram media insight metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsightMetric {
    Impressions,
    Reach,
    Likes,
    Comments,
    Saves,
    Shares,
    TotalInteractions,
    Views,
    Follows,
    ProfileVisits,
}

impl InsightMetric {
    pub const DEFAULTS: [InsightMetric; 4] = [
        InsightMetric::Likes,
        InsightMetric::Comments,
        InsightMetric::Saves,
        InsightMetric::Reach,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InsightMetric::Impressions => "impressions",
            InsightMetric::Reach => "reach",
            InsightMetric::Likes => "likes",
            InsightMetric::Comments => "comments",
            InsightMetric::Saves => "saves",
            InsightMetric::Shares => "shares",
            InsightMetric::TotalInteractions => "total_interactions",
            InsightMetric::Views => "views",
            InsightMetric::Follows => "follows",
            InsightMetric::ProfileVisits => "profile_visits",
        }
    }
}

/// One metric of an Instagram media object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInsight {
    pub name: Option<String>,
    pub period: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// First entry of `values`, when it is an integer.
    pub value: Option<i64>,
}

/// Insights of a single Facebook post.
///
/// A failed lookup still yields an entry: `total_insights == 0` and `error` set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostInsights {
    pub post_id: String,
    pub total_insights: usize,
    pub insights: Vec<Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub insights_summary: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PostInsights {
    /// Placeholder entry for a post whose insights could not be fetched.
    pub fn failed(post_id: impl Into<String>, reason: impl AsRef<str>) -> Self {
        Self {
            post_id: post_id.into(),
            total_insights: 0,
            insights: Vec::new(),
            insights_summary: Map::new(),
            period: None,
            error: Some(format!("Failed: {}", reason.as_ref())),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_wire_values() {
        assert_eq!(DatePreset::Today.as_str(), "today");
        assert_eq!(DatePreset::Last28d.as_str(), "last_28d");
        assert_eq!(DatePreset::ThisWeekSunToday.as_str(), "this_week_sun_today");

        let back: DatePreset = serde_json::from_str(r#""LAST_7D""#).unwrap();
        assert_eq!(back, DatePreset::Last7d);
    }

    #[test]
    fn window_query_pairs() {
        assert_eq!(
            InsightWindow::default().query_pairs(),
            vec![("date_preset", "today".to_string())]
        );

        let range = InsightWindow::Range {
            since: "2025-01-01".into(),
            until: "2025-01-31".into(),
        };
        assert_eq!(
            range.query_pairs(),
            vec![
                ("since", "2025-01-01".to_string()),
                ("until", "2025-01-31".to_string())
            ]
        );
    }

    #[test]
    fn failed_placeholder() {
        let entry = PostInsights::failed("1_2", "remote api returned 500");
        assert!(entry.is_failed());
        assert_eq!(entry.total_insights, 0);
        assert!(entry.insights.is_empty());
        assert_eq!(entry.error.as_deref(), Some("Failed: remote api returned 500"));
    }

    #[test]
    fn post_insights_serializes_camel_case() {
        let entry = PostInsights {
            post_id: "1_2".into(),
            total_insights: 1,
            ..Default::default()
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["postId"], "1_2");
        assert_eq!(json["totalInsights"], 1);
        assert!(json.get("error").is_none());
    }
}
