use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How listed rows are handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FetchType {
    /// Only the first row.
    FetchOne,
    /// All rows of the page.
    #[default]
    Fetch,
    /// Count only.
    None,
}

/// Output of a list operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<Value>,
    pub size: u64,
}

impl FetchOutput {
    /// Shape one page of rows according to the fetch type.
    pub fn from_rows(fetch_type: FetchType, rows: Vec<Value>) -> Self {
        match fetch_type {
            FetchType::FetchOne => {
                let row = rows.into_iter().next();
                let size = u64::from(row.is_some());
                Self {
                    rows: None,
                    row,
                    size,
                }
            }
            FetchType::Fetch => Self {
                size: rows.len() as u64,
                rows: Some(rows),
                row: None,
            },
            FetchType::None => Self {
                size: rows.len() as u64,
                rows: None,
                row: None,
            },
        }
    }
}
