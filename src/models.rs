use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of the catalog: an exercise type and its variants in rotation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDefinition {
    #[serde(rename = "type")]
    pub activity_type: String,
    pub ids: Vec<u32>,
}

impl ActivityDefinition {
    pub fn new(activity_type: impl Into<String>, ids: Vec<u32>) -> Self {
        Self {
            activity_type: activity_type.into(),
            ids,
        }
    }
}

/// A completion record in the history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishedActivity {
    pub date: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub id: u32,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canceled: Option<bool>,
}

impl FinishedActivity {
    pub fn is_canceled(&self) -> bool {
        self.canceled.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySuggestion {
    #[serde(rename = "type")]
    pub activity_type: String,
    pub id: u32,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExercisesStatistics {
    pub total: u64,
    #[serde(rename = "byType")]
    pub by_type: BTreeMap<String, u64>,
}

impl ExercisesStatistics {
    pub fn record(&mut self, activity_type: &str) {
        self.total = self.total.saturating_add(1);
        *self.by_type.entry(activity_type.to_string()).or_default() += 1;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentStatistics {
    pub week: ExercisesStatistics,
    pub month: ExercisesStatistics,
    pub year: ExercisesStatistics,
    pub streak: u32,
}

/// Every entry bucketed by `YYYY-MM-DD`, `YYYY-MM` and `YYYY`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullStatistics {
    pub weekly: BTreeMap<String, ExercisesStatistics>,
    pub monthly: BTreeMap<String, ExercisesStatistics>,
    pub yearly: BTreeMap<String, ExercisesStatistics>,
}

#[derive(Debug, Deserialize)]
pub struct MarkDoneRequest {
    #[serde(rename = "type")]
    pub activity_type: String,
    pub id: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Envelope wrapping every HTTP response body.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}
