//! Onboarding notifications and analytics (`/onboarding/*`).

use crate::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OnboardingNotification {
    pub id: RecordId,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub notification_type: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Window used by `GET /onboarding/analytics?range=`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum AnalyticsRange {
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
}

impl AnalyticsRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsRange::Week => "7d",
            AnalyticsRange::Month => "30d",
            AnalyticsRange::Quarter => "90d",
        }
    }

    /// Parse a query value. Only `7d`, `30d`, and `90d` are known.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "7d" => Some(AnalyticsRange::Week),
            "30d" => Some(AnalyticsRange::Month),
            "90d" => Some(AnalyticsRange::Quarter),
            _ => None,
        }
    }
}

impl FromStr for AnalyticsRange {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value.trim())
            .ok_or_else(|| format!("unknown range `{value}` (expected 7d, 30d, or 90d)"))
    }
}

impl fmt::Display for AnalyticsRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dashboard figures for onboarding progress.
///
/// Only the headline counters are typed; chart series are kept as raw JSON
/// since the dashboard renders them without interpretation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OnboardingAnalytics {
    #[serde(default)]
    pub total_onboarding: u64,
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub in_progress: u64,
    #[serde(default)]
    pub completion_rate: f64,
    #[serde(default)]
    pub average_completion_days: Option<f64>,
    #[serde(flatten)]
    pub series: serde_json::Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::{AnalyticsRange, OnboardingAnalytics};
    use pretty_assertions::assert_eq;

    #[test]
    fn range_round_trips_through_query_strings() {
        assert_eq!(AnalyticsRange::parse("7d"), Some(AnalyticsRange::Week));
        assert_eq!(AnalyticsRange::parse("30d"), Some(AnalyticsRange::Month));
        assert_eq!(AnalyticsRange::parse("90d"), Some(AnalyticsRange::Quarter));
        assert_eq!(AnalyticsRange::Quarter.to_string(), "90d");
    }

    #[test]
    fn unknown_range_is_rejected() {
        assert_eq!(AnalyticsRange::parse("1y"), None);
        let err = "1y".parse::<AnalyticsRange>().unwrap_err();
        assert!(err.contains("1y"));
        assert_eq!(" 7d".parse::<AnalyticsRange>(), Ok(AnalyticsRange::Week));
    }

    #[test]
    fn analytics_keeps_unknown_series() {
        let analytics: OnboardingAnalytics = serde_json::from_value(serde_json::json!({
            "total_onboarding": 12,
            "completed": 4,
            "completion_rate": 33.3,
            "by_department": [{"department": "Eng", "count": 5}]
        }))
        .expect("decode");
        assert_eq!(analytics.in_progress, 0);
        assert!(analytics.series.contains_key("by_department"));
    }
}
