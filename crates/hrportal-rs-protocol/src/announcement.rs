//! Announcement board resources (`/announcements/*`).

use crate::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Announcement as returned by `/announcements/with-status`.
///
/// The plain `/announcements/` listing omits the acknowledgement fields, so
/// they default to "not acknowledged".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Announcement {
    pub id: RecordId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub posted_by: Option<RecordId>,
    #[serde(default)]
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(default)]
    pub acknowledged_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl Announcement {
    /// True when the announcement carries an expiry strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at < now)
    }
}

/// Body for `POST /announcements/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewAnnouncement {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Response of `POST /announcements/{id}/acknowledge`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AcknowledgeReceipt {
    pub message: String,
    #[serde(default)]
    pub acknowledged_at: Option<DateTime<Utc>>,
}

/// Response of `PUT /announcements/{id}/toggle-status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusToggle {
    pub message: String,
    pub is_active: bool,
}

/// Response of `GET /announcements/stats`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnouncementStats {
    pub total_announcements: u64,
    pub active_announcements: u64,
    pub total_employees: u64,
    #[serde(default)]
    pub recent_announcement_stats: Vec<AnnouncementStat>,
}

/// Per-announcement acknowledgement rate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnouncementStat {
    pub id: RecordId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub acknowledgments: u64,
    pub acknowledgment_rate: f64,
}

/// Response of `GET /announcements/{id}/acknowledgments`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AcknowledgmentList {
    pub announcement_id: RecordId,
    pub announcement_title: String,
    pub total_acknowledgments: u64,
    #[serde(default)]
    pub acknowledgments: Vec<Acknowledgment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Acknowledgment {
    pub employee_id: RecordId,
    pub employee_name: String,
    pub acknowledged_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::Announcement;
    use chrono::{Duration, Utc};
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_listing_defaults_acknowledgement_fields() {
        let json = r#"{
            "id": 7,
            "title": "Welcome",
            "content": "Update your profile",
            "created_at": "2024-01-10T09:00:00Z"
        }"#;
        let announcement: Announcement = serde_json::from_str(json).expect("decode");
        assert_eq!(announcement.is_active, true);
        assert_eq!(announcement.acknowledged, false);
        assert_eq!(announcement.expires_at, None);
    }

    #[test]
    fn expiry_is_strict() {
        let now = Utc::now();
        let mut announcement: Announcement = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "t",
            "content": "c",
            "created_at": now,
        }))
        .expect("decode");
        assert!(!announcement.is_expired_at(now));

        announcement.expires_at = Some(now);
        assert!(!announcement.is_expired_at(now));

        announcement.expires_at = Some(now - Duration::seconds(1));
        assert!(announcement.is_expired_at(now));
    }
}
