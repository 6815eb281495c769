//! Render-side lookups: badge icons, tones, and progress widths.
//!
//! Backend tags are free-form strings. They are parsed into closed enums once,
//! with an explicit `Unknown`/`Other` variant, so every mapping below is total.

use hrportal_rs_protocol::{EmployeeDocument, SkillAssessment};
use serde::Serialize;

/// Colour family a badge or bar is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Danger,
    Warning,
    Info,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub icon: &'static str,
    pub tone: Tone,
}

impl Badge {
    const fn new(icon: &'static str, tone: Tone) -> Self {
        Self { icon, tone }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnouncementCategory {
    General,
    Hr,
    Policy,
    Event,
    It,
    Benefits,
    Other,
}

impl AnnouncementCategory {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
            Some("general") => Self::General,
            Some("hr") => Self::Hr,
            Some("policy") => Self::Policy,
            Some("event") | Some("events") => Self::Event,
            Some("it") => Self::It,
            Some("benefits") => Self::Benefits,
            _ => Self::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Hr => "HR",
            Self::Policy => "Policy",
            Self::Event => "Event",
            Self::It => "IT",
            Self::Benefits => "Benefits",
            Self::Other => "Other",
        }
    }

    pub fn badge(&self) -> Badge {
        match self {
            Self::General => Badge::new("megaphone", Tone::Info),
            Self::Hr => Badge::new("users", Tone::Info),
            Self::Policy => Badge::new("file-text", Tone::Warning),
            Self::Event => Badge::new("calendar", Tone::Success),
            Self::It => Badge::new("monitor", Tone::Neutral),
            Self::Benefits => Badge::new("gift", Tone::Success),
            Self::Other => Badge::new("bell", Tone::Neutral),
        }
    }
}

/// Priorities rank from `Low` to `Urgent`; unknown values sort as `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Low,
    Normal,
    High,
    Urgent,
}

impl Priority {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
            Some("low") => Self::Low,
            Some("high") => Self::High,
            Some("urgent") | Some("critical") => Self::Urgent,
            _ => Self::Normal,
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Normal => 1,
            Self::High => 2,
            Self::Urgent => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Normal => "Normal",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }

    pub fn badge(&self) -> Badge {
        match self {
            Self::Low => Badge::new("arrow-down", Tone::Neutral),
            Self::Normal => Badge::new("minus", Tone::Info),
            Self::High => Badge::new("arrow-up", Tone::Warning),
            Self::Urgent => Badge::new("alert-triangle", Tone::Danger),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
    Reminder,
    Task,
    Other,
}

impl NotificationKind {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
            Some("info") => Self::Info,
            Some("success") => Self::Success,
            Some("warning") => Self::Warning,
            Some("error") => Self::Error,
            Some("reminder") | Some("deadline") => Self::Reminder,
            Some("task") => Self::Task,
            _ => Self::Other,
        }
    }

    pub fn badge(&self) -> Badge {
        match self {
            Self::Info => Badge::new("info", Tone::Info),
            Self::Success => Badge::new("check-circle", Tone::Success),
            Self::Warning => Badge::new("alert-triangle", Tone::Warning),
            Self::Error => Badge::new("x-circle", Tone::Danger),
            Self::Reminder => Badge::new("clock", Tone::Warning),
            Self::Task => Badge::new("check-square", Tone::Info),
            Self::Other => Badge::new("bell", Tone::Neutral),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentStatus {
    Verified,
    PendingReview,
    /// Rejected for low OCR confidence; the employee should upload again.
    Rejected,
}

impl DocumentStatus {
    pub fn of(document: &EmployeeDocument) -> Self {
        if document.is_verified {
            Self::Verified
        } else if document.needs_resubmission() {
            Self::Rejected
        } else {
            Self::PendingReview
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Verified => "Verified",
            Self::PendingReview => "Pending review",
            Self::Rejected => "Needs resubmission",
        }
    }

    pub fn badge(&self) -> Badge {
        match self {
            Self::Verified => Badge::new("check-circle", Tone::Success),
            Self::PendingReview => Badge::new("clock", Tone::Warning),
            Self::Rejected => Badge::new("x-circle", Tone::Danger),
        }
    }
}

/// Percentage to bar width, clamped to `0..=100`. NaN renders as empty.
pub fn progress_width(percent: f64) -> u8 {
    if percent.is_nan() {
        return 0;
    }
    percent.clamp(0.0, 100.0).round() as u8
}

/// Tone for a skill row: on target, close (gap of 10 points or less), or behind.
pub fn skill_gap_tone(skill: &SkillAssessment) -> Tone {
    match skill.gap() {
        gap if gap <= 0.0 => Tone::Success,
        gap if gap <= 10.0 => Tone::Warning,
        _ => Tone::Danger,
    }
}

/// Tone for a completion or acknowledgement rate in percent.
pub fn rate_tone(percent: f64) -> Tone {
    match progress_width(percent) {
        80..=100 => Tone::Success,
        50..=79 => Tone::Warning,
        _ => Tone::Danger,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unknown_tags_map_to_explicit_defaults() {
        assert_eq!(AnnouncementCategory::parse(Some("cafeteria")), AnnouncementCategory::Other);
        assert_eq!(AnnouncementCategory::parse(None).badge().tone, Tone::Neutral);
        assert_eq!(Priority::parse(Some("whenever")), Priority::Normal);
        assert_eq!(NotificationKind::parse(None), NotificationKind::Other);
    }

    #[test]
    fn tags_are_case_insensitive() {
        assert_eq!(AnnouncementCategory::parse(Some(" HR ")), AnnouncementCategory::Hr);
        assert_eq!(Priority::parse(Some("URGENT")).badge().tone, Tone::Danger);
    }

    #[test]
    fn priority_rank_orders_urgency() {
        let mut priorities = vec![
            Priority::High,
            Priority::Low,
            Priority::Urgent,
            Priority::Normal,
        ];
        priorities.sort_by_key(|priority| std::cmp::Reverse(priority.rank()));
        assert_eq!(
            priorities,
            vec![Priority::Urgent, Priority::High, Priority::Normal, Priority::Low]
        );
    }

    #[test]
    fn progress_width_is_clamped() {
        assert_eq!(progress_width(-5.0), 0);
        assert_eq!(progress_width(42.4), 42);
        assert_eq!(progress_width(150.0), 100);
        assert_eq!(progress_width(f64::NAN), 0);
    }

    #[test]
    fn skill_tone_follows_gap() {
        let skill = |current: f64| SkillAssessment {
            name: "SQL".to_string(),
            current,
            target: 80.0,
            category: None,
        };
        assert_eq!(skill_gap_tone(&skill(85.0)), Tone::Success);
        assert_eq!(skill_gap_tone(&skill(72.0)), Tone::Warning);
        assert_eq!(skill_gap_tone(&skill(40.0)), Tone::Danger);
    }

    #[test]
    fn document_status_reflects_ocr_outcome() {
        let mut document: EmployeeDocument = serde_json::from_value(serde_json::json!({
            "id": 1,
            "employee_id": 2,
            "document_type": "Tax Forms",
            "document_url": "uploads/w4.pdf",
            "is_verified": false,
            "ocr_confidence": 40.0,
            "uploaded_at": "2024-03-01T00:00:00Z"
        }))
        .expect("document");
        assert_eq!(DocumentStatus::of(&document), DocumentStatus::Rejected);
        document.ocr_confidence = None;
        assert_eq!(DocumentStatus::of(&document), DocumentStatus::PendingReview);
        document.is_verified = true;
        assert_eq!(DocumentStatus::of(&document).badge().tone, Tone::Success);
        assert_eq!(rate_tone(91.0), Tone::Success);
    }
}
