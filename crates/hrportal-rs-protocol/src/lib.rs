//! Wire types for the HR portal REST resources and the onboarding assistant.
//!
//! Everything here is plain serde data. Shapes follow what the backend returns,
//! with defaults applied where the backend omits fields on older records.

mod announcement;
mod assistant;
mod career;
mod document;
mod notification;
mod user;

pub use announcement::{
    AcknowledgeReceipt, Acknowledgment, AcknowledgmentList, Announcement, AnnouncementStat,
    AnnouncementStats, NewAnnouncement, StatusToggle,
};
pub use assistant::{
    AssistantAction, AssistantContext, AssistantReply, ChatRequest, HistoryEntry,
    SuggestionsReply,
};
pub use career::{CareerAnalytics, SkillAssessment};
pub use document::{
    DOCUMENT_TYPES, DocumentDetails, DocumentStatistics, DocumentTypes, DocumentUpload,
    EmployeeDocument, OCR_ACCEPTANCE_THRESHOLD, PendingCount, VerificationReceipt,
};
pub use notification::{AnalyticsRange, OnboardingAnalytics, OnboardingNotification};
pub use user::{User, UserRole};

/// Server-assigned identifier for a stored record.
pub type RecordId = i64;

/// Generic `{ "message": ... }` acknowledgement returned by mutating endpoints.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct MessageReceipt {
    pub message: String,
}
