//! Employee document resources (`/documents/*`).

use crate::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Document categories accepted by `POST /documents/upload`.
pub const DOCUMENT_TYPES: &[&str] = &[
    "Identity Documents",
    "Educational Certificates",
    "Employment Documents",
    "Banking Documents",
    "Personal Documents",
    "Contracts",
    "Policies",
    "Tax Forms",
    "Benefits",
    "Training Materials",
    "General",
];

/// OCR confidence at or above which an upload is auto-verified.
pub const OCR_ACCEPTANCE_THRESHOLD: f64 = 75.0;

/// Document owned by the current employee.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmployeeDocument {
    pub id: RecordId,
    pub employee_id: RecordId,
    pub document_type: String,
    pub document_url: String,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub ocr_confidence: Option<f64>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub verified_by: Option<RecordId>,
    #[serde(default)]
    pub verified_at: Option<DateTime<Utc>>,
}

impl EmployeeDocument {
    /// True when the upload was rejected for low OCR confidence and has not
    /// been manually verified since.
    pub fn needs_resubmission(&self) -> bool {
        !self.is_verified
            && self
                .ocr_confidence
                .is_some_and(|confidence| confidence < OCR_ACCEPTANCE_THRESHOLD)
    }
}

/// Detailed shape returned by `/documents/{id}` and `/documents/all`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentDetails {
    pub document_id: RecordId,
    pub employee_name: String,
    pub employee_id: RecordId,
    pub document_type: String,
    pub document_url: String,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub ocr_confidence: Option<f64>,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub verified_by: Option<RecordId>,
    #[serde(default)]
    pub verified_at: Option<DateTime<Utc>>,
}

/// Response of `GET /documents/types`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentTypes {
    pub document_types: Vec<String>,
}

/// Multipart upload payload: fields `file`, `document_type`, `description`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub document_type: String,
    pub description: Option<String>,
}

/// Response of `PUT /documents/{id}/verify`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerificationReceipt {
    pub message: String,
    pub document: EmployeeDocument,
}

/// Response of `GET /documents/statistics`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentStatistics {
    pub total_documents: u64,
    pub verified_documents: u64,
    pub pending_documents: u64,
    pub verification_rate: f64,
    #[serde(default)]
    pub documents_by_type: std::collections::BTreeMap<String, u64>,
}

/// Response of `GET /documents/pending-verification/count`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingCount {
    pub pending_count: u64,
}

#[cfg(test)]
mod tests {
    use super::EmployeeDocument;
    use pretty_assertions::assert_eq;

    fn document(is_verified: bool, confidence: Option<f64>) -> EmployeeDocument {
        serde_json::from_value(serde_json::json!({
            "id": 3,
            "employee_id": 12,
            "document_type": "Identity Documents",
            "document_url": "uploads/documents/12_passport.pdf",
            "is_verified": is_verified,
            "ocr_confidence": confidence,
            "uploaded_at": "2024-02-01T10:00:00Z"
        }))
        .expect("decode")
    }

    #[test]
    fn low_confidence_unverified_needs_resubmission() {
        assert_eq!(document(false, Some(61.2)).needs_resubmission(), true);
        assert_eq!(document(false, Some(75.0)).needs_resubmission(), false);
        assert_eq!(document(true, Some(61.2)).needs_resubmission(), false);
        assert_eq!(document(false, None).needs_resubmission(), false);
    }
}
