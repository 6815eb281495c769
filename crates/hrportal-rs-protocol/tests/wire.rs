use hrportal_rs_protocol::{
    AnnouncementStats, AssistantContext, ChatRequest, DocumentStatistics, HistoryEntry,
    NewAnnouncement, User, UserRole, VerificationReceipt,
};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn chat_request_matches_backend_shape() {
    let request = ChatRequest {
        message: "What's next?".to_string(),
        context: AssistantContext::new(2, 14, "Noor"),
        history: vec![HistoryEntry {
            role: "assistant".to_string(),
            content: "Welcome!".to_string(),
        }],
    };
    assert_eq!(
        serde_json::to_value(&request).expect("encode"),
        json!({
            "message": "What's next?",
            "context": {"phase": 2, "employee_id": 14, "first_name": "Noor"},
            "history": [{"role": "assistant", "content": "Welcome!"}]
        })
    );
}

#[test]
fn new_announcement_omits_unset_optionals() {
    let body = NewAnnouncement {
        title: "Parking".to_string(),
        content: "Lot B closed".to_string(),
        category: None,
        priority: Some("high".to_string()),
        expires_at: None,
    };
    assert_eq!(
        serde_json::to_value(&body).expect("encode"),
        json!({"title": "Parking", "content": "Lot B closed", "priority": "high"})
    );
}

#[test]
fn decodes_admin_statistics() {
    let stats: AnnouncementStats = serde_json::from_value(json!({
        "total_announcements": 4,
        "active_announcements": 3,
        "total_employees": 20,
        "recent_announcement_stats": [{
            "id": 1,
            "title": "Welcome",
            "created_at": "2024-04-01T00:00:00Z",
            "acknowledgments": 15,
            "acknowledgment_rate": 75.0
        }]
    }))
    .expect("stats");
    assert_eq!(stats.recent_announcement_stats[0].acknowledgments, 15);

    let documents: DocumentStatistics = serde_json::from_value(json!({
        "total_documents": 10,
        "verified_documents": 7,
        "pending_documents": 3,
        "verification_rate": 70.0,
        "documents_by_type": {"Tax Forms": 4, "Contracts": 6}
    }))
    .expect("documents");
    assert_eq!(documents.documents_by_type.get("Contracts"), Some(&6));
}

#[test]
fn verification_receipt_embeds_document() {
    let receipt: VerificationReceipt = serde_json::from_value(json!({
        "message": "Document verified successfully",
        "document": {
            "id": 3,
            "employee_id": 9,
            "document_type": "Banking Documents",
            "document_url": "uploads/documents/9_bank.pdf",
            "is_verified": true,
            "uploaded_at": "2024-04-02T00:00:00Z",
            "verified_by": 1,
            "verified_at": "2024-04-03T00:00:00Z"
        }
    }))
    .expect("receipt");
    assert!(receipt.document.is_verified);
    assert_eq!(receipt.document.verified_by, Some(1));
}

#[test]
fn roles_are_lowercase_and_gate_privileges() {
    let user: User = serde_json::from_value(json!({
        "id": 1,
        "email": "hr@example.com",
        "role": "hr"
    }))
    .expect("user");
    assert_eq!(user.role, UserRole::Hr);
    assert!(user.is_privileged());
    assert!(!UserRole::Manager.is_privileged());
}
