//! JSON fixtures shaped like backend responses.

use hrportal_rs_protocol::{User, UserRole};
use serde_json::{Value, json};

pub fn user(id: i64, role: UserRole) -> User {
    User {
        id,
        email: format!("user{id}@example.com"),
        role,
        first_name: Some("Alex".to_string()),
    }
}

/// Announcement with an optional RFC 3339 expiry.
pub fn announcement(id: i64, category: &str, expires_at: Option<&str>) -> Value {
    json!({
        "id": id,
        "title": format!("Announcement {id}"),
        "content": "Details inside",
        "category": category,
        "priority": "normal",
        "created_at": "2024-05-01T09:00:00Z",
        "expires_at": expires_at,
        "is_active": true,
        "acknowledged": false
    })
}

pub fn document(id: i64, document_type: &str, is_verified: bool, confidence: Option<f64>) -> Value {
    json!({
        "id": id,
        "employee_id": 5,
        "document_type": document_type,
        "document_url": format!("uploads/documents/5_{id}.pdf"),
        "is_verified": is_verified,
        "ocr_confidence": confidence,
        "uploaded_at": "2024-05-02T12:00:00Z"
    })
}

pub fn notification(id: i64, is_read: bool) -> Value {
    json!({
        "id": id,
        "title": format!("Reminder {id}"),
        "message": "Complete your onboarding tasks",
        "notification_type": "reminder",
        "priority": "high",
        "is_read": is_read,
        "created_at": "2024-05-03T08:30:00Z"
    })
}
