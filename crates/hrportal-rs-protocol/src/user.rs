use crate::RecordId;
use serde::{Deserialize, Serialize};

/// Signed-in user supplied by the authentication context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: RecordId,
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Hr,
    Manager,
    Employee,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Hr => "hr",
            UserRole::Manager => "manager",
            UserRole::Employee => "employee",
        }
    }

    /// Admin and HR may post, toggle, verify, and view statistics.
    pub fn is_privileged(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Hr)
    }
}

impl User {
    pub fn is_privileged(&self) -> bool {
        self.role.is_privileged()
    }
}
