//! Page-level view models.
//!
//! Each page is a cheap-to-clone handle over its own state. Reads fetch the
//! full collection and swap it in; a failed read is logged and leaves the page
//! in [`crate::LoadState::Failed`]. Writes go to the server first and only
//! touch local state after success; a failed write raises an error toast and
//! is returned to the caller.

mod announcements;
mod career;
mod documents;
mod notifications;

pub use announcements::AnnouncementBoard;
pub use career::{CareerDashboard, SkillRow};
pub use documents::{DocumentCenter, UploadOutcome};
pub use notifications::NotificationFeed;

use crate::error::PortalError;
use crate::toast::{ToastCenter, ToastKind};
use hrportal_rs_protocol::User;
use log::warn;

/// Collaborators every page needs.
#[derive(Clone)]
pub struct PageContext {
    pub api: crate::PortalApi,
    pub toasts: ToastCenter,
    /// Signed-in user, if any.
    pub user: Option<User>,
}

impl PageContext {
    pub fn new(api: crate::PortalApi, toasts: ToastCenter, user: Option<User>) -> Self {
        Self { api, toasts, user }
    }

    fn require_user(&self) -> Result<&User, PortalError> {
        self.user.as_ref().ok_or(PortalError::Unauthenticated)
    }

    fn require_privileged(&self, action: &str) -> Result<&User, PortalError> {
        let user = self.require_user()?;
        if user.is_privileged() {
            Ok(user)
        } else {
            Err(PortalError::Forbidden(format!(
                "{action} requires the admin or hr role"
            )))
        }
    }

    /// Surface a failed write to the user and hand the error back.
    fn write_failed(&self, action: &str, err: PortalError) -> PortalError {
        warn!("write failed (action={}, error={})", action, err);
        self.toasts
            .show(format!("Failed to {action}: {}", err.user_message()), ToastKind::Error);
        err
    }
}
