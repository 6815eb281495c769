use super::PageContext;
use crate::collection::{LoadState, RemoteCollection};
use crate::error::PortalError;
use crate::filter::NotificationFilter;
use hrportal_rs_protocol::{OnboardingNotification, RecordId};
use log::warn;
use parking_lot::Mutex;
use std::sync::Arc;

/// Onboarding notifications for the signed-in employee.
#[derive(Clone)]
pub struct NotificationFeed {
    ctx: PageContext,
    notifications: Arc<Mutex<RemoteCollection<OnboardingNotification>>>,
}

impl NotificationFeed {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            notifications: Arc::new(Mutex::new(RemoteCollection::new())),
        }
    }

    pub async fn refresh(&self) -> LoadState {
        let ticket = self.notifications.lock().begin_fetch();
        let result = self.ctx.api.onboarding_notifications().await;
        let mut notifications = self.notifications.lock();
        match result {
            Ok(items) => {
                notifications.apply(ticket, items);
            }
            Err(err) => {
                warn!("failed to load notifications (error={})", err);
                notifications.fail(ticket, err.user_message());
            }
        }
        notifications.state().clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.notifications.lock().state().clone()
    }

    pub fn visible(&self, filter: NotificationFilter) -> Vec<OnboardingNotification> {
        filter.apply(self.notifications.lock().items())
    }

    pub fn unread_count(&self) -> usize {
        self.notifications
            .lock()
            .items()
            .iter()
            .filter(|notification| !notification.is_read)
            .count()
    }

    /// Mark one notification read. The local flag flips only after the server
    /// accepts the change.
    pub async fn mark_read(&self, id: RecordId) -> Result<(), PortalError> {
        let already_read = self
            .notifications
            .lock()
            .get(&id)
            .is_some_and(|notification| notification.is_read);
        if already_read {
            return Ok(());
        }
        self.ctx
            .api
            .mark_notification_read(id)
            .await
            .map_err(|err| self.ctx.write_failed("mark notification as read", err))?;
        self.notifications
            .lock()
            .patch(&id, |notification| notification.is_read = true);
        Ok(())
    }

    /// Mark every unread notification read, stopping at the first failure.
    pub async fn mark_all_read(&self) -> Result<usize, PortalError> {
        let unread: Vec<RecordId> = self
            .notifications
            .lock()
            .items()
            .iter()
            .filter(|notification| !notification.is_read)
            .map(|notification| notification.id)
            .collect();
        for id in &unread {
            self.mark_read(*id).await?;
        }
        Ok(unread.len())
    }
}
