use super::PageContext;
use crate::collection::{LoadState, RemoteCollection};
use crate::error::PortalError;
use crate::filter::{FilterState, Page, apply_filters, paginate};
use crate::toast::ToastKind;
use chrono::{DateTime, Utc};
use hrportal_rs_config::AnnouncementsConfig;
use hrportal_rs_protocol::{Announcement, AnnouncementStats, NewAnnouncement, RecordId};
use log::{debug, warn};
use parking_lot::Mutex;
use std::sync::Arc;

struct BoardState {
    announcements: RemoteCollection<Announcement>,
    filters: FilterState,
}

/// Company announcements with acknowledgement tracking.
#[derive(Clone)]
pub struct AnnouncementBoard {
    ctx: PageContext,
    page_size: usize,
    state: Arc<Mutex<BoardState>>,
}

impl AnnouncementBoard {
    pub fn new(ctx: PageContext, config: &AnnouncementsConfig) -> Self {
        let filters = FilterState::default().with_show_expired(config.show_expired);
        Self {
            ctx,
            page_size: config.page_size,
            state: Arc::new(Mutex::new(BoardState {
                announcements: RemoteCollection::new(),
                filters,
            })),
        }
    }

    /// Reload the board. Signed-in users get per-user acknowledgement state.
    pub async fn refresh(&self) -> LoadState {
        let ticket = self.state.lock().announcements.begin_fetch();
        let result = if self.ctx.user.is_some() {
            self.ctx.api.announcements_with_status().await
        } else {
            self.ctx.api.announcements().await
        };
        let mut state = self.state.lock();
        match result {
            Ok(items) => {
                debug!("announcements loaded (count={})", items.len());
                state.announcements.apply(ticket, items);
            }
            Err(err) => {
                warn!("failed to load announcements (error={})", err);
                state.announcements.fail(ticket, err.user_message());
            }
        }
        state.announcements.state().clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.state.lock().announcements.state().clone()
    }

    /// Everything fetched, in backend order.
    pub fn all(&self) -> Vec<Announcement> {
        self.state.lock().announcements.items().to_vec()
    }

    pub fn filters(&self) -> FilterState {
        self.state.lock().filters.clone()
    }

    pub fn set_filters(&self, filters: FilterState) {
        self.state.lock().filters = filters;
    }

    pub fn visible(&self, now: DateTime<Utc>) -> Vec<Announcement> {
        let state = self.state.lock();
        apply_filters(state.announcements.items(), &state.filters, now)
    }

    pub fn page(&self, page: usize, now: DateTime<Utc>) -> Page<Announcement> {
        paginate(&self.visible(now), page, self.page_size)
    }

    /// Visible announcements the current user has not acknowledged yet.
    pub fn pending_acknowledgement(&self, now: DateTime<Utc>) -> usize {
        self.visible(now)
            .iter()
            .filter(|announcement| !announcement.acknowledged)
            .count()
    }

    pub async fn acknowledge(&self, id: RecordId) -> Result<(), PortalError> {
        self.ctx.require_user()?;
        let receipt = self
            .ctx
            .api
            .acknowledge_announcement(id)
            .await
            .map_err(|err| self.ctx.write_failed("acknowledge announcement", err))?;
        let acknowledged_at = receipt.acknowledged_at.unwrap_or_else(Utc::now);
        self.state.lock().announcements.patch(&id, |announcement| {
            announcement.acknowledged = true;
            announcement.acknowledged_at = Some(acknowledged_at);
        });
        self.ctx.toasts.show("Announcement acknowledged", ToastKind::Success);
        Ok(())
    }

    pub async fn post(&self, announcement: NewAnnouncement) -> Result<Announcement, PortalError> {
        self.ctx.require_privileged("posting announcements")?;
        if announcement.title.trim().is_empty() || announcement.content.trim().is_empty() {
            return Err(PortalError::InvalidInput(
                "title and content are required".to_string(),
            ));
        }
        let created = self
            .ctx
            .api
            .create_announcement(&announcement)
            .await
            .map_err(|err| self.ctx.write_failed("post announcement", err))?;
        self.state.lock().announcements.insert_front(created.clone());
        self.ctx.toasts.show("Announcement posted", ToastKind::Success);
        Ok(created)
    }

    /// Flip an announcement between active and inactive. Returns the new flag.
    pub async fn toggle_status(&self, id: RecordId) -> Result<bool, PortalError> {
        self.ctx.require_privileged("changing announcement status")?;
        let toggle = self
            .ctx
            .api
            .toggle_announcement(id)
            .await
            .map_err(|err| self.ctx.write_failed("update announcement", err))?;
        self.state.lock().announcements.patch(&id, |announcement| {
            announcement.is_active = toggle.is_active;
        });
        Ok(toggle.is_active)
    }

    pub async fn stats(&self) -> Result<AnnouncementStats, PortalError> {
        self.ctx.require_privileged("viewing announcement statistics")?;
        self.ctx.api.announcement_stats().await
    }
}
