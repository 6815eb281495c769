//! Transient user notifications.

use chrono::{DateTime, Utc};
use hrportal_rs_config::ToastConfig;
use log::{debug, warn};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Warning => "warning",
            ToastKind::Info => "info",
        }
    }
}

/// Single action button rendered on a toast.
#[derive(Clone)]
pub struct ToastAction {
    pub label: String,
    pub on_click: Arc<dyn Fn() + Send + Sync>,
}

impl ToastAction {
    pub fn new(label: impl Into<String>, on_click: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            on_click: Arc::new(on_click),
        }
    }
}

impl fmt::Debug for ToastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ToastOptions {
    /// Persistent toasts stay until dismissed.
    pub persistent: bool,
    pub action: Option<ToastAction>,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub kind: ToastKind,
    pub created_at: DateTime<Utc>,
    pub persistent: bool,
    pub action: Option<ToastAction>,
}

#[derive(Default)]
struct ToastState {
    toasts: Vec<Toast>,
    timers: HashMap<Uuid, JoinHandle<()>>,
}

/// Shared toast stack. Clones refer to the same stack.
///
/// Auto-dismiss timers run on the ambient tokio runtime; outside a runtime
/// toasts stay until dismissed.
#[derive(Clone)]
pub struct ToastCenter {
    state: Arc<Mutex<ToastState>>,
    duration: Duration,
}

impl ToastCenter {
    pub fn new(config: &ToastConfig) -> Self {
        Self::with_duration(config.duration())
    }

    pub fn with_duration(duration: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(ToastState::default())),
            duration,
        }
    }

    pub fn show(&self, message: impl Into<String>, kind: ToastKind) -> Uuid {
        self.show_with(message, kind, ToastOptions::default())
    }

    pub fn show_with(
        &self,
        message: impl Into<String>,
        kind: ToastKind,
        options: ToastOptions,
    ) -> Uuid {
        let toast = Toast {
            id: Uuid::new_v4(),
            message: message.into(),
            kind,
            created_at: Utc::now(),
            persistent: options.persistent,
            action: options.action,
        };
        let id = toast.id;
        debug!(
            "showing toast (id={}, kind={}, persistent={})",
            id,
            kind.as_str(),
            toast.persistent
        );
        let persistent = toast.persistent;
        self.state.lock().toasts.push(toast);
        if !persistent {
            self.schedule_dismiss(id);
        }
        id
    }

    fn schedule_dismiss(&self, id: Uuid) {
        let Ok(handle) = Handle::try_current() else {
            warn!("no async runtime; toast will not auto-dismiss (id={})", id);
            return;
        };
        let shared = self.state.clone();
        let duration = self.duration;
        // The timer takes the same lock before touching `timers`, so its handle
        // is always registered before it can be removed.
        let mut state = self.state.lock();
        let timer = handle.spawn(async move {
            tokio::time::sleep(duration).await;
            let mut state = shared.lock();
            state.timers.remove(&id);
            state.toasts.retain(|toast| toast.id != id);
        });
        state.timers.insert(id, timer);
    }

    /// Remove a toast early and cancel its timer. Returns false if it was
    /// already gone.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut state = self.state.lock();
        if let Some(timer) = state.timers.remove(&id) {
            timer.abort();
        }
        let before = state.toasts.len();
        state.toasts.retain(|toast| toast.id != id);
        state.toasts.len() != before
    }

    /// Run the toast's action, then dismiss it.
    pub fn activate(&self, id: Uuid) -> bool {
        let action = self
            .state
            .lock()
            .toasts
            .iter()
            .find(|toast| toast.id == id)
            .and_then(|toast| toast.action.clone());
        let Some(action) = action else {
            return false;
        };
        (action.on_click)();
        self.dismiss(id);
        true
    }

    /// Visible toasts, oldest first.
    pub fn active(&self) -> Vec<Toast> {
        self.state.lock().toasts.clone()
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        for (_, timer) in state.timers.drain() {
            timer.abort();
        }
        state.toasts.clear();
    }
}

impl Default for ToastCenter {
    fn default() -> Self {
        Self::new(&ToastConfig::default())
    }
}
