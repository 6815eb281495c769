//! Async driver around [`AssistantShell`].

use super::service::{AssistantService, send_message_with_typing};
use super::shell::{AssistantShell, PendingTurn, ShellState, TranscriptMessage, TurnOutcome};
use crate::error::PortalError;
use hrportal_rs_config::AssistantConfig;
use hrportal_rs_protocol::{AssistantAction, AssistantContext};
use log::{debug, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Receives side effects requested by the assistant.
pub trait AssistantHost: Send + Sync {
    /// Toggle the typing indicator.
    fn typing_changed(&self, _typing: bool) {}

    /// Carry out an action tag from a reply. Called after the configured
    /// delay so the user can read the reply first.
    fn perform(&self, action: AssistantAction);
}

struct SessionInner {
    shell: Mutex<AssistantShell>,
    service: Arc<dyn AssistantService>,
    host: Arc<dyn AssistantHost>,
    action_delay: Duration,
    scheduled: Mutex<Vec<JoinHandle<()>>>,
}

impl SessionInner {
    fn cancel_scheduled(&self) {
        let mut scheduled = self.scheduled.lock();
        for handle in scheduled.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for SessionInner {
    fn drop(&mut self) {
        self.cancel_scheduled();
    }
}

/// Shared handle to one assistant conversation.
///
/// Locks are only held around state transitions, never across the service
/// call, so readers see the user message while the reply is pending.
#[derive(Clone)]
pub struct AssistantSession {
    inner: Arc<SessionInner>,
}

impl AssistantSession {
    pub fn new(
        context: AssistantContext,
        service: Arc<dyn AssistantService>,
        host: Arc<dyn AssistantHost>,
        config: &AssistantConfig,
    ) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                shell: Mutex::new(AssistantShell::new(context, config)),
                service,
                host,
                action_delay: config.action_delay(),
                scheduled: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Ask the service for context-specific suggestions. On failure the
    /// defaults stay in place.
    pub async fn load_suggestions(&self) -> bool {
        let (epoch, context) = {
            let shell = self.inner.shell.lock();
            (shell.epoch(), shell.context().clone())
        };
        match self.inner.service.suggestions(&context).await {
            Ok(suggestions) => self.inner.shell.lock().apply_suggestions(epoch, suggestions),
            Err(err) => {
                warn!(
                    "failed to load assistant suggestions (phase={}, error={})",
                    context.phase, err
                );
                false
            }
        }
    }

    pub fn set_input(&self, input: impl Into<String>) {
        self.inner.shell.lock().set_input(input);
    }

    /// Send the current input box contents.
    pub async fn send_input(&self) -> Result<TurnOutcome, PortalError> {
        let turn = self.inner.shell.lock().begin_send_input()?;
        Ok(self.drive(turn).await)
    }

    /// Send `text`. Only a busy session or an empty message is an error;
    /// service failures end as the fallback reply.
    ///
    /// Once accepted, the turn runs to completion even if the returned future
    /// is dropped.
    pub async fn send(&self, text: &str) -> Result<TurnOutcome, PortalError> {
        let turn = self.inner.shell.lock().begin_send(text)?;
        Ok(self.drive(turn).await)
    }

    /// Run the turn on its own task so that cancelling the caller cannot
    /// leave the shell awaiting a reply.
    async fn drive(&self, turn: PendingTurn) -> TurnOutcome {
        let session = self.clone();
        let background = turn.clone();
        match tokio::spawn(async move { session.run_turn(background).await }).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("assistant turn ended abnormally (error={})", err);
                self.inner
                    .shell
                    .lock()
                    .complete(&turn, Err(PortalError::Transport(err.to_string())))
            }
        }
    }

    async fn run_turn(&self, turn: PendingTurn) -> TurnOutcome {
        let host = self.inner.host.clone();
        let on_typing = move |typing: bool| host.typing_changed(typing);
        let result = send_message_with_typing(
            self.inner.service.as_ref(),
            turn.request.clone(),
            &on_typing,
        )
        .await;

        let mut shell = self.inner.shell.lock();
        let outcome = shell.complete(&turn, result);
        if let TurnOutcome::Applied {
            action: Some(action),
        } = outcome
        {
            self.schedule(action);
        }
        outcome
    }

    /// Caller holds the shell lock, so a concurrent context change cannot
    /// slip between the reply and the scheduling.
    fn schedule(&self, action: AssistantAction) {
        let Ok(runtime) = Handle::try_current() else {
            warn!(
                "no async runtime; dropping assistant action (action={})",
                action.as_str()
            );
            return;
        };
        let host = self.inner.host.clone();
        let delay = self.inner.action_delay;
        debug!(
            "scheduling assistant action (action={}, delay_ms={})",
            action.as_str(),
            delay.as_millis()
        );
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            host.perform(action);
        });
        let mut scheduled = self.inner.scheduled.lock();
        scheduled.retain(|handle| !handle.is_finished());
        scheduled.push(handle);
    }

    /// Switch context. A different phase or employee resets the conversation,
    /// cancels pending actions, and makes any in-flight reply a no-op.
    pub fn change_context(&self, context: AssistantContext) -> bool {
        let mut shell = self.inner.shell.lock();
        let reset = shell.change_context(context);
        if reset {
            self.inner.cancel_scheduled();
        }
        reset
    }

    pub fn transcript(&self) -> Vec<TranscriptMessage> {
        self.inner.shell.lock().transcript().to_vec()
    }

    pub fn suggestions(&self) -> Vec<String> {
        self.inner.shell.lock().suggestions().to_vec()
    }

    pub fn state(&self) -> ShellState {
        self.inner.shell.lock().state()
    }

    pub fn context(&self) -> AssistantContext {
        self.inner.shell.lock().context().clone()
    }

    pub fn can_send(&self) -> bool {
        self.inner.shell.lock().can_send()
    }
}
