use async_trait::async_trait;
use hrportal_rs_core::{AssistantHost, AssistantService, PortalError};
use hrportal_rs_protocol::{AssistantAction, AssistantContext, AssistantReply, ChatRequest};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::Notify;

/// Answers every message with the same reply and records what it was sent.
#[derive(Clone, Default)]
pub struct FixedAssistant {
    reply: AssistantReply,
    suggestions: Vec<String>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl FixedAssistant {
    pub fn new(reply: AssistantReply) -> Self {
        Self {
            reply,
            ..Self::default()
        }
    }

    pub fn with_suggestions(mut self, suggestions: &[&str]) -> Self {
        self.suggestions = suggestions.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl AssistantService for FixedAssistant {
    async fn suggestions(&self, _context: &AssistantContext) -> Result<Vec<String>, PortalError> {
        Ok(self.suggestions.clone())
    }

    async fn send_message(&self, request: ChatRequest) -> Result<AssistantReply, PortalError> {
        self.requests.lock().push(request);
        Ok(self.reply.clone())
    }
}

/// Fails every call with a transport error.
#[derive(Clone, Default)]
pub struct FailingAssistant;

#[async_trait]
impl AssistantService for FailingAssistant {
    async fn suggestions(&self, _context: &AssistantContext) -> Result<Vec<String>, PortalError> {
        Err(PortalError::Transport("assistant offline".to_string()))
    }

    async fn send_message(&self, _request: ChatRequest) -> Result<AssistantReply, PortalError> {
        Err(PortalError::Transport("assistant offline".to_string()))
    }
}

/// Holds each reply until the gate is notified.
#[derive(Clone)]
pub struct GatedAssistant {
    reply: AssistantReply,
    gate: Arc<Notify>,
    started: Arc<Notify>,
}

impl GatedAssistant {
    pub fn new(reply: AssistantReply) -> Self {
        Self {
            reply,
            gate: Arc::new(Notify::new()),
            started: Arc::new(Notify::new()),
        }
    }

    /// Let one pending reply through.
    pub fn release(&self) {
        self.gate.notify_one();
    }

    /// Wait until a message has reached the service.
    pub async fn wait_started(&self) {
        self.started.notified().await;
    }
}

#[async_trait]
impl AssistantService for GatedAssistant {
    async fn suggestions(&self, _context: &AssistantContext) -> Result<Vec<String>, PortalError> {
        Ok(Vec::new())
    }

    async fn send_message(&self, _request: ChatRequest) -> Result<AssistantReply, PortalError> {
        self.started.notify_one();
        self.gate.notified().await;
        Ok(self.reply.clone())
    }
}

/// Host that records typing toggles and performed actions.
#[derive(Default)]
pub struct RecordingHost {
    typing: Mutex<Vec<bool>>,
    actions: Mutex<Vec<AssistantAction>>,
}

impl RecordingHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn typing(&self) -> Vec<bool> {
        self.typing.lock().clone()
    }

    pub fn actions(&self) -> Vec<AssistantAction> {
        self.actions.lock().clone()
    }
}

impl AssistantHost for RecordingHost {
    fn typing_changed(&self, typing: bool) {
        self.typing.lock().push(typing);
    }

    fn perform(&self, action: AssistantAction) {
        self.actions.lock().push(action);
    }
}
