//! Assistant service seam and its HTTP implementation.

use crate::error::PortalError;
use crate::fetch::{ApiRequest, Transport};
use async_trait::async_trait;
use hrportal_rs_protocol::{AssistantContext, AssistantReply, ChatRequest, SuggestionsReply};
use std::sync::Arc;

/// Backend that answers assistant messages.
#[async_trait]
pub trait AssistantService: Send + Sync {
    async fn suggestions(&self, context: &AssistantContext) -> Result<Vec<String>, PortalError>;

    async fn send_message(&self, request: ChatRequest) -> Result<AssistantReply, PortalError>;
}

/// Send a message while reporting the typing indicator: `true` before the
/// request, `false` once it settles either way.
pub async fn send_message_with_typing(
    service: &dyn AssistantService,
    request: ChatRequest,
    on_typing: &(dyn Fn(bool) + Send + Sync),
) -> Result<AssistantReply, PortalError> {
    on_typing(true);
    let result = service.send_message(request).await;
    on_typing(false);
    result
}

/// Talks to `/ai-assistant/*` through a [`Transport`].
#[derive(Clone)]
pub struct HttpAssistant {
    transport: Arc<dyn Transport>,
}

impl HttpAssistant {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl AssistantService for HttpAssistant {
    async fn suggestions(&self, context: &AssistantContext) -> Result<Vec<String>, PortalError> {
        let value = self
            .transport
            .send(
                ApiRequest::post("/ai-assistant/suggestions")
                    .json(serde_json::to_value(context)?),
            )
            .await?;
        let reply: SuggestionsReply = serde_json::from_value(value)?;
        Ok(reply.suggestions)
    }

    async fn send_message(&self, request: ChatRequest) -> Result<AssistantReply, PortalError> {
        let value = self
            .transport
            .send(ApiRequest::post("/ai-assistant/chat").json(serde_json::to_value(&request)?))
            .await?;
        Ok(serde_json::from_value(value)?)
    }
}
