//! Request/response contract for the onboarding assistant (`/ai-assistant/*`).

use crate::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Context attached to every assistant request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssistantContext {
    /// Current onboarding phase, starting at 1.
    pub phase: u32,
    pub employee_id: RecordId,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

impl AssistantContext {
    pub fn new(phase: u32, employee_id: RecordId, first_name: impl Into<String>) -> Self {
        Self {
            phase,
            employee_id,
            first_name: first_name.into(),
            page: None,
        }
    }

    /// Two contexts belong to the same session when phase and employee match.
    pub fn same_session(&self, other: &AssistantContext) -> bool {
        self.phase == other.phase && self.employee_id == other.employee_id
    }
}

/// Prior exchange forwarded with a chat request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
}

/// Body for `POST /ai-assistant/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    pub context: AssistantContext,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// Assistant turn returned by the service.
///
/// The backend names the text field `response`; both spellings are accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AssistantReply {
    #[serde(alias = "response")]
    pub text: String,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
}

impl AssistantReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Action tag carried in `data.action`, if it is one the shell knows.
    pub fn action(&self) -> Option<AssistantAction> {
        self.data
            .as_ref()
            .and_then(|data| data.get("action"))
            .and_then(Value::as_str)
            .and_then(AssistantAction::parse)
    }

    /// Suggestions carried by the reply; an empty list counts as absent.
    pub fn suggestions(&self) -> Option<&[String]> {
        self.suggestions
            .as_deref()
            .filter(|suggestions| !suggestions.is_empty())
    }
}

/// Response of `POST /ai-assistant/suggestions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SuggestionsReply {
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Host-side effects an assistant reply may request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AssistantAction {
    /// Open the profile/onboarding form.
    OpenForm,
    /// Show the resource panel.
    ShowResources,
    /// Navigate to the onboarding timeline.
    ShowTimeline,
}

impl AssistantAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssistantAction::OpenForm => "open_form",
            AssistantAction::ShowResources => "show_resources",
            AssistantAction::ShowTimeline => "show_timeline",
        }
    }

    /// Parse a tag; unknown tags yield `None` and are ignored by the shell.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open_form" => Some(AssistantAction::OpenForm),
            "show_resources" => Some(AssistantAction::ShowResources),
            "show_timeline" => Some(AssistantAction::ShowTimeline),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AssistantAction, AssistantReply};
    use pretty_assertions::assert_eq;

    #[test]
    fn reply_accepts_backend_field_name() {
        let reply: AssistantReply = serde_json::from_value(serde_json::json!({
            "response": "Here is your timeline",
            "data": {"action": "show_timeline"},
            "suggestions": ["What's next?"]
        }))
        .expect("decode");
        assert_eq!(reply.text, "Here is your timeline");
        assert_eq!(reply.action(), Some(AssistantAction::ShowTimeline));
        assert_eq!(reply.suggestions(), Some(&["What's next?".to_string()][..]));
    }

    #[test]
    fn unknown_action_and_empty_suggestions_are_absent() {
        let reply: AssistantReply = serde_json::from_value(serde_json::json!({
            "text": "ok",
            "data": {"action": "contact_hr"},
            "suggestions": []
        }))
        .expect("decode");
        assert_eq!(reply.action(), None);
        assert_eq!(reply.suggestions(), None);
    }
}
