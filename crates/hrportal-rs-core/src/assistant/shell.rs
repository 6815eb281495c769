//! Transcript and turn state for one assistant session.
//!
//! The shell performs no I/O. A send is split into [`AssistantShell::begin_send`],
//! which records the user message and hands back a [`PendingTurn`], and
//! [`AssistantShell::complete`], which applies the service result. Each context
//! change starts a new epoch; turns from an older epoch complete as
//! [`TurnOutcome::Stale`] and leave the fresh session untouched.

use super::welcome::{default_suggestions, welcome_text};
use crate::error::PortalError;
use chrono::{DateTime, Utc};
use hrportal_rs_config::AssistantConfig;
use hrportal_rs_protocol::{
    AssistantAction, AssistantContext, AssistantReply, ChatRequest, HistoryEntry,
};
use log::{debug, warn};
use serde::Serialize;
use uuid::Uuid;

pub const FALLBACK_REPLY: &str = "I'm sorry, I'm having trouble responding right now. \
Please try again in a moment, or contact HR if the issue persists.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellState {
    Idle,
    AwaitingResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    fn role(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }
}

/// One entry of the transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptMessage {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Suggestions that arrived with this reply, if any.
    pub suggestions: Option<Vec<String>>,
    /// Recognised action tag that arrived with this reply, if any.
    pub action: Option<AssistantAction>,
}

impl TranscriptMessage {
    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
            suggestions: None,
            action: None,
        }
    }
}

/// A request handed out by [`AssistantShell::begin_send`].
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTurn {
    pub epoch: u64,
    pub request: ChatRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The reply (or the fallback) was appended.
    Applied { action: Option<AssistantAction> },
    /// The context changed while the request was in flight; nothing changed.
    Stale,
}

#[derive(Debug, Clone)]
pub struct AssistantShell {
    context: AssistantContext,
    transcript: Vec<TranscriptMessage>,
    suggestions: Vec<String>,
    input: String,
    state: ShellState,
    epoch: u64,
    max_suggestions: usize,
    history_window: usize,
}

impl AssistantShell {
    pub fn new(context: AssistantContext, config: &AssistantConfig) -> Self {
        let mut shell = Self {
            context,
            transcript: Vec::new(),
            suggestions: Vec::new(),
            input: String::new(),
            state: ShellState::Idle,
            epoch: 0,
            max_suggestions: config.max_suggestions,
            history_window: config.history_window,
        };
        shell.seed();
        shell
    }

    fn seed(&mut self) {
        self.transcript = vec![TranscriptMessage::new(
            Sender::Assistant,
            welcome_text(&self.context),
        )];
        let mut suggestions = default_suggestions(self.context.phase);
        suggestions.truncate(self.max_suggestions);
        self.suggestions = suggestions;
        self.input.clear();
        self.state = ShellState::Idle;
    }

    pub fn context(&self) -> &AssistantContext {
        &self.context
    }

    pub fn transcript(&self) -> &[TranscriptMessage] {
        &self.transcript
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Sending is disabled while a reply is outstanding.
    pub fn can_send(&self) -> bool {
        self.state == ShellState::Idle
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Send the current input.
    pub fn begin_send_input(&mut self) -> Result<PendingTurn, PortalError> {
        let input = self.input.clone();
        self.begin_send(&input)
    }

    /// Append the user message and move to `AwaitingResponse`.
    ///
    /// The request history covers the messages before this one, limited to
    /// the configured window.
    pub fn begin_send(&mut self, text: &str) -> Result<PendingTurn, PortalError> {
        if self.state == ShellState::AwaitingResponse {
            return Err(PortalError::AssistantBusy);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(PortalError::InvalidInput("message is empty".to_string()));
        }

        let skip = self.transcript.len().saturating_sub(self.history_window);
        let history: Vec<HistoryEntry> = self.transcript[skip..]
            .iter()
            .map(|message| HistoryEntry {
                role: message.sender.role().to_string(),
                content: message.text.clone(),
            })
            .collect();

        self.transcript.push(TranscriptMessage::new(Sender::User, text));
        self.input.clear();
        self.state = ShellState::AwaitingResponse;
        debug!(
            "assistant turn started (epoch={}, history_len={})",
            self.epoch,
            history.len()
        );
        Ok(PendingTurn {
            epoch: self.epoch,
            request: ChatRequest {
                message: text.to_string(),
                context: self.context.clone(),
                history,
            },
        })
    }

    /// Apply the service result for `turn`. Failures become the fallback
    /// message; they never escape.
    pub fn complete(
        &mut self,
        turn: &PendingTurn,
        result: Result<AssistantReply, PortalError>,
    ) -> TurnOutcome {
        if turn.epoch != self.epoch || self.state != ShellState::AwaitingResponse {
            debug!(
                "ignoring stale assistant reply (turn_epoch={}, epoch={})",
                turn.epoch, self.epoch
            );
            return TurnOutcome::Stale;
        }
        self.state = ShellState::Idle;

        let reply = match result {
            Ok(reply) => reply,
            Err(err) => {
                warn!("assistant request failed (error={})", err);
                self.transcript
                    .push(TranscriptMessage::new(Sender::Assistant, FALLBACK_REPLY));
                return TurnOutcome::Applied { action: None };
            }
        };

        let action = reply.action();
        let mut message = TranscriptMessage::new(Sender::Assistant, reply.text.clone());
        message.action = action;
        if let Some(suggestions) = reply.suggestions() {
            let mut suggestions = suggestions.to_vec();
            suggestions.truncate(self.max_suggestions);
            message.suggestions = Some(suggestions.clone());
            self.suggestions = suggestions;
        }
        self.transcript.push(message);
        TurnOutcome::Applied { action }
    }

    /// Switch context. A new phase or employee resets the session and
    /// invalidates any in-flight turn. Returns true when a reset happened.
    pub fn change_context(&mut self, context: AssistantContext) -> bool {
        let reset = !self.context.same_session(&context);
        self.context = context;
        if reset {
            self.epoch += 1;
            self.seed();
            debug!(
                "assistant session reset (phase={}, employee_id={}, epoch={})",
                self.context.phase, self.context.employee_id, self.epoch
            );
        }
        reset
    }

    /// Replace suggestions fetched for `epoch`. Ignored for older epochs and
    /// empty lists.
    pub fn apply_suggestions(&mut self, epoch: u64, suggestions: Vec<String>) -> bool {
        if epoch != self.epoch || suggestions.is_empty() {
            return false;
        }
        let mut suggestions = suggestions;
        suggestions.truncate(self.max_suggestions);
        self.suggestions = suggestions;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn config() -> AssistantConfig {
        AssistantConfig {
            max_suggestions: 3,
            history_window: 2,
            ..AssistantConfig::default()
        }
    }

    fn shell() -> AssistantShell {
        AssistantShell::new(AssistantContext::new(1, 42, "Sam"), &config())
    }

    #[test]
    fn starts_idle_with_one_welcome_message() {
        let shell = shell();
        assert_eq!(shell.state(), ShellState::Idle);
        assert_eq!(shell.transcript().len(), 1);
        assert_eq!(shell.transcript()[0].sender, Sender::Assistant);
        assert!(shell.transcript()[0].text.contains("Sam"));
        assert_eq!(shell.suggestions().len(), 3);
    }

    #[test]
    fn send_appends_user_message_and_blocks_second_send() {
        let mut shell = shell();
        shell.set_input("  Where do I upload my ID?  ");
        let turn = shell.begin_send_input().expect("turn");

        assert_eq!(shell.transcript().len(), 2);
        assert_eq!(shell.transcript()[1].sender, Sender::User);
        assert_eq!(shell.transcript()[1].text, "Where do I upload my ID?");
        assert_eq!(shell.input(), "");
        assert_eq!(shell.state(), ShellState::AwaitingResponse);
        assert_eq!(turn.request.history.len(), 1);
        assert_eq!(turn.request.history[0].role, "assistant");

        assert!(matches!(
            shell.begin_send("hello"),
            Err(PortalError::AssistantBusy)
        ));
        assert_eq!(shell.transcript().len(), 2);
    }

    #[test]
    fn empty_message_is_rejected_without_side_effects() {
        let mut shell = shell();
        assert!(matches!(
            shell.begin_send("   "),
            Err(PortalError::InvalidInput(_))
        ));
        assert_eq!(shell.transcript().len(), 1);
        assert!(shell.can_send());
    }

    #[test]
    fn reply_replaces_suggestions_and_reports_action() {
        let mut shell = shell();
        let turn = shell.begin_send("timeline?").expect("turn");
        let reply: AssistantReply = serde_json::from_value(json!({
            "response": "Here it is.",
            "data": {"action": "show_timeline"},
            "suggestions": ["a", "b", "c", "d", "e"]
        }))
        .expect("reply");

        let outcome = shell.complete(&turn, Ok(reply));
        assert_eq!(
            outcome,
            TurnOutcome::Applied {
                action: Some(AssistantAction::ShowTimeline)
            }
        );
        assert_eq!(shell.suggestions(), ["a", "b", "c"]);
        assert_eq!(shell.transcript().len(), 3);
        assert_eq!(shell.state(), ShellState::Idle);
    }

    #[test]
    fn reply_without_suggestions_keeps_previous_ones() {
        let mut shell = shell();
        let before = shell.suggestions().to_vec();
        let turn = shell.begin_send("hi").expect("turn");
        shell.complete(&turn, Ok(AssistantReply::text("Hello!")));
        assert_eq!(shell.suggestions(), before.as_slice());
    }

    #[test]
    fn failure_appends_exactly_one_fallback() {
        let mut shell = shell();
        let turn = shell.begin_send("hi").expect("turn");
        let outcome = shell.complete(&turn, Err(PortalError::Transport("down".to_string())));
        assert_eq!(outcome, TurnOutcome::Applied { action: None });
        let texts: Vec<&str> = shell.transcript().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts.len(), 3);
        assert_eq!(texts[2], FALLBACK_REPLY);
        assert!(shell.can_send());
    }

    #[test]
    fn context_change_discards_transcript_and_stale_reply() {
        let mut shell = shell();
        let turn = shell.begin_send("hi").expect("turn");
        assert!(shell.change_context(AssistantContext::new(2, 42, "Sam")));

        assert_eq!(shell.transcript().len(), 1);
        assert!(shell.transcript()[0].text.contains("Phase 2"));
        assert_eq!(shell.state(), ShellState::Idle);

        let outcome = shell.complete(&turn, Ok(AssistantReply::text("late")));
        assert_eq!(outcome, TurnOutcome::Stale);
        assert_eq!(shell.transcript().len(), 1);
        assert!(!shell.apply_suggestions(turn.epoch, vec!["old".to_string()]));
    }

    #[test]
    fn same_session_context_keeps_transcript() {
        let mut shell = shell();
        let turn = shell.begin_send("hi").expect("turn");
        let mut context = AssistantContext::new(1, 42, "Sam");
        context.page = Some("documents".to_string());
        assert!(!shell.change_context(context));
        assert_eq!(shell.transcript().len(), 2);
        assert!(matches!(
            shell.complete(&turn, Ok(AssistantReply::text("ok"))),
            TurnOutcome::Applied { .. }
        ));
    }

    #[test]
    fn history_is_limited_to_window() {
        let mut shell = shell();
        for text in ["one", "two"] {
            let turn = shell.begin_send(text).expect("turn");
            shell.complete(&turn, Ok(AssistantReply::text(format!("re: {text}"))));
        }
        let turn = shell.begin_send("three").expect("turn");
        let contents: Vec<&str> = turn
            .request
            .history
            .iter()
            .map(|entry| entry.content.as_str())
            .collect();
        assert_eq!(contents, vec!["two", "re: two"]);
    }
}
