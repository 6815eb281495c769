//! Onboarding assistant: transcript state machine, service seam, and the
//! async session that ties them to a host UI.

mod service;
mod session;
mod shell;
mod welcome;

pub use service::{AssistantService, HttpAssistant, send_message_with_typing};
pub use session::{AssistantHost, AssistantSession};
pub use shell::{
    AssistantShell, FALLBACK_REPLY, PendingTurn, Sender, ShellState, TranscriptMessage,
    TurnOutcome,
};
