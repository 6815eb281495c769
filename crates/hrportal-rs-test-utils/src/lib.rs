//! Test helpers shared across HR portal crates.

pub mod assistant;
pub mod fixtures;
pub mod transport;

pub use assistant::{FailingAssistant, FixedAssistant, GatedAssistant, RecordingHost};
pub use fixtures::{announcement, document, notification, user};
pub use transport::StubTransport;
