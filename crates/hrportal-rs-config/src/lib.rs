//! Portal configuration: schema, defaults, and layered JSON5 loading.
//!
//! Layers are read from system, user, project, and working-directory
//! locations plus explicit runtime files, then merged in that order. An
//! optional requirements file pins keys that no later layer may override.

mod error;
mod loader;
mod model;

/// Error returned by config loading and validation.
pub use error::ConfigError;
/// Layer metadata and loader options.
pub use loader::{ConfigLayer, ConfigLayerSource, LayeredConfig, LayeredConfigOptions};
/// Configuration schema.
pub use model::*;
