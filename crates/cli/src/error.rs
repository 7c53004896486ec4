//! CLI errors and their process exit codes.
//!
//! - 0:  success
//! - 2:  clap arg parse error (before `run` is reached)
//! - 10: the simulation rejected its configuration (count, speed, damping, step, style)
//! - 11: I/O error (PNG write)
//! - 12: input error (unknown preset, module or color, bad surface size, bad `--params`)
//! - 13: serialization error
//! - 14: simulation lifecycle misuse (a bug in the driver, not in the arguments)

use chaos_cycle_core::SimError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// A `SimConfig` failed validation after presets and overrides were applied.
    #[error(transparent)]
    Config(SimError),

    /// Something named or sized on the command line is not usable.
    #[error("{0}")]
    Input(String),

    #[error("{0}")]
    Io(String),

    #[error("failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The loop was driven out of order.
    #[error("internal error: {0}")]
    Lifecycle(#[source] SimError),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
            CliError::Lifecycle(_) => 14,
        }
    }

    /// Short machine-readable category for `--json` error output.
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::Config(_) => "config",
            CliError::Io(_) => "io",
            CliError::Input(_) => "input",
            CliError::Serialization(_) => "serialization",
            CliError::Lifecycle(_) => "lifecycle",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.to_string(),
            "kind": self.kind(),
            "exit_code": self.exit_code(),
        })
    }
}

impl From<SimError> for CliError {
    fn from(e: SimError) -> Self {
        match e {
            SimError::Io(msg) => CliError::Io(msg),
            SimError::InvalidState { .. } => CliError::Lifecycle(e),
            // surface size comes straight from --width/--height
            SimError::InvalidBounds { .. }
            | SimError::UnknownModule(_)
            | SimError::UnknownPreset(_)
            | SimError::UnknownColorMode(_)
            | SimError::InvalidColor(_) => CliError::Input(e.to_string()),
            SimError::InvalidParticleCount
            | SimError::InvalidMaxSpeed(_)
            | SimError::InvalidDamping { .. }
            | SimError::InvalidStep(_)
            | SimError::InvalidTrailFade(_)
            | SimError::InvalidRadius(_) => CliError::Config(e),
        }
    }
}
