//! Unified error type for the daemon.

use seedbed_config::ConfigError;
use seedbed_notify::NotifyError;
use seedbed_rcon::ApiError;

/// Top-level error that wraps the crate-specific errors.
///
/// Any of these reaching `main` ends the process; the daemon is
/// crash-only and relies on its supervisor to restart it. The `#[from]`
/// attributes let `?` convert sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum SeedbedError {
    /// Configuration could not be loaded or failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The admin API failed past the retry budget, or fatally.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The webhook sink could not be constructed.
    #[error(transparent)]
    Notify(#[from] NotifyError),
}
