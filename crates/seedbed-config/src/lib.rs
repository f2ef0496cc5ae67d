//! Configuration loading for the seedbed daemon.
//!
//! The file is YAML; see `config/config.example.yml` at the workspace
//! root for a fully commented sample. Loading is strict: every
//! validation problem is collected and reported in one error, and the
//! process refuses to start on any of them.

mod error;
mod schema;
mod settings;

pub use error::ConfigError;
pub use schema::TimeSpan;
pub use settings::{
    API_KEY_ENV, AppConfig, ApiSettings, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH,
    DiscordSettings, MessageSettings, RewardSettings, RuntimeSettings,
    api_key_from, api_key_from_env,
};
