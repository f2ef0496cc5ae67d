//! Validated runtime settings.
//!
//! [`AppConfig`] is what the rest of the workspace sees: URLs already
//! parsed, durations already converted, bounds already checked. The
//! admin API key deliberately never appears in the file; it comes from
//! the environment so the YAML can live in version control.

use std::path::Path;
use std::time::Duration as StdDuration;

use seedbed_core::SeedingConfig;
use url::Url;

use crate::error::ConfigError;
use crate::schema::ConfigFile;

/// Environment variable holding the admin API key.
pub const API_KEY_ENV: &str = "API_KEY";
/// Environment variable overriding the config file path.
pub const CONFIG_PATH_ENV: &str = "SEEDBED_CONFIG";
/// Fallback config path relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/config.yml";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub runtime: RuntimeSettings,
    /// Lifecycle policy handed to the state machine.
    pub seeding: SeedingConfig,
    pub reward: RewardSettings,
    pub discord: DiscordSettings,
    pub messages: MessageSettings,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: Url,
}

#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    pub dry_run: bool,
    pub poll_time_seeding: StdDuration,
    pub poll_time_seeded: StdDuration,
}

#[derive(Debug, Clone)]
pub struct RewardSettings {
    /// Forward VIP grants to all servers sharing the panel.
    pub forward: bool,
    /// Description template for players without an existing VIP entry.
    pub player_name_not_current_vip: String,
    pub nice_time_delta: bool,
    pub nice_expiration_date: bool,
}

#[derive(Debug, Clone)]
pub struct DiscordSettings {
    pub webhooks: Vec<Url>,
    pub seeding_complete_message: String,
    pub seeding_in_progress_message: String,
    pub player_count_message: String,
}

#[derive(Debug, Clone)]
pub struct MessageSettings {
    pub reward: String,
    pub non_vip: String,
}

impl AppConfig {
    /// Reads, parses, and validates the YAML file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| {
            ConfigError::Read {
                path: path.to_owned(),
                source,
            }
        })?;
        let file: ConfigFile =
            serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_owned(),
                source,
            })?;
        Self::from_file(file)
    }

    fn from_file(file: ConfigFile) -> Result<Self, ConfigError> {
        let mut problems = Vec::new();

        let base_url = parse_http_url("base_url", &file.base_url, &mut problems);

        let mut webhooks = Vec::with_capacity(file.discord.webhooks.len());
        for (index, raw) in file.discord.webhooks.iter().enumerate() {
            let field = format!("discord.webhooks[{index}]");
            if let Some(url) = parse_http_url(&field, raw, &mut problems) {
                webhooks.push(url);
            }
        }

        if file.poll_time_seeding == 0 {
            problems.push("poll_time_seeding: must be at least 1 second".into());
        }
        if file.poll_time_seeded == 0 {
            problems.push("poll_time_seeded: must be at least 1 second".into());
        }

        let req = &file.requirements;
        if req.max_allies == 0 || req.max_axis == 0 {
            problems.push(
                "requirements: max_allies and max_axis must be positive".into(),
            );
        }
        if req.min_allies > req.max_allies {
            problems.push(format!(
                "requirements: min_allies ({}) exceeds max_allies ({})",
                req.min_allies, req.max_allies
            ));
        }
        if req.min_axis > req.max_axis {
            problems.push(format!(
                "requirements: min_axis ({}) exceeds max_axis ({})",
                req.min_axis, req.max_axis
            ));
        }

        let minimum_play_time = req.minimum_play_time.to_duration();
        if minimum_play_time < chrono::Duration::seconds(1) {
            problems.push(
                "requirements.minimum_play_time: must be at least 1 second".into(),
            );
        }

        let timeframe = file.vip_reward.timeframe.to_duration();
        if timeframe <= chrono::Duration::zero() {
            problems.push("vip_reward.timeframe: must be positive".into());
        }

        let buckets = &file.discord.seeding_player_buckets;
        if !buckets.windows(2).all(|pair| pair[0] < pair[1]) {
            problems.push(format!(
                "discord.seeding_player_buckets: must be strictly ascending, got {buckets:?}"
            ));
        }

        if !problems.is_empty() {
            return Err(ConfigError::Invalid { problems });
        }

        // A None base_url would have produced a problem above.
        let Some(base_url) = base_url else {
            return Err(ConfigError::Invalid {
                problems: vec!["base_url: missing".into()],
            });
        };

        Ok(Self {
            api: ApiSettings { base_url },
            runtime: RuntimeSettings {
                dry_run: file.dry_run,
                poll_time_seeding: StdDuration::from_secs(file.poll_time_seeding),
                poll_time_seeded: StdDuration::from_secs(file.poll_time_seeded),
            },
            seeding: SeedingConfig {
                min_allies: req.min_allies,
                min_axis: req.min_axis,
                max_allies: req.max_allies,
                max_axis: req.max_axis,
                minimum_play_time,
                online_when_seeded: req.online_when_seeded,
                gate_on_population_bounds: req.gate_on_population_bounds,
                cumulative_vip: file.vip_reward.cumulative,
                vip_reward: timeframe,
                buffer: req.buffer.to_duration(),
                player_buckets: file.discord.seeding_player_buckets.clone(),
            },
            reward: RewardSettings {
                forward: file.vip_reward.forward,
                player_name_not_current_vip: file
                    .vip_reward
                    .player_name_not_current_vip,
                nice_time_delta: file.vip_reward.nice_time_delta,
                nice_expiration_date: file.vip_reward.nice_expiration_date,
            },
            discord: DiscordSettings {
                webhooks,
                seeding_complete_message: file.discord.seeding_complete_message,
                seeding_in_progress_message: file
                    .discord
                    .seeding_in_progress_message,
                player_count_message: file.discord.player_count_message,
            },
            messages: MessageSettings {
                reward: file.player_messages.reward,
                non_vip: file.player_messages.non_vip,
            },
        })
    }
}

fn parse_http_url(
    field: &str,
    raw: &str,
    problems: &mut Vec<String>,
) -> Option<Url> {
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url),
        Ok(url) => {
            problems.push(format!(
                "{field}: unsupported scheme `{}`, expected http or https",
                url.scheme()
            ));
            None
        }
        Err(error) => {
            problems.push(format!("{field}: {error}"));
            None
        }
    }
}

/// Reads the admin API key from the environment.
pub fn api_key_from_env() -> Result<String, ConfigError> {
    api_key_from(std::env::var(API_KEY_ENV).ok())
}

/// Validates a raw API key value. Empty and whitespace-only values are
/// treated the same as an unset variable.
pub fn api_key_from(raw: Option<String>) -> Result<String, ConfigError> {
    match raw {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingApiKey(API_KEY_ENV)),
    }
}
