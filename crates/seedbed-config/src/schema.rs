//! Raw on-disk shape of the config file.
//!
//! Every field that can default does, so a minimal file is just a
//! `base_url` line. Unknown top-level keys are tolerated (configs
//! migrated from older deployments carry extras), but duration tables
//! reject unknown keys since a typo there would silently read as zero.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct ConfigFile {
    pub base_url: String,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default = "default_poll_time_seeding")]
    pub poll_time_seeding: u64,
    #[serde(default = "default_poll_time_seeded")]
    pub poll_time_seeded: u64,
    #[serde(default)]
    pub discord: DiscordSection,
    #[serde(default)]
    pub player_messages: MessageSection,
    #[serde(default)]
    pub requirements: RequirementsSection,
    #[serde(default)]
    pub vip_reward: RewardSection,
}

fn default_poll_time_seeding() -> u64 {
    300
}

fn default_poll_time_seeded() -> u64 {
    60
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct DiscordSection {
    #[serde(default)]
    pub webhooks: Vec<String>,
    #[serde(default = "default_seeding_complete_message")]
    pub seeding_complete_message: String,
    #[serde(default = "default_seeding_in_progress_message")]
    pub seeding_in_progress_message: String,
    #[serde(default = "default_player_count_message")]
    pub player_count_message: String,
    #[serde(default = "default_player_buckets")]
    pub seeding_player_buckets: Vec<u32>,
}

impl Default for DiscordSection {
    fn default() -> Self {
        Self {
            webhooks: Vec::new(),
            seeding_complete_message: default_seeding_complete_message(),
            seeding_in_progress_message: default_seeding_in_progress_message(),
            player_count_message: default_player_count_message(),
            seeding_player_buckets: default_player_buckets(),
        }
    }
}

fn default_seeding_complete_message() -> String {
    "Server is live!".into()
}

fn default_seeding_in_progress_message() -> String {
    "Server has reached {player_count} players".into()
}

fn default_player_count_message() -> String {
    "{num_allied_players} vs {num_axis_players}".into()
}

fn default_player_buckets() -> Vec<u32> {
    vec![10, 20, 30]
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageSection {
    #[serde(default = "default_reward_message")]
    pub reward: String,
    #[serde(default = "default_non_vip_message")]
    pub non_vip: String,
}

impl Default for MessageSection {
    fn default() -> Self {
        Self {
            reward: default_reward_message(),
            non_vip: default_non_vip_message(),
        }
    }
}

fn default_reward_message() -> String {
    "Thanks for helping us seed! You've been granted {vip_reward} of VIP, expires {vip_expiration}".into()
}

fn default_non_vip_message() -> String {
    "Thanks for helping us seed!".into()
}

#[derive(Debug, Deserialize)]
pub(crate) struct RequirementsSection {
    #[serde(default = "default_buffer")]
    pub buffer: TimeSpan,
    #[serde(default)]
    pub min_allies: u32,
    #[serde(default = "default_max_per_faction")]
    pub max_allies: u32,
    #[serde(default)]
    pub min_axis: u32,
    #[serde(default = "default_max_per_faction")]
    pub max_axis: u32,
    #[serde(default)]
    pub online_when_seeded: bool,
    #[serde(default)]
    pub gate_on_population_bounds: bool,
    #[serde(default = "default_minimum_play_time")]
    pub minimum_play_time: TimeSpan,
}

impl Default for RequirementsSection {
    fn default() -> Self {
        Self {
            buffer: default_buffer(),
            min_allies: 0,
            max_allies: default_max_per_faction(),
            min_axis: 0,
            max_axis: default_max_per_faction(),
            online_when_seeded: false,
            gate_on_population_bounds: false,
            minimum_play_time: default_minimum_play_time(),
        }
    }
}

fn default_buffer() -> TimeSpan {
    TimeSpan {
        minutes: 10,
        ..TimeSpan::zero()
    }
}

fn default_max_per_faction() -> u32 {
    20
}

fn default_minimum_play_time() -> TimeSpan {
    TimeSpan {
        minutes: 5,
        ..TimeSpan::zero()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RewardSection {
    #[serde(default)]
    pub forward: bool,
    #[serde(default = "default_vip_name_format")]
    pub player_name_not_current_vip: String,
    #[serde(default)]
    pub cumulative: bool,
    #[serde(default = "default_timeframe")]
    pub timeframe: TimeSpan,
    #[serde(default = "default_true")]
    pub nice_time_delta: bool,
    #[serde(default = "default_true")]
    pub nice_expiration_date: bool,
}

impl Default for RewardSection {
    fn default() -> Self {
        Self {
            forward: false,
            player_name_not_current_vip: default_vip_name_format(),
            cumulative: false,
            timeframe: default_timeframe(),
            nice_time_delta: true,
            nice_expiration_date: true,
        }
    }
}

fn default_vip_name_format() -> String {
    "{player_name} - HLL Seed VIP".into()
}

fn default_timeframe() -> TimeSpan {
    TimeSpan {
        hours: 24,
        ..TimeSpan::zero()
    }
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Durations
// ---------------------------------------------------------------------------

/// A duration written as a table of units, e.g. `{ hours: 24 }` or
/// `{ minutes: 5, seconds: 30 }`. Unknown keys are rejected.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimeSpan {
    #[serde(default)]
    pub seconds: u64,
    #[serde(default)]
    pub minutes: u64,
    #[serde(default)]
    pub hours: u64,
}

impl TimeSpan {
    pub const fn zero() -> Self {
        Self {
            seconds: 0,
            minutes: 0,
            hours: 0,
        }
    }

    pub fn to_duration(self) -> chrono::Duration {
        let total = self.hours * 3_600 + self.minutes * 60 + self.seconds;
        chrono::Duration::seconds(total as i64)
    }
}
