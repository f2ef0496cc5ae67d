//! Template expansion for in-game messages and grant descriptions.
//!
//! Operators write the templates in the config file; the daemon fills
//! in the handful of supported placeholders. Unknown placeholders are
//! left alone so a typo shows up verbatim in game instead of crashing
//! the loop.

use chrono::{DateTime, Duration, Utc};

use crate::humanize::{natural_delta, natural_time};

/// Stand-in when a reward recipient never appeared in the player list.
pub const UNKNOWN_PLAYER_NAME: &str = "No player name found";

/// Expands `{vip_reward}` and `{vip_expiration}` in a player-facing
/// message. The nice flags switch between natural language and exact
/// values (`H:MM:SS` spans, RFC 3339 timestamps).
pub fn render_player_message(
    template: &str,
    vip_reward: Duration,
    vip_expiration: DateTime<Utc>,
    nice_time_delta: bool,
    nice_expiration_date: bool,
    now: DateTime<Utc>,
) -> String {
    let reward = if nice_time_delta {
        natural_delta(vip_reward)
    } else {
        plain_span(vip_reward)
    };
    let expiration = if nice_expiration_date {
        natural_time(vip_expiration, now)
    } else {
        vip_expiration.to_rfc3339()
    };
    template
        .replace("{vip_reward}", &reward)
        .replace("{vip_expiration}", &expiration)
}

/// Expands `{player_name}` in the VIP entry description template.
pub fn render_vip_grant_name(template: &str, player_name: &str) -> String {
    template.replace("{player_name}", player_name)
}

/// Expands `{player_count}` in the seeding progress announcement.
pub fn render_progress_message(template: &str, player_count: u32) -> String {
    template.replace("{player_count}", &player_count.to_string())
}

/// Expands the per-faction counts in the "Players Per Team" field.
pub fn render_player_count(template: &str, allied: u32, axis: u32) -> String {
    template
        .replace("{num_allied_players}", &allied.to_string())
        .replace("{num_axis_players}", &axis.to_string())
}

fn plain_span(delta: Duration) -> String {
    let secs = delta.num_seconds().max(0);
    format!("{}:{:02}:{:02}", secs / 3_600, (secs % 3_600) / 60, secs % 60)
}
