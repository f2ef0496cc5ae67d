//! Pure predicates over per-tick observations.
//!
//! Each of these answers one question about a snapshot and nothing else;
//! the session state machine composes them.

use crate::config::SeedingConfig;
use crate::types::{Player, PopulationSnapshot, VipRecord, indefinite_vip_cutoff};

/// True once *both* factions have reached their configured ceiling.
///
/// There is deliberately no total-player shortcut: 39 allies and 1 axis
/// is not a seeded server, however full it looks in total.
pub fn is_seeded(config: &SeedingConfig, snapshot: &PopulationSnapshot) -> bool {
    snapshot.allied >= config.max_allies && snapshot.axis >= config.max_axis
}

/// True when both faction counts sit inside their `min..=max` window.
pub fn population_within_bounds(
    config: &SeedingConfig,
    snapshot: &PopulationSnapshot,
) -> bool {
    (config.min_allies..=config.max_allies).contains(&snapshot.allied)
        && (config.min_axis..=config.max_axis).contains(&snapshot.axis)
}

/// True when the player has been on the server long enough this session.
pub fn meets_play_time(config: &SeedingConfig, player: &Player) -> bool {
    player.play_time_secs >= config.minimum_play_time.num_seconds()
}

/// True when the record holds an explicit never-expires grant.
///
/// Absent records and absent expirations are both `false`; only a stored
/// expiration at or past the year-3000 sentinel counts as indefinite.
pub fn has_indefinite_vip(record: Option<&VipRecord>) -> bool {
    match record.and_then(|r| r.expires_at) {
        Some(expires_at) => expires_at >= indefinite_vip_cutoff(),
        None => false,
    }
}
