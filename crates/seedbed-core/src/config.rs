//! Seeding policy parameters.

use chrono::Duration;

/// Everything the lifecycle logic needs to make its decisions.
///
/// Loaded once at startup (see the `seedbed-config` crate for the file
/// schema and validation) and read-only afterwards. Durations are signed
/// [`chrono::Duration`]s so they subtract cleanly against timestamps, but
/// a validated config only ever carries non-negative values.
#[derive(Debug, Clone)]
pub struct SeedingConfig {
    /// Lower population bound per faction. Only consulted when
    /// `gate_on_population_bounds` is set.
    pub min_allies: u32,
    pub min_axis: u32,
    /// Upper population bound per faction. The server counts as seeded
    /// once *both* factions reach their ceiling.
    pub max_allies: u32,
    pub max_axis: u32,
    /// Minimum current-session play time before a player earns
    /// eligibility.
    pub minimum_play_time: Duration,
    /// When true, only players online (and qualified) at the moment the
    /// server seeds are rewarded. When false, anyone who qualified on any
    /// earlier tick stays eligible even after leaving.
    pub online_when_seeded: bool,
    /// When true, a tick whose population falls outside the min/max
    /// bounds accrues no eligibility.
    pub gate_on_population_bounds: bool,
    /// When true, repeat rewards stack onto the existing expiration
    /// instead of extending it to a fresh window.
    pub cumulative_vip: bool,
    /// Length of one VIP reward.
    pub vip_reward: Duration,
    /// Grace window after a successful seed during which a population dip
    /// does not restart the seeding cycle.
    pub buffer: Duration,
    /// Population milestones for progress announcements, strictly
    /// ascending. May be empty to disable progress posts.
    pub player_buckets: Vec<u32>,
}

impl Default for SeedingConfig {
    fn default() -> Self {
        Self {
            min_allies: 0,
            min_axis: 0,
            max_allies: 20,
            max_axis: 20,
            minimum_play_time: Duration::minutes(5),
            online_when_seeded: false,
            gate_on_population_bounds: false,
            cumulative_vip: false,
            vip_reward: Duration::hours(24),
            buffer: Duration::minutes(10),
            player_buckets: vec![10, 20, 30],
        }
    }
}
