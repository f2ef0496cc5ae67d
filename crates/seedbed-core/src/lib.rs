//! Seeding lifecycle logic for Seedbed.
//!
//! This crate is the decision-making half of the daemon. It knows nothing
//! about HTTP, webhooks, or config files; it folds population snapshots
//! into an in-memory [`SeedingSession`] and tells the caller which side
//! effects are due on each poll tick:
//!
//! 1. **Conditions**: pure predicates over a snapshot ([`is_seeded`] etc.)
//! 2. **Eligibility**: who has earned a reward so far ([`EligibleSet`])
//! 3. **Expiration**: what a player's new VIP expiry is ([`next_expiration`])
//! 4. **Buckets**: which population milestone to announce ([`BucketSequencer`])
//! 5. **Session**: the seeding ⇄ seeded edge itself ([`SeedingSession`])
//!
//! The session's [`advance`](SeedingSession::advance) is a pure transition:
//! it mutates only the session and returns a [`TickOutcome`] listing the
//! actions (reward distribution, announcements) for the caller to execute.
//! That split keeps every invariant in this crate testable without a
//! network in sight.

mod buckets;
mod conditions;
mod config;
mod eligibility;
mod expiration;
mod rewards;
mod session;
mod types;

pub use buckets::BucketSequencer;
pub use conditions::{
    has_indefinite_vip, is_seeded, meets_play_time, population_within_bounds,
};
pub use config::SeedingConfig;
pub use eligibility::EligibleSet;
pub use expiration::next_expiration;
pub use rewards::{RewardPlan, VipGrant, index_vips, plan_rewards};
pub use session::{SeedPhase, SeedingSession, TickAction, TickOutcome};
pub use types::{
    INDEFINITE_VIP_EPOCH_SECS, Player, PlayerId, PopulationSnapshot,
    ServerPopulation, VipRecord, indefinite_vip_cutoff,
};
