//! The seeding ⇄ seeded state machine.
//!
//! One [`SeedingSession`] lives for the whole process and is advanced
//! exactly once per poll tick. The advance is edge-triggered: crossing
//! into "seeded" fires the reward distribution exactly once, and falling
//! back out of it re-arms the cycle (subject to the re-entry buffer).
//!
//! `advance` performs no I/O. It returns a [`TickOutcome`] whose actions
//! the caller executes in order; that keeps every transition testable
//! with nothing but timestamps and snapshots.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::buckets::BucketSequencer;
use crate::conditions::{is_seeded, population_within_bounds};
use crate::config::SeedingConfig;
use crate::eligibility::EligibleSet;
use crate::types::{PlayerId, PopulationSnapshot, ServerPopulation};

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Which half of the lifecycle the server is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedPhase {
    /// Below full population; eligibility is accruing toward the next
    /// seeded edge and progress milestones may be announced.
    Seeding,
    /// At (or recently at) full population; the session idles until the
    /// population dips back out past the buffer.
    Seeded,
}

impl fmt::Display for SeedPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedPhase::Seeding => write!(f, "seeding"),
            SeedPhase::Seeded => write!(f, "seeded"),
        }
    }
}

// ---------------------------------------------------------------------------
// Side-effect plan
// ---------------------------------------------------------------------------

/// One side effect the caller must perform after an advance.
///
/// Ordering within a [`TickOutcome`] matters: rewards are distributed
/// before the completion announcement goes out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickAction {
    /// The server just seeded. Grant VIP to the accumulated identities
    /// (see [`plan_rewards`](crate::plan_rewards)) and message players.
    DistributeRewards {
        eligible: BTreeSet<PlayerId>,
        seeded_at: DateTime<Utc>,
    },
    /// Post the "seeding complete" announcement.
    AnnounceSeeded,
    /// Post a "seeding in progress" announcement for a reached milestone.
    AnnounceProgress { bucket: u32, total_players: u32 },
}

/// What one tick decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    /// Phase after the tick; selects the next poll interval.
    pub phase: SeedPhase,
    /// Side effects to execute, in order. Usually empty.
    pub actions: Vec<TickAction>,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Controller state spanning many ticks: current phase, accumulated
/// eligibility, the last seeded timestamp, and the announcement cursor.
///
/// All of it is in-memory by design. A restart forgets eligibility and
/// the bucket cursor but cannot corrupt anything durable; VIP grants
/// already made live on the remote server.
#[derive(Debug, Clone)]
pub struct SeedingSession {
    phase: SeedPhase,
    eligible: EligibleSet,
    seeded_at: Option<DateTime<Utc>>,
    buckets: BucketSequencer,
}

impl SeedingSession {
    /// Creates the session from the first game-state probe at startup.
    /// A server that is already full starts out idle; anything else
    /// starts seeding immediately, even an empty server.
    pub fn new(config: &SeedingConfig, initially_seeded: bool) -> Self {
        let phase = if initially_seeded {
            SeedPhase::Seeded
        } else {
            SeedPhase::Seeding
        };
        tracing::info!(%phase, "seeding session started");
        Self {
            phase,
            eligible: EligibleSet::new(),
            seeded_at: None,
            buckets: BucketSequencer::new(config.player_buckets.clone()),
        }
    }

    pub fn phase(&self) -> SeedPhase {
        self.phase
    }

    pub fn eligible(&self) -> &EligibleSet {
        &self.eligible
    }

    pub fn seeded_at(&self) -> Option<DateTime<Utc>> {
        self.seeded_at
    }

    /// Runs one tick of the lifecycle against fresh observations.
    ///
    /// In order: fold the player list into the eligible set, take the
    /// seeded edge or the (buffered) re-entry edge if one is due, then
    /// while seeding check whether a progress milestone fired.
    pub fn advance(
        &mut self,
        config: &SeedingConfig,
        population: &ServerPopulation,
        snapshot: &PopulationSnapshot,
        now: DateTime<Utc>,
    ) -> TickOutcome {
        let mut actions = Vec::new();

        if config.gate_on_population_bounds
            && !population_within_bounds(config, snapshot)
        {
            tracing::debug!(
                allied = snapshot.allied,
                axis = snapshot.axis,
                "population outside bounds, no eligibility accrued this tick"
            );
        } else {
            self.eligible.observe(config, population);
        }

        let seeded_now = is_seeded(config, snapshot);
        tracing::debug!(
            phase = %self.phase,
            allied = snapshot.allied,
            axis = snapshot.axis,
            online = population.len(),
            eligible = self.eligible.len(),
            seeded_now,
            "tick"
        );

        match self.phase {
            SeedPhase::Seeding if seeded_now => {
                self.seeded_at = Some(now);
                let eligible = self.eligible.drain();
                tracing::info!(
                    seeded_at = %now.to_rfc3339(),
                    rewardable = eligible.len(),
                    "server seeded"
                );
                actions.push(TickAction::DistributeRewards {
                    eligible,
                    seeded_at: now,
                });
                actions.push(TickAction::AnnounceSeeded);
                self.buckets.reset();
                self.phase = SeedPhase::Seeded;
            }
            SeedPhase::Seeded if !seeded_now && snapshot.total() > 0 => {
                match self.seeded_at {
                    Some(seeded_at) if now - seeded_at <= config.buffer => {
                        tracing::info!(
                            seeded_at = %seeded_at.to_rfc3339(),
                            buffer_secs = config.buffer.num_seconds(),
                            "population dipped inside the post-seed buffer, staying idle"
                        );
                    }
                    _ => {
                        tracing::info!(
                            total = snapshot.total(),
                            "server needs seeding again"
                        );
                        self.phase = SeedPhase::Seeding;
                    }
                }
            }
            _ => {}
        }

        if self.phase == SeedPhase::Seeding {
            let total = snapshot.total();
            self.buckets.resync(total);
            if let Some(bucket) = self.buckets.try_announce(total) {
                tracing::info!(bucket, total, "progress milestone reached");
                actions.push(TickAction::AnnounceProgress {
                    bucket,
                    total_players: total,
                });
            }
        }

        TickOutcome {
            phase: self.phase,
            actions,
        }
    }
}
