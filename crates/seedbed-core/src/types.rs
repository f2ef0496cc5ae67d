//! Core domain types shared across the workspace.
//!
//! Everything here is a plain value type. The admin-API crate decodes its
//! wire payloads into these; the session logic never sees raw JSON.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// A player's stable identity on the remote server.
///
/// The admin API hands these out as opaque strings (17-digit Steam IDs or
/// GamePass UUIDs). The newtype keeps them from being mixed up with other
/// strings like display names, which *do* change between ticks.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

// ---------------------------------------------------------------------------
// Per-tick observations
// ---------------------------------------------------------------------------

/// One online player as reported by a single poll of the player list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Seconds played in the current session, per the server's profile data.
    pub play_time_secs: i64,
}

/// The full online-player list from one poll, keyed by identity.
///
/// Refreshed every tick and immediately consumed; never cached.
#[derive(Debug, Clone, Default)]
pub struct ServerPopulation {
    players: BTreeMap<PlayerId, Player>,
}

impl ServerPopulation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a population from a player list. Later entries win if the
    /// server ever reports the same identity twice.
    pub fn from_players(players: impl IntoIterator<Item = Player>) -> Self {
        Self {
            players: players
                .into_iter()
                .map(|p| (p.id.clone(), p))
                .collect(),
        }
    }

    pub fn get(&self, id: &PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.players.contains_key(id)
    }

    /// Iterates players in identity order (deterministic across runs).
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &PlayerId> {
        self.players.keys()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Faction head counts from one poll of the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationSnapshot {
    pub allied: u32,
    pub axis: u32,
}

impl PopulationSnapshot {
    pub fn new(allied: u32, axis: u32) -> Self {
        Self { allied, axis }
    }

    pub fn total(&self) -> u32 {
        self.allied + self.axis
    }
}

// ---------------------------------------------------------------------------
// VIP state on the remote server
// ---------------------------------------------------------------------------

/// A player's existing VIP grant as stored on the remote server.
///
/// `expires_at` of `None` means the server holds a grant with no
/// expiration attached. That is distinct from the indefinite *sentinel*
/// below, which is an explicit far-future date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VipRecord {
    pub id: PlayerId,
    pub name: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// 3000-01-01T00:00:00Z as Unix seconds.
///
/// Community admin tools use this date as the "never expires" marker. Any
/// stored expiration at or beyond it is treated as a permanent grant and
/// must never be overwritten by a seeding reward.
pub const INDEFINITE_VIP_EPOCH_SECS: i64 = 32_503_680_000;

/// The indefinite-VIP cutoff as a timestamp.
pub fn indefinite_vip_cutoff() -> DateTime<Utc> {
    DateTime::from_timestamp(INDEFINITE_VIP_EPOCH_SECS, 0)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_display_is_raw() {
        let id = PlayerId::new("76561198000000001");
        assert_eq!(id.to_string(), "76561198000000001");
    }

    #[test]
    fn test_player_id_serde_is_transparent() {
        let id = PlayerId::new("abc123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""abc123""#);
        let back: PlayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_population_from_players_keys_by_id() {
        let pop = ServerPopulation::from_players([
            Player {
                id: "b".into(),
                name: "Bravo".into(),
                play_time_secs: 10,
            },
            Player {
                id: "a".into(),
                name: "Alpha".into(),
                play_time_secs: 20,
            },
        ]);
        assert_eq!(pop.len(), 2);
        assert!(pop.contains(&"a".into()));
        // BTreeMap ordering: iteration is sorted by identity.
        let names: Vec<&str> =
            pop.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Bravo"]);
    }

    #[test]
    fn test_snapshot_total() {
        assert_eq!(PopulationSnapshot::new(17, 19).total(), 36);
        assert_eq!(PopulationSnapshot::new(0, 0).total(), 0);
    }

    #[test]
    fn test_indefinite_cutoff_is_year_3000() {
        let cutoff = indefinite_vip_cutoff();
        assert_eq!(cutoff.to_rfc3339(), "3000-01-01T00:00:00+00:00");
    }
}
