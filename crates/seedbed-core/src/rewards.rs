//! Turning an eligible set into concrete VIP grants.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use crate::conditions::has_indefinite_vip;
use crate::config::SeedingConfig;
use crate::expiration::next_expiration;
use crate::types::{PlayerId, ServerPopulation, VipRecord};

/// One VIP grant to perform against the remote server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VipGrant {
    pub id: PlayerId,
    /// The name already stored with the player's VIP entry, when one
    /// exists. Grants for first-time VIPs carry `None` and the caller
    /// renders a fresh description instead.
    pub existing_name: Option<String>,
    pub expires_at: DateTime<Utc>,
}

/// The full set of effects for one seeded edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewardPlan {
    /// Grants to perform, in identity order. Includes eligible players
    /// who already left the server.
    pub grants: Vec<VipGrant>,
    /// Online players who get the thanks-but-no-reward message.
    pub passed_over: Vec<PlayerId>,
    /// Eligible players skipped because their VIP never expires.
    pub skipped_indefinite: Vec<PlayerId>,
}

impl RewardPlan {
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
            && self.passed_over.is_empty()
            && self.skipped_indefinite.is_empty()
    }
}

/// Indexes a VIP list by identity for the lookups below.
pub fn index_vips(
    records: impl IntoIterator<Item = VipRecord>,
) -> BTreeMap<PlayerId, VipRecord> {
    records
        .into_iter()
        .map(|record| (record.id.clone(), record))
        .collect()
}

/// Computes the grants and messages owed at a seeded edge.
///
/// Indefinite-VIP holders are dropped from the eligible set before
/// anything else; every remaining eligible identity gets a grant whose
/// expiration is computed against that player's own existing grant.
/// Online players outside the (restricted) eligible set are collected as
/// `passed_over` so they still get a thank-you message.
pub fn plan_rewards(
    config: &SeedingConfig,
    eligible: &BTreeSet<PlayerId>,
    online: &ServerPopulation,
    current_vips: &BTreeMap<PlayerId, VipRecord>,
    seeded_at: DateTime<Utc>,
) -> RewardPlan {
    let mut grants = Vec::new();
    let mut skipped_indefinite = Vec::new();

    for id in eligible {
        let existing = current_vips.get(id);
        if has_indefinite_vip(existing) {
            tracing::info!(
                player_id = %id,
                "skipping reward, player holds indefinite VIP"
            );
            skipped_indefinite.push(id.clone());
            continue;
        }
        let expires_at = next_expiration(
            config,
            existing.and_then(|record| record.expires_at),
            seeded_at,
        );
        grants.push(VipGrant {
            id: id.clone(),
            existing_name: existing.map(|record| record.name.clone()),
            expires_at,
        });
    }

    let rewarded: BTreeSet<&PlayerId> =
        grants.iter().map(|grant| &grant.id).collect();
    let passed_over = online
        .ids()
        .filter(|id| !rewarded.contains(id))
        .cloned()
        .collect();

    RewardPlan {
        grants,
        passed_over,
        skipped_indefinite,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Player, indefinite_vip_cutoff};
    use chrono::{Duration, TimeZone};

    fn config() -> SeedingConfig {
        SeedingConfig::default() // 24h reward, non-cumulative
    }

    fn seeded_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap()
    }

    fn online(ids: &[&str]) -> ServerPopulation {
        ServerPopulation::from_players(ids.iter().map(|id| Player {
            id: (*id).into(),
            name: (*id).to_uppercase(),
            play_time_secs: 600,
        }))
    }

    fn eligible(ids: &[&str]) -> BTreeSet<PlayerId> {
        ids.iter().map(|id| (*id).into()).collect()
    }

    fn vip(id: &str, expires_at: Option<DateTime<Utc>>) -> VipRecord {
        VipRecord {
            id: id.into(),
            name: format!("{id} (vip)"),
            expires_at,
        }
    }

    #[test]
    fn test_fresh_players_get_full_window() {
        let plan = plan_rewards(
            &config(),
            &eligible(&["a", "b"]),
            &online(&["a", "b"]),
            &BTreeMap::new(),
            seeded_at(),
        );

        assert_eq!(plan.grants.len(), 2);
        for grant in &plan.grants {
            assert_eq!(grant.expires_at, seeded_at() + Duration::hours(24));
            assert_eq!(grant.existing_name, None);
        }
        assert!(plan.passed_over.is_empty());
        assert!(plan.skipped_indefinite.is_empty());
    }

    #[test]
    fn test_existing_vip_keeps_stored_name_and_extends() {
        let vips = index_vips([vip(
            "a",
            Some(seeded_at() + Duration::hours(1)),
        )]);

        let plan = plan_rewards(
            &config(),
            &eligible(&["a"]),
            &online(&["a"]),
            &vips,
            seeded_at(),
        );

        let [grant] = plan.grants.as_slice() else {
            panic!("expected one grant");
        };
        assert_eq!(grant.existing_name.as_deref(), Some("a (vip)"));
        assert_eq!(grant.expires_at, seeded_at() + Duration::hours(24));
    }

    #[test]
    fn test_indefinite_holder_is_skipped_but_messaged() {
        let vips = index_vips([vip("a", Some(indefinite_vip_cutoff()))]);

        let plan = plan_rewards(
            &config(),
            &eligible(&["a", "b"]),
            &online(&["a", "b"]),
            &vips,
            seeded_at(),
        );

        assert_eq!(plan.grants.len(), 1);
        assert_eq!(plan.grants[0].id, PlayerId::new("b"));
        assert_eq!(plan.skipped_indefinite, vec![PlayerId::new("a")]);
        // Not rewarded, still online: ends up in the passed-over group.
        assert_eq!(plan.passed_over, vec![PlayerId::new("a")]);
    }

    #[test]
    fn test_offline_eligible_player_is_still_granted() {
        // "a" qualified earlier and left before the edge.
        let plan = plan_rewards(
            &config(),
            &eligible(&["a", "b"]),
            &online(&["b", "c"]),
            &BTreeMap::new(),
            seeded_at(),
        );

        let granted: Vec<&str> =
            plan.grants.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(granted, vec!["a", "b"]);
        assert_eq!(plan.passed_over, vec![PlayerId::new("c")]);
    }

    #[test]
    fn test_empty_eligible_set_messages_everyone_online() {
        let plan = plan_rewards(
            &config(),
            &BTreeSet::new(),
            &online(&["a", "b"]),
            &BTreeMap::new(),
            seeded_at(),
        );

        assert!(plan.grants.is_empty());
        assert_eq!(
            plan.passed_over,
            vec![PlayerId::new("a"), PlayerId::new("b")]
        );
    }
}
