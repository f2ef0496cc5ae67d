//! Reward-eligibility accumulation across poll ticks.

use std::collections::BTreeSet;
use std::mem;

use crate::conditions::meets_play_time;
use crate::config::SeedingConfig;
use crate::types::{PlayerId, ServerPopulation};

/// The set of identities that have earned a reward so far this episode.
///
/// Fed one [`ServerPopulation`] per tick. In cumulative mode (the
/// default) it unions each tick's qualifying players, so someone who put
/// their time in early and left still gets rewarded when the server
/// finally seeds. With `online_when_seeded` the set is replaced wholesale
/// each tick and history does not count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligibleSet {
    ids: BTreeSet<PlayerId>,
}

impl EligibleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one tick's player list into the set.
    pub fn observe(&mut self, config: &SeedingConfig, population: &ServerPopulation) {
        let qualifying = population
            .iter()
            .filter(|p| meets_play_time(config, p))
            .map(|p| p.id.clone());

        if config.online_when_seeded {
            self.ids = qualifying.collect();
        } else {
            self.ids.extend(qualifying);
        }
    }

    /// Empties the set, returning the accumulated identities.
    pub fn drain(&mut self) -> BTreeSet<PlayerId> {
        mem::take(&mut self.ids)
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &BTreeSet<PlayerId> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
