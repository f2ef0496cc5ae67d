//! The daemon loop.
//!
//! [`Seeder`] ties the layers together: poll the admin API, advance the
//! lifecycle state machine, execute whatever side effects the tick
//! decided on, sleep, repeat. It is generic over the API client and the
//! notification sink so the whole loop runs against scripted fakes in
//! the integration tests.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};
use seedbed_config::AppConfig;
use seedbed_core::{
    PlayerId, PopulationSnapshot, SeedPhase, SeedingSession, ServerPopulation,
    TickAction, index_vips, is_seeded, plan_rewards,
};
use seedbed_notify::{
    NotifySink, UNKNOWN_PLAYER_NAME, render_player_message,
    render_progress_message, render_vip_grant_name, seed_announcement_embed,
};
use seedbed_rcon::AdminApi;

use crate::error::SeedbedError;

/// The seeding daemon: one session, one API client, one sink.
pub struct Seeder<A, N> {
    config: AppConfig,
    api: A,
    sink: N,
    session: SeedingSession,
    /// Last seen display name per identity, folded in every tick.
    /// Grant descriptions fall back to this when the player has no
    /// existing VIP entry to take a name from.
    name_lookup: HashMap<PlayerId, String>,
}

impl<A, N> Seeder<A, N>
where
    A: AdminApi,
    N: NotifySink,
{
    /// Probes the game state once to pick the starting phase, then
    /// returns a ready-to-run daemon. A server already at capacity
    /// starts idle instead of instantly rewarding whoever is on.
    pub async fn bootstrap(
        config: AppConfig,
        api: A,
        sink: N,
    ) -> Result<Self, SeedbedError> {
        let snapshot = api.fetch_population().await?;
        let initially_seeded = is_seeded(&config.seeding, &snapshot);
        let session = SeedingSession::new(&config.seeding, initially_seeded);
        Ok(Self {
            config,
            api,
            sink,
            session,
            name_lookup: HashMap::new(),
        })
    }

    /// Runs ticks until Ctrl-C or a fatal error.
    pub async fn run(mut self) -> Result<(), SeedbedError> {
        loop {
            let wait = self.tick().await?;
            tracing::debug!(sleep_secs = wait.as_secs(), "tick complete, sleeping");
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("shutdown requested");
                    return Ok(());
                }
                _ = tokio::time::sleep(wait) => {}
            }
        }
    }

    /// One poll cycle. Returns how long to sleep before the next one.
    pub async fn tick(&mut self) -> Result<StdDuration, SeedbedError> {
        let (population, snapshot) = tokio::try_join!(
            self.api.fetch_online_players(),
            self.api.fetch_population()
        )?;

        for player in population.iter() {
            self.name_lookup
                .insert(player.id.clone(), player.name.clone());
        }

        let outcome = self.session.advance(
            &self.config.seeding,
            &population,
            &snapshot,
            Utc::now(),
        );

        for action in outcome.actions {
            match action {
                TickAction::DistributeRewards { eligible, seeded_at } => {
                    self.distribute_rewards(&eligible, &population, seeded_at)
                        .await?;
                }
                TickAction::AnnounceSeeded => {
                    let title =
                        self.config.discord.seeding_complete_message.clone();
                    self.announce(&title, &snapshot).await?;
                }
                TickAction::AnnounceProgress { total_players, .. } => {
                    let title = render_progress_message(
                        &self.config.discord.seeding_in_progress_message,
                        total_players,
                    );
                    self.announce(&title, &snapshot).await?;
                }
            }
        }

        Ok(match outcome.phase {
            SeedPhase::Seeding => self.config.runtime.poll_time_seeding,
            SeedPhase::Seeded => self.config.runtime.poll_time_seeded,
        })
    }

    // -----------------------------------------------------------------
    // Side effects
    // -----------------------------------------------------------------

    async fn distribute_rewards(
        &self,
        eligible: &BTreeSet<PlayerId>,
        online: &ServerPopulation,
        seeded_at: DateTime<Utc>,
    ) -> Result<(), SeedbedError> {
        let vips = index_vips(self.api.fetch_vip_records().await?);
        let plan = plan_rewards(
            &self.config.seeding,
            eligible,
            online,
            &vips,
            seeded_at,
        );
        tracing::info!(
            grants = plan.grants.len(),
            passed_over = plan.passed_over.len(),
            skipped_indefinite = plan.skipped_indefinite.len(),
            dry_run = self.config.runtime.dry_run,
            "distributing seed rewards"
        );

        for grant in &plan.grants {
            // Keep the name already stored on the VIP entry; only
            // first-time VIPs get the rendered description.
            let description = match &grant.existing_name {
                Some(name) => name.clone(),
                None => render_vip_grant_name(
                    &self.config.reward.player_name_not_current_vip,
                    self.display_name(&grant.id),
                ),
            };

            if self.config.runtime.dry_run {
                tracing::info!(
                    player_id = %grant.id,
                    description,
                    expires_at = %grant.expires_at.to_rfc3339(),
                    "dry run, skipping VIP grant"
                );
            } else {
                self.api
                    .grant_or_update_vip(
                        &grant.id,
                        &description,
                        Some(grant.expires_at),
                        self.config.reward.forward,
                    )
                    .await?;
                tracing::info!(
                    player_id = %grant.id,
                    expires_at = %grant.expires_at.to_rfc3339(),
                    "VIP granted"
                );
            }

            let message = render_player_message(
                &self.config.messages.reward,
                self.config.seeding.vip_reward,
                grant.expires_at,
                self.config.reward.nice_time_delta,
                self.config.reward.nice_expiration_date,
                Utc::now(),
            );
            self.send_message(&grant.id, &message).await?;
        }

        // Indefinite-VIP holders who are online already sit in
        // passed_over, so one thank-you each, no reward spam.
        for id in &plan.passed_over {
            self.send_message(id, &self.config.messages.non_vip).await?;
        }

        Ok(())
    }

    async fn send_message(
        &self,
        id: &PlayerId,
        message: &str,
    ) -> Result<(), SeedbedError> {
        if self.config.runtime.dry_run {
            tracing::info!(player_id = %id, message, "dry run, skipping message");
            return Ok(());
        }
        self.api.send_player_message(id, message).await?;
        Ok(())
    }

    /// Posts an announcement embed. Delivery is best-effort: a webhook
    /// failure is logged and the loop carries on, but a failed
    /// map-context fetch propagates like any other API error.
    async fn announce(
        &self,
        title: &str,
        snapshot: &PopulationSnapshot,
    ) -> Result<(), SeedbedError> {
        if !self.sink.is_configured() {
            return Ok(());
        }

        let context = self.api.fetch_map_context().await?;
        let Some(embed) = seed_announcement_embed(
            title,
            &context.map_name,
            &context.time_remaining,
            &self.config.discord.player_count_message,
            snapshot.allied,
            snapshot.axis,
            Utc::now(),
        ) else {
            return Ok(());
        };

        if let Err(error) = self.sink.post(&embed).await {
            tracing::warn!(%error, "announcement not delivered");
        }
        Ok(())
    }

    fn display_name(&self, id: &PlayerId) -> &str {
        self.name_lookup
            .get(id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_PLAYER_NAME)
    }
}
