//! The CRCON admin API client.
//!
//! CRCON wraps every payload in a `{"result": ...}` envelope and expects
//! a `Bearer: <key>` authorization header (with the colon; the upstream
//! panel is particular about it). The client decodes envelopes into the
//! core domain types and hides the retry policy behind the [`AdminApi`]
//! trait so the daemon loop can run against a mock in tests.

use chrono::{DateTime, Utc};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use seedbed_core::{
    Player, PlayerId, PopulationSnapshot, ServerPopulation, VipRecord,
};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use crate::error::ApiError;
use crate::retry::{RetryPolicy, retry_with_backoff};

// Endpoint paths, relative to the panel's base URL.
const GET_GAMESTATE: &str = "api/get_gamestate";
const GET_PLAYERS: &str = "api/get_players";
const GET_VIP_IDS: &str = "api/get_vip_ids";
const GET_PUBLIC_INFO: &str = "api/get_public_info";
const DO_ADD_VIP: &str = "api/do_add_vip";
const DO_MESSAGE_PLAYER: &str = "api/do_message_player";

const REQUEST_TIMEOUT: std::time::Duration =
    std::time::Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Everything the daemon needs from the remote admin API.
///
/// [`RconClient`] is the real implementation; tests script a mock. All
/// methods are already retry-wrapped, so an `Err` from any of them is
/// non-transient and worth crashing over.
pub trait AdminApi {
    /// Current faction head counts from the game state.
    async fn fetch_population(&self) -> Result<PopulationSnapshot, ApiError>;

    /// The full online-player list with per-player play time.
    async fn fetch_online_players(&self)
    -> Result<ServerPopulation, ApiError>;

    /// Every VIP entry the server currently holds.
    async fn fetch_vip_records(&self) -> Result<Vec<VipRecord>, ApiError>;

    /// Map name and round clock, for announcement embeds only.
    async fn fetch_map_context(&self) -> Result<MapContext, ApiError>;

    /// Creates or replaces a VIP entry. `expires_at` of `None` stores a
    /// grant without an expiration.
    async fn grant_or_update_vip(
        &self,
        player_id: &PlayerId,
        description: &str,
        expires_at: Option<DateTime<Utc>>,
        forward: bool,
    ) -> Result<(), ApiError>;

    /// Sends an in-game message to one player.
    async fn send_player_message(
        &self,
        player_id: &PlayerId,
        message: &str,
    ) -> Result<(), ApiError>;
}

/// What the server looks like right now, for notification content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapContext {
    pub map_name: String,
    /// Round clock rendered as `H:MM:SS`.
    pub time_remaining: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Admin API client over HTTP.
pub struct RconClient {
    http: reqwest::Client,
    /// Base URL with a guaranteed trailing slash.
    base: String,
    retry: RetryPolicy,
}

impl RconClient {
    pub fn new(base_url: Url, api_key: &str) -> Result<Self, ApiError> {
        Self::with_retry(base_url, api_key, RetryPolicy::default())
    }

    pub fn with_retry(
        base_url: Url,
        api_key: &str,
        retry: RetryPolicy,
    ) -> Result<Self, ApiError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer: {api_key}"))
            .map_err(|_| ApiError::InvalidApiKey)?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| ApiError::Transport {
                endpoint: "client setup",
                source,
            })?;

        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self { http, base, retry })
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base, endpoint)
    }

    async fn get_payload<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .get(self.url_for(endpoint))
            .send()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { endpoint, status });
        }
        let body = response
            .bytes()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })?;
        decode_result(endpoint, &body)
    }

    async fn post_command<B: Serialize>(
        &self,
        endpoint: &'static str,
        body: &B,
    ) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url_for(endpoint))
            .json(body)
            .send()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { endpoint, status });
        }
        Ok(())
    }
}

impl AdminApi for RconClient {
    async fn fetch_population(&self) -> Result<PopulationSnapshot, ApiError> {
        let dto: GamestateDto =
            retry_with_backoff(&self.retry, GET_GAMESTATE, || {
                self.get_payload(GET_GAMESTATE)
            })
            .await?;
        Ok(PopulationSnapshot::new(
            dto.num_allied_players,
            dto.num_axis_players,
        ))
    }

    async fn fetch_online_players(
        &self,
    ) -> Result<ServerPopulation, ApiError> {
        let dtos: Vec<OnlinePlayerDto> =
            retry_with_backoff(&self.retry, GET_PLAYERS, || {
                self.get_payload(GET_PLAYERS)
            })
            .await?;
        Ok(population_from_dtos(dtos))
    }

    async fn fetch_vip_records(&self) -> Result<Vec<VipRecord>, ApiError> {
        let dtos: Vec<VipEntryDto> =
            retry_with_backoff(&self.retry, GET_VIP_IDS, || {
                self.get_payload(GET_VIP_IDS)
            })
            .await?;
        Ok(dtos.into_iter().map(VipEntryDto::into_record).collect())
    }

    async fn fetch_map_context(&self) -> Result<MapContext, ApiError> {
        let dto: PublicInfoDto =
            retry_with_backoff(&self.retry, GET_PUBLIC_INFO, || {
                self.get_payload(GET_PUBLIC_INFO)
            })
            .await?;
        Ok(MapContext {
            map_name: dto.current_map.map.pretty_name,
            time_remaining: format_clock(dto.time_remaining),
        })
    }

    async fn grant_or_update_vip(
        &self,
        player_id: &PlayerId,
        description: &str,
        expires_at: Option<DateTime<Utc>>,
        forward: bool,
    ) -> Result<(), ApiError> {
        let body = AddVipBody {
            forward,
            player_id,
            description,
            expiration: expires_at.map(|at| at.to_rfc3339()),
        };
        retry_with_backoff(&self.retry, DO_ADD_VIP, || {
            self.post_command(DO_ADD_VIP, &body)
        })
        .await
    }

    async fn send_player_message(
        &self,
        player_id: &PlayerId,
        message: &str,
    ) -> Result<(), ApiError> {
        let body = MessageBody { player_id, message };
        retry_with_backoff(&self.retry, DO_MESSAGE_PLAYER, || {
            self.post_command(DO_MESSAGE_PLAYER, &body)
        })
        .await
    }
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

/// CRCON wraps everything in `{"result": ...}`; extra fields like
/// `failed` and `command` ride along and are ignored.
#[derive(Debug, serde::Deserialize)]
struct Envelope<T> {
    result: Option<T>,
}

fn decode_result<T: DeserializeOwned>(
    endpoint: &'static str,
    body: &[u8],
) -> Result<T, ApiError> {
    let envelope: Envelope<T> = serde_json::from_slice(body)
        .map_err(|source| ApiError::Decode { endpoint, source })?;
    envelope.result.ok_or(ApiError::Payload {
        endpoint,
        reason: "missing result field",
    })
}

#[derive(Debug, serde::Deserialize)]
struct GamestateDto {
    num_allied_players: u32,
    num_axis_players: u32,
}

#[derive(Debug, serde::Deserialize)]
struct OnlinePlayerDto {
    name: String,
    player_id: PlayerId,
    profile: Option<ProfileDto>,
}

#[derive(Debug, serde::Deserialize)]
struct ProfileDto {
    #[serde(default)]
    current_playtime_seconds: i64,
}

#[derive(Debug, serde::Deserialize)]
struct VipEntryDto {
    player_id: PlayerId,
    name: String,
    vip_expiration: Option<DateTime<Utc>>,
}

impl VipEntryDto {
    fn into_record(self) -> VipRecord {
        VipRecord {
            id: self.player_id,
            name: self.name,
            expires_at: self.vip_expiration,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct PublicInfoDto {
    current_map: PublicMapDto,
    time_remaining: f64,
}

#[derive(Debug, serde::Deserialize)]
struct PublicMapDto {
    map: MapLayerDto,
}

#[derive(Debug, serde::Deserialize)]
struct MapLayerDto {
    pretty_name: String,
}

#[derive(Debug, Serialize)]
struct AddVipBody<'a> {
    forward: bool,
    player_id: &'a PlayerId,
    description: &'a str,
    /// RFC 3339, or null for a grant without expiration.
    expiration: Option<String>,
}

#[derive(Debug, Serialize)]
struct MessageBody<'a> {
    player_id: &'a PlayerId,
    message: &'a str,
}

fn population_from_dtos(dtos: Vec<OnlinePlayerDto>) -> ServerPopulation {
    ServerPopulation::from_players(dtos.into_iter().filter_map(|dto| {
        // CRCON occasionally returns players without a profile; they
        // carry no play time, so there is nothing to count.
        let Some(profile) = dto.profile else {
            tracing::debug!(player_id = %dto.player_id, "player has no profile, skipping");
            return None;
        };
        Some(Player {
            id: dto.player_id,
            name: dto.name,
            play_time_secs: profile.current_playtime_seconds,
        })
    }))
}

/// Renders a second count as `H:MM:SS`, the way the game shows it.
fn format_clock(total_secs: f64) -> String {
    let secs = total_secs.max(0.0) as u64;
    format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_gamestate_envelope() {
        let body = br#"{
            "result": {
                "num_allied_players": 31,
                "num_axis_players": 28,
                "allied_score": 3,
                "axis_score": 2,
                "raw_time_remaining": "0:28:53",
                "current_map": {"id": "carentan_warfare"}
            },
            "failed": false
        }"#;
        let dto: GamestateDto =
            decode_result(GET_GAMESTATE, body).unwrap();
        assert_eq!(dto.num_allied_players, 31);
        assert_eq!(dto.num_axis_players, 28);
    }

    #[test]
    fn test_missing_result_is_a_payload_error() {
        let err = decode_result::<GamestateDto>(
            GET_GAMESTATE,
            br#"{"failed": true, "error": "nope"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Payload { .. }));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_malformed_json_is_a_decode_error() {
        let err =
            decode_result::<GamestateDto>(GET_GAMESTATE, b"<html>502</html>")
                .unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[test]
    fn test_players_without_profiles_are_skipped() {
        let body = br#"{
            "result": [
                {"name": "Alpha", "player_id": "a1", "profile": {"current_playtime_seconds": 420}},
                {"name": "Ghost", "player_id": "g1", "profile": null},
                {"name": "Bravo", "player_id": "b1", "profile": {"current_playtime_seconds": 61}}
            ]
        }"#;
        let dtos: Vec<OnlinePlayerDto> =
            decode_result(GET_PLAYERS, body).unwrap();
        let population = population_from_dtos(dtos);

        assert_eq!(population.len(), 2);
        assert!(population.contains(&"a1".into()));
        assert!(!population.contains(&"g1".into()));
        assert_eq!(
            population.get(&"b1".into()).unwrap().play_time_secs,
            61
        );
    }

    #[test]
    fn test_vip_expirations_parse_with_offset() {
        let body = br#"{
            "result": [
                {"player_id": "a1", "name": "Alpha", "vip_expiration": "2024-04-01T12:30:00+00:00"},
                {"player_id": "b1", "name": "Bravo", "vip_expiration": null},
                {"player_id": "c1", "name": "Charlie", "vip_expiration": "3000-01-01T00:00:00+00:00"}
            ]
        }"#;
        let dtos: Vec<VipEntryDto> =
            decode_result(GET_VIP_IDS, body).unwrap();
        let records: Vec<VipRecord> =
            dtos.into_iter().map(VipEntryDto::into_record).collect();

        assert_eq!(
            records[0].expires_at.unwrap().to_rfc3339(),
            "2024-04-01T12:30:00+00:00"
        );
        assert_eq!(records[1].expires_at, None);
        assert_eq!(
            records[2].expires_at.unwrap(),
            seedbed_core::indefinite_vip_cutoff()
        );
    }

    #[test]
    fn test_public_info_becomes_map_context() {
        let body = br#"{
            "result": {
                "current_map": {
                    "map": {"id": "carentan_warfare", "pretty_name": "Carentan Warfare"},
                    "start": 1709320000.0
                },
                "next_map": {"map": {"id": "utah_warfare", "pretty_name": "Utah Beach"}},
                "time_remaining": 1733.4,
                "player_count": 37
            }
        }"#;
        let dto: PublicInfoDto =
            decode_result(GET_PUBLIC_INFO, body).unwrap();

        assert_eq!(dto.current_map.map.pretty_name, "Carentan Warfare");
        assert_eq!(format_clock(dto.time_remaining), "0:28:53");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), "0:00:00");
        assert_eq!(format_clock(59.9), "0:00:59");
        assert_eq!(format_clock(3600.0), "1:00:00");
        assert_eq!(format_clock(5025.0), "1:23:45");
        assert_eq!(format_clock(-5.0), "0:00:00");
    }

    #[test]
    fn test_add_vip_body_shape() {
        let id = PlayerId::new("a1");
        let body = AddVipBody {
            forward: false,
            player_id: &id,
            description: "Alpha - HLL Seed VIP",
            expiration: Some("2024-04-01T12:30:00+00:00".into()),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "forward": false,
                "player_id": "a1",
                "description": "Alpha - HLL Seed VIP",
                "expiration": "2024-04-01T12:30:00+00:00"
            })
        );
    }

    #[test]
    fn test_add_vip_body_null_expiration() {
        let id = PlayerId::new("a1");
        let body = AddVipBody {
            forward: true,
            player_id: &id,
            description: "Alpha",
            expiration: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["expiration"], serde_json::Value::Null);
    }
}
