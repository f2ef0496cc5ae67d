//! Discord embed payloads for seeding announcements.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::message::render_player_count;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embed {
    pub title: String,
    /// ISO 8601; Discord renders it in the footer.
    pub timestamp: String,
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    fn inline(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_owned(),
            value: value.into(),
            inline: true,
        }
    }
}

/// Builds the announcement embed posted when seeding completes or hits
/// a progress bucket. Returns `None` when the configured message is
/// empty, which is how operators disable a particular announcement.
pub fn seed_announcement_embed(
    message: &str,
    current_map: &str,
    time_remaining: &str,
    player_count_message: &str,
    num_allied_players: u32,
    num_axis_players: u32,
    now: DateTime<Utc>,
) -> Option<Embed> {
    if message.is_empty() {
        return None;
    }

    tracing::debug!(num_allied_players, num_axis_players, title = message, "building announcement embed");

    Some(Embed {
        title: message.to_owned(),
        timestamp: now.to_rfc3339(),
        fields: vec![
            EmbedField::inline("Current Map", current_map),
            EmbedField::inline("Time Remaining", time_remaining),
            EmbedField::inline(
                "Players Per Team",
                render_player_count(
                    player_count_message,
                    num_allied_players,
                    num_axis_players,
                ),
            ),
        ],
    })
}
