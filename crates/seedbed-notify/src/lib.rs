//! Announcement and messaging surface for the seeding daemon.
//!
//! Covers the three ways the daemon talks to humans:
//!
//! 1. Discord embeds posted to webhooks when the server seeds or hits
//!    a population bucket ([`seed_announcement_embed`], [`WebhookSink`]).
//! 2. In-game messages rendered from operator templates
//!    ([`render_player_message`] and friends).
//! 3. Natural-language time phrasing used inside those templates
//!    ([`humanize`]).
//!
//! Nothing in here drives the lifecycle; callers decide when to post.

#![allow(async_fn_in_trait)]

mod embed;
mod error;
pub mod humanize;
mod message;
mod webhook;

pub use embed::{Embed, EmbedField, seed_announcement_embed};
pub use error::NotifyError;
pub use message::{
    UNKNOWN_PLAYER_NAME, render_player_count, render_player_message,
    render_progress_message, render_vip_grant_name,
};
pub use webhook::{NotifySink, WebhookSink};
