//! # seedbed
//!
//! Unattended seeding rewards for Hell Let Loose servers running CRCON.
//!
//! The daemon polls the admin API, watches the server cross from
//! "seeding" (below full population) to "seeded" (both factions at
//! capacity), and on that edge grants temporary VIP to everyone who
//! helped, messages the players, and posts Discord announcements. While
//! seeding it also announces population milestones.
//!
//! The decision logic lives in `seedbed-core` and is pure; this crate
//! wires it to the `seedbed-rcon` client and the `seedbed-notify` sink
//! and owns the poll/sleep loop.

mod error;
mod runner;

pub use error::SeedbedError;
pub use runner::Seeder;
