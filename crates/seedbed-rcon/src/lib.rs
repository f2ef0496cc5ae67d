//! HTTP access to the game server's admin API.
//!
//! The [`AdminApi`] trait is the seam between the daemon and the wire:
//! the daemon loop is written against the trait, [`RconClient`] is the
//! production implementation, and tests substitute scripted mocks.
//! Transient failures (connection resets, 5xx) are retried with backoff
//! inside the client; anything else surfaces as an [`ApiError`] and the
//! process is expected to exit on it.

#![allow(async_fn_in_trait)]

mod client;
mod error;
mod retry;

pub use client::{AdminApi, MapContext, RconClient};
pub use error::ApiError;
pub use retry::{RetryPolicy, retry_with_backoff};
