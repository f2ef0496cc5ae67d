//! VIP expiration arithmetic.

use chrono::{DateTime, Utc};

use crate::config::SeedingConfig;

/// Computes a rewarded player's new VIP expiration.
///
/// * No existing grant: a fresh window starting at `from`.
/// * Cumulative policy: the reward stacks onto the existing expiration,
///   however far ahead that already is.
/// * Otherwise: the later of the existing expiration and a fresh window.
///   An expired or short grant gets extended; a longer one is never cut
///   back.
///
/// This is plain arithmetic. Callers must weed out indefinite-VIP holders
/// first (see [`has_indefinite_vip`](crate::has_indefinite_vip)); fed an
/// indefinite expiration, the non-cumulative branch would happily return
/// the sentinel date as if it were a regular grant.
pub fn next_expiration(
    config: &SeedingConfig,
    existing: Option<DateTime<Utc>>,
    from: DateTime<Utc>,
) -> DateTime<Utc> {
    match existing {
        None => from + config.vip_reward,
        Some(current) if config.cumulative_vip => current + config.vip_reward,
        Some(current) => current.max(from + config.vip_reward),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn config(cumulative: bool) -> SeedingConfig {
        SeedingConfig {
            cumulative_vip: cumulative,
            vip_reward: Duration::hours(24),
            ..SeedingConfig::default()
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_no_existing_grant_gets_fresh_window() {
        let result = next_expiration(&config(false), None, t0());
        assert_eq!(result, t0() + Duration::hours(24));
    }

    #[test]
    fn test_non_cumulative_never_shortens() {
        let existing = t0() + Duration::hours(48);
        let result = next_expiration(&config(false), Some(existing), t0());
        assert_eq!(result, existing);
    }

    #[test]
    fn test_non_cumulative_extends_short_grant() {
        let existing = t0() + Duration::hours(1);
        let result = next_expiration(&config(false), Some(existing), t0());
        assert_eq!(result, t0() + Duration::hours(24));
    }

    #[test]
    fn test_non_cumulative_extends_expired_grant() {
        let existing = t0() - Duration::days(30);
        let result = next_expiration(&config(false), Some(existing), t0());
        assert_eq!(result, t0() + Duration::hours(24));
    }

    #[test]
    fn test_cumulative_stacks_on_existing() {
        let existing = t0() + Duration::hours(48);
        let result = next_expiration(&config(true), Some(existing), t0());
        assert_eq!(result, existing + Duration::hours(24));
    }

    #[test]
    fn test_cumulative_ignores_from_time() {
        let existing = t0() + Duration::hours(48);
        let much_later = t0() + Duration::days(400);
        let result = next_expiration(&config(true), Some(existing), much_later);
        assert_eq!(result, existing + Duration::hours(24));
    }

    #[test]
    fn test_cumulative_without_existing_still_uses_from() {
        let result = next_expiration(&config(true), None, t0());
        assert_eq!(result, t0() + Duration::hours(24));
    }
}
