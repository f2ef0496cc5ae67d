//! Reader-friendly rendering of durations and timestamps.
//!
//! Announcement messages quote VIP rewards as "12 hours" or "a day"
//! rather than raw second counts. The tier boundaries follow the usual
//! convention: a month is 30.5 days, a year is 365.

use chrono::{DateTime, Duration, Utc};

/// Renders a duration as rough natural language ("12 hours", "a day",
/// "10 months"). Sign is ignored.
pub fn natural_delta(delta: Duration) -> String {
    let total = delta.num_seconds().unsigned_abs();
    let days = total / 86_400;
    let seconds = total % 86_400;
    let years = days / 365;
    let days = days % 365;
    // days / 30.5 without touching floats
    let months = days * 2 / 61;

    if years == 0 && days == 0 {
        match seconds {
            0 => "a moment".into(),
            1 => "a second".into(),
            2..=59 => format!("{seconds} seconds"),
            60..=119 => "a minute".into(),
            120..=3_599 => format!("{} minutes", seconds / 60),
            3_600..=7_199 => "an hour".into(),
            _ => format!("{} hours", seconds / 3_600),
        }
    } else if years == 0 {
        if days == 1 {
            "a day".into()
        } else if months == 0 {
            format!("{days} days")
        } else if months == 1 {
            "a month".into()
        } else {
            format!("{months} months")
        }
    } else if years == 1 {
        if months == 1 {
            "1 year, 1 month".into()
        } else if months > 1 {
            format!("1 year, {months} months")
        } else if days == 1 {
            "1 year, 1 day".into()
        } else if days > 1 {
            format!("1 year, {days} days")
        } else {
            "a year".into()
        }
    } else {
        format!("{years} years")
    }
}

/// Renders an instant relative to `now`: "10 months from now",
/// "2 hours ago", or "now" when the two nearly coincide.
pub fn natural_time(value: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let phrase = natural_delta(value.signed_duration_since(now));
    if phrase == "a moment" {
        return "now".into();
    }
    if value > now {
        format!("{phrase} from now")
    } else {
        format!("{phrase} ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_natural_delta_sub_day_tiers() {
        assert_eq!(natural_delta(Duration::zero()), "a moment");
        assert_eq!(natural_delta(Duration::seconds(1)), "a second");
        assert_eq!(natural_delta(Duration::seconds(45)), "45 seconds");
        assert_eq!(natural_delta(Duration::seconds(61)), "a minute");
        assert_eq!(natural_delta(Duration::minutes(30)), "30 minutes");
        assert_eq!(natural_delta(Duration::minutes(90)), "an hour");
        assert_eq!(natural_delta(Duration::hours(12)), "12 hours");
        assert_eq!(natural_delta(Duration::hours(23)), "23 hours");
    }

    #[test]
    fn test_natural_delta_day_and_month_tiers() {
        assert_eq!(natural_delta(Duration::hours(24)), "a day");
        assert_eq!(natural_delta(Duration::days(7)), "7 days");
        assert_eq!(natural_delta(Duration::days(30)), "30 days");
        assert_eq!(natural_delta(Duration::days(31)), "a month");
        assert_eq!(natural_delta(Duration::days(61)), "2 months");
        assert_eq!(natural_delta(Duration::days(335)), "10 months");
    }

    #[test]
    fn test_natural_delta_year_tiers() {
        assert_eq!(natural_delta(Duration::days(365)), "a year");
        assert_eq!(natural_delta(Duration::days(366)), "1 year, 1 day");
        assert_eq!(natural_delta(Duration::days(370)), "1 year, 5 days");
        assert_eq!(natural_delta(Duration::days(365 + 40)), "1 year, 1 month");
        assert_eq!(natural_delta(Duration::days(365 + 80)), "1 year, 2 months");
        assert_eq!(natural_delta(Duration::days(731)), "2 years");
    }

    #[test]
    fn test_natural_delta_ignores_sign() {
        assert_eq!(natural_delta(Duration::hours(-12)), "12 hours");
    }

    #[test]
    fn test_natural_time_directions() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 12, 1, 13, 0, 0).unwrap();
        let earlier = now - Duration::hours(2);

        assert_eq!(natural_time(later, now), "10 months from now");
        assert_eq!(natural_time(earlier, now), "2 hours ago");
        assert_eq!(natural_time(now, now), "now");
    }
}
