// src/dates.rs
use chrono::{DateTime, Utc};

/// Turns an update timestamp into the label shown on cards and in the
/// detail overlay. `now` is passed in so the bucketing is deterministic
/// under test.
///
/// Buckets, first match wins: today, yesterday, days (<7), weeks (<30),
/// months (<365), then the absolute long-form date.
pub fn humanize_updated(updated: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed_days = (now - updated).num_seconds().abs() / 86_400;

    match elapsed_days {
        0 => "Updated today".to_string(),
        1 => "Updated yesterday".to_string(),
        d if d < 7 => format!("Updated {} days ago", d),
        d if d < 30 => format!("Updated {} weeks ago", d / 7),
        d if d < 365 => format!("Updated {} months ago", d / 30),
        _ => format!("Updated {}", updated.format("%B %-d, %Y")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn now() -> DateTime<Utc> {
        "2022-11-03T12:00:00Z".parse().unwrap()
    }

    fn days_ago(days: i64) -> DateTime<Utc> {
        now() - TimeDelta::days(days)
    }

    #[test]
    fn same_day_is_today() {
        assert_eq!(humanize_updated(now(), now()), "Updated today");
        // Under 24h still counts as today
        assert_eq!(humanize_updated(now() - TimeDelta::hours(23), now()), "Updated today");
    }

    #[test]
    fn one_day_is_yesterday() {
        assert_eq!(humanize_updated(days_ago(1), now()), "Updated yesterday");
    }

    #[test]
    fn under_a_week_counts_days() {
        assert_eq!(humanize_updated(days_ago(2), now()), "Updated 2 days ago");
        assert_eq!(humanize_updated(days_ago(6), now()), "Updated 6 days ago");
    }

    #[test]
    fn exactly_seven_days_switches_to_weeks() {
        assert_eq!(humanize_updated(days_ago(7), now()), "Updated 1 weeks ago");
        assert_eq!(humanize_updated(days_ago(29), now()), "Updated 4 weeks ago");
    }

    #[test]
    fn exactly_thirty_days_switches_to_months() {
        assert_eq!(humanize_updated(days_ago(30), now()), "Updated 1 months ago");
        assert_eq!(humanize_updated(days_ago(364), now()), "Updated 12 months ago");
    }

    #[test]
    fn exactly_a_year_switches_to_the_absolute_date() {
        assert_eq!(humanize_updated(days_ago(365), now()), "Updated November 3, 2021");
    }

    #[test]
    fn future_timestamps_bucket_on_absolute_distance() {
        assert_eq!(humanize_updated(now() + TimeDelta::days(3), now()), "Updated 3 days ago");
    }
}
