use chrono::{DateTime, Utc};

const SECONDS_PER_DAY: i64 = 86_400;

/// Whole days from now until `deadline`, rounded down. Negative once the deadline has passed.
pub fn days_until(deadline: DateTime<Utc>) -> i64 {
    days_until_from(deadline, Utc::now())
}

/// Same as [`days_until`] against an explicit reference instant.
pub fn days_until_from(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (deadline - now).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Locale-independent date label, e.g. `Oct 19, 2026`.
pub fn format_date(ts: DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y").to_string()
}

pub fn deadline_label(days: i64) -> String {
    match days {
        d if d < 0 => "Closed".to_string(),
        0 => "Closes today".to_string(),
        1 => "1 day left".to_string(),
        d => format!("{d} days left"),
    }
}
