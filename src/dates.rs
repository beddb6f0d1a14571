//! Relative date labels for post timestamps ("3 hours ago", "Aug 19, 2026").

use time::macros::format_description;
use time::{Duration, OffsetDateTime};

/// Current wall-clock time as a millisecond epoch timestamp.
pub fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Render a millisecond epoch timestamp relative to the current time.
pub fn format_relative(timestamp_millis: i64) -> String {
    format_relative_at(timestamp_millis, OffsetDateTime::now_utc())
}

/// Anything older than a week gets an absolute calendar date; everything
/// newer counts down in whole days, hours, then minutes. Unit counts are
/// truncated, and the unit is pluralized whenever the count is not 1.
pub fn format_relative_at(timestamp_millis: i64, now: OffsetDateTime) -> String {
    let then = OffsetDateTime::from_unix_timestamp_nanos(timestamp_millis as i128 * 1_000_000)
        .unwrap_or(now);

    let mut diff = now - then;
    if diff < Duration::ZERO {
        // Timestamps from the future are treated as "just now".
        diff = Duration::ZERO;
    }

    let days = diff.whole_days();
    if days > 7 {
        let format = format_description!("[month repr:short] [day padding:none], [year]");
        then.format(format)
            .unwrap_or_else(|_| then.date().to_string())
    } else if days >= 1 {
        format!("{} day{} ago", days, plural(days))
    } else if diff.whole_hours() >= 1 {
        let hours = diff.whole_hours();
        format!("{} hour{} ago", hours, plural(hours))
    } else {
        let minutes = diff.whole_minutes();
        format!("{} minute{} ago", minutes, plural(minutes))
    }
}

fn plural(count: i64) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
