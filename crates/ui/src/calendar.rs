//! Calendar-style timestamps ("Today at 2:05 PM", "Last Monday at 9:00 AM").
//!
//! Day distance is measured between calendar dates in the viewer's
//! timezone, so 11:59 PM yesterday is "Yesterday" even one minute later.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Format `sent` relative to `now`
pub fn calendar_time<Tz>(sent: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let days = (sent.date_naive() - now.date_naive()).num_days();
    let time = sent.format("%-I:%M %p");

    match days {
        0 => format!("Today at {}", time),
        -1 => format!("Yesterday at {}", time),
        1 => format!("Tomorrow at {}", time),
        -6..=-2 => format!("Last {} at {}", sent.format("%A"), time),
        2..=6 => format!("{} at {}", sent.format("%A"), time),
        _ => sent.format("%m/%d/%Y").to_string(),
    }
}

/// Format an epoch-millisecond timestamp in `now`'s timezone
pub fn calendar_millis<Tz>(millis: i64, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match DateTime::from_timestamp_millis(millis) {
        Some(utc) => calendar_time(&utc.with_timezone(&now.timezone()), now),
        None => String::new(),
    }
}
