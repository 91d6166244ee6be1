//! Display helpers for task views.

use chrono::{DateTime, Utc};

use crate::task::Priority;

/// `Priority::High` -> `"High"`.
pub fn format_priority(priority: Priority) -> String {
    let raw = priority.as_str();
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Short calendar form, e.g. `Mar 09, 2024`.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Coarse "time ago" label relative to `now`.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else {
        plural(days, "day")
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
