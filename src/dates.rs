//! Human-readable date stamps ("Wednesday, January 15th, 2025")

use chrono::{Datelike, NaiveDate};

/// 1 -> "1st", 12 -> "12th", 22 -> "22nd"
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 100, n % 10) {
        (11..=13, _) => "th",
        (_, 1) => "st",
        (_, 2) => "nd",
        (_, 3) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

pub fn expand(date: NaiveDate) -> String {
    format!(
        "{}, {} {}, {}",
        date.format("%A"),
        date.format("%B"),
        ordinal(date.day()),
        date.year()
    )
}

pub fn expand_no_weekday(date: NaiveDate) -> String {
    format!("{} {}, {}", date.format("%B"), ordinal(date.day()), date.year())
}

/// Include the weekday only when `text` does not already name it
pub fn auto_expand(date: NaiveDate, text: &str) -> String {
    let weekday = date.format("%A").to_string();
    if text.contains(&weekday) {
        expand_no_weekday(date)
    } else {
        expand(date)
    }
}
