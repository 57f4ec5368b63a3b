//! Formatting helpers for presenting tour fields.

use time::{macros::format_description, OffsetDateTime};

/// Prices are shown the way the CMS stores them (`25`, `12.5`).
pub fn format_price(value: f64) -> String {
    format!("{value}")
}

pub fn format_date_time(value: OffsetDateTime) -> String {
    value
        .format(&format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .unwrap_or_default()
}
