//! Formatting helpers for chart values and CSS timings.

/// Numeric display with the optional `%` suffix. Whole numbers print without
/// a fractional part (`40`, not `40.0`).
pub fn format_value(value: f64, show_percentage: bool) -> String {
    if show_percentage {
        format!("{value}%")
    } else {
        format!("{value}")
    }
}

/// CSS duration in seconds for a millisecond count, e.g. `1500` -> `1.5s`.
pub fn format_seconds(ms: u32) -> String {
    format!("{}s", f64::from(ms) / 1000.0)
}

/// Percentage length, e.g. `40` -> `40%`.
pub fn format_percent_length(value: f64) -> String {
    format!("{value}%")
}
