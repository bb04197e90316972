//! Time formatting helpers.

/// Format a delay in seconds for display, e.g. `3d 0h` or `45s`.
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

/// Like [`format_duration`], but renders zero as `none`.
pub fn format_delay(secs: u64) -> String {
    if secs == 0 {
        "none".to_string()
    } else {
        format_duration(secs)
    }
}
