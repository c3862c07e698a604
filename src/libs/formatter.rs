//! Duration formatting for console output.
//!
//! Minutes are rendered according to the `durationFormat` setting: either
//! raw minutes ("95m") or hours and minutes ("1h 35m").

use crate::libs::setting::DurationFormat;

pub fn format_minutes(minutes: u32, format: DurationFormat) -> String {
    match format {
        DurationFormat::Minutes => format!("{}m", minutes),
        DurationFormat::HoursMinutes => {
            let hours = minutes / 60;
            let rest = minutes % 60;
            if hours == 0 {
                format!("{}m", rest)
            } else if rest == 0 {
                format!("{}h", hours)
            } else {
                format!("{}h {}m", hours, rest)
            }
        }
    }
}

/// Remaining minutes for display; unknown estimates show as a dash.
pub fn format_remaining(remaining: Option<u32>, format: DurationFormat) -> String {
    match remaining {
        Some(minutes) => format_minutes(minutes, format),
        None => "—".to_string(),
    }
}
