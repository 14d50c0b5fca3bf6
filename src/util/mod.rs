//! Shared utilities for `stockbench`.
//!
//! Common functionality used across modules:
//! - Progress indicators (for long-running runs)
//! - Duration formatting for reports and logs

pub mod progress;

use std::time::Duration;

/// Format a duration for report output: sub-second values in milliseconds,
/// everything else in seconds with millisecond precision.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    if duration < Duration::from_secs(1) {
        format!("{:.1}ms", duration.as_secs_f64() * 1000.0)
    } else {
        format!("{:.3}s", duration.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_duration_picks_sensible_units() {
        assert_eq!(format_duration(Duration::from_micros(2_500)), "2.5ms");
        assert_eq!(format_duration(Duration::from_millis(999)), "999.0ms");
        assert_eq!(format_duration(Duration::from_millis(1_500)), "1.500s");
        assert_eq!(format_duration(Duration::from_secs(90)), "90.000s");
    }
}
