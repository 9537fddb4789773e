//! Display helpers

use std::time::Duration;

/// Format a duration as `m:ss`
///
/// Minutes are not wrapped into hours.
pub fn format_time(duration: Duration) -> String {
    let total = duration.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}
