/// Formats a number of seconds as `M:SS`.
///
/// Minutes are not padded and are not rolled into hours, seconds are
/// zero-padded to two digits. Negative or non-finite input formats as
/// `0:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    format!("{}:{:02}", total / 60, total % 60)
}
