// crates/trimwire-core/src/helpers/time.rs
//
// Shared time-formatting utilities used by trimwire-ui and any future
// crates that need human-readable playback times.

/// Format a playback position in seconds as `M:SS`.
///
/// Used for the elapsed/total readout in the player panel. Positions past
/// an hour keep counting minutes (`75:30`) rather than switching format.
///
/// ```
/// use trimwire_core::helpers::time::format_clock;
/// assert_eq!(format_clock(0.0),    "0:00");
/// assert_eq!(format_clock(61.5),   "1:01");
/// assert_eq!(format_clock(3599.0), "59:59");
/// assert_eq!(format_clock(-2.0),   "0:00");
/// ```
pub fn format_clock(s: f64) -> String {
    let s  = s.max(0.0);
    let m  = (s / 60.0) as u64;
    let sc = (s % 60.0) as u64;
    format!("{m}:{sc:02}")
}
