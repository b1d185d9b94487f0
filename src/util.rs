use crate::pomodoro::Phase;

/// Seconds as a MM:SS readout. Minutes keep growing past an hour; nobody
/// should be staring at a single pomodoro that long, but it stays readable.
pub fn format_time(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remaining_seconds = seconds % 60;
    format!("{minutes:02}:{remaining_seconds:02}")
}

/// Terminal-title variant with the phase glyph in front.
pub fn format_time_for_title(seconds: u32, phase: Phase) -> String {
    let emoji = if phase.is_break() { "☕" } else { "🌱" };
    format!("{emoji} {} remaining", format_time(seconds))
}
