use crate::error::PomodoroError;
use chrono::Duration;
use nom::{
    bytes::complete::tag,
    character::complete::digit1,
    combinator::map_res,
    sequence::separated_pair,
    IResult,
};

/// Renders a remaining time as `MMSS`, wrapping modulo one hour the way `%M%S` does
pub fn format_remaining(remaining: Duration) -> String {
    let seconds = remaining.num_milliseconds().div_euclid(1000).rem_euclid(3600);

    format!("{:02}{:02}", seconds / 60, seconds % 60)
}

/// Encodes the time elapsed at the moment of pausing as `MM:SS`
pub fn encode_pause_marker(elapsed: Duration) -> String {
    let seconds = elapsed.num_seconds().max(0);

    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Decodes a pause marker, the last non-empty line of the slot wins
pub fn parse_pause_marker(content: &str) -> Result<Duration, PomodoroError> {
    let line = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .unwrap_or_default();

    match minutes_seconds(line) {
        Ok(("", (minutes, seconds))) if seconds < 60 => minutes
            .checked_mul(60)
            .and_then(|minutes| minutes.checked_add(seconds))
            .and_then(Duration::try_seconds)
            .ok_or_else(|| PomodoroError::InvalidPauseMarker(line.to_owned())),
        _ => Err(PomodoroError::InvalidPauseMarker(line.to_owned())),
    }
}

fn number(i: &str) -> IResult<&str, i64> {
    map_res(digit1, str::parse::<i64>)(i)
}

fn minutes_seconds(i: &str) -> IResult<&str, (i64, i64)> {
    separated_pair(number, tag(":"), number)(i)
}

pub fn seconds_to_string(seconds: usize) -> String {
    let mut time_str = String::new();

    let hours = seconds / 3600;
    if hours > 0 {
        time_str += &format!("{}h", hours);
    }
    let minutes = seconds % 3600 / 60;
    if minutes > 0 {
        time_str += &format!("{}m", minutes);
    }
    let seconds = seconds % 60;
    if seconds > 0 || time_str.is_empty() {
        time_str += &format!("{}s", seconds);
    }

    time_str
}
