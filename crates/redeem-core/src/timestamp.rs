//! Timestamp parsing and display formatting.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};
use std::fmt::Write as _;
use std::str::FromStr;

/// Zone-less layouts accepted in addition to RFC 3339. Interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an ISO-8601 timestamp into an absolute instant.
///
/// Returns `None` for anything that is not RFC 3339 or one of the zone-less
/// layouts in [`NAIVE_FORMATS`].
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Zone in which redemption times are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    /// The machine's local zone.
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl FromStr for DisplayZone {
    type Err = String;

    /// Accepts `local`, `utc`, or an offset such as `+09:00` / `-0530`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(DisplayZone::Local),
            "utc" | "z" => Ok(DisplayZone::Utc),
            other => parse_offset(other)
                .map(DisplayZone::Fixed)
                .ok_or_else(|| format!("unknown timezone: {s}")),
        }
    }
}

fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Render `instant` in `zone` using a strftime `pattern`.
///
/// Fails instead of panicking when the pattern contains an invalid
/// specifier.
pub fn format_instant(
    instant: DateTime<Utc>,
    zone: DisplayZone,
    pattern: &str,
) -> Result<String, std::fmt::Error> {
    match zone {
        DisplayZone::Local => write_in(instant, &Local, pattern),
        DisplayZone::Utc => write_in(instant, &Utc, pattern),
        DisplayZone::Fixed(offset) => write_in(instant, &offset, pattern),
    }
}

fn write_in<Tz>(instant: DateTime<Utc>, tz: &Tz, pattern: &str) -> Result<String, std::fmt::Error>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    write!(out, "{}", instant.with_timezone(tz).format(pattern))?;
    Ok(out)
}
