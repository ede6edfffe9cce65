//! Display formatting for server-supplied timestamps.
//!
//! Output looks like `5.März.2024 - 10:15:30 Uhr`. Scripts parse this text,
//! so the layout is fixed. Input that cannot be parsed is shown as-is.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

/// Shown when the server has no timestamp.
pub const NOT_AVAILABLE: &str = "nie";

const MONTHS: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// Format `raw` in the host's local time zone.
pub fn format_timestamp(raw: Option<&str>) -> String {
    format_timestamp_in(raw, &Local)
}

/// Format `raw` in the given time zone.
pub fn format_timestamp_in<Tz: TimeZone>(raw: Option<&str>, tz: &Tz) -> String {
    let raw = match raw {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return NOT_AVAILABLE.to_string(),
    };

    let parsed = if raw.contains('T') {
        parse_iso_as_utc(raw)
            .map(|dt| dt.with_timezone(tz))
            // RFC 2822 weekdays like "Tue" also contain a `T`.
            .or_else(|| parse_generic(raw, tz))
    } else {
        parse_generic(raw, tz)
    };

    match parsed {
        Some(dt) => render(&dt),
        None => {
            tracing::debug!(raw, "unparseable timestamp, showing raw value");
            raw.to_string()
        }
    }
}

fn render<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    format!(
        "{}.{}.{} - {:02}:{:02}:{:02} Uhr",
        dt.day(),
        MONTHS[dt.month0() as usize],
        dt.year(),
        dt.hour(),
        dt.minute(),
        dt.second(),
    )
}

/// ISO-8601 with any `Z` or numeric offset dropped; the wall clock is taken as UTC.
fn parse_iso_as_utc(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    let (date, time) = raw.split_once('T')?;
    let time = match time.find(['Z', 'z', '+', '-']) {
        Some(idx) => &time[..idx],
        None => time,
    };
    let stripped = format!("{date}T{time}");

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&stripped, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn parse_generic<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(tz));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(tz));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return tz.from_local_datetime(&naive).earliest();
    }
    // A bare date is midnight UTC.
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let naive = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&naive).with_timezone(tz));
    }
    None
}
