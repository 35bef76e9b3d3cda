//! Canonical literal forms for `xsd:dateTime`, `xsd:duration` and
//! `xsd:double`.
//!
//! Two semantically equal values must render to the same literal, since the
//! diff engine compares literals rather than typed values.

use std::fmt::Write;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::error::TypeError;

/// Canonical dateTime format: UTC with seconds precision.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;
const MS_PER_WEEK: i64 = 7 * MS_PER_DAY;

/// Render a timestamp in the canonical form. Sub-second precision is dropped.
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// Parse an RFC 3339 timestamp (any offset) or a naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` timestamp, which is taken to be UTC.
pub fn parse_datetime(literal: &str) -> Result<DateTime<Utc>, TypeError> {
    let trimmed = literal.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| TypeError::InvalidDateTime(literal.to_string()))
}

/// Render a duration as ISO 8601 `PnDTnHnMnS` with millisecond precision.
///
/// Zero renders as `PT0S`; negative durations carry a leading `-`.
pub fn format_duration(value: &Duration) -> String {
    let total = value.num_milliseconds();
    let mut rest = total.unsigned_abs() as i64;

    let days = rest / MS_PER_DAY;
    rest %= MS_PER_DAY;
    let hours = rest / MS_PER_HOUR;
    rest %= MS_PER_HOUR;
    let minutes = rest / MS_PER_MINUTE;
    rest %= MS_PER_MINUTE;
    let seconds = rest / MS_PER_SECOND;
    let millis = rest % MS_PER_SECOND;

    let mut out = String::new();
    if total < 0 {
        out.push('-');
    }
    out.push('P');
    if days > 0 {
        let _ = write!(out, "{days}D");
    }

    let has_time = hours > 0 || minutes > 0 || seconds > 0 || millis > 0;
    if has_time || days == 0 {
        out.push('T');
        if hours > 0 {
            let _ = write!(out, "{hours}H");
        }
        if minutes > 0 {
            let _ = write!(out, "{minutes}M");
        }
        if seconds > 0 || millis > 0 || (hours == 0 && minutes == 0) {
            if millis > 0 {
                let fraction = format!("{millis:03}");
                let _ = write!(out, "{seconds}.{}S", fraction.trim_end_matches('0'));
            } else {
                let _ = write!(out, "{seconds}S");
            }
        }
    }
    out
}

/// Parse an ISO 8601 duration made of weeks, days, hours, minutes and
/// (fractional) seconds. Years and months have no fixed length and are
/// rejected.
pub fn parse_duration(literal: &str) -> Result<Duration, TypeError> {
    let invalid = || TypeError::InvalidDuration(literal.to_string());

    let trimmed = literal.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let body = body.strip_prefix('P').ok_or_else(invalid)?;
    let (date_part, time_part) = match body.split_once('T') {
        Some((date, time)) => {
            if time.is_empty() {
                return Err(invalid());
            }
            (date, time)
        }
        None => (body, ""),
    };

    let mut total: i64 = 0;
    let mut seen = 0usize;

    for (number, unit) in split_components(date_part).ok_or_else(invalid)? {
        let factor = match unit {
            'W' => MS_PER_WEEK,
            'D' => MS_PER_DAY,
            _ => return Err(invalid()),
        };
        total = add_whole(total, number, factor).ok_or_else(invalid)?;
        seen += 1;
    }

    for (number, unit) in split_components(time_part).ok_or_else(invalid)? {
        total = match unit {
            'H' => add_whole(total, number, MS_PER_HOUR),
            'M' => add_whole(total, number, MS_PER_MINUTE),
            'S' => {
                let secs: f64 = number.parse().map_err(|_| invalid())?;
                let millis = (secs * MS_PER_SECOND as f64).round();
                if !millis.is_finite() || millis < 0.0 {
                    return Err(invalid());
                }
                total.checked_add(millis as i64)
            }
            _ => return Err(invalid()),
        }
        .ok_or_else(invalid)?;
        seen += 1;
    }

    if seen == 0 {
        return Err(invalid());
    }
    Ok(Duration::milliseconds(if negative { -total } else { total }))
}

/// Render a double so that it always reads as a floating point literal
/// (`4.0`, `3.922`, `1e300`), using the XSD spellings for non-finite values.
/// Negative zero renders as `0.0`.
pub fn format_double(value: f64) -> String {
    if value == 0.0 {
        "0.0".to_string()
    } else if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let spelled = if value > 0.0 { "INF" } else { "-INF" };
        spelled.to_string()
    } else {
        format!("{value:?}")
    }
}

fn split_components(part: &str) -> Option<Vec<(&str, char)>> {
    let mut components = Vec::new();
    let mut start = 0;
    for (idx, ch) in part.char_indices() {
        if ch.is_ascii_digit() || ch == '.' {
            continue;
        }
        let number = &part[start..idx];
        if number.is_empty() {
            return None;
        }
        components.push((number, ch));
        start = idx + ch.len_utf8();
    }
    if start != part.len() {
        return None;
    }
    Some(components)
}

fn add_whole(total: i64, number: &str, factor: i64) -> Option<i64> {
    let count: i64 = number.parse().ok()?;
    total.checked_add(count.checked_mul(factor)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn datetime_canonical_form() {
        let dt = Utc.with_ymd_and_hms(2022, 5, 16, 8, 30, 5).unwrap();
        assert_eq!(format_datetime(&dt), "2022-05-16T08:30:05Z");
    }

    #[test]
    fn datetime_offsets_normalize_to_utc() {
        let a = parse_datetime("2022-05-16T10:30:05+02:00").unwrap();
        let b = parse_datetime("2022-05-16T08:30:05Z").unwrap();
        assert_eq!(a, b);
        assert_eq!(format_datetime(&a), "2022-05-16T08:30:05Z");
    }

    #[test]
    fn naive_datetime_is_utc() {
        let dt = parse_datetime("2022-05-16T08:30:05").unwrap();
        assert_eq!(format_datetime(&dt), "2022-05-16T08:30:05Z");
        let with_fraction = parse_datetime("2022-05-16T08:30:05.250").unwrap();
        assert_eq!(format_datetime(&with_fraction), "2022-05-16T08:30:05Z");
    }

    #[test]
    fn datetime_rejects_garbage() {
        assert_eq!(
            parse_datetime("yesterday"),
            Err(TypeError::InvalidDateTime("yesterday".into()))
        );
    }

    #[test]
    fn duration_formats() {
        assert_eq!(format_duration(&Duration::zero()), "PT0S");
        assert_eq!(format_duration(&Duration::minutes(90)), "PT1H30M");
        assert_eq!(format_duration(&Duration::days(1)), "P1D");
        assert_eq!(format_duration(&Duration::milliseconds(1_500)), "PT1.5S");
        assert_eq!(
            format_duration(&(Duration::days(2) + Duration::seconds(3))),
            "P2DT3S"
        );
        assert_eq!(format_duration(&Duration::seconds(-45)), "-PT45S");
    }

    #[test]
    fn duration_parses() {
        assert_eq!(parse_duration("PT1H30M").unwrap(), Duration::minutes(90));
        assert_eq!(parse_duration("P1W").unwrap(), Duration::days(7));
        assert_eq!(parse_duration("P1DT0.25S").unwrap(), Duration::days(1) + Duration::milliseconds(250));
        assert_eq!(parse_duration("-PT5M").unwrap(), Duration::minutes(-5));
    }

    #[test]
    fn duration_rejects_ambiguous_or_malformed() {
        for bad in ["", "P", "PT", "1H", "P1Y", "P1M", "PT1X", "PTH", "PT5"] {
            assert!(parse_duration(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn duration_canonical_form_reparses() {
        let d = Duration::days(3) + Duration::hours(4) + Duration::milliseconds(120);
        assert_eq!(parse_duration(&format_duration(&d)).unwrap(), d);
    }

    #[test]
    fn doubles_always_look_like_doubles() {
        assert_eq!(format_double(4.0), "4.0");
        assert_eq!(format_double(4.00), "4.0");
        assert_eq!(format_double(3.922), "3.922");
        assert_eq!(format_double(f64::NAN), "NaN");
        assert_eq!(format_double(f64::NEG_INFINITY), "-INF");
        assert_eq!(format_double(-0.0), "0.0");
        assert_eq!(format_double(0.0), "0.0");
    }
}
