use crate::domain::value::Value;
use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt::Write;
use uuid::Uuid;

/// Microseconds of the sub-second part. A leap second's extra second is
/// folded away and anything below a microsecond is truncated.
#[inline]
fn microsecond(t: &impl Timelike) -> u32 {
    (t.nanosecond() % 1_000_000_000) / 1_000
}

#[inline]
fn push_date(out: &mut String, d: &NaiveDate) {
    // Writing into a String cannot fail.
    let _ = write!(out, "{:04}-{:02}-{:02}", d.year(), d.month(), d.day());
}

#[inline]
fn push_time(out: &mut String, t: &NaiveTime) {
    let _ = write!(out, "{:02}:{:02}:{:02}", t.hour(), t.minute(), t.second());
    let micros = microsecond(t);
    if micros > 0 {
        let _ = write!(out, ".{:06}", micros);
    }
}

#[inline]
fn push_offset(out: &mut String, offset: &FixedOffset) {
    let total_seconds = offset.local_minus_utc();
    if total_seconds == 0 {
        out.push('Z');
        return;
    }
    let sign = if total_seconds > 0 { '+' } else { '-' };
    let abs_secs = total_seconds.unsigned_abs();
    let _ = write!(
        out,
        "{}{:02}:{:02}",
        sign,
        abs_secs / 3600,
        (abs_secs % 3600) / 60
    );
}

#[inline]
pub fn format_date(d: &NaiveDate) -> String {
    let mut out = String::with_capacity(10);
    push_date(&mut out, d);
    out
}

#[inline]
pub fn format_time(t: &NaiveTime) -> String {
    let mut out = String::with_capacity(15);
    push_time(&mut out, t);
    out
}

#[inline]
pub fn format_datetime(dt: &NaiveDateTime, offset: Option<&FixedOffset>) -> String {
    let mut out = String::with_capacity(32);
    push_date(&mut out, &dt.date());
    out.push('T');
    push_time(&mut out, &dt.time());
    if let Some(offset) = offset {
        push_offset(&mut out, offset);
    }
    out
}

#[inline]
pub fn format_uuid(u: &Uuid) -> String {
    u.hyphenated().to_string()
}

/// Applies the formatting rule for a classified value.
///
/// Returns `None` for [`Value::Unsupported`] and for NaN or infinite
/// floats, which have no JSON number form. The caller decides how to report it.
pub fn format_value(value: Value<'_>) -> Option<serde_json::Value> {
    let formatted = match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(b),
        Value::Int(i) => serde_json::Value::from(i),
        Value::UInt(u) => serde_json::Value::from(u),
        Value::Float(f) => serde_json::Value::Number(serde_json::Number::from_f64(f)?),
        Value::Text(s) => serde_json::Value::String(s.to_owned()),
        Value::Date(d) => serde_json::Value::String(format_date(&d)),
        Value::Time(t) => serde_json::Value::String(format_time(&t)),
        Value::DateTime(dt, offset) => {
            serde_json::Value::String(format_datetime(&dt, offset.as_ref()))
        }
        Value::Decimal(d) => serde_json::Value::String(d.to_string()),
        Value::Uuid(u) => serde_json::Value::String(format_uuid(&u)),
        Value::Unsupported => return None,
    };
    Some(formatted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decimal::Decimal;
    use std::borrow::Cow;

    fn naive(h: u32, m: u32, s: u32, micro: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 23)
            .unwrap()
            .and_hms_micro_opt(h, m, s, micro)
            .unwrap()
    }

    #[test]
    fn test_format_date() {
        let d = NaiveDate::from_ymd_opt(1990, 5, 15).unwrap();
        assert_eq!(format_date(&d), "1990-05-15");

        let early = NaiveDate::from_ymd_opt(33, 1, 2).unwrap();
        assert_eq!(format_date(&early), "0033-01-02");
    }

    #[test]
    fn test_format_time_fraction_only_when_non_zero() {
        let whole = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
        assert_eq!(format_time(&whole), "09:30:00");

        let half = NaiveTime::from_hms_micro_opt(9, 30, 0, 500_000).unwrap();
        assert_eq!(format_time(&half), "09:30:00.500000");

        let one = NaiveTime::from_hms_micro_opt(9, 30, 0, 1).unwrap();
        assert_eq!(format_time(&one), "09:30:00.000001");
    }

    #[test]
    fn test_sub_microsecond_part_is_truncated() {
        let nanos = NaiveTime::from_hms_nano_opt(9, 30, 0, 999).unwrap();
        assert_eq!(format_time(&nanos), "09:30:00");

        let mixed = NaiveTime::from_hms_nano_opt(9, 30, 0, 123_456_789).unwrap();
        assert_eq!(format_time(&mixed), "09:30:00.123456");
    }

    #[test]
    fn test_format_naive_datetime() {
        assert_eq!(format_datetime(&naive(14, 30, 45, 0), None), "2026-01-23T14:30:45");
        assert_eq!(
            format_datetime(&naive(14, 30, 45, 123_456), None),
            "2026-01-23T14:30:45.123456"
        );
    }

    #[test]
    fn test_format_datetime_offsets() {
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(
            format_datetime(&naive(14, 30, 45, 0), Some(&utc)),
            "2026-01-23T14:30:45Z"
        );

        let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        assert_eq!(
            format_datetime(&naive(20, 0, 0, 0), Some(&ist)),
            "2026-01-23T20:00:00+05:30"
        );

        let est = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(
            format_datetime(&naive(9, 30, 0, 0), Some(&est)),
            "2026-01-23T09:30:00-05:00"
        );

        let half_hour_west = FixedOffset::west_opt(30 * 60).unwrap();
        assert_eq!(
            format_datetime(&naive(9, 30, 0, 250_000), Some(&half_hour_west)),
            "2026-01-23T09:30:00.250000-00:30"
        );
    }

    #[test]
    fn test_offset_seconds_are_dropped() {
        let odd = FixedOffset::east_opt(3600 + 59).unwrap();
        assert_eq!(
            format_datetime(&naive(0, 0, 0, 0), Some(&odd)),
            "2026-01-23T00:00:00+01:00"
        );
    }

    #[test]
    fn test_format_uuid_is_lowercase_hyphenated() {
        let u = Uuid::parse_str("A1A2A3A4-B1B2-C1C2-D1D2-D3D4D5D6D7D8").unwrap();
        assert_eq!(format_uuid(&u), "a1a2a3a4-b1b2-c1c2-d1d2-d3d4d5d6d7d8");
    }

    #[test]
    fn test_format_value_dispatch() {
        assert_eq!(format_value(Value::Null), Some(serde_json::Value::Null));
        assert_eq!(format_value(Value::Int(1)), Some(serde_json::json!(1)));
        assert_eq!(format_value(Value::Bool(true)), Some(serde_json::json!(true)));
        assert_eq!(format_value(Value::Float(0.25)), Some(serde_json::json!(0.25)));
        assert_eq!(format_value(Value::Text("Test")), Some(serde_json::json!("Test")));
        assert_eq!(format_value(Value::Float(f64::NAN)), None);
        assert_eq!(format_value(Value::Float(f64::INFINITY)), None);
        assert_eq!(format_value(Value::Float(f64::NEG_INFINITY)), None);

        let price: Decimal = "1E+2".parse().unwrap();
        assert_eq!(
            format_value(Value::Decimal(Cow::Owned(price))),
            Some(serde_json::json!("1E+2"))
        );

        assert_eq!(format_value(Value::Unsupported), None);
    }
}
