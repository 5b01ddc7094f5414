//! Canonical temporal bytes
//!
//! Date and datetime literals reach the encoder already in this form:
//!
//! ```text
//! +------------------+
//! | Version          | (u8, always 1)
//! +------------------+
//! | Seconds          | (i64 BE, since 0001-01-01T00:00:00Z)
//! +------------------+
//! | Nanoseconds      | (i32 BE)
//! +------------------+
//! | Offset Minutes   | (i16 BE, -1 = UTC)
//! +------------------+
//! ```
//!
//! Dates are encoded as midnight UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat};

use super::errors::{ValueError, ValueResult};
use super::types::{TypeId, TypedValue};

/// Length of an encoded instant
pub const TEMPORAL_LEN: usize = 15;

const TEMPORAL_VERSION: u8 = 1;

/// Seconds between 0001-01-01 and 1970-01-01
const UNIX_TO_INTERNAL: i64 = 62_135_596_800;

const UTC_OFFSET_MARKER: i16 = -1;

/// Encode a datetime in canonical form.
///
/// Fails when the zone offset is not a whole number of minutes, or is
/// exactly one minute west of UTC.
pub fn encode_datetime(dt: &DateTime<FixedOffset>) -> ValueResult<Vec<u8>> {
    let offset_secs = dt.offset().local_minus_utc();
    if offset_secs % 60 != 0 {
        return Err(ValueError::malformed(
            TypeId::DateTime,
            format!("zone offset {}s is not a whole minute", offset_secs),
        ));
    }
    let offset_min = match offset_secs / 60 {
        0 => UTC_OFFSET_MARKER,
        m if m == i32::from(UTC_OFFSET_MARKER) => {
            return Err(ValueError::malformed(
                TypeId::DateTime,
                "zone offset -00:01 collides with the UTC marker",
            ))
        }
        m => m as i16,
    };

    let sec = dt.timestamp() + UNIX_TO_INTERNAL;
    let nsec = dt.timestamp_subsec_nanos() as i32;

    let mut buf = Vec::with_capacity(TEMPORAL_LEN);
    buf.push(TEMPORAL_VERSION);
    buf.extend_from_slice(&sec.to_be_bytes());
    buf.extend_from_slice(&nsec.to_be_bytes());
    buf.extend_from_slice(&offset_min.to_be_bytes());
    Ok(buf)
}

/// Encode a calendar date as midnight UTC
pub fn encode_date(date: NaiveDate) -> ValueResult<Vec<u8>> {
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| ValueError::malformed(TypeId::Date, "date has no midnight"))?;
    encode_datetime(&midnight.and_utc().fixed_offset())
}

/// Decode canonical bytes back into a datetime.
///
/// `type_id` only labels the error; dates and datetimes share the layout.
pub fn decode_datetime(data: &[u8], type_id: TypeId) -> ValueResult<DateTime<FixedOffset>> {
    if data.len() != TEMPORAL_LEN {
        return Err(ValueError::malformed(
            type_id,
            format!("expected {} bytes, got {}", TEMPORAL_LEN, data.len()),
        ));
    }
    if data[0] != TEMPORAL_VERSION {
        return Err(ValueError::malformed(
            type_id,
            format!("unsupported version {}", data[0]),
        ));
    }

    let sec = i64::from_be_bytes([
        data[1], data[2], data[3], data[4], data[5], data[6], data[7], data[8],
    ]);
    let nsec = i32::from_be_bytes([data[9], data[10], data[11], data[12]]);
    let offset_min = i16::from_be_bytes([data[13], data[14]]);

    if !(0..2_000_000_000).contains(&nsec) {
        return Err(ValueError::malformed(
            type_id,
            format!("nanoseconds out of range: {}", nsec),
        ));
    }

    let offset_secs = if offset_min == UTC_OFFSET_MARKER {
        0
    } else {
        i32::from(offset_min) * 60
    };
    let offset = FixedOffset::east_opt(offset_secs).ok_or_else(|| {
        ValueError::malformed(type_id, format!("zone offset out of range: {}m", offset_min))
    })?;

    let utc = sec
        .checked_sub(UNIX_TO_INTERNAL)
        .and_then(|unix| DateTime::from_timestamp(unix, nsec as u32))
        .ok_or_else(|| ValueError::malformed(type_id, "instant out of range"))?;

    Ok(utc.with_timezone(&offset))
}

/// Render canonical temporal bytes as text.
///
/// Dates render as `YYYY-MM-DD`, datetimes as RFC 3339 with `Z` for UTC.
pub(crate) fn format_temporal(data: &[u8], type_id: TypeId) -> ValueResult<String> {
    let dt = decode_datetime(data, type_id)?;
    Ok(match type_id {
        TypeId::Date => dt.format("%Y-%m-%d").to_string(),
        _ => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
    })
}

impl TypedValue {
    /// Build a datetime value from a chrono datetime
    pub fn date_time(dt: &DateTime<FixedOffset>) -> ValueResult<Self> {
        Ok(TypedValue::DateTime(encode_datetime(dt)?))
    }

    /// Build a date value from a calendar date
    pub fn date(date: NaiveDate) -> ValueResult<Self> {
        Ok(TypedValue::Date(encode_date(date)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_layout_for_unix_epoch() {
        let bytes = encode_datetime(&parse("1970-01-01T00:00:00Z")).unwrap();
        assert_eq!(bytes.len(), TEMPORAL_LEN);
        assert_eq!(bytes[0], 1);
        assert_eq!(&bytes[1..9], &UNIX_TO_INTERNAL.to_be_bytes());
        assert_eq!(&bytes[9..13], &[0, 0, 0, 0]);
        assert_eq!(&bytes[13..15], &(-1i16).to_be_bytes());
    }

    #[test]
    fn test_offset_is_stored_in_minutes() {
        let bytes = encode_datetime(&parse("2017-06-01T10:30:00+05:30")).unwrap();
        assert_eq!(&bytes[13..15], &330i16.to_be_bytes());
    }

    #[test]
    fn test_datetime_roundtrip_preserves_offset_and_nanos() {
        let dt = parse("2017-06-01T10:30:00.123456789-07:00");
        let bytes = encode_datetime(&dt).unwrap();
        let back = decode_datetime(&bytes, TypeId::DateTime).unwrap();
        assert_eq!(back, dt);
        assert_eq!(back.offset().local_minus_utc(), -7 * 3600);
        assert_eq!(back.timestamp_subsec_nanos(), 123_456_789);
    }

    #[test]
    fn test_sub_minute_offset_rejected() {
        let offset = FixedOffset::east_opt(30).unwrap();
        let dt = parse("2017-06-01T10:30:00Z").with_timezone(&offset);
        let err = encode_datetime(&dt).unwrap_err();
        assert_eq!(err.type_id(), TypeId::DateTime);
    }

    #[test]
    fn test_minus_one_minute_offset_rejected() {
        let dt = parse("2017-06-01T10:30:00-00:01");
        assert!(encode_datetime(&dt).is_err());
    }

    #[test]
    fn test_date_is_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(2017, 6, 1).unwrap();
        let bytes = encode_date(date).unwrap();
        let back = decode_datetime(&bytes, TypeId::Date).unwrap();
        assert_eq!(back, parse("2017-06-01T00:00:00Z"));
    }

    #[test]
    fn test_decode_rejects_wrong_length_and_version() {
        let err = decode_datetime(&[1, 2, 3], TypeId::Date).unwrap_err();
        assert_eq!(err.type_id(), TypeId::Date);

        let mut bytes = encode_datetime(&parse("2000-01-01T00:00:00Z")).unwrap();
        bytes[0] = 2;
        assert!(decode_datetime(&bytes, TypeId::DateTime).is_err());
    }

    #[test]
    fn test_format_temporal() {
        let dt = encode_datetime(&parse("2017-06-01T10:30:00Z")).unwrap();
        assert_eq!(
            format_temporal(&dt, TypeId::DateTime).unwrap(),
            "2017-06-01T10:30:00Z"
        );

        let d = encode_date(NaiveDate::from_ymd_opt(1999, 12, 31).unwrap()).unwrap();
        assert_eq!(format_temporal(&d, TypeId::Date).unwrap(), "1999-12-31");
    }

    #[test]
    fn test_typed_constructors() {
        let v = TypedValue::date(NaiveDate::from_ymd_opt(2020, 2, 29).unwrap()).unwrap();
        assert_eq!(v.type_id(), TypeId::Date);

        let v = TypedValue::date_time(&parse("2020-02-29T12:00:00+01:00")).unwrap();
        assert_eq!(v.type_id(), TypeId::DateTime);
    }
}
