//! UTCTime / GeneralizedTime decoding
//!
//! The value length picks the format: exactly 13 bytes is UTCTime
//! (`YYMMDDHHMMSSZ`), anything else is read as GeneralizedTime
//! (`YYYYMMDDHHMMSSZ`). Two-digit years pivot at 50: `50..=99` map to the
//! 1900s and `00..=49` to the 2000s.

use chrono::{DateTime, TimeZone, Utc};

use crate::der::DerCursor;
use crate::error::{CertError, Result};

const UTC_TIME_LEN: usize = 13;

/// Decode a time value into a UTC instant. `field` names the value in errors.
pub fn parse_time(value: &[u8], field: &'static str) -> Result<DateTime<Utc>> {
    let text = std::str::from_utf8(value)
        .map_err(|_| CertError::malformed(field, "time value is not ASCII"))?;

    let digits = |start: usize, width: usize| -> Result<u32> {
        let part = text
            .get(start..start + width)
            .ok_or_else(|| CertError::malformed(field, format!("time value too short: {text:?}")))?;
        if !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CertError::malformed(
                field,
                format!("non-numeric time component {part:?}"),
            ));
        }
        part.parse::<u32>()
            .map_err(|e| CertError::malformed(field, e.to_string()))
    };

    let (year, offset) = if value.len() == UTC_TIME_LEN {
        let yy = digits(0, 2)?;
        let year = if yy >= 50 { 1900 + yy } else { 2000 + yy };
        (year, 2)
    } else {
        (digits(0, 4)?, 4)
    };

    let month = digits(offset, 2)?;
    let day = digits(offset + 2, 2)?;
    let hour = digits(offset + 4, 2)?;
    let minute = digits(offset + 6, 2)?;
    let second = digits(offset + 8, 2)?;

    // year is at most 9999, so the cast cannot wrap
    Utc.with_ymd_and_hms(year as i32, month, day, hour, minute, second)
        .single()
        .ok_or_else(|| CertError::malformed(field, format!("not a calendar instant: {text:?}")))
}

/// Read one Time TLV from the cursor and decode it.
pub fn extract_time(cursor: &mut DerCursor<'_>, field: &'static str) -> Result<DateTime<Utc>> {
    let (_, value) = cursor.read_tlv_value()?;
    parse_time(value, field)
}

/// Read the `Validity` SEQUENCE: `(notBefore, notAfter)`.
pub fn extract_validity(cursor: &mut DerCursor<'_>) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    cursor.read_header()?;
    let not_before = extract_time(cursor, "notBefore")?;
    let not_after = extract_time(cursor, "notAfter")?;
    Ok((not_before, not_after))
}
