//! Pure request-shape checks. No I/O happens here; every function maps a
//! malformed input to its domain error before any store call is made.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::models::TimeSlot;
use crate::utils::ApiError;

/// An event ID must be a non-empty string.
pub fn require_id(id: &str) -> Result<(), ApiError> {
    if id.is_empty() {
        return Err(ApiError::MissingId);
    }

    Ok(())
}

/// A time slot must be present with both instants set. Anything at or before
/// the Unix epoch counts as unset, the zero-value a decoder leaves behind for
/// a missing field. Start/end ordering is deliberately not checked. Returns
/// the validated slot so callers do not have to unwrap the option again.
pub fn require_slot(slot: Option<&TimeSlot>) -> Result<TimeSlot, ApiError> {
    let slot = slot.ok_or(ApiError::MissingSlot)?;

    if is_unset(slot.start) || is_unset(slot.end) {
        return Err(ApiError::InvalidTime);
    }

    Ok(*slot)
}

fn is_unset(instant: DateTime<Utc>) -> bool {
    instant <= DateTime::<Utc>::UNIX_EPOCH
}

/// Decodes a raw request body. An empty payload or the literal `null` is a
/// distinct failure from a payload that does not match the target shape.
pub fn decode_body<T: DeserializeOwned>(raw: &[u8]) -> Result<T, ApiError> {
    if raw.is_empty() || raw == b"null" {
        return Err(ApiError::EmptyBody);
    }

    serde_json::from_slice(raw).map_err(|err| {
        tracing::debug!(error = %err, "request body failed to decode");
        ApiError::MalformedBody
    })
}

/// Parses the `limit` query parameter. Absent or empty means 0, which the
/// store interprets as "use the default page size".
pub fn parse_limit(raw: Option<&str>) -> Result<usize, ApiError> {
    match raw {
        None | Some("") => Ok(0),
        Some(value) => value.parse().map_err(|_| ApiError::NotInteger),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn slot(start_secs: i64, end_secs: i64) -> TimeSlot {
        TimeSlot {
            start: Utc.timestamp_opt(start_secs, 0).unwrap(),
            end: Utc.timestamp_opt(end_secs, 0).unwrap(),
        }
    }

    #[test]
    fn empty_id_is_rejected() {
        assert!(matches!(require_id(""), Err(ApiError::MissingId)));
        assert!(require_id("0000000001-0000000002-3141592678").is_ok());
    }

    #[test]
    fn absent_slot_is_missing() {
        assert!(matches!(require_slot(None), Err(ApiError::MissingSlot)));
    }

    #[test]
    fn epoch_instants_are_invalid() {
        let missing_start = slot(0, 1_700_000_000);
        assert!(matches!(
            require_slot(Some(&missing_start)),
            Err(ApiError::InvalidTime)
        ));

        let missing_end = slot(1_700_000_000, 0);
        assert!(matches!(
            require_slot(Some(&missing_end)),
            Err(ApiError::InvalidTime)
        ));

        let valid = slot(1_700_000_000, 1_700_003_600);
        assert_eq!(require_slot(Some(&valid)).unwrap(), valid);
    }

    #[test]
    fn start_after_end_is_accepted() {
        // Ordering between start and end is intentionally unchecked.
        assert!(require_slot(Some(&slot(1_700_003_600, 1_700_000_000))).is_ok());
    }

    #[test]
    fn body_decoding_distinguishes_empty_from_malformed() {
        use crate::models::CancelRequest;

        assert!(matches!(
            decode_body::<CancelRequest>(b""),
            Err(ApiError::EmptyBody)
        ));
        assert!(matches!(
            decode_body::<CancelRequest>(b"null"),
            Err(ApiError::EmptyBody)
        ));
        assert!(matches!(
            decode_body::<CancelRequest>(b"{not json"),
            Err(ApiError::MalformedBody)
        ));

        let decoded: CancelRequest = decode_body(br#"{"id":"abc"}"#).unwrap();
        assert_eq!(decoded.id, "abc");
    }

    #[test]
    fn limit_parsing() {
        assert_eq!(parse_limit(None).unwrap(), 0);
        assert_eq!(parse_limit(Some("")).unwrap(), 0);
        assert_eq!(parse_limit(Some("25")).unwrap(), 25);
        assert!(matches!(
            parse_limit(Some("twenty")),
            Err(ApiError::NotInteger)
        ));
    }
}
