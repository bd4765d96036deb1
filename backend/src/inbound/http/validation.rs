//! Shared request-parsing helpers for inbound HTTP adapters.

use serde::{Deserialize, Deserializer};

use crate::domain::{Error, RecordId, Resource};

/// Deserialise a present field as `Some`, keeping `null` as `Some(None)`.
///
/// Paired with `#[serde(default)]` so an absent field stays `None`; partial
/// updates can then tell "leave unchanged" apart from "set to null".
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Parse a record identifier from a path segment.
///
/// A segment that is not an integer cannot name a record, so it is reported
/// with the resource's not-found error.
pub(crate) fn parse_record_id<R: Resource>(raw: &str) -> Result<RecordId, Error> {
    raw.trim().parse().map_err(|_| R::not_found())
}

/// Collapse an explicit `null` on a required field to an empty string.
///
/// The domain rejects blank required fields, so `null` is refused with the
/// same message as `""`.
pub(crate) fn required_change(value: Option<Option<String>>) -> Option<String> {
    value.map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Car, ErrorCode};
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_some")]
        color: Option<Option<String>>,
    }

    #[rstest]
    #[case(r#"{}"#, None)]
    #[case(r#"{"color":null}"#, Some(None))]
    #[case(r#"{"color":"Red"}"#, Some(Some("Red".to_owned())))]
    fn absent_null_and_value_are_distinct(
        #[case] raw: &str,
        #[case] expected: Option<Option<String>>,
    ) {
        let patch: Patch = serde_json::from_str(raw).expect("valid JSON");
        assert_eq!(patch.color, expected);
    }

    #[rstest]
    #[case("12", Ok(12))]
    #[case(" 7 ", Ok(7))]
    fn numeric_segments_parse(#[case] raw: &str, #[case] expected: Result<RecordId, ()>) {
        assert_eq!(parse_record_id::<Car>(raw).map_err(|_| ()), expected);
    }

    #[rstest]
    #[case("abc")]
    #[case("1.5")]
    #[case("")]
    fn non_numeric_segments_are_not_found(#[case] raw: &str) {
        let error = parse_record_id::<Car>(raw).expect_err("not an id");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "Car not found");
    }

    #[rstest]
    fn null_required_change_becomes_blank() {
        assert_eq!(required_change(Some(None)), Some(String::new()));
        assert_eq!(required_change(None), None);
    }
}
