//! Serde adapters for integer identifiers carried as JSON strings.
//!
//! Producers write 64-bit ids as strings so double-precision consumers never
//! round them; consumers may send them back either as strings or as plain
//! numbers. Use with `#[serde(with = "long_id_normalizer::serde_ids::string")]`.

use std::fmt::Display;
use std::str::FromStr;

use serde_json::{Number, Value};

use crate::constants::MAX_SAFE_INTEGER;
use crate::error::{NormalizerError, Result};

/// Whether `n` is exactly representable as an `f64`
pub fn is_safe_integer(n: i128) -> bool {
    n.unsigned_abs() <= MAX_SAFE_INTEGER as u128
}

/// Whether a JSON number would lose precision in a double-precision consumer.
/// Non-integers are not identifiers and never count as exceeding the range.
pub fn exceeds_safe_range(n: &Number) -> bool {
    if n.is_f64() {
        return false;
    }
    match n.to_string().parse::<i128>() {
        Ok(value) => !is_safe_integer(value),
        // integer text wider than i128
        Err(_) => n.to_string().bytes().all(|b| b.is_ascii_digit() || b == b'-'),
    }
}

/// Parse identifier text; empty text is an absent id
pub fn parse_id<T: FromStr>(raw: &str) -> Result<Option<T>> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<T>()
        .map(Some)
        .map_err(|_| NormalizerError::InvalidId(raw.to_string()))
}

/// Parse an identifier out of a JSON string or number; `null` is an absent id
pub fn parse_id_value<T: FromStr>(value: &Value) -> Result<Option<T>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => parse_id(s),
        Value::Number(n) => parse_id(&n.to_string()),
        other => Err(NormalizerError::InvalidId(other.to_string())),
    }
}

/// Required id: serialized as a string, deserialized from a string or number
pub mod string {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<T, S>(value: &T, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> std::result::Result<T, D::Error>
    where
        T: FromStr,
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        parse_id_value(&raw)
            .map_err(<D::Error as de::Error>::custom)?
            .ok_or_else(|| <D::Error as de::Error>::custom("identifier is null or empty"))
    }
}

/// Optional id: `null`, `""` and absent (with `#[serde(default)]`) map to `None`
pub mod option_string {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        match value {
            Some(id) => serializer.collect_str(id),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
    where
        T: FromStr,
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        parse_id_value(&raw).map_err(<D::Error as de::Error>::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_safe_integer_bounds() {
        assert!(is_safe_integer(MAX_SAFE_INTEGER as i128));
        assert!(is_safe_integer(-(MAX_SAFE_INTEGER as i128)));
        assert!(!is_safe_integer(MAX_SAFE_INTEGER as i128 + 1));
        assert!(!is_safe_integer(1207279389033627649));
    }

    #[test]
    fn test_exceeds_safe_range() {
        let big: Value = serde_json::from_str("9007199254740993").unwrap();
        let wide: Value = serde_json::from_str("123456789012345678901234567890123456789012").unwrap();
        let Value::Number(big) = big else { panic!("expected number") };
        let Value::Number(wide) = wide else { panic!("expected number") };
        assert!(exceeds_safe_range(&big));
        assert!(exceeds_safe_range(&wide));
        assert!(!exceeds_safe_range(&Number::from(42u64)));
    }

    #[test]
    fn test_parse_id_rules() {
        assert_eq!(parse_id::<u64>("").unwrap(), None);
        assert_eq!(parse_id::<u64>("1207279389033627649").unwrap(), Some(1207279389033627649));
        assert_eq!(parse_id::<i64>("-3").unwrap(), Some(-3));
        assert!(matches!(parse_id::<u64>("abc"), Err(NormalizerError::InvalidId(s)) if s == "abc"));
    }

    #[test]
    fn test_parse_id_value_shapes() {
        assert_eq!(parse_id_value::<u64>(&json!(null)).unwrap(), None);
        assert_eq!(parse_id_value::<u64>(&json!("")).unwrap(), None);
        assert_eq!(parse_id_value::<u64>(&json!("17")).unwrap(), Some(17));
        assert_eq!(parse_id_value::<u64>(&json!(17)).unwrap(), Some(17));
        assert!(parse_id_value::<u64>(&json!(true)).is_err());
        assert!(parse_id_value::<u64>(&json!(1.5)).is_err());
    }
}
