//! Tolerant serde helpers for payloads coming from the ERP API.
//!
//! The upstream service is loose about types: amounts arrive as numbers or
//! as numeric strings, flags may be `null`, ids may be strings. None of these
//! helpers ever fail; anything that cannot be read becomes "absent".

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a finite number from a JSON number or a numeric string
pub fn number_from_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Reads a string; other JSON types are treated as absent
pub fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// `Option<f64>` from number or string, `None` on anything else
pub fn deserialize_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

/// Same as [`deserialize_number`] but missing values become `0.0`
pub fn deserialize_number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_number(deserializer)?.unwrap_or(0.0))
}

/// Integer id from number or string (fractional part is dropped)
pub fn deserialize_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_number(deserializer)?.map(|n| n.trunc() as i64))
}

/// Integer with `0` as the fallback
pub fn deserialize_integer_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_integer(deserializer)?.unwrap_or(0))
}

/// Month number; negative or missing values become `0`
pub fn deserialize_month<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let month = deserialize_number(deserializer)?.unwrap_or(0.0);
    if month < 0.0 || month > u32::MAX as f64 {
        return Ok(0);
    }
    Ok(month.trunc() as u32)
}

/// `Option<String>`; non-string values are treated as absent
pub fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(text_from_value))
}

/// Plain `String` with an empty fallback
pub fn deserialize_text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_text(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_from_value() {
        assert_eq!(number_from_value(&json!(12.5)), Some(12.5));
        assert_eq!(number_from_value(&json!(" 1000 ")), Some(1000.0));
        assert_eq!(number_from_value(&json!("abc")), None);
        assert_eq!(number_from_value(&json!("NaN")), None);
        assert_eq!(number_from_value(&json!(null)), None);
        assert_eq!(number_from_value(&json!(true)), None);
    }

    #[test]
    fn test_text_from_value() {
        assert_eq!(text_from_value(&json!("YES")), Some("YES".to_string()));
        assert_eq!(text_from_value(&json!(1)), None);
        assert_eq!(text_from_value(&json!(null)), None);
    }
}
