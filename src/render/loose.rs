// src/render/loose.rs
// =============================================================================
// Forgiving field deserializers for content records.
//
// The JSON files are edited by hand and nothing validates them. One record
// with `"bio": null` or `"year": "2021"` must not take the whole file down,
// so each field accepts whatever JSON value it is given and turns it into
// something displayable:
// - null becomes the field's default
// - numbers and booleans become their text
// - a lone string where a list is expected becomes a one-item list
// =============================================================================

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Text of a JSON value as a template would show it
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value_text(&value))
}

pub fn optional_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(value_text(&other)),
    })
}

pub fn strings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(value_text)
            .collect(),
        other => vec![value_text(&other)],
    })
}

/// Accepts 2021, 2021.0 and "2021"; anything else is no year
pub fn year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Truthiness the way the data files use it: true, non-zero, non-empty
pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "false",
        Value::Array(_) | Value::Object(_) => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Row {
        #[serde(deserialize_with = "string")]
        text: String,
        #[serde(deserialize_with = "optional_string")]
        maybe: Option<String>,
        #[serde(deserialize_with = "strings")]
        list: Vec<String>,
        #[serde(deserialize_with = "year")]
        year: Option<i32>,
        #[serde(deserialize_with = "flag")]
        on: bool,
    }

    fn row(json: &str) -> Row {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_nulls_become_defaults() {
        let r = row(r#"{"text":null,"maybe":null,"list":null,"year":null,"on":null}"#);
        assert_eq!(r.text, "");
        assert_eq!(r.maybe, None);
        assert!(r.list.is_empty());
        assert_eq!(r.year, None);
        assert!(!r.on);
    }

    #[test]
    fn test_scalars_become_text() {
        let r = row(r#"{"text":42,"maybe":true,"list":"solo"}"#);
        assert_eq!(r.text, "42");
        assert_eq!(r.maybe.as_deref(), Some("true"));
        assert_eq!(r.list, vec!["solo"]);

        let r = row(r#"{"list":["a",1,null]}"#);
        assert_eq!(r.list, vec!["a", "1"]);
    }

    #[test]
    fn test_year_forms() {
        assert_eq!(row(r#"{"year":2021}"#).year, Some(2021));
        assert_eq!(row(r#"{"year":"2021"}"#).year, Some(2021));
        assert_eq!(row(r#"{"year":2021.0}"#).year, Some(2021));
        assert_eq!(row(r#"{"year":"soon"}"#).year, None);
    }

    #[test]
    fn test_flag_truthiness() {
        assert!(row(r#"{"on":true}"#).on);
        assert!(row(r#"{"on":1}"#).on);
        assert!(row(r#"{"on":"yes"}"#).on);
        assert!(!row(r#"{"on":0}"#).on);
        assert!(!row(r#"{"on":""}"#).on);
        assert!(!row(r#"{"on":"false"}"#).on);
    }
}
