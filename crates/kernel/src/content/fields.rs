//! Compile-time field allow-lists.
//!
//! Each resource profile lists the payload keys it recognises, paired with
//! a typed setter. Keys outside the list are ignored silently; a recognised
//! key carrying the wrong JSON type is rejected.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::ContentError;
use crate::models::{FieldChanges, TextValue};

/// Setter that writes one recognised payload value into a change set.
pub type FieldSetter = fn(&mut FieldChanges, &Value, &str) -> Result<(), ContentError>;

/// A recognised, mutable field.
#[derive(Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    set: FieldSetter,
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec").field("name", &self.name).finish()
    }
}

pub const TITLE: FieldSpec = FieldSpec {
    name: "title",
    set: set_title,
};

pub const BODY: FieldSpec = FieldSpec {
    name: "body",
    set: set_body,
};

pub const STATUS: FieldSpec = FieldSpec {
    name: "status",
    set: set_status,
};

/// Body input: a bare string or `{ "value": ..., "format": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BodyInput {
    Plain(String),
    Formatted {
        value: String,
        #[serde(default)]
        format: Option<String>,
    },
}

fn set_title(changes: &mut FieldChanges, value: &Value, _: &str) -> Result<(), ContentError> {
    changes.title = Some(parse_title(value)?);
    Ok(())
}

fn set_body(
    changes: &mut FieldChanges,
    value: &Value,
    default_format: &str,
) -> Result<(), ContentError> {
    changes.body = Some(parse_body(value, default_format)?);
    Ok(())
}

fn set_status(changes: &mut FieldChanges, value: &Value, _: &str) -> Result<(), ContentError> {
    changes.status = Some(parse_status(value)?);
    Ok(())
}

/// Parse a title. Whitespace-only titles count as empty.
pub fn parse_title(value: &Value) -> Result<String, ContentError> {
    match value.as_str() {
        Some(s) if !s.trim().is_empty() => Ok(s.to_string()),
        Some(_) => Err(ContentError::invalid("title must not be empty")),
        None => Err(ContentError::invalid("title must be a string")),
    }
}

/// Parse a body value, applying `default_format` when none is given.
pub fn parse_body(value: &Value, default_format: &str) -> Result<TextValue, ContentError> {
    let input = BodyInput::deserialize(value).map_err(|_| {
        ContentError::invalid("body must be a string or an object with a \"value\" string")
    })?;

    let (value, format) = match input {
        BodyInput::Plain(value) => (value, None),
        BodyInput::Formatted { value, format } => (value, format),
    };

    Ok(TextValue {
        value,
        format: Some(format.unwrap_or_else(|| default_format.to_string())),
    })
}

/// Parse a published flag. Accepts booleans and the integers 0/1.
pub fn parse_status(value: &Value) -> Result<bool, ContentError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) if n.as_i64() == Some(0) => Ok(false),
        Value::Number(n) if n.as_i64() == Some(1) => Ok(true),
        _ => Err(ContentError::invalid("status must be a boolean")),
    }
}

/// Collect every recognised key of `payload` into a change set.
pub fn collect_changes(
    allowed: &[FieldSpec],
    payload: &Map<String, Value>,
    default_format: &str,
) -> Result<FieldChanges, ContentError> {
    let mut changes = FieldChanges::default();
    for (name, value) in payload {
        if let Some(spec) = allowed.iter().find(|spec| spec.name == name) {
            (spec.set)(&mut changes, value, default_format)?;
        }
    }
    Ok(changes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn unknown_and_immutable_keys_are_ignored() {
        let payload = object(json!({
            "unknownField": "x",
            "id": 99,
            "type": "page",
            "created": 1,
        }));
        let changes = collect_changes(&[TITLE, BODY, STATUS], &payload, "basic_html").unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn keys_outside_allow_list_are_ignored() {
        let payload = object(json!({"title": "New", "status": false}));
        let changes = collect_changes(&[TITLE, BODY], &payload, "basic_html").unwrap();
        assert_eq!(changes.title.as_deref(), Some("New"));
        assert_eq!(changes.status, None);
    }

    #[test]
    fn plain_body_gets_default_format() {
        let body = parse_body(&json!("World"), "basic_html").unwrap();
        assert_eq!(body.value, "World");
        assert_eq!(body.format.as_deref(), Some("basic_html"));
    }

    #[test]
    fn formatted_body_keeps_its_format() {
        let body = parse_body(
            &json!({"value": "<p>Hi</p>", "format": "full_html"}),
            "basic_html",
        )
        .unwrap();
        assert_eq!(body.value, "<p>Hi</p>");
        assert_eq!(body.format.as_deref(), Some("full_html"));
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(matches!(
            parse_title(&json!(42)),
            Err(ContentError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_title(&json!("   ")),
            Err(ContentError::InvalidInput(_))
        ));
        assert!(parse_body(&json!(["a"]), "basic_html").is_err());
        assert!(parse_status(&json!("yes")).is_err());
        assert!(parse_status(&json!(2)).is_err());
    }

    #[test]
    fn status_accepts_integers() {
        assert!(parse_status(&json!(1)).unwrap());
        assert!(!parse_status(&json!(0)).unwrap());
        assert!(parse_status(&json!(true)).unwrap());
    }

    #[test]
    fn blank_titles_are_rejected() {
        for title in [json!(""), json!("   "), json!("\t\n")] {
            assert!(matches!(
                parse_title(&title),
                Err(ContentError::InvalidInput(_))
            ));
        }
        assert_eq!(parse_title(&json!(" Padded ")).unwrap(), " Padded ");
    }
}
