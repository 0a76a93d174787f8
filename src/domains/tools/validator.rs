//! Schema validation of JSON values against [`TypeContract`]s.
//!
//! Validation is fail-fast: the first mismatch found while walking the
//! contract in declaration order is reported, and nothing else is collected.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use super::contract::{FieldSpec, TypeContract};

/// Path reported for a mismatch at the root of the value.
const ROOT_PATH: &str = "$";

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field '{field}': expected {expected}, got {got}")]
pub struct ValidationError {
    /// Path of the offending field, e.g. `focusAreas[1]`.
    pub field: String,

    /// The shape the contract asked for.
    pub expected: String,

    /// What was actually supplied.
    pub got: String,
}

impl ValidationError {
    fn new(field: &str, expected: impl Into<String>, got: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            expected: expected.into(),
            got: got.into(),
        }
    }
}

/// Validate `value` against `contract`.
///
/// Returns the validated value: defaults substituted for absent optional
/// fields, undeclared object keys dropped.
pub fn validate(contract: &TypeContract, value: &Value) -> Result<Value, ValidationError> {
    validate_at(contract, value, ROOT_PATH)
}

fn validate_at(contract: &TypeContract, value: &Value, path: &str) -> Result<Value, ValidationError> {
    match contract {
        TypeContract::String => match value {
            Value::String(_) => Ok(value.clone()),
            other => Err(ValidationError::new(path, contract.expected(), describe(other))),
        },
        TypeContract::Number => match value {
            Value::Number(_) => Ok(value.clone()),
            other => Err(ValidationError::new(path, contract.expected(), describe(other))),
        },
        TypeContract::Boolean => match value {
            Value::Bool(_) => Ok(value.clone()),
            other => Err(ValidationError::new(path, contract.expected(), describe(other))),
        },
        TypeContract::Enum(literals) => {
            if literals.contains(value) {
                Ok(value.clone())
            } else {
                Err(ValidationError::new(path, contract.expected(), value.to_string()))
            }
        }
        TypeContract::Array(items) => match value {
            Value::Array(elements) => elements
                .iter()
                .enumerate()
                .map(|(index, element)| validate_at(items, element, &format!("{path}[{index}]")))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            other => Err(ValidationError::new(path, contract.expected(), describe(other))),
        },
        TypeContract::Object(fields) => match value {
            Value::Object(object) => validate_object(fields, object, path),
            other => Err(ValidationError::new(path, contract.expected(), describe(other))),
        },
    }
}

fn validate_object(
    fields: &[FieldSpec],
    object: &Map<String, Value>,
    path: &str,
) -> Result<Value, ValidationError> {
    let mut validated = Map::new();

    for field in fields {
        let field_path = child_path(path, &field.name);
        let supplied = object.get(&field.name).filter(|v| !v.is_null());

        match supplied {
            Some(value) => match validate_at(&field.contract, value, &field_path) {
                Ok(value) => {
                    validated.insert(field.name.clone(), value);
                }
                Err(err) => match (&field.contract, field.default_value()) {
                    // An optional enum with an unlisted value takes its default.
                    (TypeContract::Enum(_), Some(default)) => {
                        debug!(
                            field = %field_path,
                            got = %err.got,
                            "Unlisted enum value replaced by default"
                        );
                        validated.insert(field.name.clone(), default.clone());
                    }
                    _ => return Err(err),
                },
            },
            None if field.is_required() => {
                let got = if object.contains_key(&field.name) {
                    "null"
                } else {
                    "missing"
                };
                return Err(ValidationError::new(
                    &field_path,
                    field.contract.expected(),
                    got,
                ));
            }
            None => {
                if let Some(default) = field.default_value() {
                    validated.insert(field.name.clone(), default.clone());
                }
            }
        }
    }

    Ok(Value::Object(validated))
}

fn child_path(parent: &str, name: &str) -> String {
    if parent == ROOT_PATH {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

/// Name the JSON type of a value for error reporting.
fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn weather_contract() -> TypeContract {
        TypeContract::object([
            FieldSpec::required("latitude", TypeContract::Number),
            FieldSpec::required("longitude", TypeContract::Number),
            FieldSpec::with_default("timezone", TypeContract::String, json!("auto")),
            FieldSpec::with_default("forecastDays", TypeContract::Number, json!(7)),
        ])
    }

    fn review_contract() -> TypeContract {
        TypeContract::object([
            FieldSpec::required("code", TypeContract::String),
            FieldSpec::optional("language", TypeContract::String),
            FieldSpec::optional("focusAreas", TypeContract::array(TypeContract::String)),
        ])
    }

    #[test]
    fn test_defaults_are_substituted() {
        let validated =
            validate(&weather_contract(), &json!({ "latitude": 37.5, "longitude": 127.0 }))
                .unwrap();
        assert_eq!(validated["timezone"], "auto");
        assert_eq!(validated["forecastDays"], 7);
    }

    #[test]
    fn test_supplied_values_win_over_defaults() {
        let validated = validate(
            &weather_contract(),
            &json!({ "latitude": 1, "longitude": 2, "timezone": "Asia/Seoul", "forecastDays": 3 }),
        )
        .unwrap();
        assert_eq!(validated["timezone"], "Asia/Seoul");
        assert_eq!(validated["forecastDays"], 3);
    }

    #[test]
    fn test_missing_required_field() {
        let err = validate(&weather_contract(), &json!({ "latitude": 1 })).unwrap_err();
        assert_eq!(err.field, "longitude");
        assert_eq!(err.expected, "number");
        assert_eq!(err.got, "missing");
    }

    #[test]
    fn test_null_required_field() {
        let err =
            validate(&weather_contract(), &json!({ "latitude": null, "longitude": 1 })).unwrap_err();
        assert_eq!(err.field, "latitude");
        assert_eq!(err.got, "null");
    }

    #[test]
    fn test_wrong_primitive_type() {
        let err = validate(&weather_contract(), &json!({ "latitude": "north", "longitude": 1 }))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError {
                field: "latitude".to_string(),
                expected: "number".to_string(),
                got: "string".to_string(),
            }
        );
    }

    #[test]
    fn test_first_failure_is_reported() {
        let err = validate(&weather_contract(), &json!({ "latitude": true, "longitude": "x" }))
            .unwrap_err();
        assert_eq!(err.field, "latitude");
    }

    #[test]
    fn test_optional_without_default_is_omitted() {
        let validated = validate(&review_contract(), &json!({ "code": "fn main() {}" })).unwrap();
        assert_eq!(validated, json!({ "code": "fn main() {}" }));
    }

    #[test]
    fn test_null_optional_is_treated_as_absent() {
        let validated =
            validate(&review_contract(), &json!({ "code": "x", "language": null })).unwrap();
        assert!(validated.get("language").is_none());
    }

    #[test]
    fn test_array_element_path() {
        let err = validate(
            &review_contract(),
            &json!({ "code": "x", "focusAreas": ["security", 3] }),
        )
        .unwrap_err();
        assert_eq!(err.field, "focusAreas[1]");
        assert_eq!(err.got, "number");
    }

    #[test]
    fn test_undeclared_keys_are_dropped() {
        let validated =
            validate(&review_contract(), &json!({ "code": "x", "extra": 1 })).unwrap();
        assert!(validated.get("extra").is_none());
    }

    #[test]
    fn test_required_enum_rejects_unlisted_value() {
        let contract = TypeContract::object([FieldSpec::required(
            "operator",
            TypeContract::string_enum(["+", "-", "*", "/"]),
        )]);
        let err = validate(&contract, &json!({ "operator": "%" })).unwrap_err();
        assert_eq!(err.field, "operator");
        assert_eq!(err.got, r#""%""#);
    }

    #[test]
    fn test_optional_enum_falls_back_to_default() {
        let contract = TypeContract::object([FieldSpec::with_default(
            "language",
            TypeContract::string_enum(["ko", "en"]),
            json!("en"),
        )]);
        let validated = validate(&contract, &json!({ "language": "fr" })).unwrap();
        assert_eq!(validated["language"], "en");
    }

    #[test]
    fn test_optional_enum_without_default_fails() {
        let contract = TypeContract::object([FieldSpec::optional(
            "language",
            TypeContract::string_enum(["ko", "en"]),
        )]);
        assert!(validate(&contract, &json!({ "language": "fr" })).is_err());
    }

    #[test]
    fn test_nested_object_path() {
        let contract = TypeContract::object([FieldSpec::required(
            "content",
            TypeContract::array(TypeContract::object([FieldSpec::required(
                "text",
                TypeContract::String,
            )])),
        )]);
        let err = validate(&contract, &json!({ "content": [{ "text": 1 }] })).unwrap_err();
        assert_eq!(err.field, "content[0].text");
    }

    #[test]
    fn test_root_mismatch() {
        let err = validate(&review_contract(), &json!("not an object")).unwrap_err();
        assert_eq!(err.field, "$");
        assert_eq!(err.expected, "object");
    }

    #[test]
    fn test_validation_is_pure() {
        let input = json!({ "latitude": 1, "longitude": 2 });
        let first = validate(&weather_contract(), &input).unwrap();
        let second = validate(&weather_contract(), &input).unwrap();
        assert_eq!(first, second);
        assert_eq!(input, json!({ "latitude": 1, "longitude": 2 }));
    }
}
