//! Type contracts for tool inputs and outputs.
//!
//! A [`TypeContract`] is a data-only tree describing the shape of a JSON
//! value. Contracts carry no behaviour of their own: they are interpreted by
//! the [validator](super::validator) and rendered to JSON Schema for clients.

use serde_json::{Map, Value, json};

/// The declared shape of a value.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeContract {
    /// A JSON string.
    String,

    /// A JSON number (integer or floating point).
    Number,

    /// A JSON boolean.
    Boolean,

    /// One of a fixed set of literal values.
    Enum(Vec<Value>),

    /// A homogeneous array of values matching the nested contract.
    Array(Box<TypeContract>),

    /// An object with named fields, validated in declaration order.
    Object(Vec<FieldSpec>),
}

/// Whether an object field must be supplied.
#[derive(Debug, Clone, PartialEq)]
pub enum Presence {
    /// The field must be present and non-null.
    Required,

    /// The field may be omitted. When a default is declared it is
    /// substituted for a missing value.
    Optional { default: Option<Value> },
}

/// A named field within an object contract.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub description: Option<String>,
    pub contract: TypeContract,
    pub presence: Presence,
}

impl TypeContract {
    /// Build an object contract from its fields.
    pub fn object(fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        Self::Object(fields.into_iter().collect())
    }

    /// Build an array contract.
    pub fn array(items: TypeContract) -> Self {
        Self::Array(Box::new(items))
    }

    /// Build an enum contract from string literals.
    pub fn string_enum<I, S>(literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum(
            literals
                .into_iter()
                .map(|s| Value::String(s.into()))
                .collect(),
        )
    }

    /// Short human-readable name of the expected shape, used in
    /// validation errors.
    pub fn expected(&self) -> String {
        match self {
            Self::String => "string".to_string(),
            Self::Number => "number".to_string(),
            Self::Boolean => "boolean".to_string(),
            Self::Enum(literals) => {
                let listed: Vec<String> = literals.iter().map(Value::to_string).collect();
                format!("one of [{}]", listed.join(", "))
            }
            Self::Array(_) => "array".to_string(),
            Self::Object(_) => "object".to_string(),
        }
    }

    /// Whether this contract describes an object.
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Render the contract as a JSON Schema fragment.
    pub fn to_json_schema(&self) -> Value {
        match self {
            Self::String => json!({ "type": "string" }),
            Self::Number => json!({ "type": "number" }),
            Self::Boolean => json!({ "type": "boolean" }),
            Self::Enum(literals) => {
                let mut schema = Map::new();
                if !literals.is_empty() && literals.iter().all(Value::is_string) {
                    schema.insert("type".to_string(), json!("string"));
                }
                schema.insert("enum".to_string(), Value::Array(literals.clone()));
                Value::Object(schema)
            }
            Self::Array(items) => json!({
                "type": "array",
                "items": items.to_json_schema(),
            }),
            Self::Object(fields) => {
                let mut properties = Map::new();
                let mut required = Vec::new();

                for field in fields {
                    let mut schema = field.contract.to_json_schema();
                    if let Value::Object(ref mut obj) = schema {
                        if let Some(description) = &field.description {
                            obj.insert("description".to_string(), json!(description));
                        }
                        if let Presence::Optional {
                            default: Some(default),
                        } = &field.presence
                        {
                            obj.insert("default".to_string(), default.clone());
                        }
                    }
                    if field.is_required() {
                        required.push(json!(field.name));
                    }
                    properties.insert(field.name.clone(), schema);
                }

                let mut schema = Map::new();
                schema.insert("type".to_string(), json!("object"));
                schema.insert("properties".to_string(), Value::Object(properties));
                if !required.is_empty() {
                    schema.insert("required".to_string(), Value::Array(required));
                }
                Value::Object(schema)
            }
        }
    }

    /// Render the contract as a JSON Schema object map, as rmcp expects for
    /// tool input and output schemas.
    pub fn to_schema_object(&self) -> Map<String, Value> {
        match self.to_json_schema() {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

impl FieldSpec {
    /// A required field.
    pub fn required(name: impl Into<String>, contract: TypeContract) -> Self {
        Self {
            name: name.into(),
            description: None,
            contract,
            presence: Presence::Required,
        }
    }

    /// An optional field without a default.
    pub fn optional(name: impl Into<String>, contract: TypeContract) -> Self {
        Self {
            name: name.into(),
            description: None,
            contract,
            presence: Presence::Optional { default: None },
        }
    }

    /// An optional field that falls back to `default` when absent.
    pub fn with_default(name: impl Into<String>, contract: TypeContract, default: Value) -> Self {
        Self {
            name: name.into(),
            description: None,
            contract,
            presence: Presence::Optional {
                default: Some(default),
            },
        }
    }

    /// Attach a description shown to clients.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_required(&self) -> bool {
        matches!(self.presence, Presence::Required)
    }

    pub fn default_value(&self) -> Option<&Value> {
        match &self.presence {
            Presence::Optional { default } => default.as_ref(),
            Presence::Required => None,
        }
    }
}

/// The output contract shared by every tool that answers with text:
/// `{ content: [{ type: "text", text: string }] }`.
pub fn text_content_contract() -> TypeContract {
    TypeContract::object([FieldSpec::required(
        "content",
        TypeContract::array(TypeContract::object([
            FieldSpec::required("type", TypeContract::string_enum(["text"])),
            FieldSpec::required("text", TypeContract::String),
        ])),
    )])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greet_contract() -> TypeContract {
        TypeContract::object([
            FieldSpec::required("name", TypeContract::String).describe("Who to greet"),
            FieldSpec::with_default(
                "language",
                TypeContract::string_enum(["ko", "en"]),
                json!("en"),
            ),
        ])
    }

    #[test]
    fn test_object_schema_lists_required_fields_only() {
        let schema = greet_contract().to_json_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["name"]));
        assert_eq!(schema["properties"]["name"]["description"], "Who to greet");
    }

    #[test]
    fn test_enum_schema_carries_default() {
        let schema = greet_contract().to_json_schema();
        let language = &schema["properties"]["language"];
        assert_eq!(language["type"], "string");
        assert_eq!(language["enum"], json!(["ko", "en"]));
        assert_eq!(language["default"], "en");
    }

    #[test]
    fn test_mixed_enum_has_no_type() {
        let schema = TypeContract::Enum(vec![json!(1), json!("one")]).to_json_schema();
        assert!(schema.get("type").is_none());
    }

    #[test]
    fn test_array_schema() {
        let schema = TypeContract::array(TypeContract::String).to_json_schema();
        assert_eq!(schema, json!({ "type": "array", "items": { "type": "string" } }));
    }

    #[test]
    fn test_expected_descriptions() {
        assert_eq!(TypeContract::Number.expected(), "number");
        assert_eq!(
            TypeContract::string_enum(["+", "-"]).expected(),
            r#"one of ["+", "-"]"#
        );
    }

    #[test]
    fn test_text_content_contract_is_object() {
        let contract = text_content_contract();
        assert!(contract.is_object());
        assert_eq!(contract.to_schema_object()["required"], json!(["content"]));
    }
}
