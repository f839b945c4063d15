//! Response shapes declared per model call.
//!
//! A `ResponseShape` is sent to the model as its `responseSchema` and then
//! used to check the returned JSON before anything is deserialized into a
//! typed result.

use serde_json::{json, Map, Value};
use thiserror::Error;

/// Where and how a response diverged from the declared shape.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("at `{path}`: expected {expected}, found {found}")]
pub struct ShapeMismatch {
    pub path: String,
    pub expected: String,
    pub found: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub shape: ResponseShape,
    pub description: Option<&'static str>,
}

impl Field {
    pub fn new(name: &'static str, shape: ResponseShape) -> Self {
        Self {
            name,
            shape,
            description: None,
        }
    }

    pub fn described(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    String,
    Number,
    Array(Box<ResponseShape>),
    /// All declared fields are required. Undeclared fields are ignored.
    Object(Vec<Field>),
}

impl ResponseShape {
    pub fn array_of(items: ResponseShape) -> Self {
        ResponseShape::Array(Box::new(items))
    }

    pub fn string_list() -> Self {
        Self::array_of(ResponseShape::String)
    }

    /// Renders the shape in the model API's schema dialect.
    pub fn to_schema(&self) -> Value {
        match self {
            ResponseShape::String => json!({ "type": "STRING" }),
            ResponseShape::Number => json!({ "type": "NUMBER" }),
            ResponseShape::Array(items) => json!({
                "type": "ARRAY",
                "items": items.to_schema(),
            }),
            ResponseShape::Object(fields) => {
                let mut properties = Map::new();
                for field in fields {
                    let mut schema = field.shape.to_schema();
                    if let (Some(description), Some(obj)) =
                        (field.description, schema.as_object_mut())
                    {
                        obj.insert("description".to_string(), json!(description));
                    }
                    properties.insert(field.name.to_string(), schema);
                }
                let required: Vec<&str> = fields.iter().map(|f| f.name).collect();
                json!({
                    "type": "OBJECT",
                    "properties": properties,
                    "required": required,
                })
            }
        }
    }

    /// Checks `value` against the shape, reporting the first mismatch.
    pub fn check(&self, value: &Value) -> Result<(), ShapeMismatch> {
        self.check_at("$", value)
    }

    fn check_at(&self, path: &str, value: &Value) -> Result<(), ShapeMismatch> {
        match (self, value) {
            (ResponseShape::String, Value::String(_)) => Ok(()),
            (ResponseShape::Number, Value::Number(_)) => Ok(()),
            (ResponseShape::Array(items), Value::Array(values)) => {
                for (i, item) in values.iter().enumerate() {
                    items.check_at(&format!("{path}[{i}]"), item)?;
                }
                Ok(())
            }
            (ResponseShape::Object(fields), Value::Object(map)) => {
                for field in fields {
                    let field_path = format!("{path}.{}", field.name);
                    match map.get(field.name) {
                        Some(v) => field.shape.check_at(&field_path, v)?,
                        None => {
                            return Err(ShapeMismatch {
                                path: field_path,
                                expected: field.shape.type_name().to_string(),
                                found: "nothing".to_string(),
                            })
                        }
                    }
                }
                Ok(())
            }
            (shape, other) => Err(ShapeMismatch {
                path: path.to_string(),
                expected: shape.type_name().to_string(),
                found: json_type_name(other).to_string(),
            }),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            ResponseShape::String => "string",
            ResponseShape::Number => "number",
            ResponseShape::Array(_) => "array",
            ResponseShape::Object(_) => "object",
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_shape() -> ResponseShape {
        ResponseShape::Object(vec![
            Field::new("score", ResponseShape::Number),
            Field::new("missingKeywords", ResponseShape::string_list()),
        ])
    }

    #[test]
    fn test_string_list_schema() {
        assert_eq!(
            ResponseShape::string_list().to_schema(),
            json!({"type": "ARRAY", "items": {"type": "STRING"}})
        );
    }

    #[test]
    fn test_object_schema_lists_required_fields_and_descriptions() {
        let shape = ResponseShape::Object(vec![
            Field::new("id", ResponseShape::String).described("The same ID as the input"),
            Field::new("bullets", ResponseShape::string_list()),
        ]);
        let schema = shape.to_schema();
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["required"], json!(["id", "bullets"]));
        assert_eq!(
            schema["properties"]["id"]["description"],
            "The same ID as the input"
        );
        assert_eq!(schema["properties"]["bullets"]["type"], "ARRAY");
    }

    #[test]
    fn test_check_accepts_conforming_value() {
        let value = json!({"score": 80, "missingKeywords": ["Kafka"], "extra": true});
        assert!(match_shape().check(&value).is_ok());
    }

    #[test]
    fn test_check_rejects_missing_field() {
        let err = match_shape().check(&json!({"score": 80})).unwrap_err();
        assert_eq!(err.path, "$.missingKeywords");
        assert_eq!(err.found, "nothing");
    }

    #[test]
    fn test_check_rejects_wrong_item_type() {
        let err = ResponseShape::string_list()
            .check(&json!(["ok", 3]))
            .unwrap_err();
        assert_eq!(err.path, "$[1]");
        assert_eq!(err.expected, "string");
        assert_eq!(err.found, "number");
    }

    #[test]
    fn test_check_rejects_string_score() {
        let err = match_shape()
            .check(&json!({"score": "80", "missingKeywords": []}))
            .unwrap_err();
        assert_eq!(err.path, "$.score");
    }

    #[test]
    fn test_check_rejects_object_where_array_expected() {
        assert!(ResponseShape::string_list().check(&json!({})).is_err());
    }
}
