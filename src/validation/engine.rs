use crate::error::{Result, SwaggerValidationError};
use jsonschema::paths::{LazyLocation, Location};
use jsonschema::{Draft, Keyword, ValidationError, Validator};
use serde_json::{Map, Value};

/// Keywords that may appear in a response schema without carrying any
/// validation meaning of their own
pub const OPAQUE_KEYWORDS: [&str; 2] = ["components", "xml"];

/// Accepts any instance
struct OpaqueKeyword;

impl Keyword for OpaqueKeyword {
    fn validate<'i>(&self, _instance: &'i Value, _location: &LazyLocation) -> std::result::Result<(), ValidationError<'i>> {
        Ok(())
    }

    fn is_valid(&self, _instance: &Value) -> bool {
        true
    }
}

fn opaque_keyword<'a>(
    _parent: &'a Map<String, Value>,
    _value: &'a Value,
    _path: Location,
) -> std::result::Result<Box<dyn Keyword>, ValidationError<'a>> {
    Ok(Box::new(OpaqueKeyword))
}

/// JSON Schema draft matching the document's `openapi` version
pub fn draft_for(document: &Value) -> Draft {
    match document.get("openapi").and_then(Value::as_str) {
        Some(version) if version.starts_with("3.1") => Draft::Draft202012,
        _ => Draft::Draft7,
    }
}

/// Compile a resolved response schema.
///
/// Unknown keywords are ignored and string formats (date-time, email, uri,
/// uuid, ...) are checked.
pub fn compile(schema: &Value, draft: Draft) -> Result<Validator> {
    let mut options = jsonschema::options();
    options.with_draft(draft).should_validate_formats(true);

    for keyword in OPAQUE_KEYWORDS {
        options.with_keyword(keyword, opaque_keyword);
    }

    options
        .build(schema)
        .map_err(|e| SwaggerValidationError::SchemaCompile(e.to_string()))
}

/// Validate `instance`, joining every reported error into one message
pub fn check(validator: &Validator, instance: &Value) -> Result<()> {
    let errors: Vec<String> = validator
        .iter_errors(instance)
        .map(|err| {
            let path = err.instance_path.to_string();
            format!("data{}: {}", path, err)
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SwaggerValidationError::SchemaValidation(errors.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validate(schema: Value, instance: Value) -> Result<()> {
        let validator = compile(&schema, Draft::Draft7)?;
        check(&validator, &instance)
    }

    #[test]
    fn test_opaque_keywords_accepted() {
        let schema = json!({
            "type": "object",
            "xml": { "name": "Pet" },
            "components": { "schemas": { "Pet": { "type": "object" } } },
            "properties": { "name": { "type": "string", "xml": { "attribute": true } } }
        });

        assert!(validate(schema, json!({ "name": "Rex" })).is_ok());
    }

    #[test]
    fn test_formats_checked() {
        let schema = json!({
            "type": "object",
            "properties": {
                "created": { "type": "string", "format": "date-time" },
                "email": { "type": "string", "format": "email" }
            }
        });

        assert!(validate(schema.clone(), json!({ "created": "2024-01-01T00:00:00Z", "email": "a@b.io" })).is_ok());
        assert!(validate(schema.clone(), json!({ "created": "yesterday" })).is_err());
        assert!(validate(schema, json!({ "email": "not-an-email" })).is_err());
    }

    #[test]
    fn test_unknown_formats_and_keywords_ignored() {
        let schema = json!({
            "type": "integer",
            "format": "int64",
            "nullable": false,
            "x-internal": true
        });

        assert!(validate(schema, json!(42)).is_ok());
    }

    #[test]
    fn test_errors_joined() {
        let schema = json!({
            "type": "object",
            "properties": { "age": { "type": "integer" } },
            "required": ["name"]
        });

        let err = validate(schema, json!({ "age": "old" })).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("name"));
        assert!(message.contains("/age"));
        assert!(message.contains(", "));
    }

    #[test]
    fn test_draft_for_version() {
        assert_eq!(draft_for(&json!({ "openapi": "3.1.0" })), Draft::Draft202012);
        assert_eq!(draft_for(&json!({ "openapi": "3.0.3" })), Draft::Draft7);
        assert_eq!(draft_for(&json!({})), Draft::Draft7);
    }
}
