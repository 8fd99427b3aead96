use super::coordinate::CoordinatePath;
use super::engine;
use super::openapi30;
use crate::error::{Result, SwaggerValidationError};
use crate::models::{RequestField, ValidationRequest};
use serde_json::Value;

/// The required parts of a [`ValidationRequest`], once present
#[derive(Debug, Clone, Copy)]
pub struct ResponseTarget<'a> {
    pub endpoint: &'a str,
    pub method: &'a str,
    pub status_code: u16,
    pub content_type: &'a str,
    pub response: &'a Value,
}

impl<'a> ResponseTarget<'a> {
    /// Check the required fields in order: endpoint, method, statusCode, responseSchema
    pub fn from_request(request: &'a ValidationRequest) -> Result<Self> {
        let endpoint = request
            .endpoint
            .as_deref()
            .filter(|e| !e.is_empty())
            .ok_or(SwaggerValidationError::MissingField(RequestField::Endpoint))?;

        let method = request
            .method
            .as_deref()
            .filter(|m| !m.is_empty())
            .ok_or(SwaggerValidationError::MissingField(RequestField::Method))?;

        let status_code = request
            .status_code
            .filter(|code| *code != 0)
            .ok_or(SwaggerValidationError::MissingField(RequestField::StatusCode))?;

        let response = request
            .response_schema
            .as_ref()
            .filter(|r| is_present(r))
            .ok_or(SwaggerValidationError::MissingField(RequestField::ResponseSchema))?;

        Ok(Self {
            endpoint,
            method,
            status_code,
            content_type: request.content_type_or_default(),
            response,
        })
    }

    pub fn coordinate(&self) -> CoordinatePath {
        CoordinatePath::response_schema(self.endpoint, self.method, self.status_code, self.content_type)
    }
}

/// A payload of `null`, `false`, `0` or `""` counts as not specified
fn is_present(payload: &Value) -> bool {
    match payload {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Finds response schemas in a dereferenced document and validates payloads against them
pub struct ResponseValidator<'a> {
    document: &'a Value,
}

impl<'a> ResponseValidator<'a> {
    pub fn new(document: &'a Value) -> Self {
        Self { document }
    }

    /// Locate the schema at `coordinate` with the document's shared
    /// definitions attached, so leftover internal `$ref`s still resolve
    pub fn resolve_schema(&self, coordinate: &CoordinatePath) -> Result<Value> {
        let node = coordinate
            .resolve(self.document)
            .ok_or_else(|| SwaggerValidationError::SchemaNotFound(coordinate.to_string()))?;

        let Value::Object(schema) = node else {
            return Err(SwaggerValidationError::SchemaNotFound(coordinate.to_string()));
        };

        let mut schema = schema.clone();
        for shared in ["components", "definitions"] {
            if let Some(section) = self.document.get(shared) {
                schema.insert(shared.to_string(), section.clone());
            }
        }

        Ok(Value::Object(schema))
    }

    /// Validate the target's payload against its documented response schema
    pub fn validate(&self, target: &ResponseTarget<'_>) -> Result<()> {
        let mut schema = self.resolve_schema(&target.coordinate())?;
        if openapi30::is_openapi_30(self.document) {
            openapi30::normalize_schema(&mut schema);
        }

        let validator = engine::compile(&schema, engine::draft_for(self.document))?;
        engine::check(&validator, target.response)
    }
}
