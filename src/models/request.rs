use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content type used for the lookup when the request leaves it empty
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Options for a single response validation call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    /// Path template as declared under `paths` (e.g. "/pets/{id}")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// HTTP method, matched against the document's own casing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    /// The response payload under test
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Overrides the configured default document path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    #[serde(default)]
    pub verbose: bool,
}

impl ValidationRequest {
    pub fn new(endpoint: impl Into<String>, method: impl Into<String>, status_code: u16) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            method: Some(method.into()),
            status_code: Some(status_code),
            ..Default::default()
        }
    }

    pub fn with_response(mut self, response: Value) -> Self {
        self.response_schema = Some(response);
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// The content type to look up, falling back to `application/json`
    pub fn content_type_or_default(&self) -> &str {
        match self.content_type.as_deref() {
            Some(ct) if !ct.is_empty() => ct,
            _ => DEFAULT_CONTENT_TYPE,
        }
    }
}

/// Required fields of a [`ValidationRequest`], in the order they are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestField {
    Endpoint,
    Method,
    StatusCode,
    ResponseSchema,
}

impl RequestField {
    /// Human-readable name used at the start of error messages
    pub fn label(&self) -> &'static str {
        match self {
            RequestField::Endpoint => "Endpoint",
            RequestField::Method => "Method",
            RequestField::StatusCode => "Status Code",
            RequestField::ResponseSchema => "Response Schema",
        }
    }
}

impl std::fmt::Display for RequestField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestField::Endpoint => write!(f, "endpoint"),
            RequestField::Method => write!(f, "method"),
            RequestField::StatusCode => write!(f, "statusCode"),
            RequestField::ResponseSchema => write!(f, "responseSchema"),
        }
    }
}

/// Title and version declared by a structurally valid document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    pub title: String,
    pub version: String,
    pub openapi: String,
    pub path_count: usize,
}
