use crate::models::RequestField;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwaggerValidationError {
    #[error("{} was not specified ({})", .0.label(), .0)]
    MissingField(RequestField),

    #[error("Swagger file was not specified (swaggerFile)")]
    MissingFile,

    #[error("Could not find Swagger Schema with: {0}")]
    SchemaNotFound(String),

    #[error("{0}")]
    SchemaValidation(String),

    #[error("Invalid API document: {0}")]
    DocumentStructure(String),

    #[error("Failed to compile response schema: {0}")]
    SchemaCompile(String),

    #[error("Could not resolve $ref '{reference}' in {file}")]
    UnresolvedRef { file: String, reference: String },

    #[error("Circular $ref '{reference}' in {file}")]
    CircularRef { file: String, reference: String },

    #[error("Unsupported $ref '{0}': only local and relative file references are supported")]
    UnsupportedRef(String),

    #[error("Telemetry error: {0}")]
    Telemetry(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SwaggerValidationError>;
