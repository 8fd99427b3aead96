pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod plugin;
pub mod telemetry;
pub mod validation;

pub use config::Config;
pub use error::{Result, SwaggerValidationError};
pub use models::{DocumentSummary, ValidationRequest};
pub use plugin::SwaggerValidation;
