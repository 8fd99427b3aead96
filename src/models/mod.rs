pub mod request;

pub use request::{DEFAULT_CONTENT_TYPE, DocumentSummary, RequestField, ValidationRequest};
