pub mod validate_document;
pub mod validate_response;

pub use validate_document::execute_validate_document;
pub use validate_response::{ResponseArgs, execute_validate_response};
