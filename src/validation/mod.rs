mod coordinate;
mod document;
mod engine;
mod openapi30;
mod response;

pub use coordinate::{CoordinatePath, Segment};
pub use document::validate_document;
pub use engine::{OPAQUE_KEYWORDS, check, compile, draft_for};
pub use openapi30::{is_openapi_30, normalize_schema};
pub use response::{ResponseTarget, ResponseValidator};
