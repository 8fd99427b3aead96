pub mod dereference;
pub mod source;
pub mod spec_loader;

pub use dereference::{CircularRefs, Dereferencer};
pub use source::{DocumentSource, FsDocumentSource, parse_document};
pub use spec_loader::SpecLoader;
