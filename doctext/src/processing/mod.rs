pub mod batch;
pub mod dispatcher;
pub mod extractors;

pub use batch::{collect_files, make_preview, BatchExtractor, DEFAULT_PATTERNS, PREVIEW_CHARS};
pub use dispatcher::{extension_of, FormatHandler, Handler, TextExtractor};
