mod batch;
mod document;

pub use batch::*;
pub use document::*;
