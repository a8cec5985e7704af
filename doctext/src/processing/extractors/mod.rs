pub mod docx;
pub mod pdf;
pub mod pptx;
pub mod xlsx;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use pptx::PptxExtractor;
pub use xlsx::XlsxExtractor;
