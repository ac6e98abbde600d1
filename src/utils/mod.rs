pub mod ocr;
pub mod pdf_parser;
pub mod text_processor;

pub use ocr::{ocr_pdf, ocrmypdf_available};
pub use pdf_parser::{extract_text_from_pdf, load_reading_ranges, parse_page_range, split_readings, ReadingRange};
pub use text_processor::clean_page_text;
