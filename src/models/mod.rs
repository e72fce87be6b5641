pub mod bbox;
pub mod color;
pub mod config;
pub mod ocr_result;
pub mod person;
