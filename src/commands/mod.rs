pub mod config;
pub mod ocr;
pub mod report;
pub mod session;
