pub mod config;
pub mod marker;
pub mod ocr;
pub mod report;
pub mod roster;
