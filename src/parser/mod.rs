pub mod json_parser;

pub use json_parser::{JsonRecordParser, Parser};
