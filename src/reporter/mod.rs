//! Reporter module for output formatting

pub mod console;
pub mod csv;
pub mod json;

pub use self::console::ConsoleReporter;
pub use self::csv::{CsvSink, CSV_HEADERS};
pub use self::json::JsonReporter;
