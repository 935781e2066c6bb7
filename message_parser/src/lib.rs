//! Extracts timing and provenance data from solver message files.
//!
//! A message file starts with a banner describing the solver build and the machine it ran on, then
//! holds a table of the time spent in each phase of the run, and ends with the run's outcome. The
//! [MessageReader] turns one such file into a [MessageReport], the [BatchParser] does the same for
//! many files and keeps going when some of them cannot be read.

#[macro_use]
extern crate log;

pub mod batch;
pub mod columns;
pub mod discover;
pub mod footer;
pub mod header;
pub mod parser;
pub mod path_format;
pub mod reader;
pub mod render;

pub use batch::{BatchParser, ErrorSink, FileParseError, WriterErrorSink};
pub use discover::discover_message_files;
pub use message_report_model::{MessageReport, Phase, RunType};
pub use parser::{parse_str, MessageParser, Section};
pub use path_format::PathFormat;
pub use reader::{MessageReadError, MessageReader};
pub use render::{OutputFormat, Render, RenderError};
