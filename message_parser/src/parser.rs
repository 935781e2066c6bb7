use message_report_model::{MessageReport, Phase};

use crate::columns::Columns;
use crate::footer::FooterField;
use crate::header::HeaderField;

/// Heading that opens the timing table
pub const TIMING_MARKER: &str = " T i m i n g   i n f o r m a t i o n";
/// Rule that closes the timing table
pub const TIMING_DELIMITER: &str = "-----------------------";
/// Lines between the heading and the first timing row (column titles and a rule)
const TIMING_HEADER_LINES: u8 = 2;
/// Timing rows starting with this are sub-phases of the last top level phase
const CHILD_INDENT: &str = "    ";

/// The part of the message file the parser is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Banner and provenance lines before the timing table
    Header,
    /// Column titles following the timing heading
    TimingHeader { remaining: u8 },
    /// Rows of the timing table
    ///
    /// `current_parent` indexes the top level phase that indented rows attach to.
    TimingBody { current_parent: Option<usize> },
    /// Everything after the closing rule of the timing table
    Footer,
}

/// Single pass parser turning the lines of one message file into a [MessageReport].
///
/// Lines that are not recognized in the current [Section] are skipped. Nothing here fails, fields
/// that cannot be read keep their zero value.
#[derive(Debug)]
pub struct MessageParser {
    report: MessageReport,
    section: Section,
}

impl MessageParser {
    /// Start parsing the message file that will be reported as `file`
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            report: MessageReport::new(file),
            section: Section::Header,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Feed the next line, without its line terminator
    pub fn feed_line(&mut self, line: &str) {
        let section = self.section;
        self.section = match section {
            Section::Header => self.header_line(line),
            Section::TimingHeader { remaining } if remaining > 1 => Section::TimingHeader {
                remaining: remaining - 1,
            },
            Section::TimingHeader { .. } => Section::TimingBody {
                current_parent: None,
            },
            Section::TimingBody { current_parent } => self.timing_line(line, current_parent),
            Section::Footer => {
                if let Some(field) = FooterField::recognize(line, self.report.run_type) {
                    field.apply(line, &mut self.report);
                }
                Section::Footer
            }
        };
    }

    /// Finish parsing and hand out the report
    pub fn finish(self) -> MessageReport {
        if self.section == Section::Header {
            debug!("No timing information found in {}", self.report.file);
        }
        self.report
    }

    fn header_line(&mut self, line: &str) -> Section {
        if let Some(field) = HeaderField::recognize(line, self.report.run_type) {
            field.apply(&Columns::new(line), &mut self.report);
            return Section::Header;
        }

        if line.starts_with(TIMING_MARKER) {
            trace!("Timing information starts in {}", self.report.file);
            Section::TimingHeader {
                remaining: TIMING_HEADER_LINES,
            }
        } else {
            Section::Header
        }
    }

    fn timing_line(&mut self, line: &str, current_parent: Option<usize>) -> Section {
        if line.contains(TIMING_DELIMITER) {
            trace!(
                "Timing information ends in {} with {} phases",
                self.report.file,
                self.report.phases.len()
            );
            return Section::Footer;
        }

        let phase = parse_phase(line);
        if !line.starts_with(CHILD_INDENT) {
            let index = self.report.add_phase(phase);
            return Section::TimingBody {
                current_parent: Some(index),
            };
        }

        match current_parent.and_then(|index| self.report.phases.get_mut(index)) {
            Some(parent) => parent.add_child(phase),
            None => warn!(
                "Skipping sub-phase {:?} without a parent phase in {}",
                phase.name, self.report.file
            ),
        }
        Section::TimingBody { current_parent }
    }
}

/// Read one row of the timing table
fn parse_phase(line: &str) -> Phase {
    let columns = Columns::new(line);
    Phase::new(
        columns.name(0..25),
        columns.float(25..36),
        columns.float(36..44),
        columns.float(44..58),
        columns.float(58..66),
    )
}

/// Parse a whole message file held in memory
pub fn parse_str(file: impl Into<String>, content: &str) -> MessageReport {
    let mut parser = MessageParser::new(file);
    for line in content.lines() {
        parser.feed_line(line);
    }
    parser.finish()
}
