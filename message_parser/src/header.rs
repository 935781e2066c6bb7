use std::fmt;

use message_report_model::{MessageReport, RunType};

use crate::columns::Columns;

/// A labelled field of the message file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    Version,
    Revision,
    LicensedTo,
    IssuedBy,
    Platform,
    OsLevel,
    Compiler,
    Hostname,
    Precision,
    BuildNumber,
    InputFile,
    MppCpus,
}

impl HeaderField {
    pub const ALL: [HeaderField; 12] = [
        HeaderField::Version,
        HeaderField::Revision,
        HeaderField::LicensedTo,
        HeaderField::IssuedBy,
        HeaderField::Platform,
        HeaderField::OsLevel,
        HeaderField::Compiler,
        HeaderField::Hostname,
        HeaderField::Precision,
        HeaderField::BuildNumber,
        HeaderField::InputFile,
        HeaderField::MppCpus,
    ];

    /// The literal that identifies the field's line
    pub fn label(&self) -> &'static str {
        match self {
            HeaderField::Version => "Version : ",
            HeaderField::Revision => "Revision: ",
            HeaderField::LicensedTo => "Licensed to: ",
            HeaderField::IssuedBy => "Issued by  : ",
            HeaderField::Platform => "Platform   : ",
            HeaderField::OsLevel => "OS Level   : ",
            HeaderField::Compiler => "Compiler   : ",
            HeaderField::Hostname => "Hostname   : ",
            HeaderField::Precision => "Precision  : ",
            HeaderField::BuildNumber => "SVN Version: ",
            HeaderField::InputFile => "Input file: ",
            HeaderField::MppCpus => " MPP execution with",
        }
    }

    /// Find the field carried by `line`, if any.
    ///
    /// The labels are distinct so at most one field matches. The MPP process count is only
    /// recognized once the version header has classified the run as [RunType::Mpp].
    pub fn recognize(line: &str, run_type: RunType) -> Option<HeaderField> {
        Self::ALL
            .into_iter()
            .find(|field| field.matches(line, run_type))
    }

    fn matches(&self, line: &str, run_type: RunType) -> bool {
        match self {
            HeaderField::MppCpus => run_type == RunType::Mpp && line.starts_with(self.label()),
            _ => line.contains(self.label()),
        }
    }

    /// Extract the field from its line into `report`
    pub fn apply(&self, columns: &Columns, report: &mut MessageReport) {
        trace!("Reading header field {self}");
        match self {
            HeaderField::Version => {
                report.set_version(columns.text(18..34));
                report.date = columns.text(34..55);
                debug!("{} run from version {:?}", report.run_type, report.version);
            }
            HeaderField::Revision => {
                report.revision = columns.int(18..34);
                report.time = columns.text(34..55);
            }
            HeaderField::LicensedTo => report.licensed_to = columns.text(21..55),
            HeaderField::IssuedBy => report.issued_by = columns.text(21..55),
            HeaderField::Platform => report.platform = columns.text(21..55),
            HeaderField::OsLevel => report.os = columns.text(21..55),
            HeaderField::Compiler => report.compiler = columns.text(21..55),
            HeaderField::Hostname => report.hostname = columns.text(21..55),
            HeaderField::Precision => report.precision = columns.text(21..55),
            HeaderField::BuildNumber => report.build_number = columns.int(21..55),
            HeaderField::InputFile => report.input_file = columns.text(13..84),
            HeaderField::MppCpus => report.num_cpus = columns.int(19..27),
        }
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.label().trim().trim_end_matches(':').trim_end();
        f.write_str(name)
    }
}
