use std::io::{BufRead as _, Read};
use std::path::Path;

use message_report_model::MessageReport;

use crate::parser::MessageParser;
use crate::path_format::PathFormat;

/// Reads solver message files into [MessageReport]s.
#[derive(Debug, Clone, Default)]
pub struct MessageReader {
    /// How the path of a message file is recorded in its report.
    pub path_format: PathFormat,
}

impl MessageReader {
    pub fn new(path_format: PathFormat) -> Self {
        Self { path_format }
    }

    /// Parses a message file from the given reader, reporting it as `file`.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected. Only a failing reader
    /// makes this fail.
    pub fn read<R>(&self, reader: R, file: &str) -> Result<MessageReport, MessageReadError>
    where
        R: Read,
    {
        let mut parser = MessageParser::new(file);
        for line in std::io::BufReader::new(reader).split(b'\n') {
            let mut line = line?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            parser.feed_line(&String::from_utf8_lossy(&line));
        }

        Ok(parser.finish())
    }

    /// Parses the message file at the specified path.
    ///
    /// The file is closed before this returns, whether parsing succeeded or not.
    pub fn read_from_file<P>(&self, path: P) -> Result<MessageReport, MessageReadError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let report = self.read(file, &self.path_format.format(path))?;
        debug!("Parsed {} with {} phases", report.file, report.phases.len());
        Ok(report)
    }
}

/// An error type for [`MessageReader::read`].
#[derive(Debug, thiserror::Error)]
pub enum MessageReadError {
    #[error("An error occurred while reading the message file: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    const CONTENT: &str = concat!(
        "     |  Hostname   : node01                            |\r\n",
        " T i m i n g   i n f o r m a t i o n\r\n",
        "                        CPU(seconds)   %CPU  Clock(seconds) %Clock\r\n",
        "  ----------------------------------------------------------------\r\n",
        "  Init .................. 1.0000E+00   10.00    1.0000E+00   10.00\r\n",
        "  ----------------------------------------------------------------\r\n",
        " Elapsed time 3 seconds\r\n",
    );

    #[test]
    fn test_should_read_crlf_lines() {
        let report = MessageReader::default()
            .read(CONTENT.as_bytes(), "messag")
            .expect("Failed to read");
        assert_eq!(report.hostname, "node01");
        assert_eq!(report.phases.len(), 1);
        assert_eq!(report.phases[0].name, "Init");
        assert_eq!(report.phases[0].clock_percent, 10.0);
        assert_eq!(report.elapsed_time, 3.0);
    }

    #[test]
    fn test_should_replace_invalid_utf8() {
        let content = b"     |  Hostname   : n\xffde\n";
        let report = MessageReader::default()
            .read(&content[..], "messag")
            .expect("Failed to read");
        assert_eq!(report.hostname, "n\u{fffd}de");
    }

    #[test]
    fn test_should_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CONTENT.as_bytes()).unwrap();

        let report = MessageReader::default()
            .read_from_file(file.path())
            .expect("Failed to read");

        assert_eq!(report.file, file.path().display().to_string());
        assert_eq!(report.hostname, "node01");
    }

    #[test]
    fn test_should_fail_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = MessageReader::default().read_from_file(dir.path().join("messag"));
        assert!(matches!(result, Err(MessageReadError::Io(_))));
    }
}
