use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use itertools::Itertools;
use message_report_model::MessageReport;
use parking_lot::Mutex;

use crate::reader::{MessageReadError, MessageReader};

/// A message file that could not be parsed
#[derive(Debug, thiserror::Error)]
#[error("{}: {source}", .path.display())]
pub struct FileParseError {
    pub path: PathBuf,
    #[source]
    pub source: MessageReadError,
}

/// Receives the per-file errors of a batch.
///
/// Errors are reported while the batch is running, possibly from several tasks at once.
pub trait ErrorSink: Send + Sync {
    fn report(&self, error: &FileParseError);
}

/// An [ErrorSink] writing one line per error.
pub struct WriterErrorSink<W> {
    writer: Mutex<W>,
    reported: AtomicUsize,
}

impl<W> WriterErrorSink<W>
where
    W: Write + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            reported: AtomicUsize::new(0),
        }
    }

    /// Number of errors reported so far
    pub fn reported(&self) -> usize {
        self.reported.load(Ordering::Relaxed)
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W> ErrorSink for WriterErrorSink<W>
where
    W: Write + Send,
{
    fn report(&self, error: &FileParseError) {
        self.reported.fetch_add(1, Ordering::Relaxed);
        let mut writer = self.writer.lock();
        if let Err(e) = writeln!(writer, "{error}") {
            warn!("Failed to report error for {}: {e}", error.path.display());
        }
    }
}

/// Parses many message files, reporting the files that fail without stopping the batch.
pub struct BatchParser<S> {
    reader: MessageReader,
    sink: Arc<S>,
}

impl<S> BatchParser<S>
where
    S: ErrorSink + 'static,
{
    pub fn new(reader: MessageReader, sink: Arc<S>) -> Self {
        Self { reader, sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Parse the files one after the other, in sorted path order.
    ///
    /// Returns the reports of the files that could be read, in the same order.
    pub fn parse_files<I>(&self, paths: I) -> Vec<MessageReport>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let paths = paths.into_iter().sorted().collect::<Vec<_>>();
        info!("Parsing {} message files", paths.len());

        paths
            .iter()
            .filter_map(|path| parse_one(&self.reader, self.sink.as_ref(), path))
            .collect()
    }

    /// Parse the files concurrently, one blocking task per file.
    ///
    /// The reports come back in sorted path order, as with [BatchParser::parse_files].
    pub async fn parse_files_concurrently<I>(&self, paths: I) -> Vec<MessageReport>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let paths = paths.into_iter().sorted().collect::<Vec<_>>();
        info!("Parsing {} message files concurrently", paths.len());

        let tasks = paths.into_iter().map(|path| {
            let reader = self.reader.clone();
            let sink = self.sink.clone();
            tokio::task::spawn_blocking(move || parse_one(&reader, sink.as_ref(), &path))
        });

        futures::future::join_all(tasks)
            .await
            .into_iter()
            .filter_map(|joined| match joined {
                Ok(report) => report,
                Err(e) => {
                    error!("Parsing task did not complete: {e}");
                    None
                }
            })
            .collect()
    }
}

fn parse_one<S>(reader: &MessageReader, sink: &S, path: &Path) -> Option<MessageReport>
where
    S: ErrorSink + ?Sized,
{
    match reader.read_from_file(path) {
        Ok(report) => Some(report),
        Err(source) => {
            let error = FileParseError {
                path: path.to_path_buf(),
                source,
            };
            debug!("Failed to parse message file: {error}");
            sink.report(&error);
            None
        }
    }
}
