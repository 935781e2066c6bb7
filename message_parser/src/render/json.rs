use std::io::Write;

use message_report_model::{store_report, MessageReport};

use super::{Render, RenderError};

/// Renders the reports as a pretty printed JSON array.
pub struct JsonRenderer<W> {
    writer: W,
}

impl<W> JsonRenderer<W>
where
    W: Write,
{
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W> Render for JsonRenderer<W>
where
    W: Write,
{
    type Error = RenderError;

    fn render(&mut self, reports: &[MessageReport]) -> Result<(), Self::Error> {
        serde_json::to_writer_pretty(&mut self.writer, reports)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Renders one JSON report per line, the format read back by
/// [`message_report_model::load_reports`].
pub struct JsonlRenderer<W> {
    writer: W,
}

impl<W> JsonlRenderer<W>
where
    W: Write,
{
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W> Render for JsonlRenderer<W>
where
    W: Write,
{
    type Error = RenderError;

    fn render(&mut self, reports: &[MessageReport]) -> Result<(), Self::Error> {
        for report in reports {
            debug!("Writing report for {}", report.file);
            store_report(report, &mut self.writer)?;
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
