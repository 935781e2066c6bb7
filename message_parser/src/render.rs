mod json;
mod table;

use std::io::Write;

use message_report_model::MessageReport;

pub use self::json::{JsonRenderer, JsonlRenderer};
pub use self::table::{PhaseTableRenderer, SummaryTableRenderer};

/// A trait for rendering the reports of a batch.
pub trait Render {
    type Error;

    /// Render all the [`MessageReport`]s at once.
    fn render(&mut self, reports: &[MessageReport]) -> Result<(), Self::Error>;
}

/// An error type for the renderers of this module.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("An error occurred while writing the output: {0}")]
    Io(#[from] std::io::Error),
    #[error("An error occurred while serializing a report: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// The output formats offered on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One table row per message file
    #[default]
    Summary,
    /// One table row per phase
    Phases,
    /// A JSON array of reports
    Json,
    /// One JSON report per line
    Jsonl,
}

impl OutputFormat {
    /// Create the renderer for this format, writing to `writer`.
    pub fn renderer<W>(self, writer: W) -> Box<dyn Render<Error = RenderError>>
    where
        W: Write + 'static,
    {
        match self {
            OutputFormat::Summary => Box::new(SummaryTableRenderer::new(writer)),
            OutputFormat::Phases => Box::new(PhaseTableRenderer::new(writer)),
            OutputFormat::Json => Box::new(JsonRenderer::new(writer)),
            OutputFormat::Jsonl => Box::new(JsonlRenderer::new(writer)),
        }
    }
}
