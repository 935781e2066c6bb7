#[macro_use]
extern crate log;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser as _;
use message_parser::{
    discover_message_files, BatchParser, MessageReader, PathFormat, WriterErrorSink,
};

mod cli;

const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
const CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::try_init()?;

    let args = cli::CliArgs::parse();
    info!("{CRATE_NAME} {CRATE_VERSION}");

    let files = discover_message_files(&args.paths);
    debug!("Discovered {} message files", files.len());

    let reader = MessageReader::new(PathFormat::from_options(args.abs, args.relative));
    let sink = Arc::new(WriterErrorSink::new(std::io::stderr()));
    let batch = BatchParser::new(reader, sink.clone());

    let reports = if args.concurrent {
        batch.parse_files_concurrently(files).await
    } else {
        batch.parse_files(files)
    };

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout())),
    };
    let mut renderer = args.format.renderer(writer);
    renderer
        .render(&reports)
        .context("Failed to render reports")?;

    let failed = sink.reported();
    info!("Parsed {} message files, {failed} failed", reports.len());
    if failed > 0 && args.strict {
        anyhow::bail!("{failed} message files could not be parsed");
    }

    Ok(())
}
