use std::path::PathBuf;

use clap::Parser;
use message_parser::OutputFormat;

#[derive(Parser)]
#[command(about, long_about = None)]
pub struct CliArgs {
    /// Message files, or directories to search for `messag` and `mes####` files.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Report file paths as absolute paths.
    #[arg(long, conflicts_with = "relative")]
    pub abs: bool,

    /// Report file paths relative to this directory.
    #[arg(long, value_name = "DIR")]
    pub relative: Option<PathBuf>,

    /// Output format.
    #[arg(
        long,
        value_enum,
        default_value_t = OutputFormat::Summary,
        env = "MESSAGE_PARSER_FORMAT"
    )]
    pub format: OutputFormat,

    /// Write the output to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Parse the files concurrently, one task per file.
    #[arg(long, default_value = "false")]
    pub concurrent: bool,

    /// Exit with an error if any file could not be parsed.
    ///
    /// The output is written in any case, with the files that could be parsed.
    #[arg(long, default_value = "false")]
    pub strict: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_should_verify_cli() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_should_parse_defaults() {
        let args = CliArgs::try_parse_from(["message-parser", "runs"]).unwrap();
        assert_eq!(args.paths, vec![PathBuf::from("runs")]);
        assert!(!args.abs);
        assert!(args.relative.is_none());
        assert!(!args.concurrent);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_should_reject_abs_with_relative() {
        let result =
            CliArgs::try_parse_from(["message-parser", "--abs", "--relative", "base", "runs"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_should_require_paths() {
        assert!(CliArgs::try_parse_from(["message-parser"]).is_err());
    }

    #[test]
    fn test_should_parse_format() {
        let args =
            CliArgs::try_parse_from(["message-parser", "--format", "phases", "messag"]).unwrap();
        assert_eq!(args.format, OutputFormat::Phases);
    }
}
