//! Command-line interface for the report splitter.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::config::{FilterConfig, SOURCE_ENV_VAR};
use crate::error::{Result, SplitterError};
use crate::filter::ReportFilter;
use crate::splitting::SplitStrategy;
use crate::stream::{run_stream, StreamStats};

/// Report splitter - Split encoded XML reports in JSON-lines records.
#[derive(Parser)]
#[command(name = "report-splitter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split Cobertura coverage reports.
    Cobertura(StreamArgs),

    /// Split JUnit test reports.
    Junit(StreamArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct StreamArgs {
    /// Record field holding the base64-encoded report
    #[arg(short, long)]
    pub source: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Input file with one JSON record per line (default: stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl StreamArgs {
    /// Resolve the filter configuration.
    ///
    /// `--source` wins over `--config`, which wins over `SPLITTER_SOURCE`.
    pub fn resolve_config(&self) -> Result<FilterConfig> {
        if let Some(source) = &self.source {
            let config = FilterConfig::new(source.as_str());
            config.validate()?;
            return Ok(config);
        }

        if let Some(path) = &self.config {
            return FilterConfig::from_yaml_file(path);
        }

        FilterConfig::from_env().map_err(|_| {
            SplitterError::InvalidConfig(format!(
                "no source field configured: pass --source, --config or set {SOURCE_ENV_VAR}"
            ))
        })
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let stats = match cli.command {
        Commands::Cobertura(args) => {
            let filter = ReportFilter::cobertura(args.resolve_config()?)?;
            stream_command(&filter, &args)?
        }
        Commands::Junit(args) => {
            let filter = ReportFilter::junit(args.resolve_config()?)?;
            stream_command(&filter, &args)?
        }
    };

    tracing::info!(
        records_in = stats.records_in,
        records_out = stats.records_out,
        split = stats.split,
        tagged = stats.tagged,
        "Stream processed"
    );
    Ok(())
}

/// Execute a stream command.
fn stream_command<S: SplitStrategy>(
    filter: &ReportFilter<S>,
    args: &StreamArgs,
) -> Result<StreamStats> {
    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(open_input(path)?)),
        None => Box::new(io::stdin().lock()),
    };

    let output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    run_stream(filter, input, output)
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        SplitterError::Io(io::Error::new(
            e.kind(),
            format!("Cannot open input {}: {e}", path.display()),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_cli_parse_cobertura() {
        let cli = Cli::parse_from(["report-splitter", "cobertura", "--source", "report"]);

        let Commands::Cobertura(args) = cli.command else {
            panic!("expected cobertura command");
        };
        assert_eq!(args.source.as_deref(), Some("report"));
        assert!(args.config.is_none());
        assert!(args.input.is_none());
        assert!(args.output.is_none());
    }

    #[test]
    fn test_cli_parse_junit_with_files() {
        let cli = Cli::parse_from([
            "report-splitter",
            "junit",
            "-i",
            "in.jsonl",
            "-o",
            "out.jsonl",
        ]);

        let Commands::Junit(args) = cli.command else {
            panic!("expected junit command");
        };
        assert_eq!(args.input, Some(PathBuf::from("in.jsonl")));
        assert_eq!(args.output, Some(PathBuf::from("out.jsonl")));
    }

    #[test]
    fn test_source_flag_wins_over_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "source: from_file").unwrap();

        let args = StreamArgs {
            source: Some("from_flag".to_string()),
            config: Some(file.path().to_path_buf()),
            ..StreamArgs::default()
        };
        assert_eq!(args.resolve_config().unwrap(), FilterConfig::new("from_flag"));
    }

    #[test]
    fn test_config_file_is_used() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "source: from_file").unwrap();

        let args = StreamArgs {
            config: Some(file.path().to_path_buf()),
            ..StreamArgs::default()
        };
        assert_eq!(args.resolve_config().unwrap(), FilterConfig::new("from_file"));
    }

    #[test]
    fn test_blank_source_flag_is_rejected() {
        let args = StreamArgs {
            source: Some("  ".to_string()),
            ..StreamArgs::default()
        };
        assert!(matches!(
            args.resolve_config(),
            Err(SplitterError::InvalidConfig(_))
        ));
    }
}
