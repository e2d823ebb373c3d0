use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::gallery::IndexTemplate;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "logpuzzle")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract puzzle image URLs from an Apache access log")]
#[command(
    long_about = "LogPuzzle scans an Apache access log for requests to puzzle images, \
                  orders them so the pieces line up, and either prints the URLs or \
                  downloads them into a directory with an index.html gallery."
)]
#[command(after_help = "EXAMPLES:\n  \
    logpuzzle animal_code.google.com\n  \
    logpuzzle --todir animaldir animal_code.google.com\n  \
    logpuzzle --todir placedir --template verbatim place_code.google.com\n  \
    logpuzzle access.log --host http://localhost:8000 --output-format json")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Apache access log to scan
    #[arg(required_unless_present = "generate_config")]
    pub logfile: Option<PathBuf>,

    /// Download the images into this directory and write an index.html
    #[arg(long, value_name = "DIR")]
    pub todir: Option<PathBuf>,

    /// Host prefixed to every puzzle path (e.g. https://code.google.com)
    #[arg(long, value_name = "URL")]
    pub host: Option<String>,

    /// Layout of the generated index.html
    #[arg(long, value_enum)]
    pub template: Option<IndexTemplate>,

    /// Fail on non-2xx responses instead of saving them as images
    #[arg(long)]
    pub require_success: bool,

    /// HTTP request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress progress notices)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_host(self.host.clone())
            .with_timeout(self.timeout)
            .with_require_success(self.require_success.then_some(true))
            .with_template(self.template)
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
