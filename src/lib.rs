pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod gallery;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, DownloadConfig, ExtractConfig, GalleryConfig};
pub use error::{LogPuzzleError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{PuzzleOrder, UrlExtractor};
pub use gallery::{
    DownloadEvent, FetchedImage, GalleryDownloader, GalleryImage, GalleryReport, HttpFetcher,
    ImageFetcher, IndexTemplate,
};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::Path;
use std::time::Duration;

/// Main library interface: puzzle URL extraction and gallery building.
pub struct LogPuzzle {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl LogPuzzle {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        // Progress bars would interleave with JSON lines on stdout
        let progress_manager = ProgressManager::new(!quiet && output_mode != OutputMode::Json);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create LogPuzzle instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            crate::cli::OutputFormat::Human => OutputMode::Human,
            crate::cli::OutputFormat::Json => OutputMode::Json,
            crate::cli::OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    /// Read a log file and return its puzzle URLs in reveal order
    pub fn read_urls<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<String>> {
        let log_path = log_path.as_ref();
        let extractor = UrlExtractor::new(&self.config.extract)?;

        self.output_formatter.debug(&format!(
            "Scanning {} with host {}",
            log_path.display(),
            extractor.host()
        ));

        let urls = extractor.read_urls(log_path)?;
        self.output_formatter.info(&format!("Found {} puzzle URLs", urls.len()));

        Ok(urls)
    }

    /// Download `urls` into `dest_dir` over HTTP and write the index page
    pub fn build_gallery(&self, urls: &[String], dest_dir: &Path) -> Result<GalleryReport> {
        let fetcher = HttpFetcher::new(&self.config.download)?;
        self.build_gallery_with(fetcher, urls, dest_dir)
    }

    /// Same as [`LogPuzzle::build_gallery`] with a caller-supplied fetcher
    pub fn build_gallery_with<F: ImageFetcher>(
        &self,
        fetcher: F,
        urls: &[String],
        dest_dir: &Path,
    ) -> Result<GalleryReport> {
        let downloader = GalleryDownloader::new(fetcher)
            .with_template(self.config.gallery.template)
            .with_require_success(self.config.download.require_success);

        let pb = self
            .progress_manager
            .create_download_progress(urls.len() as u64);
        let formatter = &self.output_formatter;

        let result = downloader.download_and_render(
            urls,
            dest_dir,
            Some(&|event| {
                ui::progress::update_download_progress(&pb, event);
                match event {
                    DownloadEvent::Fetching { name, url, .. } => {
                        let message = format!("Retrieving {} from {}...", name, url);
                        self.progress_manager.suspend(|| formatter.notice(&message));
                    }
                    DownloadEvent::Saved { name, bytes, .. } => {
                        let message = format!("Saved {} ({} bytes)", name, bytes);
                        self.progress_manager.suspend(|| formatter.debug(&message));
                    }
                    DownloadEvent::WritingIndex { path } => {
                        let message = format!("Creating {}...", path.display());
                        self.progress_manager.suspend(|| formatter.notice(&message));
                    }
                }
            }),
        );

        match &result {
            Ok(report) => {
                ui::progress::finish_progress_with_summary(
                    &pb,
                    &format!("Downloaded {} images", report.images.len()),
                    Duration::from_millis(report.elapsed_ms),
                );
                let failed = report.non_success_count();
                if failed > 0 {
                    self.output_formatter.warning(&format!(
                        "{} responses were not successful and were saved as-is",
                        failed
                    ));
                }
            }
            Err(_) => pb.abandon_with_message("Download aborted"),
        }

        result
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn progress_manager(&self) -> &ProgressManager {
        &self.progress_manager
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &LogPuzzleError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Extract the puzzle URLs of a log file using the default configuration
pub fn read_urls<P: AsRef<Path>>(log_path: P) -> Result<Vec<String>> {
    UrlExtractor::new(&ExtractConfig::default())?.read_urls(log_path)
}
