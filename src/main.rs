use clap::Parser;
use logpuzzle::{Cli, LogPuzzle, LogPuzzleError, OutputFormatter, OutputMode, UserFriendlyError};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let app = match LogPuzzle::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&e);
            return exit_code(&e);
        }
    };

    // clap enforces the log file unless --generate-config was given
    let Some(logfile) = cli.logfile.as_ref() else {
        app.output_formatter().error("No log file given");
        return 2;
    };

    let urls = match app.read_urls(logfile) {
        Ok(urls) => urls,
        Err(e) => {
            app.handle_error(&e);
            return exit_code(&e);
        }
    };

    match cli.todir.as_ref() {
        Some(dest_dir) => match app.build_gallery(&urls, dest_dir) {
            Ok(report) => {
                app.output_formatter().print_gallery_report(&report);
                0
            }
            Err(e) => {
                app.handle_error(&e);
                exit_code(&e)
            }
        },
        None => {
            app.output_formatter().print_urls(&urls);
            0
        }
    }
}

fn exit_code(error: &LogPuzzleError) -> i32 {
    match error {
        LogPuzzleError::Config { .. } | LogPuzzleError::InvalidHost { .. } => 2,
        LogPuzzleError::LogRead { .. } => 3,
        LogPuzzleError::HttpStatus { .. } => 4,
        LogPuzzleError::Network { .. } => 5,
        LogPuzzleError::DirectoryCreate { .. } => 6,
        LogPuzzleError::Write { .. } => 7,
        _ => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "logpuzzle.toml".to_string());

    match LogPuzzle::generate_sample_config(&config_path) {
        Ok(()) => {
            let formatter = OutputFormatter::new(OutputMode::Plain, 0, false);
            formatter.success(&format!("Generated sample configuration file: {}", config_path));
            println!("\nTo use this configuration:");
            println!("  logpuzzle <logfile> --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &LogPuzzleError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
