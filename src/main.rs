// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use app_controller::{Controller, RunOptions};

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod matching;
mod naming;
mod providers;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rename TV series files against TheTVDB episode list (default command)
    Rename(RenameArgs),

    /// Generate shell completions for serename
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct RenameArgs {
    /// Directory to process; all files in it and its subdirectories are
    /// assumed to belong to a single series
    #[arg(value_name = "DIRECTORY", default_value = ".")]
    directory: PathBuf,

    /// Perform a dry run without renaming any files
    #[arg(short, long)]
    dry_run: bool,

    /// Non-interactive mode: automatically accept prompts with best guesses
    #[arg(short = 'y', long)]
    non_interactive: bool,

    /// Series name to search for (defaults to the directory name)
    #[arg(short, long)]
    series: Option<String>,

    /// TVDB series id, skipping the search step entirely
    #[arg(long)]
    series_id: Option<u64>,

    /// Minimum fuzzy score for a match, overriding the config file
    #[arg(short, long)]
    threshold: Option<u8>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// serename - TV series episode renamer
///
/// Matches loosely-delimited episode titles in video filenames against
/// TheTVDB's canonical episode list - including multi-episode files - and
/// renames them to a consistent format.
#[derive(Parser, Debug)]
#[command(name = "serename")]
#[command(args_conflicts_with_subcommands = true)]
#[command(version = "1.0.0")]
#[command(about = "Rename TV series files using TheTVDB")]
#[command(long_about = "serename matches episode titles embedded in video filenames against
TheTVDB's canonical episode list and renames the files to a consistent format.
Multi-episode files (\"Title One + Title Two\") are detected and tagged as
S01E01E02.

EXAMPLES:
    serename \"/shows/Rosie's Rules\"          # Process a series directory
    serename -d .                             # Dry run in the current directory
    serename -y --series-id 421737 .          # Non-interactive, known series id
    serename -t 90 .                          # Stricter match threshold
    serename completions bash > serename.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically; the TVDB API key must
    then be filled in before the first real run.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    rename_args: RenameArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "serename", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Rename(args)) => run_rename(args).await,
        None => run_rename(cli.rename_args).await,
    }
}

async fn run_rename(options: RenameArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        serde_json::from_reader::<_, Config>(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        config
    };

    // Override config with CLI options if provided
    if let Some(threshold) = options.threshold {
        config.matching.match_threshold = threshold;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    if !options.directory.is_dir() {
        return Err(anyhow!("Input path is not a directory: {:?}", options.directory));
    }

    let run_options = RunOptions {
        dry_run: options.dry_run,
        non_interactive: options.non_interactive,
        series_name: options.series.clone(),
        series_id: options.series_id,
    };

    let controller = Controller::with_config(config, run_options)?;
    controller.run(&options.directory).await?;

    Ok(())
}
