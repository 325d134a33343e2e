// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;

use mediumexporter::app_config::{Config, LogLevel};
use mediumexporter::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for mediumexporter
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// mediumexporter - export a Medium post to markdown
#[derive(Parser, Debug)]
#[command(name = "mediumexporter")]
#[command(version)]
#[command(about = "Export a Medium post to a markdown file")]
#[command(long_about = "Exports a Medium post to a markdown file named YYYY-MM-DD-title.md.

EXAMPLES:
    mediumexporter https://medium.com/@xdamman/my-10-day-meditation-retreat-in-silence-71abda54940e --output medium_posts
    mediumexporter --headers --separator --- --output medium_posts https://medium.com/@xdamman/my-10-day-meditation-retreat-in-silence-71abda54940e
    mediumexporter mediumpost.json
    mediumexporter --info mediumpost.json
    mediumexporter completions bash > mediumexporter.bash")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Medium post URL or path to a saved JSON payload
    #[arg(value_name = "POST")]
    post: Option<String>,

    /// Write url and date header lines, followed by the separator, into the top of the markdown file
    #[arg(short = 'H', long)]
    headers: bool,

    /// Separator between headers and body
    #[arg(short = 'S', long, allow_hyphen_values = true)]
    separator: Option<String>,

    /// Where to put the new file
    #[arg(short = 'O', long)]
    output: Option<String>,

    /// Add blog front matter to the top of the file
    #[arg(short = 'B', long)]
    add_metadata: bool,

    /// Show information about the post instead of exporting it
    #[arg(short = 'I', long)]
    info: bool,

    /// Show debugging info
    #[arg(short, long)]
    debug: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // Verbosity is changed later through log::set_max_level only
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
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
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info by default, adjusted once the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "mediumexporter", &mut std::io::stdout());
        return Ok(());
    }

    let Some(post) = cli.post.clone() else {
        CommandLineOptions::command().print_help()?;
        return Ok(());
    };

    let config = build_config(&cli)?;
    log::set_max_level(level_filter(&config.log_level));

    let controller = Controller::with_config(config)?;

    if cli.info {
        let summary = controller.info(&post).await?;
        let json = serde_json::to_string_pretty(&summary)
            .context("Failed to serialize post summary")?;
        println!("{}", json);
        return Ok(());
    }

    let output_path = controller.run(&post).await?;
    info!("Success: {}", output_path.display());

    Ok(())
}

/// Load the config file and apply command line overrides
fn build_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_default(&cli.config_path)?;

    if let Some(output) = &cli.output {
        config.output_dir = output.clone();
    }
    if let Some(separator) = &cli.separator {
        config.export.separator = separator.clone();
    }
    if cli.headers {
        config.export.add_headers = true;
    }
    if cli.add_metadata {
        config.export.add_metadata = true;
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }
    if cli.debug {
        config.log_level = LogLevel::Debug;
    }

    Ok(config)
}
