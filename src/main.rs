// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use wp_translate::app_config::{Config, LogLevel};
use wp_translate::app_controller::Controller;

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

/// wp-translate - translate a WordPress post into a new draft
///
/// Reads the post through the WordPress REST API, translates its paragraph and
/// heading blocks with an OpenAI chat model and saves the result as a draft.
#[derive(Parser, Debug)]
#[command(name = "wp-translate")]
#[command(version)]
#[command(about = "Translate a WordPress post into a new draft")]
#[command(long_about = "wp-translate asks for a post ID and a target language, translates the post's
paragraph and heading blocks and creates a new draft with the result.

CONFIGURATION:
    Settings are read from the environment, after loading a .env file from the
    working directory when one exists (or the file given with --env-file).

    WP_API_URL          Base URL of the REST API, e.g. https://example.com/wp-json/wp/v2
    WP_USERNAME         Account used for basic authentication
    WP_PASSWORD         Password or application password
    OPENAI_TOKEN        OpenAI API key
    OPENAI_API_BASE     OpenAI-compatible endpoint (default: https://api.openai.com/v1)
    OPENAI_MODEL        Chat model (default: gpt-3.5-turbo)
    TRANSLATE_RETRY_COUNT       Attempts when the service is unavailable (default: 3)
    TRANSLATE_RETRY_DELAY_SECS  Delay between attempts (default: 10)
    HTTP_TIMEOUT_SECS   Request timeout for both services (default: none)
    LOG_LEVEL           error, warn, info, debug or trace (default: info)")]
struct CommandLineOptions {
    /// Set logging level (overrides LOG_LEVEL)
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Load environment variables from this file instead of ./.env
    #[arg(short, long, value_name = "PATH")]
    env_file: Option<PathBuf>,
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
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌",
            Level::Warn => "🚧",
            Level::Info => " ",
            Level::Debug => "🔍",
            Level::Trace => "📋",
        }
    }

    // @returns: ANSI colour for log level
    fn get_color_for_level(level: Level) -> &'static str {
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
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Ask one question and return the trimmed answer
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut answer = String::new();
    let read = input
        .read_line(&mut answer)
        .context("Failed to read from standard input")?;
    if read == 0 {
        return Err(anyhow!("Input closed before an answer was given"));
    }

    Ok(answer.trim().to_string())
}

/// Ask until the answer is not empty
fn prompt_non_empty<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    loop {
        let answer = prompt(input, output, question)?;
        if !answer.is_empty() {
            return Ok(answer);
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    let mut config = match &cli.env_file {
        Some(path) => Config::from_env_file(path),
        None => Config::from_env(),
    }
    .context("Failed to load configuration")?;

    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(&config);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    let post_id = prompt_non_empty(&mut input, &mut output, "Enter the ID of the original post: ")?;
    let target_language = prompt_non_empty(
        &mut input,
        &mut output,
        "Enter target language (e.g., 'fr' for French): ",
    )?;
    drop(input);

    let report = controller
        .run(&post_id, &target_language)
        .await
        .with_context(|| format!("Failed to translate post {}", post_id))?;

    if report.is_published() {
        info!("{}", report);
    } else {
        error!("{}", report);
    }

    Ok(())
}
