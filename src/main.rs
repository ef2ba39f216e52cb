// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::PathBuf;

use subconv::converter::{Converter, detect_and_parse};
use subconv::file_utils::FileManager;
use subconv::formats::RenderOptions;
use subconv::providers;

/// CLI wrapper for log levels to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert subtitle files to another format (default command)
    Convert(ConvertArgs),

    /// Detect a subtitle file's format and print its entries as JSON
    Probe {
        /// Subtitle file to inspect
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,
    },

    /// List supported subtitle formats
    Formats,

    /// Generate shell completions for subconv
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Target format extension (e.g. 'vtt', 'srt')
    #[arg(short, long, default_value = "vtt")]
    to: String,

    /// Output file path (single-file input only; default: next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Prepend a UTF-8 byte order mark to the output
    #[arg(short, long)]
    bom: bool,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subconv - subtitle format converter
///
/// Converts timed-text subtitle files between formats, detecting the source
/// format from the file content rather than its extension.
#[derive(Parser, Debug)]
#[command(name = "subconv")]
#[command(version = "1.0.0")]
#[command(about = "Subtitle format conversion tool")]
#[command(long_about = "subconv converts subtitle files between formats (WebVTT, SubRip).

EXAMPLES:
    subconv episode.srt                      # Convert to WebVTT next to the input
    subconv -t srt episode.vtt               # Convert to SubRip
    subconv -t vtt -o out.vtt episode.srt    # Choose the output path
    subconv -t vtt --bom episode.srt         # Prepend a UTF-8 BOM to the output
    subconv -t vtt /media/subs/              # Convert a whole directory
    subconv probe episode.srt                # Print parsed entries as JSON
    subconv formats                          # List supported formats
    subconv completions bash > subconv.bash  # Generate bash completions")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Target format extension (e.g. 'vtt', 'srt')
    #[arg(short, long, default_value = "vtt")]
    to: String,

    /// Output file path (single-file input only; default: next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Prepend a UTF-8 byte order mark to the output
    #[arg(short, long)]
    bom: bool,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
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
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
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

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // The convert command may raise or lower it from its own flag
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subconv", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Formats) => {
            for provider in providers() {
                println!("{:<8} .{}", provider.name(), provider.file_extension());
            }
            Ok(())
        }
        Some(Commands::Probe { input_path }) => run_probe(&input_path),
        Some(Commands::Convert(args)) => run_convert(args),
        None => {
            // Default behavior - use top-level args for convenience
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let convert_args = ConvertArgs {
                input_path,
                to: cli.to,
                output: cli.output,
                bom: cli.bom,
                log_level: cli.log_level,
            };
            run_convert(convert_args)
        }
    }
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    if let Some(level) = args.log_level {
        log::set_max_level(level.into());
    }

    let options = RenderOptions { add_bom: args.bom };
    let converter = Converter::for_extension(&args.to, options)?;
    let written = converter.convert_path(&args.input_path, args.output.as_deref())?;

    info!(
        "Wrote {} {} file(s)",
        written.len(),
        converter.target().name()
    );
    Ok(())
}

fn run_probe(input_path: &PathBuf) -> Result<()> {
    let raw = FileManager::read_bytes(input_path)?;
    let (provider, track) = detect_and_parse(&raw)
        .with_context(|| format!("Failed to parse {:?}", input_path))?;

    eprintln!("Format: {} (.{})", provider.name(), provider.file_extension());
    println!("{}", serde_json::to_string_pretty(&track.entries)?);
    Ok(())
}
