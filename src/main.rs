//! Expando - command line entrypoint.
//!
//! Loads configuration, initializes logging, and compiles mapping documents
//! into C or JSON tables.

use clap::{Parser, Subcommand};
use expando_lib::compiler::{CompileReport, TrieCompiler};
use expando_lib::config::{ConfigLoader, ExpandoConfig, LogConfig, OutputFormat, ENV_PREFIX};
use expando_lib::emit::emitter_for;
use expando_lib::error::{
    ErrorContext, ErrorReporter, ExpandoError, ExpandoResult, TracingErrorReporter,
};
use expando_lib::mapping::MappingDocument;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;

/// Command line arguments for Expando.
#[derive(Parser, Debug)]
#[clap(name = "expando", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a mapping document into trie tables
    Compile {
        /// Mapping document (.toml or .json)
        #[clap(short, long, value_parser)]
        input: PathBuf,

        /// Output file for the tables
        #[clap(short, long, value_parser)]
        output: PathBuf,

        /// Output file for the C header
        #[clap(long, value_parser)]
        header: Option<PathBuf>,

        /// Output format (defaults to the configured one)
        #[clap(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Report diagnostics for a mapping document without writing output
    Check {
        /// Mapping document (.toml or .json)
        #[clap(short, long, value_parser)]
        input: PathBuf,
    },

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(log: &LogConfig) -> ExpandoResult<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log.level))
        .map_err(|e| ExpandoError::Custom(format!("Invalid log filter: {e}")))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| {
        ExpandoError::Custom(format!("Failed to set global tracing subscriber: {e}"))
    })
}

/// Loads the mapping at `input` and compiles it.
fn compile_mapping(config: &ExpandoConfig, input: &Path) -> ExpandoResult<CompileReport> {
    let document = MappingDocument::load(input)?;
    let compiler = TrieCompiler::from_config(&config.compiler)?;
    let entries = document.entries(config.compiler.default_preserve_trigger);
    Ok(compiler.compile(entries)?)
}

fn write_output(path: &Path, contents: &str) -> ExpandoResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}

fn run(args: Args, config: ExpandoConfig) -> ExpandoResult<()> {
    match args.command {
        Command::Compile {
            input,
            output,
            header,
            format,
        } => {
            let format = format.unwrap_or(config.output.format);
            info!("Compiling {:?} as {:?}", input, format);

            let report = compile_mapping(&config, &input)?;
            let emitter = emitter_for(format, &config.output);

            write_output(&output, &emitter.emit(&report.bundle)?)?;
            if let Some(header_path) = header {
                match emitter.header(&report.bundle)? {
                    Some(contents) => write_output(&header_path, &contents)?,
                    None => {
                        tracing::warn!("Format {:?} has no header; skipping {:?}", format, header_path)
                    }
                }
            }

            info!(
                nodes = report.bundle.node_count(),
                skipped = report.skipped(),
                overridden = report.overridden(),
                "Tables written to {:?}",
                output
            );
            Ok(())
        }
        Command::Check { input } => {
            let report = compile_mapping(&config, &input)?;
            for diagnostic in &report.diagnostics {
                println!("{diagnostic}");
            }
            println!(
                "{} nodes, {} hash entries, {} pool bytes, longest trigger {}; {} skipped, {} overridden",
                report.bundle.node_count(),
                report.bundle.hash_entries.len(),
                report.bundle.string_pool.len(),
                report.bundle.max_trigger_length,
                report.skipped(),
                report.overridden()
            );
            Ok(())
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            let toml = toml::to_string_pretty(&ExpandoConfig::default())
                .map_err(|e| ExpandoError::Serialization(format!("Failed to serialize config: {e}")))?;
            write_output(&output, &toml)?;
            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}

/// Main entry point for the application.
fn main() {
    let args = Args::parse();
    let reporter = TracingErrorReporter;

    let loader = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX);
    let (config, config_error) = match loader.load() {
        Ok(config) => (config, None),
        Err(e) => (ExpandoConfig::default(), Some(e)),
    };

    if let Err(e) = init_logging(&config.log) {
        eprintln!("{e}");
        process::exit(1);
    }

    if let Some(e) = config_error {
        reporter.report(
            ErrorContext::new(e.into(), "config")
                .with_details(format!("while loading {:?}", args.config)),
        );
        process::exit(1);
    }

    let component = match &args.command {
        Command::Compile { .. } => "compile",
        Command::Check { .. } => "check",
        Command::GenConfig { .. } => "gen-config",
    };

    if let Err(e) = run(args, config) {
        reporter.report(ErrorContext::new(e, component));
        process::exit(1);
    }
}
