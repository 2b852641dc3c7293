//! The arkparse Command-Line Interface.
//!
//! File loading, AST printing and logging setup live here so the parsing core
//! stays free of I/O.

use std::io::Write;
use std::path::Path;
use std::process;

use clap::Parser as _;
use miette::Report;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing_subscriber::EnvFilter;

use crate::cli::args::{ArkArgs, AstFormat, Command};
use crate::discovery::{discover_sources, parse_file, read_source};
use crate::errors::Result;
use crate::output::{OutputSink, StdoutSink};
use crate::syntax::{Parser, ParserConfig, SourceContext};

pub mod args;

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

/// The main entry point for the CLI.
pub fn run() {
    let args = ArkArgs::parse();
    init_logging(args.verbose);

    let result = match args.command {
        Command::Ast {
            file,
            format,
            debug,
        } => print_ast(&file, format, ParserConfig { debug }),
        Command::Check { path } => check(&path),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            print_error(e);
            process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "arkparse=debug",
        _ => "arkparse=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn print_error(error: crate::errors::Error) {
    let report = Report::new(error);
    eprintln!("{report:?}");
}

// ============================================================================
// COMMANDS
// ============================================================================

fn print_ast(file: &Path, format: AstFormat, config: ParserConfig) -> Result<bool> {
    let source = read_source(file)?;
    let mut parser = Parser::with_config(&source, config);
    if let Err(e) = parser.parse() {
        let ctx = SourceContext::from_file(file.display().to_string(), source.as_str());
        return Err(e.with_source(&ctx).into());
    }

    let mut sink = StdoutSink;
    match format {
        AstFormat::Forms => parser.emit_ast(&mut sink),
        AstFormat::Tree => sink.emit(parser.ast().pretty().trim_end()),
        AstFormat::Json => sink.emit(&serde_json::to_string_pretty(parser.ast())?),
    }
    Ok(true)
}

/// Parses each discovered file independently; one failure does not stop the rest.
fn check(path: &Path) -> Result<bool> {
    let files = discover_sources(path)?;
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let mut failed = 0;

    for file in &files {
        match parse_file(file) {
            Ok(parsed) => {
                print_status(&mut stdout, Color::Green, "ok");
                let _ = writeln!(
                    stdout,
                    " {} ({} forms)",
                    parsed.path.display(),
                    parsed.ast.len()
                );
            }
            Err(e) => {
                failed += 1;
                print_status(&mut stdout, Color::Red, "error");
                let _ = writeln!(stdout, " {}", file.display());
                print_error(e);
            }
        }
    }

    let _ = stdout.set_color(ColorSpec::new().set_bold(true));
    let _ = writeln!(stdout, "{} checked, {} failed", files.len(), failed);
    let _ = stdout.reset();
    Ok(failed == 0)
}

fn print_status(stdout: &mut StandardStream, color: Color, label: &str) {
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(stdout, "{label}");
    let _ = stdout.reset();
}
