mod definition;

use anyhow::{Context, Result};
use argspec::{ArgParser, EXIT_FAILURE, Matches, ParseOutcome, Settings};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing_subscriber::{EnvFilter, fmt};

use crate::definition::{
    DEFAULT_DEFINITION_NAME, guess_program_name, load_definition, sample_definition,
    write_definition,
};

#[derive(Parser)]
#[command(name = "argspec", disable_help_subcommand = true)]
#[command(version, about = "Try argument definitions against command lines", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a sample argument definition
    Init(InitArgs),

    /// Parse tokens against a definition and report the values
    Parse(ParseArgs),

    /// Print the help generated from a definition
    Help(HelpArgs),
}

#[derive(Parser)]
struct InitArgs {
    /// Definition file to create
    #[arg(value_name = "FILE", default_value = DEFAULT_DEFINITION_NAME)]
    path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

#[derive(Parser)]
struct ParseArgs {
    /// Path to the argument definition
    #[arg(short, long, default_value = DEFAULT_DEFINITION_NAME, value_name = "FILE")]
    definition: PathBuf,

    /// Program name shown in usage (overrides the definition)
    #[arg(long, value_name = "NAME")]
    program: Option<String>,

    /// Print a JSON report instead of the status dump
    #[arg(long)]
    json: bool,

    /// Report parse errors and help requests instead of exiting like the
    /// defined program would
    #[arg(long)]
    keep_going: bool,

    /// Tokens to parse, after `--`
    #[arg(last = true, value_name = "TOKENS")]
    tokens: Vec<String>,
}

#[derive(Parser)]
struct HelpArgs {
    /// Path to the argument definition
    #[arg(short, long, default_value = DEFAULT_DEFINITION_NAME, value_name = "FILE")]
    definition: PathBuf,

    /// Program name shown in usage (overrides the definition)
    #[arg(long, value_name = "NAME")]
    program: Option<String>,

    /// Print only the usage line
    #[arg(long)]
    usage: bool,
}

#[derive(Debug, Serialize)]
struct ParseReport<'a> {
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    values: &'a Matches,
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => init(args),
        Commands::Parse(args) => parse(args),
        Commands::Help(args) => help(args),
    }
}

fn init(args: InitArgs) -> Result<ExitCode> {
    let program = guess_program_name(&args.path).unwrap_or_else(|| "sample".to_string());
    let dest = write_definition(&args.path, &sample_definition(&program), args.force)?;

    eprintln!("Created: {}", dest.display());
    eprintln!("\nNext steps:");
    eprintln!("  1. Edit {} to declare your arguments", dest.display());
    eprintln!("  2. Run: argspec help -d {}", dest.display());
    eprintln!("  3. Run: argspec parse -d {} -- <TOKENS>", dest.display());

    Ok(ExitCode::SUCCESS)
}

fn build_parser(
    definition: &Path,
    program: Option<String>,
    tokens: Vec<String>,
    settings: Settings,
) -> Result<ArgParser> {
    let mut def = load_definition(definition)?;
    if program.is_some() {
        def.program = program;
    }
    def.build_with_settings(tokens, settings)
        .with_context(|| format!("invalid definition: {}", definition.display()))
}

fn parse(args: ParseArgs) -> Result<ExitCode> {
    tracing::debug!("executing parse command");

    let settings = if args.keep_going {
        Settings::returning()
    } else {
        Settings::default()
    };
    let mut parser = build_parser(&args.definition, args.program, args.tokens, settings)?;
    let result = parser.parse();

    let (outcome, error) = match &result {
        Ok(ParseOutcome::Complete) => ("complete", None),
        Ok(ParseOutcome::HelpRequested) => ("help", None),
        Err(err) => ("error", Some(err.to_string())),
    };
    tracing::info!(outcome, tokens = parser.tokens().len(), "parse finished");

    let mut stdout = io::stdout().lock();
    if args.json {
        let report = ParseReport {
            outcome,
            error: error.clone(),
            values: parser.matches(),
        };
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        writeln!(stdout, "{json}")?;
    } else {
        if matches!(result, Ok(ParseOutcome::HelpRequested)) {
            parser.write_help(&mut stdout)?;
        }
        parser.write_status(&mut stdout)?;
        if let Some(error) = &error {
            eprintln!("error: {error}");
        }
    }

    if error.is_some() {
        return Ok(ExitCode::from(EXIT_FAILURE as u8));
    }
    Ok(ExitCode::SUCCESS)
}

fn help(args: HelpArgs) -> Result<ExitCode> {
    let parser = build_parser(
        &args.definition,
        args.program,
        Vec::new(),
        Settings::returning(),
    )?;

    let mut stdout = io::stdout().lock();
    if args.usage {
        parser.write_usage(&mut stdout)?;
    } else {
        parser.write_help(&mut stdout)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}
