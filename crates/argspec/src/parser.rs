//! The `ArgParser` front end: declarations, one parse, then typed reads.

use std::io::{self, Write};
use std::process;

use tracing::debug;

use crate::error::{ConfigError, ParseResult, QueryError};
use crate::help;
use crate::matches::Matches;
use crate::registry::{ParseOutcome, Registry};
use crate::spec::{Arity, FlagNames, IntoArity, OptionSpec, PositionalSpec};
use crate::value::{FromValue, ValueType};

/// Result name of the switch registered by [`ArgParser::add_help`].
pub const HELP_NAME: &str = "help";

/// Exit status after printing help.
pub const EXIT_HELP: i32 = 0;
/// Exit status after a failed parse.
pub const EXIT_FAILURE: i32 = 1;

/// What [`ArgParser::parse`] does besides parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// On failure, print the usage and the error to stderr and exit with
    /// [`EXIT_FAILURE`].
    pub exit_on_error: bool,
    /// When help is requested, print the full help to stdout and exit with
    /// [`EXIT_HELP`].
    pub exit_on_help: bool,
    /// Name of the option that requests help. Seeing it skips the
    /// positional pass.
    pub help: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            exit_on_error: true,
            exit_on_help: true,
            help: None,
        }
    }
}

impl Settings {
    /// Never exit; always hand the outcome back to the caller.
    pub fn returning() -> Self {
        Self {
            exit_on_error: false,
            exit_on_help: false,
            help: None,
        }
    }
}

/// Argument parser for one program invocation.
///
/// Register arguments, call [`ArgParser::parse`] once, then read values.
/// A parser is not meant to be shared between threads while it is being
/// set up or parsed.
///
/// ```
/// use argspec::{ArgParser, Settings, ValueType};
///
/// let mut parser = ArgParser::new(["prog", "-n", "3", "in.txt"], "Copy a file.")
///     .with_settings(Settings::returning());
/// parser.add_help(["-h", "--help"])?;
/// parser.add_option("-n", "count", ValueType::Integer, 1, "number of copies")?;
/// parser.add_argument("input", ValueType::String, 1, "file to copy")?;
/// parser.parse()?;
///
/// assert_eq!(parser.get_first::<u32>("count")?, 3);
/// assert_eq!(parser.get_first::<String>("input")?, "in.txt");
/// assert!(!parser.find("help"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct ArgParser {
    program: String,
    description: String,
    tokens: Vec<String>,
    registry: Registry,
    settings: Settings,
    matches: Matches,
}

impl ArgParser {
    /// `argv[0]` is the program name; the rest are the tokens to parse.
    pub fn new<I, S>(argv: I, description: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let program = argv.next().unwrap_or_default();
        Self {
            program,
            description: description.into(),
            tokens: argv.collect(),
            registry: Registry::new(),
            settings: Settings::default(),
            matches: Matches::new(),
        }
    }

    /// Parser over the arguments of the current process.
    pub fn from_env(description: impl Into<String>) -> Self {
        Self::new(std::env::args(), description)
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn matches(&self) -> &Matches {
        &self.matches
    }

    /// Declare a positional argument.
    pub fn add_argument(
        &mut self,
        name: impl Into<String>,
        value_type: ValueType,
        arity: impl IntoArity,
        description: impl Into<String>,
    ) -> Result<(), ConfigError> {
        let spec = PositionalSpec::new(name, value_type, arity, description)?;
        self.registry.add_positional(spec)?;
        self.matches.reset();
        Ok(())
    }

    /// Declare an option taking `arity` values (zero for a switch).
    pub fn add_option(
        &mut self,
        flags: impl FlagNames,
        name: impl Into<String>,
        value_type: ValueType,
        arity: impl IntoArity,
        description: impl Into<String>,
    ) -> Result<(), ConfigError> {
        let spec = OptionSpec::new(flags, name, value_type, arity, description)?;
        self.registry.add_option(spec)?;
        self.matches.reset();
        Ok(())
    }

    /// Declare a presence-only boolean option.
    pub fn add_switch(
        &mut self,
        flags: impl FlagNames,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<(), ConfigError> {
        self.add_option(flags, name, ValueType::Boolean, Arity::SWITCH, description)
    }

    /// Declare the help switch and make it stop parsing when seen.
    pub fn add_help(&mut self, flags: impl FlagNames) -> Result<(), ConfigError> {
        self.add_switch(flags, HELP_NAME, "show this help message and exit")?;
        self.settings.help = Some(HELP_NAME.to_string());
        Ok(())
    }

    /// Parse the tokens, returning the outcome whatever the settings say.
    pub fn try_parse(&mut self) -> ParseResult<ParseOutcome> {
        let help = self.settings.help.as_deref();
        let outcome = self
            .registry
            .parse_into(self.tokens.as_slice(), help, &mut self.matches);
        match &outcome {
            Ok(outcome) => debug!(?outcome, values = self.matches.len(), "parse finished"),
            Err(err) => debug!(error = %err, "parse failed"),
        }
        outcome
    }

    /// Parse the tokens, exiting the process where [`Settings`] asks for it.
    pub fn parse(&mut self) -> ParseResult<ParseOutcome> {
        match self.try_parse() {
            Ok(ParseOutcome::HelpRequested) if self.settings.exit_on_help => {
                let mut stdout = io::stdout().lock();
                let _ = self.write_help(&mut stdout);
                let _ = stdout.flush();
                process::exit(EXIT_HELP);
            }
            Err(err) if self.settings.exit_on_error => {
                let mut stderr = io::stderr().lock();
                let _ = self.write_brief_help(&mut stderr);
                let _ = writeln!(stderr, "error: {err}");
                process::exit(EXIT_FAILURE);
            }
            outcome => outcome,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.matches.is_complete()
    }

    pub fn find(&self, name: &str) -> bool {
        self.matches.find(name)
    }

    pub fn get_all<T: FromValue>(&self, name: &str) -> Result<Vec<T>, QueryError> {
        self.matches.get_all(name)
    }

    pub fn get_all_or<T: FromValue>(&self, name: &str, default: T) -> Result<Vec<T>, QueryError> {
        self.matches.get_all_or(name, default)
    }

    pub fn get_first<T: FromValue>(&self, name: &str) -> Result<T, QueryError> {
        self.matches.get_first(name)
    }

    pub fn get_first_or<T: FromValue>(&self, name: &str, default: T) -> Result<T, QueryError> {
        self.matches.get_first_or(name, default)
    }

    pub fn render_usage(&self) -> String {
        help::render_usage(&self.program, &self.registry)
    }

    /// Description, usage line and the per-argument sections.
    pub fn render_help(&self) -> String {
        help::render_help(&self.description, &self.program, &self.registry, false)
    }

    /// Description and usage line only.
    pub fn render_brief_help(&self) -> String {
        help::render_help(&self.description, &self.program, &self.registry, true)
    }

    pub fn render_status(&self) -> String {
        help::render_status(self.tokens.as_slice(), &self.registry, &self.matches)
    }

    pub fn write_usage<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.render_usage())
    }

    pub fn write_help<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(self.render_help().as_bytes())
    }

    pub fn write_brief_help<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(self.render_brief_help().as_bytes())
    }

    pub fn write_status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(self.render_status().as_bytes())
    }
}
