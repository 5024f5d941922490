//! Declared arguments and the two-pass parsing engine.
//!
//! Parsing runs in two passes:
//! 1. Options. Every token is tested against the options in declaration
//!    order. The first match consumes the flag and its values; tokens no
//!    option claims are kept, in order, for the second pass.
//! 2. Positionals. The kept tokens are handed out to the positional
//!    arguments in declaration order. Tokens left over at the end are
//!    ignored.
//!
//! When a help option is configured and was seen in the first pass, the
//! second pass is skipped so `-h` works without the required positionals.

use tracing::{debug, trace};

use crate::error::{ConfigError, ParseError, ParseResult};
use crate::matches::Matches;
use crate::spec::{Arity, OptionSpec, PositionalSpec, SpecRef};
use crate::value::{TypedValue, ValueType};

/// How a successful parse ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Every positional argument was filled.
    Complete,
    /// The help option was given; positionals were not processed.
    HelpRequested,
}

/// Ordered positional declarations and option declarations.
///
/// Once an argument with [`Arity::Variable`] is registered nothing else can
/// be added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    positionals: Vec<PositionalSpec>,
    options: Vec<OptionSpec>,
    variadic: Option<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positionals(&self) -> &[PositionalSpec] {
        &self.positionals
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// Options first, then positionals, each in declaration order.
    pub fn specs(&self) -> impl Iterator<Item = SpecRef<'_>> {
        self.options
            .iter()
            .map(SpecRef::Option)
            .chain(self.positionals.iter().map(SpecRef::Positional))
    }

    pub fn is_empty(&self) -> bool {
        self.positionals.is_empty() && self.options.is_empty()
    }

    /// First option (in declaration order) claiming `token`.
    pub fn find_option(&self, token: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.matches(token))
    }

    pub fn add_positional(&mut self, spec: PositionalSpec) -> Result<(), ConfigError> {
        self.check_addable(spec.name())?;
        if spec.arity().is_variable() {
            self.variadic = Some(spec.name().to_string());
        }
        debug!(name = spec.name(), arity = %spec.arity(), "registered positional argument");
        self.positionals.push(spec);
        Ok(())
    }

    pub fn add_option(&mut self, spec: OptionSpec) -> Result<(), ConfigError> {
        self.check_addable(spec.name())?;
        for flag in spec.flags() {
            if let Some(existing) = self.find_option(flag) {
                return Err(ConfigError::DuplicateFlag {
                    flag: flag.clone(),
                    existing: existing.name().to_string(),
                    name: spec.name().to_string(),
                });
            }
        }
        if spec.arity().is_variable() {
            self.variadic = Some(spec.name().to_string());
        }
        debug!(
            name = spec.name(),
            flags = ?spec.flags(),
            arity = %spec.arity(),
            "registered option"
        );
        self.options.push(spec);
        Ok(())
    }

    fn check_addable(&self, name: &str) -> Result<(), ConfigError> {
        if let Some(variadic) = &self.variadic {
            return Err(ConfigError::AfterVariadic {
                name: name.to_string(),
                variadic: variadic.clone(),
            });
        }
        if self.specs().any(|s| s.name() == name) {
            return Err(ConfigError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    /// Parse `tokens` into a fresh result store.
    ///
    /// No help short-circuit is applied and partial results of a failed
    /// attempt are dropped; use [`Registry::parse_into`] for either.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> ParseResult<Matches> {
        let mut matches = Matches::new();
        self.parse_into(tokens, None, &mut matches)?;
        Ok(matches)
    }

    /// Parse `tokens` into `matches`, replacing whatever it held.
    ///
    /// `help` names the option that stops parsing after the option pass.
    /// On failure `matches` stays incomplete but keeps the options recorded
    /// before the error.
    pub fn parse_into<S: AsRef<str>>(
        &self,
        tokens: &[S],
        help: Option<&str>,
        matches: &mut Matches,
    ) -> ParseResult<ParseOutcome> {
        matches.reset();

        let remaining = self.option_pass(tokens, matches)?;

        if let Some(help) = help
            && matches.find(help)
        {
            debug!(option = help, "help requested, skipping positional arguments");
            matches.mark_complete();
            return Ok(ParseOutcome::HelpRequested);
        }

        self.positional_pass(&remaining, matches)?;
        matches.mark_complete();
        Ok(ParseOutcome::Complete)
    }

    fn option_pass<'t, S: AsRef<str>>(
        &self,
        tokens: &'t [S],
        matches: &mut Matches,
    ) -> ParseResult<Vec<&'t str>> {
        let mut remaining = Vec::new();
        let mut i = 0usize;

        while i < tokens.len() {
            let token = tokens[i].as_ref();
            let Some(option) = self.find_option(token) else {
                remaining.push(token);
                i += 1;
                continue;
            };
            i += 1;

            let values = match option.arity() {
                Arity::Count(0) => vec![TypedValue::present()],
                Arity::Count(n) => {
                    let Some(taken) = tokens.get(i..i + n) else {
                        return Err(ParseError::InsufficientArguments {
                            name: option.name().to_string(),
                        });
                    };
                    i += n;
                    convert_all(option.name(), option.value_type(), taken)?
                }
                Arity::Variable => {
                    let taken = &tokens[i..];
                    i = tokens.len();
                    convert_all(option.name(), option.value_type(), taken)?
                }
            };
            trace!(flag = token, option = option.name(), count = values.len(), "matched option");
            matches.push_values(option.name(), values);
        }

        Ok(remaining)
    }

    fn positional_pass(&self, remaining: &[&str], matches: &mut Matches) -> ParseResult<()> {
        let mut i = 0usize;

        for spec in &self.positionals {
            let insufficient = || ParseError::InsufficientArguments {
                name: spec.name().to_string(),
            };
            if i >= remaining.len() {
                return Err(insufficient());
            }
            let taken = match spec.arity() {
                Arity::Count(n) => {
                    let taken = remaining.get(i..i + n).ok_or_else(insufficient)?;
                    i += n;
                    taken
                }
                Arity::Variable => {
                    let taken = &remaining[i..];
                    i = remaining.len();
                    taken
                }
            };
            let values = convert_all(spec.name(), spec.value_type(), taken)?;
            trace!(name = spec.name(), count = values.len(), "assigned positional argument");
            matches.push_values(spec.name(), values);
        }

        if i < remaining.len() {
            debug!(ignored = ?&remaining[i..], "ignoring extra arguments");
        }
        Ok(())
    }
}

fn convert_all<S: AsRef<str>>(
    name: &str,
    value_type: ValueType,
    tokens: &[S],
) -> ParseResult<Vec<TypedValue>> {
    tokens
        .iter()
        .map(|t| {
            TypedValue::new(value_type, t.as_ref()).map_err(|source| ParseError::Conversion {
                name: name.to_string(),
                source,
            })
        })
        .collect()
}
