//! Error types for each stage of a parser's life.
//!
//! Registration, conversion, parsing and querying each fail with their own
//! type so a caller can tell a broken declaration apart from bad user input.

use thiserror::Error;

/// An invalid declaration, reported by the registration call that made it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("argument type is null")]
    NullType,

    #[error("invalid arity {0}: expected a count up to 32767 or -1 for variable arguments")]
    InvalidArity(i64),

    #[error("positional argument '{0}' must consume at least one token")]
    ZeroArityPositional(String),

    #[error("argument name is empty")]
    EmptyName,

    #[error("option '{0}' has no flag strings")]
    NoFlags(String),

    #[error("option '{0}' has an empty flag string")]
    EmptyFlag(String),

    #[error("cannot add '{name}' after variable arguments '{variadic}'")]
    AfterVariadic { name: String, variadic: String },

    #[error("argument name '{0}' is already registered")]
    DuplicateName(String),

    #[error("flag '{flag}' maps to both '{existing}' and '{name}'")]
    DuplicateFlag {
        flag: String,
        existing: String,
        name: String,
    },
}

/// A token whose text does not fit the grammar of its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("argument type is null")]
    NullType,

    #[error("value is not convertible to {kind}-type")]
    NotConvertible { kind: &'static str, raw: String },

    #[error("value '{raw}' is out of range for {target}")]
    OutOfRange { target: &'static str, raw: String },
}

/// Why a parse attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("insufficient number of arguments for '{name}'")]
    InsufficientArguments { name: String },

    #[error("argument '{name}': {source}")]
    Conversion {
        name: String,
        #[source]
        source: ConversionError,
    },
}

impl ParseError {
    /// Name of the argument or option the failure belongs to.
    pub fn name(&self) -> &str {
        match self {
            Self::InsufficientArguments { name } | Self::Conversion { name, .. } => name,
        }
    }
}

/// Failure reading values out of a result store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("arguments are not parsed")]
    NotParsed,

    #[error("argument '{name}' not found")]
    NotFound { name: String },

    #[error("argument '{name}' has no values")]
    Empty { name: String },

    #[error("argument '{name}': {source}")]
    Conversion {
        name: String,
        #[source]
        source: ConversionError,
    },
}

pub type ParseResult<T> = Result<T, ParseError>;
