//! Declarative, typed command line argument parsing.
//!
//! Declare positional arguments and options, each with a [`ValueType`], an
//! [`Arity`] and a description, parse the raw tokens, then read typed values
//! back. Usage and help text are generated from the declarations.
//!
//! ```
//! use argspec::{ArgParser, ParseOutcome, Settings, ValueType, VARIABLE};
//!
//! let argv = ["sum", "--scale", "0.5", "1", "2", "3"];
//! let mut parser = ArgParser::new(argv, "Add numbers.").with_settings(Settings::returning());
//! parser.add_help(["-h", "--help"])?;
//! parser.add_option("--scale", "scale", ValueType::Float, 1, "multiply the result")?;
//! parser.add_argument("n", ValueType::Integer, VARIABLE, "numbers to add")?;
//!
//! assert_eq!(parser.parse()?, ParseOutcome::Complete);
//! let total: i64 = parser.get_all::<i64>("n")?.iter().sum();
//! let scale = parser.get_first_or("scale", 1.0f64)?;
//! assert_eq!(total as f64 * scale, 3.0);
//! assert_eq!(parser.render_usage(), "sum [{-h|--help}] [--scale scale] n...");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod definition;
pub mod error;
pub mod help;
pub mod matches;
pub mod parser;
pub mod registry;
pub mod spec;
pub mod value;

pub use definition::{ArgumentDef, OptionDef, ParserDefinition};
pub use error::{ConfigError, ConversionError, ParseError, ParseResult, QueryError};
pub use matches::Matches;
pub use parser::{ArgParser, EXIT_FAILURE, EXIT_HELP, HELP_NAME, Settings};
pub use registry::{ParseOutcome, Registry};
pub use spec::{Arity, FlagNames, IntoArity, OptionSpec, PositionalSpec, SpecRef, VARIABLE};
pub use value::{FromValue, TypedValue, ValueType};
