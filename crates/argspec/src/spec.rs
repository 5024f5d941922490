//! Argument declarations: positional parameters and options.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::help::wrap_description;
use crate::value::ValueType;

/// Integer spelling of [`Arity::Variable`].
pub const VARIABLE: i32 = -1;

/// Number of tokens an argument consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Arity {
    /// Exactly this many tokens. `Count(0)` is an option switch.
    Count(usize),
    /// Every remaining token.
    Variable,
}

impl Arity {
    pub const ONE: Arity = Arity::Count(1);
    pub const SWITCH: Arity = Arity::Count(0);
    /// Largest accepted count.
    pub const MAX_COUNT: usize = i16::MAX as usize;

    /// Reject counts above [`Arity::MAX_COUNT`].
    pub fn checked(self) -> Result<Self, ConfigError> {
        match self {
            Self::Count(n) if n > Self::MAX_COUNT => {
                Err(ConfigError::InvalidArity(i64::try_from(n).unwrap_or(i64::MAX)))
            }
            arity => Ok(arity),
        }
    }

    pub fn is_variable(self) -> bool {
        matches!(self, Self::Variable)
    }

    pub fn is_switch(self) -> bool {
        self == Self::SWITCH
    }
}

impl Default for Arity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<i32> for Arity {
    type Error = ConfigError;

    fn try_from(n: i32) -> Result<Self, Self::Error> {
        match n {
            VARIABLE => Ok(Self::Variable),
            n if n >= 0 => Self::Count(n as usize).checked(),
            n => Err(ConfigError::InvalidArity(n.into())),
        }
    }
}

impl From<Arity> for i32 {
    fn from(arity: Arity) -> Self {
        match arity {
            Arity::Count(n) => i32::try_from(n).unwrap_or(i32::MAX),
            Arity::Variable => VARIABLE,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Variable => f.write_str("variable"),
        }
    }
}

/// Anything that names an arity: an [`Arity`], or an integer where `-1`
/// means variable.
pub trait IntoArity {
    fn into_arity(self) -> Result<Arity, ConfigError>;
}

impl IntoArity for Arity {
    fn into_arity(self) -> Result<Arity, ConfigError> {
        self.checked()
    }
}

impl IntoArity for i32 {
    fn into_arity(self) -> Result<Arity, ConfigError> {
        Arity::try_from(self)
    }
}

impl IntoArity for usize {
    fn into_arity(self) -> Result<Arity, ConfigError> {
        Arity::Count(self).checked()
    }
}

/// Flag string collection for option declarations.
///
/// Accepts a single flag or several aliases.
pub trait FlagNames {
    fn into_flags(self) -> Vec<String>;
}

impl FlagNames for &str {
    fn into_flags(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl FlagNames for String {
    fn into_flags(self) -> Vec<String> {
        vec![self]
    }
}

impl FlagNames for &[&str] {
    fn into_flags(self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

impl<const N: usize> FlagNames for [&str; N] {
    fn into_flags(self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

impl FlagNames for &[String] {
    fn into_flags(self) -> Vec<String> {
        self.to_vec()
    }
}

impl FlagNames for Vec<String> {
    fn into_flags(self) -> Vec<String> {
        self
    }
}

impl FlagNames for Vec<&str> {
    fn into_flags(self) -> Vec<String> {
        self.into_iter().map(|s| s.to_string()).collect()
    }
}

fn check_type(value_type: ValueType) -> Result<(), ConfigError> {
    match value_type {
        ValueType::Null => Err(ConfigError::NullType),
        _ => Ok(()),
    }
}

fn type_name(value_type: ValueType) -> &'static str {
    value_type.describe().unwrap_or("null")
}

/// A positional parameter, filled from the tokens no option claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalSpec {
    name: String,
    value_type: ValueType,
    arity: Arity,
    description: String,
}

impl PositionalSpec {
    pub fn new(
        name: impl Into<String>,
        value_type: ValueType,
        arity: impl IntoArity,
        description: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let arity = arity.into_arity()?;
        check_type(value_type)?;
        if name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if arity == Arity::Count(0) {
            return Err(ConfigError::ZeroArityPositional(name));
        }
        Ok(Self {
            name,
            value_type,
            arity,
            description: description.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn matches(&self, token: &str) -> bool {
        self.name == token
    }

    /// `name`, `name(0) name(1) ...` or `name...`.
    pub fn usage_fragment(&self) -> String {
        match self.arity {
            Arity::Count(1) => self.name.clone(),
            Arity::Count(n) => (0..n)
                .map(|i| format!("{}({i})", self.name))
                .collect::<Vec<_>>()
                .join(" "),
            Arity::Variable => format!("{}...", self.name),
        }
    }

    /// `  name [type,...]:` followed by the wrapped description.
    pub fn help_fragment(&self) -> String {
        let ty = type_name(self.value_type);
        let types = match self.arity {
            Arity::Count(n) => vec![ty; n].join(","),
            Arity::Variable => format!("{ty},..."),
        };
        let mut out = format!("  {} [{types}]:\n", self.name);
        out.push_str(&wrap_description(&self.description));
        out
    }
}

/// An optional argument introduced by one of its flag strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    flags: Vec<String>,
    name: String,
    value_type: ValueType,
    arity: Arity,
    description: String,
}

impl OptionSpec {
    /// Declare an option. With an arity of zero the option is a switch and
    /// its type is forced to [`ValueType::Boolean`].
    pub fn new(
        flags: impl FlagNames,
        name: impl Into<String>,
        value_type: ValueType,
        arity: impl IntoArity,
        description: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let arity = arity.into_arity()?;
        check_type(value_type)?;
        if name.is_empty() {
            return Err(ConfigError::EmptyName);
        }

        let mut unique: Vec<String> = Vec::new();
        for flag in flags.into_flags() {
            if flag.is_empty() {
                return Err(ConfigError::EmptyFlag(name));
            }
            if !unique.contains(&flag) {
                unique.push(flag);
            }
        }
        if unique.is_empty() {
            return Err(ConfigError::NoFlags(name));
        }

        let value_type = if arity.is_switch() {
            ValueType::Boolean
        } else {
            value_type
        };

        Ok(Self {
            flags: unique,
            name,
            value_type,
            arity,
            description: description.into(),
        })
    }

    /// Declare a presence-only boolean option.
    pub fn switch(
        flags: impl FlagNames,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Self::new(flags, name, ValueType::Boolean, Arity::SWITCH, description)
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn matches(&self, token: &str) -> bool {
        self.flags.iter().any(|flag| flag == token)
    }

    /// `[-f name]`, `[{-f|--flag} name(0) name(1)]`, `[-f name...]`, `[-s]`.
    pub fn usage_fragment(&self) -> String {
        let flags = self.flags.join("|");
        let mut out = String::from("[");
        if self.flags.len() > 1 {
            out.push('{');
            out.push_str(&flags);
            out.push('}');
        } else {
            out.push_str(&flags);
        }
        match self.arity {
            Arity::Count(0) => {}
            Arity::Count(1) => {
                out.push(' ');
                out.push_str(&self.name);
            }
            Arity::Count(n) => {
                for i in 0..n {
                    out.push_str(&format!(" {}({i})", self.name));
                }
            }
            Arity::Variable => out.push_str(&format!(" {}...", self.name)),
        }
        out.push(']');
        out
    }

    /// `  -f|--flag [name:type]:` followed by the wrapped description.
    pub fn help_fragment(&self) -> String {
        let ty = type_name(self.value_type);
        let mut out = format!("  {}", self.flags.join("|"));
        match self.arity {
            Arity::Count(0) => {}
            Arity::Count(1) => out.push_str(&format!(" [{}:{ty}]", self.name)),
            Arity::Count(n) => {
                let parts: Vec<String> = (0..n)
                    .map(|i| format!("{}({i}):{ty}", self.name))
                    .collect();
                out.push_str(&format!(" [{}]", parts.join(",")));
            }
            Arity::Variable => out.push_str(&format!(" [{}:{ty},...]", self.name)),
        }
        out.push_str(":\n");
        out.push_str(&wrap_description(&self.description));
        out
    }
}

/// Borrowed view over either kind of declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecRef<'a> {
    Positional(&'a PositionalSpec),
    Option(&'a OptionSpec),
}

impl<'a> SpecRef<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Self::Positional(p) => p.name(),
            Self::Option(o) => o.name(),
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Positional(p) => p.value_type(),
            Self::Option(o) => o.value_type(),
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Self::Positional(p) => p.arity(),
            Self::Option(o) => o.arity(),
        }
    }

    pub fn description(&self) -> &'a str {
        match self {
            Self::Positional(p) => p.description(),
            Self::Option(o) => o.description(),
        }
    }

    pub fn matches(&self, token: &str) -> bool {
        match self {
            Self::Positional(p) => p.matches(token),
            Self::Option(o) => o.matches(token),
        }
    }

    pub fn usage_fragment(&self) -> String {
        match self {
            Self::Positional(p) => p.usage_fragment(),
            Self::Option(o) => o.usage_fragment(),
        }
    }

    pub fn help_fragment(&self) -> String {
        match self {
            Self::Positional(p) => p.help_fragment(),
            Self::Option(o) => o.help_fragment(),
        }
    }
}
