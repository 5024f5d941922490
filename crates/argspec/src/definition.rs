//! Serializable parser declarations.
//!
//! A [`ParserDefinition`] describes a whole parser as data, e.g. loaded from
//! JSON:
//!
//! ```json
//! {
//!   "program": "sample",
//!   "description": "A sample program.",
//!   "help-flags": ["-h", "--help"],
//!   "options": [
//!     { "flags": ["-n", "--count"], "name": "count", "type": "integer", "arity": 1 }
//!   ],
//!   "arguments": [
//!     { "name": "files", "type": "string", "arity": -1 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::parser::{ArgParser, Settings};
use crate::spec::Arity;
use crate::value::ValueType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArgumentDef {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default)]
    pub arity: Arity,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionDef {
    pub flags: Vec<String>,
    pub name: String,
    #[serde(rename = "type", default = "default_option_type")]
    pub value_type: ValueType,
    #[serde(default = "default_option_arity")]
    pub arity: Arity,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

fn default_option_type() -> ValueType {
    ValueType::Boolean
}

fn default_option_arity() -> Arity {
    Arity::SWITCH
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ParserDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Flags of the help switch, if the parser should have one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub help_flags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<ArgumentDef>,
}

impl ParserDefinition {
    /// Build a parser over `tokens` (program name not included).
    pub fn build<I, S>(&self, tokens: I) -> Result<ArgParser, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.build_with_settings(tokens, Settings::default())
    }

    /// Build a parser with `settings` in place before registration.
    ///
    /// The help switch is registered first, then options, then positional
    /// arguments, each in document order.
    pub fn build_with_settings<I, S>(
        &self,
        tokens: I,
        settings: Settings,
    ) -> Result<ArgParser, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let program = self.program.clone().unwrap_or_default();
        let argv = std::iter::once(program).chain(tokens.into_iter().map(Into::into));
        let mut parser = ArgParser::new(argv, self.description.clone()).with_settings(settings);

        if !self.help_flags.is_empty() {
            parser.add_help(self.help_flags.as_slice())?;
        }
        for o in &self.options {
            parser.add_option(
                o.flags.as_slice(),
                o.name.as_str(),
                o.value_type,
                o.arity,
                o.description.as_str(),
            )?;
        }
        for a in &self.arguments {
            parser.add_argument(a.name.as_str(), a.value_type, a.arity, a.description.as_str())?;
        }
        Ok(parser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ParseOutcome;

    const SAMPLE: &str = r#"{
        "program": "sample",
        "description": "A sample program.",
        "help-flags": ["-h", "--help"],
        "options": [
            { "flags": ["-v"], "name": "verbose" },
            { "flags": ["-n", "--count"], "name": "count", "type": "integer", "arity": 1 }
        ],
        "arguments": [
            { "name": "first", "type": "float" },
            { "name": "files", "type": "string", "arity": -1, "description": "inputs" }
        ]
    }"#;

    #[test]
    fn deserializes_with_defaults() {
        let def: ParserDefinition = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(def.options[0].value_type, ValueType::Boolean);
        assert_eq!(def.options[0].arity, Arity::SWITCH);
        assert_eq!(def.arguments[0].arity, Arity::ONE);
        assert_eq!(def.arguments[1].arity, Arity::Variable);
    }

    #[test]
    fn rejects_bad_arity_and_type() {
        let bad_arity = r#"{ "arguments": [ { "name": "x", "type": "integer", "arity": -4 } ] }"#;
        assert!(serde_json::from_str::<ParserDefinition>(bad_arity).is_err());
        let bad_type = r#"{ "arguments": [ { "name": "x", "type": "decimal" } ] }"#;
        assert!(serde_json::from_str::<ParserDefinition>(bad_type).is_err());
    }

    #[test]
    fn builds_a_working_parser() {
        let def: ParserDefinition = serde_json::from_str(SAMPLE).unwrap();
        let mut parser = def
            .build_with_settings(["-n", "2", "1.5", "a", "b"], Settings::returning())
            .unwrap();
        assert_eq!(parser.settings().help.as_deref(), Some("help"));

        assert_eq!(parser.parse(), Ok(ParseOutcome::Complete));
        assert_eq!(parser.program(), "sample");
        assert_eq!(parser.get_first::<i64>("count").unwrap(), 2);
        assert_eq!(parser.get_first::<f64>("first").unwrap(), 1.5);
        assert_eq!(parser.get_all::<String>("files").unwrap(), vec!["a", "b"]);
        assert!(!parser.find("verbose"));
        assert_eq!(
            parser.render_usage(),
            "sample [{-h|--help}] [-v] [{-n|--count} count] first files..."
        );
    }

    #[test]
    fn help_flag_skips_positionals() {
        let def: ParserDefinition = serde_json::from_str(SAMPLE).unwrap();
        let mut parser = def.build_with_settings(["--help"], Settings::returning()).unwrap();
        assert_eq!(parser.parse(), Ok(ParseOutcome::HelpRequested));
    }

    #[test]
    fn null_type_fails_at_build() {
        let def = ParserDefinition {
            arguments: vec![ArgumentDef {
                name: "x".to_string(),
                value_type: ValueType::Null,
                arity: Arity::ONE,
                description: String::new(),
            }],
            ..Default::default()
        };
        assert_eq!(def.build(Vec::<String>::new()).unwrap_err(), ConfigError::NullType);
    }

    #[test]
    fn round_trips_through_json() {
        let def: ParserDefinition = serde_json::from_str(SAMPLE).unwrap();
        let json = serde_json::to_string(&def).unwrap();
        assert!(json.contains(r#""arity":-1"#));
        let back: ParserDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, def);
    }
}
