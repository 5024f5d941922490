use argspec::{
    ArgParser, ConfigError, ParseError, ParseOutcome, QueryError, Settings, VARIABLE, ValueType,
};

fn sample(tokens: &[&str]) -> ArgParser {
    let argv = std::iter::once("sample").chain(tokens.iter().copied());
    let mut parser = ArgParser::new(argv, "sample program").with_settings(Settings::returning());
    parser.add_argument("arg1", ValueType::Integer, 1, "an integer argument").expect("arg1");
    parser.add_option(["-h", "--help"], "help", ValueType::Boolean, 0, "show help").expect("help");
    parser
}

#[test]
fn single_integer() {
    let mut p = sample(&["1"]);
    assert_eq!(p.parse(), Ok(ParseOutcome::Complete));
    assert_eq!(p.get_first::<i32>("arg1").unwrap(), 1);
    assert!(!p.find("help"));
}

#[test]
fn trailing_tokens_are_discarded() {
    let mut p = sample(&["1", "2"]);
    assert_eq!(p.parse(), Ok(ParseOutcome::Complete));
    assert_eq!(p.get_all::<i64>("arg1").unwrap(), vec![1]);
}

#[test]
fn non_integer_is_a_conversion_error() {
    let mut p = sample(&["a"]);
    let err = p.parse().unwrap_err();
    assert!(matches!(err, ParseError::Conversion { .. }));
    assert!(
        err.to_string().contains("integer-type"),
        "unexpected message: {err}"
    );
}

#[test]
fn bare_help_without_help_setting_fails_on_arity() {
    let mut p = sample(&["-h"]);
    let err = p.parse().unwrap_err();
    assert!(err.to_string().contains("insufficient number of arguments"));
    // The caller can still see that help was asked for.
    assert!(p.find("help"));
}

#[test]
fn bare_help_with_help_setting_succeeds() {
    let mut p = sample(&["-h"]);
    p.settings_mut().help = Some("help".to_string());
    assert_eq!(p.parse(), Ok(ParseOutcome::HelpRequested));
    assert!(p.is_complete());
    assert!(p.get_first::<bool>("help").unwrap());
    assert_eq!(
        p.get_first::<i64>("arg1"),
        Err(QueryError::NotFound {
            name: "arg1".to_string()
        })
    );
}

#[test]
fn empty_input_is_an_arity_error() {
    let mut p = sample(&[]);
    assert!(matches!(
        p.parse(),
        Err(ParseError::InsufficientArguments { .. })
    ));
}

#[test]
fn defaults_never_fail_for_absent_names_once_complete() {
    let mut p = sample(&["3"]);
    assert_eq!(p.get_first_or("missing", 0i64), Err(QueryError::NotParsed));
    p.parse().unwrap();
    assert_eq!(p.get_first_or("missing", 42i64), Ok(42));
    assert_eq!(p.get_all_or("missing", "x".to_string()), Ok(vec!["x".to_string()]));
    assert_eq!(
        p.get_all::<i64>("missing"),
        Err(QueryError::NotFound {
            name: "missing".to_string()
        })
    );
}

#[test]
fn variadic_option_swallows_the_rest() {
    let mut p = ArgParser::new(["cmd", "x", "--exec", "ls", "-l", "--help"], "")
        .with_settings(Settings::returning());
    p.add_help(["--help"]).unwrap();
    p.add_argument("target", ValueType::String, 1, "").unwrap();
    p.add_option("--exec", "exec", ValueType::String, VARIABLE, "").unwrap();

    assert_eq!(p.parse(), Ok(ParseOutcome::Complete));
    assert!(!p.find("help"));
    assert_eq!(
        p.get_all::<String>("exec").unwrap(),
        vec!["ls", "-l", "--help"]
    );
    assert_eq!(p.get_first::<String>("target").unwrap(), "x");

    assert!(matches!(
        p.add_argument("late", ValueType::String, 1, ""),
        Err(ConfigError::AfterVariadic { .. })
    ));
}

#[test]
fn repeated_option_keeps_the_first_occurrence() {
    let argv = ["prog", "-n", "1", "-n", "2"];
    let mut p = ArgParser::new(argv, "").with_settings(Settings::returning());
    p.add_option("-n", "num", ValueType::Integer, 1, "").unwrap();
    assert_eq!(p.parse(), Ok(ParseOutcome::Complete));
    assert_eq!(p.get_all::<i64>("num").unwrap(), vec![1]);
}

#[test]
fn oversized_arity_is_a_registration_error() {
    let mut p = ArgParser::new(["prog", "-x"], "").with_settings(Settings::returning());
    assert!(matches!(
        p.add_option("-x", "x", ValueType::Integer, usize::MAX, ""),
        Err(ConfigError::InvalidArity(_))
    ));
    assert_eq!(p.parse(), Ok(ParseOutcome::Complete));
    assert!(!p.find("x"));
}

#[test]
fn typed_getters_over_several_widths() {
    let mut p = ArgParser::new(["t", "-1", "65535", "2.5", "TRUE", "word"], "")
        .with_settings(Settings::returning());
    p.add_argument("i", ValueType::Integer, 1, "").unwrap();
    p.add_argument("u", ValueType::Integer, 1, "").unwrap();
    p.add_argument("f", ValueType::Float, 1, "").unwrap();
    p.add_argument("b", ValueType::Boolean, 1, "").unwrap();
    p.add_argument("s", ValueType::String, 1, "").unwrap();
    p.parse().unwrap();

    assert_eq!(p.get_first::<i8>("i").unwrap(), -1);
    assert_eq!(p.get_first::<i64>("i").unwrap(), -1);
    assert_eq!(p.get_first::<u16>("u").unwrap(), 65535);
    assert!(matches!(
        p.get_first::<i16>("u"),
        Err(QueryError::Conversion { .. })
    ));
    assert_eq!(p.get_first::<f32>("f").unwrap(), 2.5);
    assert!(p.get_first::<bool>("b").unwrap());
    assert_eq!(p.get_first::<String>("s").unwrap(), "word");
}

#[test]
fn full_help_transcript() {
    let mut p = ArgParser::new(["sample"], "sample program");
    p.add_option(["-h", "--help"], "help", ValueType::Boolean, 0, "show this help").unwrap();
    p.add_option("-o", "output", ValueType::String, 1, "").unwrap();
    p.add_argument("arg1", ValueType::Integer, 1, "an integer argument").unwrap();
    p.add_argument("xy", ValueType::Float, 2, "").unwrap();

    let expected = "\
sample program

usage:
  sample [{-h|--help}] [-o output] arg1 xy(0) xy(1)

Arguments
  arg1 [integer]:
        an integer argument
  xy [float,float]:

Options
  -h|--help:
        show this help
  -o [output:string]:
";
    assert_eq!(p.render_help(), expected);

    let mut out = Vec::new();
    p.write_help(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}
