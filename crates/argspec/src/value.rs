//! Typed values: a raw token paired with the type it was declared as.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::ConversionError;

/// Types of values recognized by the parser.
///
/// `Null` is the default and is never valid on a declared argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    Null,
    Boolean,
    Integer,
    Float,
    String,
}

impl ValueType {
    /// Human readable type name used in help and error messages.
    pub fn describe(self) -> Result<&'static str, ConversionError> {
        match self {
            Self::Null => Err(ConversionError::NullType),
            Self::Boolean => Ok("boolean"),
            Self::Integer => Ok("integer"),
            Self::Float => Ok("float"),
            Self::String => Ok("string"),
        }
    }

    /// Check that `raw` can be read as this type.
    pub fn validate(self, raw: &str) -> Result<(), ConversionError> {
        match self {
            Self::Null => Err(ConversionError::NullType),
            Self::Boolean => parse_bool(raw).map(drop),
            Self::Integer => parse_integer(raw).map(drop),
            Self::Float => parse_float(raw).map(drop),
            Self::String => Ok(()),
        }
    }
}

fn not_convertible(kind: &'static str, raw: &str) -> ConversionError {
    ConversionError::NotConvertible {
        kind,
        raw: raw.to_owned(),
    }
}

/// `true`/`false` in any ASCII case, otherwise a non-zero integer.
fn parse_bool(raw: &str) -> Result<bool, ConversionError> {
    if raw.eq_ignore_ascii_case("true") {
        return Ok(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Ok(false);
    }
    raw.parse::<i64>()
        .map(|n| n != 0)
        .map_err(|_| not_convertible("boolean", raw))
}

/// Base-10 with an optional sign. No exponent, prefix, or decimal point.
fn parse_integer(raw: &str) -> Result<i64, ConversionError> {
    raw.parse::<i64>()
        .map_err(|_| not_convertible("integer", raw))
}

fn parse_float(raw: &str) -> Result<f64, ConversionError> {
    raw.parse::<f64>().map_err(|_| not_convertible("float", raw))
}

/// One token together with its declared [`ValueType`].
///
/// The text is validated whenever it is set, so a `TypedValue` always holds
/// text that converts to its own type. Conversions are recomputed on every
/// read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedValue {
    value_type: ValueType,
    raw: String,
}

impl TypedValue {
    /// Create a value, failing if `raw` is not convertible to `value_type`.
    pub fn new(value_type: ValueType, raw: impl Into<String>) -> Result<Self, ConversionError> {
        let raw = raw.into();
        value_type.validate(&raw)?;
        Ok(Self { value_type, raw })
    }

    /// The implicit value recorded for a switch.
    pub(crate) fn present() -> Self {
        Self {
            value_type: ValueType::Boolean,
            raw: "true".to_string(),
        }
    }

    /// Replace the text, keeping the type.
    ///
    /// On failure the previous text is kept.
    pub fn assign(&mut self, raw: impl Into<String>) -> Result<(), ConversionError> {
        let raw = raw.into();
        self.value_type.validate(&raw)?;
        self.raw = raw;
        Ok(())
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn describe_type(&self) -> Result<&'static str, ConversionError> {
        self.value_type.describe()
    }

    /// Read the value as `T`.
    ///
    /// Reading a value as the canonical kind of its declared type never
    /// fails. Narrower integer targets are range checked.
    pub fn get<T: FromValue>(&self) -> Result<T, ConversionError> {
        T::from_value(self)
    }

    pub fn as_bool(&self) -> Result<bool, ConversionError> {
        parse_bool(&self.raw)
    }

    pub fn as_integer(&self) -> Result<i64, ConversionError> {
        parse_integer(&self.raw)
    }

    pub fn as_float(&self) -> Result<f64, ConversionError> {
        parse_float(&self.raw)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value_type {
            ValueType::Boolean => match self.as_bool() {
                Ok(b) => write!(f, "{b}"),
                Err(_) => f.write_str(&self.raw),
            },
            ValueType::Integer => match self.as_integer() {
                Ok(n) => write!(f, "{n}"),
                Err(_) => f.write_str(&self.raw),
            },
            ValueType::Float => match self.as_float() {
                Ok(x) => write!(f, "{x:.6}"),
                Err(_) => f.write_str(&self.raw),
            },
            ValueType::String | ValueType::Null => f.write_str(&self.raw),
        }
    }
}

impl Serialize for TypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value_type {
            ValueType::Boolean => match self.as_bool() {
                Ok(b) => serializer.serialize_bool(b),
                Err(_) => serializer.serialize_str(&self.raw),
            },
            ValueType::Integer => match self.as_integer() {
                Ok(n) => serializer.serialize_i64(n),
                Err(_) => serializer.serialize_str(&self.raw),
            },
            ValueType::Float => match self.as_float() {
                Ok(x) => serializer.serialize_f64(x),
                Err(_) => serializer.serialize_str(&self.raw),
            },
            ValueType::String => serializer.serialize_str(&self.raw),
            ValueType::Null => serializer.serialize_unit(),
        }
    }
}

/// Output types a [`TypedValue`] can be read as.
pub trait FromValue: Sized {
    fn from_value(value: &TypedValue) -> Result<Self, ConversionError>;
}

impl FromValue for bool {
    fn from_value(value: &TypedValue) -> Result<Self, ConversionError> {
        value.as_bool()
    }
}

impl FromValue for i64 {
    fn from_value(value: &TypedValue) -> Result<Self, ConversionError> {
        value.as_integer()
    }
}

macro_rules! narrow_integer {
    ($($t:ty),* $(,)?) => {
        $(
            impl FromValue for $t {
                fn from_value(value: &TypedValue) -> Result<Self, ConversionError> {
                    let n = value.as_integer()?;
                    <$t>::try_from(n).map_err(|_| ConversionError::OutOfRange {
                        target: stringify!($t),
                        raw: value.raw().to_owned(),
                    })
                }
            }
        )*
    };
}

narrow_integer!(i8, i16, i32, isize, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    fn from_value(value: &TypedValue) -> Result<Self, ConversionError> {
        value.as_float()
    }
}

impl FromValue for f32 {
    fn from_value(value: &TypedValue) -> Result<Self, ConversionError> {
        value.as_float().map(|x| x as f32)
    }
}

impl FromValue for String {
    fn from_value(value: &TypedValue) -> Result<Self, ConversionError> {
        Ok(value.raw.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(raw: &str) -> Result<TypedValue, ConversionError> {
        TypedValue::new(ValueType::Integer, raw)
    }

    #[test]
    fn integer_accepts_signed_decimal_digits() {
        for raw in ["0", "42", "-17", "+8", "007", "9223372036854775807"] {
            let v = int(raw).unwrap();
            assert_eq!(v.get::<i64>().unwrap(), raw.parse::<i64>().unwrap());
        }
    }

    #[test]
    fn integer_rejects_other_grammars() {
        for raw in ["3.2e3", "abc", "1.5", "0x10", "", " 1", "1 ", "+-1", "1e3"] {
            let err = int(raw).unwrap_err();
            assert_eq!(err.to_string(), "value is not convertible to integer-type");
        }
    }

    #[test]
    fn boolean_words_and_integers() {
        let b = |raw: &str| {
            TypedValue::new(ValueType::Boolean, raw).map(|v| v.get::<bool>().unwrap())
        };
        assert_eq!(b("true"), Ok(true));
        assert_eq!(b("TRUE"), Ok(true));
        assert_eq!(b("True"), Ok(true));
        assert_eq!(b("false"), Ok(false));
        assert_eq!(b("FALSE"), Ok(false));
        assert_eq!(b("0"), Ok(false));
        assert_eq!(b("7"), Ok(true));
        assert_eq!(b("-1"), Ok(true));
        let err = b("abc").unwrap_err();
        assert!(err.to_string().contains("boolean-type"));
    }

    #[test]
    fn float_allows_exponents() {
        let v = TypedValue::new(ValueType::Float, "3.2e3").unwrap();
        assert_eq!(v.get::<f64>().unwrap(), 3200.0);
        assert_eq!(v.get::<f32>().unwrap(), 3200.0);
        assert!(TypedValue::new(ValueType::Float, "-.5").is_ok());
        let err = TypedValue::new(ValueType::Float, "1,5").unwrap_err();
        assert!(err.to_string().contains("float-type"));
    }

    #[test]
    fn string_is_verbatim() {
        let v = TypedValue::new(ValueType::String, "  spaced -x ").unwrap();
        assert_eq!(v.get::<String>().unwrap(), "  spaced -x ");
        assert_eq!(v.describe_type().unwrap(), "string");
    }

    #[test]
    fn null_type_is_rejected() {
        assert_eq!(
            TypedValue::new(ValueType::Null, "1").unwrap_err(),
            ConversionError::NullType
        );
        assert!(ValueType::Null.describe().is_err());
    }

    #[test]
    fn assign_revalidates_and_keeps_old_text_on_failure() {
        let mut v = int("1").unwrap();
        v.assign("23").unwrap();
        assert_eq!(v.get::<i32>().unwrap(), 23);
        assert!(v.assign("x").is_err());
        assert_eq!(v.raw(), "23");
        assert_eq!(v.value_type(), ValueType::Integer);
    }

    #[test]
    fn narrowing_is_range_checked() {
        let v = int("300").unwrap();
        assert_eq!(v.get::<u16>().unwrap(), 300);
        assert!(matches!(
            v.get::<u8>(),
            Err(ConversionError::OutOfRange { target: "u8", .. })
        ));
        let neg = int("-1").unwrap();
        assert!(neg.get::<u64>().is_err());
        assert_eq!(neg.get::<i8>().unwrap(), -1);
    }

    #[test]
    fn display_uses_canonical_form() {
        assert_eq!(int("+5").unwrap().to_string(), "5");
        assert_eq!(TypedValue::new(ValueType::Float, "2.5").unwrap().to_string(), "2.500000");
        assert_eq!(TypedValue::new(ValueType::Boolean, "1").unwrap().to_string(), "true");
    }

    #[test]
    fn serializes_as_typed_json() {
        let values = vec![
            int("12").unwrap(),
            TypedValue::new(ValueType::Boolean, "False").unwrap(),
            TypedValue::new(ValueType::String, "x").unwrap(),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[12,false,"x"]"#);
    }
}
