//! Opaque argument values.
//!
//! Update and filter inputs arrive as loosely typed JSON, so their values are
//! carried as [`Value`] and only interpreted when they are bound: the
//! [`ToSql`] impl adapts each variant to the type Postgres inferred for the
//! placeholder.

use bytes::BytesMut;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::str::FromStr;
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};

/// A single bind argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Numeric view used for range checks. Text is not parsed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Flag interpretation for boolean filter keys.
    ///
    /// Query strings deliver flags as text, so `"true"` and `"1"` count as set.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Text(s) => s.eq_ignore_ascii_case("true") || s == "1",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

fn mismatch(value: &Value, ty: &Type) -> Box<dyn Error + Sync + Send> {
    format!("cannot bind {value} to a parameter of type {ty}").into()
}

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(b) => match *ty {
                Type::BOOL => b.to_sql(ty, out),
                _ => Err(mismatch(self, ty)),
            },
            Value::Int(i) => match *ty {
                Type::INT2 => i16::try_from(*i)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*i)?.to_sql(ty, out),
                Type::INT8 => i.to_sql(ty, out),
                Type::FLOAT4 => (*i as f32).to_sql(ty, out),
                Type::FLOAT8 => (*i as f64).to_sql(ty, out),
                Type::NUMERIC => Decimal::from(*i).to_sql(ty, out),
                _ => Err(mismatch(self, ty)),
            },
            Value::Float(x) => match *ty {
                Type::FLOAT4 => (*x as f32).to_sql(ty, out),
                Type::FLOAT8 => x.to_sql(ty, out),
                Type::NUMERIC => Decimal::try_from(*x)?.to_sql(ty, out),
                _ => Err(mismatch(self, ty)),
            },
            Value::Text(s) => match *ty {
                Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN => {
                    s.to_sql(ty, out)
                }
                Type::NUMERIC => Decimal::from_str(s.trim())?.to_sql(ty, out),
                _ => Err(mismatch(self, ty)),
            },
        }
    }

    fn accepts(ty: &Type) -> bool {
        matches!(
            *ty,
            Type::BOOL
                | Type::INT2
                | Type::INT4
                | Type::INT8
                | Type::FLOAT4
                | Type::FLOAT8
                | Type::NUMERIC
                | Type::TEXT
                | Type::VARCHAR
                | Type::BPCHAR
                | Type::NAME
                | Type::UNKNOWN
        )
    }

    to_sql_checked!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_json_scalars() {
        let values: Vec<Value> = serde_json::from_str(r#"[null, true, 32, 0.5, "tech"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::Bool(true),
                Value::Int(32),
                Value::Float(0.5),
                Value::Text("tech".into()),
            ]
        );
    }

    #[test]
    fn rejects_nested_json() {
        assert!(serde_json::from_str::<Value>("[1, 2]").is_err());
        assert!(serde_json::from_str::<Value>(r#"{"a": 1}"#).is_err());
    }

    #[test]
    fn truthiness() {
        assert!(Value::Bool(true).is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Int(1).is_truthy());
        assert!(!Value::Int(0).is_truthy());
        assert!(Value::from("TRUE").is_truthy());
        assert!(Value::from("1").is_truthy());
        assert!(!Value::from("false").is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::Null.is_truthy());
    }

    #[test]
    fn numeric_view_ignores_text() {
        assert_eq!(Value::Int(10).as_f64(), Some(10.0));
        assert_eq!(Value::Float(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::from("10").as_f64(), None);
    }

    #[test]
    fn binds_int_to_narrower_column() {
        let mut buf = BytesMut::new();
        let is_null = Value::Int(5).to_sql(&Type::INT4, &mut buf).unwrap();
        assert!(matches!(is_null, IsNull::No));
        assert_eq!(&buf[..], &5_i32.to_be_bytes());
    }

    #[test]
    fn int_out_of_range_for_int2_fails() {
        let mut buf = BytesMut::new();
        assert!(Value::Int(100_000).to_sql(&Type::INT2, &mut buf).is_err());
    }

    #[test]
    fn text_into_integer_column_fails() {
        let mut buf = BytesMut::new();
        assert!(Value::from("five").to_sql(&Type::INT4, &mut buf).is_err());
    }

    #[test]
    fn decimal_text_binds_to_numeric() {
        let mut text_buf = BytesMut::new();
        Value::from("0.25").to_sql(&Type::NUMERIC, &mut text_buf).unwrap();

        let mut decimal_buf = BytesMut::new();
        Decimal::new(25, 2).to_sql(&Type::NUMERIC, &mut decimal_buf).unwrap();
        assert_eq!(text_buf, decimal_buf);
    }

    #[test]
    fn non_decimal_text_into_numeric_fails() {
        let mut buf = BytesMut::new();
        assert!(Value::from("lots").to_sql(&Type::NUMERIC, &mut buf).is_err());
    }

    #[test]
    fn null_binds_as_null() {
        let mut buf = BytesMut::new();
        assert!(matches!(
            Value::Null.to_sql(&Type::INT4, &mut buf).unwrap(),
            IsNull::Yes
        ));
    }
}
