//! Column identifier rendering.
//!
//! Postgres cannot bind identifiers as parameters, so every column name that
//! reaches clause text goes through [`Ident`]:
//!
//! - Bare identifiers are validated against `[A-Za-z_][A-Za-z0-9_$]*`
//! - Quoted identifiers allow any characters except NUL and escape `"` as `""`
//!
//! Bare identifiers are folded to lower case by Postgres; quote a column when
//! its case matters.

use crate::error::{JoblyError, JoblyResult};

/// How a column identifier is written into clause text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnStyle {
    /// Written verbatim after validation: `num_employees`
    #[default]
    Bare,
    /// Wrapped in double quotes: `"num_employees"`
    Quoted,
}

/// A single validated SQL column identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ident<'a> {
    Bare(&'a str),
    Quoted(&'a str),
}

impl<'a> Ident<'a> {
    /// Validate `name` for the given style.
    pub fn new(name: &'a str, style: ColumnStyle) -> JoblyResult<Self> {
        match style {
            ColumnStyle::Bare => Self::bare(name),
            ColumnStyle::Quoted => Self::quoted(name),
        }
    }

    /// A bare identifier; rejects anything that would need quoting.
    pub fn bare(name: &'a str) -> JoblyResult<Self> {
        let mut chars = name.chars();
        match chars.next() {
            None => return Err(JoblyError::InvalidIdentifier("empty identifier".into())),
            Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
            Some(c) => {
                return Err(JoblyError::InvalidIdentifier(format!(
                    "invalid start character '{c}' in '{name}'"
                )));
            }
        }
        if let Some(c) = chars.find(|&c| !(c == '_' || c == '$' || c.is_ascii_alphanumeric())) {
            return Err(JoblyError::InvalidIdentifier(format!(
                "invalid character '{c}' in '{name}'"
            )));
        }
        Ok(Self::Bare(name))
    }

    /// A quoted identifier.
    pub fn quoted(name: &'a str) -> JoblyResult<Self> {
        if name.is_empty() {
            return Err(JoblyError::InvalidIdentifier(
                "empty quoted identifier".into(),
            ));
        }
        if name.contains('\0') {
            return Err(JoblyError::InvalidIdentifier(
                "identifier cannot contain NUL character".into(),
            ));
        }
        Ok(Self::Quoted(name))
    }

    /// Render the identifier as SQL.
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        self.write_sql(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        match self {
            Ident::Bare(s) => out.push_str(s),
            Ident::Quoted(s) => {
                out.push('"');
                for ch in s.chars() {
                    if ch == '"' {
                        out.push_str("\"\"");
                    } else {
                        out.push(ch);
                    }
                }
                out.push('"');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_keeps_case() {
        assert_eq!(Ident::bare("firstName").unwrap().to_sql(), "firstName");
    }

    #[test]
    fn bare_with_dollar_and_digits() {
        assert_eq!(Ident::bare("col_2$x").unwrap().to_sql(), "col_2$x");
    }

    #[test]
    fn quoted_wraps() {
        assert_eq!(
            Ident::quoted("num_employees").unwrap().to_sql(),
            r#""num_employees""#
        );
    }

    #[test]
    fn quoted_escapes_embedded_quote() {
        assert_eq!(Ident::quoted(r#"a"b"#).unwrap().to_sql(), r#""a""b""#);
    }

    #[test]
    fn bare_rejects_injection() {
        assert!(Ident::bare("name; DROP TABLE organizations; --").is_err());
        assert!(Ident::bare("1col").is_err());
        assert!(Ident::bare("a b").is_err());
        assert!(Ident::bare("").is_err());
    }

    #[test]
    fn quoted_rejects_nul_and_empty() {
        assert!(Ident::quoted("").is_err());
        assert!(Ident::quoted("a\0b").is_err());
    }

    #[test]
    fn new_follows_style() {
        assert_eq!(
            Ident::new("age", ColumnStyle::Bare).unwrap(),
            Ident::Bare("age")
        );
        assert_eq!(
            Ident::new("age", ColumnStyle::Quoted).unwrap(),
            Ident::Quoted("age")
        );
    }
}
