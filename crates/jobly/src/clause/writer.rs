use crate::ident::Ident;
use crate::value::Value;
use tokio_postgres::types::ToSql;

/// Clause text paired with its positional arguments.
///
/// The number of placeholders in [`text`](CompiledClause::text) always equals
/// `args().len()`, and `$N` binds `args()[N - 1]`.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct CompiledClause {
    text: String,
    args: Vec<Value>,
}

impl CompiledClause {
    /// The clause for "no filtering": matches every row and binds nothing.
    pub fn always_true() -> Self {
        Self {
            text: "TRUE".to_string(),
            args: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Index of the first placeholder a caller may append after this clause.
    pub fn next_placeholder(&self) -> usize {
        self.args.len() + 1
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.args.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.text, self.args)
    }
}

/// Appends clause fragments and numbers placeholders automatically.
///
/// A placeholder is only ever written by [`push_bind`](ClauseWriter::push_bind),
/// which appends its argument in the same step, so text and arguments cannot
/// drift apart.
#[derive(Debug, Default)]
pub struct ClauseWriter {
    text: String,
    args: Vec<Value>,
}

impl ClauseWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw SQL (no parameters).
    pub fn push(&mut self, sql: &str) -> &mut Self {
        self.text.push_str(sql);
        self
    }

    /// Append a validated column identifier.
    pub fn push_ident(&mut self, ident: &Ident<'_>) -> &mut Self {
        ident.write_sql(&mut self.text);
        self
    }

    /// Append the next `$n` placeholder and bind its value.
    pub fn push_bind(&mut self, value: Value) -> &mut Self {
        self.args.push(value);
        self.text.push('$');
        self.text.push_str(&self.args.len().to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn finish(self) -> CompiledClause {
        CompiledClause {
            text: self.text,
            args: self.args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_placeholders_in_bind_order() {
        let mut w = ClauseWriter::new();
        w.push("a = ").push_bind(Value::Int(1));
        w.push(" AND b = ").push_bind("x".into());
        let clause = w.finish();
        assert_eq!(clause.text(), "a = $1 AND b = $2");
        assert_eq!(clause.args(), [Value::Int(1), Value::from("x")]);
        assert_eq!(clause.next_placeholder(), 3);
        assert_eq!(clause.params_ref().len(), 2);
    }

    #[test]
    fn double_digit_placeholders() {
        let mut w = ClauseWriter::new();
        for i in 0..12 {
            if i > 0 {
                w.push(", ");
            }
            w.push_bind(Value::Int(i));
        }
        let clause = w.finish();
        assert!(clause.text().ends_with("$11, $12"));
        assert_eq!(clause.args().len(), 12);
    }

    #[test]
    fn always_true_binds_nothing() {
        let clause = CompiledClause::always_true();
        assert_eq!(clause.text(), "TRUE");
        assert!(clause.args().is_empty());
        assert_eq!(clause.next_placeholder(), 1);
    }
}
