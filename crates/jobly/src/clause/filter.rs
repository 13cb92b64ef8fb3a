use super::writer::{ClauseWriter, CompiledClause};
use crate::error::{JoblyError, JoblyResult};
use crate::fields::Fields;
use crate::value::Value;

/// The predicate shape a recognized filter key compiles to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// `column LIKE $n`, binding `%value%`
    Contains,
    /// `column >= $n`
    AtLeast,
    /// `column <= $n`
    AtMost,
    /// `column > 0`, emitted only while the flag value is truthy
    Positive,
}

enum Operand {
    Bind(Value),
    Constant,
}

impl Predicate {
    fn operator(self) -> &'static str {
        match self {
            Predicate::Contains => " LIKE ",
            Predicate::AtLeast => " >= ",
            Predicate::AtMost => " <= ",
            Predicate::Positive => " > 0",
        }
    }

    /// Apply the key's value transform. `None` means the key emits nothing.
    fn operand(self, key: &FilterKey, value: &Value) -> JoblyResult<Option<Operand>> {
        match self {
            Predicate::Contains => {
                let text = value
                    .as_str()
                    .ok_or_else(|| JoblyError::invalid_filter_value(key.key, "text"))?;
                Ok(Some(Operand::Bind(Value::Text(format!("%{text}%")))))
            }
            Predicate::AtLeast | Predicate::AtMost => {
                Ok(Some(Operand::Bind(key.column_kind.bound(key.key, value)?)))
            }
            Predicate::Positive => Ok(value.is_truthy().then_some(Operand::Constant)),
        }
    }
}

/// Storage type of a filtered column, used to check bound values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    /// `INTEGER`; bounds must be whole numbers within its range.
    Integer,
    /// `NUMERIC`; any number is accepted.
    Numeric,
}

impl ColumnKind {
    fn bound(self, key: &str, value: &Value) -> JoblyResult<Value> {
        match (self, value) {
            (ColumnKind::Integer, Value::Int(i)) if i32::try_from(*i).is_ok() => Ok(value.clone()),
            (ColumnKind::Integer, Value::Float(f))
                if f.fract() == 0.0 && (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(f) =>
            {
                Ok(Value::Int(*f as i64))
            }
            (ColumnKind::Integer, _) => Err(JoblyError::invalid_filter_value(key, "an integer")),
            (_, Value::Int(_) | Value::Float(_)) => Ok(value.clone()),
            _ => Err(JoblyError::invalid_filter_value(key, "a number")),
        }
    }
}

/// A recognized filter key and the predicate it compiles to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterKey {
    pub key: &'static str,
    pub column: &'static str,
    pub column_kind: ColumnKind,
    pub predicate: Predicate,
}

impl FilterKey {
    const fn new(
        key: &'static str,
        column: &'static str,
        column_kind: ColumnKind,
        predicate: Predicate,
    ) -> Self {
        Self {
            key,
            column,
            column_kind,
            predicate,
        }
    }
}

/// The recognized filter keys of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterTable {
    pub keys: &'static [FilterKey],
    /// `(min_key, max_key)` checked for `min <= max` before compiling.
    pub range: Option<(&'static str, &'static str)>,
}

impl FilterTable {
    pub fn lookup(&self, key: &str) -> Option<&FilterKey> {
        self.keys.iter().find(|k| k.key == key)
    }

    pub fn recognizes(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    fn check_range(&self, input: &Fields) -> JoblyResult<()> {
        let Some((min_key, max_key)) = self.range else {
            return Ok(());
        };
        let (Some(min), Some(max)) = (input.get(min_key), input.get(max_key)) else {
            return Ok(());
        };
        // Non-numeric bounds are reported by the per-key transform instead.
        let inverted = match (min, max) {
            (Value::Int(lo), Value::Int(hi)) => lo > hi,
            _ => match (min.as_f64(), max.as_f64()) {
                (Some(lo), Some(hi)) => lo > hi,
                _ => false,
            },
        };
        if inverted {
            return Err(JoblyError::RangeValidation {
                min_key: min_key.to_string(),
                max_key: max_key.to_string(),
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(())
    }
}

static ORGANIZATION_FILTERS: FilterTable = FilterTable {
    keys: &[
        FilterKey::new("name", "name", ColumnKind::Text, Predicate::Contains),
        FilterKey::new("minEmployees", "num_employees", ColumnKind::Integer, Predicate::AtLeast),
        FilterKey::new("maxEmployees", "num_employees", ColumnKind::Integer, Predicate::AtMost),
    ],
    range: Some(("minEmployees", "maxEmployees")),
};

static POSTING_FILTERS: FilterTable = FilterTable {
    keys: &[
        FilterKey::new("title", "title", ColumnKind::Text, Predicate::Contains),
        FilterKey::new("minSalary", "salary", ColumnKind::Integer, Predicate::AtLeast),
        FilterKey::new("hasEquity", "equity", ColumnKind::Numeric, Predicate::Positive),
    ],
    range: None,
};

/// Which entity a filter targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Organization,
    Posting,
}

impl EntityKind {
    pub fn filter_table(self) -> &'static FilterTable {
        match self {
            EntityKind::Organization => &ORGANIZATION_FILTERS,
            EntityKind::Posting => &POSTING_FILTERS,
        }
    }
}

/// What to do with filter keys the entity does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownKeys {
    /// Skip the key: no fragment, no argument, no placeholder consumed.
    #[default]
    Ignore,
    /// Fail with [`JoblyError::UnknownFilterKey`].
    Reject,
}

/// Options for [`compile_filter_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterOptions {
    pub unknown_keys: UnknownKeys,
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject unrecognized keys instead of skipping them.
    pub fn reject_unknown(mut self) -> Self {
        self.unknown_keys = UnknownKeys::Reject;
        self
    }
}

/// Compile a search filter into `pred AND pred ...` with default options.
pub fn compile_filter(input: &Fields, entity: EntityKind) -> JoblyResult<CompiledClause> {
    compile_filter_with(input, entity, FilterOptions::default())
}

/// Compile a search filter into `pred AND pred ...`.
///
/// Predicates follow `input`'s order. An empty input, or one where every key
/// is skipped, compiles to [`CompiledClause::always_true`].
pub fn compile_filter_with(
    input: &Fields,
    entity: EntityKind,
    options: FilterOptions,
) -> JoblyResult<CompiledClause> {
    let table = entity.filter_table();
    table.check_range(input)?;

    let mut w = ClauseWriter::new();
    for (key, value) in input.iter() {
        let Some(filter) = table.lookup(key) else {
            match options.unknown_keys {
                UnknownKeys::Reject => return Err(JoblyError::UnknownFilterKey(key.to_string())),
                UnknownKeys::Ignore => {
                    tracing::debug!(target: "jobly.clause", ?entity, key, "skipping unknown filter key");
                    continue;
                }
            }
        };
        let Some(operand) = filter.predicate.operand(filter, value)? else {
            continue;
        };

        if !w.is_empty() {
            w.push(" AND ");
        }
        w.push(filter.column).push(filter.predicate.operator());
        if let Operand::Bind(value) = operand {
            w.push_bind(value);
        }
    }

    if w.is_empty() {
        return Ok(CompiledClause::always_true());
    }
    Ok(w.finish())
}
