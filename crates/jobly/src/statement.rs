//! Executable statements built around compiled clauses.

use crate::client::GenericClient;
use crate::error::{JoblyError, JoblyResult};
use crate::row::FromRow;
use crate::value::Value;
use tokio_postgres::types::ToSql;

const SQL_LOG_MAX_LEN: usize = 200;

/// A full SQL statement with positional arguments.
///
/// # Example
///
/// ```ignore
/// let (clause, args) = compile_update(&patch, &COLUMNS)?.into_parts();
/// let key = args.len() + 1;
/// let org: Option<Organization> = Statement::new(
///         "organizations.update",
///         format!("UPDATE organizations SET {clause} WHERE handle = ${key} RETURNING ..."),
///     )
///     .bind_all(args)
///     .bind("ibm")
///     .fetch_opt(&conn)
///     .await?;
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct Statement {
    tag: &'static str,
    sql: String,
    args: Vec<Value>,
}

impl Statement {
    /// `tag` names the operation in logs.
    pub fn new(tag: &'static str, sql: impl Into<String>) -> Self {
        Self {
            tag,
            sql: sql.into(),
            args: Vec::new(),
        }
    }

    /// Bind the next positional argument.
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Bind several positional arguments in order.
    pub fn bind_all(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.args.extend(values);
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Execute and map every returned row.
    pub async fn fetch_all<T: FromRow>(&self, conn: &impl GenericClient) -> JoblyResult<Vec<T>> {
        self.trace();
        let rows = conn
            .query(&self.sql, &self.params())
            .await
            .inspect_err(|e| self.report(e))?;
        rows.iter().map(T::from_row).collect()
    }

    /// Execute and map the first returned row, if any.
    pub async fn fetch_opt<T: FromRow>(&self, conn: &impl GenericClient) -> JoblyResult<Option<T>> {
        self.trace();
        let row = conn
            .query_opt(&self.sql, &self.params())
            .await
            .inspect_err(|e| self.report(e))?;
        row.as_ref().map(T::from_row).transpose()
    }

    /// Execute and return the number of affected rows.
    pub async fn execute(&self, conn: &impl GenericClient) -> JoblyResult<u64> {
        self.trace();
        conn.execute(&self.sql, &self.params())
            .await
            .inspect_err(|e| self.report(e))
    }

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.args.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
    }

    fn trace(&self) {
        let sql = truncate(&self.sql, SQL_LOG_MAX_LEN);
        tracing::debug!(
            target: "jobly.sql",
            tag = self.tag,
            param_count = self.args.len(),
            sql = %sql,
            "executing statement"
        );
    }

    // Client errors are the caller's to report.
    fn report(&self, err: &JoblyError) {
        if !err.is_client_error() {
            tracing::warn!(target: "jobly.sql", tag = self.tag, error = %err, "statement failed");
        }
    }
}

fn truncate(sql: &str, max: usize) -> String {
    if sql.len() <= max {
        return sql.to_string();
    }
    let mut end = max;
    while !sql.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &sql[..end])
}
