use super::ensure_mutable;
use crate::clause::{EntityKind, FieldMap, compile_filter, compile_update};
use crate::client::GenericClient;
use crate::error::{JoblyError, JoblyResult};
use crate::fields::Fields;
use crate::row::{FromRow, RowExt};
use crate::statement::Statement;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

/// Column mapping for posting updates. Every mutable field shares its column name.
pub const POSTING_COLUMNS: FieldMap<'static> = FieldMap::quoted(&[]);

/// Fields a partial update may change. A posting never moves between organizations.
pub const POSTING_MUTABLE_FIELDS: &[&str] = &["title", "salary", "equity"];

const RETURNING: &str = "id, title, salary, equity, organization_handle";

/// A stored job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Posting {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub organization_handle: String,
}

/// A fully specified posting to create.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPosting {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    pub organization_handle: String,
}

/// A posting as listed under its organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostingSummary {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

impl FromRow for Posting {
    fn from_row(row: &Row) -> JoblyResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            organization_handle: row.try_get_column("organization_handle")?,
        })
    }
}

impl FromRow for PostingSummary {
    fn from_row(row: &Row) -> JoblyResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
        })
    }
}

impl PostingSummary {
    pub(crate) async fn for_organization(
        conn: &impl GenericClient,
        handle: &str,
    ) -> JoblyResult<Vec<Self>> {
        Statement::new(
            "postings.for_organization",
            "SELECT id, title, salary, equity FROM postings WHERE organization_handle = $1 ORDER BY id",
        )
        .bind(handle)
        .fetch_all(conn)
        .await
    }
}

impl Posting {
    /// Insert a new posting.
    ///
    /// Fails with [`JoblyError::ForeignKeyViolation`] if the organization does not exist.
    pub async fn create(conn: &impl GenericClient, new: &NewPosting) -> JoblyResult<Self> {
        let equity = new.equity.map(|d| d.to_string());
        Statement::new(
            "postings.create",
            format!(
                "INSERT INTO postings (title, salary, equity, organization_handle) \
                 VALUES ($1, $2, $3::text::numeric, $4) RETURNING {RETURNING}"
            ),
        )
        .bind(new.title.as_str())
        .bind(new.salary)
        .bind(equity)
        .bind(new.organization_handle.as_str())
        .fetch_opt(conn)
        .await?
        .ok_or_else(|| JoblyError::not_found("Posting was not returned after insert"))
    }

    /// List postings, optionally filtered.
    ///
    /// Unfiltered listings are ordered by id, filtered ones by title.
    ///
    /// Recognized filter keys: `title` (substring), `minSalary`, `hasEquity`.
    pub async fn find_all(
        conn: &impl GenericClient,
        filter: Option<&Fields>,
    ) -> JoblyResult<Vec<Self>> {
        find_all_statement(filter)?.fetch_all(conn).await
    }

    /// Fetch a posting by id.
    pub async fn get(conn: &impl GenericClient, id: i32) -> JoblyResult<Self> {
        Statement::new(
            "postings.get",
            format!("SELECT {RETURNING} FROM postings WHERE id = $1"),
        )
        .bind(id)
        .fetch_opt(conn)
        .await?
        .ok_or_else(|| JoblyError::not_found(format!("No posting: {id}")))
    }

    /// Apply a partial update.
    ///
    /// `data` may contain any of `title`, `salary`, `equity`.
    pub async fn update(conn: &impl GenericClient, id: i32, data: &Fields) -> JoblyResult<Self> {
        update_statement(id, data)?
            .fetch_opt(conn)
            .await?
            .ok_or_else(|| JoblyError::not_found(format!("No posting: {id}")))
    }

    /// Delete a posting.
    pub async fn remove(conn: &impl GenericClient, id: i32) -> JoblyResult<()> {
        let deleted = Statement::new("postings.remove", "DELETE FROM postings WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;

        if deleted == 0 {
            return Err(JoblyError::not_found(format!("No posting: {id}")));
        }
        Ok(())
    }
}

fn find_all_statement(filter: Option<&Fields>) -> JoblyResult<Statement> {
    let Some(filter) = filter else {
        return Ok(Statement::new(
            "postings.find_all",
            format!("SELECT {RETURNING} FROM postings ORDER BY id"),
        ));
    };
    let (clause, args) = compile_filter(filter, EntityKind::Posting)?.into_parts();
    Ok(Statement::new(
        "postings.search",
        format!("SELECT {RETURNING} FROM postings WHERE {clause} ORDER BY title, id"),
    )
    .bind_all(args))
}

fn update_statement(id: i32, data: &Fields) -> JoblyResult<Statement> {
    ensure_mutable(data, POSTING_MUTABLE_FIELDS)?;
    let clause = compile_update(data, &POSTING_COLUMNS)?;
    let key = clause.next_placeholder();
    let (set_cols, args) = clause.into_parts();

    Ok(Statement::new(
        "postings.update",
        format!("UPDATE postings SET {set_cols} WHERE id = ${key} RETURNING {RETURNING}"),
    )
    .bind_all(args)
    .bind(id))
}
