use super::ensure_mutable;
use super::posting::PostingSummary;
use crate::clause::{EntityKind, FieldMap, compile_filter, compile_update};
use crate::client::GenericClient;
use crate::error::{JoblyError, JoblyResult};
use crate::fields::Fields;
use crate::row::{FromRow, RowExt};
use crate::statement::Statement;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

/// Column mapping for organization updates.
pub const ORGANIZATION_COLUMNS: FieldMap<'static> =
    FieldMap::quoted(&[("numEmployees", "num_employees"), ("logoUrl", "logo_url")]);

/// Fields a partial update may change. `handle` is the natural key and is fixed.
pub const ORGANIZATION_MUTABLE_FIELDS: &[&str] = &["name", "description", "numEmployees", "logoUrl"];

const RETURNING: &str = "handle, name, description, num_employees, logo_url";

/// A stored organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A fully specified organization to create.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrganization {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// An organization together with its postings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganizationDetail {
    #[serde(flatten)]
    pub organization: Organization,
    pub postings: Vec<PostingSummary>,
}

impl FromRow for Organization {
    fn from_row(row: &Row) -> JoblyResult<Self> {
        Ok(Self {
            handle: row.try_get_column("handle")?,
            name: row.try_get_column("name")?,
            description: row.try_get_column("description")?,
            num_employees: row.try_get_column("num_employees")?,
            logo_url: row.try_get_column("logo_url")?,
        })
    }
}

impl Organization {
    /// Insert a new organization.
    ///
    /// Fails with [`JoblyError::DuplicateKey`] if the handle is taken.
    pub async fn create(conn: &impl GenericClient, new: &NewOrganization) -> JoblyResult<Self> {
        let stmt = Statement::new(
            "organizations.create",
            format!(
                "INSERT INTO organizations (handle, name, description, num_employees, logo_url) \
                 VALUES ($1, $2, $3, $4, $5) RETURNING {RETURNING}"
            ),
        )
        .bind(new.handle.as_str())
        .bind(new.name.as_str())
        .bind(new.description.as_str())
        .bind(new.num_employees)
        .bind(new.logo_url.as_deref());

        match stmt.fetch_opt(conn).await {
            Ok(Some(org)) => Ok(org),
            Ok(None) => Err(JoblyError::not_found(format!(
                "Organization {} was not returned after insert",
                new.handle
            ))),
            Err(JoblyError::DuplicateKey(_)) => Err(JoblyError::DuplicateKey(format!(
                "Duplicate organization: {}",
                new.handle
            ))),
            Err(e) => Err(e),
        }
    }

    /// List organizations ordered by name, optionally filtered.
    ///
    /// Recognized filter keys: `name` (substring), `minEmployees`, `maxEmployees`.
    pub async fn find_all(
        conn: &impl GenericClient,
        filter: Option<&Fields>,
    ) -> JoblyResult<Vec<Self>> {
        find_all_statement(filter)?.fetch_all(conn).await
    }

    /// Fetch an organization and its postings.
    pub async fn get(conn: &impl GenericClient, handle: &str) -> JoblyResult<OrganizationDetail> {
        let organization: Self = Statement::new(
            "organizations.get",
            format!("SELECT {RETURNING} FROM organizations WHERE handle = $1"),
        )
        .bind(handle)
        .fetch_opt(conn)
        .await?
        .ok_or_else(|| JoblyError::not_found(format!("No organization: {handle}")))?;

        let postings = PostingSummary::for_organization(conn, handle).await?;
        Ok(OrganizationDetail {
            organization,
            postings,
        })
    }

    /// Apply a partial update.
    ///
    /// `data` may contain any of `name`, `description`, `numEmployees`, `logoUrl`.
    pub async fn update(conn: &impl GenericClient, handle: &str, data: &Fields) -> JoblyResult<Self> {
        update_statement(handle, data)?
            .fetch_opt(conn)
            .await?
            .ok_or_else(|| JoblyError::not_found(format!("No organization: {handle}")))
    }

    /// Delete an organization.
    pub async fn remove(conn: &impl GenericClient, handle: &str) -> JoblyResult<()> {
        let deleted = Statement::new(
            "organizations.remove",
            "DELETE FROM organizations WHERE handle = $1",
        )
        .bind(handle)
        .execute(conn)
        .await?;

        if deleted == 0 {
            return Err(JoblyError::not_found(format!("No organization: {handle}")));
        }
        Ok(())
    }
}

fn find_all_statement(filter: Option<&Fields>) -> JoblyResult<Statement> {
    let Some(filter) = filter else {
        return Ok(Statement::new(
            "organizations.find_all",
            format!("SELECT {RETURNING} FROM organizations ORDER BY name"),
        ));
    };
    let (clause, args) = compile_filter(filter, EntityKind::Organization)?.into_parts();
    Ok(Statement::new(
        "organizations.search",
        format!("SELECT {RETURNING} FROM organizations WHERE {clause} ORDER BY name"),
    )
    .bind_all(args))
}

fn update_statement(handle: &str, data: &Fields) -> JoblyResult<Statement> {
    ensure_mutable(data, ORGANIZATION_MUTABLE_FIELDS)?;
    let clause = compile_update(data, &ORGANIZATION_COLUMNS)?;
    let key = clause.next_placeholder();
    let (set_cols, args) = clause.into_parts();

    Ok(Statement::new(
        "organizations.update",
        format!("UPDATE organizations SET {set_cols} WHERE handle = ${key} RETURNING {RETURNING}"),
    )
    .bind_all(args)
    .bind(handle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn update_binds_handle_after_set_clause() {
        let stmt = update_statement("ibm", &Fields::new().with("numEmployees", 5)).unwrap();
        assert!(
            stmt.sql()
                .starts_with(r#"UPDATE organizations SET "num_employees"=$1 WHERE handle = $2 RETURNING"#)
        );
        assert_eq!(stmt.args(), [Value::Int(5), Value::from("ibm")]);
    }

    #[test]
    fn update_with_several_fields() {
        let data = Fields::new()
            .with("logoUrl", "https://ibm.test/logo.png")
            .with("description", "Big Blue");
        let stmt = update_statement("ibm", &data).unwrap();
        assert!(stmt.sql().contains(r#"SET "logo_url"=$1, "description"=$2 WHERE handle = $3"#));
        assert_eq!(stmt.args().len(), 3);
    }

    #[test]
    fn update_rejects_immutable_field_before_compiling() {
        let err = update_statement("ibm", &Fields::new().with("handle", "x")).unwrap_err();
        assert!(matches!(err, JoblyError::UnknownField(_)));
        assert!(matches!(
            update_statement("ibm", &Fields::new()),
            Err(JoblyError::EmptyInput)
        ));
    }

    #[test]
    fn unfiltered_listing_has_no_where() {
        let stmt = find_all_statement(None).unwrap();
        assert!(!stmt.sql().contains("WHERE"));
        assert!(stmt.sql().ends_with("ORDER BY name"));
        assert!(stmt.args().is_empty());
    }

    #[test]
    fn filtered_listing_splices_clause() {
        let filter = Fields::new().with("name", "tech").with("maxEmployees", 100);
        let stmt = find_all_statement(Some(&filter)).unwrap();
        assert!(stmt.sql().ends_with(
            "FROM organizations WHERE name LIKE $1 AND num_employees <= $2 ORDER BY name"
        ));
        assert_eq!(stmt.args(), [Value::from("%tech%"), Value::Int(100)]);
    }

    #[test]
    fn inverted_range_fails_before_statement() {
        let filter = Fields::new().with("minEmployees", 10).with("maxEmployees", 5);
        assert!(matches!(
            find_all_statement(Some(&filter)),
            Err(JoblyError::RangeValidation { .. })
        ));
    }
}
