//! Organization and posting records.
//!
//! Each model exposes `create`, `get`, `find_all`, `update` and `remove` over
//! any [`GenericClient`](crate::GenericClient). `update` compiles its `SET`
//! clause with [`compile_update`](crate::clause::compile_update) and
//! `find_all` compiles its `WHERE` clause with
//! [`compile_filter`](crate::clause::compile_filter).

mod organization;
mod posting;

pub use organization::{
    NewOrganization, ORGANIZATION_COLUMNS, ORGANIZATION_MUTABLE_FIELDS, Organization,
    OrganizationDetail,
};
pub use posting::{NewPosting, POSTING_COLUMNS, POSTING_MUTABLE_FIELDS, Posting, PostingSummary};

use crate::error::{JoblyError, JoblyResult};
use crate::fields::Fields;

/// Reject update fields outside `allowed` before any SQL is compiled.
fn ensure_mutable(data: &Fields, allowed: &[&str]) -> JoblyResult<()> {
    match data.keys().find(|key| !allowed.contains(key)) {
        Some(key) => Err(JoblyError::UnknownField(key.to_string())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_mutable_accepts_allowed_fields() {
        let data = Fields::new().with("numEmployees", 5).with("name", "IBM");
        assert!(ensure_mutable(&data, ORGANIZATION_MUTABLE_FIELDS).is_ok());
    }

    #[test]
    fn ensure_mutable_rejects_key_field() {
        let data = Fields::new().with("name", "IBM").with("handle", "other");
        let err = ensure_mutable(&data, ORGANIZATION_MUTABLE_FIELDS).unwrap_err();
        assert!(matches!(err, JoblyError::UnknownField(f) if f == "handle"));
    }

    #[test]
    fn posting_cannot_change_organization() {
        let data = Fields::new().with("organizationHandle", "ibm");
        assert!(ensure_mutable(&data, POSTING_MUTABLE_FIELDS).is_err());
    }

    #[test]
    fn organization_serializes_camel_case() {
        let org = Organization {
            handle: "ibm".into(),
            name: "IBM".into(),
            description: "Big Blue".into(),
            num_employees: Some(5),
            logo_url: None,
        };
        let json = serde_json::to_value(&org).unwrap();
        assert_eq!(json["numEmployees"], 5);
        assert!(json["logoUrl"].is_null());
    }

    #[test]
    fn new_posting_accepts_numeric_equity() {
        let new: NewPosting = serde_json::from_str(
            r#"{"title": "Engineer", "salary": 100000, "equity": "0.25", "organizationHandle": "ibm"}"#,
        )
        .unwrap();
        assert_eq!(new.equity, Some(rust_decimal::Decimal::new(25, 2)));
        assert_eq!(new.organization_handle, "ibm");
    }
}
