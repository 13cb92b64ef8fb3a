//! # jobly
//!
//! Organizations and job postings on PostgreSQL, with partial updates and
//! filtered search compiled into parameterized SQL.
//!
//! ## Features
//!
//! - **Sparse input, exact SQL**: [`clause::compile_update`] and
//!   [`clause::compile_filter`] turn caller-ordered [`Fields`] into clause text
//!   with `$1, $2, ...` placeholders and a matching argument list
//! - **Static key tables**: each entity's filter keys and predicate shapes are
//!   data, not branches
//! - **Transaction-friendly**: pass a transaction anywhere a [`GenericClient`] is expected
//! - **Logged execution**: every statement emits a `tracing` event on target `jobly.sql`
//!
//! ## Example
//!
//! ```ignore
//! use jobly::{Fields, Organization, StoreConfig, create_pool};
//!
//! let pool = create_pool(&StoreConfig::from_env()?)?;
//! let client = pool.get().await?;
//!
//! // UPDATE organizations SET "num_employees"=$1 WHERE handle = $2 ...
//! let ibm = Organization::update(&client, "ibm", &Fields::new().with("numEmployees", 5)).await?;
//!
//! // SELECT ... WHERE name LIKE $1 AND num_employees >= $2 ORDER BY name
//! let filter = Fields::new().with("name", "tech").with("minEmployees", 10);
//! let orgs = Organization::find_all(&client, Some(&filter)).await?;
//! ```

pub mod clause;
pub mod client;
pub mod config;
pub mod error;
pub mod fields;
pub mod ident;
pub mod models;
pub mod row;
pub mod statement;
pub mod value;

pub use clause::{CompiledClause, EntityKind, FieldMap, compile_filter, compile_update};
pub use client::GenericClient;
pub use config::StoreConfig;
pub use error::{JoblyError, JoblyResult};
pub use fields::Fields;
pub use models::{NewOrganization, NewPosting, Organization, OrganizationDetail, Posting};
pub use row::{FromRow, RowExt};
pub use statement::Statement;
pub use value::Value;

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::create_pool;
