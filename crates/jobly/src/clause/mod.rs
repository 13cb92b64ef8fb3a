//! Dynamic SQL clause compilation.
//!
//! Turns sparse, caller-ordered input into clause text with `$1, $2, ...`
//! placeholders and the matching argument list:
//!
//! - [`compile_update`] produces the body of a `SET` clause
//! - [`compile_filter`] produces the body of a `WHERE` clause
//!
//! Neither emits the surrounding keyword, so the same clause can be spliced
//! into different statement templates.
//!
//! # Example
//!
//! ```ignore
//! use jobly::clause::{compile_update, FieldMap};
//!
//! const COLUMNS: FieldMap<'static> = FieldMap::quoted(&[("numEmployees", "num_employees")]);
//!
//! let clause = compile_update(&Fields::new().with("numEmployees", 5), &COLUMNS)?;
//! assert_eq!(clause.text(), r#""num_employees"=$1"#);
//! let key = clause.next_placeholder();
//! let sql = format!("UPDATE organizations SET {} WHERE handle = ${key}", clause.text());
//! ```

mod field_map;
mod filter;
mod update;
mod writer;


pub use field_map::FieldMap;
pub use filter::{
    ColumnKind, EntityKind, FilterKey, FilterOptions, FilterTable, Predicate, UnknownKeys,
    compile_filter, compile_filter_with,
};
pub use update::compile_update;
pub use writer::{ClauseWriter, CompiledClause};
