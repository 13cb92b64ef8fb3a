use super::field_map::FieldMap;
use super::writer::{ClauseWriter, CompiledClause};
use crate::error::{JoblyError, JoblyResult};
use crate::fields::Fields;

/// Compile a partial update into `col=$1, col=$2, ...`.
///
/// Fragments follow `input`'s order and values are bound unchanged. The
/// `SET` keyword is left to the caller.
///
/// Returns [`JoblyError::EmptyInput`] when `input` has no fields.
pub fn compile_update(input: &Fields, map: &FieldMap<'_>) -> JoblyResult<CompiledClause> {
    if input.is_empty() {
        return Err(JoblyError::EmptyInput);
    }

    let mut w = ClauseWriter::new();
    for (i, (field, value)) in input.iter().enumerate() {
        if i > 0 {
            w.push(", ");
        }
        let column = map.column(field)?;
        w.push_ident(&column).push("=").push_bind(value.clone());
    }
    Ok(w.finish())
}
