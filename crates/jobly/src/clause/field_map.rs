use crate::error::JoblyResult;
use crate::ident::{ColumnStyle, Ident};

/// Static mapping from semantic field names to storage columns.
///
/// Names absent from the map resolve to themselves, so a map only lists the
/// fields whose column name differs. Column values must come from fixed call
/// sites, never from request data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMap<'a> {
    entries: &'a [(&'a str, &'a str)],
    style: ColumnStyle,
}

impl<'a> FieldMap<'a> {
    /// A map whose columns are written bare.
    pub const fn new(entries: &'a [(&'a str, &'a str)]) -> Self {
        Self {
            entries,
            style: ColumnStyle::Bare,
        }
    }

    /// A map whose columns are written double-quoted.
    pub const fn quoted(entries: &'a [(&'a str, &'a str)]) -> Self {
        Self {
            entries,
            style: ColumnStyle::Quoted,
        }
    }

    /// No explicit entries; every name maps to itself, written bare.
    pub const fn identity() -> Self {
        Self::new(&[])
    }

    pub fn style(&self) -> ColumnStyle {
        self.style
    }

    /// Storage column for `name`, or `name` itself when unmapped.
    pub fn resolve<'s>(&'s self, name: &'s str) -> &'s str {
        self.entries
            .iter()
            .find(|(field, _)| *field == name)
            .map_or(name, |(_, column)| column)
    }

    /// Resolve `name` and validate it for this map's column style.
    pub fn column<'s>(&'s self, name: &'s str) -> JoblyResult<Ident<'s>> {
        Ident::new(self.resolve(name), self.style)
    }
}

impl Default for FieldMap<'_> {
    fn default() -> Self {
        Self::identity()
    }
}
