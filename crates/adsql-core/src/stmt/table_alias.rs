use std::fmt;

/// Identifies one relation (table, derived select or join side) within a
/// statement. Column references are qualified by the alias of the relation
/// they read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableAlias(pub usize);

impl fmt::Display for TableAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}
