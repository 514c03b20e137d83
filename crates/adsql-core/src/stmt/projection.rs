use super::{Expr, Select};

/// How the materialized rows of a projection are reduced to the caller's
/// result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregator {
    /// Exactly one row.
    Single,
    /// Zero or one row.
    SingleOrDefault,
    /// The first row; at least one is required.
    First,
    /// The first row, or the default when there are none.
    FirstOrDefault,
    /// Every row, as a sequence. Used for to-many associations.
    List,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub select: Select,

    /// Shape of one materialized row. After translation every value it reads
    /// from the database is a column of `select`.
    pub projector: Expr,

    pub aggregator: Option<Aggregator>,
}

impl From<Projection> for Expr {
    fn from(value: Projection) -> Self {
        Expr::Projection(Box::new(value))
    }
}
