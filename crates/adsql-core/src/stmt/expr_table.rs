use super::{Expr, TableAlias};
use crate::schema::EntityId;

/// A base table, introduced under `alias`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprTable {
    pub alias: TableAlias,
    pub entity: EntityId,
    pub name: String,
}

impl From<ExprTable> for Expr {
    fn from(value: ExprTable) -> Self {
        Expr::Table(value)
    }
}
