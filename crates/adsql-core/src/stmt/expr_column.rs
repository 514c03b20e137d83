use super::{Expr, TableAlias, Type};
use crate::schema::SqlType;

/// A resolved column, qualified by the alias of the relation it is read from.
///
/// `sql_ty` is known for columns of base tables. Columns of derived selects
/// only carry the value type.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprColumn {
    pub alias: TableAlias,
    pub name: String,
    pub ty: Type,
    pub sql_ty: Option<SqlType>,
}

impl Expr {
    pub fn column(column: impl Into<ExprColumn>) -> Self {
        column.into().into()
    }

    pub fn is_column(&self) -> bool {
        matches!(self, Self::Column(_))
    }
}

impl ExprColumn {
    pub fn new(alias: TableAlias, name: impl Into<String>, ty: Type) -> ExprColumn {
        ExprColumn {
            alias,
            name: name.into(),
            ty,
            sql_ty: None,
        }
    }

    pub fn with_sql_ty(mut self, sql_ty: SqlType) -> ExprColumn {
        self.sql_ty = Some(sql_ty);
        self
    }

    /// Returns `true` if the column is stored as a single character.
    pub fn is_char1(&self) -> bool {
        matches!(self.sql_ty, Some(SqlType::Char(1)))
    }
}

impl From<ExprColumn> for Expr {
    fn from(value: ExprColumn) -> Self {
        Self::Column(value)
    }
}
