use super::{Direction, Expr, TableAlias};

/// A relational query.
///
/// `from` is a `Table`, `Select` or `Join`. `take` and `skip` hold row counts
/// (literals or captured values).
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub alias: TableAlias,
    pub columns: Vec<ColumnDecl>,
    pub from: Option<Expr>,
    pub filter: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub order_by: Vec<OrderBy>,
    pub take: Option<Expr>,
    pub skip: Option<Expr>,
    pub distinct: bool,
}

/// One output column of a select.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDecl {
    pub name: String,
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub expr: Expr,
    pub direction: Direction,
}

impl Select {
    pub fn new(alias: TableAlias, from: impl Into<Expr>) -> Select {
        Select {
            alias,
            columns: vec![],
            from: Some(from.into()),
            filter: None,
            group_by: vec![],
            order_by: vec![],
            take: None,
            skip: None,
            distinct: false,
        }
    }

    /// ANDs `expr` into the filter.
    pub fn and_filter(&mut self, expr: Expr) {
        self.filter = Some(match self.filter.take() {
            Some(filter) => Expr::and(filter, expr),
            None => expr,
        });
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDecl> {
        self.columns.iter().find(|column| column.name == name)
    }
}

impl From<Select> for Expr {
    fn from(value: Select) -> Self {
        Expr::Select(Box::new(value))
    }
}
