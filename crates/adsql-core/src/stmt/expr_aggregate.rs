use super::Expr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateFunc {
    Count,
    Sum,
    Min,
    Max,
    Avg,
}

/// Aggregate over the rows of the enclosing select. `expr` is `None` only for
/// `COUNT(*)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprAggregate {
    pub func: AggregateFunc,
    pub expr: Option<Box<Expr>>,
}

impl Expr {
    pub fn count_star() -> Expr {
        ExprAggregate {
            func: AggregateFunc::Count,
            expr: None,
        }
        .into()
    }

    pub fn aggregate(func: AggregateFunc, expr: impl Into<Expr>) -> Expr {
        ExprAggregate {
            func,
            expr: Some(Box::new(expr.into())),
        }
        .into()
    }
}

impl AggregateFunc {
    pub fn as_sql(self) -> &'static str {
        match self {
            AggregateFunc::Count => "COUNT",
            AggregateFunc::Sum => "SUM",
            AggregateFunc::Min => "MIN",
            AggregateFunc::Max => "MAX",
            AggregateFunc::Avg => "AVG",
        }
    }
}

impl From<ExprAggregate> for Expr {
    fn from(value: ExprAggregate) -> Self {
        Expr::Aggregate(value)
    }
}
