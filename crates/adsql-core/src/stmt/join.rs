use super::Expr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    LeftOuter,
    Cross,
}

/// Join between two relations. `on` is `None` only for cross joins.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub left: Expr,
    pub right: Expr,
    pub on: Option<Expr>,
}

impl JoinKind {
    pub fn as_sql(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::LeftOuter => "LEFT OUTER JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }
}

impl From<Join> for Expr {
    fn from(value: Join) -> Self {
        Expr::Join(Box::new(value))
    }
}
