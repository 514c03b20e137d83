use super::Expr;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprList {
    pub items: Vec<Expr>,
}

impl Expr {
    pub fn list(items: impl IntoIterator<Item = Expr>) -> Expr {
        ExprList {
            items: items.into_iter().collect(),
        }
        .into()
    }
}

impl From<ExprList> for Expr {
    fn from(value: ExprList) -> Self {
        Expr::List(value)
    }
}
