use super::{Expr, UnaryOp};

#[derive(Debug, Clone, PartialEq)]
pub struct ExprUnaryOp {
    pub op: UnaryOp,
    pub expr: Box<Expr>,
}

impl Expr {
    pub fn not(expr: impl Into<Expr>) -> Expr {
        ExprUnaryOp {
            op: UnaryOp::Not,
            expr: Box::new(expr.into()),
        }
        .into()
    }

    pub fn negate(expr: impl Into<Expr>) -> Expr {
        ExprUnaryOp {
            op: UnaryOp::Negate,
            expr: Box::new(expr.into()),
        }
        .into()
    }
}

impl From<ExprUnaryOp> for Expr {
    fn from(value: ExprUnaryOp) -> Self {
        Expr::UnaryOp(value)
    }
}
