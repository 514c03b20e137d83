use super::Expr;

/// Positional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprArg {
    pub position: usize,
}

impl Expr {
    pub fn arg(position: usize) -> Expr {
        Expr::Arg(ExprArg { position })
    }

    pub fn is_arg(&self) -> bool {
        matches!(self, Expr::Arg(_))
    }
}

impl From<ExprArg> for Expr {
    fn from(value: ExprArg) -> Self {
        Expr::Arg(value)
    }
}
