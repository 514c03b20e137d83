use super::{Expr, Type};

/// Explicit conversion of `expr` to `ty`. `nullable` marks a widening to the
/// nullable form of the type.
///
/// Conversions carry typing information for the passes; the formatter writes
/// the inner expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprConvert {
    pub expr: Box<Expr>,
    pub ty: Type,
    pub nullable: bool,
}

impl Expr {
    pub fn convert(expr: impl Into<Expr>, ty: Type, nullable: bool) -> Expr {
        ExprConvert {
            expr: Box::new(expr.into()),
            ty,
            nullable,
        }
        .into()
    }

    /// Strips any conversions wrapping the expression.
    pub fn unwrap_convert(&self) -> &Expr {
        match self {
            Expr::Convert(convert) => convert.expr.unwrap_convert(),
            expr => expr,
        }
    }
}

impl From<ExprConvert> for Expr {
    fn from(value: ExprConvert) -> Self {
        Expr::Convert(value)
    }
}
