use super::{Expr, Value};

/// A value captured from the caller, such as a local variable referenced by a
/// filter. It is constant for the whole translation but is never inlined into
/// the SQL text.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprCaptured {
    pub name: String,
    pub value: Value,
}

impl Expr {
    pub fn captured(name: impl Into<String>, value: impl Into<Value>) -> Expr {
        ExprCaptured {
            name: name.into(),
            value: value.into(),
        }
        .into()
    }
}

impl From<ExprCaptured> for Expr {
    fn from(value: ExprCaptured) -> Self {
        Expr::Captured(value)
    }
}
