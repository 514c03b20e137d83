#![allow(unused_variables)]

use super::{Expr, ExprArg, ExprColumn, Value};
use crate::schema::MemberId;

/// Supplies the values an expression reads when it is evaluated.
pub trait Input {
    fn resolve_arg(&mut self, arg: &ExprArg) -> Option<Value> {
        None
    }

    fn resolve_column(&mut self, column: &ExprColumn) -> Option<Value> {
        None
    }

    /// Reads `member` of the entity `source` evaluates to.
    fn resolve_member(&mut self, source: &Expr, member: MemberId) -> Option<Value> {
        None
    }
}

/// Input for expressions that read nothing.
#[derive(Debug, Default)]
pub struct ConstInput;

impl ConstInput {
    pub fn new() -> ConstInput {
        ConstInput
    }
}

impl Input for ConstInput {}

impl<T: Input + ?Sized> Input for &mut T {
    fn resolve_arg(&mut self, arg: &ExprArg) -> Option<Value> {
        Input::resolve_arg(&mut **self, arg)
    }

    fn resolve_column(&mut self, column: &ExprColumn) -> Option<Value> {
        Input::resolve_column(&mut **self, column)
    }

    fn resolve_member(&mut self, source: &Expr, member: MemberId) -> Option<Value> {
        Input::resolve_member(&mut **self, source, member)
    }
}
