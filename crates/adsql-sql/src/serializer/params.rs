use super::{Formatter, ParamStyle, ToSql};

use adsql_core::{stmt, Result};

/// A statement parameter, in marker order.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// A value known at translation time.
    Value(stmt::Value),

    /// The `n`th value read from the outer row of a correlated query.
    Arg(usize),
}

pub trait Params {
    fn push(&mut self, param: Param) -> Placeholder;
}

/// Zero-based position of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(pub usize);

impl Params for Vec<Param> {
    fn push(&mut self, param: Param) -> Placeholder {
        self.push(param);
        Placeholder(self.len() - 1)
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: super::Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        match f.serializer.param_style {
            ParamStyle::Colon => fmt!(f, ":p", self.0 as i64),
            ParamStyle::QuestionMark => fmt!(f, "?"),
        }
        Ok(())
    }
}
