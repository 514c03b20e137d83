use adsql_core::{stmt::Expr, Result, Schema};

/// Turns a raw query expression into the relational tree the translation
/// passes work on.
///
/// Binding runs between the two composite rewrites, so a binder may introduce
/// new composite comparisons (for example when it inlines a captured
/// predicate).
pub trait Bind: Send + Sync {
    fn bind(&self, schema: &Schema, expr: Expr) -> Result<Expr>;
}

/// Binder for trees that are already relational, such as the ones built by
/// [`Query`](crate::Query).
#[derive(Debug, Default, Clone, Copy)]
pub struct Prebound;

impl Bind for Prebound {
    fn bind(&self, _schema: &Schema, expr: Expr) -> Result<Expr> {
        Ok(expr)
    }
}
