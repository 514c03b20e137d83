#[macro_use]
mod fmt;
use fmt::ToSql;

mod call;

mod delim;
use delim::{Comma, Delimited};

mod flavor;
pub use flavor::ParamStyle;

mod ident;
use ident::Ident;

mod params;
pub use params::{Param, Params, Placeholder};

// Fragment serializers
mod expr;
mod select;
mod value;

use adsql_core::{stmt::Expr, Error, Result, Schema};

/// Serialize an expression tree to Advantage SQL.
#[derive(Debug)]
pub struct Serializer<'a> {
    /// Schema the expression was built against. Used to name members in
    /// errors and to encode enum values.
    schema: &'a Schema,

    /// How parameter markers are written.
    param_style: ParamStyle,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer<'a>,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl<'a> Serializer<'a> {
    /// Serializes a projection, a select, or a scalar expression.
    ///
    /// Parameters are pushed to `params` in the order their markers appear in
    /// the returned text.
    pub fn serialize(&self, expr: &Expr, params: &mut impl Params) -> Result<String> {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
        };

        match expr {
            Expr::Projection(projection) => (&projection.select).to_sql(&mut fmt)?,
            Expr::Select(select) => (&**select).to_sql(&mut fmt)?,
            Expr::Table(_) | Expr::Join(_) => {
                return Err(Error::unsupported_operation(
                    "a bare relation cannot be serialized; wrap it in a select",
                ))
            }
            expr => expr.to_sql(&mut fmt)?,
        }

        Ok(ret)
    }
}
