use super::{Comma, Formatter, Ident, Params, ToSql};

use adsql_core::{
    stmt::{ColumnDecl, Direction, Expr, OrderBy, Select, Value},
    Error, Result,
};

/// `TOP` count written when only `Skip` is given. `START AT` is not valid
/// without `TOP`.
const NO_LIMIT: i64 = i32::MAX as i64;

impl ToSql for &Select {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        fmt!(f, "SELECT ");

        if self.distinct {
            fmt!(f, "DISTINCT ");
        }

        if self.take.is_some() || self.skip.is_some() {
            match &self.take {
                Some(take) => fmt!(f, "TOP ", take),
                None => fmt!(f, "TOP ", NO_LIMIT),
            }

            // START AT is 1-based
            match &self.skip {
                Some(Expr::Value(Value::I32(skip))) => {
                    fmt!(f, " START AT ", start_at((*skip).into())?)
                }
                Some(Expr::Value(Value::I64(skip))) => fmt!(f, " START AT ", start_at(*skip)?),
                Some(skip) => fmt!(f, " START AT (", skip, " + 1)"),
                None => {}
            }

            fmt!(f, " ");
        }

        if self.columns.is_empty() {
            fmt!(f, "*");
        } else {
            fmt!(f, Comma(&self.columns));
        }

        if let Some(from) = &self.from {
            fmt!(f, " FROM ", Source(from));
        }

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE ", filter);
        }

        if !self.group_by.is_empty() {
            fmt!(f, " GROUP BY ", Comma(&self.group_by));
        }

        if !self.order_by.is_empty() {
            fmt!(f, " ORDER BY ", Comma(&self.order_by));
        }

        Ok(())
    }
}

/// The 1-based first row for a constant skip.
fn start_at(skip: i64) -> Result<i64> {
    if skip < 0 {
        return Err(Error::unsupported_operation(format!(
            "cannot skip a negative number of rows ({skip})"
        )));
    }

    skip.checked_add(1).ok_or_else(|| {
        Error::unsupported_operation(format!("skip of {skip} rows is out of range"))
    })
}

impl ToSql for &ColumnDecl {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        fmt!(f, &self.expr);

        match &self.expr {
            Expr::Column(column) if column.name == self.name => {}
            _ => fmt!(f, " AS ", Ident(&self.name)),
        }

        Ok(())
    }
}

impl ToSql for &OrderBy {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        fmt!(f, &self.expr);

        if self.direction == Direction::Desc {
            fmt!(f, " DESC");
        }

        Ok(())
    }
}

/// A relation in a `FROM` clause.
struct Source<'a>(&'a Expr);

impl ToSql for Source<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        match self.0 {
            Expr::Table(table) => fmt!(f, Ident(&table.name), " AS ", table.alias),
            Expr::Select(select) => fmt!(f, "(", &**select, ") AS ", select.alias),
            Expr::Projection(projection) => fmt!(
                f,
                "(",
                &projection.select,
                ") AS ",
                projection.select.alias
            ),
            Expr::Join(join) => {
                fmt!(f, Source(&join.left), " ", join.kind.as_sql(), " ");

                if matches!(join.right, Expr::Join(_)) {
                    fmt!(f, "(", Source(&join.right), ")");
                } else {
                    fmt!(f, Source(&join.right));
                }

                if let Some(on) = &join.on {
                    fmt!(f, " ON ", on);
                }
            }
            _ => {
                return Err(Error::unsupported_operation(
                    "only tables, selects and joins can appear in FROM",
                ))
            }
        }

        Ok(())
    }
}
