use super::{value::CharLiteral, Comma, Formatter, Ident, Param, Params, ToSql};

use adsql_core::{
    stmt::{self, Expr, ExprBinaryOp, ExprColumn, UnaryOp, Value},
    Error, Result,
};

impl ToSql for &Expr {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        match self {
            Expr::Aggregate(expr) => match &expr.expr {
                Some(arg) => fmt!(f, expr.func.as_sql(), "(", &**arg, ")"),
                None => fmt!(f, expr.func.as_sql(), "(*)"),
            },
            Expr::Arg(arg) => {
                let placeholder = f.params.push(Param::Arg(arg.position));
                fmt!(f, placeholder);
            }
            Expr::BinaryOp(expr) => fmt!(f, expr),
            Expr::Call(expr) => fmt!(f, expr),
            Expr::Captured(expr) => {
                let placeholder = f.params.push(Param::Value(expr.value.clone()));
                fmt!(f, placeholder);
            }
            Expr::Column(expr) => fmt!(f, expr),
            Expr::Convert(expr) => fmt!(f, &*expr.expr),
            Expr::InList(expr) => {
                if expr.list.is_empty() {
                    fmt!(f, "1 = 0");
                } else {
                    fmt!(f, Operand(&expr.expr), " IN (", Comma(&expr.list), ")");
                }
            }
            Expr::Select(select) => fmt!(f, "(", &**select, ")"),
            Expr::UnaryOp(expr) => match expr.op {
                UnaryOp::Not => fmt!(f, "NOT (", &*expr.expr, ")"),
                UnaryOp::Negate => fmt!(f, Negated(&expr.expr)),
            },
            Expr::Value(value) => fmt!(f, value),
            Expr::Member(expr) => {
                let schema = f.serializer.schema;
                return Err(Error::unresolved_member(
                    &schema.entity(expr.member.entity).name,
                    &schema.member(expr.member).name,
                ));
            }
            Expr::Entity(_)
            | Expr::Join(_)
            | Expr::List(_)
            | Expr::Projection(_)
            | Expr::Record(_)
            | Expr::Table(_) => {
                return Err(Error::unsupported_operation(format!(
                    "{} cannot be written as a SQL expression",
                    node_name(self)
                )))
            }
        }

        Ok(())
    }
}

impl ToSql for &ExprBinaryOp {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        if self.op.is_eq() || self.op.is_ne() {
            let null_check = if self.op.is_eq() {
                " IS NULL"
            } else {
                " IS NOT NULL"
            };

            if self.rhs.is_null_const() {
                fmt!(f, Operand(&self.lhs), null_check);
                return Ok(());
            }

            if self.lhs.is_null_const() {
                fmt!(f, Operand(&self.rhs), null_check);
                return Ok(());
            }

            // Enum codes compared with single-character columns are written
            // as the character itself.
            let char_code = char_code_operands(&self.lhs, &self.rhs)
                .or_else(|| char_code_operands(&self.rhs, &self.lhs));

            if let Some((column, code)) = char_code {
                fmt!(f, column, " ", self.op.as_sql(), " ", CharLiteral(code));
                return Ok(());
            }
        }

        fmt!(
            f,
            Operand(&self.lhs),
            " ",
            self.op.as_sql(),
            " ",
            Operand(&self.rhs)
        );
        Ok(())
    }
}

fn char_code_operands<'a>(column: &'a Expr, other: &Expr) -> Option<(&'a ExprColumn, i64)> {
    let Expr::Column(column) = column.unwrap_convert() else {
        return None;
    };

    if !column.is_char1() {
        return None;
    }

    match other.unwrap_convert() {
        Expr::Value(Value::I32(code)) => Some((column, *code as i64)),
        Expr::Value(Value::I64(code)) => Some((column, *code)),
        _ => None,
    }
}

impl ToSql for &ExprColumn {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        fmt!(f, self.alias, ".", Ident(&self.name));
        Ok(())
    }
}

impl ToSql for stmt::TableAlias {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        fmt!(f, "t", self.0 as i64);
        Ok(())
    }
}

/// Wraps compound operands in parentheses.
pub(super) struct Operand<'a>(pub(super) &'a Expr);

impl ToSql for Operand<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        match self.0.unwrap_convert() {
            expr @ Expr::BinaryOp(_) => fmt!(f, "(", expr, ")"),
            expr => fmt!(f, expr),
        }
        Ok(())
    }
}

/// Writes `-operand`. Anything but a plain column or parameter is wrapped in
/// parentheses, as `--` would open a line comment.
pub(super) struct Negated<'a>(pub(super) &'a Expr);

impl ToSql for Negated<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        match self.0.unwrap_convert() {
            expr @ (Expr::Column(_) | Expr::Arg(_) | Expr::Captured(_)) => fmt!(f, "-", expr),
            expr => fmt!(f, "-(", expr, ")"),
        }
        Ok(())
    }
}

fn node_name(expr: &Expr) -> &'static str {
    match expr {
        Expr::Entity(_) => "an entity",
        Expr::Join(_) => "a join",
        Expr::List(_) => "a list",
        Expr::Projection(_) => "a nested projection",
        Expr::Record(_) => "a record",
        Expr::Table(_) => "a table",
        _ => "this node",
    }
}
