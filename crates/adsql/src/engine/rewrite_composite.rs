use adsql_core::{
    schema::{CompositeField, Member},
    stmt::{visit_mut, BinaryOp, Expr, ExprBinaryOp, Method, Type, Value, VisitMut},
    Error, Result, Schema,
};
use chrono::{NaiveDateTime, NaiveTime};

/// Rewrites comparisons involving composite date+time members into
/// comparisons over the two backing columns.
///
/// Comparisons that do not involve a composite member, or that compare one
/// against something other than a datetime constant or another composite, are
/// left untouched.
pub(crate) fn rewrite_composite(schema: &Schema, expr: &mut Expr) -> Result<()> {
    let mut pass = RewriteComposite {
        schema,
        error: None,
    };
    pass.visit_expr_mut(expr);

    match pass.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct RewriteComposite<'a> {
    schema: &'a Schema,

    /// First error hit while walking. The walk stops rewriting once set.
    error: Option<Error>,
}

/// A composite member read from an entity expression.
struct Access<'a> {
    source: &'a Expr,
    member: &'a Member,
    field: CompositeField,
}

impl VisitMut for RewriteComposite<'_> {
    fn visit_expr_mut(&mut self, i: &mut Expr) {
        if self.error.is_some() {
            return;
        }

        if let Expr::BinaryOp(expr_binary_op) = i {
            match self.rewrite_binary_op(expr_binary_op) {
                Ok(Some(rewritten)) => {
                    *i = rewritten;
                    return;
                }
                Ok(None) => {}
                Err(err) => {
                    self.error = Some(err);
                    return;
                }
            }
        }

        visit_mut::visit_expr_mut(self, i);
    }
}

impl RewriteComposite<'_> {
    fn rewrite_binary_op(&self, expr: &ExprBinaryOp) -> Result<Option<Expr>> {
        if !expr.op.is_comparison() {
            return Ok(None);
        }

        match (self.access(&expr.lhs), self.access(&expr.rhs)) {
            (Some(lhs), Some(rhs)) => Ok(Some(self.compare_composites(&lhs, expr.op, &rhs))),
            (Some(lhs), None) => match expr.rhs.as_constant() {
                Some(value) => self.compare_constant(&lhs, expr.op, value),
                None => Ok(None),
            },
            (None, Some(rhs)) => match expr.lhs.as_constant() {
                // `c op x` is rewritten as `x commute(op) c`
                Some(value) => self.compare_constant(&rhs, expr.op.commute(), value),
                None => Ok(None),
            },
            (None, None) => Ok(None),
        }
    }

    fn access<'e>(&'e self, expr: &'e Expr) -> Option<Access<'e>> {
        let member = expr.unwrap_convert().as_member()?;
        let field = *self.schema.composite(member.member)?;

        Some(Access {
            source: &member.source,
            member: self.schema.member(member.member),
            field,
        })
    }

    fn compare_constant(
        &self,
        access: &Access<'_>,
        op: BinaryOp,
        value: &Value,
    ) -> Result<Option<Expr>> {
        let date = self.date_of(access);

        if value.is_null() {
            return match op {
                BinaryOp::Eq => Ok(Some(Expr::eq(date, Expr::null()))),
                BinaryOp::Ne => Ok(Some(Expr::ne(date, Expr::null()))),
                _ => Err(Error::unsupported_operation(format!(
                    "`{}` comparison of composite member `{}` with null",
                    op, access.member.name
                ))),
            };
        }

        let Some(value) = value.as_date_time() else {
            return Ok(None);
        };

        let date_value = self.date_value(access, value);
        let time_value = Value::String(value.format("%H:%M").to_string());
        let time = self.time_of(access);

        tracing::trace!(member = %access.member.name, %op, "rewriting composite comparison");

        Ok(Some(fold(op, date, date_value.into(), time, time_value.into())))
    }

    fn compare_composites(&self, lhs: &Access<'_>, op: BinaryOp, rhs: &Access<'_>) -> Expr {
        let lhs_nullable = self.schema.member(lhs.field.date).nullable;
        let rhs_nullable = self.schema.member(rhs.field.date).nullable;

        let mut lhs_date = self.date_of(lhs);
        let mut rhs_date = self.date_of(rhs);

        // Both sides of a date comparison must agree on nullability
        if lhs_nullable && !rhs_nullable {
            rhs_date = Expr::convert(rhs_date, self.date_ty(rhs), true);
        } else if rhs_nullable && !lhs_nullable {
            lhs_date = Expr::convert(lhs_date, self.date_ty(lhs), true);
        }

        tracing::trace!(
            lhs = %lhs.member.name,
            rhs = %rhs.member.name,
            %op,
            "rewriting composite-to-composite comparison"
        );

        fold(op, lhs_date, rhs_date, self.time_of(lhs), self.time_of(rhs))
    }

    fn date_of(&self, access: &Access<'_>) -> Expr {
        Expr::member(access.source.clone(), access.field.date)
    }

    fn time_of(&self, access: &Access<'_>) -> Expr {
        Expr::member(access.source.clone(), access.field.time)
    }

    fn date_ty(&self, access: &Access<'_>) -> Type {
        self.schema
            .member(access.field.date)
            .column()
            .map(|column| column.ty.clone())
            .unwrap_or(Type::Date)
    }

    /// The date part of `value`, typed like the date column.
    fn date_value(&self, access: &Access<'_>, value: NaiveDateTime) -> Value {
        match self.date_ty(access) {
            Type::DateTime => Value::DateTime(value.date().and_time(NaiveTime::MIN)),
            _ => Value::Date(value.date()),
        }
    }
}

/// Combines the date and time comparisons for `op`.
///
/// Equality needs both halves equal and inequality either half different. An
/// ordering compares dates strictly and breaks ties on the time text.
fn fold(op: BinaryOp, lhs_date: Expr, rhs_date: Expr, lhs_time: Expr, rhs_time: Expr) -> Expr {
    match op {
        BinaryOp::Eq => Expr::and(
            Expr::eq(lhs_date, rhs_date),
            Expr::eq(lhs_time, rhs_time),
        ),
        BinaryOp::Ne => Expr::or(
            Expr::ne(lhs_date, rhs_date),
            Expr::ne(lhs_time, rhs_time),
        ),
        op => Expr::or(
            Expr::binary_op(lhs_date.clone(), op.strict(), rhs_date.clone()),
            Expr::and(
                Expr::eq(lhs_date, rhs_date),
                Expr::binary_op(
                    Expr::call_static(Method::Compare, [lhs_time, rhs_time]),
                    op,
                    0,
                ),
            ),
        ),
    }
}
