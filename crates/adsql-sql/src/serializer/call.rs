use super::{
    expr::{Negated, Operand},
    Delimited, Formatter, Params, ToSql,
};

use adsql_core::{
    stmt::{DateMethod, Expr, ExprCall, Method, NumMethod, StrMethod, Type},
    Error, Result,
};

impl ToSql for &ExprCall {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        match self.method {
            Method::Str(method) => str_method(f, method, self),
            Method::Date(method) => date_method(f, method, self),
            Method::Num(method) => num_method(f, method, self),
            Method::CompareTo => {
                let [arg] = args::<1>(self)?;
                compare(f, receiver(self)?, arg)
            }
            Method::Compare => {
                let [lhs, rhs] = args::<2>(self)?;
                compare(f, lhs, rhs)
            }
            Method::ParseNumber => {
                let [arg] = operands::<1>(self)?;
                fmt!(f, "VAL(", arg, ")");
                Ok(())
            }
            Method::ToString => {
                let object = receiver(self)?;
                if object.infer_ty().is_string() {
                    fmt!(f, object);
                } else {
                    fmt!(f, "CAST(", object, " AS SQL_VARCHAR)");
                }
                Ok(())
            }
        }
    }
}

fn str_method<P: Params>(
    f: &mut Formatter<'_, P>,
    method: StrMethod,
    call: &ExprCall,
) -> Result<()> {
    match method {
        StrMethod::StartsWith => {
            let [arg] = args::<1>(call)?;
            fmt!(f, "(", receiver(call)?, " LIKE ", Operand(arg), " + '%')");
        }
        StrMethod::EndsWith => {
            let [arg] = args::<1>(call)?;
            fmt!(f, "(", receiver(call)?, " LIKE '%' + ", Operand(arg), ")");
        }
        StrMethod::Contains => {
            let [arg] = args::<1>(call)?;
            fmt!(
                f,
                "(",
                receiver(call)?,
                " LIKE '%' + ",
                Operand(arg),
                " + '%')"
            );
        }
        StrMethod::Concat => {
            let operands = match &call.args[..] {
                [Expr::List(list)] => &list.items[..],
                args => args,
            };

            if operands.is_empty() {
                return Err(unsupported(call, "no operands"));
            }

            fmt!(f, Delimited(operands.iter().map(Operand), " + "));
        }
        StrMethod::IsNullOrEmpty => {
            let [arg] = args::<1>(call)?;
            fmt!(f, "(", Operand(arg), " IS NULL OR ", Operand(arg), " = '')");
        }
        StrMethod::ToUpper => fmt!(f, "UPPER(", receiver(call)?, ")"),
        StrMethod::ToLower => fmt!(f, "LOWER(", receiver(call)?, ")"),
        StrMethod::Trim => fmt!(f, "TRIM(", receiver(call)?, ")"),
        StrMethod::Length => fmt!(f, "LEN(", receiver(call)?, ")"),
        StrMethod::Replace => {
            let [from, to] = args::<2>(call)?;
            fmt!(f, "REPLACE(", receiver(call)?, ", ", from, ", ", to, ")");
        }
        // Both sides count from 1, so `start` is written unchanged
        StrMethod::Substring => match &call.args[..] {
            [start] => fmt!(f, "SUBSTRING(", receiver(call)?, ", ", start, ")"),
            [start, len] => fmt!(
                f,
                "SUBSTRING(",
                receiver(call)?,
                ", ",
                start,
                ", ",
                len,
                ")"
            ),
            _ => return Err(unsupported(call, "expects one or two arguments")),
        },
        StrMethod::Remove => {
            let object = receiver(call)?;
            match &call.args[..] {
                [start] => fmt!(f, "LEFT(", object, ", ", start, ")"),
                [start, count] => fmt!(
                    f,
                    "(LEFT(",
                    object,
                    ", ",
                    start,
                    ") + SUBSTRING(",
                    object,
                    ", ",
                    Operand(start),
                    " + ",
                    Operand(count),
                    " + 1))"
                ),
                _ => return Err(unsupported(call, "expects one or two arguments")),
            }
        }
        // POSITION is 1-based and yields 0 when not found
        StrMethod::IndexOf => {
            let object = receiver(call)?;
            match &call.args[..] {
                [needle] => fmt!(f, "(POSITION(", needle, " IN ", object, ") - 1)"),
                [needle, start] => fmt!(
                    f,
                    "(CASE WHEN POSITION(",
                    needle,
                    " IN SUBSTRING(",
                    object,
                    ", ",
                    Operand(start),
                    " + 1)) = 0 THEN -1 ELSE (POSITION(",
                    needle,
                    " IN SUBSTRING(",
                    object,
                    ", ",
                    Operand(start),
                    " + 1)) + ",
                    Operand(start),
                    " - 1) END)"
                ),
                _ => return Err(unsupported(call, "expects one or two arguments")),
            }
        }
    }

    Ok(())
}

fn date_method<P: Params>(
    f: &mut Formatter<'_, P>,
    method: DateMethod,
    call: &ExprCall,
) -> Result<()> {
    let unit = match method {
        DateMethod::AddYears => "SQL_TSI_YEAR",
        DateMethod::AddMonths => "SQL_TSI_MONTH",
        DateMethod::AddDays => "SQL_TSI_DAY",
        DateMethod::AddHours => "SQL_TSI_HOUR",
        DateMethod::AddMinutes => "SQL_TSI_MINUTE",
        DateMethod::AddSeconds => "SQL_TSI_SECOND",
        DateMethod::AddMilliseconds => "SQL_TSI_FRAC_SECOND",
        DateMethod::Subtract => {
            let [later, earlier] = operands::<2>(call)?;
            fmt!(
                f,
                "TIMESTAMPDIFF(SQL_TSI_FRAC_SECOND, ",
                earlier,
                ", ",
                later,
                ")"
            );
            return Ok(());
        }
        DateMethod::Part(part) => {
            fmt!(f, part.as_sql(), "(", receiver(call)?, ")");
            return Ok(());
        }
    };

    let [amount] = args::<1>(call)?;
    fmt!(
        f,
        "TIMESTAMPADD(",
        unit,
        ", ",
        amount,
        ", ",
        receiver(call)?,
        ")"
    );
    Ok(())
}

fn num_method<P: Params>(
    f: &mut Formatter<'_, P>,
    method: NumMethod,
    call: &ExprCall,
) -> Result<()> {
    let name = match method {
        NumMethod::Add => return infix(f, call, " + "),
        NumMethod::Subtract => return infix(f, call, " - "),
        NumMethod::Multiply => return infix(f, call, " * "),
        NumMethod::Divide => return infix(f, call, " / "),
        NumMethod::Remainder => return infix(f, call, " % "),
        NumMethod::Negate => {
            let [arg] = operands::<1>(call)?;
            fmt!(f, Negated(arg));
            return Ok(());
        }
        NumMethod::Round => {
            match operand_list(call)[..] {
                [arg] => fmt!(f, "ROUND(", arg, ", 0)"),
                [arg, digits] if matches!(digits.infer_ty(), Type::I32 | Type::I64) => {
                    fmt!(f, "ROUND(", arg, ", ", digits, ")")
                }
                _ => return Err(unsupported(call, "expects a value and integer digits")),
            }
            return Ok(());
        }
        // The third argument selects truncation instead of rounding
        NumMethod::Truncate => {
            let [arg] = operands::<1>(call)?;
            fmt!(f, "ROUND(", arg, ", 0, 1)");
            return Ok(());
        }
        NumMethod::Atan2 => "ATN2",
        NumMethod::Pow => "POWER",
        NumMethod::Ceiling => "CEILING",
        NumMethod::Floor => "FLOOR",
        NumMethod::Abs => "ABS",
        NumMethod::Acos => "ACOS",
        NumMethod::Asin => "ASIN",
        NumMethod::Atan => "ATAN",
        NumMethod::Cos => "COS",
        NumMethod::Exp => "EXP",
        NumMethod::Log => "LOG",
        NumMethod::Log10 => "LOG10",
        NumMethod::Sin => "SIN",
        NumMethod::Sqrt => "SQRT",
        NumMethod::Sign => "SIGN",
        NumMethod::Tan => "TAN",
    };

    let arity = match method {
        NumMethod::Atan2 | NumMethod::Pow => 2,
        _ => 1,
    };

    let operands = operand_list(call);
    if operands.len() != arity {
        return Err(unsupported(call, &format!("expects {arity} argument(s)")));
    }

    fmt!(f, name, "(", Delimited(operands, ", "), ")");
    Ok(())
}

fn infix<P: Params>(f: &mut Formatter<'_, P>, call: &ExprCall, op: &str) -> Result<()> {
    let [lhs, rhs] = operands::<2>(call)?;
    fmt!(f, "(", Operand(lhs), op, Operand(rhs), ")");
    Ok(())
}

/// `CompareTo` only ever yields -1, 0 or 1.
fn compare<P: Params>(f: &mut Formatter<'_, P>, lhs: &Expr, rhs: &Expr) -> Result<()> {
    fmt!(
        f,
        "(CASE WHEN ",
        Operand(lhs),
        " = ",
        Operand(rhs),
        " THEN 0 WHEN ",
        Operand(lhs),
        " < ",
        Operand(rhs),
        " THEN -1 ELSE 1 END)"
    );
    Ok(())
}

fn receiver(call: &ExprCall) -> Result<&Expr> {
    call.object
        .as_deref()
        .ok_or_else(|| unsupported(call, "needs a receiver"))
}

/// The call's arguments, excluding the receiver.
fn args<const N: usize>(call: &ExprCall) -> Result<&[Expr; N]> {
    <&[Expr; N]>::try_from(&call.args[..])
        .map_err(|_| unsupported(call, &format!("expects {N} argument(s)")))
}

/// The receiver, if any, followed by the arguments.
fn operand_list(call: &ExprCall) -> Vec<&Expr> {
    call.object.as_deref().into_iter().chain(&call.args).collect()
}

fn operands<const N: usize>(call: &ExprCall) -> Result<[&Expr; N]> {
    <[&Expr; N]>::try_from(operand_list(call))
        .map_err(|_| unsupported(call, &format!("expects {N} operand(s)")))
}

fn unsupported(call: &ExprCall, reason: &str) -> Error {
    Error::unsupported_operation(format!("{:?} {reason}", call.method))
}
