use super::*;
use crate::{bail, err, Error, Result};
use std::cmp::Ordering;

impl Expr {
    /// Evaluates the expression, reading columns, members and arguments from
    /// `input`.
    ///
    /// Comparisons order null below every other value, the way the storage
    /// engine orders blank date fields, and two nulls compare equal.
    pub fn eval(&self, mut input: impl Input) -> Result<Value> {
        eval(self, &mut input)
    }

    pub fn eval_bool(&self, input: impl Input) -> Result<bool> {
        match self.eval(input)? {
            Value::Bool(ret) => Ok(ret),
            value => bail!("expected boolean result, got {value}"),
        }
    }

    pub fn eval_const(&self) -> Result<Value> {
        self.eval(ConstInput::new())
    }
}

fn eval(expr: &Expr, input: &mut impl Input) -> Result<Value> {
    match expr {
        Expr::Value(value) => Ok(value.clone()),
        Expr::Captured(captured) => Ok(captured.value.clone()),
        Expr::Convert(convert) => eval(&convert.expr, input),
        Expr::Arg(arg) => input
            .resolve_arg(arg)
            .ok_or_else(|| err!("argument {} not provided", arg.position)),
        Expr::Column(column) => input
            .resolve_column(column)
            .ok_or_else(|| err!("column {}.{} not provided", column.alias, column.name)),
        Expr::Member(member) => input
            .resolve_member(&member.source, member.member)
            .ok_or_else(|| err!("member {:?} not provided", member.member)),
        Expr::BinaryOp(binary) => eval_binary_op(binary, input),
        Expr::UnaryOp(unary) => {
            let value = eval(&unary.expr, input)?;
            match (unary.op, value) {
                (UnaryOp::Not, Value::Bool(v)) => Ok(Value::Bool(!v)),
                (UnaryOp::Negate, Value::I32(v)) => Ok(Value::I32(-v)),
                (UnaryOp::Negate, Value::I64(v)) => Ok(Value::I64(-v)),
                (UnaryOp::Negate, Value::F64(v)) => Ok(Value::F64(-v)),
                (_, Value::Null) => Ok(Value::Null),
                (op, value) => bail!("cannot apply {op:?} to {value}"),
            }
        }
        Expr::InList(in_list) => {
            let needle = eval(&in_list.expr, input)?;
            for item in &in_list.list {
                if compare(&needle, &eval(item, input)?)? == Ordering::Equal {
                    return Ok(Value::Bool(true));
                }
            }
            Ok(Value::Bool(false))
        }
        Expr::List(list) => Ok(Value::List(
            list.items
                .iter()
                .map(|item| eval(item, input))
                .collect::<Result<_>>()?,
        )),
        Expr::Record(record) => Ok(Value::Record(
            record
                .fields
                .iter()
                .map(|field| eval(&field.expr, input))
                .collect::<Result<_>>()?,
        )),
        Expr::Call(call) => eval_call(call, input),
        _ => Err(Error::unsupported_operation(
            "relational expressions cannot be evaluated in memory",
        )),
    }
}

fn eval_binary_op(binary: &ExprBinaryOp, input: &mut impl Input) -> Result<Value> {
    let lhs = eval(&binary.lhs, input)?;

    // Short-circuit the logical operators
    match (binary.op, &lhs) {
        (BinaryOp::And, Value::Bool(false)) => return Ok(Value::Bool(false)),
        (BinaryOp::Or, Value::Bool(true)) => return Ok(Value::Bool(true)),
        _ => {}
    }

    let rhs = eval(&binary.rhs, input)?;

    let ret = match binary.op {
        BinaryOp::Eq => compare(&lhs, &rhs)? == Ordering::Equal,
        BinaryOp::Ne => compare(&lhs, &rhs)? != Ordering::Equal,
        BinaryOp::Ge => compare(&lhs, &rhs)? != Ordering::Less,
        BinaryOp::Gt => compare(&lhs, &rhs)? == Ordering::Greater,
        BinaryOp::Le => compare(&lhs, &rhs)? != Ordering::Greater,
        BinaryOp::Lt => compare(&lhs, &rhs)? == Ordering::Less,
        BinaryOp::And | BinaryOp::Or => match rhs {
            Value::Bool(rhs) => rhs,
            rhs => bail!("expected boolean operand, got {rhs}"),
        },
        op => return arithmetic(op, lhs, rhs),
    };

    Ok(Value::Bool(ret))
}

fn arithmetic(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value> {
    if lhs.is_null() || rhs.is_null() {
        return Ok(Value::Null);
    }

    if let (BinaryOp::Add, Value::String(lhs), Value::String(rhs)) = (op, &lhs, &rhs) {
        return Ok(Value::String(format!("{lhs}{rhs}")));
    }

    match (lhs.as_i64(), rhs.as_i64()) {
        (Some(l), Some(r)) => {
            let ret = match op {
                BinaryOp::Add => l.checked_add(r),
                BinaryOp::Subtract => l.checked_sub(r),
                BinaryOp::Multiply => l.checked_mul(r),
                BinaryOp::Divide => l.checked_div(r),
                BinaryOp::Modulo => l.checked_rem(r),
                _ => None,
            };
            let ret = ret.ok_or_else(|| err!("integer overflow or division by zero in {op}"))?;
            match (&lhs, &rhs) {
                (Value::I32(_), Value::I32(_)) => Ok(Value::I32(
                    i32::try_from(ret).map_err(|_| err!("integer overflow in {op}"))?,
                )),
                _ => Ok(Value::I64(ret)),
            }
        }
        _ => match (lhs.as_f64(), rhs.as_f64()) {
            (Some(l), Some(r)) => Ok(Value::F64(match op {
                BinaryOp::Add => l + r,
                BinaryOp::Subtract => l - r,
                BinaryOp::Multiply => l * r,
                BinaryOp::Divide => l / r,
                BinaryOp::Modulo => l % r,
                _ => bail!("{op} is not an arithmetic operator"),
            })),
            _ => bail!("cannot apply {op} to {lhs} and {rhs}"),
        },
    }
}

fn eval_call(call: &ExprCall, input: &mut impl Input) -> Result<Value> {
    let object = match &call.object {
        Some(object) => Some(eval(object, input)?),
        None => None,
    };

    let args = call
        .args
        .iter()
        .map(|arg| eval(arg, input))
        .collect::<Result<Vec<_>>>()?;

    let ordering_to_value = |ordering: Ordering| {
        Value::I32(match ordering {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        })
    };

    match (call.method, object.as_ref(), &args[..]) {
        (Method::Compare, None, [lhs, rhs]) => Ok(ordering_to_value(compare(lhs, rhs)?)),
        (Method::CompareTo, Some(lhs), [rhs]) => Ok(ordering_to_value(compare(lhs, rhs)?)),
        (Method::Str(StrMethod::IsNullOrEmpty), None, [value]) => Ok(Value::Bool(match value {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        })),
        (Method::Str(StrMethod::Concat), None, args) => {
            let mut ret = String::new();
            for arg in args {
                match arg {
                    Value::String(s) => ret.push_str(s),
                    Value::List(items) => {
                        for item in items {
                            if let Value::String(s) = item {
                                ret.push_str(s);
                            }
                        }
                    }
                    Value::Null => {}
                    arg => ret.push_str(&arg.to_string()),
                }
            }
            Ok(Value::String(ret))
        }
        (Method::Str(method), Some(Value::String(s)), args) => eval_str(method, s, args),
        (_, Some(Value::Null), _) => Ok(Value::Null),
        (method, ..) => Err(Error::unsupported_operation(format!(
            "{method:?} cannot be evaluated in memory"
        ))),
    }
}

fn eval_str(method: StrMethod, s: &str, args: &[Value]) -> Result<Value> {
    let ret = match (method, args) {
        (StrMethod::ToUpper, []) => Value::String(s.to_uppercase()),
        (StrMethod::ToLower, []) => Value::String(s.to_lowercase()),
        (StrMethod::Trim, []) => Value::String(s.trim().to_string()),
        (StrMethod::Length, []) => Value::I32(s.chars().count() as i32),
        (StrMethod::StartsWith, [Value::String(p)]) => Value::Bool(s.starts_with(p.as_str())),
        (StrMethod::EndsWith, [Value::String(p)]) => Value::Bool(s.ends_with(p.as_str())),
        (StrMethod::Contains, [Value::String(p)]) => Value::Bool(s.contains(p.as_str())),
        _ => {
            return Err(Error::unsupported_operation(format!(
                "{method:?} with {} argument(s) cannot be evaluated in memory",
                args.len()
            )))
        }
    };

    Ok(ret)
}

/// Orders two values, with null below everything else.
pub(crate) fn compare(lhs: &Value, rhs: &Value) -> Result<Ordering> {
    use Value::*;

    let ret = match (lhs, rhs) {
        (Null, Null) => Some(Ordering::Equal),
        (Null, _) => Some(Ordering::Less),
        (_, Null) => Some(Ordering::Greater),
        (Bool(l), Bool(r)) => Some(l.cmp(r)),
        (String(l), String(r)) => Some(l.as_str().cmp(r.as_str())),
        (Enum(l), Enum(r)) if l.ty == r.ty => Some(l.code.cmp(&r.code)),
        (Date(l), Date(r)) => Some(l.cmp(r)),
        (Date(_) | DateTime(_), Date(_) | DateTime(_)) => {
            match (lhs.as_date_time(), rhs.as_date_time()) {
                (Some(l), Some(r)) => Some(l.cmp(&r)),
                _ => None,
            }
        }
        _ => match (lhs.as_i64(), rhs.as_i64()) {
            (Some(l), Some(r)) => Some(l.cmp(&r)),
            _ => match (lhs.as_f64(), rhs.as_f64()) {
                (Some(l), Some(r)) => l.partial_cmp(&r),
                _ => None,
            },
        },
    };

    ret.ok_or_else(|| err!("cannot compare {lhs} with {rhs}"))
}
