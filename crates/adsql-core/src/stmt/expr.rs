use super::*;
use chrono::{NaiveDate, NaiveDateTime};

/// A node of a query expression tree.
///
/// Trees are built upstream (by a query builder or binder), rewritten by the
/// translation passes, and finally serialized. Scalar nodes and relational
/// nodes (`Select`, `Table`, `Join`, `Projection`) share one type so that
/// sub-queries can appear wherever a value can.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Aggregate function over the rows of the enclosing select
    Aggregate(ExprAggregate),

    /// Positional argument: the row parameter of a policy predicate, or an
    /// outer-row value of a correlated child command
    Arg(ExprArg),

    /// Binary operation
    BinaryOp(ExprBinaryOp),

    /// Method call with a translation in the dialect
    Call(ExprCall),

    /// Value captured from the caller's environment. Always written as a
    /// parameter.
    Captured(ExprCaptured),

    /// Resolved physical column
    Column(ExprColumn),

    /// Explicit type conversion
    Convert(ExprConvert),

    /// Materialization descriptor for an entity row
    Entity(ExprEntity),

    /// `expr IN (list)`
    InList(ExprInList),

    /// Join between two relations
    Join(Box<Join>),

    /// Array literal
    List(ExprList),

    /// Member access on an entity. Only survives until the columnizer (or, for
    /// composite fields, the materializer).
    Member(ExprMember),

    /// A select plus the shape used to materialize its rows
    Projection(Box<Projection>),

    /// Anonymous record built from named fields
    Record(ExprRecord),

    /// Relational query
    Select(Box<Select>),

    /// Base relation
    Table(ExprTable),

    /// Unary operation
    UnaryOp(ExprUnaryOp),

    /// Literal value
    Value(Value),
}

impl Expr {
    pub fn null() -> Expr {
        Expr::Value(Value::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Expr::Value(Value::Null))
    }

    /// Returns `true` for a literal null or a captured value that is null.
    pub fn is_null_const(&self) -> bool {
        match self {
            Expr::Value(Value::Null) => true,
            Expr::Captured(captured) => captured.value.is_null(),
            _ => false,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Expr::Value(_))
    }

    pub fn is_relation(&self) -> bool {
        matches!(self, Expr::Table(_) | Expr::Select(_) | Expr::Join(_))
    }

    /// Returns the constant this expression evaluates to without any row
    /// input: a literal or a captured value, seen through conversions.
    pub fn as_constant(&self) -> Option<&Value> {
        match self {
            Expr::Value(value) => Some(value),
            Expr::Captured(captured) => Some(&captured.value),
            Expr::Convert(convert) => convert.expr.as_constant(),
            _ => None,
        }
    }

    /// Takes the expression, leaving a null in its place.
    pub fn take(&mut self) -> Expr {
        std::mem::replace(self, Expr::null())
    }

    /// The value type of the expression, as far as it can be told without a
    /// schema.
    pub fn infer_ty(&self) -> Type {
        match self {
            Expr::Aggregate(e) => match e.func {
                AggregateFunc::Count => Type::I32,
                AggregateFunc::Avg => Type::F64,
                _ => e
                    .expr
                    .as_deref()
                    .map(Expr::infer_ty)
                    .unwrap_or(Type::Unknown),
            },
            Expr::BinaryOp(e) if e.op.is_comparison() || e.op.is_logical() => Type::Bool,
            Expr::BinaryOp(e) => e.lhs.infer_ty(),
            Expr::Call(e) => e.infer_ty(),
            Expr::Captured(e) => e.value.infer_ty(),
            Expr::Column(e) => e.ty.clone(),
            Expr::Convert(e) => e.ty.clone(),
            Expr::Entity(e) => Type::Entity(e.entity),
            Expr::InList(_) => Type::Bool,
            Expr::UnaryOp(e) => match e.op {
                UnaryOp::Not => Type::Bool,
                UnaryOp::Negate => e.expr.infer_ty(),
            },
            Expr::Value(value) => value.infer_ty(),
            _ => Type::Unknown,
        }
    }

    /// Replaces every `Arg(position)` in the expression with `replacement`.
    pub fn substitute_arg(&mut self, position: usize, replacement: &Expr) {
        struct Substitute<'a> {
            position: usize,
            replacement: &'a Expr,
        }

        impl VisitMut for Substitute<'_> {
            fn visit_expr_mut(&mut self, i: &mut Expr) {
                match i {
                    Expr::Arg(arg) if arg.position == self.position => {
                        *i = self.replacement.clone();
                    }
                    _ => visit_mut::visit_expr_mut(self, i),
                }
            }
        }

        Substitute {
            position,
            replacement,
        }
        .visit_expr_mut(self);
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Value(value)
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Expr::Value(value.into())
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Expr::Value(value.into())
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::Value(value.into())
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Value(value.into())
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Expr::Value(value.into())
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Expr::Value(value.into())
    }
}

impl From<NaiveDate> for Expr {
    fn from(value: NaiveDate) -> Self {
        Expr::Value(value.into())
    }
}

impl From<NaiveDateTime> for Expr {
    fn from(value: NaiveDateTime) -> Self {
        Expr::Value(value.into())
    }
}

impl From<ValueEnum> for Expr {
    fn from(value: ValueEnum) -> Self {
        Expr::Value(value.into())
    }
}
