use super::{DateMethod, Expr, Method, NumMethod, StrMethod, Type};

/// A method call. `object` is the receiver for instance methods and `None`
/// for static ones.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprCall {
    pub method: Method,
    pub object: Option<Box<Expr>>,
    pub args: Vec<Expr>,
}

impl Expr {
    /// Instance call, `object.method(args)`.
    pub fn call(
        object: impl Into<Expr>,
        method: impl Into<Method>,
        args: impl IntoIterator<Item = Expr>,
    ) -> Expr {
        ExprCall {
            method: method.into(),
            object: Some(Box::new(object.into())),
            args: args.into_iter().collect(),
        }
        .into()
    }

    /// Static call, `method(args)`.
    pub fn call_static(method: impl Into<Method>, args: impl IntoIterator<Item = Expr>) -> Expr {
        ExprCall {
            method: method.into(),
            object: None,
            args: args.into_iter().collect(),
        }
        .into()
    }
}

impl ExprCall {
    pub fn infer_ty(&self) -> Type {
        match self.method {
            Method::Str(StrMethod::Length | StrMethod::IndexOf) => Type::I32,
            Method::Str(
                StrMethod::StartsWith
                | StrMethod::EndsWith
                | StrMethod::Contains
                | StrMethod::IsNullOrEmpty,
            ) => Type::Bool,
            Method::Str(_) | Method::ToString => Type::String,
            Method::Date(DateMethod::Part(_)) => Type::I32,
            Method::Date(DateMethod::Subtract) => Type::I64,
            Method::Date(_) => Type::DateTime,
            Method::Num(NumMethod::Sign) => Type::I32,
            Method::Num(_) => self
                .object
                .as_deref()
                .or(self.args.first())
                .map(Expr::infer_ty)
                .unwrap_or(Type::F64),
            Method::Compare | Method::CompareTo => Type::I32,
            Method::ParseNumber => Type::F64,
        }
    }
}

impl From<ExprCall> for Expr {
    fn from(value: ExprCall) -> Self {
        Expr::Call(value)
    }
}
