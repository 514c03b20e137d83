use crate::schema::{EntityId, EnumId};
use std::fmt;

/// The value-level type of an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Bool,
    Date,
    DateTime,
    Enum(EnumId),
    Entity(EntityId),
    F64,
    I32,
    I64,
    List(Box<Type>),
    Null,
    Record(Vec<Type>),
    String,

    /// The type could not be determined from the expression alone.
    Unknown,
}

impl Type {
    pub fn is_string(&self) -> bool {
        matches!(self, Type::String)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::I32 | Type::I64 | Type::F64)
    }

    pub fn is_date_like(&self) -> bool {
        matches!(self, Type::Date | Type::DateTime)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => f.write_str("bool"),
            Type::Date => f.write_str("date"),
            Type::DateTime => f.write_str("datetime"),
            Type::Enum(id) => write!(f, "enum #{}", id.0),
            Type::Entity(id) => write!(f, "entity #{}", id.0),
            Type::F64 => f.write_str("f64"),
            Type::I32 => f.write_str("i32"),
            Type::I64 => f.write_str("i64"),
            Type::List(item) => write!(f, "list<{item}>"),
            Type::Null => f.write_str("null"),
            Type::Record(fields) => {
                f.write_str("(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{field}")?;
                }
                f.write_str(")")
            }
            Type::String => f.write_str("string"),
            Type::Unknown => f.write_str("unknown"),
        }
    }
}
