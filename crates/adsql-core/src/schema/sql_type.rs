use std::fmt;

/// Storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SqlType {
    /// Fixed-width, blank-padded characters.
    Char(u32),
    VarChar(u32),
    Memo,
    Integer,
    Double,
    Numeric(u8, u8),
    Date,
    Timestamp,
    Logical,
}

impl SqlType {
    pub fn is_character(self) -> bool {
        matches!(self, SqlType::Char(_) | SqlType::VarChar(_) | SqlType::Memo)
    }

    pub fn is_date_like(self) -> bool {
        matches!(self, SqlType::Date | SqlType::Timestamp)
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlType::Char(n) => write!(f, "Char({n})"),
            SqlType::VarChar(n) => write!(f, "VarChar({n})"),
            SqlType::Memo => f.write_str("Memo"),
            SqlType::Integer => f.write_str("Integer"),
            SqlType::Double => f.write_str("Double"),
            SqlType::Numeric(p, s) => write!(f, "Numeric({p}, {s})"),
            SqlType::Date => f.write_str("Date"),
            SqlType::Timestamp => f.write_str("Timestamp"),
            SqlType::Logical => f.write_str("Logical"),
        }
    }
}
