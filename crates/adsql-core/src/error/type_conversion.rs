use super::Error;
use crate::stmt::Value;

/// Error when a raw value read from a column cannot be converted to the
/// member's type.
#[derive(Debug)]
pub(super) struct TypeConversionError {
    column: Box<str>,
    target: Box<str>,
    raw: Value,
}

impl std::error::Error for TypeConversionError {}

impl core::fmt::Display for TypeConversionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "cannot convert column `{}` value {} to {}",
            self.column, self.raw, self.target
        )
    }
}

impl Error {
    /// Creates a type conversion error naming the column, the target type,
    /// and the raw value that failed to convert.
    pub fn type_conversion(
        column: impl Into<String>,
        target: impl Into<String>,
        raw: Value,
    ) -> Error {
        Error::from(super::ErrorKind::TypeConversion(TypeConversionError {
            column: column.into().into(),
            target: target.into().into(),
            raw,
        }))
    }

    /// Returns `true` if this error is a type conversion error.
    pub fn is_type_conversion(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TypeConversion(_))
    }
}
