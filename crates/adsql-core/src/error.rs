mod adhoc;
mod ambiguous_filter_source;
mod invalid_schema;
mod type_conversion;
mod unresolved_member;
mod unsupported_operation;

use adhoc::AdhocError;
use ambiguous_filter_source::AmbiguousFilterSource;
use invalid_schema::InvalidSchema;
use std::sync::Arc;
use type_conversion::TypeConversionError;
use unresolved_member::UnresolvedMember;
use unsupported_operation::UnsupportedOperation;

/// Returns early with an ad-hoc [`Error`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Creates an ad-hoc [`Error`] from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error raised while building metadata, translating a query, or coercing
/// a value read from a row.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context
    /// is shown first, followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let kind = match consequent.inner {
            Some(inner) => match Arc::try_unwrap(inner) {
                Ok(inner) => inner.kind,
                // Shared consequents keep their message but not their cause.
                Err(shared) => ErrorKind::Adhoc(AdhocError::new(shared.kind.to_string())),
            },
            None => ErrorKind::Unknown,
        };

        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(self),
            })),
        }
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }

    /// Returns the innermost error of the context chain.
    pub fn root(&self) -> &Error {
        let mut root = self;
        for err in self.chain() {
            root = err;
        }
        root
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    AmbiguousFilterSource(AmbiguousFilterSource),
    InvalidSchema(InvalidSchema),
    TypeConversion(TypeConversionError),
    UnresolvedMember(UnresolvedMember),
    UnsupportedOperation(UnsupportedOperation),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            AmbiguousFilterSource(err) => core::fmt::Display::fmt(err, f),
            InvalidSchema(err) => core::fmt::Display::fmt(err, f),
            TypeConversion(err) => core::fmt::Display::fmt(err, f),
            UnresolvedMember(err) => core::fmt::Display::fmt(err, f),
            UnsupportedOperation(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown adsql error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

impl From<chrono::ParseError> for Error {
    fn from(err: chrono::ParseError) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_size() {
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn error_from_args() {
        let err = Error::from_args(format_args!("bad alias: {}", 3));
        assert_eq!(err.to_string(), "bad alias: 3");
    }

    #[test]
    fn error_chain_display() {
        let err = Error::unresolved_member("Order", "Shipper")
            .context(err!("columnizing select t1"))
            .context(err!("translating query"));

        assert_eq!(
            err.to_string(),
            "translating query: columnizing select t1: unresolved member `Order.Shipper`"
        );
        assert!(err.root().is_unresolved_member());
        assert!(!err.is_unresolved_member());
    }

    #[test]
    fn anyhow_bridge() {
        let our_err: Error = anyhow::anyhow!("driver went away").into();
        assert_eq!(our_err.to_string(), "driver went away");
    }

    #[test]
    fn chrono_bridge() {
        let parse_err = chrono::NaiveTime::parse_from_str("25:99", "%H:%M").unwrap_err();
        let our_err: Error = parse_err.into();
        assert!(!our_err.to_string().is_empty());
    }

    #[test]
    fn unsupported_operation_error() {
        let err = Error::unsupported_operation("`>` against null on composite `Stamp`");
        assert_eq!(
            err.to_string(),
            "unsupported operation: `>` against null on composite `Stamp`"
        );
        assert!(err.is_unsupported_operation());
        assert!(!err.is_type_conversion());
    }

    #[test]
    fn type_conversion_error() {
        let err = Error::type_conversion("STATUS", "enum Status", crate::stmt::Value::from("Q"));
        assert_eq!(
            err.to_string(),
            "cannot convert column `STATUS` value 'Q' to enum Status"
        );
        assert!(err.is_type_conversion());
    }

    #[test]
    fn ambiguous_filter_source_error() {
        let err = Error::ambiguous_filter_source("Order", "CustomerInLondon");
        assert_eq!(
            err.to_string(),
            "association `Order.CustomerInLondon` has both a policy filter and an attribute filter"
        );
        assert!(err.is_ambiguous_filter_source());
    }

    #[test]
    fn invalid_schema_error() {
        let err = Error::invalid_schema("entity `Order` is declared twice");
        assert_eq!(
            err.to_string(),
            "invalid schema: entity `Order` is declared twice"
        );
        assert!(err.is_invalid_schema());
    }
}
