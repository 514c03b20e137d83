use super::Error;

/// Error when an association member has both a programmatic policy filter and
/// a static attribute filter, and the schema was built to reject that.
#[derive(Debug)]
pub(super) struct AmbiguousFilterSource {
    entity: Box<str>,
    member: Box<str>,
}

impl std::error::Error for AmbiguousFilterSource {}

impl core::fmt::Display for AmbiguousFilterSource {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "association `{}.{}` has both a policy filter and an attribute filter",
            self.entity, self.member
        )
    }
}

impl Error {
    /// Creates an ambiguous filter source error for `entity.member`.
    pub fn ambiguous_filter_source(entity: impl Into<String>, member: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::AmbiguousFilterSource(
            AmbiguousFilterSource {
                entity: entity.into().into(),
                member: member.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an ambiguous filter source error.
    pub fn is_ambiguous_filter_source(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::AmbiguousFilterSource(_))
    }
}
