use super::Error;

/// Error when a member access cannot be traced to a column or to a binding of
/// the entity it is read from.
#[derive(Debug)]
pub(super) struct UnresolvedMember {
    entity: Box<str>,
    member: Box<str>,
}

impl std::error::Error for UnresolvedMember {}

impl core::fmt::Display for UnresolvedMember {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unresolved member `{}.{}`", self.entity, self.member)
    }
}

impl Error {
    /// Creates an unresolved member error for `entity.member`.
    pub fn unresolved_member(entity: impl Into<String>, member: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnresolvedMember(UnresolvedMember {
            entity: entity.into().into(),
            member: member.into().into(),
        }))
    }

    /// Returns `true` if this error is an unresolved member error.
    pub fn is_unresolved_member(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnresolvedMember(_))
    }
}
