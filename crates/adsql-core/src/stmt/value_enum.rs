use crate::schema::EnumId;

/// An enum member, identified by its underlying integer code.
///
/// For char-backed enums the code is the character's code point, so `'D'` is
/// stored as 68.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueEnum {
    pub ty: EnumId,
    pub code: i32,
}

impl ValueEnum {
    pub fn new(ty: EnumId, code: i32) -> ValueEnum {
        ValueEnum { ty, code }
    }

    /// The code as a character, if it is a valid code point.
    pub fn as_char(&self) -> Option<char> {
        u32::try_from(self.code).ok().and_then(char::from_u32)
    }
}
