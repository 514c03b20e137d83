#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumId(pub usize);

/// How enum values are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumRepr {
    /// As a single character whose code point is the variant code.
    Char,

    /// As the variant name.
    Name,
}

#[derive(Debug, Clone)]
pub struct EnumTy {
    pub id: EnumId,
    pub name: String,
    pub repr: EnumRepr,
    pub variants: Vec<EnumVariant>,

    /// Code read back from a blank column.
    pub default_code: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumVariant {
    pub name: String,
    pub code: i32,
}

impl EnumTy {
    pub fn variant_by_code(&self, code: i32) -> Option<&EnumVariant> {
        self.variants.iter().find(|variant| variant.code == code)
    }

    pub fn variant_by_name(&self, name: &str) -> Option<&EnumVariant> {
        self.variants.iter().find(|variant| variant.name == name)
    }
}
