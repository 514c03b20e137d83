use super::{AttributeFilter, EntityId, SqlType};
use crate::stmt::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberId {
    pub entity: EntityId,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub ty: MemberTy,
    pub nullable: bool,
    pub primary_key: bool,
}

#[derive(Debug, Clone)]
pub enum MemberTy {
    /// Stored in a column of the entity's table.
    Column(ColumnMapping),

    /// Virtual datetime combined from a date column and a time column.
    Composite(CompositeField),

    /// Navigation to another entity.
    Association(Association),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMapping {
    pub name: String,
    pub ty: Type,
    pub sql_ty: SqlType,
}

/// A virtual datetime backed by two members of the same entity: a date column
/// and a time-of-day column stored as fixed-width `HH:mm` text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeField {
    pub date: MemberId,
    pub time: MemberId,
}

#[derive(Debug, Clone)]
pub struct Association {
    pub target: EntityId,

    /// Key members on the declaring entity.
    pub source_keys: Vec<MemberId>,

    /// Key members on the target entity, pairwise equal to `source_keys`.
    pub target_keys: Vec<MemberId>,

    /// `true` for a to-many association.
    pub many: bool,

    /// Static `column = 'value'` filter on the target table.
    pub filter: Option<AttributeFilter>,
}

impl Member {
    pub fn column(&self) -> Option<&ColumnMapping> {
        match &self.ty {
            MemberTy::Column(column) => Some(column),
            _ => None,
        }
    }

    pub fn is_column(&self) -> bool {
        matches!(self.ty, MemberTy::Column(_))
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.ty, MemberTy::Composite(_))
    }

    pub fn is_association(&self) -> bool {
        matches!(self.ty, MemberTy::Association(_))
    }
}
