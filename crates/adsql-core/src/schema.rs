mod builder;
pub use builder::{Builder, EntityDef, EnumDef, MemberDef, PolicyRow};

mod entity;
pub use entity::{Entity, EntityId};

mod enum_ty;
pub use enum_ty::{EnumId, EnumRepr, EnumTy, EnumVariant};

mod filter;
pub use filter::{AssociationFilter, AttributeFilter, FilterPrecedence};

mod member;
pub use member::{Association, ColumnMapping, CompositeField, Member, MemberId, MemberTy};

mod sql_type;
pub use sql_type::SqlType;

use crate::stmt::Expr;
use indexmap::IndexMap;

/// Immutable mapping metadata: entities, their members and the tables and
/// columns they are stored in.
///
/// Built once with [`Builder`] and shared read-only between translations.
#[derive(Debug, Clone)]
pub struct Schema {
    pub entities: Vec<Entity>,
    pub enums: Vec<EnumTy>,

    /// Programmatic association filters, keyed by association member. The
    /// predicate reads the related row as `Arg(0)`.
    policy_filters: IndexMap<MemberId, Expr>,

    filter_precedence: FilterPrecedence,
}

impl Schema {
    #[track_caller]
    pub fn entity(&self, id: EntityId) -> &Entity {
        &self.entities[id.0]
    }

    #[track_caller]
    pub fn member(&self, id: MemberId) -> &Member {
        &self.entity(id.entity).members[id.index]
    }

    #[track_caller]
    pub fn enum_ty(&self, id: EnumId) -> &EnumTy {
        &self.enums[id.0]
    }

    pub fn entity_by_name(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.name == name)
    }

    pub fn enum_by_name(&self, name: &str) -> Option<&EnumTy> {
        self.enums.iter().find(|enum_ty| enum_ty.name == name)
    }

    /// Returns the composite descriptor if `member` is a composite field.
    pub fn composite(&self, member: MemberId) -> Option<&CompositeField> {
        match &self.member(member).ty {
            MemberTy::Composite(composite) => Some(composite),
            _ => None,
        }
    }

    pub fn association(&self, member: MemberId) -> Option<&Association> {
        match &self.member(member).ty {
            MemberTy::Association(association) => Some(association),
            _ => None,
        }
    }

    /// Returns `true` if the enum is stored as a single character code.
    pub fn is_char_enum(&self, id: EnumId) -> bool {
        self.enum_ty(id).repr == EnumRepr::Char
    }

    /// The filter folded into the join of an association member.
    ///
    /// A policy filter takes precedence over an attribute filter. Schemas
    /// built with [`FilterPrecedence::Reject`] never hold both.
    pub fn association_filter(&self, member: MemberId) -> Option<AssociationFilter<'_>> {
        if let Some(predicate) = self.policy_filters.get(&member) {
            return Some(AssociationFilter::Policy(predicate));
        }

        self.association(member)?
            .filter
            .as_ref()
            .map(AssociationFilter::Attribute)
    }

    pub fn filter_precedence(&self) -> FilterPrecedence {
        self.filter_precedence
    }
}
