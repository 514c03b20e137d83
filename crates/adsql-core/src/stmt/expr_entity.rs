use super::{Expr, TableAlias};
use crate::schema::{EntityId, MemberId};

/// Describes how to materialize one entity from a row.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprEntity {
    pub entity: EntityId,
    pub binding: Binding,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// Every mapped member is read from the table with this alias.
    Table(TableAlias),

    /// Each member is read from its own expression.
    Members(Vec<MemberBinding>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberBinding {
    pub member: MemberId,
    pub expr: Expr,
}

impl Expr {
    /// An entity whose members are read from the table with the given alias.
    pub fn entity(entity: EntityId, alias: TableAlias) -> Expr {
        ExprEntity {
            entity,
            binding: Binding::Table(alias),
        }
        .into()
    }

    pub fn is_entity(&self) -> bool {
        matches!(self, Expr::Entity(_))
    }
}

impl ExprEntity {
    /// The expression bound to `member`, when the binding lists members.
    pub fn member_binding(&self, member: MemberId) -> Option<&Expr> {
        match &self.binding {
            Binding::Members(bindings) => bindings
                .iter()
                .find(|binding| binding.member == member)
                .map(|binding| &binding.expr),
            Binding::Table(_) => None,
        }
    }
}

impl From<ExprEntity> for Expr {
    fn from(value: ExprEntity) -> Self {
        Expr::Entity(value)
    }
}
