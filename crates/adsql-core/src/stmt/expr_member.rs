use super::Expr;
use crate::schema::MemberId;

/// Access to `member` of the entity `source` evaluates to.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprMember {
    pub source: Box<Expr>,
    pub member: MemberId,
}

impl Expr {
    pub fn member(source: impl Into<Expr>, member: MemberId) -> Expr {
        ExprMember {
            source: Box::new(source.into()),
            member,
        }
        .into()
    }

    pub fn as_member(&self) -> Option<&ExprMember> {
        match self {
            Expr::Member(member) => Some(member),
            _ => None,
        }
    }
}

impl From<ExprMember> for Expr {
    fn from(value: ExprMember) -> Self {
        Expr::Member(value)
    }
}
