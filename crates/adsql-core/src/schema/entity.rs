use super::{Member, MemberTy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub usize);

#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,

    /// Name of the table the entity is stored in.
    pub table: String,

    pub members: Vec<Member>,
}

impl Entity {
    pub fn member_by_name(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|member| member.name == name)
    }

    /// Members stored in a column of the entity's table, in declaration order.
    pub fn column_members(&self) -> impl Iterator<Item = &Member> + '_ {
        self.members
            .iter()
            .filter(|member| matches!(member.ty, MemberTy::Column(_)))
    }

    /// The member stored in the column named `column`.
    pub fn member_by_column(&self, column: &str) -> Option<&Member> {
        self.column_members().find(|member| {
            member
                .column()
                .is_some_and(|mapping| mapping.name.eq_ignore_ascii_case(column))
        })
    }

    pub fn primary_key(&self) -> impl Iterator<Item = &Member> + '_ {
        self.members.iter().filter(|member| member.primary_key)
    }
}
