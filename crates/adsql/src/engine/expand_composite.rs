use super::column_expr;

use adsql_core::{
    schema::MemberId,
    stmt::{visit_mut, Binding, Expr, ExprEntity, MemberBinding, VisitMut},
    Schema,
};

/// Narrows the source of every composite member access down to the two
/// members it is built from.
///
/// After columnization a composite access reads `Member(Entity { .. }, field)`
/// where the entity binds all of its columns. Only the date and time bindings
/// are kept so that just those two columns are projected.
pub(crate) fn expand_composite(schema: &Schema, expr: &mut Expr) {
    ExpandComposite { schema }.visit_expr_mut(expr);
}

struct ExpandComposite<'a> {
    schema: &'a Schema,
}

impl VisitMut for ExpandComposite<'_> {
    fn visit_expr_mut(&mut self, i: &mut Expr) {
        visit_mut::visit_expr_mut(self, i);

        let Expr::Member(member) = i else {
            return;
        };

        let Some(composite) = self.schema.composite(member.member) else {
            return;
        };

        let source = {
            let Expr::Entity(entity) = member.source.unwrap_convert() else {
                return;
            };

            let (Some(date), Some(time)) = (
                self.binding(entity, composite.date),
                self.binding(entity, composite.time),
            ) else {
                return;
            };

            ExprEntity {
                entity: entity.entity,
                binding: Binding::Members(vec![
                    MemberBinding {
                        member: composite.date,
                        expr: date,
                    },
                    MemberBinding {
                        member: composite.time,
                        expr: time,
                    },
                ]),
            }
        };

        tracing::trace!(
            member = %self.schema.member(member.member).name,
            "expanding composite member"
        );

        *member.source = source.into();
    }
}

impl ExpandComposite<'_> {
    fn binding(&self, entity: &ExprEntity, member: MemberId) -> Option<Expr> {
        match &entity.binding {
            Binding::Members(_) => entity.member_binding(member).cloned(),
            Binding::Table(alias) => self
                .schema
                .member(member)
                .column()
                .map(|column| column_expr(*alias, column)),
        }
    }
}
