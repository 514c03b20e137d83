use super::{column_expr, AliasGen};

use adsql_core::{
    schema::{EntityId, Member, MemberTy},
    stmt::{
        visit_mut, Binding, Expr, ExprEntity, ExprMember, ExprTable, Join, JoinKind,
        MemberBinding, Projection, Select, TableAlias, VisitMut,
    },
    Error, Result, Schema,
};

/// Resolves entity and member references to physical columns.
///
/// * Entities bound to a table alias are expanded to one binding per column
///   member.
/// * Column members become column references.
/// * Composite members are left for [`expand_composite`](super::expand_composite).
/// * Associations are resolved to joins (to-one) or nested projections
///   (to-many).
pub(crate) fn columnize(schema: &Schema, aliases: &mut AliasGen, expr: &mut Expr) -> Result<()> {
    let mut pass = Columnize {
        schema,
        aliases,
        scopes: vec![],
        error: None,
    };
    pass.visit_expr_mut(expr);

    match pass.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

pub(super) struct Columnize<'a> {
    pub(super) schema: &'a Schema,

    pub(super) aliases: &'a mut AliasGen,

    /// Joins discovered in each enclosing select, innermost last. They are
    /// folded into the select's source once it has been walked.
    pub(super) scopes: Vec<Vec<PendingJoin>>,

    error: Option<Error>,
}

pub(super) struct PendingJoin {
    pub(super) table: ExprTable,
    pub(super) on: Expr,
}

impl VisitMut for Columnize<'_> {
    fn visit_expr_mut(&mut self, i: &mut Expr) {
        if self.error.is_some() {
            return;
        }

        visit_mut::visit_expr_mut(self, i);

        let resolved = match i {
            Expr::Entity(ExprEntity {
                entity,
                binding: Binding::Table(alias),
            }) => Ok(Some(self.expand_entity(*entity, *alias))),
            Expr::Member(member) => self.resolve_member(member),
            _ => Ok(None),
        };

        match resolved {
            Ok(Some(expr)) => *i = expr,
            Ok(None) => {}
            Err(err) => self.error = Some(err),
        }
    }

    fn visit_projection_mut(&mut self, i: &mut Projection) {
        self.scopes.push(vec![]);
        visit_mut::visit_select_mut(self, &mut i.select);
        self.visit_expr_mut(&mut i.projector);
        self.fold_joins(&mut i.select);
    }

    fn visit_select_mut(&mut self, i: &mut Select) {
        self.scopes.push(vec![]);
        visit_mut::visit_select_mut(self, i);
        self.fold_joins(i);
    }
}

impl Columnize<'_> {
    /// Binds every column member of `entity` to its column under `alias`.
    pub(super) fn expand_entity(&self, entity: EntityId, alias: TableAlias) -> Expr {
        let bindings = self
            .schema
            .entity(entity)
            .members
            .iter()
            .filter_map(|member| {
                member.column().map(|column| MemberBinding {
                    member: member.id,
                    expr: column_expr(alias, column),
                })
            })
            .collect();

        ExprEntity {
            entity,
            binding: Binding::Members(bindings),
        }
        .into()
    }

    fn resolve_member(&mut self, expr: &ExprMember) -> Result<Option<Expr>> {
        let schema = self.schema;
        let member = schema.member(expr.member);

        match &member.ty {
            MemberTy::Column(_) => self.column_of(&expr.source, member).map(Some),
            MemberTy::Composite(_) => Ok(None),
            MemberTy::Association(association) => self
                .resolve_association(&expr.source, member, association)
                .map(Some),
        }
    }

    /// The expression that reads the column member `member` of `source`.
    pub(super) fn column_of(&self, source: &Expr, member: &Member) -> Result<Expr> {
        let unresolved = || {
            let entity = self.schema.entity(member.id.entity);
            Error::unresolved_member(&entity.name, &member.name)
        };

        let column = member.column().ok_or_else(unresolved)?;

        match source.unwrap_convert() {
            Expr::Entity(entity) => match &entity.binding {
                Binding::Table(alias) => Ok(column_expr(*alias, column)),
                Binding::Members(_) => entity
                    .member_binding(member.id)
                    .cloned()
                    .ok_or_else(unresolved),
            },
            Expr::Table(table) => Ok(column_expr(table.alias, column)),
            _ => Err(unresolved()),
        }
    }

    /// Queues a join in the innermost select.
    pub(super) fn push_join(&mut self, join: PendingJoin) -> Result<()> {
        match self.scopes.last_mut() {
            Some(scope) => {
                scope.push(join);
                Ok(())
            }
            None => Err(Error::unsupported_operation(
                "association navigation outside of a select",
            )),
        }
    }

    fn fold_joins(&mut self, select: &mut Select) {
        let joins = self.scopes.pop().unwrap_or_default();

        for join in joins {
            let Some(left) = select.from.take() else {
                self.error = Some(Error::unsupported_operation(
                    "cannot join an association into a select without a source",
                ));
                return;
            };

            tracing::trace!(table = %join.table.name, alias = %join.table.alias, "folding association join");

            select.from = Some(Expr::Join(Box::new(Join {
                kind: JoinKind::LeftOuter,
                left,
                right: join.table.into(),
                on: Some(join.on),
            })));
        }
    }
}
