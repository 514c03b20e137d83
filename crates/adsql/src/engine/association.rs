use super::{
    column_expr,
    columnize::{Columnize, PendingJoin},
    rewrite_composite,
};

use adsql_core::{
    schema::{Association, AssociationFilter, Member},
    stmt::{
        Aggregator, Expr, ExprTable, Projection, Select, TableAlias, Value, VisitMut,
    },
    Error, Result,
};

impl Columnize<'_> {
    /// Resolves navigation of `member` from `source`.
    ///
    /// The join condition equates the key columns pairwise and, when the
    /// association is filtered, ANDs in the filter. A policy filter wins over
    /// an attribute filter.
    ///
    /// A to-one association is joined (left outer) into the enclosing select
    /// and evaluates to the related entity. A to-many association evaluates
    /// to a nested projection over the related table.
    pub(super) fn resolve_association(
        &mut self,
        source: &Expr,
        member: &Member,
        association: &Association,
    ) -> Result<Expr> {
        let schema = self.schema;
        let target = schema.entity(association.target);
        let alias = self.aliases.next();

        let mut conditions = Vec::with_capacity(association.source_keys.len() + 1);

        for (source_key, target_key) in association
            .source_keys
            .iter()
            .zip(&association.target_keys)
        {
            let source_column = self.column_of(source, schema.member(*source_key))?;
            let target_column = self.key_column(alias, schema.member(*target_key))?;
            conditions.push(Expr::eq(target_column, source_column));
        }

        if let Some(filter) = self.association_filter(member, association, alias)? {
            conditions.push(filter);
        }

        let on = Expr::and_all(conditions).ok_or_else(|| {
            Error::invalid_schema(format!(
                "association `{}.{}` has no key columns",
                schema.entity(member.id.entity).name,
                member.name
            ))
        })?;

        let table = ExprTable {
            alias,
            entity: target.id,
            name: target.table.clone(),
        };

        tracing::trace!(
            association = %member.name,
            target = %target.name,
            %alias,
            many = association.many,
            "resolved association"
        );

        if association.many {
            let mut select = Select::new(self.aliases.next(), table);
            select.filter = Some(on);

            let mut projection = Projection {
                select,
                projector: Expr::entity(target.id, alias),
                aggregator: Some(Aggregator::List),
            };
            self.visit_projection_mut(&mut projection);

            Ok(projection.into())
        } else {
            self.push_join(PendingJoin { table, on })?;
            Ok(self.expand_entity(target.id, alias))
        }
    }

    fn key_column(&self, alias: TableAlias, member: &Member) -> Result<Expr> {
        self.column_of(&Expr::entity(member.id.entity, alias), member)
    }

    /// The filter condition for an association joined under `alias`.
    fn association_filter(
        &mut self,
        member: &Member,
        association: &Association,
        alias: TableAlias,
    ) -> Result<Option<Expr>> {
        let schema = self.schema;

        match schema.association_filter(member.id) {
            Some(AssociationFilter::Policy(predicate)) => {
                let mut predicate = predicate.clone();
                predicate.substitute_arg(0, &Expr::entity(association.target, alias));

                // The predicate joins the tree after the composite passes ran
                rewrite_composite(schema, &mut predicate)?;

                // Resolve the related row's members against the join alias
                self.visit_expr_mut(&mut predicate);

                Ok(Some(predicate))
            }
            Some(AssociationFilter::Attribute(filter)) => {
                let target = schema.entity(association.target);
                let column = target
                    .member_by_column(&filter.column)
                    .and_then(Member::column)
                    .map(|column| column_expr(alias, column))
                    .ok_or_else(|| Error::unresolved_member(&target.name, &filter.column))?;

                Ok(Some(Expr::eq(column, Value::String(filter.value.clone()))))
            }
            None => Ok(None),
        }
    }
}
