use adsql_core::stmt::{visit, Binding, Expr, TableAlias};

/// Hands out table aliases that do not collide with any alias already used in
/// an expression tree.
#[derive(Debug)]
pub(crate) struct AliasGen {
    next: usize,
}

impl AliasGen {
    /// An allocator whose first alias follows every alias used in `expr`.
    pub(crate) fn after(expr: &Expr) -> AliasGen {
        let mut max = None;

        visit::for_each_expr(expr, |expr| {
            let alias = match expr {
                Expr::Table(table) => table.alias,
                Expr::Select(select) => select.alias,
                Expr::Projection(projection) => projection.select.alias,
                Expr::Column(column) => column.alias,
                Expr::Entity(entity) => match entity.binding {
                    Binding::Table(alias) => alias,
                    Binding::Members(_) => return,
                },
                _ => return,
            };
            max = max.max(Some(alias.0));
        });

        AliasGen {
            next: max.map_or(0, |max| max + 1),
        }
    }

    pub(crate) fn next(&mut self) -> TableAlias {
        let alias = TableAlias(self.next);
        self.next += 1;
        alias
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adsql_core::{schema::EntityId, stmt::ExprTable};

    #[test]
    fn starts_after_largest_alias() {
        let expr = Expr::Table(ExprTable {
            alias: TableAlias(4),
            entity: EntityId(0),
            name: "T".into(),
        });

        let mut aliases = AliasGen::after(&expr);
        assert_eq!(aliases.next(), TableAlias(5));
        assert_eq!(aliases.next(), TableAlias(6));
    }

    #[test]
    fn starts_at_zero_without_aliases() {
        let mut aliases = AliasGen::after(&Expr::from(1));
        assert_eq!(aliases.next(), TableAlias(0));
    }
}
