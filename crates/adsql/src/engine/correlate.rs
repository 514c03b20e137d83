use super::project_columns::declare_column;

use adsql_core::stmt::{
    visit, visit_mut, Expr, ExprColumn, Projection, Select, TableAlias, VisitMut,
};
use std::collections::HashSet;

/// A nested projection split out of its parent, ready to be translated as a
/// command of its own.
pub(crate) struct Child {
    pub(crate) projection: Projection,

    /// Names of the parent's output columns the child reads, in argument
    /// order.
    pub(crate) outer_columns: Vec<String>,
}

/// Splits the nested projections out of `projection`'s projector, in the
/// order they appear.
///
/// Columns a nested projection reads from the parent's relations become
/// positional arguments. Each of those columns is declared as an output
/// column of the parent so the value can be passed in when the child runs.
pub(crate) fn correlate(projection: &mut Projection) -> Vec<Child> {
    let mut split = Split {
        parent: projection.select.alias,
        select: &mut projection.select,
        children: vec![],
    };
    split.visit_expr_mut(&mut projection.projector);
    split.children
}

struct Split<'a> {
    parent: TableAlias,
    select: &'a mut Select,
    children: Vec<Child>,
}

impl VisitMut for Split<'_> {
    fn visit_projection_mut(&mut self, i: &mut Projection) {
        let defined = defined_aliases(i);
        let mut outer = vec![];

        let mut replace = ReplaceOuter {
            defined: &defined,
            outer: &mut outer,
        };
        replace.visit_select_mut(&mut i.select);

        let outer_columns = outer
            .into_iter()
            .map(|column| declare_column(self.select, column.into()).name)
            .collect();

        tracing::trace!(parent = %self.parent, child = %i.select.alias, "split child command");

        self.children.push(Child {
            projection: i.clone(),
            outer_columns,
        });
    }
}

/// Every alias introduced inside `projection`.
fn defined_aliases(projection: &Projection) -> HashSet<TableAlias> {
    let mut defined = HashSet::from([projection.select.alias]);

    let mut collect = |expr: &Expr| match expr {
        Expr::Table(table) => {
            defined.insert(table.alias);
        }
        Expr::Select(select) => {
            defined.insert(select.alias);
        }
        Expr::Projection(projection) => {
            defined.insert(projection.select.alias);
        }
        _ => {}
    };

    if let Some(from) = &projection.select.from {
        visit::for_each_expr(from, &mut collect);
    }
    if let Some(filter) = &projection.select.filter {
        visit::for_each_expr(filter, &mut collect);
    }
    visit::for_each_expr(&projection.projector, &mut collect);

    defined
}

/// Replaces columns of relations not defined in the child with arguments.
struct ReplaceOuter<'a> {
    defined: &'a HashSet<TableAlias>,
    outer: &'a mut Vec<ExprColumn>,
}

impl VisitMut for ReplaceOuter<'_> {
    fn visit_expr_mut(&mut self, i: &mut Expr) {
        match i {
            Expr::Column(column) if !self.defined.contains(&column.alias) => {
                let position = match self.outer.iter().position(|outer| outer == column) {
                    Some(position) => position,
                    None => {
                        self.outer.push(column.clone());
                        self.outer.len() - 1
                    }
                };
                *i = Expr::arg(position);
            }
            _ => visit_mut::visit_expr_mut(self, i),
        }
    }
}
