use adsql_core::stmt::{
    visit, visit_mut, Binding, ColumnDecl, Expr, ExprColumn, Projection, Select, VisitMut,
};

/// Declares every value a projector reads from the database as a column of
/// the projection's select, and rewrites the projector to read those columns.
///
/// Nested projections are handled first and keep their own selects.
pub(crate) fn project_columns(expr: &mut Expr) {
    ProjectColumns.visit_expr_mut(expr);
}

struct ProjectColumns;

impl VisitMut for ProjectColumns {
    fn visit_projection_mut(&mut self, i: &mut Projection) {
        visit_mut::visit_projection_mut(self, i);
        project(&mut i.select, &mut i.projector);
    }
}

fn project(select: &mut Select, expr: &mut Expr) {
    match expr {
        Expr::Entity(entity) => {
            if let Binding::Members(bindings) = &mut entity.binding {
                for binding in bindings {
                    project(select, &mut binding.expr);
                }
            }
        }
        Expr::Record(record) => {
            for field in &mut record.fields {
                project(select, &mut field.expr);
            }
        }
        Expr::List(list) => {
            for item in &mut list.items {
                project(select, item);
            }
        }
        // A composite read; its source binds the two backing columns
        Expr::Member(member) => project(select, &mut member.source),
        Expr::Projection(_) | Expr::Value(_) | Expr::Captured(_) | Expr::Arg(_) => {}
        expr if reads_row(expr) && is_server_evaluable(expr) => {
            *expr = declare_column(select, expr.take()).into();
        }
        // Evaluated on the client; project what it reads
        expr => visit_mut::visit_expr_mut(&mut Operands { select }, expr),
    }
}

struct Operands<'a> {
    select: &'a mut Select,
}

impl VisitMut for Operands<'_> {
    fn visit_expr_mut(&mut self, i: &mut Expr) {
        project(self.select, i);
    }
}

/// Declares `expr` as an output column of `select` and returns a reference to
/// the declared column. An expression that is already declared is reused.
///
/// A column keeps its own name unless it is taken; other expressions are
/// named `c0`, `c1`, ...
pub(crate) fn declare_column(select: &mut Select, expr: Expr) -> ExprColumn {
    let ty = expr.infer_ty();
    let sql_ty = match &expr {
        Expr::Column(column) => column.sql_ty,
        _ => None,
    };

    let name = match select.columns.iter().find(|decl| decl.expr == expr) {
        Some(decl) => decl.name.clone(),
        None => {
            let name = unique_name(select, &expr);
            select.columns.push(ColumnDecl {
                name: name.clone(),
                expr,
            });
            name
        }
    };

    let mut column = ExprColumn::new(select.alias, name, ty);
    column.sql_ty = sql_ty;
    column
}

fn unique_name(select: &Select, expr: &Expr) -> String {
    let taken = |name: &str| {
        select
            .columns
            .iter()
            .any(|decl| decl.name.eq_ignore_ascii_case(name))
    };

    match expr {
        Expr::Column(column) if !taken(&column.name) => column.name.clone(),
        Expr::Column(column) => (0..)
            .map(|n| format!("{}{n}", column.name))
            .find(|name| !taken(name))
            .unwrap_or_default(),
        _ => (0..)
            .map(|n| format!("c{n}"))
            .find(|name| !taken(name))
            .unwrap_or_default(),
    }
}

/// Returns `true` if evaluating `expr` reads the current row.
fn reads_row(expr: &Expr) -> bool {
    let mut ret = false;
    visit::for_each_expr(expr, |expr| {
        ret |= matches!(expr, Expr::Column(_) | Expr::Aggregate(_));
    });
    ret
}

/// Returns `true` if `expr` can be written as SQL.
fn is_server_evaluable(expr: &Expr) -> bool {
    let mut ret = true;
    visit::for_each_expr(expr, |expr| {
        ret &= !matches!(
            expr,
            Expr::Entity(_) | Expr::Member(_) | Expr::Projection(_) | Expr::Record(_) | Expr::List(_)
        );
    });
    ret
}
