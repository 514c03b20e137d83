use super::{member_id, test_schema};
use crate::{
    engine::{columnize::columnize, expand_composite::expand_composite, AliasGen},
    Query,
};

use adsql_core::{
    schema::SqlType,
    stmt::{Binding, Expr, ExprColumn, Projection, TableAlias, Type},
    Schema,
};

fn columnized(schema: &Schema, mut expr: Expr) -> Projection {
    let mut aliases = AliasGen::after(&expr);
    columnize(schema, &mut aliases, &mut expr).unwrap();

    match expr {
        Expr::Projection(projection) => *projection,
        expr => panic!("expected projection, got {expr:?}"),
    }
}

fn column(alias: usize, name: &str, ty: Type, sql_ty: SqlType) -> Expr {
    ExprColumn::new(TableAlias(alias), name, ty)
        .with_sql_ty(sql_ty)
        .into()
}

#[test]
fn member_becomes_column() {
    let schema = test_schema();

    let query = Query::new(&schema, "Event")
        .unwrap()
        .filter(|e| Ok(Expr::eq(e.member("Name")?, "Launch")))
        .unwrap();

    let projection = columnized(&schema, query.into_expr());

    assert_eq!(
        projection.select.filter,
        Some(Expr::eq(
            column(0, "Name", Type::String, SqlType::Char(20)),
            "Launch"
        ))
    );
}

#[test]
fn entity_binds_column_members_only() {
    let schema = test_schema();

    let projection = columnized(&schema, Query::new(&schema, "Event").unwrap().into_expr());

    let Expr::Entity(entity) = &projection.projector else {
        panic!("expected entity, got {:?}", projection.projector);
    };
    let Binding::Members(bindings) = &entity.binding else {
        panic!("expected member bindings");
    };

    let columns: Vec<_> = bindings
        .iter()
        .map(|binding| match &binding.expr {
            Expr::Column(column) => column.name.as_str(),
            expr => panic!("expected column, got {expr:?}"),
        })
        .collect();

    assert_eq!(
        columns,
        ["Id", "Name", "StartDate", "StartTime", "EndDate", "EndTime"]
    );
}

#[test]
fn composite_read_keeps_only_its_columns() {
    let schema = test_schema();

    let query = Query::new(&schema, "Event")
        .unwrap()
        .select(|e| e.member("Start"))
        .unwrap();

    let mut projection = columnized(&schema, query.into_expr());

    // Still a member access after columnization
    assert!(matches!(projection.projector, Expr::Member(_)));

    expand_composite(&schema, &mut projection.projector);

    let Expr::Member(member) = &projection.projector else {
        panic!("expected member, got {:?}", projection.projector);
    };
    let Expr::Entity(entity) = &*member.source else {
        panic!("expected entity source");
    };

    assert_eq!(
        entity.member_binding(member_id(&schema, "Event", "StartDate")),
        Some(&column(0, "StartDate", Type::Date, SqlType::Date))
    );
    assert_eq!(
        entity.member_binding(member_id(&schema, "Event", "StartTime")),
        Some(&column(0, "StartTime", Type::String, SqlType::Char(5)))
    );
    assert_eq!(
        entity.member_binding(member_id(&schema, "Event", "Name")),
        None
    );
}

#[test]
fn member_of_unbound_source_is_unresolved() {
    let schema = test_schema();
    let name = member_id(&schema, "Event", "Name");

    let query = Query::new(&schema, "Event")
        .unwrap()
        .filter(|_| Ok(Expr::eq(Expr::member(Expr::arg(0), name), "x")))
        .unwrap();

    let mut expr = query.into_expr();
    let mut aliases = AliasGen::after(&expr);
    let err = columnize(&schema, &mut aliases, &mut expr).unwrap_err();

    assert!(err.is_unresolved_member());
    assert_eq!(err.to_string(), "unresolved member `Event.Name`");
}
