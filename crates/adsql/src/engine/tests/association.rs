use super::{member_id, test_schema};
use crate::{
    engine::{columnize::columnize, AliasGen},
    Query,
};

use adsql_core::{
    schema::{AttributeFilter, MemberTy, SqlType},
    stmt::{Aggregator, Expr, ExprColumn, JoinKind, Projection, TableAlias, Type},
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

fn int_column(alias: usize, name: &str) -> Expr {
    ExprColumn::new(TableAlias(alias), name, Type::I32)
        .with_sql_ty(SqlType::Integer)
        .into()
}

fn city(alias: usize) -> Expr {
    ExprColumn::new(TableAlias(alias), "City", Type::String)
        .with_sql_ty(SqlType::Char(15))
        .into()
}

#[test]
fn to_one_navigation_is_left_joined() {
    let schema = test_schema();

    let query = Query::new(&schema, "Order")
        .unwrap()
        .filter(|o| Ok(Expr::eq(o.navigate("Customer")?.member("City")?, "London")))
        .unwrap();

    let projection = columnized(&schema, query.into_expr());

    let Some(Expr::Join(join)) = &projection.select.from else {
        panic!("expected join, got {:?}", projection.select.from);
    };

    assert_eq!(join.kind, JoinKind::LeftOuter);
    assert!(matches!(&join.left, Expr::Table(table) if table.alias == TableAlias(0)));
    assert!(matches!(&join.right, Expr::Table(table) if table.name == "CUSTOMER" && table.alias == TableAlias(2)));

    // Related side first
    assert_eq!(
        join.on,
        Some(Expr::eq(int_column(2, "CustomerId"), int_column(0, "CustomerId")))
    );
    assert_eq!(
        projection.select.filter,
        Some(Expr::eq(city(2), "London"))
    );
}

#[test]
fn attribute_filter_goes_into_join_condition() {
    let schema = test_schema();

    let query = Query::new(&schema, "Order")
        .unwrap()
        .select(|o| {
            Ok(Expr::record([
                ("OrderId", o.member("OrderId")?),
                ("Customer", o.member("CustomerInLondon")?),
            ]))
        })
        .unwrap();

    let projection = columnized(&schema, query.into_expr());

    let Some(Expr::Join(join)) = &projection.select.from else {
        panic!("expected join, got {:?}", projection.select.from);
    };

    assert_eq!(
        join.on,
        Some(Expr::and(
            Expr::eq(int_column(2, "CustomerId"), int_column(0, "CustomerId")),
            Expr::eq(city(2), "London"),
        ))
    );
    assert_eq!(projection.select.filter, None);
}

#[test]
fn to_many_navigation_is_a_nested_list() {
    let schema = test_schema();

    let query = Query::new(&schema, "Customer")
        .unwrap()
        .select(|c| c.member("Orders"))
        .unwrap();

    let projection = columnized(&schema, query.into_expr());

    let Expr::Projection(orders) = &projection.projector else {
        panic!("expected nested projection, got {:?}", projection.projector);
    };

    assert_eq!(orders.aggregator, Some(Aggregator::List));
    assert_eq!(orders.select.alias, TableAlias(3));
    assert!(matches!(
        &orders.select.from,
        Some(Expr::Table(table)) if table.name == "ORDERS" && table.alias == TableAlias(2)
    ));

    // Key equality, then the policy filter bound to the related table
    assert_eq!(
        orders.select.filter,
        Some(Expr::and(
            Expr::eq(int_column(2, "CustomerId"), int_column(0, "CustomerId")),
            Expr::gt(int_column(2, "OrderId"), 100),
        ))
    );

    // The outer select is not joined
    assert!(matches!(&projection.select.from, Some(Expr::Table(_))));
}

#[test]
fn attribute_filter_on_missing_column_is_unresolved() {
    let mut schema = test_schema();

    // The builder rejects this, so point an existing filter elsewhere
    let id = member_id(&schema, "Order", "CustomerInLondon");
    let MemberTy::Association(association) =
        &mut schema.entities[id.entity.0].members[id.index].ty
    else {
        panic!("expected association");
    };
    association.filter = Some(AttributeFilter {
        column: "Town".to_string(),
        value: "London".to_string(),
    });

    let mut expr = Query::new(&schema, "Order")
        .unwrap()
        .select(|o| o.member("CustomerInLondon"))
        .unwrap()
        .into_expr();
    let mut aliases = AliasGen::after(&expr);

    let err = columnize(&schema, &mut aliases, &mut expr).unwrap_err();
    assert!(err.is_unresolved_member(), "{err}");
    assert_eq!(err.to_string(), "unresolved member `Customer.Town`");
}
