mod common;

use adsql::{
    stmt::{Expr, Value},
    Param, Query,
};
use common::engine;
use pretty_assertions::assert_eq;

fn names_sql(take: Option<i32>, skip: Option<i32>) -> String {
    let engine = engine();

    let mut query = Query::new(engine.schema(), "Customer")
        .unwrap()
        .select(|c| c.member("Name"))
        .unwrap();

    if let Some(skip) = skip {
        query = query.skip(skip);
    }

    if let Some(take) = take {
        query = query.take(take);
    }

    engine.translate(&query.into_expr()).unwrap().sql
}

#[test]
fn take_only() {
    assert_eq!(
        names_sql(Some(5), None),
        "SELECT TOP 5 t0.[Name] FROM [CUSTOMER] AS t0"
    );
}

#[test]
fn skip_and_take() {
    assert_eq!(
        names_sql(Some(10), Some(20)),
        "SELECT TOP 10 START AT 21 t0.[Name] FROM [CUSTOMER] AS t0"
    );
}

#[test]
fn skip_zero_starts_at_the_first_row() {
    assert_eq!(
        names_sql(Some(5), Some(0)),
        "SELECT TOP 5 START AT 1 t0.[Name] FROM [CUSTOMER] AS t0"
    );
}

#[test]
fn skip_without_take_has_no_practical_limit() {
    assert_eq!(
        names_sql(None, Some(5)),
        "SELECT TOP 2147483647 START AT 6 t0.[Name] FROM [CUSTOMER] AS t0"
    );
}

#[test]
fn captured_skip_is_a_parameter() {
    let engine = engine();

    let query = Query::new(engine.schema(), "Customer")
        .unwrap()
        .select(|c| c.member("Name"))
        .unwrap()
        .skip(Expr::captured("skip", 20))
        .take(Expr::captured("take", 10))
        .into_expr();

    let translation = engine.translate(&query).unwrap();

    assert_eq!(
        translation.sql,
        "SELECT TOP :p0 START AT (:p1 + 1) t0.[Name] FROM [CUSTOMER] AS t0"
    );
    assert_eq!(
        translation.params,
        [Param::Value(Value::I32(10)), Param::Value(Value::I32(20))]
    );
}
