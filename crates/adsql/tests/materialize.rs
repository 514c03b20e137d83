mod common;

use adsql::{
    stmt::{Expr, Value},
    Engine, Param, Query, Result, Settings, TableType, Translation,
};
use common::{at, date, engine, status};
use pretty_assertions::assert_eq;

fn record(values: impl IntoIterator<Item = Value>) -> Value {
    Value::Record(values.into_iter().collect())
}

#[test]
fn unmatched_filtered_association_reads_as_null() {
    let engine = engine();

    let query = Query::new(engine.schema(), "Order")
        .unwrap()
        .select(|o| {
            Ok(Expr::record([
                ("OrderId", o.member("OrderId")?),
                ("Customer", o.member("CustomerInLondon")?),
            ]))
        })
        .unwrap()
        .into_expr();

    let translation = engine.translate(&query).unwrap();

    // The filter lives in the join condition, so orders whose customer is
    // elsewhere are still returned
    assert_eq!(
        translation.sql,
        "SELECT t0.[OrderId], t2.[CustomerId], t2.[Name], t2.[City] FROM [ORDERS] AS t0 \
         LEFT OUTER JOIN [CUSTOMER] AS t2 \
         ON (t2.[CustomerId] = t0.[CustomerId]) AND (t2.[City] = 'London')"
    );

    let rows = vec![
        vec![
            Value::I32(101),
            Value::I32(1),
            Value::from("Alice"),
            Value::from("London"),
        ],
        vec![Value::I32(103), Value::Null, Value::Null, Value::Null],
    ];

    let value = engine.materializer().read(&translation, rows).unwrap();

    assert_eq!(
        value,
        Value::List(vec![
            record([
                Value::I32(101),
                record([Value::I32(1), Value::from("Alice"), Value::from("London")]),
            ]),
            record([Value::I32(103), Value::Null]),
        ])
    );
}

#[test]
fn to_many_association_runs_a_child_command_per_row() {
    let engine = engine();

    let query = Query::new(engine.schema(), "Customer")
        .unwrap()
        .select(|c| {
            Ok(Expr::record([
                ("Name", c.member("Name")?),
                ("Orders", c.member("Orders")?),
            ]))
        })
        .unwrap()
        .into_expr();

    let translation = engine.translate(&query).unwrap();

    assert_eq!(
        translation.sql,
        "SELECT t0.[Name], t0.[CustomerId] FROM [CUSTOMER] AS t0"
    );
    assert_eq!(translation.children.len(), 1);

    let child = &translation.children[0];
    assert_eq!(
        child.sql,
        "SELECT t2.[OrderId], t2.[CustomerId], t2.[Status] FROM [ORDERS] AS t2 \
         WHERE (t2.[CustomerId] = :p0) AND (t2.[OrderId] > 100)"
    );
    assert_eq!(child.params, [Param::Arg(0)]);
    assert_eq!(child.outer_columns, ["CustomerId"]);
    assert_eq!(child.param_values(&[Value::I32(7)]).unwrap(), [Value::I32(7)]);

    let rows = vec![
        vec![Value::from("Alice"), Value::I32(1)],
        vec![Value::from("Bob"), Value::I32(2)],
    ];

    let mut calls = vec![];
    let value = engine
        .materializer()
        .read_with(
            &translation,
            rows,
            &mut |child: &Translation, outer: &[Value]| -> Result<Vec<Vec<Value>>> {
                calls.push(child.param_values(outer)?);

                Ok(match outer {
                    [Value::I32(1)] => vec![
                        vec![Value::I32(101), Value::I32(1), Value::from("D")],
                        vec![Value::I32(102), Value::I32(1), Value::from(" ")],
                    ],
                    _ => vec![],
                })
            },
        )
        .unwrap();

    assert_eq!(calls, [vec![Value::I32(1)], vec![Value::I32(2)]]);

    let schema = engine.schema();
    assert_eq!(
        value,
        Value::List(vec![
            record([
                Value::from("Alice"),
                Value::List(vec![
                    record([Value::I32(101), Value::I32(1), status(schema, 'D')]),
                    record([Value::I32(102), Value::I32(1), status(schema, ' ')]),
                ]),
            ]),
            record([Value::from("Bob"), Value::List(vec![])]),
        ])
    );
}

#[test]
fn child_rows_need_a_fetch_callback() {
    let engine = engine();

    let query = Query::new(engine.schema(), "Customer")
        .unwrap()
        .select(|c| c.member("Orders"))
        .unwrap()
        .into_expr();

    let translation = engine.translate(&query).unwrap();
    let err = engine
        .materializer()
        .read(&translation, vec![vec![Value::I32(1)]])
        .unwrap_err();

    assert!(err.is_unsupported_operation());
}

#[test]
fn composite_member_reads_as_a_timestamp() {
    let engine = engine();

    let query = Query::new(engine.schema(), "Event")
        .unwrap()
        .select(|e| e.member("Start"))
        .unwrap()
        .into_expr();

    let translation = engine.translate(&query).unwrap();
    assert_eq!(
        translation.sql,
        "SELECT t0.[StartDate], t0.[StartTime] FROM [EVENTS] AS t0"
    );

    let rows = vec![
        vec![Value::Date(date(2023, 1, 1)), Value::from("14:30")],
        vec![Value::Null, Value::from("     ")],
        vec![Value::Date(date(2023, 1, 2)), Value::from("bad")],
    ];

    let value = engine.materializer().read(&translation, rows).unwrap();

    assert_eq!(
        value,
        Value::List(vec![
            Value::DateTime(at(2023, 1, 1, 14, 30)),
            Value::Null,
            Value::DateTime(at(2023, 1, 2, 0, 0)),
        ])
    );
}

#[test]
fn count_reads_a_single_value() {
    let engine = engine();

    let query = Query::new(engine.schema(), "Order").unwrap().count().into_expr();
    let translation = engine.translate(&query).unwrap();

    let value = engine
        .materializer()
        .read(&translation, vec![vec![Value::I32(3)]])
        .unwrap();
    assert_eq!(value, Value::I32(3));
}

#[test]
fn first_or_default_without_rows_is_null() {
    let engine = engine();

    let query = Query::new(engine.schema(), "Customer")
        .unwrap()
        .select(|c| c.member("Name"))
        .unwrap()
        .first_or_default()
        .into_expr();

    let translation = engine.translate(&query).unwrap();
    assert_eq!(engine.materializer().read(&translation, vec![]).unwrap(), Value::Null);
}

#[test]
fn unknown_enum_character_fails_with_the_column_name() {
    let engine = engine();

    let query = Query::new(engine.schema(), "Order")
        .unwrap()
        .select(|o| o.member("Status"))
        .unwrap()
        .into_expr();

    let translation = engine.translate(&query).unwrap();
    let err = engine
        .materializer()
        .read(&translation, vec![vec![Value::from("Q")]])
        .unwrap_err();

    assert!(err.is_type_conversion());
    assert!(err.to_string().contains("`Status`"), "{err}");
}

#[test]
fn blank_strings_read_as_null_for_free_tables() {
    let engine = Engine::new(common::schema()).with_settings(Settings {
        table_type: TableType::Cdx,
        ..Settings::default()
    });

    let query = Query::new(engine.schema(), "Customer")
        .unwrap()
        .select(|c| c.member("City"))
        .unwrap()
        .into_expr();

    let translation = engine.translate(&query).unwrap();
    let value = engine
        .materializer()
        .read(
            &translation,
            vec![vec![Value::from("   ")], vec![Value::from("Paris")]],
        )
        .unwrap();

    assert_eq!(value, Value::List(vec![Value::Null, Value::from("Paris")]));
}
