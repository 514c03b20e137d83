use super::{member_id, row, test_schema};
use crate::engine::rewrite_composite::rewrite_composite;

use adsql_core::{
    schema::MemberId,
    stmt::{BinaryOp, Expr, Input, Method, Value},
    Schema,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Member values of one `Event` row.
struct Fields(Vec<(MemberId, Value)>);

impl Input for Fields {
    fn resolve_member(&mut self, _source: &Expr, member: MemberId) -> Option<Value> {
        self.0
            .iter()
            .find(|(id, _)| *id == member)
            .map(|(_, value)| value.clone())
    }
}

const OPS: [BinaryOp; 6] = [
    BinaryOp::Eq,
    BinaryOp::Ne,
    BinaryOp::Gt,
    BinaryOp::Ge,
    BinaryOp::Lt,
    BinaryOp::Le,
];

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap()
}

fn time(text: &str) -> NaiveTime {
    NaiveTime::parse_from_str(text, "%H:%M").unwrap()
}

fn start(schema: &Schema) -> Expr {
    Expr::member(row(schema, "Event", 0), member_id(schema, "Event", "Start"))
}

fn end(schema: &Schema) -> Expr {
    Expr::member(row(schema, "Event", 0), member_id(schema, "Event", "End"))
}

fn start_fields(schema: &Schema, date: Option<NaiveDate>, time: &str) -> Fields {
    Fields(vec![
        (
            member_id(schema, "Event", "StartDate"),
            date.map_or(Value::Null, Value::Date),
        ),
        (member_id(schema, "Event", "StartTime"), Value::from(time)),
    ])
}

fn rewritten(schema: &Schema, mut expr: Expr) -> Expr {
    rewrite_composite(schema, &mut expr).unwrap();
    expr
}

fn holds(op: BinaryOp, lhs: NaiveDateTime, rhs: NaiveDateTime) -> bool {
    match op {
        BinaryOp::Eq => lhs == rhs,
        BinaryOp::Ne => lhs != rhs,
        BinaryOp::Gt => lhs > rhs,
        BinaryOp::Ge => lhs >= rhs,
        BinaryOp::Lt => lhs < rhs,
        BinaryOp::Le => lhs <= rhs,
        _ => unreachable!(),
    }
}

#[test]
fn matches_direct_datetime_comparison() {
    let schema = test_schema();

    let dates = [date(2022, 12, 31), date(2023, 1, 1), date(2023, 1, 2)];
    let times = ["00:00", "09:15", "12:00", "14:30", "23:59"];
    let constants = [
        at(2023, 1, 1, 12, 0),
        at(2023, 1, 1, 14, 30),
        at(2023, 1, 2, 0, 0),
    ];

    for op in OPS {
        for constant in constants {
            let expr = rewritten(&schema, Expr::binary_op(start(&schema), op, constant));

            for d in dates {
                for t in times {
                    let expected = holds(op, d.and_time(time(t)), constant);
                    let actual = expr
                        .eval_bool(start_fields(&schema, Some(d), t))
                        .unwrap();

                    assert_eq!(actual, expected, "{d} {t} {op} {constant}");
                }
            }
        }
    }
}

#[test]
fn later_time_on_same_date_is_greater() {
    let schema = test_schema();

    let expr = rewritten(
        &schema,
        Expr::gt(start(&schema), at(2023, 1, 1, 12, 0)),
    );

    assert!(expr
        .eval_bool(start_fields(&schema, Some(date(2023, 1, 1)), "14:30"))
        .unwrap());
}

#[test]
fn ordering_splits_into_strict_date_and_time_compare() {
    let schema = test_schema();
    let start_date = Expr::member(
        row(&schema, "Event", 0),
        member_id(&schema, "Event", "StartDate"),
    );
    let start_time = Expr::member(
        row(&schema, "Event", 0),
        member_id(&schema, "Event", "StartTime"),
    );

    let expr = rewritten(&schema, Expr::ge(start(&schema), at(2023, 1, 1, 14, 30)));

    let day = Value::Date(date(2023, 1, 1));
    let expected = Expr::or(
        Expr::gt(start_date.clone(), day.clone()),
        Expr::and(
            Expr::eq(start_date, day),
            Expr::ge(
                Expr::call_static(Method::Compare, [start_time, Expr::from("14:30")]),
                0,
            ),
        ),
    );

    assert_eq!(expr, expected);
}

#[test]
fn constant_on_the_left_is_commuted() {
    let schema = test_schema();
    let constant = at(2023, 1, 1, 12, 0);

    for op in OPS {
        let flipped = rewritten(&schema, Expr::binary_op(constant, op, start(&schema)));
        let direct = rewritten(
            &schema,
            Expr::binary_op(start(&schema), op.commute(), constant),
        );
        assert_eq!(flipped, direct, "{op}");
    }
}

#[test]
fn captured_constants_are_rewritten() {
    let schema = test_schema();

    let expr = rewritten(
        &schema,
        Expr::eq(start(&schema), Expr::captured("when", at(2023, 1, 1, 9, 15))),
    );

    assert!(expr
        .eval_bool(start_fields(&schema, Some(date(2023, 1, 1)), "09:15"))
        .unwrap());
    assert!(!expr
        .eval_bool(start_fields(&schema, Some(date(2023, 1, 1)), "09:16"))
        .unwrap());
}

#[test]
fn null_date_is_null_composite() {
    let schema = test_schema();

    let is_null = rewritten(&schema, Expr::eq(start(&schema), Expr::null()));
    let is_not_null = rewritten(&schema, Expr::ne(start(&schema), Expr::null()));

    for time in ["", "10:00", "     "] {
        let fields = || start_fields(&schema, None, time);
        assert!(is_null.eval_bool(fields()).unwrap());
        assert!(!is_not_null.eval_bool(fields()).unwrap());
    }

    let fields = start_fields(&schema, Some(date(2023, 1, 1)), "10:00");
    assert!(!is_null.eval_bool(fields).unwrap());
}

#[test]
fn ordering_against_null_is_rejected() {
    let schema = test_schema();

    for op in [BinaryOp::Gt, BinaryOp::Ge, BinaryOp::Lt, BinaryOp::Le] {
        let mut expr = Expr::binary_op(start(&schema), op, Expr::null());
        let err = rewrite_composite(&schema, &mut expr).unwrap_err();
        assert!(err.is_unsupported_operation(), "{op}");
    }
}

#[test]
fn rewriting_twice_changes_nothing() {
    let schema = test_schema();

    let exprs = [
        Expr::lt(start(&schema), at(2023, 1, 1, 12, 0)),
        Expr::eq(start(&schema), Expr::null()),
        Expr::ne(start(&schema), end(&schema)),
        Expr::and(
            Expr::ge(start(&schema), at(2023, 1, 1, 0, 0)),
            Expr::le(end(&schema), at(2023, 2, 1, 0, 0)),
        ),
    ];

    for expr in exprs {
        let once = rewritten(&schema, expr);
        let twice = rewritten(&schema, once.clone());
        assert_eq!(once, twice);
    }
}

#[test]
fn composite_to_composite_widens_non_nullable_date() {
    let schema = test_schema();

    let expr = rewritten(&schema, Expr::eq(start(&schema), end(&schema)));

    // `End` is backed by a non-nullable date; `Start` is not
    let Expr::BinaryOp(and) = &expr else {
        panic!("expected AND, got {expr:?}");
    };
    let Expr::BinaryOp(dates) = &*and.lhs else {
        panic!("expected date comparison, got {:?}", and.lhs);
    };
    assert!(matches!(&*dates.lhs, Expr::Member(_)));
    assert!(matches!(&*dates.rhs, Expr::Convert(convert) if convert.nullable));
}

#[test]
fn composite_to_composite_matches_direct_comparison() {
    let schema = test_schema();

    let slots = [
        (date(2023, 1, 1), "10:00"),
        (date(2023, 1, 1), "14:30"),
        (date(2023, 1, 2), "09:15"),
    ];

    for op in OPS {
        let expr = rewritten(&schema, Expr::binary_op(start(&schema), op, end(&schema)));

        for (start_date, start_time) in slots {
            for (end_date, end_time) in slots {
                let fields = Fields(vec![
                    (member_id(&schema, "Event", "StartDate"), start_date.into()),
                    (member_id(&schema, "Event", "StartTime"), start_time.into()),
                    (member_id(&schema, "Event", "EndDate"), end_date.into()),
                    (member_id(&schema, "Event", "EndTime"), end_time.into()),
                ]);

                let lhs = start_date.and_time(time(start_time));
                let rhs = end_date.and_time(time(end_time));

                assert_eq!(expr.eval_bool(fields).unwrap(), holds(op, lhs, rhs), "{op}");
            }
        }
    }
}

#[test]
fn non_constant_operand_is_left_alone() {
    let schema = test_schema();
    let name = Expr::member(row(&schema, "Event", 0), member_id(&schema, "Event", "Name"));

    let expr = Expr::eq(start(&schema), name);
    assert_eq!(rewritten(&schema, expr.clone()), expr);
}

#[test]
fn end_to_end_filtering() {
    let schema = test_schema();

    let rows = [
        (Some(date(2023, 1, 1)), "10:00"),
        (Some(date(2023, 1, 1)), "14:30"),
        (Some(date(2023, 1, 2)), "09:15"),
        (None, ""),
    ];

    let matching = |expr: Expr| -> Vec<usize> {
        let expr = rewritten(&schema, expr);
        rows.iter()
            .enumerate()
            .filter(|(_, (d, t))| expr.eval_bool(start_fields(&schema, *d, t)).unwrap())
            .map(|(i, _)| i)
            .collect()
    };

    assert_eq!(
        matching(Expr::lt(start(&schema), at(2023, 1, 1, 12, 0))),
        [0, 3]
    );
    assert_eq!(
        matching(Expr::ge(start(&schema), at(2023, 1, 1, 14, 30))),
        [1, 2]
    );
}
