#![allow(dead_code)]

use std::sync::Once;

use adsql::{
    schema::{Builder, EntityDef, EnumDef, MemberDef, SqlType},
    stmt::{Expr, Type, Value, ValueEnum},
    Engine, Schema,
};
use tracing_subscriber::EnvFilter;

pub fn schema() -> Schema {
    Builder::new()
        .enum_def(
            EnumDef::char_backed("Status")
                .char_variant("None", ' ')
                .char_variant("Draft", 'D')
                .char_variant("Posted", 'P')
                .default_variant("None"),
        )
        .entity(
            EntityDef::new("Event")
                .table("EVENTS")
                .member(MemberDef::column("Id", Type::I32, SqlType::Integer).primary_key())
                .member(MemberDef::column("Name", Type::String, SqlType::Char(20)))
                .member(MemberDef::column("StartDate", Type::Date, SqlType::Date).nullable())
                .member(MemberDef::column("StartTime", Type::String, SqlType::Char(5)))
                .member(MemberDef::composite("Start", "StartDate", "StartTime")),
        )
        .entity(
            EntityDef::new("Customer")
                .table("CUSTOMER")
                .member(MemberDef::column("CustomerId", Type::I32, SqlType::Integer).primary_key())
                .member(MemberDef::column("Name", Type::String, SqlType::Char(20)))
                .member(MemberDef::column("City", Type::String, SqlType::Char(15)))
                .member(
                    MemberDef::has_many("Orders", "Order").keys(["CustomerId"], ["CustomerId"]),
                ),
        )
        .entity(
            EntityDef::new("Order")
                .table("ORDERS")
                .member(MemberDef::column("OrderId", Type::I32, SqlType::Integer).primary_key())
                .member(MemberDef::column("CustomerId", Type::I32, SqlType::Integer))
                .member(MemberDef::enumeration("Status", "Status", SqlType::Char(1)))
                .member(
                    MemberDef::belongs_to("Customer", "Customer")
                        .keys(["CustomerId"], ["CustomerId"]),
                )
                .member(
                    MemberDef::belongs_to("CustomerInLondon", "Customer")
                        .keys(["CustomerId"], ["CustomerId"])
                        .filter("City", "London"),
                ),
        )
        .associate_with("Customer", "Orders", |order| {
            Ok(Expr::gt(order.member("OrderId")?, 100))
        })
        .build()
        .expect("test schema should build")
}

pub fn engine() -> Engine {
    init_tracing();
    Engine::new(schema())
}

/// Installs a fmt subscriber once per test binary. `RUST_LOG` overrides the
/// default `warn` filter.
pub fn init_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

pub fn status(schema: &Schema, c: char) -> Value {
    let id = schema.enum_by_name("Status").unwrap().id;
    Value::Enum(ValueEnum::new(id, c as i32))
}

pub fn date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> chrono::NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap()
}
