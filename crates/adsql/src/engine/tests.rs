use adsql_core::{
    schema::{Builder, EntityDef, EnumDef, MemberDef, MemberId, SqlType},
    stmt::{Expr, Type},
    Schema,
};

mod association;
mod columnize;
mod rewrite_composite;

pub fn test_schema() -> Schema {
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
                .member(MemberDef::composite("Start", "StartDate", "StartTime"))
                .member(MemberDef::column("EndDate", Type::Date, SqlType::Date))
                .member(MemberDef::column("EndTime", Type::String, SqlType::Char(5)))
                .member(MemberDef::composite("End", "EndDate", "EndTime")),
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

#[track_caller]
pub fn member_id(schema: &Schema, entity: &str, member: &str) -> MemberId {
    schema
        .entity_by_name(entity)
        .and_then(|entity| entity.member_by_name(member))
        .map(|member| member.id)
        .expect("member should exist")
}

/// A row of `entity` under alias `t{alias}`.
#[track_caller]
pub fn row(schema: &Schema, entity: &str, alias: usize) -> Expr {
    let entity = schema.entity_by_name(entity).expect("entity should exist");
    Expr::entity(entity.id, adsql_core::stmt::TableAlias(alias))
}
