use adsql_core::{
    schema::{
        AssociationFilter, Builder, EntityDef, EnumDef, EnumRepr, FilterPrecedence, MemberDef,
        SqlType,
    },
    stmt::{Expr, Type},
};
use pretty_assertions::assert_eq;

fn customer() -> EntityDef {
    EntityDef::new("Customer")
        .table("CUSTOMER")
        .member(MemberDef::column("CustomerId", Type::I32, SqlType::Integer).primary_key())
        .member(MemberDef::column("City", Type::String, SqlType::Char(15)))
}

fn order(customer: MemberDef) -> EntityDef {
    EntityDef::new("Order")
        .member(MemberDef::column("OrderId", Type::I32, SqlType::Integer).primary_key())
        .member(MemberDef::column("CustomerId", Type::I32, SqlType::Integer))
        .member(customer)
}

#[test]
fn resolves_tables_columns_and_associations() {
    let schema = Builder::new()
        .entity(customer())
        .entity(order(
            MemberDef::belongs_to("Customer", "Customer").keys(["CustomerId"], ["CustomerId"]),
        ))
        .build()
        .unwrap();

    let order = schema.entity_by_name("Order").unwrap();
    // The table defaults to the entity name
    assert_eq!(order.table, "Order");
    assert_eq!(
        order.primary_key().map(|m| m.name.as_str()).collect::<Vec<_>>(),
        ["OrderId"]
    );

    let member = order.member_by_name("Customer").unwrap();
    let association = schema.association(member.id).unwrap();
    assert_eq!(
        association.target,
        schema.entity_by_name("Customer").unwrap().id
    );
    assert!(!association.many);
    assert!(schema.association_filter(member.id).is_none());

    let city = schema
        .entity_by_name("Customer")
        .unwrap()
        .member_by_column("City")
        .unwrap();
    assert_eq!(city.name, "City");
}

#[test]
fn column_name_can_differ_from_member_name() {
    let schema = Builder::new()
        .entity(
            EntityDef::new("Part").member(
                MemberDef::column("Description", Type::String, SqlType::Char(40))
                    .column_name("DESCR"),
            ),
        )
        .build()
        .unwrap();

    let part = schema.entity_by_name("Part").unwrap();
    let member = part.member_by_column("DESCR").unwrap();
    assert_eq!(member.name, "Description");
    assert_eq!(member.column().unwrap().name, "DESCR");
}

#[test]
fn unknown_association_target() {
    let err = Builder::new()
        .entity(order(
            MemberDef::belongs_to("Customer", "Nobody").keys(["CustomerId"], ["CustomerId"]),
        ))
        .build()
        .unwrap_err();

    assert!(err.root().is_invalid_schema());
    assert_eq!(
        err.to_string(),
        "entity `Order`: invalid schema: association `Customer` targets unknown entity `Nobody`"
    );
}

#[test]
fn unknown_key_member() {
    let err = Builder::new()
        .entity(customer())
        .entity(order(
            MemberDef::belongs_to("Customer", "Customer").keys(["CustId"], ["CustomerId"]),
        ))
        .build()
        .unwrap_err();

    assert!(err.root().is_unresolved_member());
}

#[test]
fn mismatched_key_counts() {
    let err = Builder::new()
        .entity(customer())
        .entity(order(MemberDef::belongs_to("Customer", "Customer").keys(
            ["CustomerId", "OrderId"],
            ["CustomerId"],
        )))
        .build()
        .unwrap_err();

    assert!(err.root().is_invalid_schema());
}

#[test]
fn composite_needs_date_and_character_time() {
    let err = Builder::new()
        .entity(
            EntityDef::new("Event")
                .member(MemberDef::column("StartDate", Type::Date, SqlType::Date))
                .member(MemberDef::column("StartTime", Type::I32, SqlType::Integer))
                .member(MemberDef::composite("Start", "StartDate", "StartTime")),
        )
        .build()
        .unwrap_err();

    assert!(err.is_invalid_schema());

    let err = Builder::new()
        .entity(
            EntityDef::new("Event")
                .member(MemberDef::column("StartDate", Type::Date, SqlType::Date))
                .member(MemberDef::composite("Start", "StartDate", "StartTime")),
        )
        .build()
        .unwrap_err();

    assert!(err.root().is_unresolved_member());
}

#[test]
fn duplicate_names() {
    let err = Builder::new()
        .entity(customer())
        .entity(customer())
        .build()
        .unwrap_err();
    assert!(err.is_invalid_schema());

    let err = Builder::new()
        .entity(
            EntityDef::new("Customer")
                .member(MemberDef::column("Name", Type::String, SqlType::Char(10)))
                .member(MemberDef::column("Name", Type::String, SqlType::Char(10))),
        )
        .build()
        .unwrap_err();
    assert!(err.is_invalid_schema());
}

#[test]
fn attribute_filter_column_must_exist() {
    let err = Builder::new()
        .entity(customer())
        .entity(order(
            MemberDef::belongs_to("Customer", "Customer")
                .keys(["CustomerId"], ["CustomerId"])
                .filter("Region", "North"),
        ))
        .build()
        .unwrap_err();

    assert!(err.is_invalid_schema());
}

fn filtered(precedence: FilterPrecedence) -> adsql_core::Result<adsql_core::Schema> {
    Builder::new()
        .filter_precedence(precedence)
        .entity(customer())
        .entity(order(
            MemberDef::belongs_to("Customer", "Customer")
                .keys(["CustomerId"], ["CustomerId"])
                .filter("City", "London"),
        ))
        .associate_with("Order", "Customer", |customer| {
            Ok(Expr::eq(customer.member("City")?, "Paris"))
        })
        .build()
}

#[test]
fn policy_filter_wins_over_attribute_filter() {
    let schema = filtered(FilterPrecedence::PolicyFirst).unwrap();

    let order = schema.entity_by_name("Order").unwrap();
    let member = order.member_by_name("Customer").unwrap();
    let city = schema
        .entity_by_name("Customer")
        .unwrap()
        .member_by_name("City")
        .unwrap();

    match schema.association_filter(member.id) {
        Some(AssociationFilter::Policy(predicate)) => assert_eq!(
            *predicate,
            Expr::eq(Expr::member(Expr::arg(0), city.id), "Paris")
        ),
        other => panic!("expected a policy filter, got {other:?}"),
    }
}

#[test]
fn both_filter_sources_can_be_rejected() {
    let err = filtered(FilterPrecedence::Reject).unwrap_err();
    assert!(err.is_ambiguous_filter_source());
    assert!(err.to_string().contains("Order.Customer"), "{err}");
}

#[test]
fn attribute_filter_is_used_alone() {
    let schema = Builder::new()
        .entity(customer())
        .entity(order(
            MemberDef::belongs_to("Customer", "Customer")
                .keys(["CustomerId"], ["CustomerId"])
                .filter("City", "London"),
        ))
        .build()
        .unwrap();

    let member = schema
        .entity_by_name("Order")
        .unwrap()
        .member_by_name("Customer")
        .unwrap();

    match schema.association_filter(member.id) {
        Some(AssociationFilter::Attribute(filter)) => {
            assert_eq!(filter.column, "City");
            assert_eq!(filter.value, "London");
        }
        other => panic!("expected an attribute filter, got {other:?}"),
    }
}

#[test]
fn policy_filter_on_a_column_is_rejected() {
    let err = Builder::new()
        .entity(customer())
        .associate_with("Customer", "City", |_| Ok(Expr::from(true)))
        .build()
        .unwrap_err();

    assert!(err.is_invalid_schema());
}

#[test]
fn char_backed_enums() {
    let schema = Builder::new()
        .enum_def(
            EnumDef::char_backed("Status")
                .char_variant("Open", 'O')
                .char_variant("Closed", 'C')
                .default_variant("Open"),
        )
        .enum_def(EnumDef::by_name("Kind").variant("Retail", 0).variant("Trade", 1))
        .entity(
            EntityDef::new("Ticket")
                .member(MemberDef::enumeration("Status", "Status", SqlType::Char(1))),
        )
        .build()
        .unwrap();

    let status = schema.enum_by_name("Status").unwrap();
    assert_eq!(status.repr, EnumRepr::Char);
    assert_eq!(status.default_code, Some('O' as i32));
    assert_eq!(status.variant_by_code('C' as i32).unwrap().name, "Closed");
    assert!(schema.is_char_enum(status.id));

    let kind = schema.enum_by_name("Kind").unwrap();
    assert!(!schema.is_char_enum(kind.id));
    assert_eq!(kind.variant_by_name("Trade").unwrap().code, 1);

    let ticket = schema.entity_by_name("Ticket").unwrap();
    let column = ticket.member_by_name("Status").unwrap().column().unwrap();
    assert_eq!(column.ty, Type::Enum(status.id));
}

#[test]
fn unknown_default_variant() {
    let err = Builder::new()
        .enum_def(EnumDef::char_backed("Status").default_variant("Open"))
        .build()
        .unwrap_err();

    assert!(err.is_invalid_schema());
}
