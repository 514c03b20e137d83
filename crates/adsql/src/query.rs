//! A small builder for relational query trees.
//!
//! ```
//! # use adsql::{schema::*, stmt::*, Query};
//! # fn main() -> adsql::Result<()> {
//! let schema = Builder::new()
//!     .entity(
//!         EntityDef::new("Customer")
//!             .table("CUSTOMER")
//!             .member(MemberDef::column("Id", Type::I32, SqlType::Integer).primary_key())
//!             .member(MemberDef::column("City", Type::String, SqlType::Char(20))),
//!     )
//!     .build()?;
//!
//! let query = Query::new(&schema, "Customer")?
//!     .filter(|c| Ok(Expr::eq(c.member("City")?, "London")))?
//!     .take(10)
//!     .into_expr();
//! # let _ = query;
//! # Ok(())
//! # }
//! ```

use adsql_core::{
    schema::{Entity, MemberTy},
    stmt::{Aggregator, Direction, Expr, ExprTable, OrderBy, Projection, Select, TableAlias},
    Error, Result, Schema,
};

/// A query over one entity, built up clause by clause.
///
/// The root table is introduced as `t0` and the select as `t1`.
#[derive(Debug, Clone)]
pub struct Query<'a> {
    schema: &'a Schema,
    entity: &'a Entity,
    select: Select,
    projector: Option<Expr>,
    aggregator: Option<Aggregator>,
}

/// A row of the query's entity, handed to the clause closures.
#[derive(Debug, Clone)]
pub struct Row<'a> {
    schema: &'a Schema,
    entity: &'a Entity,
    expr: Expr,
}

const TABLE_ALIAS: TableAlias = TableAlias(0);
const SELECT_ALIAS: TableAlias = TableAlias(1);

impl<'a> Query<'a> {
    /// Every row of `entity`.
    pub fn new(schema: &'a Schema, entity: &str) -> Result<Query<'a>> {
        let entity = schema
            .entity_by_name(entity)
            .ok_or_else(|| Error::invalid_schema(format!("unknown entity `{entity}`")))?;

        let table = ExprTable {
            alias: TABLE_ALIAS,
            entity: entity.id,
            name: entity.table.clone(),
        };

        Ok(Query {
            schema,
            entity,
            select: Select::new(SELECT_ALIAS, table),
            projector: None,
            aggregator: None,
        })
    }

    fn row(&self) -> Row<'a> {
        Row {
            schema: self.schema,
            entity: self.entity,
            expr: Expr::entity(self.entity.id, TABLE_ALIAS),
        }
    }

    /// Keeps the rows the predicate holds for. Repeated filters are ANDed.
    pub fn filter(mut self, f: impl FnOnce(&Row<'a>) -> Result<Expr>) -> Result<Query<'a>> {
        let predicate = f(&self.row())?;
        self.select.and_filter(predicate);
        Ok(self)
    }

    /// Shapes each result row. Defaults to the entity itself.
    pub fn select(mut self, f: impl FnOnce(&Row<'a>) -> Result<Expr>) -> Result<Query<'a>> {
        self.projector = Some(f(&self.row())?);
        Ok(self)
    }

    pub fn order_by(
        mut self,
        f: impl FnOnce(&Row<'a>) -> Result<Expr>,
        direction: Direction,
    ) -> Result<Query<'a>> {
        let expr = f(&self.row())?;
        self.select.order_by.push(OrderBy { expr, direction });
        Ok(self)
    }

    pub fn distinct(mut self) -> Query<'a> {
        self.select.distinct = true;
        self
    }

    pub fn take(mut self, count: impl Into<Expr>) -> Query<'a> {
        self.select.take = Some(count.into());
        self
    }

    pub fn skip(mut self, count: impl Into<Expr>) -> Query<'a> {
        self.select.skip = Some(count.into());
        self
    }

    pub fn single(self) -> Query<'a> {
        self.aggregate(Aggregator::Single)
    }

    pub fn single_or_default(self) -> Query<'a> {
        self.aggregate(Aggregator::SingleOrDefault)
    }

    pub fn first(self) -> Query<'a> {
        self.aggregate(Aggregator::First)
    }

    pub fn first_or_default(self) -> Query<'a> {
        self.aggregate(Aggregator::FirstOrDefault)
    }

    /// The number of matching rows.
    pub fn count(mut self) -> Query<'a> {
        self.projector = Some(Expr::count_star());
        self.aggregate(Aggregator::Single)
    }

    fn aggregate(mut self, aggregator: Aggregator) -> Query<'a> {
        self.aggregator = Some(aggregator);
        self
    }

    pub fn into_expr(self) -> Expr {
        let projector = match self.projector {
            Some(projector) => projector,
            None => Expr::entity(self.entity.id, TABLE_ALIAS),
        };

        Projection {
            select: self.select,
            projector,
            aggregator: self.aggregator,
        }
        .into()
    }
}

impl<'a> Row<'a> {
    /// The row itself.
    pub fn expr(&self) -> Expr {
        self.expr.clone()
    }

    /// Access to the member `name`.
    pub fn member(&self, name: &str) -> Result<Expr> {
        self.entity
            .member_by_name(name)
            .map(|member| Expr::member(self.expr.clone(), member.id))
            .ok_or_else(|| Error::unresolved_member(&self.entity.name, name))
    }

    /// The row a to-one association `name` leads to.
    pub fn navigate(&self, name: &str) -> Result<Row<'a>> {
        let member = self
            .entity
            .member_by_name(name)
            .ok_or_else(|| Error::unresolved_member(&self.entity.name, name))?;

        match &member.ty {
            MemberTy::Association(association) if !association.many => Ok(Row {
                schema: self.schema,
                entity: self.schema.entity(association.target),
                expr: Expr::member(self.expr.clone(), member.id),
            }),
            _ => Err(Error::unsupported_operation(format!(
                "`{}.{name}` is not a to-one association",
                self.entity.name
            ))),
        }
    }
}
