use crate::{Coercion, Translation};

use adsql_core::{
    schema::MemberId,
    stmt::{Aggregator, Binding, Expr, ExprColumn, ExprEntity, Input, Value},
    Error, Result, Schema,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Reads command rows back into values, following a translation's
/// projector.
#[derive(Debug, Clone, Copy)]
pub struct Materializer<'a> {
    schema: &'a Schema,
    coercion: Coercion<'a>,
}

/// Runs a child command with the given outer values and returns its raw rows.
pub type Fetch<'f> = dyn FnMut(&Translation, &[Value]) -> Result<Vec<Vec<Value>>> + 'f;

impl<'a> Materializer<'a> {
    pub fn new(schema: &'a Schema, coercion: Coercion<'a>) -> Materializer<'a> {
        Materializer { schema, coercion }
    }

    /// Materializes every row of a command and reduces them with the
    /// translation's aggregator.
    ///
    /// Fails if the projector contains a nested projection; use
    /// [`read_with`](Self::read_with) to supply child rows.
    pub fn read(&self, translation: &Translation, rows: Vec<Vec<Value>>) -> Result<Value> {
        self.read_with(translation, rows, &mut |child, _| {
            Err(Error::unsupported_operation(format!(
                "reading rows of child command `{}` requires a fetch callback",
                child.sql
            )))
        })
    }

    /// Like [`read`](Self::read), calling `fetch` to run the child command of
    /// each nested projection once per row.
    pub fn read_with(
        &self,
        translation: &Translation,
        rows: Vec<Vec<Value>>,
        fetch: &mut Fetch<'_>,
    ) -> Result<Value> {
        let values = rows
            .iter()
            .map(|row| self.read_row_with(translation, row, fetch))
            .collect::<Result<Vec<_>>>()?;

        aggregate(translation.aggregator, values)
    }

    /// Materializes one row.
    pub fn read_row_with(
        &self,
        translation: &Translation,
        row: &[Value],
        fetch: &mut Fetch<'_>,
    ) -> Result<Value> {
        let mut reader = RowReader {
            materializer: self,
            translation,
            row,
            next_child: 0,
            fetch,
        };
        reader.read(&translation.projector)
    }
}

struct RowReader<'r, 'f> {
    materializer: &'r Materializer<'r>,
    translation: &'r Translation,
    row: &'r [Value],

    /// Index of the child command for the next nested projection.
    next_child: usize,

    fetch: &'r mut Fetch<'f>,
}

impl RowReader<'_, '_> {
    fn read(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Column(column) if column.alias == self.translation.alias => self.column(column),
            Expr::Entity(entity) => self.entity(entity),
            Expr::Member(member) => match member.source.unwrap_convert() {
                Expr::Entity(entity) => self.composite(entity, member.member),
                _ => Err(self.unresolved(member.member)),
            },
            Expr::Record(record) => Ok(Value::Record(
                record
                    .fields
                    .iter()
                    .map(|field| self.read(&field.expr))
                    .collect::<Result<_>>()?,
            )),
            Expr::List(list) => Ok(Value::List(
                list.items
                    .iter()
                    .map(|item| self.read(item))
                    .collect::<Result<_>>()?,
            )),
            Expr::Projection(_) => self.child(),
            expr => expr.eval(&mut *self),
        }
    }

    fn column(&self, column: &ExprColumn) -> Result<Value> {
        let raw = self
            .translation
            .column_index(&column.name)
            .and_then(|index| self.row.get(index))
            .cloned()
            .ok_or_else(|| {
                Error::from_args(format_args!("row has no column `{}`", column.name))
            })?;

        self.materializer
            .coercion
            .inbound(&column.name, raw, &column.ty)
    }

    /// An entity whose columns are all null (the unmatched side of an outer
    /// join) reads as null.
    fn entity(&mut self, entity: &ExprEntity) -> Result<Value> {
        let Binding::Members(bindings) = &entity.binding else {
            return Err(Error::unsupported_operation(
                "entity bound to a table cannot be materialized",
            ));
        };

        let values = bindings
            .iter()
            .map(|binding| self.read(&binding.expr))
            .collect::<Result<Vec<_>>>()?;

        if !values.is_empty() && values.iter().all(Value::is_null) {
            return Ok(Value::Null);
        }

        Ok(Value::Record(values))
    }

    fn composite(&mut self, entity: &ExprEntity, member: MemberId) -> Result<Value> {
        let Some(composite) = self.materializer.schema.composite(member) else {
            return Err(self.unresolved(member));
        };

        let (Some(date), Some(time)) = (
            entity.member_binding(composite.date),
            entity.member_binding(composite.time),
        ) else {
            return Err(self.unresolved(member));
        };

        let date = match self.read(date)? {
            Value::Date(date) => Some(date),
            Value::DateTime(date_time) => Some(date_time.date()),
            _ => None,
        };
        let time = self.read(time)?;

        Ok(combine(date, time.as_str()).map_or(Value::Null, Value::DateTime))
    }

    fn child(&mut self) -> Result<Value> {
        let translation = self.translation;
        let child = translation.children.get(self.next_child).ok_or_else(|| {
            Error::from_args(format_args!(
                "no child command for nested projection {}",
                self.next_child
            ))
        })?;
        self.next_child += 1;

        let outer = child.outer_values(translation, self.row)?;
        let rows = (self.fetch)(child, &outer)?;

        self.materializer.read_with(child, rows, self.fetch)
    }

    fn unresolved(&self, member: MemberId) -> Error {
        let schema = self.materializer.schema;
        Error::unresolved_member(
            &schema.entity(member.entity).name,
            &schema.member(member).name,
        )
    }
}

/// Client-side evaluation reads columns and composite members from the row.
impl Input for RowReader<'_, '_> {
    fn resolve_column(&mut self, column: &ExprColumn) -> Option<Value> {
        self.column(column).ok()
    }

    fn resolve_member(&mut self, source: &Expr, member: MemberId) -> Option<Value> {
        match source.unwrap_convert() {
            Expr::Entity(entity) => self.composite(entity, member).ok(),
            _ => None,
        }
    }
}

fn aggregate(aggregator: Option<Aggregator>, mut values: Vec<Value>) -> Result<Value> {
    let count = values.len();

    match aggregator {
        None | Some(Aggregator::List) => Ok(Value::List(values)),
        Some(Aggregator::Single) if count == 1 => Ok(values.remove(0)),
        Some(Aggregator::Single) => Err(Error::from_args(format_args!(
            "expected exactly one row, found {count}"
        ))),
        Some(Aggregator::SingleOrDefault) if count <= 1 => {
            Ok(values.pop().unwrap_or(Value::Null))
        }
        Some(Aggregator::SingleOrDefault) => Err(Error::from_args(format_args!(
            "expected at most one row, found {count}"
        ))),
        Some(Aggregator::First) if count > 0 => Ok(values.remove(0)),
        Some(Aggregator::First) => Err(Error::from_args(format_args!(
            "expected at least one row, found none"
        ))),
        Some(Aggregator::FirstOrDefault) if count > 0 => Ok(values.remove(0)),
        Some(Aggregator::FirstOrDefault) => Ok(Value::Null),
    }
}

/// Parses fixed-width `HH:mm` time text.
///
/// Anything else, including surrounding whitespace or seconds, is rejected.
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    // chrono tolerates unpadded fields and leading spaces, the stored form does not
    NaiveTime::parse_from_str(text, TIME_FORMAT)
        .ok()
        .filter(|time| time.format(TIME_FORMAT).to_string() == text)
}

const TIME_FORMAT: &str = "%H:%M";

/// Combines the two halves of a composite field.
///
/// A missing date yields no value. A missing or malformed time yields the
/// date at midnight.
pub fn combine(date: Option<NaiveDate>, time: Option<&str>) -> Option<NaiveDateTime> {
    let date = date?;
    let time = time.and_then(parse_time).unwrap_or(NaiveTime::MIN);
    Some(date.and_time(time))
}
