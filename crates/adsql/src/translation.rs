use adsql_core::{
    stmt::{Aggregator, Expr, TableAlias, Value},
    Error, Result,
};
use adsql_sql::Param;

/// A translated query: the SQL command plus everything needed to turn its
/// rows back into values.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    /// The command text.
    pub sql: String,

    /// Parameters, in marker order. Values are already coerced to their
    /// storage form.
    pub params: Vec<Param>,

    /// Output column names, in the order the command returns them.
    pub columns: Vec<String>,

    /// Alias of the command's select. The projector reads output columns
    /// under this alias.
    pub alias: TableAlias,

    /// Shape of one materialized row.
    pub projector: Expr,

    pub aggregator: Option<Aggregator>,

    /// Commands for nested projections, in the order they appear in the
    /// projector. Each runs once per row of this command.
    pub children: Vec<Translation>,

    /// For a child command: the parent output columns bound to its
    /// arguments, by position.
    pub outer_columns: Vec<String>,
}

impl Translation {
    /// Position of the output column `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Parameter values for one run of the command. `outer` holds the values
    /// of `outer_columns` read from the parent row.
    pub fn param_values(&self, outer: &[Value]) -> Result<Vec<Value>> {
        self.params
            .iter()
            .map(|param| match param {
                Param::Value(value) => Ok(value.clone()),
                Param::Arg(position) => outer.get(*position).cloned().ok_or_else(|| {
                    Error::from_args(format_args!(
                        "outer value {position} not provided; the command reads {} outer columns",
                        self.outer_columns.len()
                    ))
                }),
            })
            .collect()
    }

    /// Values of this command's `outer_columns`, read from a parent row.
    pub(crate) fn outer_values(&self, parent: &Translation, row: &[Value]) -> Result<Vec<Value>> {
        self.outer_columns
            .iter()
            .map(|name| {
                parent
                    .column_index(name)
                    .and_then(|index| row.get(index))
                    .cloned()
                    .ok_or_else(|| {
                        Error::from_args(format_args!("parent row has no column `{name}`"))
                    })
            })
            .collect()
    }
}
