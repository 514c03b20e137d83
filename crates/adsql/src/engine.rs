mod alias;
use alias::AliasGen;

mod association;

mod bind;
pub use bind::{Bind, Prebound};

mod columnize;
use columnize::columnize;

mod correlate;
use correlate::{correlate, Child};

mod expand_composite;
use expand_composite::expand_composite;

mod project_columns;
use project_columns::project_columns;

mod rewrite_composite;
use rewrite_composite::rewrite_composite;

#[cfg(test)]
mod tests;

use crate::{Coercion, Materializer, Settings, Translation};

use adsql_core::{
    err,
    schema::ColumnMapping,
    stmt::{Expr, ExprColumn, Projection, TableAlias},
    Error, Result, Schema,
};
use adsql_sql::{Param, Serializer};
use std::{sync::Arc, time::Instant};

/// Translates query expressions into Advantage SQL.
///
/// An engine holds the schema, the settings and the binder. It keeps no
/// per-query state, so one engine can translate from many threads at once.
pub struct Engine {
    schema: Arc<Schema>,
    settings: Settings,
    binder: Box<dyn Bind>,
}

impl Engine {
    pub fn new(schema: impl Into<Arc<Schema>>) -> Engine {
        Engine {
            schema: schema.into(),
            settings: Settings::default(),
            binder: Box::new(Prebound),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Engine {
        self.settings = settings;
        self
    }

    pub fn with_binder(mut self, binder: impl Bind + 'static) -> Engine {
        self.binder = Box::new(binder);
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn coercion(&self) -> Coercion<'_> {
        Coercion::new(&self.schema, self.settings.blank_strings_are_null())
    }

    pub fn materializer(&self) -> Materializer<'_> {
        Materializer::new(&self.schema, self.coercion())
    }

    /// Translates a query expression into a command.
    ///
    /// The expression goes through, in order: composite rewriting, binding,
    /// composite rewriting again (binding may introduce new comparisons),
    /// columnization with association resolution, composite expansion,
    /// column projection and finally formatting.
    pub fn translate(&self, expr: &Expr) -> Result<Translation> {
        let span = tracing::debug_span!("translate");
        let _enter = span.enter();
        let start = Instant::now();

        let translation = self
            .translate_expr(expr.clone())
            .map_err(|err| err.context(err!("translating query")))?;

        tracing::debug!(
            sql = %translation.sql,
            params = translation.params.len(),
            children = translation.children.len(),
            "translated query"
        );

        if self.settings.log_timing {
            tracing::debug!(
                elapsed_us = start.elapsed().as_micros() as u64,
                "translation finished"
            );
        }

        Ok(translation)
    }

    /// Formats an already-resolved expression as SQL, without running any of
    /// the translation passes.
    pub fn format(&self, expr: &Expr) -> Result<String> {
        let mut params = Vec::<Param>::new();
        self.serializer().serialize(expr, &mut params)
    }

    fn serializer(&self) -> Serializer<'_> {
        Serializer::advantage(&self.schema).param_style(self.settings.param_style)
    }

    fn translate_expr(&self, mut expr: Expr) -> Result<Translation> {
        rewrite_composite(&self.schema, &mut expr)?;
        let mut expr = self.binder.bind(&self.schema, expr)?;
        rewrite_composite(&self.schema, &mut expr)?;

        let mut aliases = AliasGen::after(&expr);
        columnize(&self.schema, &mut aliases, &mut expr)?;
        expand_composite(&self.schema, &mut expr);
        project_columns(&mut expr);

        match expr {
            Expr::Projection(projection) => self.translate_projection(*projection, vec![]),
            Expr::Select(select) => {
                // A bare select materializes as a record of its columns
                let projector = Expr::record(select.columns.iter().map(|decl| {
                    let column = ExprColumn::new(select.alias, &decl.name, decl.expr.infer_ty());
                    (decl.name.clone(), Expr::from(column))
                }));

                self.translate_projection(
                    Projection {
                        select: *select,
                        projector,
                        aggregator: None,
                    },
                    vec![],
                )
            }
            _ => Err(Error::unsupported_operation(
                "only selects and projections can be translated to a command",
            )),
        }
    }

    fn translate_projection(
        &self,
        mut projection: Projection,
        outer_columns: Vec<String>,
    ) -> Result<Translation> {
        let children = correlate(&mut projection)
            .into_iter()
            .map(|Child { projection, outer_columns }| {
                self.translate_projection(projection, outer_columns)
            })
            .collect::<Result<Vec<_>>>()?;

        let Projection {
            select,
            projector,
            aggregator,
        } = projection;

        let alias = select.alias;
        let columns = select.columns.iter().map(|decl| decl.name.clone()).collect();

        let mut params = Vec::<Param>::new();
        let sql = self
            .serializer()
            .serialize(&Expr::Select(Box::new(select)), &mut params)
            .map_err(|err| err.context(err!("formatting select {alias}")))?;

        let coercion = self.coercion();
        let params = params
            .into_iter()
            .map(|param| coercion.param(param))
            .collect();

        Ok(Translation {
            sql,
            params,
            columns,
            alias,
            projector,
            aggregator,
            children,
            outer_columns,
        })
    }
}

/// Reference to `column` of the table introduced under `alias`.
fn column_expr(alias: TableAlias, column: &ColumnMapping) -> Expr {
    ExprColumn::new(alias, &column.name, column.ty.clone())
        .with_sql_ty(column.sql_ty)
        .into()
}
