use super::Expr;

/// An anonymous record, as built by `select new { .. }` style projections.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprRecord {
    pub fields: Vec<RecordField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    pub name: String,
    pub expr: Expr,
}

impl Expr {
    pub fn record<N: Into<String>>(fields: impl IntoIterator<Item = (N, Expr)>) -> Expr {
        ExprRecord {
            fields: fields
                .into_iter()
                .map(|(name, expr)| RecordField {
                    name: name.into(),
                    expr,
                })
                .collect(),
        }
        .into()
    }
}

impl From<ExprRecord> for Expr {
    fn from(value: ExprRecord) -> Self {
        Expr::Record(value)
    }
}
