use crate::stmt::Expr;

/// Static filter on an association: the target's `column` must equal the
/// string `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeFilter {
    pub column: String,
    pub value: String,
}

/// The filter that applies to an association member.
#[derive(Debug, Clone, Copy)]
pub enum AssociationFilter<'a> {
    /// Registered with [`Builder::associate_with`](super::Builder::associate_with).
    /// Reads the related row as `Arg(0)`.
    Policy(&'a Expr),

    Attribute(&'a AttributeFilter),
}

/// What to do when one association member has both a policy filter and an
/// attribute filter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FilterPrecedence {
    /// The policy filter is used and the attribute filter ignored.
    #[default]
    PolicyFirst,

    /// Building the schema fails.
    Reject,
}
