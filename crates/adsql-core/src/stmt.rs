mod direction;
pub use direction::Direction;

mod eval;

mod expr;
pub use expr::Expr;

mod expr_aggregate;
pub use expr_aggregate::{AggregateFunc, ExprAggregate};

mod expr_arg;
pub use expr_arg::ExprArg;

mod expr_binary_op;
pub use expr_binary_op::ExprBinaryOp;

mod expr_call;
pub use expr_call::ExprCall;

mod expr_captured;
pub use expr_captured::ExprCaptured;

mod expr_column;
pub use expr_column::ExprColumn;

mod expr_convert;
pub use expr_convert::ExprConvert;

mod expr_entity;
pub use expr_entity::{Binding, ExprEntity, MemberBinding};

mod expr_in_list;
pub use expr_in_list::ExprInList;

mod expr_list;
pub use expr_list::ExprList;

mod expr_member;
pub use expr_member::ExprMember;

mod expr_record;
pub use expr_record::{ExprRecord, RecordField};

mod expr_table;
pub use expr_table::ExprTable;

mod expr_unary_op;
pub use expr_unary_op::ExprUnaryOp;

mod input;
pub use input::{ConstInput, Input};

mod join;
pub use join::{Join, JoinKind};

mod method;
pub use method::{DateMethod, DatePart, Method, NumMethod, StrMethod};

mod op_binary;
pub use op_binary::BinaryOp;

mod op_unary;
pub use op_unary::UnaryOp;

mod projection;
pub use projection::{Aggregator, Projection};

mod select;
pub use select::{ColumnDecl, OrderBy, Select};

mod table_alias;
pub use table_alias::TableAlias;

mod ty;
pub use ty::Type;

mod value;
pub use value::Value;

mod value_enum;
pub use value_enum::ValueEnum;

pub mod visit;
pub use visit::Visit;

pub mod visit_mut;
pub use visit_mut::VisitMut;
