#![allow(unused_variables)]

use super::*;

pub trait VisitMut {
    fn visit_expr_mut(&mut self, i: &mut Expr) {
        visit_expr_mut(self, i);
    }

    fn visit_expr_aggregate_mut(&mut self, i: &mut ExprAggregate) {
        visit_expr_aggregate_mut(self, i);
    }

    fn visit_expr_arg_mut(&mut self, i: &mut ExprArg) {}

    fn visit_expr_binary_op_mut(&mut self, i: &mut ExprBinaryOp) {
        visit_expr_binary_op_mut(self, i);
    }

    fn visit_expr_call_mut(&mut self, i: &mut ExprCall) {
        visit_expr_call_mut(self, i);
    }

    fn visit_expr_captured_mut(&mut self, i: &mut ExprCaptured) {}

    fn visit_expr_column_mut(&mut self, i: &mut ExprColumn) {}

    fn visit_expr_convert_mut(&mut self, i: &mut ExprConvert) {
        visit_expr_convert_mut(self, i);
    }

    fn visit_expr_entity_mut(&mut self, i: &mut ExprEntity) {
        visit_expr_entity_mut(self, i);
    }

    fn visit_expr_in_list_mut(&mut self, i: &mut ExprInList) {
        visit_expr_in_list_mut(self, i);
    }

    fn visit_expr_list_mut(&mut self, i: &mut ExprList) {
        visit_expr_list_mut(self, i);
    }

    fn visit_expr_member_mut(&mut self, i: &mut ExprMember) {
        visit_expr_member_mut(self, i);
    }

    fn visit_expr_record_mut(&mut self, i: &mut ExprRecord) {
        visit_expr_record_mut(self, i);
    }

    fn visit_expr_table_mut(&mut self, i: &mut ExprTable) {}

    fn visit_expr_unary_op_mut(&mut self, i: &mut ExprUnaryOp) {
        visit_expr_unary_op_mut(self, i);
    }

    fn visit_join_mut(&mut self, i: &mut Join) {
        visit_join_mut(self, i);
    }

    fn visit_projection_mut(&mut self, i: &mut Projection) {
        visit_projection_mut(self, i);
    }

    fn visit_select_mut(&mut self, i: &mut Select) {
        visit_select_mut(self, i);
    }

    fn visit_value_mut(&mut self, i: &mut Value) {}
}

impl<V: VisitMut + ?Sized> VisitMut for &mut V {
    fn visit_expr_mut(&mut self, i: &mut Expr) {
        VisitMut::visit_expr_mut(&mut **self, i);
    }

    fn visit_expr_aggregate_mut(&mut self, i: &mut ExprAggregate) {
        VisitMut::visit_expr_aggregate_mut(&mut **self, i);
    }

    fn visit_expr_arg_mut(&mut self, i: &mut ExprArg) {
        VisitMut::visit_expr_arg_mut(&mut **self, i);
    }

    fn visit_expr_binary_op_mut(&mut self, i: &mut ExprBinaryOp) {
        VisitMut::visit_expr_binary_op_mut(&mut **self, i);
    }

    fn visit_expr_call_mut(&mut self, i: &mut ExprCall) {
        VisitMut::visit_expr_call_mut(&mut **self, i);
    }

    fn visit_expr_captured_mut(&mut self, i: &mut ExprCaptured) {
        VisitMut::visit_expr_captured_mut(&mut **self, i);
    }

    fn visit_expr_column_mut(&mut self, i: &mut ExprColumn) {
        VisitMut::visit_expr_column_mut(&mut **self, i);
    }

    fn visit_expr_convert_mut(&mut self, i: &mut ExprConvert) {
        VisitMut::visit_expr_convert_mut(&mut **self, i);
    }

    fn visit_expr_entity_mut(&mut self, i: &mut ExprEntity) {
        VisitMut::visit_expr_entity_mut(&mut **self, i);
    }

    fn visit_expr_in_list_mut(&mut self, i: &mut ExprInList) {
        VisitMut::visit_expr_in_list_mut(&mut **self, i);
    }

    fn visit_expr_list_mut(&mut self, i: &mut ExprList) {
        VisitMut::visit_expr_list_mut(&mut **self, i);
    }

    fn visit_expr_member_mut(&mut self, i: &mut ExprMember) {
        VisitMut::visit_expr_member_mut(&mut **self, i);
    }

    fn visit_expr_record_mut(&mut self, i: &mut ExprRecord) {
        VisitMut::visit_expr_record_mut(&mut **self, i);
    }

    fn visit_expr_table_mut(&mut self, i: &mut ExprTable) {
        VisitMut::visit_expr_table_mut(&mut **self, i);
    }

    fn visit_expr_unary_op_mut(&mut self, i: &mut ExprUnaryOp) {
        VisitMut::visit_expr_unary_op_mut(&mut **self, i);
    }

    fn visit_join_mut(&mut self, i: &mut Join) {
        VisitMut::visit_join_mut(&mut **self, i);
    }

    fn visit_projection_mut(&mut self, i: &mut Projection) {
        VisitMut::visit_projection_mut(&mut **self, i);
    }

    fn visit_select_mut(&mut self, i: &mut Select) {
        VisitMut::visit_select_mut(&mut **self, i);
    }

    fn visit_value_mut(&mut self, i: &mut Value) {
        VisitMut::visit_value_mut(&mut **self, i);
    }
}

pub fn visit_expr_mut<V>(v: &mut V, node: &mut Expr)
where
    V: VisitMut + ?Sized,
{
    match node {
        Expr::Aggregate(expr) => v.visit_expr_aggregate_mut(expr),
        Expr::Arg(expr) => v.visit_expr_arg_mut(expr),
        Expr::BinaryOp(expr) => v.visit_expr_binary_op_mut(expr),
        Expr::Call(expr) => v.visit_expr_call_mut(expr),
        Expr::Captured(expr) => v.visit_expr_captured_mut(expr),
        Expr::Column(expr) => v.visit_expr_column_mut(expr),
        Expr::Convert(expr) => v.visit_expr_convert_mut(expr),
        Expr::Entity(expr) => v.visit_expr_entity_mut(expr),
        Expr::InList(expr) => v.visit_expr_in_list_mut(expr),
        Expr::Join(expr) => v.visit_join_mut(expr),
        Expr::List(expr) => v.visit_expr_list_mut(expr),
        Expr::Member(expr) => v.visit_expr_member_mut(expr),
        Expr::Projection(expr) => v.visit_projection_mut(expr),
        Expr::Record(expr) => v.visit_expr_record_mut(expr),
        Expr::Select(expr) => v.visit_select_mut(expr),
        Expr::Table(expr) => v.visit_expr_table_mut(expr),
        Expr::UnaryOp(expr) => v.visit_expr_unary_op_mut(expr),
        Expr::Value(expr) => v.visit_value_mut(expr),
    }
}

pub fn visit_expr_aggregate_mut<V>(v: &mut V, node: &mut ExprAggregate)
where
    V: VisitMut + ?Sized,
{
    if let Some(expr) = &mut node.expr {
        v.visit_expr_mut(expr);
    }
}

pub fn visit_expr_binary_op_mut<V>(v: &mut V, node: &mut ExprBinaryOp)
where
    V: VisitMut + ?Sized,
{
    v.visit_expr_mut(&mut node.lhs);
    v.visit_expr_mut(&mut node.rhs);
}

pub fn visit_expr_call_mut<V>(v: &mut V, node: &mut ExprCall)
where
    V: VisitMut + ?Sized,
{
    if let Some(object) = &mut node.object {
        v.visit_expr_mut(object);
    }

    for arg in &mut node.args {
        v.visit_expr_mut(arg);
    }
}

pub fn visit_expr_convert_mut<V>(v: &mut V, node: &mut ExprConvert)
where
    V: VisitMut + ?Sized,
{
    v.visit_expr_mut(&mut node.expr);
}

pub fn visit_expr_entity_mut<V>(v: &mut V, node: &mut ExprEntity)
where
    V: VisitMut + ?Sized,
{
    if let Binding::Members(bindings) = &mut node.binding {
        for binding in bindings {
            v.visit_expr_mut(&mut binding.expr);
        }
    }
}

pub fn visit_expr_in_list_mut<V>(v: &mut V, node: &mut ExprInList)
where
    V: VisitMut + ?Sized,
{
    v.visit_expr_mut(&mut node.expr);

    for item in &mut node.list {
        v.visit_expr_mut(item);
    }
}

pub fn visit_expr_list_mut<V>(v: &mut V, node: &mut ExprList)
where
    V: VisitMut + ?Sized,
{
    for item in &mut node.items {
        v.visit_expr_mut(item);
    }
}

pub fn visit_expr_member_mut<V>(v: &mut V, node: &mut ExprMember)
where
    V: VisitMut + ?Sized,
{
    v.visit_expr_mut(&mut node.source);
}

pub fn visit_expr_record_mut<V>(v: &mut V, node: &mut ExprRecord)
where
    V: VisitMut + ?Sized,
{
    for field in &mut node.fields {
        v.visit_expr_mut(&mut field.expr);
    }
}

pub fn visit_expr_unary_op_mut<V>(v: &mut V, node: &mut ExprUnaryOp)
where
    V: VisitMut + ?Sized,
{
    v.visit_expr_mut(&mut node.expr);
}

pub fn visit_join_mut<V>(v: &mut V, node: &mut Join)
where
    V: VisitMut + ?Sized,
{
    v.visit_expr_mut(&mut node.left);
    v.visit_expr_mut(&mut node.right);

    if let Some(on) = &mut node.on {
        v.visit_expr_mut(on);
    }
}

pub fn visit_projection_mut<V>(v: &mut V, node: &mut Projection)
where
    V: VisitMut + ?Sized,
{
    v.visit_select_mut(&mut node.select);
    v.visit_expr_mut(&mut node.projector);
}

/// Visits the parts of a select, source first.
pub fn visit_select_mut<V>(v: &mut V, node: &mut Select)
where
    V: VisitMut + ?Sized,
{
    if let Some(from) = &mut node.from {
        v.visit_expr_mut(from);
    }

    for column in &mut node.columns {
        v.visit_expr_mut(&mut column.expr);
    }

    if let Some(filter) = &mut node.filter {
        v.visit_expr_mut(filter);
    }

    for expr in &mut node.group_by {
        v.visit_expr_mut(expr);
    }

    for order_by in &mut node.order_by {
        v.visit_expr_mut(&mut order_by.expr);
    }

    if let Some(take) = &mut node.take {
        v.visit_expr_mut(take);
    }

    if let Some(skip) = &mut node.skip {
        v.visit_expr_mut(skip);
    }
}

pub fn for_each_expr_mut<F>(node: &mut Expr, f: F)
where
    F: FnMut(&mut Expr),
{
    struct ForEach<F> {
        f: F,
    }

    impl<F> VisitMut for ForEach<F>
    where
        F: FnMut(&mut Expr),
    {
        fn visit_expr_mut(&mut self, node: &mut Expr) {
            visit_expr_mut(self, node);
            (self.f)(node);
        }
    }

    ForEach { f }.visit_expr_mut(node);
}
