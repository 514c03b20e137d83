#![allow(unused_variables)]

use super::*;

pub trait Visit {
    fn visit_expr(&mut self, i: &Expr) {
        visit_expr(self, i);
    }

    fn visit_expr_aggregate(&mut self, i: &ExprAggregate) {
        visit_expr_aggregate(self, i);
    }

    fn visit_expr_arg(&mut self, i: &ExprArg) {}

    fn visit_expr_binary_op(&mut self, i: &ExprBinaryOp) {
        visit_expr_binary_op(self, i);
    }

    fn visit_expr_call(&mut self, i: &ExprCall) {
        visit_expr_call(self, i);
    }

    fn visit_expr_captured(&mut self, i: &ExprCaptured) {}

    fn visit_expr_column(&mut self, i: &ExprColumn) {}

    fn visit_expr_convert(&mut self, i: &ExprConvert) {
        visit_expr_convert(self, i);
    }

    fn visit_expr_entity(&mut self, i: &ExprEntity) {
        visit_expr_entity(self, i);
    }

    fn visit_expr_in_list(&mut self, i: &ExprInList) {
        visit_expr_in_list(self, i);
    }

    fn visit_expr_list(&mut self, i: &ExprList) {
        visit_expr_list(self, i);
    }

    fn visit_expr_member(&mut self, i: &ExprMember) {
        visit_expr_member(self, i);
    }

    fn visit_expr_record(&mut self, i: &ExprRecord) {
        visit_expr_record(self, i);
    }

    fn visit_expr_table(&mut self, i: &ExprTable) {}

    fn visit_expr_unary_op(&mut self, i: &ExprUnaryOp) {
        visit_expr_unary_op(self, i);
    }

    fn visit_join(&mut self, i: &Join) {
        visit_join(self, i);
    }

    fn visit_projection(&mut self, i: &Projection) {
        visit_projection(self, i);
    }

    fn visit_select(&mut self, i: &Select) {
        visit_select(self, i);
    }

    fn visit_value(&mut self, i: &Value) {}
}

impl<V: Visit + ?Sized> Visit for &mut V {
    fn visit_expr(&mut self, i: &Expr) {
        Visit::visit_expr(&mut **self, i);
    }

    fn visit_expr_aggregate(&mut self, i: &ExprAggregate) {
        Visit::visit_expr_aggregate(&mut **self, i);
    }

    fn visit_expr_arg(&mut self, i: &ExprArg) {
        Visit::visit_expr_arg(&mut **self, i);
    }

    fn visit_expr_binary_op(&mut self, i: &ExprBinaryOp) {
        Visit::visit_expr_binary_op(&mut **self, i);
    }

    fn visit_expr_call(&mut self, i: &ExprCall) {
        Visit::visit_expr_call(&mut **self, i);
    }

    fn visit_expr_captured(&mut self, i: &ExprCaptured) {
        Visit::visit_expr_captured(&mut **self, i);
    }

    fn visit_expr_column(&mut self, i: &ExprColumn) {
        Visit::visit_expr_column(&mut **self, i);
    }

    fn visit_expr_convert(&mut self, i: &ExprConvert) {
        Visit::visit_expr_convert(&mut **self, i);
    }

    fn visit_expr_entity(&mut self, i: &ExprEntity) {
        Visit::visit_expr_entity(&mut **self, i);
    }

    fn visit_expr_in_list(&mut self, i: &ExprInList) {
        Visit::visit_expr_in_list(&mut **self, i);
    }

    fn visit_expr_list(&mut self, i: &ExprList) {
        Visit::visit_expr_list(&mut **self, i);
    }

    fn visit_expr_member(&mut self, i: &ExprMember) {
        Visit::visit_expr_member(&mut **self, i);
    }

    fn visit_expr_record(&mut self, i: &ExprRecord) {
        Visit::visit_expr_record(&mut **self, i);
    }

    fn visit_expr_table(&mut self, i: &ExprTable) {
        Visit::visit_expr_table(&mut **self, i);
    }

    fn visit_expr_unary_op(&mut self, i: &ExprUnaryOp) {
        Visit::visit_expr_unary_op(&mut **self, i);
    }

    fn visit_join(&mut self, i: &Join) {
        Visit::visit_join(&mut **self, i);
    }

    fn visit_projection(&mut self, i: &Projection) {
        Visit::visit_projection(&mut **self, i);
    }

    fn visit_select(&mut self, i: &Select) {
        Visit::visit_select(&mut **self, i);
    }

    fn visit_value(&mut self, i: &Value) {
        Visit::visit_value(&mut **self, i);
    }
}

pub fn visit_expr<V>(v: &mut V, node: &Expr)
where
    V: Visit + ?Sized,
{
    match node {
        Expr::Aggregate(expr) => v.visit_expr_aggregate(expr),
        Expr::Arg(expr) => v.visit_expr_arg(expr),
        Expr::BinaryOp(expr) => v.visit_expr_binary_op(expr),
        Expr::Call(expr) => v.visit_expr_call(expr),
        Expr::Captured(expr) => v.visit_expr_captured(expr),
        Expr::Column(expr) => v.visit_expr_column(expr),
        Expr::Convert(expr) => v.visit_expr_convert(expr),
        Expr::Entity(expr) => v.visit_expr_entity(expr),
        Expr::InList(expr) => v.visit_expr_in_list(expr),
        Expr::Join(expr) => v.visit_join(expr),
        Expr::List(expr) => v.visit_expr_list(expr),
        Expr::Member(expr) => v.visit_expr_member(expr),
        Expr::Projection(expr) => v.visit_projection(expr),
        Expr::Record(expr) => v.visit_expr_record(expr),
        Expr::Select(expr) => v.visit_select(expr),
        Expr::Table(expr) => v.visit_expr_table(expr),
        Expr::UnaryOp(expr) => v.visit_expr_unary_op(expr),
        Expr::Value(expr) => v.visit_value(expr),
    }
}

pub fn visit_expr_aggregate<V>(v: &mut V, node: &ExprAggregate)
where
    V: Visit + ?Sized,
{
    if let Some(expr) = &node.expr {
        v.visit_expr(expr);
    }
}

pub fn visit_expr_binary_op<V>(v: &mut V, node: &ExprBinaryOp)
where
    V: Visit + ?Sized,
{
    v.visit_expr(&node.lhs);
    v.visit_expr(&node.rhs);
}

pub fn visit_expr_call<V>(v: &mut V, node: &ExprCall)
where
    V: Visit + ?Sized,
{
    if let Some(object) = &node.object {
        v.visit_expr(object);
    }

    for arg in &node.args {
        v.visit_expr(arg);
    }
}

pub fn visit_expr_convert<V>(v: &mut V, node: &ExprConvert)
where
    V: Visit + ?Sized,
{
    v.visit_expr(&node.expr);
}

pub fn visit_expr_entity<V>(v: &mut V, node: &ExprEntity)
where
    V: Visit + ?Sized,
{
    if let Binding::Members(bindings) = &node.binding {
        for binding in bindings {
            v.visit_expr(&binding.expr);
        }
    }
}

pub fn visit_expr_in_list<V>(v: &mut V, node: &ExprInList)
where
    V: Visit + ?Sized,
{
    v.visit_expr(&node.expr);

    for item in &node.list {
        v.visit_expr(item);
    }
}

pub fn visit_expr_list<V>(v: &mut V, node: &ExprList)
where
    V: Visit + ?Sized,
{
    for item in &node.items {
        v.visit_expr(item);
    }
}

pub fn visit_expr_member<V>(v: &mut V, node: &ExprMember)
where
    V: Visit + ?Sized,
{
    v.visit_expr(&node.source);
}

pub fn visit_expr_record<V>(v: &mut V, node: &ExprRecord)
where
    V: Visit + ?Sized,
{
    for field in &node.fields {
        v.visit_expr(&field.expr);
    }
}

pub fn visit_expr_unary_op<V>(v: &mut V, node: &ExprUnaryOp)
where
    V: Visit + ?Sized,
{
    v.visit_expr(&node.expr);
}

pub fn visit_join<V>(v: &mut V, node: &Join)
where
    V: Visit + ?Sized,
{
    v.visit_expr(&node.left);
    v.visit_expr(&node.right);

    if let Some(on) = &node.on {
        v.visit_expr(on);
    }
}

pub fn visit_projection<V>(v: &mut V, node: &Projection)
where
    V: Visit + ?Sized,
{
    v.visit_select(&node.select);
    v.visit_expr(&node.projector);
}

/// Visits the parts of a select, source first.
pub fn visit_select<V>(v: &mut V, node: &Select)
where
    V: Visit + ?Sized,
{
    if let Some(from) = &node.from {
        v.visit_expr(from);
    }

    for column in &node.columns {
        v.visit_expr(&column.expr);
    }

    if let Some(filter) = &node.filter {
        v.visit_expr(filter);
    }

    for expr in &node.group_by {
        v.visit_expr(expr);
    }

    for order_by in &node.order_by {
        v.visit_expr(&order_by.expr);
    }

    if let Some(take) = &node.take {
        v.visit_expr(take);
    }

    if let Some(skip) = &node.skip {
        v.visit_expr(skip);
    }
}

pub fn for_each_expr<F>(node: &Expr, f: F)
where
    F: FnMut(&Expr),
{
    struct ForEach<F> {
        f: F,
    }

    impl<F> Visit for ForEach<F>
    where
        F: FnMut(&Expr),
    {
        fn visit_expr(&mut self, node: &Expr) {
            visit_expr(self, node);
            (self.f)(node);
        }
    }

    ForEach { f }.visit_expr(node);
}
