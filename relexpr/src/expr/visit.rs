//! Visitor interfaces over [`Expr`].
//!
//! - [`Visitor`] is the return-value visitor: one method per node shape, each receiving the
//!   node itself and its destructured parts. [`Expr::accept`] performs the exhaustive match.
//! - [`TypeVisitor`] is the two-phase type-checking interface implemented by the type checker.
//!   `infer` runs bottom-up over already-typed children, `check` runs top-down with an
//!   expected type and returns the annotated tree.
use std::sync::Arc;

use crate::error::Result;
use crate::expr::ops::{BinaryOp, BuiltinOp, Constant, QuantOp, UnaryOp};
use crate::expr::{BoundVar, Expr};
use crate::types::Type;

/// Return-value visitor.
pub trait Visitor {
    type Output;

    fn visit_binary(&mut self, node: &Expr, op: BinaryOp, left: &Expr, right: &Expr)
    -> Self::Output;

    fn visit_unary(&mut self, node: &Expr, op: UnaryOp, sub: &Expr) -> Self::Output;

    fn visit_quant(
        &mut self,
        node: &Expr,
        op: QuantOp,
        vars: &[BoundVar],
        body: &Expr,
    ) -> Self::Output;

    fn visit_ite(
        &mut self,
        node: &Expr,
        condition: &Expr,
        then_branch: &Expr,
        else_branch: &Expr,
    ) -> Self::Output;

    fn visit_let(&mut self, node: &Expr, var: &Arc<str>, value: &Expr, body: &Expr)
    -> Self::Output;

    fn visit_call(&mut self, node: &Expr, func: &Arc<str>, args: &[Expr]) -> Self::Output;

    fn visit_constant(&mut self, node: &Expr, constant: &Constant) -> Self::Output;

    fn visit_variable(&mut self, node: &Expr, name: &Arc<str>) -> Self::Output;

    fn visit_builtin(&mut self, node: &Expr, op: BuiltinOp, args: &[Expr]) -> Self::Output;

    fn visit_join(&mut self, node: &Expr, left: &Expr, right: &Expr) -> Self::Output;

    fn visit_sig(&mut self, node: &Expr, label: &Arc<str>) -> Self::Output;

    fn visit_field(&mut self, node: &Expr, sig: &Arc<str>, label: &Arc<str>) -> Self::Output;
}

/// Two-phase type checker.
pub trait TypeVisitor {
    /// Bottom-up: the type of `node`, computed from its children.
    fn infer(&mut self, node: &Expr) -> Result<Type>;

    /// Top-down: resolve `node` against `expected` and return a fully typed copy.
    fn check(&mut self, node: &Expr, expected: &Type) -> Result<Expr>;
}

/// Counts nodes, bound expressions included. Backs [`Expr::size`].
pub(crate) struct NodeCounter;

impl NodeCounter {
    fn sum<'a>(&mut self, children: impl IntoIterator<Item = &'a Expr>) -> usize {
        1 + children.into_iter().map(|c| c.accept(self)).sum::<usize>()
    }
}

impl Visitor for NodeCounter {
    type Output = usize;

    fn visit_binary(&mut self, _: &Expr, _: BinaryOp, left: &Expr, right: &Expr) -> usize {
        self.sum([left, right])
    }

    fn visit_unary(&mut self, _: &Expr, _: UnaryOp, sub: &Expr) -> usize {
        self.sum([sub])
    }

    fn visit_quant(&mut self, _: &Expr, _: QuantOp, vars: &[BoundVar], body: &Expr) -> usize {
        self.sum(vars.iter().map(|v| &v.bound).chain([body]))
    }

    fn visit_ite(&mut self, _: &Expr, c: &Expr, t: &Expr, e: &Expr) -> usize {
        self.sum([c, t, e])
    }

    fn visit_let(&mut self, _: &Expr, _: &Arc<str>, value: &Expr, body: &Expr) -> usize {
        self.sum([value, body])
    }

    fn visit_call(&mut self, _: &Expr, _: &Arc<str>, args: &[Expr]) -> usize {
        self.sum(args)
    }

    fn visit_constant(&mut self, _: &Expr, _: &Constant) -> usize {
        1
    }

    fn visit_variable(&mut self, _: &Expr, _: &Arc<str>) -> usize {
        1
    }

    fn visit_builtin(&mut self, _: &Expr, _: BuiltinOp, args: &[Expr]) -> usize {
        self.sum(args)
    }

    fn visit_join(&mut self, _: &Expr, left: &Expr, right: &Expr) -> usize {
        self.sum([left, right])
    }

    fn visit_sig(&mut self, _: &Expr, _: &Arc<str>) -> usize {
        1
    }

    fn visit_field(&mut self, _: &Expr, _: &Arc<str>, _: &Arc<str>) -> usize {
        1
    }
}
