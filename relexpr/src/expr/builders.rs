//! Typed builders.
//!
//! Later passes (the conjunction promoter, the boolean encoder) synthesize new nodes without
//! re-running type inference. Every builder requires fully typed operands, checks the
//! relevant rule from [`typing`], and returns a node that is typed by construction.
//!
//! A failure here is never the user's fault: it means a front-end pass handed an untyped or
//! ill-typed operand to a builder, so it is reported as [`Error::Internal`].
use log::trace;

use crate::error::{Error, Result};
use crate::expr::ops::{BinaryOp, Constant, UnaryOp};
use crate::expr::typing::{self, TypingFault};
use crate::expr::{Expr, ExprKind};
use crate::pos::Pos;
use crate::types::Type;

impl Expr {
    /// This node's type, or an internal error if type checking has not run yet.
    pub fn require_type(&self) -> Result<&Type> {
        self.ty()
            .ok_or_else(|| self.internal_error("The node is not yet typechecked"))
    }

    fn rule_failure(&self, builder: &str, fault: TypingFault) -> Error {
        self.internal_error(format!("Cannot perform {builder}(): {fault}"))
    }

    /// `self in rhs`, a formula.
    ///
    /// # Errors
    /// [`Error::Internal`] if either operand is untyped, or their arities differ or are 0.
    pub fn r#in(self, rhs: Expr) -> Result<Expr> {
        let ty = typing::rule_in(self.require_type()?, rhs.require_type()?)
            .map_err(|fault| self.rule_failure("in", fault))?;
        Ok(self.binary_typed(BinaryOp::In, rhs, ty))
    }

    /// `!self`.
    ///
    /// # Errors
    /// [`Error::Internal`] if `self` is untyped or not a formula.
    pub fn not(self) -> Result<Expr> {
        let ty =
            typing::rule_not(self.require_type()?).map_err(|fault| self.rule_failure("not", fault))?;
        let pos = self.pos().clone();
        Ok(Expr::make_typed(
            pos,
            Some(ty),
            ExprKind::Unary {
                op: UnaryOp::Not,
                sub: Box::new(self),
            },
        ))
    }

    /// `self && rhs`.
    ///
    /// # Errors
    /// [`Error::Internal`] if either operand is untyped or not a formula.
    pub fn and(self, rhs: Expr) -> Result<Expr> {
        let ty = typing::rule_and(self.require_type()?, rhs.require_type()?)
            .map_err(|fault| self.rule_failure("and", fault))?;
        Ok(self.binary_typed(BinaryOp::And, rhs, ty))
    }

    /// Relational join `self.rhs`.
    ///
    /// # Errors
    /// [`Error::Internal`] if either operand is untyped or the join has arity 0.
    pub fn join(self, rhs: Expr) -> Result<Expr> {
        let ty = typing::rule_join(self.require_type()?, rhs.require_type()?)
            .map_err(|fault| self.rule_failure("join", fault))?;
        trace!("join at {} has type {ty}", self.pos());
        let pos = self.pos().clone();
        Ok(Expr::make_typed(
            pos,
            Some(ty),
            ExprKind::Join {
                left: Box::new(self),
                right: Box::new(rhs),
            },
        ))
    }

    /// Relational product `self -> rhs`.
    ///
    /// # Errors
    /// [`Error::Internal`] if either operand is untyped or the product has arity 0.
    pub fn product(self, rhs: Expr) -> Result<Expr> {
        let ty = typing::rule_product(self.require_type()?, rhs.require_type()?)
            .map_err(|fault| self.rule_failure("product", fault))?;
        Ok(self.binary_typed(BinaryOp::Arrow, rhs, ty))
    }

    /// The universal set at `pos`.
    pub fn univ(pos: Pos) -> Expr {
        Expr::make_typed(
            pos,
            Some(Type::relation([crate::types::UNIV])),
            ExprKind::Constant(Constant::Univ),
        )
    }

    fn binary_typed(self, op: BinaryOp, rhs: Expr, ty: Type) -> Expr {
        let pos = self.pos().clone();
        Expr::make_typed(
            pos,
            Some(ty),
            ExprKind::Binary {
                op,
                left: Box::new(self),
                right: Box::new(rhs),
            },
        )
    }
}
