//! Immutable expression trees.
//!
//! Role
//! - [`Expr`] is the node shared by the parser, the type checker, and the boolean encoder.
//!   Each node carries its source [`Pos`], an optional [`Type`] and a [`Multiplicity`] tag.
//! - [`ExprKind`] is the closed set of node shapes; adding a shape means extending the enum
//!   and every exhaustive match over it.
//! - Children are owned (`Box`/`Vec`), so a tree never shares a subtree between parents.
//!
//! Lifecycle
//! - The parser builds untyped nodes with the shape constructors ([`Expr::binary`],
//!   [`Expr::quant`], ...).
//! - The type checker attaches a type exactly once with [`Expr::with_type`].
//! - Later passes synthesize new well-typed nodes with the typed builders in [`builders`]
//!   (`in`, `not`, `and`, `join`, `product`, `univ`).
//!
//! Example
//! ```
//! use relexpr::prelude::*;
//!
//! let pos = Pos::new("model.als", 3, 7);
//! let f = Expr::constant(pos.clone(), Constant::True).with_type(Type::formula()).unwrap();
//! let g = Expr::constant(pos, Constant::False).with_type(Type::formula()).unwrap();
//! let both = f.and(g).unwrap();
//! assert!(matches!(both.kind(), ExprKind::Binary { op: BinaryOp::And, .. }));
//! ```
pub mod builders;
pub mod ops;
pub mod pretty;
pub mod typing;
pub mod visit;

use std::sync::Arc;

use smallvec::{SmallVec, smallvec};
use strum::{EnumIs, FromRepr};

use crate::error::{Error, Result};
use crate::expr::ops::{BinaryOp, BuiltinOp, Constant, QuantOp, UnaryOp};
use crate::expr::visit::{NodeCounter, TypeVisitor, Visitor};
use crate::pos::Pos;
use crate::types::Type;

/// Whether a node is a multiplicity constraint.
///
/// - `Unary`: the node has the form `(? X)`, e.g. `set X` or `one X`.
/// - `Compound`: the node is an arrow product with multiplicities (`X lone -> one Y`), or a
///   plain product where either operand is itself a multiplicity constraint.
/// - `None`: neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, FromRepr, EnumIs)]
#[repr(u8)]
pub enum Multiplicity {
    #[default]
    None = 0,
    Unary = 1,
    Compound = 2,
}

impl Multiplicity {
    /// Decode the raw `0 | 1 | 2` tag used by external collaborators.
    pub fn from_raw(raw: u8, pos: &Pos) -> Result<Self> {
        Self::from_repr(raw).ok_or_else(|| {
            Error::internal(
                pos.clone(),
                format!("Expr node's multiplicity must be 0, 1, or 2 (got {raw})."),
            )
        })
    }

    pub fn raw(self) -> u8 {
        self as u8
    }
}

/// A variable bound by a quantifier, together with the expression it ranges over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundVar {
    pub name: Arc<str>,
    pub bound: Expr,
}

impl BoundVar {
    pub fn new(name: impl Into<Arc<str>>, bound: Expr) -> Self {
        Self {
            name: name.into(),
            bound,
        }
    }
}

/// The shape of a node and its children.
#[derive(Debug, Clone, PartialEq, Eq, EnumIs)]
pub enum ExprKind {
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        sub: Box<Expr>,
    },
    Quant {
        op: QuantOp,
        vars: Vec<BoundVar>,
        body: Box<Expr>,
    },
    Ite {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Let {
        var: Arc<str>,
        value: Box<Expr>,
        body: Box<Expr>,
    },
    Call {
        func: Arc<str>,
        args: Vec<Expr>,
    },
    Constant(Constant),
    Variable {
        name: Arc<str>,
    },
    Builtin {
        op: BuiltinOp,
        args: Vec<Expr>,
    },
    /// Relational join `left.right`. Only produced by [`Expr::join`].
    Join {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Reference to a declared signature.
    Sig {
        label: Arc<str>,
    },
    /// Reference to a field declared in signature `sig`.
    Field {
        sig: Arc<str>,
        label: Arc<str>,
    },
}

/// Immutable expression node.
///
/// Equality is structural and includes positions, types, and multiplicity tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pos: Pos,
    ty: Option<Type>,
    mult: Multiplicity,
    kind: ExprKind,
}

impl Expr {
    /// Build an already-typed node. Used by the typed builders and the rewriter.
    pub(crate) fn make_typed(pos: Pos, ty: Option<Type>, kind: ExprKind) -> Self {
        let mult = Self::multiplicity_of(&kind);
        Self {
            pos,
            ty,
            mult,
            kind,
        }
    }

    fn multiplicity_of(kind: &ExprKind) -> Multiplicity {
        match kind {
            ExprKind::Unary { op, .. } if op.is_multiplicity_marker() => Multiplicity::Unary,
            ExprKind::Unary {
                op: UnaryOp::Noop,
                sub,
            } => sub.mult,
            ExprKind::Binary { op, left, right } if op.is_product() => {
                if op.carries_multiplicity() || !left.mult.is_none() || !right.mult.is_none() {
                    Multiplicity::Compound
                } else {
                    Multiplicity::None
                }
            }
            _ => Multiplicity::None,
        }
    }

    fn shaped(pos: Pos, kind: ExprKind) -> Self {
        Self::make_typed(pos, None, kind)
    }

    // ---------------------------------------------------------------------------------------
    // Shape constructors (untyped)
    // ---------------------------------------------------------------------------------------

    pub fn binary(pos: Pos, op: BinaryOp, left: Expr, right: Expr) -> Self {
        Self::shaped(
            pos,
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
        )
    }

    pub fn unary(pos: Pos, op: UnaryOp, sub: Expr) -> Self {
        Self::shaped(
            pos,
            ExprKind::Unary {
                op,
                sub: Box::new(sub),
            },
        )
    }

    pub fn quant(pos: Pos, op: QuantOp, vars: Vec<BoundVar>, body: Expr) -> Self {
        Self::shaped(
            pos,
            ExprKind::Quant {
                op,
                vars,
                body: Box::new(body),
            },
        )
    }

    pub fn ite(pos: Pos, condition: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        Self::shaped(
            pos,
            ExprKind::Ite {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
        )
    }

    pub fn let_in(pos: Pos, var: impl Into<Arc<str>>, value: Expr, body: Expr) -> Self {
        Self::shaped(
            pos,
            ExprKind::Let {
                var: var.into(),
                value: Box::new(value),
                body: Box::new(body),
            },
        )
    }

    pub fn call(pos: Pos, func: impl Into<Arc<str>>, args: Vec<Expr>) -> Self {
        Self::shaped(
            pos,
            ExprKind::Call {
                func: func.into(),
                args,
            },
        )
    }

    pub fn constant(pos: Pos, constant: Constant) -> Self {
        Self::shaped(pos, ExprKind::Constant(constant))
    }

    pub fn var(pos: Pos, name: impl Into<Arc<str>>) -> Self {
        Self::shaped(pos, ExprKind::Variable { name: name.into() })
    }

    pub fn builtin(pos: Pos, op: BuiltinOp, args: Vec<Expr>) -> Self {
        Self::shaped(pos, ExprKind::Builtin { op, args })
    }

    pub fn sig(pos: Pos, label: impl Into<Arc<str>>) -> Self {
        Self::shaped(
            pos,
            ExprKind::Sig {
                label: label.into(),
            },
        )
    }

    pub fn field(pos: Pos, sig: impl Into<Arc<str>>, label: impl Into<Arc<str>>) -> Self {
        Self::shaped(
            pos,
            ExprKind::Field {
                sig: sig.into(),
                label: label.into(),
            },
        )
    }

    /// Attach the type computed by the type checker.
    ///
    /// # Errors
    /// [`Error::Internal`] if the node already carries a type.
    pub fn with_type(self, ty: Type) -> Result<Self> {
        if self.ty.is_some() {
            return Err(self.internal_error("The node has already been typechecked"));
        }
        Ok(Self {
            ty: Some(ty),
            ..self
        })
    }

    // ---------------------------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------------------------

    pub fn pos(&self) -> &Pos {
        &self.pos
    }

    /// The type, or `None` before type checking.
    pub fn ty(&self) -> Option<&Type> {
        self.ty.as_ref()
    }

    pub fn is_typed(&self) -> bool {
        self.ty.is_some()
    }

    pub fn mult(&self) -> Multiplicity {
        self.mult
    }

    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    pub fn into_kind(self) -> ExprKind {
        self.kind
    }

    /// Direct children in source order. Quantifier bounds come before the body.
    pub fn children(&self) -> SmallVec<[&Expr; 3]> {
        match &self.kind {
            ExprKind::Binary { left, right, .. } | ExprKind::Join { left, right } => {
                smallvec![&**left, &**right]
            }
            ExprKind::Unary { sub, .. } => smallvec![&**sub],
            ExprKind::Quant { vars, body, .. } => vars
                .iter()
                .map(|v| &v.bound)
                .chain(std::iter::once(&**body))
                .collect(),
            ExprKind::Ite {
                condition,
                then_branch,
                else_branch,
            } => smallvec![&**condition, &**then_branch, &**else_branch],
            ExprKind::Let { value, body, .. } => smallvec![&**value, &**body],
            ExprKind::Call { args, .. } | ExprKind::Builtin { args, .. } => args.iter().collect(),
            ExprKind::Constant(_)
            | ExprKind::Variable { .. }
            | ExprKind::Sig { .. }
            | ExprKind::Field { .. } => SmallVec::new(),
        }
    }

    /// Number of nodes in this tree, bound expressions included.
    pub fn size(&self) -> usize {
        self.accept(&mut NodeCounter)
    }

    // ---------------------------------------------------------------------------------------
    // Dispatch
    // ---------------------------------------------------------------------------------------

    /// Dispatch to the visitor method matching this node's shape.
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match &self.kind {
            ExprKind::Binary { op, left, right } => visitor.visit_binary(self, *op, left, right),
            ExprKind::Unary { op, sub } => visitor.visit_unary(self, *op, sub),
            ExprKind::Quant { op, vars, body } => visitor.visit_quant(self, *op, vars, body),
            ExprKind::Ite {
                condition,
                then_branch,
                else_branch,
            } => visitor.visit_ite(self, condition, then_branch, else_branch),
            ExprKind::Let { var, value, body } => visitor.visit_let(self, var, value, body),
            ExprKind::Call { func, args } => visitor.visit_call(self, func, args),
            ExprKind::Constant(c) => visitor.visit_constant(self, c),
            ExprKind::Variable { name } => visitor.visit_variable(self, name),
            ExprKind::Builtin { op, args } => visitor.visit_builtin(self, *op, args),
            ExprKind::Join { left, right } => visitor.visit_join(self, left, right),
            ExprKind::Sig { label } => visitor.visit_sig(self, label),
            ExprKind::Field { sig, label } => visitor.visit_field(self, sig, label),
        }
    }

    /// Bottom-up type inference: compute this node's type from its (typed) children.
    pub fn accept_infer<V: TypeVisitor + ?Sized>(&self, visitor: &mut V) -> Result<Type> {
        visitor.infer(self)
    }

    /// Top-down type propagation: push `expected` into this node and return the typed tree.
    pub fn accept_check<V: TypeVisitor + ?Sized>(
        &self,
        visitor: &mut V,
        expected: &Type,
    ) -> Result<Expr> {
        visitor.check(self, expected)
    }

    // ---------------------------------------------------------------------------------------
    // Diagnostics helpers
    // ---------------------------------------------------------------------------------------

    pub fn syntax_error(&self, message: impl Into<String>) -> Error {
        Error::syntax(self.pos.clone(), message)
    }

    pub fn type_error(&self, message: impl Into<String>) -> Error {
        Error::type_error(self.pos.clone(), message)
    }

    pub fn internal_error(&self, message: impl Into<String>) -> Error {
        Error::internal(self.pos.clone(), message)
    }

    /// Whether this node is `set X` with `X` unary.
    ///
    /// # Errors
    /// [`Error::Internal`] if the node is not typed yet.
    pub fn is_set_of_1ary(&self) -> Result<bool> {
        let ty = self.ty.as_ref().ok_or_else(|| {
            self.internal_error("is_set_of_1ary() cannot be called until typechecking is done")
        })?;
        Ok(matches!(
            self.kind,
            ExprKind::Unary {
                op: UnaryOp::SetOf,
                ..
            }
        ) && ty.arity() == 1)
    }

    /// The operand of a unary node.
    ///
    /// # Errors
    /// [`Error::Internal`] if the node is not unary.
    pub fn unary_sub(&self) -> Result<&Expr> {
        match &self.kind {
            ExprKind::Unary { sub, .. } => Ok(sub),
            _ => Err(self.internal_error("unary_sub() can be used only on a unary node")),
        }
    }

    /// Strip any chain of [`UnaryOp::Noop`] wrappers.
    pub fn deparen(&self) -> &Expr {
        let mut current = self;
        while let ExprKind::Unary {
            op: UnaryOp::Noop,
            sub,
        } = &current.kind
        {
            current = sub;
        }
        current
    }
}
