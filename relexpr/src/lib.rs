//! Relexpr: typed expression trees for a relational-logic modelling language.
//!
//! This crate holds the data model shared by the parser, the type checker, and the
//! boolean encoder of the analyzer front end:
//! - source positions ([`pos`]) and the three error kinds ([`error`]);
//! - relational types with arity, join, and product ([`types`]);
//! - the immutable expression tree with typed builders ([`expr`]);
//! - the conjunction-promotion rewrite used before SAT encoding ([`promote`]).
//!
//! Nodes never change once built. Type annotations are attached exactly once through
//! [`Expr::with_type`](expr::Expr::with_type), and every later transformation returns a
//! fresh tree.
//!
//! Example
//! ```
//! use relexpr::prelude::*;
//!
//! let pos = Pos::new("model.als", 1, 1);
//! let person = Expr::sig(pos.clone(), "Person").with_type(Type::relation(["Person"])).unwrap();
//! let alice = Expr::sig(pos.clone(), "Alice").with_type(Type::relation(["Person"])).unwrap();
//!
//! let member = alice.r#in(person).unwrap();
//! assert!(member.ty().unwrap().is_formula());
//! ```

/// Error kinds raised by the front end.
pub mod error;
/// Immutable expression nodes, operator vocabularies, typed builders, and visitors.
pub mod expr;
/// Source positions.
pub mod pos;
/// Conjunction promotion: pulls conjuncts up to the top level of a formula.
pub mod promote;
/// Relational types.
pub mod types;

pub use error::{Error, Result};
pub use pos::Pos;

pub mod prelude {
    //! Convenient re-exports for end users.
    pub use crate::error::{Error, Result};
    pub use crate::expr::{
        BoundVar, Expr, ExprKind, Multiplicity,
        ops::{BinaryOp, BuiltinOp, Constant, QuantOp, UnaryOp},
        pretty::PrettyExpr,
        visit::{TypeVisitor, Visitor},
    };
    pub use crate::pos::Pos;
    pub use crate::promote::{conjuncts, promote};
    pub use crate::types::{ProductType, Type};
}
