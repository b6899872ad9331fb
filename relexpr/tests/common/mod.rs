#![allow(dead_code)]

use rand::Rng;
use relexpr::prelude::*;

pub fn at(line: u32, column: u32) -> Pos {
    Pos::new("model.als", line, column)
}

/// A typed unary signature reference.
pub fn sig(name: &str) -> Expr {
    Expr::sig(at(1, 1), name)
        .with_type(Type::relation([name]))
        .unwrap()
}

/// A typed field of `sig` ranging over `sig -> target`.
pub fn field(sig: &str, label: &str, target: &str) -> Expr {
    Expr::field(at(1, 1), sig, label)
        .with_type(Type::relation([sig, target]))
        .unwrap()
}

pub fn truth(value: bool) -> Expr {
    let c = if value { Constant::True } else { Constant::False };
    Expr::constant(at(1, 1), c)
        .with_type(Type::formula())
        .unwrap()
}

/// A typed predicate call `name[]`, handy as a distinguishable atom.
pub fn atom(name: &str) -> Expr {
    Expr::call(at(1, 1), name, Vec::new())
        .with_type(Type::formula())
        .unwrap()
}

pub fn or(l: Expr, r: Expr) -> Expr {
    let pos = l.pos().clone();
    Expr::binary(pos, BinaryOp::Or, l, r)
        .with_type(Type::formula())
        .unwrap()
}

pub fn paren(e: Expr) -> Expr {
    let ty = e.ty().cloned().unwrap();
    Expr::unary(e.pos().clone(), UnaryOp::Noop, e)
        .with_type(ty)
        .unwrap()
}

pub fn all(var: &str, bound: &str, body: Expr) -> Expr {
    Expr::quant(
        at(2, 1),
        QuantOp::All,
        vec![BoundVar::new(var, sig(bound))],
        body,
    )
    .with_type(Type::formula())
    .unwrap()
}

pub fn some(var: &str, bound: &str, body: Expr) -> Expr {
    Expr::quant(
        at(3, 1),
        QuantOp::Some,
        vec![BoundVar::new(var, sig(bound))],
        body,
    )
    .with_type(Type::formula())
    .unwrap()
}

/// A random typed formula built from connectives, quantifiers, and parentheses.
pub fn random_formula(rng: &mut impl Rng, budget: usize) -> Expr {
    if budget == 0 || rng.random_bool(0.15) {
        return match rng.random_range(0..3) {
            0 => truth(rng.random_bool(0.5)),
            1 => atom(&format!("p{}", rng.random_range(0..8))),
            _ => sig("Person").r#in(sig("Person")).unwrap(),
        };
    }
    match rng.random_range(0..6) {
        0 => random_formula(rng, budget - 1)
            .and(random_formula(rng, budget - 1))
            .unwrap(),
        1 => or(random_formula(rng, budget - 1), random_formula(rng, budget - 1)),
        2 => random_formula(rng, budget - 1).not().unwrap(),
        3 => paren(random_formula(rng, budget - 1)),
        4 => all("x", "Person", random_formula(rng, budget - 1)),
        _ => some("y", "Person", random_formula(rng, budget - 1)),
    }
}

/// A tiny checker that knows about signatures, fields, membership, and connectives.
pub struct ToyChecker;

impl TypeVisitor for ToyChecker {
    fn infer(&mut self, node: &Expr) -> Result<Type> {
        if let Some(ty) = node.ty() {
            return Ok(ty.clone());
        }
        match node.kind() {
            ExprKind::Sig { label } => Ok(Type::relation([label.clone()])),
            ExprKind::Field { sig, .. } => Ok(Type::relation([sig.clone(), "univ".into()])),
            ExprKind::Constant(Constant::True | Constant::False) => Ok(Type::formula()),
            ExprKind::Binary { op, left, right } if op.is_comparison() => {
                let (l, r) = (left.accept_infer(self)?, right.accept_infer(self)?);
                if l.arity() == r.arity() && l.arity() > 0 {
                    Ok(Type::formula())
                } else {
                    Err(node.type_error("operands of a comparison must have the same arity"))
                }
            }
            ExprKind::Binary { op, left, right } if op.is_connective() => {
                let (l, r) = (left.accept_infer(self)?, right.accept_infer(self)?);
                if l.is_formula() && r.is_formula() {
                    Ok(Type::formula())
                } else {
                    Err(node.type_error("this must be a formula expression"))
                }
            }
            _ => Err(node.type_error("unsupported expression")),
        }
    }

    fn check(&mut self, node: &Expr, expected: &Type) -> Result<Expr> {
        let ty = node.accept_infer(self)?;
        if &ty != expected {
            return Err(node.type_error(format!("expected {expected}, found {ty}")));
        }
        node.clone().with_type(ty)
    }
}
