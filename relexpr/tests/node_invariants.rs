mod common;

use common::*;
use relexpr::prelude::*;

#[test]
fn multiplicity_tags() {
    let set_of = Expr::unary(at(1, 1), UnaryOp::SetOf, sig("Person"));
    assert_eq!(set_of.mult(), Multiplicity::Unary);

    let plain = Expr::binary(at(1, 1), BinaryOp::Arrow, sig("A"), sig("B"));
    assert_eq!(plain.mult(), Multiplicity::None);

    let lone_one = Expr::binary(at(1, 1), BinaryOp::LoneArrowOne, sig("A"), sig("B"));
    assert_eq!(lone_one.mult(), Multiplicity::Compound);

    let nested = Expr::binary(at(1, 1), BinaryOp::Arrow, set_of.clone(), sig("B"));
    assert_eq!(nested.mult(), Multiplicity::Compound);

    let wrapped = Expr::unary(at(1, 1), UnaryOp::Noop, set_of);
    assert_eq!(wrapped.mult(), Multiplicity::Unary);

    let formula = Expr::unary(at(1, 1), UnaryOp::Some, sig("A"));
    assert_eq!(formula.mult(), Multiplicity::None);
}

#[test]
fn raw_multiplicity_outside_range_is_internal() {
    assert_eq!(
        Multiplicity::from_raw(2, &at(1, 1)).unwrap(),
        Multiplicity::Compound
    );
    let err = Multiplicity::from_raw(3, &at(5, 6)).unwrap_err();
    assert!(err.is_internal());
    assert_eq!(err.pos(), &at(5, 6));
    assert!(err.message().contains("got 3"));
}

#[test]
fn type_is_attached_once() {
    let e = sig("Person");
    assert!(e.is_typed());
    assert!(e.with_type(Type::formula()).unwrap_err().is_internal());
}

#[test]
fn set_of_unary_requires_a_type() {
    let untyped = Expr::unary(at(1, 1), UnaryOp::SetOf, sig("Person"));
    assert!(untyped.is_set_of_1ary().unwrap_err().is_internal());

    let typed = untyped.with_type(Type::relation(["Person"])).unwrap();
    assert!(typed.is_set_of_1ary().unwrap());

    let one_of = Expr::unary(at(1, 1), UnaryOp::OneOf, sig("Person"))
        .with_type(Type::relation(["Person"]))
        .unwrap();
    assert!(!one_of.is_set_of_1ary().unwrap());
}

#[test]
fn unary_sub_only_on_unary_nodes() {
    let neg = truth(true).not().unwrap();
    assert_eq!(neg.unary_sub().unwrap(), &truth(true));
    assert!(sig("Person").unary_sub().unwrap_err().is_internal());
}

#[test]
fn children_and_size() {
    let q = all("x", "Person", truth(true).and(truth(false)).unwrap());
    let children = q.children();
    assert_eq!(children.len(), 2);
    assert!(children[0].kind().is_sig());
    assert!(children[1].kind().is_binary());
    assert_eq!(q.size(), 5);
    assert_eq!(sig("Person").size(), 1);
}

#[test]
fn deparen_strips_every_wrapper() {
    let inner = truth(true);
    let wrapped = paren(paren(inner.clone()));
    assert_eq!(wrapped.deparen(), &inner);
    assert_eq!(inner.deparen(), &inner);
}

#[test]
fn error_helpers_use_the_node_position() {
    let e = Expr::var(at(12, 4), "x");
    let syntax = e.syntax_error("unexpected token");
    let ty = e.type_error("not a set");
    let internal = e.internal_error("broken");

    assert!(syntax.is_syntax() && ty.is_type() && internal.is_internal());
    assert_eq!(
        syntax.to_string(),
        "Syntax error at line 12, column 4, filename=model.als: unexpected token"
    );
    assert_eq!(ty.pos(), &at(12, 4));
    assert_eq!(internal.message(), "broken");
}

#[test]
fn structural_equality_includes_positions() {
    let a = Expr::var(at(1, 1), "x");
    let b = Expr::var(at(1, 2), "x");
    assert_ne!(a, b);
    assert_eq!(a, Expr::var(at(1, 1), "x"));
}
