mod common;

use common::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use relexpr::prelude::*;

fn is_and(e: &Expr) -> bool {
    matches!(
        e.deparen().kind(),
        ExprKind::Binary {
            op: BinaryOp::And,
            ..
        }
    )
}

fn is_or(e: &Expr) -> bool {
    matches!(
        e.deparen().kind(),
        ExprKind::Binary {
            op: BinaryOp::Or,
            ..
        }
    )
}

// Operands of the `&&` spine, without looking through parentheses.
fn top_level_operands<'e>(e: &'e Expr, out: &mut Vec<&'e Expr>) {
    match e.kind() {
        ExprKind::Binary {
            op: BinaryOp::And,
            left,
            right,
        } => {
            top_level_operands(left, out);
            top_level_operands(right, out);
        }
        _ => out.push(e),
    }
}

#[test]
fn nested_conjunctions_are_flattened_in_order() {
    let f = paren(atom("a").and(paren(atom("b"))).unwrap())
        .and(atom("c"))
        .unwrap();
    let promoted = promote(&f).unwrap();
    let parts = conjuncts(&promoted);
    assert_eq!(parts, vec![&atom("a"), &atom("b"), &atom("c")]);
}

#[test]
fn parentheses_alone_are_removed() {
    let f = paren(paren(atom("a")));
    assert_eq!(promote(&f).unwrap(), atom("a"));
}

#[test]
fn universal_quantifier_distributes_over_and() {
    let f = all("x", "Person", paren(atom("a").and(atom("b")).unwrap()));
    let promoted = promote(&f).unwrap();

    let parts = conjuncts(&promoted);
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0], &all("x", "Person", atom("a")));
    assert_eq!(parts[1], &all("x", "Person", atom("b")));
    // The synthesized quantifiers keep the original's position.
    assert_eq!(parts[0].pos(), f.pos());
}

#[test]
fn other_quantifiers_are_left_alone() {
    let f = some("y", "Person", atom("a").and(atom("b")).unwrap());
    assert_eq!(promote(&f).unwrap(), f);
}

#[test]
fn universal_quantifier_over_non_conjunction_is_unchanged() {
    let f = all("x", "Person", paren(or(atom("a"), atom("b"))));
    assert_eq!(promote(&f).unwrap(), f);
}

#[test]
fn de_morgan_turns_negated_disjunction_into_conjunction() {
    let f = or(atom("a"), or(atom("b"), atom("c"))).not().unwrap();
    let promoted = promote(&f).unwrap();

    let parts = conjuncts(&promoted);
    assert_eq!(
        parts,
        vec![
            &atom("a").not().unwrap(),
            &atom("b").not().unwrap(),
            &atom("c").not().unwrap()
        ]
    );
}

#[test]
fn de_morgan_looks_through_parentheses() {
    let f = paren(or(atom("a"), atom("b"))).not().unwrap();
    let promoted = promote(&f).unwrap();
    assert_eq!(conjuncts(&promoted).len(), 2);
}

#[test]
fn double_negation_and_other_shapes_are_not_rewritten() {
    let dbl = atom("a").and(atom("b")).unwrap().not().unwrap();
    assert_eq!(promote(&dbl).unwrap(), dbl);

    let ite = Expr::ite(at(1, 1), atom("c"), atom("a").and(atom("b")).unwrap(), atom("d"))
        .with_type(Type::formula())
        .unwrap();
    assert_eq!(promote(&ite).unwrap(), ite);

    let member = sig("Person").r#in(sig("Person")).unwrap();
    assert_eq!(promote(&member).unwrap(), member);
}

#[test]
fn untyped_conjunction_fails_as_internal() {
    let f = Expr::binary(at(1, 1), BinaryOp::And, atom("a"), Expr::var(at(3, 3), "p"));
    let err = promote(&f).unwrap_err();
    assert!(err.is_internal());
}

#[test]
fn input_tree_is_not_modified() {
    let f = all("x", "Person", atom("a").and(atom("b")).unwrap());
    let snapshot = f.clone();
    let _ = promote(&f).unwrap();
    assert_eq!(f, snapshot);
}

#[test]
fn random_formulas_promote_idempotently() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let f = random_formula(&mut rng, 6);
        let once = promote(&f).unwrap();
        let twice = promote(&once).unwrap();
        assert_eq!(once, twice, "not idempotent on {f}");
    }
}

#[test]
fn random_formulas_expose_every_promotable_conjunct() {
    let mut rng = ChaCha20Rng::seed_from_u64(0xc0ffee);
    for _ in 0..200 {
        let f = random_formula(&mut rng, 6);
        let promoted = promote(&f).unwrap();
        assert!(conjuncts(&promoted).len() >= conjuncts(&f).len());

        let mut parts = Vec::new();
        top_level_operands(&promoted, &mut parts);
        assert_eq!(parts.len(), conjuncts(&promoted).len());
        for part in parts {
            assert!(
                !matches!(
                    part.kind(),
                    ExprKind::Unary {
                        op: UnaryOp::Noop,
                        ..
                    }
                ),
                "{part}"
            );
            match part.kind() {
                ExprKind::Quant {
                    op: QuantOp::All,
                    body,
                    ..
                } => assert!(!is_and(body), "{part}"),
                ExprKind::Unary {
                    op: UnaryOp::Not,
                    sub,
                } => assert!(!is_or(sub), "{part}"),
                _ => {}
            }
        }
    }
}
