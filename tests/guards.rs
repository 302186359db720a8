mod common;

use std::collections::BTreeSet;
use std::sync::Arc;

use heap_synth::config::GuardConfig;
use heap_synth::domain::{Domain, HeapDomain};
use heap_synth::expr::{Expr, Stmt};
use heap_synth::guard::Guard;
use heap_synth::guards::{gen_pair_cubes, generate_basic_guards, observed_int_constants};
use heap_synth::plan::Plan;
use heap_synth::store::Store;
use heap_synth::symbols::SymbolTable;
use heap_synth::types::{Type, VarRole};
use heap_synth::value::Value;

use test_log::test;

use common::{list_vocab, two_node_list, ReferenceRelation};

fn count(guards: &[Guard], g: &Guard) -> usize {
    guards.iter().filter(|h| *h == g).count()
}

// ─── Basic literals ───

#[test]
fn test_two_int_vars_end_to_end() {
    let mut symbols = SymbolTable::new();
    let x = symbols
        .declare_var("x", Type::Int, VarRole::Arg, false)
        .unwrap();
    let y = symbols
        .declare_var("y", Type::Int, VarRole::Arg, false)
        .unwrap();
    let domain = HeapDomain::new(symbols, ReferenceRelation);

    let example = Store::new().assign(x, Value::Int(0)).assign(y, Value::Int(5));
    let plans = vec![Plan::new(example)];
    let basics = domain.generate_basic_guards(&plans);

    let (ex, ey) = (Expr::Var(x), Expr::Var(y));
    assert_eq!(count(&basics, &Guard::lt(ex.clone(), ey.clone())), 2);
    assert_eq!(count(&basics, &Guard::eq(ex.clone(), ey.clone())), 1);
    assert_eq!(count(&basics, &Guard::lt(ex.clone(), Expr::Int(5))), 1);
    assert_eq!(count(&basics, &Guard::eq(ey, Expr::Int(1))), 1);
    // No objects were observed, so there are no reference literals.
    assert!(basics.iter().all(|g| !matches!(g, Guard::Eq(_, Expr::Null))));

    let guards = domain.generate_guards(&plans);
    let b = basics.len();
    assert_eq!(guards.len(), 2 * b + 4 * b * (b - 1) + 2 * b * b);
    assert!(guards.iter().take(b).all(Guard::is_literal));
}

#[test]
fn test_list_literal_counts() {
    let vocab = list_vocab();
    let plans = vec![Plan::new(two_node_list(&vocab))];
    let basics = generate_basic_guards(&vocab.symbols, &plans);

    // Integer atoms: head.val, t.val, n. Constants: {0, 1, 2, 8}.
    // Pairs: 6 ordered pairs with two `<` each, plus 3 equalities.
    // Constants: 3 atoms * 4 constants * 3 comparisons.
    let num_int = 12 + 3 + 36;
    // Reference atoms: head, head.next, t, t.next, null.
    let num_ref = 10;
    assert_eq!(basics.len(), num_int + num_ref);

    assert_eq!(
        basics.last(),
        Some(&Guard::eq(Expr::Deref(vocab.t, vocab.next), Expr::Null))
    );
    assert!(basics[..num_int]
        .iter()
        .all(|g| !matches!(g, Guard::Eq(_, Expr::Null))));
}

#[test]
fn test_constants_follow_observations() {
    let vocab = list_vocab();
    let s0 = two_node_list(&vocab);
    let s1 = s0.assign(vocab.n, Value::Int(-4));
    assert_eq!(observed_int_constants([&s0]), BTreeSet::from([0, 1, 2, 8]));
    assert_eq!(
        observed_int_constants([&s0, &s1]),
        BTreeSet::from([-4, 0, 1, 8])
    );
}

#[test]
fn test_plan_states_all_contribute() {
    let vocab = list_vocab();
    let domain = HeapDomain::new(vocab.symbols.clone(), ReferenceRelation);

    let s0 = two_node_list(&vocab);
    let write = Stmt::write(vocab.head, vocab.val, Expr::Var(vocab.n));
    let s1 = domain.apply(&write, &s0).unwrap();
    let s2 = s1.assign(vocab.n, Value::Int(40));
    let mut plan = Plan::new(s0);
    plan.push(write, s1);
    plan.push(Stmt::assign(vocab.n, Expr::Var(vocab.n)), s2);

    let basics = domain.generate_basic_guards(&[plan]);
    let n = Expr::Var(vocab.n);
    // The maximum comes from the last state of the plan.
    assert_eq!(count(&basics, &Guard::eq(n.clone(), Expr::Int(40))), 1);
    assert_eq!(count(&basics, &Guard::eq(n, Expr::Int(8))), 0);
}

// ─── Composition ───

#[test]
fn test_cubes_cover_both_orders() {
    let vocab = list_vocab();
    let plans = vec![Plan::new(two_node_list(&vocab))];
    let basics = generate_basic_guards(&vocab.symbols, &plans);
    let b1 = Arc::new(basics[0].clone());
    let b2 = Arc::new(basics[basics.len() - 1].clone());

    let guards = HeapDomain::new(vocab.symbols.clone(), ReferenceRelation).generate_guards(&plans);
    for (l, r) in [(&b1, &b2), (&b2, &b1)] {
        let not_l = Arc::new(Guard::not(l.clone()));
        let not_r = Arc::new(Guard::not(r.clone()));
        for cube in [
            Guard::and(l.clone(), r.clone()),
            Guard::and(l.clone(), not_r.clone()),
            Guard::and(not_l.clone(), r.clone()),
            Guard::and(not_l, not_r),
        ] {
            assert!(guards.contains(&cube), "missing {:?}", cube);
        }
    }
    assert_eq!(gen_pair_cubes(&[b1, b2]).len(), 8);
}

#[test]
fn test_disjunctions_present() {
    let vocab = list_vocab();
    let plans = vec![Plan::new(two_node_list(&vocab))];
    let basics = generate_basic_guards(&vocab.symbols, &plans);
    let guards = HeapDomain::new(vocab.symbols.clone(), ReferenceRelation).generate_guards(&plans);

    let a = Arc::new(basics[0].clone());
    let z = Arc::new(basics[basics.len() - 1].clone());
    assert!(guards.contains(&Guard::or(a.clone(), a.clone())));
    assert!(guards.contains(&Guard::or(z.clone(), Guard::not(a.clone()))));
    assert!(guards.contains(&Guard::not(z)));
}

// ─── Ordering ───

#[test]
fn test_sorted_and_deterministic() {
    let vocab = list_vocab();
    let domain = HeapDomain::new(vocab.symbols.clone(), ReferenceRelation);
    let plans = vec![Plan::new(two_node_list(&vocab))];

    let first = domain.generate_guards(&plans);
    let second = domain.generate_guards(&plans);
    assert_eq!(first, second);
    assert!(first.windows(2).all(|w| w[0].size() <= w[1].size()));
    // Size 3 literals (`n < 0`) come before size 4 ones (`head.val < n`).
    assert_eq!(first[0].size(), 3);
    assert!(first.iter().any(|g| g.size() == 4 && g.is_literal()));
}

#[test]
fn test_sort_is_stable_within_size() {
    let vocab = list_vocab();
    let plans = vec![Plan::new(two_node_list(&vocab))];
    let basics = generate_basic_guards(&vocab.symbols, &plans);
    let config = GuardConfig {
        compose: false,
        ..GuardConfig::default()
    };
    let domain = HeapDomain::with_config(vocab.symbols.clone(), ReferenceRelation, config);
    let sorted = domain.generate_guards(&plans);

    for size in 1..=5 {
        let expected: Vec<&Guard> = basics.iter().filter(|g| g.size() == size).collect();
        let actual: Vec<&Guard> = sorted.iter().filter(|g| g.size() == size).collect();
        assert_eq!(actual, expected);
    }
}

#[test]
fn test_deduplicate_keeps_one_of_each() {
    let vocab = list_vocab();
    let plans = vec![Plan::new(two_node_list(&vocab))];
    let config = GuardConfig {
        deduplicate: true,
        ..GuardConfig::default()
    };
    let domain = HeapDomain::with_config(vocab.symbols.clone(), ReferenceRelation, config);
    let guards = domain.generate_guards(&plans);

    let lt = Guard::lt(Expr::Var(vocab.n), Expr::Deref(vocab.head, vocab.val));
    assert_eq!(count(&guards, &lt), 1);
    assert!(guards.windows(2).all(|w| w[0].size() <= w[1].size()));
}

// ─── Degenerate inputs ───

#[test]
fn test_no_plans_no_guards() {
    let vocab = list_vocab();
    let domain = HeapDomain::new(vocab.symbols.clone(), ReferenceRelation);
    assert!(domain.generate_basic_guards(&[]).is_empty());
    assert!(domain.generate_guards(&[]).is_empty());
}

#[test]
fn test_null_only_store() {
    let vocab = list_vocab();
    let domain = HeapDomain::new(vocab.symbols.clone(), ReferenceRelation);
    let plans = vec![Plan::new(Store::new().assign(vocab.t, Value::Null))];
    // No integers and no objects: nothing to compare.
    assert!(domain.generate_guards(&plans).is_empty());
}
