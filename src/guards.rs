//! Guard grammar generation.
//!
//! Guards are built bottom-up from the example states gathered so far:
//!
//! 1. **Integer literals.** The integers observed in variables and integer
//!    fields are reduced to `{min, max, 0, 1}`. Atomic integer expressions
//!    (integer variables and integer fields read through reference variables)
//!    are compared pairwise (`<` both ways, `==` once per pair) and against
//!    every retained constant.
//! 2. **Reference literals.** If any observed store holds an object, the
//!    atomic reference expressions (reference variables, their reference
//!    fields, and `null`) are compared for equality once per unordered pair.
//! 3. **Composition.** Over the positive literals `B`: the negations `N`,
//!    pair cubes over ordered pairs of distinct literals in all four sign
//!    combinations, and the disjunctions `B × B` and `B × N`.
//! 4. **Ordering.** Everything is stably sorted by [`Guard::size`].
//!
//! The grammar is intentionally not minimal: symmetric cubes and repeated
//! comparisons are kept. [`dedup_guards`] is available as a separate pass.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use log::debug;

use crate::config::GuardConfig;
use crate::expr::{Expr, Stmt};
use crate::guard::Guard;
use crate::plan::Plan;
use crate::store::Store;
use crate::symbols::SymbolTable;
use crate::types::Type;

type HeapPlan = Plan<Store, Stmt>;

fn all_stores(plans: &[HeapPlan]) -> impl Iterator<Item = &Store> + '_ {
    plans.iter().flat_map(|plan| plan.states())
}

/// The integer constants worth comparing against, given the observed stores.
///
/// Returns `{min, max, 0, 1}` over the integers bound to variables or stored
/// in fields, or the empty set if no integer was observed.
pub fn observed_int_constants<'a>(stores: impl IntoIterator<Item = &'a Store>) -> BTreeSet<i64> {
    let mut observed = stores.into_iter().flat_map(|store| {
        let env = store.env().values();
        let fields = store.objects().values().flat_map(|o| o.fields().values());
        env.chain(fields).filter_map(|v| v.as_int())
    });

    let Some(first) = observed.next() else {
        return BTreeSet::new();
    };
    let (min, max) = observed.fold((first, first), |(lo, hi), n| (lo.min(n), hi.max(n)));
    debug!("observed integers: min = {}, max = {}", min, max);

    BTreeSet::from([min, max, 0, 1])
}

/// Atomic integer expressions: integer variables, and integer fields read
/// through reference variables.
pub fn int_atoms(symbols: &SymbolTable) -> Vec<Expr> {
    let mut atoms = Vec::new();
    for (id, var) in symbols.vars() {
        match var.ty {
            Type::Int => atoms.push(Expr::Var(id)),
            Type::Ref(_) => {
                for &f in symbols.fields_of_var(id) {
                    if symbols.field(f).dst.is_int() {
                        atoms.push(Expr::Deref(id, f));
                    }
                }
            }
        }
    }
    atoms
}

/// Atomic reference expressions: reference variables, their reference fields,
/// and finally `null`.
pub fn ref_atoms(symbols: &SymbolTable) -> Vec<Expr> {
    let mut atoms = Vec::new();
    for (id, var) in symbols.vars() {
        if var.ty.is_int() {
            continue;
        }
        atoms.push(Expr::Var(id));
        for &f in symbols.fields_of_var(id) {
            if symbols.field(f).dst.is_ref() {
                atoms.push(Expr::Deref(id, f));
            }
        }
    }
    atoms.push(Expr::Null);
    atoms
}

/// Appends the integer comparison literals to `result`.
pub fn add_basic_int_guards(symbols: &SymbolTable, plans: &[HeapPlan], result: &mut Vec<Guard>) {
    // Without integers there is nothing to tell stores apart by.
    let constants = observed_int_constants(all_stores(plans));
    if constants.is_empty() {
        return;
    }

    let atoms = int_atoms(symbols);
    for (i, e1) in atoms.iter().enumerate() {
        for (j, e2) in atoms.iter().enumerate() {
            if i == j {
                continue;
            }
            result.push(Guard::lt(e1.clone(), e2.clone()));
            result.push(Guard::lt(e2.clone(), e1.clone()));
            // Equality is symmetric: emit it once per pair.
            if i < j {
                result.push(Guard::eq(e1.clone(), e2.clone()));
            }
        }
        for &c in &constants {
            result.push(Guard::lt(e1.clone(), Expr::Int(c)));
            result.push(Guard::lt(Expr::Int(c), e1.clone()));
            result.push(Guard::eq(e1.clone(), Expr::Int(c)));
        }
    }
}

/// Appends the reference equality literals to `result`.
pub fn add_basic_ref_guards(symbols: &SymbolTable, plans: &[HeapPlan], result: &mut Vec<Guard>) {
    // Stores without objects cannot be told apart by reference equalities.
    if !all_stores(plans).any(Store::has_objects) {
        return;
    }

    let atoms = ref_atoms(symbols);
    for (i, e1) in atoms.iter().enumerate() {
        for e2 in &atoms[i + 1..] {
            result.push(Guard::eq(e1.clone(), e2.clone()));
        }
    }
}

/// The positive basic literals for the given plans: integer literals first,
/// then reference literals.
pub fn generate_basic_guards(symbols: &SymbolTable, plans: &[HeapPlan]) -> Vec<Guard> {
    let mut result = Vec::new();
    add_basic_int_guards(symbols, plans, &mut result);
    let num_int = result.len();
    add_basic_ref_guards(symbols, plans, &mut result);
    debug!(
        "basic guards: {} integer, {} reference",
        num_int,
        result.len() - num_int
    );
    result
}

/// All cubes of size 2 over ordered pairs of distinct positions in `exprs`,
/// in the four sign combinations.
pub fn gen_pair_cubes(exprs: &[Arc<Guard>]) -> Vec<Guard> {
    let mut result = Vec::with_capacity(4 * exprs.len() * exprs.len().saturating_sub(1));
    for (i, e1) in exprs.iter().enumerate() {
        let not_e1 = Arc::new(Guard::not(e1.clone()));
        for (j, e2) in exprs.iter().enumerate() {
            if i == j {
                continue;
            }
            let not_e2 = Arc::new(Guard::not(e2.clone()));
            result.push(Guard::and(e1.clone(), e2.clone()));
            result.push(Guard::and(e1.clone(), not_e2.clone()));
            result.push(Guard::and(not_e1.clone(), e2.clone()));
            result.push(Guard::and(not_e1.clone(), not_e2));
        }
    }
    result
}

/// Disjunctions over the Cartesian product of `exprs1` and `exprs2`.
pub fn gen_or2(exprs1: &[Arc<Guard>], exprs2: &[Arc<Guard>]) -> Vec<Guard> {
    let mut result = Vec::with_capacity(exprs1.len() * exprs2.len());
    for e1 in exprs1 {
        for e2 in exprs2 {
            result.push(Guard::or(e1.clone(), e2.clone()));
        }
    }
    result
}

/// Stably sorts guards by size, smallest first.
pub fn sort_by_size(guards: &mut [Guard]) {
    guards.sort_by_key(Guard::size);
}

/// Removes structurally equal guards, keeping the first occurrence of each.
pub fn dedup_guards(guards: Vec<Guard>) -> Vec<Guard> {
    let mut seen = HashSet::with_capacity(guards.len());
    let before = guards.len();
    let result: Vec<Guard> = guards.into_iter().filter(|g| seen.insert(g.clone())).collect();
    debug!("dedup_guards: {} -> {}", before, result.len());
    result
}

/// Builds the full guard grammar for the given plans, ordered by size.
///
/// Returns an empty grammar when no plan exhibits an integer or an object.
pub fn generate_guards(
    symbols: &SymbolTable,
    plans: &[HeapPlan],
    config: &GuardConfig,
) -> Vec<Guard> {
    let basics = generate_basic_guards(symbols, plans);

    let mut result = if config.compose {
        compose(basics)
    } else {
        basics
    };
    sort_by_size(&mut result);

    if config.deduplicate {
        result = dedup_guards(result);
    }
    debug!("generate_guards: {} guards from {} plans", result.len(), plans.len());
    result
}

/// `B ∪ N ∪ cubes(B) ∪ (B × B) ∪ (B × N)`, unsorted.
fn compose(basics: Vec<Guard>) -> Vec<Guard> {
    let pos: Vec<Arc<Guard>> = basics.into_iter().map(Arc::new).collect();
    let neg: Vec<Arc<Guard>> = pos.iter().map(|g| Arc::new(Guard::not(g.clone()))).collect();

    let cubes = gen_pair_cubes(&pos);
    let or_pos_pos = gen_or2(&pos, &pos);
    let or_pos_neg = gen_or2(&pos, &neg);
    debug!(
        "compose: {} literals, {} cubes, {} + {} disjunctions",
        2 * pos.len(),
        cubes.len(),
        or_pos_pos.len(),
        or_pos_neg.len()
    );

    let total = 2 * pos.len() + cubes.len() + or_pos_pos.len() + or_pos_neg.len();
    let mut result = Vec::with_capacity(total);
    result.extend(pos.iter().map(|g| (**g).clone()));
    result.extend(neg.iter().map(|g| (**g).clone()));
    result.extend(cubes);
    result.extend(or_pos_pos);
    result.extend(or_pos_neg);
    result
}
