//! The planner-facing domain contract and its heap implementation.
//!
//! A [`Domain`] bundles everything a best-first planner needs to explore
//! states: the action alphabet, a transition function, a goal test and the
//! guards it can use to split branches. [`HeapDomain`] instantiates it for
//! heap-manipulating programs over a fixed [`SymbolTable`].

use std::fmt;
use std::sync::Arc;

use log::{debug, trace};

use crate::actions::generate_actions;
use crate::config::GuardConfig;
use crate::expr::Stmt;
use crate::guard::Guard;
use crate::guards;
use crate::plan::Plan;
use crate::relation::TransitionRelation;
use crate::render::DomainReport;
use crate::store::{Store, Successor};
use crate::symbols::{SymbolTable, VarIndex};

/// What a planner consumes: states, actions and guards.
pub trait Domain {
    type State;
    type Action;
    type Guard;

    /// Stable identifier of the domain.
    fn name(&self) -> &str;

    /// The guard that holds in every state.
    fn get_true(&self) -> Self::Guard;

    /// Whether `guard` holds in `state`.
    fn test(&self, guard: &Self::Guard, state: &Self::State) -> bool;

    /// Goal test: does `candidate` agree with every binding of `target`?
    fn matches(&self, candidate: &Self::State, target: &Self::State) -> bool;

    /// The successor of `state` under `action`, if it is defined and unique.
    fn apply(&self, action: &Self::Action, state: &Self::State) -> Option<Self::State>;

    /// The fixed action alphabet.
    fn actions(&self) -> &[Self::Action];

    /// The positive basic guards for the given example plans.
    fn generate_basic_guards(
        &self,
        plans: &[Plan<Self::State, Self::Action>],
    ) -> Vec<Self::Guard>;

    /// The full guard grammar for the given example plans, simplest first.
    fn generate_guards(&self, plans: &[Plan<Self::State, Self::Action>]) -> Vec<Self::Guard>;
}

/// A domain of heap-manipulating programs.
///
/// The action alphabet is computed once, on construction, and shared through
/// an [`Arc`]; everything else is read-only, so a `HeapDomain` can be queried
/// from several search branches at once as long as the relation allows it.
pub struct HeapDomain<R> {
    symbols: Arc<SymbolTable>,
    index: VarIndex,
    actions: Arc<[Stmt]>,
    relation: R,
    config: GuardConfig,
}

impl<R: TransitionRelation> HeapDomain<R> {
    pub fn new(symbols: impl Into<Arc<SymbolTable>>, relation: R) -> Self {
        Self::with_config(symbols, relation, GuardConfig::default())
    }

    pub fn with_config(
        symbols: impl Into<Arc<SymbolTable>>,
        relation: R,
        config: GuardConfig,
    ) -> Self {
        let symbols = symbols.into();
        let index = VarIndex::new(&symbols);
        let actions: Arc<[Stmt]> = generate_actions(&symbols, &index).into();
        debug!("HeapDomain: {} actions", actions.len());
        Self {
            symbols,
            index,
            actions,
            relation,
            config,
        }
    }
}

impl<R> HeapDomain<R> {
    pub fn symbols(&self) -> &Arc<SymbolTable> {
        &self.symbols
    }

    pub fn index(&self) -> &VarIndex {
        &self.index
    }

    /// The action alphabet, as a handle that can outlive the domain borrow.
    pub fn shared_actions(&self) -> Arc<[Stmt]> {
        Arc::clone(&self.actions)
    }

    pub fn relation(&self) -> &R {
        &self.relation
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// A textual listing of the types, variables and actions of the domain.
    pub fn report(&self) -> DomainReport<'_> {
        DomainReport::new(Self::NAME, &self.symbols, &self.actions)
    }

    const NAME: &'static str = "HeapDomain";
}

impl<R: TransitionRelation> Domain for HeapDomain<R> {
    type State = Store;
    type Action = Stmt;
    type Guard = Guard;

    fn name(&self) -> &str {
        Self::NAME
    }

    fn get_true(&self) -> Guard {
        Guard::True
    }

    /// Undefined evaluations count as `false`.
    fn test(&self, guard: &Guard, state: &Store) -> bool {
        self.relation.test(guard, state).unwrap_or(false)
    }

    fn matches(&self, candidate: &Store, target: &Store) -> bool {
        candidate.covers(target)
    }

    /// Statements that fault or have several successors from `state` are
    /// treated as not applicable there.
    fn apply(&self, action: &Stmt, state: &Store) -> Option<Store> {
        let mut succs = self.relation.apply(state, action);
        if succs.len() != 1 {
            trace!("apply: {} successors, pruning {:?}", succs.len(), action);
            return None;
        }
        match succs.pop() {
            Some(Successor::Store(next)) => Some(next),
            _ => {
                trace!("apply: fault, pruning {:?}", action);
                None
            }
        }
    }

    fn actions(&self) -> &[Stmt] {
        &self.actions
    }

    fn generate_basic_guards(&self, plans: &[Plan<Store, Stmt>]) -> Vec<Guard> {
        guards::generate_basic_guards(&self.symbols, plans)
    }

    fn generate_guards(&self, plans: &[Plan<Store, Stmt>]) -> Vec<Guard> {
        guards::generate_guards(&self.symbols, plans, &self.config)
    }
}

impl<R> fmt::Debug for HeapDomain<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapDomain")
            .field("vars", &self.symbols.num_vars())
            .field("fields", &self.symbols.num_fields())
            .field("actions", &self.actions.len())
            .field("config", &self.config)
            .finish()
    }
}
