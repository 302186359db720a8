//! # heap-synth: the domain layer of a heap program synthesizer
//!
//! **`heap-synth`** describes the search space of a synthesizer that discovers small
//! heap-manipulating programs (pointer and field assignments, allocation) from
//! input/output examples. A best-first planner explores heap states; this crate tells it
//! *what* it can explore:
//!
//! - the **states**: [`Store`][crate::store::Store] heap snapshots,
//! - the **actions**: a fixed universe of well-typed atomic [`Stmt`][crate::expr::Stmt]s,
//! - the **guards**: a per-round grammar of boolean [`Guard`][crate::guard::Guard]s, ordered
//!   by syntactic size, used to split branches and build conditionals,
//! - the **goal test**: partial-state containment ([`Store::covers`][crate::store::Store::covers]).
//!
//! Executing statements and evaluating guards is left to a
//! [`TransitionRelation`][crate::relation::TransitionRelation] supplied by the caller.
//!
//! ## Basic Usage
//!
//! ```rust
//! use heap_synth::domain::{Domain, HeapDomain};
//! use heap_synth::expr::Stmt;
//! use heap_synth::guard::Guard;
//! use heap_synth::plan::Plan;
//! use heap_synth::relation::TransitionRelation;
//! use heap_synth::store::{Store, Successor};
//! use heap_synth::symbols::SymbolTable;
//! use heap_synth::types::{Type, VarRole};
//! use heap_synth::value::Value;
//!
//! // An interpreter that knows nothing.
//! struct Opaque;
//!
//! impl TransitionRelation for Opaque {
//!     fn apply(&self, _: &Store, _: &Stmt) -> Vec<Successor> {
//!         vec![Successor::Fault]
//!     }
//!     fn test(&self, _: &Guard, _: &Store) -> Option<bool> {
//!         None
//!     }
//! }
//!
//! // 1. Declare the vocabulary
//! let mut symbols = SymbolTable::new();
//! let x = symbols.declare_var("x", Type::Int, VarRole::Arg, false).unwrap();
//! let y = symbols.declare_var("y", Type::Int, VarRole::Arg, false).unwrap();
//!
//! // 2. Build the domain: the action universe is computed here, once
//! let domain = HeapDomain::new(symbols, Opaque);
//! assert_eq!(domain.actions().len(), 2); // x = y; y = x;
//!
//! // 3. Generate guards from the examples seen so far
//! let example = Store::new().assign(x, Value::Int(0)).assign(y, Value::Int(5));
//! let guards = domain.generate_guards(&[Plan::new(example)]);
//! assert!(guards.windows(2).all(|w| w[0].size() <= w[1].size()));
//! ```
//!
//! ## Core Components
//!
//! - **[`symbols`]**: declared types, fields and variables, and the per-type variable index.
//! - **[`store`]**: heap snapshots, the fault successor, and the `covers` goal test.
//! - **[`actions`]**: the static action universe.
//! - **[`guards`]**: the guard grammar generator.
//! - **[`domain`]**: the [`Domain`][crate::domain::Domain] planner contract and
//!   [`HeapDomain`][crate::domain::HeapDomain].
//! - **[`render`]**: textual rendering for diagnostics.

pub mod actions;
pub mod config;
pub mod domain;
pub mod error;
pub mod expr;
pub mod guard;
pub mod guards;
pub mod plan;
pub mod relation;
pub mod render;
pub mod store;
pub mod symbols;
pub mod types;
pub mod value;
