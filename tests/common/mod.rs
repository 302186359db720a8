//! Shared fixtures: a small deterministic interpreter and a scripted relation.

#![allow(dead_code)]

use std::sync::Arc;

use heap_synth::expr::{Expr, Lvalue, Stmt};
use heap_synth::guard::Guard;
use heap_synth::relation::TransitionRelation;
use heap_synth::store::{Store, Successor};
use heap_synth::symbols::SymbolTable;
use heap_synth::types::{FieldId, RefTypeId, Type, VarId, VarRole};
use heap_synth::value::Value;

/// Deterministic semantics: every statement has exactly one successor, which
/// is a fault whenever an operand is uninitialized or a field is accessed
/// through `null`.
pub struct ReferenceRelation;

impl ReferenceRelation {
    fn eval(store: &Store, expr: &Expr) -> Option<Value> {
        match *expr {
            Expr::Var(v) => store.eval_var(v),
            Expr::Deref(v, f) => {
                let obj = store.eval_var(v)?.as_obj()?;
                store.eval_field(obj, f)
            }
            Expr::Int(n) => Some(Value::Int(n)),
            Expr::Null => Some(Value::Null),
            Expr::New(_) => None,
        }
    }

    fn exec(store: &Store, stmt: &Stmt) -> Option<Store> {
        let (store, value) = match stmt.rhs {
            Expr::New(ty) => {
                let (next, obj) = store.allocate(ty);
                (next, Value::Obj(obj))
            }
            ref rhs => (store.clone(), Self::eval(store, rhs)?),
        };
        match stmt.lhs {
            Lvalue::Var(v) => Some(store.assign(v, value)),
            Lvalue::Field(v, f) => {
                let obj = store.eval_var(v)?.as_obj()?;
                store.write_field(obj, f, value).ok()
            }
        }
    }

    fn eval_guard(store: &Store, guard: &Guard) -> Option<bool> {
        match guard {
            Guard::True => Some(true),
            Guard::Eq(l, r) => Some(Self::eval(store, l)? == Self::eval(store, r)?),
            Guard::Lt(l, r) => {
                let l = Self::eval(store, l)?.as_int()?;
                let r = Self::eval(store, r)?.as_int()?;
                Some(l < r)
            }
            Guard::Not(g) => Some(!Self::eval_guard(store, g)?),
            Guard::And(l, r) => Some(Self::eval_guard(store, l)? && Self::eval_guard(store, r)?),
            Guard::Or(l, r) => Some(Self::eval_guard(store, l)? || Self::eval_guard(store, r)?),
        }
    }
}

impl TransitionRelation for ReferenceRelation {
    fn apply(&self, store: &Store, stmt: &Stmt) -> Vec<Successor> {
        match Self::exec(store, stmt) {
            Some(next) => vec![Successor::Store(next)],
            None => vec![Successor::Fault],
        }
    }

    fn test(&self, guard: &Guard, store: &Store) -> Option<bool> {
        Self::eval_guard(store, guard)
    }
}

/// Returns the same canned answers whatever it is asked.
pub struct ScriptedRelation {
    pub successors: Vec<Successor>,
    pub verdict: Option<bool>,
}

impl TransitionRelation for ScriptedRelation {
    fn apply(&self, _store: &Store, _stmt: &Stmt) -> Vec<Successor> {
        self.successors.clone()
    }

    fn test(&self, _guard: &Guard, _store: &Store) -> Option<bool> {
        self.verdict
    }
}

/// A singly-linked list vocabulary:
/// `Node { next: Node, val: int }`, `head: Node` (readonly argument),
/// `t: Node` (temporary) and `n: int`.
pub struct ListVocab {
    pub symbols: Arc<SymbolTable>,
    pub node: RefTypeId,
    pub next: FieldId,
    pub val: FieldId,
    pub head: VarId,
    pub t: VarId,
    pub n: VarId,
}

pub fn list_vocab() -> ListVocab {
    let mut symbols = SymbolTable::new();
    let node = symbols.declare_ref_type("Node").unwrap();
    let next = symbols
        .declare_field(node, "next", Type::Ref(node), false)
        .unwrap();
    let val = symbols.declare_field(node, "val", Type::Int, false).unwrap();
    let head = symbols
        .declare_var("head", Type::Ref(node), VarRole::Arg, true)
        .unwrap();
    let t = symbols
        .declare_var("t", Type::Ref(node), VarRole::Temp, false)
        .unwrap();
    let n = symbols
        .declare_var("n", Type::Int, VarRole::Other, false)
        .unwrap();
    ListVocab {
        symbols: Arc::new(symbols),
        node,
        next,
        val,
        head,
        t,
        n,
    }
}

/// `head -> o0 -> o1 -> null`, with values 3 and 8, `n = 2`, `t` uninitialized.
pub fn two_node_list(vocab: &ListVocab) -> Store {
    let (s, o0) = Store::new().allocate(vocab.node);
    let (s, o1) = s.allocate(vocab.node);
    s.assign(vocab.head, Value::Obj(o0))
        .assign(vocab.n, Value::Int(2))
        .write_field(o0, vocab.next, Value::Obj(o1))
        .and_then(|s| s.write_field(o0, vocab.val, Value::Int(3)))
        .and_then(|s| s.write_field(o1, vocab.next, Value::Null))
        .and_then(|s| s.write_field(o1, vocab.val, Value::Int(8)))
        .unwrap()
}
