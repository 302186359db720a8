use crate::expr::Stmt;
use crate::guard::Guard;
use crate::store::{Store, Successor};

/// The semantics of statements and guards, supplied by an interpreter.
///
/// The domain only consumes this contract. Implementations must be pure:
/// applying a statement returns fresh successors and leaves `store` alone.
pub trait TransitionRelation {
    /// Executes `stmt` from `store`.
    ///
    /// The result may be empty, a single successor, or several successors for
    /// non-deterministic statements. [`Successor::Fault`] marks undefined
    /// behavior.
    fn apply(&self, store: &Store, stmt: &Stmt) -> Vec<Successor>;

    /// Evaluates `guard` in `store`, or `None` if evaluation gets stuck
    /// (e.g. reads a field through `null` or an uninitialized variable).
    fn test(&self, guard: &Guard, store: &Store) -> Option<bool>;
}

impl<R: TransitionRelation + ?Sized> TransitionRelation for &R {
    fn apply(&self, store: &Store, stmt: &Stmt) -> Vec<Successor> {
        (**self).apply(store, stmt)
    }

    fn test(&self, guard: &Guard, store: &Store) -> Option<bool> {
        (**self).test(guard, store)
    }
}

impl<R: TransitionRelation + ?Sized> TransitionRelation for Box<R> {
    fn apply(&self, store: &Store, stmt: &Stmt) -> Vec<Successor> {
        (**self).apply(store, stmt)
    }

    fn test(&self, guard: &Guard, store: &Store) -> Option<bool> {
        (**self).test(guard, store)
    }
}
