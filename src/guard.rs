//! Boolean discriminators over the domain vocabulary.
//!
//! Subterms are reference-counted so that the composed layers of the guard
//! grammar (negations, cubes, disjunctions) share their basic literals instead
//! of copying them.

use std::sync::Arc;

use crate::expr::Expr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Guard {
    True,
    /// Integer or reference equality: `e1 == e2`
    Eq(Expr, Expr),
    /// Integer comparison: `e1 < e2`
    Lt(Expr, Expr),
    Not(Arc<Guard>),
    And(Arc<Guard>, Arc<Guard>),
    Or(Arc<Guard>, Arc<Guard>),
}

impl Guard {
    pub fn eq(lhs: Expr, rhs: Expr) -> Self {
        Guard::Eq(lhs, rhs)
    }

    pub fn lt(lhs: Expr, rhs: Expr) -> Self {
        Guard::Lt(lhs, rhs)
    }

    pub fn not(value: impl Into<Arc<Guard>>) -> Self {
        Guard::Not(value.into())
    }

    pub fn and(lhs: impl Into<Arc<Guard>>, rhs: impl Into<Arc<Guard>>) -> Self {
        Guard::And(lhs.into(), rhs.into())
    }

    pub fn or(lhs: impl Into<Arc<Guard>>, rhs: impl Into<Arc<Guard>>) -> Self {
        Guard::Or(lhs.into(), rhs.into())
    }

    /// Size of the guard (number of AST nodes), used as its syntactic cost.
    pub fn size(&self) -> usize {
        match self {
            Guard::True => 1,
            Guard::Eq(l, r) | Guard::Lt(l, r) => 1 + l.size() + r.size(),
            Guard::Not(g) => 1 + g.size(),
            Guard::And(l, r) | Guard::Or(l, r) => 1 + l.size() + r.size(),
        }
    }

    /// Depth of the boolean structure (0 for comparisons and `true`).
    pub fn depth(&self) -> usize {
        match self {
            Guard::True | Guard::Eq(..) | Guard::Lt(..) => 0,
            Guard::Not(g) => 1 + g.depth(),
            Guard::And(l, r) | Guard::Or(l, r) => 1 + l.depth().max(r.depth()),
        }
    }

    /// Whether the guard is a single comparison.
    pub fn is_literal(&self) -> bool {
        matches!(self, Guard::Eq(..) | Guard::Lt(..))
    }
}
