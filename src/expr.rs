//! Expressions and atomic statements over the declared symbols.
//!
//! Only the node shapes the generators need are modelled: a statement is a
//! single assignment whose target is a variable or a field of the object a
//! variable points to.

use crate::types::{FieldId, RefTypeId, VarId};

/// Right-hand side of an assignment, or an operand of a guard.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Variable read: `v`
    Var(VarId),
    /// Field read through a variable: `v.f`
    Deref(VarId, FieldId),
    /// Integer constant
    Int(i64),
    /// The null reference
    Null,
    /// Allocation of a fresh object: `new T`
    New(RefTypeId),
}

impl Expr {
    /// Number of AST nodes.
    pub fn size(&self) -> usize {
        match self {
            Expr::Var(_) | Expr::Int(_) | Expr::Null | Expr::New(_) => 1,
            Expr::Deref(..) => 2,
        }
    }
}

/// Target of an assignment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Lvalue {
    /// `v := ...`
    Var(VarId),
    /// `v.f := ...`
    Field(VarId, FieldId),
}

impl Lvalue {
    /// The variable the target is addressed through.
    pub fn var(self) -> VarId {
        match self {
            Lvalue::Var(v) | Lvalue::Field(v, _) => v,
        }
    }
}

/// The shape of an atomic statement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StmtKind {
    /// `v := w`
    Copy,
    /// `v := w.f`
    Read,
    /// `v.f := e`
    Write,
    /// `v := new T`
    Alloc,
    /// `v := null`
    Nullify,
}

/// An atomic assignment `lhs := rhs`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stmt {
    pub lhs: Lvalue,
    pub rhs: Expr,
}

impl Stmt {
    /// `var := rhs`
    pub fn assign(var: VarId, rhs: Expr) -> Self {
        Stmt {
            lhs: Lvalue::Var(var),
            rhs,
        }
    }

    /// `var.field := rhs`
    pub fn write(var: VarId, field: FieldId, rhs: Expr) -> Self {
        Stmt {
            lhs: Lvalue::Field(var, field),
            rhs,
        }
    }

    pub fn kind(&self) -> StmtKind {
        match (&self.lhs, &self.rhs) {
            (Lvalue::Field(..), _) => StmtKind::Write,
            (Lvalue::Var(_), Expr::Deref(..)) => StmtKind::Read,
            (Lvalue::Var(_), Expr::New(_)) => StmtKind::Alloc,
            (Lvalue::Var(_), Expr::Null) => StmtKind::Nullify,
            (Lvalue::Var(_), _) => StmtKind::Copy,
        }
    }
}
