//! Textual rendering of domains, statements, guards and stores.
//!
//! Ids carry no names, so rendering goes through a [`Pretty`] wrapper that
//! resolves them against a [`SymbolTable`]. The renderer only reads the
//! tables it is handed.
//!
//! # Examples
//!
//! ```
//! use heap_synth::expr::{Expr, Stmt};
//! use heap_synth::render::pretty;
//! use heap_synth::symbols::SymbolTable;
//! use heap_synth::types::{Type, VarRole};
//!
//! let mut symbols = SymbolTable::new();
//! let node = symbols.declare_ref_type("Node").unwrap();
//! let next = symbols.declare_field(node, "next", Type::Ref(node), false).unwrap();
//! let p = symbols.declare_var("p", Type::Ref(node), VarRole::Arg, false).unwrap();
//!
//! let stmt = Stmt::assign(p, Expr::Deref(p, next));
//! assert_eq!(pretty(&symbols, &stmt).to_string(), "p = p.next;");
//! ```

use std::fmt::{self, Display, Formatter};

use crate::expr::{Expr, Lvalue, Stmt};
use crate::guard::Guard;
use crate::store::Store;
use crate::symbols::SymbolTable;
use crate::types::{Type, VarId};

/// An item paired with the symbol table that names its ids.
#[derive(Debug)]
pub struct Pretty<'a, T: ?Sized> {
    symbols: &'a SymbolTable,
    item: &'a T,
}

pub fn pretty<'a, T: ?Sized>(symbols: &'a SymbolTable, item: &'a T) -> Pretty<'a, T> {
    Pretty { symbols, item }
}

impl<'a, T: ?Sized> Pretty<'a, T> {
    fn with<U: ?Sized>(&self, item: &'a U) -> Pretty<'a, U> {
        pretty(self.symbols, item)
    }

    fn var_name(&self, var: VarId) -> &'a str {
        &self.symbols.var(var).name
    }
}

impl Display for Pretty<'_, Type> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbols.type_name(*self.item))
    }
}

impl Display for Pretty<'_, Expr> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self.item {
            Expr::Var(v) => write!(f, "{}", self.var_name(v)),
            Expr::Deref(v, field) => {
                write!(f, "{}.{}", self.var_name(v), self.symbols.field(field).name)
            }
            Expr::Int(n) => write!(f, "{}", n),
            Expr::Null => write!(f, "null"),
            Expr::New(ty) => write!(f, "new {}()", self.symbols.ref_type(ty).name),
        }
    }
}

impl Display for Pretty<'_, Lvalue> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self.item {
            Lvalue::Var(v) => write!(f, "{}", self.var_name(v)),
            Lvalue::Field(v, field) => {
                write!(f, "{}.{}", self.var_name(v), self.symbols.field(field).name)
            }
        }
    }
}

impl Display for Pretty<'_, Stmt> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {};",
            self.with(&self.item.lhs),
            self.with(&self.item.rhs)
        )
    }
}

impl Display for Pretty<'_, Guard> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.item {
            Guard::True => write!(f, "true"),
            Guard::Eq(l, r) => write!(f, "{} == {}", self.with(l), self.with(r)),
            Guard::Lt(l, r) => write!(f, "{} < {}", self.with(l), self.with(r)),
            Guard::Not(g) => write!(f, "!({})", self.with(&**g)),
            Guard::And(l, r) => {
                write!(f, "({} && {})", self.with(&**l), self.with(&**r))
            }
            Guard::Or(l, r) => {
                write!(f, "({} || {})", self.with(&**l), self.with(&**r))
            }
        }
    }
}

impl Display for Pretty<'_, Store> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (&var, value)) in self.item.env().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", self.var_name(var), value)?;
        }
        write!(f, "}}")?;
        for (obj, o) in self.item.objects() {
            write!(f, " {}:{}{{", obj, self.symbols.ref_type(o.ty).name)?;
            for (i, (&field, value)) in o.fields().iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}={}", self.symbols.field(field).name, value)?;
            }
            write!(f, "}}")?;
        }
        Ok(())
    }
}

/// A listing of the types, variables and actions of a domain.
///
/// ```text
/// HeapDomain
/// types:
///   Node { next: Node, val: int }
///   int
/// vars:
///   arg head: Node (readonly)
/// actions:
///   head.next = null;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DomainReport<'a> {
    name: &'a str,
    symbols: &'a SymbolTable,
    actions: &'a [Stmt],
}

impl<'a> DomainReport<'a> {
    pub fn new(name: &'a str, symbols: &'a SymbolTable, actions: &'a [Stmt]) -> Self {
        Self {
            name,
            symbols,
            actions,
        }
    }
}

impl Display for DomainReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let symbols = self.symbols;
        writeln!(f, "{}", self.name)?;

        writeln!(f, "types:")?;
        for ty in symbols.types() {
            let Type::Ref(id) = ty else {
                writeln!(f, "  {}", pretty(symbols, &ty))?;
                continue;
            };
            write!(f, "  {} {{", symbols.ref_type(id).name)?;
            for (i, &field) in symbols.ref_type(id).fields.iter().enumerate() {
                let field = symbols.field(field);
                let sep = if i == 0 { " " } else { ", " };
                let ghost = if field.ghost { "ghost " } else { "" };
                write!(
                    f,
                    "{}{}{}: {}",
                    sep,
                    ghost,
                    field.name,
                    symbols.type_name(field.dst)
                )?;
            }
            writeln!(f, " }}")?;
        }

        writeln!(f, "vars:")?;
        for (_, var) in symbols.vars() {
            write!(
                f,
                "  {} {}: {}",
                var.role,
                var.name,
                symbols.type_name(var.ty)
            )?;
            if var.readonly {
                write!(f, " (readonly)")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "actions:")?;
        for stmt in self.actions {
            writeln!(f, "  {}", pretty(symbols, stmt))?;
        }
        Ok(())
    }
}
