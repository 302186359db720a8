//! The static universe of candidate statements.
//!
//! Statements are enumerated from the declared variables and fields alone;
//! example stores play no part. Every statement pairs type-compatible
//! operands by construction, so no type check happens afterwards.

use log::debug;

use crate::expr::{Expr, Stmt};
use crate::symbols::{SymbolTable, VarIndex};
use crate::types::Type;

/// Enumerates every well-typed atomic statement over the declared symbols.
///
/// The statements come out in a fixed order:
///
/// 1. `lhs := rhs` for distinct variables of the same type, `lhs` writable;
/// 2. then, for each reference variable `v` in declaration order:
///    - `v := new T` and `v := null`, if `v` is writable;
///    - `v.f := null` for each reference field `f` of `v`'s type, and
///      `v.f := r` for each variable `r` of `f`'s target type
///      (field writes ignore `v`'s readonly flag);
///    - `v := r.f` for each field `f` targeting `v`'s type and each variable
///      `r` of `f`'s declaring type, if `v` is writable.
pub fn generate_actions(symbols: &SymbolTable, index: &VarIndex) -> Vec<Stmt> {
    let mut result = Vec::new();

    // Variable-to-variable assignments.
    for (lhs, var) in symbols.vars() {
        if var.readonly {
            continue;
        }
        for &rhs in index.vars_of_type(var.ty) {
            if lhs != rhs {
                result.push(Stmt::assign(lhs, Expr::Var(rhs)));
            }
        }
    }

    for &lhs in index.ref_vars() {
        let var = symbols.var(lhs);
        let Type::Ref(ty) = var.ty else {
            continue;
        };

        if !var.readonly {
            result.push(Stmt::assign(lhs, Expr::New(ty)));
            result.push(Stmt::assign(lhs, Expr::Null));
        }

        for &f in &symbols.ref_type(ty).fields {
            let field = symbols.field(f);
            if field.dst.is_ref() {
                result.push(Stmt::write(lhs, f, Expr::Null));
            }
            for &rhs in index.vars_of_type(field.dst) {
                result.push(Stmt::write(lhs, f, Expr::Var(rhs)));
            }
        }

        if !var.readonly {
            for (f, field) in symbols.fields() {
                if field.dst != var.ty {
                    continue;
                }
                for &rhs in index.vars_of_type(Type::Ref(field.src)) {
                    result.push(Stmt::assign(lhs, Expr::Deref(rhs, f)));
                }
            }
        }
    }

    debug!(
        "generate_actions: {} statements over {} variables and {} fields",
        result.len(),
        symbols.num_vars(),
        symbols.num_fields()
    );
    result
}
