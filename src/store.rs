//! Heap snapshots.
//!
//! A [`Store`] binds variables to values and holds the allocated objects
//! together with their field contents. Variables and fields are
//! *uninitialized* until they are first bound, which is represented by the
//! absence of a binding. Stores are values: every update returns a new store
//! and leaves the original untouched, so stores can be shared freely between
//! search branches.

use std::collections::BTreeMap;

use crate::error::{DomainError, Result};
use crate::symbols::SymbolTable;
use crate::types::{FieldId, RefTypeId, Type, VarId};
use crate::value::{ObjId, Value};

/// An allocated heap cell.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Obj {
    pub ty: RefTypeId,
    fields: BTreeMap<FieldId, Value>,
}

impl Obj {
    pub fn new(ty: RefTypeId) -> Self {
        Obj {
            ty,
            fields: BTreeMap::new(),
        }
    }

    /// The initialized fields of the object.
    pub fn fields(&self) -> &BTreeMap<FieldId, Value> {
        &self.fields
    }

    pub fn get(&self, field: FieldId) -> Option<Value> {
        self.fields.get(&field).copied()
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct Store {
    env: BTreeMap<VarId, Value>,
    objects: BTreeMap<ObjId, Obj>,
}

/// What a single transition can lead to.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Successor {
    Store(Store),
    /// Terminal marker for undefined behavior, e.g. dereferencing `null`.
    Fault,
}

impl Successor {
    pub fn is_fault(&self) -> bool {
        matches!(self, Successor::Fault)
    }
}

impl From<Store> for Successor {
    fn from(store: Store) -> Self {
        Successor::Store(store)
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// The variable environment. Unbound variables are uninitialized.
    pub fn env(&self) -> &BTreeMap<VarId, Value> {
        &self.env
    }

    pub fn objects(&self) -> &BTreeMap<ObjId, Obj> {
        &self.objects
    }

    pub fn object(&self, obj: ObjId) -> Option<&Obj> {
        self.objects.get(&obj)
    }

    pub fn has_objects(&self) -> bool {
        !self.objects.is_empty()
    }

    pub fn is_initialized(&self, var: VarId) -> bool {
        self.env.contains_key(&var)
    }

    pub fn eval_var(&self, var: VarId) -> Option<Value> {
        self.env.get(&var).copied()
    }

    pub fn is_field_initialized(&self, obj: ObjId, field: FieldId) -> bool {
        self.objects
            .get(&obj)
            .is_some_and(|o| o.fields.contains_key(&field))
    }

    pub fn eval_field(&self, obj: ObjId, field: FieldId) -> Option<Value> {
        self.objects.get(&obj)?.get(field)
    }

    /// Returns a copy of the store with `var` bound to `value`.
    pub fn assign(&self, var: VarId, value: Value) -> Store {
        let mut next = self.clone();
        next.env.insert(var, value);
        next
    }

    /// Returns a copy of the store with `obj.field` bound to `value`.
    pub fn write_field(&self, obj: ObjId, field: FieldId, value: Value) -> Result<Store> {
        let mut next = self.clone();
        let target = next
            .objects
            .get_mut(&obj)
            .ok_or(DomainError::UnknownObject(obj))?;
        target.fields.insert(field, value);
        Ok(next)
    }

    /// Returns a copy of the store with a fresh object of type `ty`, whose
    /// fields are all uninitialized.
    pub fn allocate(&self, ty: RefTypeId) -> (Store, ObjId) {
        let id = self
            .objects
            .keys()
            .next_back()
            .map_or(ObjId::new(0), |last| last.next());
        let mut next = self.clone();
        next.objects.insert(id, Obj::new(ty));
        (next, id)
    }

    /// Partial-state containment: does `self` agree with every binding of `target`?
    ///
    /// Every variable bound in `target` must be bound to an equal value here,
    /// and every initialized field of every object in `target` must be
    /// initialized to an equal value on the object with the same identity here.
    /// Objects of `target` without initialized fields impose no constraint, so
    /// objects missing from `self` go unnoticed in that case.
    // TODO: account for objects that `target` expects to be unallocated.
    pub fn covers(&self, target: &Store) -> bool {
        let env_ok = target
            .env
            .iter()
            .all(|(&var, &val)| self.eval_var(var) == Some(val));
        if !env_ok {
            return false;
        }

        target.objects.iter().all(|(&obj, o)| {
            o.fields
                .iter()
                .all(|(&field, &val)| self.eval_field(obj, field) == Some(val))
        })
    }

    /// Checks that every binding is type-consistent with its declaration.
    pub fn check(&self, symbols: &SymbolTable) -> Result<()> {
        for (&var, &value) in &self.env {
            let decl = symbols.get_var(var).ok_or(DomainError::UnknownVar(var))?;
            self.check_value(value, decl.ty)?;
        }

        for o in self.objects.values() {
            symbols.check_type(Type::Ref(o.ty))?;
            for (&field, &value) in &o.fields {
                let decl = symbols
                    .get_field(field)
                    .ok_or(DomainError::UnknownField(field))?;
                if decl.src != o.ty {
                    return Err(DomainError::ForeignField { field, ty: o.ty });
                }
                self.check_value(value, decl.dst)?;
            }
        }

        Ok(())
    }

    fn check_value(&self, value: Value, expected: Type) -> Result<()> {
        if !value.fits(expected) {
            return Err(DomainError::TypeMismatch { value, expected });
        }
        if let Value::Obj(obj) = value {
            let target = self.object(obj).ok_or(DomainError::UnknownObject(obj))?;
            if Type::Ref(target.ty) != expected {
                return Err(DomainError::TypeMismatch { value, expected });
            }
        }
        Ok(())
    }
}
