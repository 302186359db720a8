//! Declared reference types, fields and variables.
//!
//! A [`SymbolTable`] is filled once through the `declare_*` methods and is
//! read-only afterwards. The [`VarIndex`] built from it answers "which
//! variables have type `T`" without rescanning the variable list.

use std::collections::HashMap;

use crate::error::{DomainError, Result};
use crate::types::{FieldId, RefTypeId, Type, VarId, VarRole};

/// A declared reference type and the fields it owns, in declaration order.
#[derive(Debug, Clone)]
pub struct RefType {
    pub name: String,
    pub fields: Vec<FieldId>,
}

/// A field of a reference type.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    /// The type declaring the field.
    pub src: RefTypeId,
    /// The type of the values the field holds.
    pub dst: Type,
    /// Ghost field: appears in contracts only and is never synthesized.
    pub ghost: bool,
}

#[derive(Debug, Clone)]
pub struct Var {
    pub name: String,
    pub ty: Type,
    pub role: VarRole,
    pub readonly: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    ref_types: Vec<RefType>,
    fields: Vec<Field>,
    vars: Vec<Var>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a new reference type without fields.
    pub fn declare_ref_type(&mut self, name: impl Into<String>) -> Result<RefTypeId> {
        let name = name.into();
        if name == "int" || self.ref_types.iter().any(|t| t.name == name) {
            return Err(DomainError::DuplicateName(name));
        }
        let id = RefTypeId::new(self.ref_types.len());
        self.ref_types.push(RefType {
            name,
            fields: Vec::new(),
        });
        Ok(id)
    }

    /// Declares a field `name: dst` on the reference type `src`.
    pub fn declare_field(
        &mut self,
        src: RefTypeId,
        name: impl Into<String>,
        dst: Type,
        ghost: bool,
    ) -> Result<FieldId> {
        let name = name.into();
        self.check_type(Type::Ref(src))?;
        self.check_type(dst)?;
        if self.ref_types[src.index()]
            .fields
            .iter()
            .any(|&f| self.fields[f.index()].name == name)
        {
            return Err(DomainError::DuplicateName(name));
        }
        let id = FieldId::new(self.fields.len());
        self.fields.push(Field {
            name,
            src,
            dst,
            ghost,
        });
        self.ref_types[src.index()].fields.push(id);
        Ok(id)
    }

    pub fn declare_var(
        &mut self,
        name: impl Into<String>,
        ty: Type,
        role: VarRole,
        readonly: bool,
    ) -> Result<VarId> {
        let name = name.into();
        self.check_type(ty)?;
        if self.vars.iter().any(|v| v.name == name) {
            return Err(DomainError::DuplicateName(name));
        }
        let id = VarId::new(self.vars.len());
        self.vars.push(Var {
            name,
            ty,
            role,
            readonly,
        });
        Ok(id)
    }

    /// Returns an error unless `ty` is `int` or a type declared in this table.
    pub fn check_type(&self, ty: Type) -> Result<()> {
        match ty {
            Type::Int => Ok(()),
            Type::Ref(id) if id.index() < self.ref_types.len() => Ok(()),
            Type::Ref(_) => Err(DomainError::UnknownType(ty)),
        }
    }

    /// # Panics
    ///
    /// Panics if `id` was not produced by this table.
    pub fn ref_type(&self, id: RefTypeId) -> &RefType {
        &self.ref_types[id.index()]
    }

    /// # Panics
    ///
    /// Panics if `id` was not produced by this table.
    pub fn field(&self, id: FieldId) -> &Field {
        &self.fields[id.index()]
    }

    /// # Panics
    ///
    /// Panics if `id` was not produced by this table.
    pub fn var(&self, id: VarId) -> &Var {
        &self.vars[id.index()]
    }

    pub fn get_var(&self, id: VarId) -> Option<&Var> {
        self.vars.get(id.index())
    }

    pub fn get_field(&self, id: FieldId) -> Option<&Field> {
        self.fields.get(id.index())
    }

    pub fn var_by_name(&self, name: &str) -> Option<VarId> {
        self.vars
            .iter()
            .position(|v| v.name == name)
            .map(VarId::new)
    }

    pub fn field_by_name(&self, ty: RefTypeId, name: &str) -> Option<FieldId> {
        self.ref_types
            .get(ty.index())?
            .fields
            .iter()
            .copied()
            .find(|&f| self.fields[f.index()].name == name)
    }

    /// All types: every declared reference type, then `int`.
    pub fn types(&self) -> impl Iterator<Item = Type> + '_ {
        self.ref_type_ids()
            .map(Type::Ref)
            .chain(std::iter::once(Type::Int))
    }

    pub fn ref_type_ids(&self) -> impl Iterator<Item = RefTypeId> + '_ {
        (0..self.ref_types.len()).map(RefTypeId::new)
    }

    /// All fields of all reference types, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (FieldId, &Field)> + '_ {
        self.fields
            .iter()
            .enumerate()
            .map(|(i, f)| (FieldId::new(i), f))
    }

    /// All variables, in declaration order.
    pub fn vars(&self) -> impl Iterator<Item = (VarId, &Var)> + '_ {
        self.vars
            .iter()
            .enumerate()
            .map(|(i, v)| (VarId::new(i), v))
    }

    /// Fields declared on the type of a reference variable; empty for `int` variables.
    pub fn fields_of_var(&self, var: VarId) -> &[FieldId] {
        match self.var(var).ty {
            Type::Int => &[],
            Type::Ref(id) => &self.ref_types[id.index()].fields,
        }
    }

    pub fn type_name(&self, ty: Type) -> &str {
        match ty {
            Type::Int => "int",
            Type::Ref(id) => &self.ref_types[id.index()].name,
        }
    }

    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }
}

/// Variables grouped by type, computed once from a [`SymbolTable`].
///
/// Every list keeps the declaration order of the variables it holds.
#[derive(Debug, Clone, Default)]
pub struct VarIndex {
    by_type: HashMap<Type, Vec<VarId>>,
    ref_vars: Vec<VarId>,
    ref_args: Vec<VarId>,
    ref_temps: Vec<VarId>,
}

impl VarIndex {
    pub fn new(symbols: &SymbolTable) -> Self {
        let mut index = VarIndex::default();
        for (id, var) in symbols.vars() {
            index.by_type.entry(var.ty).or_default().push(id);
            if var.ty.is_ref() {
                index.ref_vars.push(id);
                match var.role {
                    VarRole::Arg => index.ref_args.push(id),
                    VarRole::Temp => index.ref_temps.push(id),
                    VarRole::Other => {}
                }
            }
        }
        index
    }

    pub fn vars_of_type(&self, ty: Type) -> &[VarId] {
        self.by_type.get(&ty).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn ref_vars(&self) -> &[VarId] {
        &self.ref_vars
    }

    pub fn ref_args(&self) -> &[VarId] {
        &self.ref_args
    }

    pub fn ref_temps(&self) -> &[VarId] {
        &self.ref_temps
    }
}
