//! Type-safe identifiers for the symbols of a heap domain.
//!
//! Reference types, fields and variables live in a [`SymbolTable`][crate::symbols::SymbolTable]
//! and are referred to everywhere else through the small `Copy` handles defined here.
//! Handles are only minted by the symbol table, so an id is always valid for the
//! table that produced it.
use std::fmt;

/// Identifier of a declared reference type (0-indexed).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RefTypeId(u32);

impl RefTypeId {
    pub(crate) fn new(index: usize) -> Self {
        RefTypeId(index as u32)
    }

    /// Returns the position of the type in declaration order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RefTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Identifier of a declared field (0-indexed, over all reference types).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FieldId(u32);

impl FieldId {
    pub(crate) fn new(index: usize) -> Self {
        FieldId(index as u32)
    }

    /// Returns the position of the field in declaration order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

/// Identifier of a declared variable (0-indexed).
///
/// Variable ids order the same way the variables were declared, which is the
/// order every generator walks them in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VarId(u32);

impl VarId {
    pub(crate) fn new(index: usize) -> Self {
        VarId(index as u32)
    }

    /// Returns the position of the variable in declaration order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A type: the integer singleton or a declared reference type.
///
/// Types compare by identity: two reference types with the same shape but
/// different declarations are distinct.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Type {
    Int,
    Ref(RefTypeId),
}

impl Type {
    pub fn is_int(self) -> bool {
        matches!(self, Type::Int)
    }

    pub fn is_ref(self) -> bool {
        matches!(self, Type::Ref(_))
    }

    /// Returns the reference type id, or `None` for `int`.
    pub fn as_ref_type(self) -> Option<RefTypeId> {
        match self {
            Type::Int => None,
            Type::Ref(id) => Some(id),
        }
    }
}

impl From<RefTypeId> for Type {
    fn from(id: RefTypeId) -> Self {
        Type::Ref(id)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Ref(id) => write!(f, "{}", id),
        }
    }
}

/// The role a variable plays in the synthesized procedure.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VarRole {
    /// Procedure argument.
    Arg,
    /// Temporary introduced by the synthesizer.
    Temp,
    Other,
}

impl fmt::Display for VarRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarRole::Arg => write!(f, "arg"),
            VarRole::Temp => write!(f, "temp"),
            VarRole::Other => write!(f, "var"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_declaration_order() {
        let v0 = VarId::new(0);
        let v1 = VarId::new(1);
        assert!(v0 < v1);
        assert_eq!(v1.index(), 1);
        assert_eq!(FieldId::new(3).index(), 3);
    }

    #[test]
    fn test_type_kinds() {
        let node = RefTypeId::new(0);
        assert!(Type::Int.is_int());
        assert!(Type::from(node).is_ref());
        assert_eq!(Type::Ref(node).as_ref_type(), Some(node));
        assert_eq!(Type::Int.as_ref_type(), None);
    }

    #[test]
    fn test_types_compare_by_identity() {
        assert_ne!(Type::Ref(RefTypeId::new(0)), Type::Ref(RefTypeId::new(1)));
        assert_ne!(Type::Int, Type::Ref(RefTypeId::new(0)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Type::Int.to_string(), "int");
        assert_eq!(Type::Ref(RefTypeId::new(2)).to_string(), "T2");
        assert_eq!(VarId::new(4).to_string(), "v4");
        assert_eq!(VarRole::Temp.to_string(), "temp");
    }
}
