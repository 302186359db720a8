use std::fmt;

use crate::types::Type;

/// Identity of an allocated heap object.
///
/// Object ids are local to a chain of stores: an allocation picks the
/// smallest id above every object already present.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ObjId(u32);

impl ObjId {
    pub const fn new(id: u32) -> Self {
        ObjId(id)
    }

    pub const fn id(self) -> u32 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        ObjId(self.0 + 1)
    }
}

impl fmt::Display for ObjId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "o{}", self.0)
    }
}

/// A runtime value bound to a variable or stored in a field.
///
/// Values compare structurally: integers by number, references by the
/// identity of the object they denote.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Value {
    Int(i64),
    Null,
    Obj(ObjId),
}

impl Value {
    pub fn as_int(self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_obj(self) -> Option<ObjId> {
        match self {
            Value::Obj(o) => Some(o),
            _ => None,
        }
    }

    pub fn is_null(self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether the value can be stored in a slot of the given type, ignoring
    /// the dynamic type of the referenced object.
    pub fn fits(self, ty: Type) -> bool {
        match (self, ty) {
            (Value::Int(_), Type::Int) => true,
            (Value::Null | Value::Obj(_), Type::Ref(_)) => true,
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<ObjId> for Value {
    fn from(o: ObjId) -> Self {
        Value::Obj(o)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Null => write!(f, "null"),
            Value::Obj(o) => write!(f, "{}", o),
        }
    }
}
