//! Errors raised while declaring symbols or validating stores.
//!
//! The generators and the domain facade never fail: degenerate inputs give
//! empty results. Only the layer that builds the inputs can go wrong.

use thiserror::Error;

use crate::types::{FieldId, RefTypeId, Type, VarId};
use crate::value::{ObjId, Value};

pub type Result<T> = std::result::Result<T, DomainError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("unknown type {0}")]
    UnknownType(Type),

    #[error("unknown variable {0}")]
    UnknownVar(VarId),

    #[error("unknown field {0}")]
    UnknownField(FieldId),

    #[error("object {0} is not allocated")]
    UnknownObject(ObjId),

    #[error("duplicate declaration of `{0}`")]
    DuplicateName(String),

    #[error("field {field} is not declared on {ty}")]
    ForeignField { field: FieldId, ty: RefTypeId },

    #[error("value {value} does not inhabit type {expected}")]
    TypeMismatch { value: Value, expected: Type },
}
