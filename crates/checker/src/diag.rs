//! Error taxonomy for the checker.
//!
//! Three tiers, with different recovery behavior:
//!
//! - declaration errors — a malformed stackspec; fatal, the run aborts
//!   because no well-formed transform can be produced
//! - type errors — an item that doesn't fit the current stack; recoverable,
//!   the driver reports them and keeps checking on the same stack (safe
//!   because transform application is atomic)
//! - internal invariant breaks — a transform the resolver should never have
//!   produced; fatal
//!
//! `is_fatal` is the single source of truth the driver consults.

use crate::lexer::Pos;
use cord_core::Type;

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    // -- declaration errors --------------------------------------------
    /// A type token that is neither a primitive name nor a generic marker
    InvalidTypeName { name: String },
    /// An output generic that no input bound
    UnboundGeneric { name: String },

    // -- type errors ---------------------------------------------------
    /// The stack's top slots don't match a transform's declared inputs
    InputMismatch { expected: Vec<Type>, found: Vec<Type> },
    /// A block body doesn't produce its declared outputs
    BlockEffectMismatch { declared: Vec<Type>, actual: Vec<Type> },
    UnknownWord { name: String },
    /// `:= name` with nothing on the stack
    EmptyStackAssignment { name: String },
    /// `:= name` with an unresolved generic on top
    AssignGenericForbidden { name: String },
    /// Assignment inside a block body
    IllegalNestedAssignment { name: String },

    // -- internal invariant breaks -------------------------------------
    /// Nested transform types in a signature, or a binding-map index out
    /// of range. Either the resolver let a bad transform through or the
    /// executor lost track of its bindings; no sound recovery exists.
    Unsupported { detail: String },
}

impl ErrorKind {
    /// Fatal errors abort the run; the rest are reported per item.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidTypeName { .. }
                | ErrorKind::UnboundGeneric { .. }
                | ErrorKind::Unsupported { .. }
        )
    }
}

fn type_list(types: &[Type]) -> String {
    let rendered: Vec<String> = types.iter().map(|t| t.to_string()).collect();
    rendered.join(" ")
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidTypeName { name } => {
                write!(f, "invalid type name '{}' (expected int, bool, or a generic)", name)
            }
            ErrorKind::UnboundGeneric { name } => {
                write!(f, "generic {} in output types is not present in input types", name)
            }
            ErrorKind::InputMismatch { expected, found } => {
                write!(
                    f,
                    "stack does not match transform inputs: expected [{}], found [{}]",
                    type_list(expected),
                    type_list(found)
                )
            }
            ErrorKind::BlockEffectMismatch { declared, actual } => {
                write!(
                    f,
                    "block body does not produce its declared outputs: declared [{}], got [{}]",
                    type_list(declared),
                    type_list(actual)
                )
            }
            ErrorKind::UnknownWord { name } => write!(f, "unknown word '{}'", name),
            ErrorKind::EmptyStackAssignment { name } => {
                write!(f, "cannot assign '{}': the stack is empty", name)
            }
            ErrorKind::AssignGenericForbidden { name } => {
                write!(
                    f,
                    "cannot assign '{}': top of stack is an unresolved generic",
                    name
                )
            }
            ErrorKind::IllegalNestedAssignment { name } => {
                write!(
                    f,
                    "assignment to '{}' inside a block; assignment is only legal at top level",
                    name
                )
            }
            ErrorKind::Unsupported { detail } => write!(f, "unsupported: {}", detail),
        }
    }
}

/// An error (or reportable diagnostic) with its source position.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckError {
    pub kind: ErrorKind,
    pub pos: Pos,
}

impl CheckError {
    pub fn new(kind: ErrorKind, pos: Pos) -> Self {
        CheckError { kind, pos }
    }

    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

impl std::fmt::Display for CheckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.pos, self.kind)
    }
}

impl std::error::Error for CheckError {}
