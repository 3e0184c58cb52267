//! Cord Core: the type model for stack-based concatenative languages
//!
//! This crate holds the value-level pieces the checker computes with,
//! independent of any syntax or I/O:
//!
//! - `types`: Simple / Generic / Transform type values
//! - `stack`: the proof stack of types (`TypeStack`)
//! - `bindings`: the per-application generic binding map
//! - `env`: the name -> type word environment
//!
//! Nothing here reads source text or reports positions; those concerns live
//! in the checker crate.

pub mod bindings;
pub mod env;
pub mod stack;
pub mod types;

pub use bindings::GenericBindings;
pub use env::TypeEnv;
pub use stack::TypeStack;
pub use types::{Simple, Transform, Type};
