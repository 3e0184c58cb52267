//! Stack-effect type checker for Cord.
//!
//! The engine has three layers:
//!
//! - [`apply_transform`] — the unification core. Applies one transform to a
//!   stack, binding generic slots positionally from the first matching
//!   input occurrence and substituting them everywhere else.
//! - [`Checker::verify_block`] — replays a block body on a scratch stack
//!   seeded with the block's declared inputs and compares the result
//!   against its declared outputs.
//! - [`Checker::step`] / [`Checker::check_items`] — top-level semantics
//!   over the run's shared stack and environment.
//!
//! `apply_transform` is atomic: it validates everything before mutating,
//! so a failed application leaves the stack untouched and the driver can
//! keep checking subsequent items after reporting the error.

use crate::ast::{Block, Item};
use crate::builtins::prelude_env;
use crate::diag::{CheckError, ErrorKind};
use crate::lexer::{Pos, Token};
use crate::resolver::resolve_stackspec;
use cord_core::{GenericBindings, Transform, Type, TypeEnv, TypeStack};
use tracing::debug;

fn unsupported(detail: impl Into<String>, pos: Pos) -> CheckError {
    CheckError::new(
        ErrorKind::Unsupported {
            detail: detail.into(),
        },
        pos,
    )
}

/// Apply `transform` to `stack`, or fail without mutating it.
///
/// The top `inputs.len()` slots are matched oldest-to-newest against the
/// input list. A generic slot seen for the first time binds to whatever
/// the stack holds there; later references substitute the binding and
/// require structural equality. Only once the whole window validates are
/// the inputs popped and the (substituted) outputs pushed.
pub fn apply_transform(
    stack: &mut TypeStack,
    transform: &Transform,
    pos: Pos,
) -> Result<(), CheckError> {
    let window = match stack.top_slice(transform.inputs.len()) {
        Some(window) => window,
        None => {
            return Err(CheckError::new(
                ErrorKind::InputMismatch {
                    expected: transform.inputs.clone(),
                    found: stack.as_slice().to_vec(),
                },
                pos,
            ));
        }
    };

    let mut bindings = GenericBindings::with_capacity(transform.generics);
    for (slot, input) in window.iter().zip(&transform.inputs) {
        let expected = match input {
            Type::Generic(k) if *k == bindings.len() => {
                // First occurrence: matches anything, records the binding.
                bindings.push(slot.clone());
                continue;
            }
            Type::Generic(k) => match bindings.get(*k) {
                Some(bound) => bound,
                None => {
                    return Err(unsupported(
                        format!("input generic '{} referenced before its introduction", k),
                        pos,
                    ));
                }
            },
            Type::Transform(_) => {
                return Err(unsupported("transform-typed input in a signature", pos));
            }
            concrete => concrete,
        };
        if expected != slot {
            return Err(CheckError::new(
                ErrorKind::InputMismatch {
                    expected: transform.inputs.clone(),
                    found: window.to_vec(),
                },
                pos,
            ));
        }
    }

    // Resolve outputs before touching the stack, so every failure path
    // leaves it unchanged.
    let mut produced = Vec::with_capacity(transform.outputs.len());
    for output in &transform.outputs {
        match output {
            Type::Generic(k) => match bindings.get(*k) {
                Some(bound) => produced.push(bound.clone()),
                None => {
                    return Err(unsupported(
                        format!("output generic '{} was never bound by the inputs", k),
                        pos,
                    ));
                }
            },
            Type::Transform(_) => {
                return Err(unsupported("transform-typed output in a signature", pos));
            }
            concrete => produced.push(concrete.clone()),
        }
    }

    stack.drop_top(transform.inputs.len());
    for ty in produced {
        stack.push(ty);
    }
    Ok(())
}

/// The checking engine: one environment, driven over one item stream.
pub struct Checker {
    env: TypeEnv,
}

impl Checker {
    /// A checker with the builtin prelude bound.
    pub fn new() -> Self {
        Checker {
            env: prelude_env(),
        }
    }

    /// A checker over a caller-supplied environment.
    pub fn with_env(env: TypeEnv) -> Self {
        Checker { env }
    }

    pub fn env(&self) -> &TypeEnv {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut TypeEnv {
        &mut self.env
    }

    /// Consume the checker, keeping the environment it built up.
    pub fn into_env(self) -> TypeEnv {
        self.env
    }

    /// Apply one top-level item to the shared stack and environment.
    pub fn step(&mut self, stack: &mut TypeStack, item: &Item) -> Result<(), CheckError> {
        match item {
            Item::Word(tok) => self.apply_word(stack, tok),
            Item::IntLit(_) => {
                stack.push(Type::int());
                Ok(())
            }
            Item::BoolLit(_) => {
                stack.push(Type::boolean());
                Ok(())
            }
            Item::Block(block) => {
                // Blocks are first-class: push the signature, don't run
                // the body. Body checking is verify_block's job.
                let transform = resolve_stackspec(&block.stackspec)?;
                stack.push(Type::Transform(transform));
                Ok(())
            }
            Item::Assign(target) => {
                match stack.peek() {
                    None => {
                        return Err(CheckError::new(
                            ErrorKind::EmptyStackAssignment {
                                name: target.text.clone(),
                            },
                            target.pos,
                        ));
                    }
                    Some(top) if top.is_generic() => {
                        return Err(CheckError::new(
                            ErrorKind::AssignGenericForbidden {
                                name: target.text.clone(),
                            },
                            target.pos,
                        ));
                    }
                    Some(_) => {}
                }
                if let Some(ty) = stack.pop() {
                    self.env.bind(target.text.clone(), ty);
                }
                Ok(())
            }
        }
    }

    /// Look a word up and apply it: simple and generic values push a
    /// copy, transforms execute against the stack.
    fn apply_word(&self, stack: &mut TypeStack, tok: &Token) -> Result<(), CheckError> {
        let ty = match self.env.lookup(&tok.text) {
            Some(ty) => ty.clone(),
            None => {
                return Err(CheckError::new(
                    ErrorKind::UnknownWord {
                        name: tok.text.clone(),
                    },
                    tok.pos,
                ));
            }
        };
        match ty {
            Type::Transform(transform) => apply_transform(stack, &transform, tok.pos),
            value => {
                stack.push(value);
                Ok(())
            }
        }
    }

    /// Check a block's body against its declared effect.
    ///
    /// A scratch stack is seeded with the declared inputs (generics
    /// included — they stand for the caller's still-unknown values), the
    /// body is replayed against it, and the result must equal the
    /// declared outputs exactly. Nested block literals push their
    /// signature and are verified recursively; assignments are illegal
    /// inside a body.
    pub fn verify_block(&self, block: &Block) -> Result<(), CheckError> {
        let transform = resolve_stackspec(&block.stackspec)?;
        let mut scratch = TypeStack::from_types(transform.inputs.clone());

        for item in &block.body {
            match item {
                Item::Word(tok) => self.apply_word(&mut scratch, tok)?,
                Item::IntLit(_) => scratch.push(Type::int()),
                Item::BoolLit(_) => scratch.push(Type::boolean()),
                Item::Block(nested) => {
                    let signature = resolve_stackspec(&nested.stackspec)?;
                    scratch.push(Type::Transform(signature));
                    self.verify_block(nested)?;
                }
                Item::Assign(target) => {
                    return Err(CheckError::new(
                        ErrorKind::IllegalNestedAssignment {
                            name: target.text.clone(),
                        },
                        target.pos,
                    ));
                }
            }
        }

        if scratch.as_slice() != transform.outputs.as_slice() {
            return Err(CheckError::new(
                ErrorKind::BlockEffectMismatch {
                    declared: transform.outputs.clone(),
                    actual: scratch.as_slice().to_vec(),
                },
                block.pos,
            ));
        }
        Ok(())
    }

    /// Drive the whole item stream.
    ///
    /// Recoverable type errors are collected and checking continues on the
    /// same stack — safe because a failed application never mutates it.
    /// Block bodies are verified eagerly, right after the block item is
    /// processed. Fatal errors (malformed declarations, broken internal
    /// invariants) abort immediately.
    pub fn check_items(
        &mut self,
        stack: &mut TypeStack,
        items: &[Item],
    ) -> Result<Vec<CheckError>, CheckError> {
        let mut diagnostics = Vec::new();
        for item in items {
            if let Err(err) = self.step(stack, item) {
                if err.is_fatal() {
                    return Err(err);
                }
                debug!(%err, "type error; continuing on unchanged stack");
                diagnostics.push(err);
            }
            if let Item::Block(block) = item {
                if let Err(err) = self.verify_block(block) {
                    if err.is_fatal() {
                        return Err(err);
                    }
                    debug!(%err, "block verification failed");
                    diagnostics.push(err);
                }
            }
            debug!(item = %item, stack = %stack, "checked item");
        }
        Ok(diagnostics)
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}
