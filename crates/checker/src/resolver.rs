//! Stackspec resolver: surface declarations to transform values.
//!
//! The resolver does the one name-sensitive job in the type path: it maps
//! generic marker tokens (`'a`, `'acc`, ...) to sequential slot indices, so
//! the executor downstream never touches source text. Slots are assigned in
//! first-use order while scanning the input list — which establishes, by
//! construction, the invariant that slot `i` is introduced before slot
//! `i + 1`.
//!
//! In the output list the bare `'` token is the splice shorthand: it
//! expands to a copy of the entire resolved input list at that position.
//! Any other generic marker must name a generic already bound by the
//! inputs.

use crate::ast::Stackspec;
use crate::diag::{CheckError, ErrorKind};
use crate::lexer::Token;
use cord_core::{Simple, Transform, Type};

/// Resolve a surface declaration into a transform.
///
/// Declaration errors (unknown primitive names, output generics with no
/// input binding) are fatal: a malformed signature has no usable meaning.
pub fn resolve_stackspec(spec: &Stackspec) -> Result<Transform, CheckError> {
    // Slot index -> marker text, live only during resolution. Markers are
    // keyed by their full token text, so a bare ' in input position is
    // just a generic named "'" (splice meaning is output-only).
    let mut generics: Vec<String> = Vec::new();

    let mut inputs = Vec::with_capacity(spec.inputs.len());
    for tok in &spec.inputs {
        if tok.text.starts_with('\'') {
            let slot = match generics.iter().position(|name| *name == tok.text) {
                Some(slot) => slot,
                None => {
                    generics.push(tok.text.clone());
                    generics.len() - 1
                }
            };
            inputs.push(Type::Generic(slot));
        } else {
            inputs.push(Type::Simple(resolve_primitive(tok)?));
        }
    }

    let mut outputs = Vec::new();
    for tok in &spec.outputs {
        if tok.text == "'" {
            outputs.extend(inputs.iter().cloned());
        } else if tok.text.starts_with('\'') {
            match generics.iter().position(|name| *name == tok.text) {
                Some(slot) => outputs.push(Type::Generic(slot)),
                None => {
                    return Err(CheckError::new(
                        ErrorKind::UnboundGeneric {
                            name: tok.text.clone(),
                        },
                        tok.pos,
                    ));
                }
            }
        } else {
            outputs.push(Type::Simple(resolve_primitive(tok)?));
        }
    }

    Ok(Transform::new(generics.len(), inputs, outputs))
}

fn resolve_primitive(tok: &Token) -> Result<Simple, CheckError> {
    match tok.text.as_str() {
        "int" => Ok(Simple::Int),
        "bool" => Ok(Simple::Bool),
        _ => Err(CheckError::new(
            ErrorKind::InvalidTypeName {
                name: tok.text.clone(),
            },
            tok.pos,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Item;
    use crate::parser::Parser;

    /// Parse `[ <spec> : ]` and hand back the stackspec.
    fn spec(decl: &str) -> Stackspec {
        let items = Parser::new(&format!("[ {} : ]", decl))
            .parse_items()
            .expect("parse failed");
        match items.into_iter().next() {
            Some(Item::Block(block)) => block.stackspec,
            _ => panic!("expected a block"),
        }
    }

    #[test]
    fn primitives_resolve() {
        let t = resolve_stackspec(&spec("int bool -> int")).unwrap();
        assert_eq!(t.generics, 0);
        assert_eq!(t.inputs, vec![Type::int(), Type::boolean()]);
        assert_eq!(t.outputs, vec![Type::int()]);
    }

    #[test]
    fn generics_get_sequential_slots() {
        // 'a 'b -> 'b 'a  is the canonical swap declaration
        let t = resolve_stackspec(&spec("'a 'b -> 'b 'a")).unwrap();
        assert_eq!(t.generics, 2);
        assert_eq!(t.inputs, vec![Type::Generic(0), Type::Generic(1)]);
        assert_eq!(t.outputs, vec![Type::Generic(1), Type::Generic(0)]);
        assert!(t.well_formed());
    }

    #[test]
    fn repeated_generic_reuses_its_slot() {
        let t = resolve_stackspec(&spec("'a 'a 'b -> 'a")).unwrap();
        assert_eq!(t.generics, 2);
        assert_eq!(
            t.inputs,
            vec![Type::Generic(0), Type::Generic(0), Type::Generic(1)]
        );
    }

    #[test]
    fn splice_expands_to_whole_input_list() {
        let t = resolve_stackspec(&spec("int bool -> '")).unwrap();
        assert_eq!(t.outputs, vec![Type::int(), Type::boolean()]);
    }

    #[test]
    fn splice_composes_with_other_outputs() {
        let t = resolve_stackspec(&spec("int 'x -> ' bool '")).unwrap();
        assert_eq!(
            t.outputs,
            vec![
                Type::int(),
                Type::Generic(0),
                Type::boolean(),
                Type::int(),
                Type::Generic(0),
            ]
        );
    }

    #[test]
    fn splice_of_empty_inputs_is_empty() {
        let t = resolve_stackspec(&spec("-> '")).unwrap();
        assert!(t.inputs.is_empty());
        assert!(t.outputs.is_empty());
    }

    #[test]
    fn unknown_primitive_is_fatal() {
        let err = resolve_stackspec(&spec("float -> int")).unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err.kind, ErrorKind::InvalidTypeName { ref name } if name == "float"));
    }

    #[test]
    fn output_generic_must_be_bound_by_inputs() {
        let err = resolve_stackspec(&spec("'a -> 'b")).unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err.kind, ErrorKind::UnboundGeneric { ref name } if name == "'b"));
    }

    #[test]
    fn bare_quote_in_inputs_is_an_ordinary_generic() {
        let t = resolve_stackspec(&spec("' int -> '")).unwrap();
        assert_eq!(t.generics, 1);
        assert_eq!(t.inputs, vec![Type::Generic(0), Type::int()]);
        // Output ' is still the splice, not the generic
        assert_eq!(t.outputs, vec![Type::Generic(0), Type::int()]);
    }

    #[test]
    fn resolved_transforms_are_well_formed() {
        for decl in ["'a 'b 'c -> 'c 'a 'b", "int -> '", "'x int 'x -> 'x", "->"] {
            assert!(resolve_stackspec(&spec(decl)).unwrap().well_formed());
        }
    }
}
