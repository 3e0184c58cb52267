//! Built-in word signatures for Cord.
//!
//! The prelude covers stack shuffling, integer arithmetic, comparison, and
//! boolean operations. Everything here is expressed as an ordinary
//! transform — builtins get no special treatment from the executor.
//!
//! Comparisons keep their operands and push the result on top
//! (`int int -> int int bool`), which is what lets a loop condition test
//! values without consuming them.

use cord_core::{Simple, Transform, Type, TypeEnv};
use std::collections::HashMap;
use std::sync::LazyLock;

static SIGNATURES: LazyLock<HashMap<&'static str, Type>> = LazyLock::new(build_signatures);

/// Look up a builtin word's type.
pub fn builtin_signature(name: &str) -> Option<&'static Type> {
    SIGNATURES.get(name)
}

/// A fresh environment with the whole prelude bound.
pub fn prelude_env() -> TypeEnv {
    let mut env = TypeEnv::new();
    for (name, ty) in SIGNATURES.iter() {
        env.bind(*name, ty.clone());
    }
    env
}

/// Build the signature table.
fn build_signatures() -> HashMap<&'static str, Type> {
    let mut m = HashMap::new();

    // Stack shuffling: fully generic. `arity` slots in, outputs listed as
    // slot indices.
    // dup ( 'a -> 'a 'a )
    shuffle(&mut m, "dup", 1, &[0, 0]);
    // drop ( 'a -> )
    shuffle(&mut m, "drop", 1, &[]);
    // swp ( 'a 'b -> 'b 'a )
    shuffle(&mut m, "swp", 2, &[1, 0]);
    // rot ( 'a 'b 'c -> 'c 'a 'b )
    shuffle(&mut m, "rot", 3, &[2, 0, 1]);
    // over ( 'a 'b -> 'a 'b 'a )
    shuffle(&mut m, "over", 2, &[0, 1, 0]);
    // nip ( 'a 'b -> 'b )
    shuffle(&mut m, "nip", 2, &[1]);
    // tuck ( 'a 'b -> 'b 'a 'b )
    shuffle(&mut m, "tuck", 2, &[1, 0, 1]);

    // Integer arithmetic ( int int -> int )
    for name in ["+", "-", "*", "/", "%"] {
        typed(&mut m, name, &[Simple::Int, Simple::Int], &[Simple::Int]);
    }

    // Comparisons keep their operands ( int int -> int int bool )
    for name in [">", "<", "="] {
        typed(
            &mut m,
            name,
            &[Simple::Int, Simple::Int],
            &[Simple::Int, Simple::Int, Simple::Bool],
        );
    }

    // Boolean operations
    typed(&mut m, "not", &[Simple::Bool], &[Simple::Bool]);
    for name in ["and", "or"] {
        typed(&mut m, name, &[Simple::Bool, Simple::Bool], &[Simple::Bool]);
    }

    m
}

fn shuffle(
    m: &mut HashMap<&'static str, Type>,
    name: &'static str,
    arity: usize,
    outputs: &[usize],
) {
    let inputs = (0..arity).map(Type::Generic).collect();
    let outputs = outputs.iter().map(|&slot| Type::Generic(slot)).collect();
    m.insert(name, Type::Transform(Transform::new(arity, inputs, outputs)));
}

fn typed(
    m: &mut HashMap<&'static str, Type>,
    name: &'static str,
    inputs: &[Simple],
    outputs: &[Simple],
) {
    let inputs = inputs.iter().map(|&s| Type::Simple(s)).collect();
    let outputs = outputs.iter().map(|&s| Type::Simple(s)).collect();
    m.insert(name, Type::Transform(Transform::new(0, inputs, outputs)));
}
