//! The word environment: name -> type symbol table.
//!
//! One environment lives for one checking run. It is an explicit struct
//! passed by reference through the checker — never process-global — so the
//! engine stays testable and re-entrant. Assignments insert or overwrite;
//! word items look names up.

use crate::types::Type;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct TypeEnv {
    words: HashMap<String, Type>,
}

impl TypeEnv {
    pub fn new() -> Self {
        TypeEnv {
            words: HashMap::new(),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.words.get(name)
    }

    /// Insert or overwrite. Rebinding a name is ordinary behavior —
    /// assignments shadow earlier ones.
    pub fn bind(&mut self, name: impl Into<String>, ty: Type) {
        self.words.insert(name.into(), ty);
    }

    /// Convenience only; nothing in the checking loop deletes bindings.
    pub fn remove(&mut self, name: &str) -> Option<Type> {
        self.words.remove(name)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Bindings sorted by name, for deterministic snapshots.
    pub fn snapshot(&self) -> Vec<(&str, &Type)> {
        let mut entries: Vec<_> = self
            .words
            .iter()
            .map(|(name, ty)| (name.as_str(), ty))
            .collect();
        entries.sort_by_key(|(name, _)| *name);
        entries
    }
}

impl std::fmt::Display for TypeEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (name, ty) in self.snapshot() {
            writeln!(f, "{} : {}", name, ty)?;
        }
        Ok(())
    }
}
