//! Checker configuration.
//!
//! Projects can extend the prelude with their own word signatures through
//! a TOML file, without touching the checker:
//!
//! ```toml
//! [words]
//! max = "int int -> int"
//! choose = "bool 'a 'a -> 'a"
//! ```
//!
//! Signature strings use the stackspec surface syntax (without the
//! trailing `:`) and go through the ordinary resolver, so generics and
//! the output splice work exactly as in source.

use crate::ast::Stackspec;
use crate::lexer::tokenize;
use crate::resolver::resolve_stackspec;
use cord_core::{Transform, Type, TypeEnv};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckerConfig {
    /// Extra word signatures: name -> stackspec string
    #[serde(default)]
    pub words: BTreeMap<String, String>,
}

impl CheckerConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        Self::from_toml(&text)
    }

    /// Resolve the declared signatures and bind them into `env`,
    /// overriding prelude words of the same name.
    pub fn apply(&self, env: &mut TypeEnv) -> Result<(), String> {
        for (name, spec) in &self.words {
            let transform =
                parse_signature(spec).map_err(|e| format!("word '{}': {}", name, e))?;
            env.bind(name.clone(), Type::Transform(transform));
        }
        Ok(())
    }
}

/// Parse a `in... -> out...` signature string into a transform.
pub fn parse_signature(spec: &str) -> Result<Transform, String> {
    let tokens = tokenize(spec);
    let arrow = tokens
        .iter()
        .position(|t| t.text == "->")
        .ok_or_else(|| "missing \"->\"".to_string())?;
    let stackspec = Stackspec {
        inputs: tokens[..arrow].to_vec(),
        outputs: tokens[arrow + 1..].to_vec(),
        pos: tokens.first().map(|t| t.pos).unwrap_or_default(),
    };
    resolve_stackspec(&stackspec).map_err(|e| e.kind.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_words_table() {
        let config = CheckerConfig::from_toml(
            r#"
            [words]
            max = "int int -> int"
            choose = "bool 'a 'a -> 'a"
            "#,
        )
        .unwrap();
        assert_eq!(config.words.len(), 2);

        let mut env = TypeEnv::new();
        config.apply(&mut env).unwrap();
        let Some(Type::Transform(choose)) = env.lookup("choose") else {
            panic!("choose should be bound to a transform");
        };
        assert_eq!(choose.generics, 1);
        assert_eq!(choose.inputs.len(), 3);
    }

    #[test]
    fn empty_config_is_fine() {
        let config = CheckerConfig::from_toml("").unwrap();
        assert!(config.words.is_empty());
    }

    #[test]
    fn bad_signature_reports_the_word() {
        let config = CheckerConfig::from_toml(
            r#"
            [words]
            broken = "float -> int"
            "#,
        )
        .unwrap();
        let err = config.apply(&mut TypeEnv::new()).unwrap_err();
        assert!(err.contains("broken"));
        assert!(err.contains("float"));
    }

    #[test]
    fn missing_arrow_is_an_error() {
        assert!(parse_signature("int int int").is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[words]\nmax = \"int int -> int\"").unwrap();

        let config = CheckerConfig::load(file.path()).unwrap();
        assert_eq!(config.words.len(), 1);
        assert!(CheckerConfig::load(Path::new("/no/such/file.toml")).is_err());
    }
}
