//! Cord Checker Library
//!
//! Static stack-effect type checking for Cord programs: lex, parse, and
//! replay the item stream against a type stack, verifying every block's
//! declared effect along the way.
//!
//! ```rust,ignore
//! use cordc::check_source;
//!
//! let outcome = check_source("0 1 + := answer")?;
//! assert!(outcome.is_clean());
//! ```
//!
//! The checker never evaluates anything — only types move. See
//! [`typechecker`] for the engine and [`resolver`] for how surface
//! declarations become transforms.

pub mod ast;
pub mod builtins;
pub mod config;
pub mod diag;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod typechecker;

pub use ast::{Block, Item, Stackspec};
pub use config::CheckerConfig;
pub use cord_core::{Simple, Transform, Type, TypeEnv, TypeStack};
pub use diag::{CheckError, ErrorKind};
pub use lexer::{Pos, Token};
pub use parser::{ParseError, Parser};
pub use typechecker::{Checker, apply_transform};

/// Everything a checking run produced.
pub struct CheckOutcome {
    /// Recoverable type errors, in source order
    pub diagnostics: Vec<CheckError>,
    /// The type stack after the last item
    pub stack: TypeStack,
    /// The word environment after the last item
    pub env: TypeEnv,
}

impl CheckOutcome {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Check a source string with the builtin prelude.
///
/// `Err` carries the first fatal error (syntax, malformed declaration, or
/// broken internal invariant); recoverable type errors are returned inside
/// the outcome.
pub fn check_source(source: &str) -> Result<CheckOutcome, String> {
    check_source_with_config(source, &CheckerConfig::default())
}

/// Check a source string with extra word signatures from `config`.
pub fn check_source_with_config(
    source: &str,
    config: &CheckerConfig,
) -> Result<CheckOutcome, String> {
    let items = Parser::new(source).parse_items().map_err(|e| e.to_string())?;

    let mut checker = Checker::new();
    config.apply(checker.env_mut())?;

    let mut stack = TypeStack::new();
    let diagnostics = checker
        .check_items(&mut stack, &items)
        .map_err(|e| e.to_string())?;

    Ok(CheckOutcome {
        diagnostics,
        stack,
        env: checker.into_env(),
    })
}
