//! Parser for Cord syntax.
//!
//! Syntax:
//! ```text
//! [ in-types... -> out-types... : body... ] := name
//! ```
//!
//! An item is a block, an assignment, or a word; integer and `true`/`false`
//! tokens are classified as literals at parse time. Parse errors are fatal:
//! a truncated block or a dangling `:=` leaves nothing worth checking.

use crate::ast::{Block, Item, Stackspec};
use crate::lexer::{Pos, Token, tokenize};

/// A fatal syntax error, pointing at the offending token.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub pos: Pos,
}

impl ParseError {
    fn new(message: impl Into<String>, pos: Pos) -> Self {
        ParseError {
            message: message.into(),
            pos,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "parse error at {}: {}", self.pos, self.message)
    }
}

impl std::error::Error for ParseError {}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Parser {
            tokens: tokenize(source),
            pos: 0,
        }
    }

    /// Parse the whole token stream into top-level items.
    pub fn parse_items(&mut self) -> Result<Vec<Item>, ParseError> {
        let mut items = Vec::new();
        while !self.is_at_end() {
            items.push(self.parse_item()?);
        }
        Ok(items)
    }

    fn parse_item(&mut self) -> Result<Item, ParseError> {
        if self.check("[") {
            let open = self.advance().map(|t| t.pos).unwrap_or_default();
            return self.parse_block(open).map(Item::Block);
        }
        if self.check(":=") {
            return self.parse_assign().map(Item::Assign);
        }

        let tok = match self.advance() {
            Some(tok) => tok,
            None => return Err(ParseError::new("expected an item", self.last_pos())),
        };
        if tok.text.parse::<i64>().is_ok() {
            Ok(Item::IntLit(tok))
        } else if tok.text == "true" || tok.text == "false" {
            Ok(Item::BoolLit(tok))
        } else {
            Ok(Item::Word(tok))
        }
    }

    /// Parse the remainder of a block; `open` is the position of the
    /// already-consumed `[`.
    fn parse_block(&mut self, open: Pos) -> Result<Block, ParseError> {
        let stackspec = self.parse_stackspec()?;

        let mut body = Vec::new();
        while !self.is_at_end() && !self.check("]") {
            body.push(self.parse_item()?);
        }

        if self.is_at_end() {
            return Err(ParseError::new(
                "hit eof while parsing block, expected \"]\"",
                self.last_pos(),
            ));
        }
        self.advance(); // ]

        Ok(Block {
            stackspec,
            body,
            pos: open,
        })
    }

    /// A stackspec is a list of type tokens, `->`, a second list of type
    /// tokens (kept raw — the `'` splice is expanded by the resolver),
    /// terminated by `:`.
    fn parse_stackspec(&mut self) -> Result<Stackspec, ParseError> {
        let pos = self.current_pos();

        let mut inputs = Vec::new();
        while !self.is_at_end() && !self.check("->") {
            if let Some(tok) = self.advance() {
                inputs.push(tok);
            }
        }
        if self.is_at_end() {
            return Err(ParseError::new(
                "hit eof while parsing block, expected \"->\"",
                self.last_pos(),
            ));
        }
        self.advance(); // ->

        let mut outputs = Vec::new();
        while !self.is_at_end() && !self.check(":") {
            if let Some(tok) = self.advance() {
                outputs.push(tok);
            }
        }
        if self.is_at_end() {
            return Err(ParseError::new(
                "hit eof while parsing block, expected \":\"",
                self.last_pos(),
            ));
        }
        self.advance(); // :

        Ok(Stackspec {
            inputs,
            outputs,
            pos,
        })
    }

    fn parse_assign(&mut self) -> Result<Token, ParseError> {
        self.advance(); // :=
        match self.advance() {
            Some(target) => Ok(target),
            None => Err(ParseError::new(
                "hit eof while parsing assignment, expected a word",
                self.last_pos(),
            )),
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn check(&self, text: &str) -> bool {
        self.tokens.get(self.pos).is_some_and(|t| t.text == text)
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn current_pos(&self) -> Pos {
        self.tokens
            .get(self.pos)
            .map(|t| t.pos)
            .unwrap_or_else(|| self.last_pos())
    }

    /// Position of the last consumed token, for eof diagnostics.
    fn last_pos(&self) -> Pos {
        self.tokens
            .get(self.pos.saturating_sub(1))
            .map(|t| t.pos)
            .unwrap_or_default()
    }
}
