//! Item tree for Cord programs.
//!
//! A program is a flat sequence of items; blocks nest their own item
//! sequences. Items own their sub-items outright — no back-references, no
//! cycles. Every item keeps enough token information to report positions.

use crate::lexer::{Pos, Token};

/// A surface stack-effect declaration, as written: the raw input and
/// output token lists of `in... -> out... :`. Splice (`'`) expansion and
/// name resolution happen later, in the resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct Stackspec {
    pub inputs: Vec<Token>,
    pub outputs: Vec<Token>,
    pub pos: Pos,
}

/// A block literal: `[ stackspec : body... ]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stackspec: Stackspec,
    pub body: Vec<Item>,
    pub pos: Pos,
}

/// One program item.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// A name reference, resolved against the environment
    Word(Token),
    /// An integer literal, e.g. `10`
    IntLit(Token),
    /// `true` or `false`
    BoolLit(Token),
    /// A first-class block literal
    Block(Block),
    /// `:= name` — bind the top of stack to `name`
    Assign(Token),
}

impl Item {
    /// Source position for diagnostics.
    pub fn pos(&self) -> Pos {
        match self {
            Item::Word(tok) | Item::IntLit(tok) | Item::BoolLit(tok) | Item::Assign(tok) => {
                tok.pos
            }
            Item::Block(block) => block.pos,
        }
    }
}

impl std::fmt::Display for Stackspec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for tok in &self.inputs {
            write!(f, "{} ", tok)?;
        }
        write!(f, "->")?;
        for tok in &self.outputs {
            write!(f, " {}", tok)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[ {} :", self.stackspec)?;
        for item in &self.body {
            write!(f, " {}", item)?;
        }
        write!(f, " ]")
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Item::Word(tok) | Item::IntLit(tok) | Item::BoolLit(tok) => write!(f, "{}", tok),
            Item::Block(block) => write!(f, "{}", block),
            Item::Assign(tok) => write!(f, ":= {}", tok),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(text: &str) -> Token {
        Token::new(text, Pos::start())
    }

    #[test]
    fn display_round_trips_surface_syntax() {
        let block = Block {
            stackspec: Stackspec {
                inputs: vec![tok("'a"), tok("'b")],
                outputs: vec![tok("'b"), tok("'a")],
                pos: Pos::start(),
            },
            body: vec![Item::Word(tok("swp"))],
            pos: Pos::start(),
        };
        assert_eq!(block.to_string(), "[ 'a 'b -> 'b 'a : swp ]");

        let assign = Item::Assign(tok("myswap"));
        assert_eq!(assign.to_string(), ":= myswap");
    }
}
