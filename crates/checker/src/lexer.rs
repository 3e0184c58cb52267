//! Tokenizer for Cord source text.
//!
//! Cord's lexical structure is as plain as it gets: a token is a maximal
//! run of non-whitespace characters. The lexer's real job is position
//! bookkeeping — every token carries its byte offset plus 1-indexed
//! line/column so diagnostics can point at source.

/// A position in the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pos {
    /// Byte offset from the start of the source
    pub offset: usize,
    /// Line number, 1-indexed
    pub line: usize,
    /// Column number, 1-indexed
    pub column: usize,
}

impl Pos {
    pub fn start() -> Self {
        Pos {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A token with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub pos: Pos,
}

impl Token {
    pub fn new(text: impl Into<String>, pos: Pos) -> Self {
        Token {
            text: text.into(),
            pos,
        }
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Split source into whitespace-separated tokens with positions.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut start = Pos::start();

    let mut line = 1;
    let mut column = 1;

    for (offset, ch) in source.char_indices() {
        if ch.is_whitespace() {
            if !current.is_empty() {
                tokens.push(Token::new(std::mem::take(&mut current), start));
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        } else {
            if current.is_empty() {
                start = Pos {
                    offset,
                    line,
                    column,
                };
            }
            current.push(ch);
            column += 1;
        }
    }
    if !current.is_empty() {
        tokens.push(Token::new(current, start));
    }

    tokens
}
