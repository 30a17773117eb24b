//! Token definitions for comment scanning
//!
//! Only the distinctions needed to find comments are made: comments, string
//! literals (so that `//` inside a string is not a comment), line breaks and
//! everything else.

use logos::{Lexer, Logos};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // === Comments ===
    #[regex(r"//[^\n]*")]
    LineComment,
    #[token("/*", block_comment)]
    BlockComment,

    // === Literals ===
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    StringLiteral,

    // === Layout ===
    #[token("\n")]
    Newline,
    #[regex(r"[ \t\r\f]+")]
    Whitespace,

    /// A run of code characters
    #[regex(r#"[^ \t\r\f\n/"']+"#)]
    Code,
    #[token("/")]
    Slash,

    /// Unterminated string or comment opener
    Error,
}

/// Consume a block comment body up to and including `*/`. An unterminated
/// comment swallows the rest of the input and lexes as an error.
fn block_comment(lex: &mut Lexer<TokenKind>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

impl TokenKind {
    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Tokens that count as content when deciding whether a comment shares
    /// its line with something else.
    pub fn is_content(self) -> bool {
        !matches!(self, TokenKind::Newline | TokenKind::Whitespace)
    }
}
