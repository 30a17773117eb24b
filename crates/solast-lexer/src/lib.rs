//! solast Lexer - Comment scanning using logos
//!
//! The compiler's JSON AST drops comments, so they are recovered from the
//! original source text here and later attached to tree nodes. String
//! literals are lexed as whole tokens, so comment markers inside them are
//! never mistaken for comments.

mod token;

pub use token::*;

use std::ops::Range;

use logos::Logos;
use solast_ast::{Comment, CommentStyle, Placement, SourceRange};
use tracing::trace;

/// Tokenize a source string into a vector of tokens
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let kind = match result {
            Ok(kind) => kind,
            Err(_) => TokenKind::Error,
        };
        tokens.push(Token { kind, span: lexer.span() });
    }

    tokens
}

/// A token with its byte range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.clone()]
    }
}

/// All comments in `source`, in source order, for source index 0.
pub fn find_comments(source: &str) -> Vec<Comment> {
    find_comments_in(source, 0)
}

/// All comments in `source`, with ranges tagged with `source_index`.
///
/// A comment is standalone when only whitespace precedes it on its line,
/// and trailing otherwise.
pub fn find_comments_in(source: &str, source_index: i64) -> Vec<Comment> {
    let mut comments = Vec::new();
    let mut line_has_content = false;

    for token in tokenize(source) {
        if token.kind == TokenKind::Newline {
            line_has_content = false;
            continue;
        }

        if token.kind.is_comment() {
            let text = token.text(source).trim_end_matches('\r');
            let style = match token.kind {
                TokenKind::LineComment => CommentStyle::Line,
                _ => CommentStyle::Block,
            };
            let placement = if line_has_content {
                Placement::Trailing
            } else {
                Placement::Standalone
            };
            trace!(offset = token.span.start, ?style, ?placement, "found comment");
            comments.push(Comment {
                src: SourceRange::new(token.span.start, text.len(), source_index),
                text: text.to_string(),
                style,
                placement,
            });
        }

        if token.kind.is_content() {
            line_has_content = true;
        }
    }

    comments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| *k != TokenKind::Whitespace)
            .collect()
    }

    #[test]
    fn test_basic_tokens() {
        assert_eq!(
            kinds("a / b // c\n"),
            vec![
                TokenKind::Code,
                TokenKind::Slash,
                TokenKind::Code,
                TokenKind::LineComment,
                TokenKind::Newline,
            ]
        );
    }

    #[test]
    fn test_comment_markers_inside_strings() {
        assert_eq!(
            kinds(r#"s = "http://x/*y*/"; t = 'a//b';"#),
            vec![
                TokenKind::Code,
                TokenKind::Code,
                TokenKind::StringLiteral,
                TokenKind::Code,
                TokenKind::Code,
                TokenKind::Code,
                TokenKind::StringLiteral,
                TokenKind::Code,
            ]
        );
        assert!(find_comments(r#"string s = "//not a comment";"#).is_empty());
    }

    #[test]
    fn test_escaped_quote_in_string() {
        let comments = find_comments(r#"x = "a\"//b"; // real"#);
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].text, "// real");
    }

    #[test]
    fn test_standalone_and_trailing() {
        let source = "// hello\nuint x; // after\n";
        let comments = find_comments(source);
        assert_eq!(comments.len(), 2);

        assert_eq!(comments[0].text, "// hello");
        assert_eq!(comments[0].src, SourceRange::new(0, 8, 0));
        assert_eq!(comments[0].placement, Placement::Standalone);
        assert_eq!(comments[0].style, CommentStyle::Line);

        assert_eq!(comments[1].text, "// after");
        assert_eq!(comments[1].src.offset, 17);
        assert_eq!(comments[1].placement, Placement::Trailing);
    }

    #[test]
    fn test_block_comments() {
        let source = "/* one\n   two */\nuint x; /* three */ uint y;";
        let comments = find_comments_in(source, 2);
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].style, CommentStyle::Block);
        assert_eq!(comments[0].text, "/* one\n   two */");
        assert_eq!(comments[0].placement, Placement::Standalone);
        assert_eq!(comments[0].src.source_index, 2);
        assert_eq!(comments[1].placement, Placement::Trailing);
    }

    #[test]
    fn test_indented_comment_is_standalone() {
        let comments = find_comments("{\n    // inside\n    x;\n}");
        assert_eq!(comments[0].placement, Placement::Standalone);
        assert_eq!(comments[0].src.offset, 6);
    }

    #[test]
    fn test_block_comment_before_declaration() {
        let comments = find_comments("/* note */\nuint y;");
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].text, "/* note */");
        assert_eq!(comments[0].src, SourceRange::new(0, 10, 0));
        assert_eq!(comments[0].style, CommentStyle::Block);
        assert_eq!(comments[0].placement, Placement::Standalone);
    }

    #[test]
    fn test_natspec_block_comment() {
        let comments = find_comments("/** @notice hi */\nfunction f() {}");
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].text, "/** @notice hi */");
        assert_eq!(comments[0].style, CommentStyle::Block);
    }

    #[test]
    fn test_line_marker_inside_block_comment() {
        let comments = find_comments("/* a // b */");
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].text, "/* a // b */");
        assert_eq!(
            kinds("a /* x */ / b"),
            vec![
                TokenKind::Code,
                TokenKind::BlockComment,
                TokenKind::Slash,
                TokenKind::Code,
            ]
        );
    }

    #[test]
    fn test_unterminated_block_comment_is_code() {
        let comments = find_comments("x = a /* never closed");
        assert!(comments.is_empty());

        let comments = find_comments("x = a /* never // closed");
        assert!(comments.is_empty());
        assert_eq!(kinds("a /* b // c").last(), Some(&TokenKind::Error));
    }

    #[test]
    fn test_crlf_line_comment() {
        let comments = find_comments("// note\r\nuint x;");
        assert_eq!(comments[0].text, "// note");
        assert_eq!(comments[0].src.length, 7);
    }
}
