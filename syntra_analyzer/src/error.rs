//! Error types for the two pipeline stages.
//!
//! Both stages stop at the first error. [`LexError`] is raised before any parsing starts, so
//! the parser never sees a malformed token; [`SyntaxError`] unwinds the whole descent.

use std::fmt;

use thiserror::Error;

use crate::lexer::{Span, Token, TokenClass, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// No token rule matches at `offset` (a byte offset into the source).
    #[error("unexpected character {ch:?} at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },
    /// Byte offsets would not fit the `u32` spans.
    #[error("input of {len} bytes is too large to lex")]
    InputTooLarge { len: usize },
}

impl LexError {
    pub fn offset(&self) -> usize {
        match self {
            LexError::UnexpectedChar { offset, .. } => *offset,
            LexError::InputTooLarge { .. } => 0,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { ch, offset } => Span::new(*offset, offset + ch.len_utf8()),
            LexError::InputTooLarge { .. } => Span::empty(0),
        }
    }
}

/// Grammar constructs that have more than one possible first token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    Statement,
    Factor,
    TypeKeyword,
    ComparisonOperator,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Construct::Statement => "statement",
            Construct::Factor => "factor (literal, variable, call, or parenthesized expression)",
            Construct::TypeKeyword => "type (point, distance, name, flag)",
            Construct::ComparisonOperator => "comparison operator",
        })
    }
}

/// What the parser was looking for when it gave up.
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    /// One exact token, e.g. `)` or `action`.
    Token(TokenKind),
    /// Any token of a class, e.g. an identifier.
    Class(TokenClass),
    Construct(Construct),
    /// A complete program was parsed but tokens remain.
    EndOfInput,
    /// Blocks and expressions nested deeper than the given limit.
    Nesting(u32),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "`{kind}`"),
            Expected::Class(class) => f.write_str(class.describe()),
            Expected::Construct(construct) => write!(f, "{construct}"),
            Expected::EndOfInput => f.write_str("end of input"),
            Expected::Nesting(limit) => write!(f, "at most {limit} nested blocks and expressions"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// A specific token or construct was required and another token was found.
    UnexpectedToken,
    /// A token of a given class was required and a token of another class was found.
    UnexpectedKind,
    /// Input ended where a token was required.
    UnexpectedEof,
    /// Blocks and expressions are nested past the parser's limit.
    NestingTooDeep,
}

/// The first point where the token stream stops matching the grammar.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("expected {expected}, found {} at token {index}", Found(.found.as_ref()))]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub expected: Expected,
    /// The offending token, or `None` at end of input.
    pub found: Option<Token>,
    /// Zero-based index of `found` in the token stream (the stream length at end of input).
    pub index: usize,
    /// Where to point in the source: the found token, or an empty span after the last token.
    pub span: Span,
}

impl SyntaxError {
    pub fn new(expected: Expected, found: Option<Token>, index: usize, eof_offset: u32) -> Self {
        let kind = match (&found, &expected) {
            (_, Expected::Nesting(_)) => SyntaxErrorKind::NestingTooDeep,
            (None, _) => SyntaxErrorKind::UnexpectedEof,
            (Some(_), Expected::Class(_)) => SyntaxErrorKind::UnexpectedKind,
            (Some(_), _) => SyntaxErrorKind::UnexpectedToken,
        };
        let span = found
            .as_ref()
            .map_or(Span::empty(eof_offset), |tok| tok.span);
        SyntaxError {
            kind,
            expected,
            found,
            index,
            span,
        }
    }
}

struct Found<'a>(Option<&'a Token>);

impl fmt::Display for Found<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(tok) => write!(f, "`{}`", tok.kind),
            None => f.write_str("end of input"),
        }
    }
}

/// Either stage's failure, as returned by [`crate::check`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("lexical error: {0}")]
    Lex(#[from] LexError),
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
}
