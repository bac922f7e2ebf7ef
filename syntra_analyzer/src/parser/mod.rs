//! Recursive-descent recognizer for Syntra programs.
//!
//! Inputs: a [`TokenCursor`] over lexer tokens (no trivia, no EOF token).
//! Each grammar rule has one `parse_*` procedure that consumes tokens and returns
//! `Ok(())` or the first [`SyntaxError`]; errors propagate with `?` all the way out of
//! [`Parser::parse`]. There is no recovery and no backtracking.
//!
//! Responsibility: accept/reject only. No AST is built; the parser records a post-order stream
//! of [`ParseEvent`]s (one per recognized rule) that later stages may consume.

use tracing::{debug, trace};

use crate::error::{Construct, Expected, SyntaxError};
use crate::lexer::{Delim, Keyword, Symbol, Token, TokenClass, TokenKind, TokenRange};

mod expr;
mod item;
mod stmt;
mod tokenstream;
pub use tokenstream::TokenCursor;

pub type PResult<T> = Result<T, SyntaxError>;

/// How many blocks and expressions may be open at once.
///
/// Each level costs several stack frames; past this limit the input is rejected with a
/// [`SyntaxError`] instead of exhausting the stack.
pub const MAX_NESTING: u32 = 256;

/// Grammar rules, as reported in [`ParseEvent`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Program,
    UseDecl,
    Action,
    ParamList,
    Param,
    Block,
    VarDecl,
    AssignStmt,
    ShowStmt,
    GetStmt,
    IfStmt,
    WhileStmt,
    ForStmt,
    ReturnStmt,
    /// `Expr ";"` used as a statement.
    ExprStmt,
    Condition,
    Expr,
    Term,
    /// `NUMBER`, `STRING`, `true` or `false`.
    Literal,
    /// A bare identifier in expression position.
    Variable,
    /// `"(" Expr ")"`
    Paren,
    /// `IDENT "(" ExprList? ")"`
    Call,
    ExprList,
}

/// A rule that was fully recognized, covering the tokens `[lo, hi)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseEvent {
    pub rule: Rule,
    pub tokens: TokenRange,
}

#[derive(Debug)]
pub struct ParseOutput {
    pub tokens: Vec<Token>,
    pub events: Vec<ParseEvent>,
}

pub struct Parser {
    token_cursor: TokenCursor,
    events: Vec<ParseEvent>,
    depth: u32,
}

impl Parser {
    pub fn new(token_cursor: TokenCursor) -> Self {
        Parser {
            token_cursor,
            events: Vec::new(),
            depth: 0,
        }
    }

    /// Parser's entry point: the whole token stream must be one `Program`.
    pub fn parse(&mut self) -> PResult<()> {
        match self.parse_program() {
            Ok(()) => {
                debug!(
                    tokens = self.token_cursor.len(),
                    events = self.events.len(),
                    "accepted program"
                );
                Ok(())
            }
            Err(err) => {
                debug!(index = err.index, "rejected program: {err}");
                Err(err)
            }
        }
    }

    /// Consumes the parser, handing back the tokens and the recorded events.
    pub fn finish(self) -> ParseOutput {
        ParseOutput {
            tokens: self.token_cursor.into_tokens(),
            events: self.events,
        }
    }

    /// Runs `f` as the descent for `rule`; on success records the tokens it consumed.
    fn node(&mut self, rule: Rule, f: impl FnOnce(&mut Self) -> PResult<()>) -> PResult<()> {
        let lo = self.token_cursor.position();
        f(self)?;
        let hi = self.token_cursor.position();
        self.events.push(ParseEvent {
            rule,
            tokens: TokenRange::new(lo as u32, hi as u32),
        });
        Ok(())
    }

    /// Runs `f` one nesting level deeper, failing at the current token past [`MAX_NESTING`].
    fn nested(&mut self, f: impl FnOnce(&mut Self) -> PResult<()>) -> PResult<()> {
        if self.depth >= MAX_NESTING {
            return Err(self.unexpected(Expected::Nesting(MAX_NESTING)));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn cur(&self) -> Option<&Token> {
        self.token_cursor.current()
    }

    fn cur_kind(&self) -> Option<&TokenKind> {
        self.cur().map(|tok| &tok.kind)
    }

    fn peek_kind(&self, n: usize) -> Option<&TokenKind> {
        self.token_cursor.peek(n).map(|tok| &tok.kind)
    }

    fn bump(&mut self) {
        if let Some(tok) = self.cur() {
            trace!(index = self.token_cursor.position(), token = %tok.kind, "bump");
        }
        self.token_cursor.advance();
    }

    fn at_keyword(&self, kw: Keyword) -> bool {
        self.cur_kind().is_some_and(|k| k.is_keyword(kw))
    }

    fn at_delim(&self, delim: Delim) -> bool {
        self.cur_kind().is_some_and(|k| k.is_delim(delim))
    }

    fn at_op(&self, text: &str) -> bool {
        self.cur_kind().is_some_and(|k| k.is_op(text))
    }

    fn at_type_keyword(&self) -> bool {
        self.cur_kind().and_then(TokenKind::type_keyword).is_some()
    }

    fn can_begin_expr(&self) -> bool {
        self.cur().is_some_and(Token::can_begin_expr)
    }

    fn eat_keyword(&mut self, kw: Keyword) -> bool {
        if self.at_keyword(kw) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn eat_delim(&mut self, delim: Delim) -> bool {
        if self.at_delim(delim) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes exactly `kind` or fails with "expected `kind`".
    fn expect(&mut self, kind: TokenKind) -> PResult<()> {
        if self.cur_kind() == Some(&kind) {
            self.bump();
            Ok(())
        } else {
            Err(self.unexpected(Expected::Token(kind)))
        }
    }

    fn expect_keyword(&mut self, kw: Keyword) -> PResult<()> {
        self.expect(TokenKind::Keyword(kw))
    }

    /// punctuation
    fn expect_delim(&mut self, delim: Delim) -> PResult<()> {
        self.expect(TokenKind::Symbol(delim))
    }

    fn expect_op(&mut self, text: &str) -> PResult<()> {
        self.expect(TokenKind::op(text))
    }

    fn expect_ident(&mut self) -> PResult<Symbol> {
        match self.cur_kind() {
            Some(TokenKind::Ident(sym)) => {
                let sym = sym.clone();
                self.bump();
                Ok(sym)
            }
            _ => Err(self.unexpected(Expected::Class(TokenClass::Ident))),
        }
    }

    /// `TypeKw → "point" | "distance" | "name" | "flag"`
    fn expect_type_keyword(&mut self) -> PResult<Keyword> {
        match self.cur_kind().and_then(TokenKind::type_keyword) {
            Some(kw) => {
                self.bump();
                Ok(kw)
            }
            None => Err(self.unexpected(Expected::Construct(Construct::TypeKeyword))),
        }
    }

    /// Builds the error for the current position.
    fn unexpected(&self, expected: Expected) -> SyntaxError {
        SyntaxError::new(
            expected,
            self.cur().cloned(),
            self.token_cursor.position(),
            self.token_cursor.eof_offset(),
        )
    }
}
