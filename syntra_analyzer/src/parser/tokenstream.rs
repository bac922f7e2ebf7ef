use crate::lexer::Token;

/// Forward-only cursor over a finished token sequence.
///
/// # Position semantics
/// - `pos` is a boundary index in `[0, tokens.len()]`.
/// - `pos == tokens.len()` is end of input: [`TokenCursor::current`] returns `None`.
/// - The cursor only moves forward, one token per [`TokenCursor::advance`]; lookahead is the
///   bounded [`TokenCursor::peek`].
#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenCursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenCursor { tokens, pos: 0 }
    }

    /// The token at the cursor, or `None` at end of input.
    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// The token `n` positions past the cursor without moving. `peek(0)` is `current()`.
    pub fn peek(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n)
    }

    /// Moves past the current token. Does nothing at end of input.
    pub fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Byte offset just after the last token; where end-of-input diagnostics point.
    pub fn eof_offset(&self) -> u32 {
        self.tokens.last().map_or(0, |tok| tok.span.end)
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}
