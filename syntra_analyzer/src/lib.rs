//! Syntax recognizer for the Syntra teaching language.
//!
//! Pipeline: lex → parse → accept/reject.
//! All spans are UTF-8 byte offsets into the original source, using `[start, end)`.
//! Both stages stop at the first error and return it; nothing here prints or exits.
mod diagnostics;
mod error;
mod lexer;
mod parser;
mod source_map;
mod tests;

/// Parses a finished token sequence as one `Program`.
///
/// On accept, the tokens are handed back together with the recognized-rule events.
pub fn parse(tokens: Vec<Token>) -> Result<ParseOutput, SyntaxError> {
    let mut parser = Parser::new(TokenCursor::new(tokens));
    parser.parse()?;
    Ok(parser.finish())
}

/// Lexes and parses `text`. A lexical error aborts before any parsing starts.
pub fn check(text: &str) -> Result<ParseOutput, Error> {
    let tokens = lex(text)?;
    Ok(parse(tokens)?)
}

pub use diagnostics::{Diagnostic, DiagnosticKind, format_diagnostics, render_diagnostics};
pub use error::{Construct, Error, Expected, LexError, SyntaxError, SyntaxErrorKind};
pub use lexer::lex;
pub use lexer::{Delim, Keyword, Number, Span, Symbol, Token, TokenClass, TokenKind};
pub use lexer::{TokenIdx, TokenRange};
pub use parser::{MAX_NESTING, PResult, ParseEvent, ParseOutput, Parser, Rule, TokenCursor};
pub use source_map::SourceMap;
