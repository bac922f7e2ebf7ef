use tracing::debug;

use crate::error::LexError;

mod token;

pub use token::{
    Delim, Keyword, Number, Span, Symbol, Token, TokenClass, TokenIdx, TokenKind, TokenRange,
};

/// Marker that starts a line comment.
const COMMENT_MARKER: &str = "note";

/// Lex the input into tokens.
///
/// At each offset the first matching rule wins, in this order: line comment (`note` up to the
/// end of the line), string, number, keyword, identifier, operator run, symbol, newline,
/// whitespace. Anything else is a [`LexError`] and no tokens are returned.
///
/// - Numbers: ASCII digits with an optional `.digits` fraction.
/// - Strings: double-quoted, single-line, no escapes.
/// - Identifiers: ASCII letters/digits/`_`, not starting with a digit.
///
/// Spans are `u32` byte offsets, so inputs of 4 GiB or more are rejected before scanning.
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    ensure_addressable(input.len())?;

    let mut tokens = Vec::new();
    let mut iter = input.char_indices().peekable();

    while let Some((start, ch)) = iter.next() {
        // Comments take priority over every other rule, including identifiers.
        if ch == 'n' && input[start..].starts_with(COMMENT_MARKER) {
            while let Some(&(_, c2)) = iter.peek() {
                if c2 == '\n' {
                    break;
                }
                iter.next();
            }
            continue;
        }

        let kind = match ch {
            '\n' | ' ' | '\t' | '\r' => continue,

            '"' => {
                // Read string until the closing quote; a newline or end of input means the
                // opening quote matched nothing.
                let rest = &input[start + 1..];
                let Some(len) = rest.find(['"', '\n']).filter(|&i| rest[i..].starts_with('"'))
                else {
                    return Err(LexError::UnexpectedChar { ch, offset: start });
                };
                let end = start + 1 + len + 1;
                while iter.peek().is_some_and(|&(i, _)| i < end) {
                    iter.next();
                }

                tokens.push(Token {
                    kind: TokenKind::String(Symbol::new(&input[start + 1..end - 1])),
                    span: Span::new(start, end),
                });
                continue;
            }

            c if c.is_ascii_digit() => {
                let mut end = start + 1;
                while let Some(&(i, c2)) = iter.peek() {
                    if c2.is_ascii_digit() {
                        iter.next();
                        end = i + 1;
                    } else {
                        break;
                    }
                }

                // `digits.digits` is preferred over `digits`; a bare trailing `.` stays behind.
                let mut fractional = false;
                let bytes = input.as_bytes();
                if bytes.get(end) == Some(&b'.') && bytes.get(end + 1).is_some_and(u8::is_ascii_digit)
                {
                    fractional = true;
                    iter.next();
                    while let Some(&(i, c2)) = iter.peek() {
                        if c2.is_ascii_digit() {
                            iter.next();
                            end = i + 1;
                        } else {
                            break;
                        }
                    }
                }

                let text = &input[start..end];
                tokens.push(Token {
                    kind: TokenKind::Number(convert_number(text, fractional)),
                    span: Span::new(start, end),
                });
                continue;
            }

            c if is_ident_start(c) => {
                let mut end = start + 1;
                while let Some(&(i, c2)) = iter.peek() {
                    if is_ident_continue(c2) {
                        iter.next();
                        end = i + 1;
                    } else {
                        break;
                    }
                }

                let text = &input[start..end];
                let kind = match Keyword::lookup(text) {
                    Some(kw) if at_word_boundary(input, start, end) => TokenKind::Keyword(kw),
                    _ => TokenKind::Ident(Symbol::new(text)),
                };

                tokens.push(Token {
                    kind,
                    span: Span::new(start, end),
                });
                continue;
            }

            c if is_operator_char(c) => {
                let mut end = start + 1;
                while let Some(&(i, c2)) = iter.peek() {
                    if is_operator_char(c2) {
                        iter.next();
                        end = i + 1;
                    } else {
                        break;
                    }
                }

                tokens.push(Token {
                    kind: TokenKind::op(&input[start..end]),
                    span: Span::new(start, end),
                });
                continue;
            }

            c => match Delim::from_char(c) {
                Some(delim) => TokenKind::Symbol(delim),
                None => return Err(LexError::UnexpectedChar { ch: c, offset: start }),
            },
        };

        tokens.push(Token {
            kind,
            span: Span::new(start, start + 1),
        });
    }

    debug!(tokens = tokens.len(), bytes = input.len(), "lexed source");
    Ok(tokens)
}

pub(crate) fn ensure_addressable(len: usize) -> Result<(), LexError> {
    if u32::try_from(len).is_ok() {
        Ok(())
    } else {
        Err(LexError::InputTooLarge { len })
    }
}

fn convert_number(text: &str, fractional: bool) -> Number {
    if fractional {
        // `digits.digits` always parses; magnitudes past `f64::MAX` round to infinity.
        Number::Float(text.parse().unwrap_or(f64::INFINITY))
    } else {
        text.parse()
            .map_or_else(|_| Number::BigInt(Symbol::new(text)), Number::Int)
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

fn is_word_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '=' | '<' | '>' | '!')
}

/// A keyword needs a word boundary on both sides: `9use` lexes as `9` followed by the
/// identifier `use`.
fn at_word_boundary(input: &str, start: usize, end: usize) -> bool {
    let before = input[..start].chars().next_back();
    let after = input[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}
