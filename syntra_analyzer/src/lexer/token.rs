//! Lexer tokens and spans.
//!
//! [`Span`] uses UTF-8 byte offsets into the original source and is half-open `[start, end)`.
//! Whitespace, newlines and comments never become tokens, and there is no EOF token:
//! end of input is simply "no current token".

use std::fmt;

pub type TokenIdx = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub text: String,
}

impl Symbol {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Half-open byte span into the source string: `[start, end)`.
///
/// `start` and `end` must be valid UTF-8 slice boundaries for that same source string.
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Offsets must fit in `u32`; [`crate::lex`] rejects inputs larger than that up front.
    pub fn new(start: usize, end: usize) -> Self {
        Span {
            start: start as u32,
            end: end as u32,
        }
    }

    /// An empty span at `offset`.
    pub fn empty(offset: u32) -> Self {
        Span {
            start: offset,
            end: offset,
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Slices `source` by this span.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start as usize..self.end as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Half-open range of token indices: `[lo, hi)`.
pub struct TokenRange {
    pub lo: TokenIdx,
    pub hi: TokenIdx,
}

impl TokenRange {
    /// Construct a token range `[lo, hi)`.
    pub fn new(lo: TokenIdx, hi: TokenIdx) -> Self {
        Self { lo, hi }
    }

    pub fn len(&self) -> usize {
        self.hi.saturating_sub(self.lo) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.hi <= self.lo
    }
}

/// Reserved words. The set is closed; an identifier run outside it is an [`TokenKind::Ident`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Use,
    Action,
    Begin,
    Point,
    Distance,
    Name,
    Flag,
    Show,
    Get,
    When,
    Otherwise,
    Loop,
    Repeat,
    Give,
    Space,
    /// Shadowed by the line-comment rule; never produced by the lexer.
    Note,
}

impl Keyword {
    pub fn lookup(text: &str) -> Option<Keyword> {
        use Keyword::*;
        Some(match text {
            "use" => Use,
            "action" => Action,
            "begin" => Begin,
            "point" => Point,
            "distance" => Distance,
            "name" => Name,
            "flag" => Flag,
            "show" => Show,
            "get" => Get,
            "when" => When,
            "otherwise" => Otherwise,
            "loop" => Loop,
            "repeat" => Repeat,
            "give" => Give,
            "space" => Space,
            "note" => Note,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        use Keyword::*;
        match self {
            Use => "use",
            Action => "action",
            Begin => "begin",
            Point => "point",
            Distance => "distance",
            Name => "name",
            Flag => "flag",
            Show => "show",
            Get => "get",
            When => "when",
            Otherwise => "otherwise",
            Loop => "loop",
            Repeat => "repeat",
            Give => "give",
            Space => "space",
            Note => "note",
        }
    }

    /// `point`, `distance`, `name` and `flag` introduce typed variables and parameters.
    pub fn is_type(self) -> bool {
        matches!(
            self,
            Keyword::Point | Keyword::Distance | Keyword::Name | Keyword::Flag
        )
    }
}

/// Single-character structural symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delim {
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `;`
    Semi,
    /// `,`
    Comma,
}

impl Delim {
    pub fn from_char(c: char) -> Option<Delim> {
        Some(match c {
            '{' => Delim::OpenBrace,
            '}' => Delim::CloseBrace,
            '(' => Delim::OpenParen,
            ')' => Delim::CloseParen,
            ';' => Delim::Semi,
            ',' => Delim::Comma,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Delim::OpenBrace => "{",
            Delim::CloseBrace => "}",
            Delim::OpenParen => "(",
            Delim::CloseParen => ")",
            Delim::Semi => ";",
            Delim::Comma => ",",
        }
    }
}

/// Numeric literal value. Fractional iff the lexeme contained a `.`.
///
/// Integers have no upper bound: a literal that does not fit in an `i64` keeps its digits.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Int(i64),
    BigInt(Symbol),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            Number::BigInt(digits) => f.write_str(digits.as_str()),
            Number::Float(x) => write!(f, "{x:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Reserved word.
    Keyword(Keyword),
    /// Identifier token.
    Ident(Symbol),
    /// Numeric literal, converted at lex time.
    Number(Number),
    /// String literal. `Symbol` excludes the surrounding quotes.
    String(Symbol),
    /// A maximal run of `+ - * / = < > !`, kept verbatim (`=`, `<=`, but also `=-`).
    Operator(Symbol),
    /// One of `{ } ( ) ; ,`.
    Symbol(Delim),
}

/// Token kind without its payload, as named in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Keyword,
    Ident,
    Number,
    String,
    Operator,
    Symbol,
}

impl TokenClass {
    /// Upper-case tag used in token dumps.
    pub fn tag(self) -> &'static str {
        match self {
            TokenClass::Keyword => "KEYWORD",
            TokenClass::Ident => "IDENT",
            TokenClass::Number => "NUMBER",
            TokenClass::String => "STRING",
            TokenClass::Operator => "OPERATOR",
            TokenClass::Symbol => "SYMBOL",
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            TokenClass::Keyword => "keyword",
            TokenClass::Ident => "identifier",
            TokenClass::Number => "number",
            TokenClass::String => "string literal",
            TokenClass::Operator => "operator",
            TokenClass::Symbol => "symbol",
        }
    }
}

impl TokenKind {
    pub fn class(&self) -> TokenClass {
        match self {
            TokenKind::Keyword(_) => TokenClass::Keyword,
            TokenKind::Ident(_) => TokenClass::Ident,
            TokenKind::Number(_) => TokenClass::Number,
            TokenKind::String(_) => TokenClass::String,
            TokenKind::Operator(_) => TokenClass::Operator,
            TokenKind::Symbol(_) => TokenClass::Symbol,
        }
    }

    pub fn op(text: &str) -> TokenKind {
        TokenKind::Operator(Symbol::new(text))
    }

    pub fn is_keyword(&self, kw: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == kw)
    }

    pub fn is_delim(&self, delim: Delim) -> bool {
        matches!(self, TokenKind::Symbol(d) if *d == delim)
    }

    pub fn is_op(&self, text: &str) -> bool {
        matches!(self, TokenKind::Operator(op) if op.text == text)
    }

    pub fn type_keyword(&self) -> Option<Keyword> {
        match self {
            TokenKind::Keyword(kw) if kw.is_type() => Some(*kw),
            _ => None,
        }
    }

    /// The token's value as printed in token dumps: keywords, operators and symbols print their
    /// text, strings print without quotes.
    pub fn value(&self) -> String {
        match self {
            TokenKind::Keyword(kw) => kw.as_str().to_string(),
            TokenKind::Ident(sym) | TokenKind::String(sym) | TokenKind::Operator(sym) => {
                sym.text.clone()
            }
            TokenKind::Number(n) => n.to_string(),
            TokenKind::Symbol(d) => d.as_str().to_string(),
        }
    }
}

impl fmt::Display for TokenKind {
    /// Renders the token the way it would be written in source.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::String(sym) => write!(f, "\"{}\"", sym.text),
            other => f.write_str(&other.value()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A token with its source span.
///
/// `span` is a byte offset range into the original source (`[start, end)`).
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn can_begin_expr(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Ident(..)
                | TokenKind::Number(..)
                | TokenKind::String(..)
                | TokenKind::Symbol(Delim::OpenParen)
        )
    }
}
