use std::sync::Once;

use tracing_subscriber::EnvFilter;

use crate::error::Error;
use crate::lexer::{Delim, Keyword, Number, Symbol, Token, TokenKind};
use crate::parser::{ParseOutput, Rule};
use crate::{Diagnostic, SyntaxError, check, format_diagnostics, lex};

pub fn trim_indent(s: &str) -> String {
    let lines: Vec<&str> = s.lines().collect();
    let min_indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        // Skip the first line (which is the empty line)
        .skip(1)
        .map(|l| {
            if l.len() >= min_indent {
                &l[min_indent..]
            } else {
                *l
            }
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

#[test]
fn test_trim_indent() {
    let s = r#"
        action main() {
            show 1;
        }"#;
    let expected = "action main() {\n    show 1;\n}";
    assert_eq!(expected, trim_indent(s));
}

/// Routes lexer/parser tracing to the test output; filter with `RUST_LOG`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn tokens(input: &str) -> Vec<Token> {
    lex(input).unwrap_or_else(|err| panic!("lex failed for {input:?}: {err}"))
}

pub fn kinds(input: &str) -> Vec<TokenKind> {
    tokens(input).into_iter().map(|t| t.kind).collect()
}

pub fn ident(name: &str) -> TokenKind {
    TokenKind::Ident(Symbol::new(name))
}

pub fn kw(keyword: Keyword) -> TokenKind {
    TokenKind::Keyword(keyword)
}

pub fn int(n: i64) -> TokenKind {
    TokenKind::Number(Number::Int(n))
}

pub fn float(x: f64) -> TokenKind {
    TokenKind::Number(Number::Float(x))
}

pub fn string_lit(text: &str) -> TokenKind {
    TokenKind::String(Symbol::new(text))
}

pub fn op(text: &str) -> TokenKind {
    TokenKind::op(text)
}

pub fn sym(delim: Delim) -> TokenKind {
    TokenKind::Symbol(delim)
}

/// Checks `input`, panicking with the rendered diagnostic if it is rejected.
pub fn accept(input: &str) -> ParseOutput {
    init_tracing();
    check(input).unwrap_or_else(|err| {
        panic!(
            "expected {input:?} to be accepted, got:\n{}",
            format_diagnostics(input, vec![Diagnostic::from(&err)])
        )
    })
}

/// Checks `input`, which must lex cleanly and then fail to parse.
pub fn reject(input: &str) -> SyntaxError {
    init_tracing();
    match check(input) {
        Err(Error::Syntax(err)) => err,
        Err(Error::Lex(err)) => panic!("expected a syntax error for {input:?}, got {err}"),
        Ok(_) => panic!("expected {input:?} to be rejected"),
    }
}

/// Rules recognized while accepting `input`, in completion order.
pub fn rules(input: &str) -> Vec<Rule> {
    accept(input).events.iter().map(|e| e.rule).collect()
}

/// Wraps statements in a parameterless action so they form a complete program.
pub fn in_action(body: &str) -> String {
    format!("action main() {{ {body} }}")
}

macro_rules! assert_rejects {
    ($src:expr, $expected:expr, $index:expr) => {{
        let err = $crate::tests::common::reject($src);
        assert_eq!(err.expected, $expected, "wrong expectation for {:?}: {err}", $src);
        assert_eq!(err.index, $index, "wrong token index for {:?}: {err}", $src);
        err
    }};
}

pub(crate) use assert_rejects;
