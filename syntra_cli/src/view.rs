//! Serializable views of tokens and diagnostics for `--format json`.

use serde::Serialize;
use syntra_analyzer::{Diagnostic, SourceMap, Span, Token};

#[derive(Debug, Serialize)]
pub struct SpanView {
    pub start: u32,
    pub end: u32,
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Serialize)]
pub struct TokenView {
    pub kind: &'static str,
    pub value: String,
    pub span: SpanView,
}

#[derive(Debug, Serialize)]
pub struct DiagnosticView {
    pub kind: &'static str,
    pub message: String,
    pub notes: Vec<String>,
    pub span: SpanView,
}

#[derive(Debug, Serialize)]
pub struct TokensResult {
    pub tokens: Vec<TokenView>,
    pub diagnostics: Vec<DiagnosticView>,
}

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub accepted: bool,
    pub diagnostics: Vec<DiagnosticView>,
}

pub struct ViewCtx<'a> {
    sm: SourceMap<'a>,
}

impl<'a> ViewCtx<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            sm: SourceMap::new(source),
        }
    }

    pub fn span(&self, span: Span) -> SpanView {
        let (line, col) = self.sm.line_col(span.start);
        SpanView {
            start: span.start,
            end: span.end,
            line,
            col,
        }
    }

    pub fn token(&self, token: &Token) -> TokenView {
        TokenView {
            kind: token.kind.class().tag(),
            value: token.kind.value(),
            span: self.span(token.span),
        }
    }

    pub fn diag(&self, diag: &Diagnostic) -> DiagnosticView {
        DiagnosticView {
            kind: diag.kind.as_str(),
            message: diag.message.clone(),
            notes: diag.notes.clone(),
            span: self.span(diag.span),
        }
    }

    pub fn tokens(&self, tokens: &[Token]) -> Vec<TokenView> {
        tokens.iter().map(|t| self.token(t)).collect()
    }
}
