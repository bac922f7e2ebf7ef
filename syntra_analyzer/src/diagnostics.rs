use crate::error::{Error, LexError, SyntaxError};
use crate::lexer::Span;
use crate::source_map::SourceMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Lexical,
    Syntax,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::Lexical => "lexical",
            DiagnosticKind::Syntax => "syntax",
        }
    }
}

/// A renderable error: message, source span, and trailing notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub span: Span,
    pub notes: Vec<String>,
}

impl From<&LexError> for Diagnostic {
    fn from(err: &LexError) -> Self {
        let message = match err {
            LexError::UnexpectedChar { ch, .. } => format!("unexpected character {ch:?}"),
            LexError::InputTooLarge { len } => format!("input of {len} bytes is too large to lex"),
        };
        Diagnostic {
            kind: DiagnosticKind::Lexical,
            message,
            span: err.span(),
            notes: vec![],
        }
    }
}

impl From<&SyntaxError> for Diagnostic {
    fn from(err: &SyntaxError) -> Self {
        let found = match &err.found {
            Some(tok) => format!("`{}`", tok.kind),
            None => "end of input".to_string(),
        };
        Diagnostic {
            kind: DiagnosticKind::Syntax,
            message: format!("expected {}, found {found}", err.expected),
            span: err.span,
            notes: vec![format!("at token {}", err.index)],
        }
    }
}

impl From<&Error> for Diagnostic {
    fn from(err: &Error) -> Self {
        match err {
            Error::Lex(err) => err.into(),
            Error::Syntax(err) => err.into(),
        }
    }
}

/// Renders diagnostics against `source`, labelled `<input>`.
pub fn format_diagnostics(source: &str, diags: Vec<Diagnostic>) -> String {
    render_diagnostics("<input>", source, diags)
}

/// Renders diagnostics against `source`, labelled with `name` (usually a file path).
///
/// The column after the name counts bytes, like the `[start..end]` offsets; the caret line is
/// laid out in characters so it stays under the span when the line has non-ASCII text.
///
/// ```text
/// error[syntax]: expected `)`, found `{`
///   --> <input>:1:11 [10..11]
///   | action f( { }
///   |           ^
///   note: at token 3
/// ```
pub fn render_diagnostics(name: &str, source: &str, mut diags: Vec<Diagnostic>) -> String {
    use std::fmt::Write;

    diags.sort_by(|a, b| {
        (a.span.start, a.span.end, &a.message).cmp(&(b.span.start, b.span.end, &b.message))
    });
    let sm = SourceMap::new(source);

    let mut out = String::new();

    for d in diags {
        let (line, col) = sm.line_col(d.span.start);
        let _ = writeln!(&mut out, "error[{}]: {}", d.kind.as_str(), d.message);
        let _ = writeln!(
            &mut out,
            "  --> {}:{}:{} [{}..{}]",
            name, line, col, d.span.start, d.span.end
        );

        let text = sm.line_text(line);
        let (indent, width) = caret_layout(text, col - 1, d.span.len());
        let _ = writeln!(&mut out, "  | {text}");
        let _ = writeln!(&mut out, "  | {}{}", " ".repeat(indent), "^".repeat(width));

        for note in d.notes {
            let _ = writeln!(&mut out, "  note: {}", note);
        }
    }
    out
}

/// Caret indent and width in characters for a span starting `start` bytes into `line` and
/// `len` bytes long, clipped to the line. At least one caret is drawn.
fn caret_layout(line: &str, start: usize, len: usize) -> (usize, usize) {
    let start = start.min(line.len());
    let end = (start + len).min(line.len());
    let count = |s: Option<&str>| s.map_or(0, |s| s.chars().count());
    let indent = count(line.get(..start));
    let width = count(line.get(start..end)).max(1);
    (indent, width)
}
