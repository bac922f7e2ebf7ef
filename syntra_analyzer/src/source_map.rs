/// Byte offset → line/column lookup over one source text.
///
/// The lexer tracks no lines; diagnostics resolve positions through this map on demand.
pub struct SourceMap<'a> {
    src: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> SourceMap<'a> {
    pub fn new(src: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(src.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { src, line_starts }
    }

    /// Returns (line, col), both 1-based. Columns count bytes.
    pub fn line_col(&self, byte: u32) -> (usize, usize) {
        let b = (byte as usize).min(self.src.len());
        let line_idx = self.line_index(b);
        (line_idx + 1, b - self.line_starts[line_idx] + 1)
    }

    /// Text of the 1-based `line`, without its line terminator.
    pub fn line_text(&self, line: usize) -> &'a str {
        let Some(&start) = self.line_starts.get(line.wrapping_sub(1)) else {
            return "";
        };
        let end = self
            .line_starts
            .get(line)
            .map_or(self.src.len(), |&next| next - 1);
        self.src[start..end].trim_end_matches('\r')
    }

    fn line_index(&self, byte: usize) -> usize {
        match self.line_starts.binary_search(&byte) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        }
    }
}
