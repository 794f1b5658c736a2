use super::lines::{delimiter_counts, is_comment};
use super::types::{Span, SpanError, Syntax, DEFAULT_LOOKBEHIND};

/// Bounds the brace-delimited object enclosing a target line.
#[derive(Debug, Clone)]
pub struct SpanLocator {
    syntax: Syntax,
    lookbehind: usize,
}

impl Default for SpanLocator {
    fn default() -> Self {
        Self::new(Syntax::default(), DEFAULT_LOOKBEHIND)
    }
}

impl SpanLocator {
    pub fn new(syntax: Syntax, lookbehind: usize) -> Self {
        Self { syntax, lookbehind }
    }

    pub fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    /// Find the inclusive span of the object around `target`.
    pub fn locate<S: AsRef<str>>(&self, lines: &[S], target: usize) -> Result<Span, SpanError> {
        if target >= lines.len() {
            return Err(SpanError::TargetOutOfRange {
                line: target,
                len: lines.len(),
            });
        }

        let start = self.find_opening(lines, target)?;
        self.find_closing(lines, start)
    }

    /// Walk back from `target` to the nearest line whose opening delimiter is
    /// still unmatched when the scan reaches `target`.
    fn find_opening<S: AsRef<str>>(&self, lines: &[S], target: usize) -> Result<usize, SpanError> {
        let floor = target.saturating_sub(self.lookbehind);
        let mut net: i64 = 0;

        for j in (floor..=target).rev() {
            let line = lines[j].as_ref();
            if is_comment(line, &self.syntax) {
                continue;
            }

            let (opens, closes) = delimiter_counts(line, &self.syntax);
            if j == target {
                if opens > closes || line.trim_start().starts_with(self.syntax.open) {
                    return Ok(j);
                }
                // An inline object closed on the target line does not enclose it
                if opens > 0 {
                    net += opens as i64 - closes as i64;
                }
                continue;
            }

            net += opens as i64 - closes as i64;
            if opens > 0 && net > 0 {
                return Ok(j);
            }
        }

        Err(SpanError::NoOpeningFound { line: target })
    }

    /// Scan forward from `start` until the running balance returns to zero on
    /// a line that closes something.
    fn find_closing<S: AsRef<str>>(&self, lines: &[S], start: usize) -> Result<Span, SpanError> {
        let mut balance: i64 = 0;

        for (j, line) in lines.iter().enumerate().skip(start) {
            let (opens, closes) = delimiter_counts(line.as_ref(), &self.syntax);
            balance += opens as i64 - closes as i64;

            if balance < 0 {
                return Err(SpanError::UnbalancedSpan { line: j });
            }
            if balance == 0 && closes > 0 {
                return Ok(Span::new(start, j));
            }
        }

        Err(SpanError::UnbalancedSpan {
            line: lines.len() - 1,
        })
    }
}

/// Locate with the default braces, comment markers and lookbehind.
pub fn locate_span<S: AsRef<str>>(lines: &[S], target: usize) -> Result<Span, SpanError> {
    SpanLocator::default().locate(lines, target)
}
