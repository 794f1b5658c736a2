use std::fmt;

/// Default number of lines searched backwards for an opening delimiter.
pub const DEFAULT_LOOKBEHIND: usize = 10;

/// Inclusive range of 0-based line indices covered by one balanced block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn single(line: usize) -> Self {
        Self::new(line, line)
    }

    pub fn contains(&self, line: usize) -> bool {
        self.start <= line && line <= self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Overlapping or directly adjacent spans can be coalesced.
    pub fn touches(&self, other: &Span) -> bool {
        self.start <= other.end.saturating_add(1) && other.start <= self.end.saturating_add(1)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-based, the way editors show it
        write!(f, "{}-{}", self.start + 1, self.end + 1)
    }
}

/// Why the locator could not bound a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanError {
    /// No unmatched opening delimiter inside the backward window of `line`.
    NoOpeningFound { line: usize },
    /// The running balance broke at `line` (went negative, or input ended).
    UnbalancedSpan { line: usize },
    TargetOutOfRange { line: usize, len: usize },
}

impl SpanError {
    pub fn line(&self) -> usize {
        match *self {
            SpanError::NoOpeningFound { line }
            | SpanError::UnbalancedSpan { line }
            | SpanError::TargetOutOfRange { line, .. } => line,
        }
    }
}

impl fmt::Display for SpanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanError::NoOpeningFound { line } => {
                write!(f, "no enclosing span found for line {}", line + 1)
            }
            SpanError::UnbalancedSpan { line } => {
                write!(f, "unbalanced delimiters, span broke at line {}", line + 1)
            }
            SpanError::TargetOutOfRange { line, len } => {
                write!(f, "line {} is past the end of input ({} lines)", line + 1, len)
            }
        }
    }
}

impl std::error::Error for SpanError {}

/// Delimiters and comment markers of the edited file.
#[derive(Debug, Clone)]
pub struct Syntax {
    pub open: char,
    pub close: char,
    pub comment_markers: Vec<String>,
}

impl Default for Syntax {
    fn default() -> Self {
        Self {
            open: '{',
            close: '}',
            comment_markers: vec!["//".to_string(), "/*".to_string(), "*".to_string()],
        }
    }
}
