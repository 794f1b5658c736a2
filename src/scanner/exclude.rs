use super::types::Span;
use serde::Serialize;

/// Why a span is being cut out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reason {
    SignatureCard { id: String },
    SignatureReference,
    OrphanBrace,
    OrphanComment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusion {
    pub span: Span,
    pub reason: Reason,
}

impl Exclusion {
    pub fn new(span: Span, reason: Reason) -> Self {
        Self { span, reason }
    }
}

/// Sort spans and coalesce the ones that overlap or sit next to each other.
pub fn merge(spans: &[Span]) -> Vec<Span> {
    let mut sorted = spans.to_vec();
    sorted.sort();

    let mut merged: Vec<Span> = Vec::with_capacity(sorted.len());
    for span in sorted {
        match merged.last_mut() {
            Some(last) if last.touches(&span) => {
                last.end = last.end.max(span.end);
            }
            _ => merged.push(span),
        }
    }
    merged
}

/// Keep every line not covered by `spans`, in order.
///
/// `spans` must already be merged.
pub fn retain_outside<'a, S: AsRef<str>>(lines: &'a [S], spans: &[Span]) -> Vec<&'a str> {
    let mut out = Vec::with_capacity(lines.len());
    let mut next = spans.iter().peekable();

    for (i, line) in lines.iter().enumerate() {
        while next.peek().map_or(false, |s| s.end < i) {
            next.next();
        }
        if next.peek().map_or(false, |s| s.contains(i)) {
            continue;
        }
        out.push(line.as_ref());
    }
    out
}

/// All exclusions computed for one pass, resolved against the input once.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    exclusions: Vec<Exclusion>,
    merged: Vec<Span>,
}

impl Plan {
    pub fn new(mut exclusions: Vec<Exclusion>) -> Self {
        exclusions.sort_by_key(|e| e.span);
        let spans: Vec<Span> = exclusions.iter().map(|e| e.span).collect();
        let merged = merge(&spans);
        Self { exclusions, merged }
    }

    pub fn exclusions(&self) -> &[Exclusion] {
        &self.exclusions
    }

    pub fn is_empty(&self) -> bool {
        self.exclusions.is_empty()
    }

    pub fn covers(&self, line: usize) -> bool {
        self.merged.iter().any(|s| s.contains(line))
    }

    pub fn removed_lines(&self) -> usize {
        self.merged.iter().map(Span::len).sum()
    }

    pub fn apply<'a, S: AsRef<str>>(&self, lines: &'a [S]) -> Vec<&'a str> {
        retain_outside(lines, &self.merged)
    }
}
