use crate::pipeline::Pass;
use crate::rules::Skipped;
use crate::scanner::{Plan, Reason};
use serde::Serialize;

/// One removed span. Line numbers are 1-based.
#[derive(Debug, Clone, Serialize)]
pub struct RemovedSpan {
    pub first_line: usize,
    pub last_line: usize,
    pub reason: Reason,
}

/// A target that was left alone because its span could not be bounded.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedTarget {
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PassReport {
    pub pass: Pass,
    pub lines_before: usize,
    pub lines_after: usize,
    pub removed: Vec<RemovedSpan>,
    pub skipped: Vec<SkippedTarget>,
}

impl PassReport {
    pub fn new<S: AsRef<str>>(
        pass: Pass,
        lines: &[S],
        kept: usize,
        plan: &Plan,
        skipped: &[Skipped],
    ) -> Self {
        let removed = plan
            .exclusions()
            .iter()
            .map(|e| RemovedSpan {
                first_line: e.span.start + 1,
                last_line: e.span.end + 1,
                reason: e.reason.clone(),
            })
            .collect();

        let skipped = skipped
            .iter()
            .map(|s| SkippedTarget {
                line: s.line + 1,
                id: s.id.clone(),
                error: s.error.to_string(),
            })
            .collect();

        Self {
            pass,
            lines_before: lines.len(),
            lines_after: kept,
            removed,
            skipped,
        }
    }

    pub fn lines_removed(&self) -> usize {
        self.lines_before - self.lines_after
    }
}

/// Whole-run summary, printed for humans or dumped as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub bytes_before: usize,
    pub bytes_after: usize,
    pub bytes_removed: usize,
    pub lines_before: usize,
    pub lines_after: usize,
    pub passes: Vec<PassReport>,
}

impl Report {
    pub fn new(original: &str, rewritten: &str, passes: Vec<PassReport>) -> Self {
        Self {
            bytes_before: original.len(),
            bytes_after: rewritten.len(),
            bytes_removed: original.len().saturating_sub(rewritten.len()),
            lines_before: original.lines().count(),
            lines_after: rewritten.lines().count(),
            passes,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.passes.iter().all(|p| p.removed.is_empty())
    }

    pub fn skipped_count(&self) -> usize {
        self.passes.iter().map(|p| p.skipped.len()).sum()
    }

    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Original: {} bytes, {} lines\n",
            self.bytes_before, self.lines_before
        ));
        out.push_str(&format!(
            "New:      {} bytes, {} lines\n",
            self.bytes_after, self.lines_after
        ));
        out.push_str(&format!(
            "Removed:  {} bytes, {} lines\n",
            self.bytes_removed,
            self.lines_before.saturating_sub(self.lines_after)
        ));

        for pass in &self.passes {
            let cards = pass
                .removed
                .iter()
                .filter(|r| matches!(r.reason, Reason::SignatureCard { .. }))
                .count();
            out.push_str(&format!(
                "  [{}] {} span(s), {} line(s)",
                pass.pass,
                pass.removed.len(),
                pass.lines_removed()
            ));
            if cards > 0 {
                out.push_str(&format!(", {} signature card(s)", cards));
            }
            if !pass.skipped.is_empty() {
                out.push_str(&format!(", {} skipped", pass.skipped.len()));
            }
            out.push('\n');
        }
        out
    }
}
