use super::{RuleOutcome, Skipped};
use crate::scanner::{quoted_property, Exclusion, Reason, Span, SpanLocator};

pub const DEFAULT_MARKER: &str = "-sig-";

const CARD_ID_KEY: &str = "id";
const REFERENCE_KEY: &str = "signatureCardId";

/// Finds signature cards and the hero properties that point at them.
#[derive(Debug, Clone)]
pub struct SignatureRule {
    marker: String,
}

impl Default for SignatureRule {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

impl SignatureRule {
    pub fn new(marker: &str) -> Self {
        Self {
            marker: marker.to_string(),
        }
    }

    /// `signatureCardId: '...-sig-...'`
    pub fn reference_on<'a>(&self, line: &'a str) -> Option<&'a str> {
        quoted_property(line, REFERENCE_KEY).filter(|v| v.contains(&self.marker))
    }

    /// `id: '...-sig-...'`
    pub fn card_id_on<'a>(&self, line: &'a str) -> Option<&'a str> {
        quoted_property(line, CARD_ID_KEY).filter(|v| v.contains(&self.marker))
    }

    pub fn plan<S: AsRef<str>>(&self, lines: &[S], locator: &SpanLocator) -> RuleOutcome {
        let mut outcome = RuleOutcome::default();
        let mut covered_until: Option<usize> = None;

        for (i, line) in lines.iter().enumerate() {
            if covered_until.map_or(false, |end| i <= end) {
                continue;
            }
            let line = line.as_ref();

            if self.reference_on(line).is_some() {
                outcome
                    .exclusions
                    .push(Exclusion::new(Span::single(i), Reason::SignatureReference));
                continue;
            }

            let Some(id) = self.card_id_on(line) else {
                continue;
            };

            match locator.locate(lines, i) {
                Ok(span) => {
                    covered_until = Some(span.end);
                    outcome.exclusions.push(Exclusion::new(
                        span,
                        Reason::SignatureCard { id: id.to_string() },
                    ));
                }
                Err(error) => outcome.skipped.push(Skipped {
                    line: i,
                    id: Some(id.to_string()),
                    error,
                }),
            }
        }

        outcome
    }
}
