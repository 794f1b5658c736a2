mod orphans;
mod signature;

use crate::scanner::{Exclusion, SpanError};

pub use orphans::{plan as plan_orphans, CleanupMode, CARD_PROPERTIES};
pub use signature::{SignatureRule, DEFAULT_MARKER};

/// A target line the locator could not bound; it is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub line: usize,
    pub id: Option<String>,
    pub error: SpanError,
}

/// What one rule wants removed, plus what it had to give up on.
#[derive(Debug, Clone, Default)]
pub struct RuleOutcome {
    pub exclusions: Vec<Exclusion>,
    pub skipped: Vec<Skipped>,
}
