use crate::config::{Config, ConfigError};
use crate::logging::Logger;
use crate::report::{PassReport, Report};
use crate::rules::{plan_orphans, CleanupMode, RuleOutcome, SignatureRule};
use crate::scanner::{Plan, Reason, SpanLocator, Syntax};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One clean-up pass over the whole file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pass {
    Signatures,
    Orphans,
    Aggressive,
}

impl Pass {
    pub fn name(&self) -> &'static str {
        match self {
            Pass::Signatures => "signatures",
            Pass::Orphans => "orphans",
            Pass::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pass {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "signatures" | "signature" | "sig" => Ok(Pass::Signatures),
            "orphans" | "orphan" => Ok(Pass::Orphans),
            "aggressive" => Ok(Pass::Aggressive),
            other => Err(ConfigError::UnknownPass(other.to_string())),
        }
    }
}

/// Result of running every pass: the rewritten text and what happened.
#[derive(Debug)]
pub struct ScrubOutcome {
    pub text: String,
    pub report: Report,
}

/// Runs the configured passes in order, each one over the previous output.
#[derive(Debug, Clone)]
pub struct Scrubber {
    passes: Vec<Pass>,
    signatures: SignatureRule,
    locator: SpanLocator,
}

impl Default for Scrubber {
    fn default() -> Self {
        Self {
            passes: vec![Pass::Signatures],
            signatures: SignatureRule::default(),
            locator: SpanLocator::default(),
        }
    }
}

impl Scrubber {
    pub fn new(passes: Vec<Pass>, signatures: SignatureRule, locator: SpanLocator) -> Self {
        Self {
            passes,
            signatures,
            locator,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.passes.clone(),
            SignatureRule::new(&config.marker),
            SpanLocator::new(Syntax::default(), config.lookbehind),
        )
    }

    /// Compute what `pass` would remove from `lines`, without touching them.
    pub fn plan<S: AsRef<str>>(&self, pass: Pass, lines: &[S]) -> RuleOutcome {
        let syntax = self.locator.syntax();
        match pass {
            Pass::Signatures => self.signatures.plan(lines, &self.locator),
            Pass::Orphans => plan_orphans(lines, CleanupMode::Conservative, syntax),
            Pass::Aggressive => plan_orphans(lines, CleanupMode::Aggressive, syntax),
        }
    }

    pub fn run(&self, content: &str, log: &mut Logger) -> ScrubOutcome {
        let mut text = content.to_string();
        let mut passes = Vec::with_capacity(self.passes.len());

        for &pass in &self.passes {
            log.info(&format!("🧹 Pass '{}'", pass));

            let lines: Vec<&str> = text.split('\n').collect();
            let outcome = self.plan(pass, &lines);

            for exclusion in &outcome.exclusions {
                let first = lines[exclusion.span.start].trim();
                let msg = match &exclusion.reason {
                    Reason::SignatureCard { id } => {
                        format!("  Removing signature card '{}' at lines {}", id, exclusion.span)
                    }
                    Reason::SignatureReference => format!(
                        "  Removing signatureCardId at line {}: {}",
                        exclusion.span.start + 1,
                        first
                    ),
                    Reason::OrphanBrace => {
                        format!("  Removing orphaned brace at line {}", exclusion.span.start + 1)
                    }
                    Reason::OrphanComment => format!(
                        "  Removing orphaned comment at line {}: {}",
                        exclusion.span.start + 1,
                        first
                    ),
                };
                log.info(&msg);
            }
            for skipped in &outcome.skipped {
                log.warn(&format!("Skipping line {}: {}", skipped.line + 1, skipped.error));
            }

            let plan = Plan::new(outcome.exclusions);
            let kept = plan.apply(&lines);
            let pass_report = PassReport::new(pass, &lines, kept.len(), &plan, &outcome.skipped);
            let next = kept.join("\n");

            log.info(&format!(
                "  {} line(s) removed, {} target(s) skipped",
                pass_report.lines_removed(),
                outcome.skipped.len()
            ));

            passes.push(pass_report);
            text = next;
        }

        let report = Report::new(content, &text, passes);
        ScrubOutcome { text, report }
    }
}

/// Run the default signature pass with no logging.
pub fn scrub_signatures(content: &str) -> String {
    Scrubber::default().run(content, &mut Logger::silent()).text
}
