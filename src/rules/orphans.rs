use super::RuleOutcome;
use crate::scanner::{
    comment_mentions, is_bare_close, is_bare_open, is_comment, starts_with_property, Exclusion,
    Reason, Span, Syntax,
};

/// Properties that legitimately open a card object.
pub const CARD_PROPERTIES: [&str; 4] = ["id", "name", "description", "cardType"];

const SIGNATURE_WORD: &str = "signature";

/// How hard to look for braces and comments left behind by earlier edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupMode {
    Conservative,
    Aggressive,
}

fn brace(i: usize) -> Exclusion {
    Exclusion::new(Span::single(i), Reason::OrphanBrace)
}

fn comment(i: usize) -> Exclusion {
    Exclusion::new(Span::single(i), Reason::OrphanComment)
}

/// Signature comment, then a bare `{`, then something that is not an `id:`.
fn dangling_signature_header<S: AsRef<str>>(lines: &[S], i: usize, syntax: &Syntax) -> bool {
    i + 2 < lines.len()
        && comment_mentions(lines[i].as_ref(), SIGNATURE_WORD, syntax)
        && is_bare_open(lines[i + 1].as_ref(), syntax)
        && !starts_with_property(lines[i + 2].as_ref(), "id")
}

pub fn plan<S: AsRef<str>>(lines: &[S], mode: CleanupMode, syntax: &Syntax) -> RuleOutcome {
    match mode {
        CleanupMode::Conservative => plan_conservative(lines, syntax),
        CleanupMode::Aggressive => plan_aggressive(lines, syntax),
    }
}

fn plan_conservative<S: AsRef<str>>(lines: &[S], syntax: &Syntax) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();
    let mut i = 0usize;

    while i < lines.len() {
        let line = lines[i].as_ref();

        // Doubled brace: the first one lost its object
        if is_bare_open(line, syntax)
            && lines
                .get(i + 1)
                .map_or(false, |next| is_bare_open(next.as_ref(), syntax))
        {
            outcome.exclusions.push(brace(i));
            i += 1;
            continue;
        }

        if dangling_signature_header(lines, i, syntax) {
            outcome.exclusions.push(comment(i));
            outcome.exclusions.push(brace(i + 1));
            i += 2;
            continue;
        }

        i += 1;
    }

    outcome
}

fn plan_aggressive<S: AsRef<str>>(lines: &[S], syntax: &Syntax) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();
    let mut i = 0usize;

    while i < lines.len() {
        let line = lines[i].as_ref();

        if is_bare_open(line, syntax) && i + 1 < lines.len() {
            let next = lines[i + 1].as_ref().trim();
            let suspicious = is_comment(next, syntax)
                || is_bare_open(next, syntax)
                || (!next.is_empty()
                    && !is_bare_close(next, syntax)
                    && !CARD_PROPERTIES
                        .iter()
                        .any(|key| starts_with_property(next, key)));

            if suspicious {
                let array_start = i > 0 && lines[i - 1].as_ref().trim_end().ends_with('[');
                let live_object = lines
                    .get(i + 2)
                    .map_or(false, |l| starts_with_property(l.as_ref(), "id"));

                if !array_start && !live_object {
                    outcome.exclusions.push(brace(i));
                }
                i += 1;
                continue;
            }
        }

        // The brace below is judged on its own when we get to it
        if dangling_signature_header(lines, i, syntax) {
            outcome.exclusions.push(comment(i));
            i += 1;
            continue;
        }

        if i + 2 < lines.len()
            && is_comment(line, syntax)
            && is_bare_open(lines[i + 1].as_ref(), syntax)
        {
            let after = lines[i + 2].as_ref();
            if !starts_with_property(after, "id") && !is_bare_close(after, syntax) {
                outcome.exclusions.push(comment(i));
                outcome.exclusions.push(brace(i + 1));
                i += 2;
                continue;
            }
        }

        i += 1;
    }

    outcome
}
