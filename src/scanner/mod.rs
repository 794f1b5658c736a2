mod exclude;
mod lines;
mod span;
mod types;

pub use exclude::{merge, retain_outside, Exclusion, Plan, Reason};
pub use lines::{
    comment_mentions, delimiter_counts, delimiter_delta, is_bare_close, is_bare_open, is_comment,
    quoted_property, starts_with_property,
};
pub use span::{locate_span, SpanLocator};
pub use types::{Span, SpanError, Syntax, DEFAULT_LOOKBEHIND};
