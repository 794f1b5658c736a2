pub mod config;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod rules;
pub mod scanner;

pub use config::{Config, ConfigError};
pub use pipeline::{scrub_signatures, Pass, ScrubOutcome, Scrubber};
pub use scanner::{locate_span, Span, SpanError, SpanLocator};
