use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Progress output on stderr, mirrored into an append-only log file when one
/// is configured. Failures to write the log file are ignored.
pub struct Logger {
    file: Option<File>,
    quiet: bool,
}

impl Logger {
    pub fn new(log_file: Option<&Path>, quiet: bool) -> Self {
        let file = log_file.and_then(|path| {
            fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });

        let mut logger = Self { file, quiet };
        logger.file_only(&format!("=== CARD-SCRUB STARTED at {} ===", timestamp()));
        logger
    }

    /// Swallow everything; handy for library callers and tests.
    pub fn silent() -> Self {
        Self {
            file: None,
            quiet: true,
        }
    }

    pub fn info(&mut self, msg: &str) {
        if !self.quiet {
            eprintln!("{}", msg);
        }
        self.file_only(msg);
    }

    pub fn warn(&mut self, msg: &str) {
        if !self.quiet {
            eprintln!("⚠️  {}", msg);
        }
        self.file_only(&format!("WARN {}", msg));
    }

    pub fn file_only(&mut self, msg: &str) {
        if let Some(ref mut f) = self.file {
            writeln!(f, "[{}] {}", timestamp(), msg).ok();
            f.flush().ok();
        }
    }
}

fn timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
