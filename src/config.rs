use crate::pipeline::Pass;
use crate::rules::DEFAULT_MARKER;
use crate::scanner::DEFAULT_LOOKBEHIND;
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT: &str = "src/game/comprehensiveCardData.ts";

/// Extra options, shell-split and placed in front of the real arguments.
pub const OPTS_ENV: &str = "CARD_SCRUB_OPTS";

pub const USAGE: &str = "\
Usage: card-scrub [FILE] [OPTIONS]

Strip signature cards and orphaned braces from a generated card data file.
FILE defaults to src/game/comprehensiveCardData.ts and is rewritten in place.

Options:
  --pass <NAME>        signatures | orphans | aggressive (repeatable, comma list ok)
  --marker <TEXT>      id fragment marking a signature card (default: -sig-)
  --lookbehind <N>     lines searched backwards for an opening brace (default: 10)
  --output <PATH>      write here instead of overwriting FILE
  --dry-run            report only, write nothing
  --json               print the report as JSON on stdout
  --log-file <PATH>    append progress to this file
  --quiet              no progress on stderr
  -h, --help           show this text

Options in $CARD_SCRUB_OPTS are read before the command line.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingValue(String),
    InvalidValue { flag: String, value: String },
    UnknownFlag(String),
    UnknownPass(String),
    BadEnvironment(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingValue(flag) => write!(f, "{} needs a value", flag),
            ConfigError::InvalidValue { flag, value } => {
                write!(f, "invalid value '{}' for {}", value, flag)
            }
            ConfigError::UnknownFlag(flag) => write!(f, "unknown option '{}'", flag),
            ConfigError::UnknownPass(name) => write!(f, "unknown pass '{}'", name),
            ConfigError::BadEnvironment(raw) => {
                write!(f, "could not split ${} ('{}')", OPTS_ENV, raw)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub passes: Vec<Pass>,
    pub marker: String,
    pub lookbehind: usize,
    pub dry_run: bool,
    pub json: bool,
    pub log_file: Option<PathBuf>,
    pub quiet: bool,
    pub help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: None,
            passes: vec![Pass::Signatures],
            marker: DEFAULT_MARKER.to_string(),
            lookbehind: DEFAULT_LOOKBEHIND,
            dry_run: false,
            json: false,
            log_file: None,
            quiet: false,
            help: false,
        }
    }
}

impl Config {
    /// Read `$CARD_SCRUB_OPTS` and the process arguments.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_opts = std::env::var(OPTS_ENV).ok();
        Self::parse(env_opts.as_deref(), std::env::args().skip(1))
    }

    pub fn parse<I>(env_opts: Option<&str>, args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut all = match env_opts.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => {
                shlex::split(raw).ok_or_else(|| ConfigError::BadEnvironment(raw.to_string()))?
            }
            None => Vec::new(),
        };
        all.extend(args);

        let mut config = Config::default();
        let mut passes: Vec<Pass> = Vec::new();
        let mut input: Option<PathBuf> = None;
        let mut iter = all.into_iter();

        while let Some(arg) = iter.next() {
            // --flag=value
            let (flag, inline) = match arg.split_once('=') {
                Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
                _ => (arg.clone(), None),
            };

            // Switches take no value
            let is_switch = matches!(
                flag.as_str(),
                "--dry-run" | "--json" | "--quiet" | "-q" | "--help" | "-h"
            );
            if is_switch {
                if let Some(v) = inline.clone() {
                    return Err(ConfigError::InvalidValue { flag, value: v });
                }
            }

            let mut value = |flag: &str| -> Result<String, ConfigError> {
                match inline.clone() {
                    Some(v) => Ok(v),
                    None => iter
                        .next()
                        .ok_or_else(|| ConfigError::MissingValue(flag.to_string())),
                }
            };

            match flag.as_str() {
                "--pass" => {
                    for name in value(&flag)?.split(',').filter(|s| !s.trim().is_empty()) {
                        passes.push(name.parse()?);
                    }
                }
                "--marker" => {
                    let marker = value(&flag)?;
                    if marker.is_empty() {
                        return Err(ConfigError::InvalidValue {
                            flag: flag.clone(),
                            value: marker,
                        });
                    }
                    config.marker = marker;
                }
                "--lookbehind" => {
                    let raw = value(&flag)?;
                    config.lookbehind = raw
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue {
                            flag: flag.clone(),
                            value: raw.clone(),
                        })?;
                }
                "--output" | "-o" => config.output = Some(PathBuf::from(value(&flag)?)),
                "--log-file" => config.log_file = Some(PathBuf::from(value(&flag)?)),
                "--dry-run" => config.dry_run = true,
                "--json" => config.json = true,
                "--quiet" | "-q" => config.quiet = true,
                "--help" | "-h" => config.help = true,
                other if other.starts_with('-') && other.len() > 1 => {
                    return Err(ConfigError::UnknownFlag(other.to_string()));
                }
                _ => input = Some(PathBuf::from(arg)),
            }
        }

        if !passes.is_empty() {
            config.passes = passes;
        }
        if let Some(path) = input {
            config.input = path;
        }
        Ok(config)
    }

    /// Where the rewritten file goes.
    pub fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.input)
    }
}
