use std::fs;
use std::process::Command;

use card_scrub::config::OPTS_ENV;
use card_scrub::logging::Logger;
use card_scrub::scanner::Reason;
use card_scrub::{scrub_signatures, Config, ConfigError, Pass, Scrubber};

const CARD_DATA: &str = r#"export const cards = [
  {
    id: 'warrior-1',
    name: 'Warrior',
    cost: 2,
  },
  // Signature cards
  {
    id: 'hero-sig-blade',
    name: 'Blade',
    effects: [
      { type: 'damage', amount: 2 },
    ],
  },
  {
    id: 'mage-1',
    name: 'Mage',
  },
];

export const heroes = [
  {
    id: 'hero-1',
    signatureCardId: 'hero-sig-blade',
    name: 'Hero',
  },
];
"#;

const CARD_DATA_SCRUBBED: &str = r#"export const cards = [
  {
    id: 'warrior-1',
    name: 'Warrior',
    cost: 2,
  },
  // Signature cards
  {
    id: 'mage-1',
    name: 'Mage',
  },
];

export const heroes = [
  {
    id: 'hero-1',
    name: 'Hero',
  },
];
"#;

// Helper to create a test data file
fn create_test_data(content: &str, filename: &str) -> String {
    let path = format!("test_{}.ts", filename);
    fs::write(&path, content).expect("Failed to write test file");
    path
}

// Helper to cleanup test files
fn cleanup_test_data(path: &str) {
    let _ = fs::remove_file(path);
}

#[cfg(test)]
mod scrub_tests {
    use super::*;

    #[test]
    fn test_removes_signature_cards_and_references() {
        assert_eq!(scrub_signatures(CARD_DATA), CARD_DATA_SCRUBBED);
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let once = scrub_signatures(CARD_DATA);
        assert_eq!(scrub_signatures(&once), once);
    }

    #[test]
    fn test_report_describes_removals() {
        let outcome = Scrubber::default().run(CARD_DATA, &mut Logger::silent());
        let report = &outcome.report;

        assert_eq!(report.passes.len(), 1);
        let pass = &report.passes[0];
        assert_eq!(pass.pass, Pass::Signatures);
        assert_eq!(pass.removed.len(), 2);
        assert_eq!(pass.lines_removed(), 8);
        assert!(pass.skipped.is_empty());

        let card = &pass.removed[0];
        assert_eq!((card.first_line, card.last_line), (8, 14));
        assert_eq!(
            card.reason,
            Reason::SignatureCard {
                id: "hero-sig-blade".to_string()
            }
        );
        assert_eq!(pass.removed[1].reason, Reason::SignatureReference);
        assert_eq!(pass.removed[1].first_line, 24);

        assert_eq!(report.lines_before - report.lines_after, 8);
        assert_eq!(
            report.bytes_removed,
            CARD_DATA.len() - CARD_DATA_SCRUBBED.len()
        );
        assert!(!report.is_unchanged());
    }

    #[test]
    fn test_report_serializes_to_json() {
        let outcome = Scrubber::default().run(CARD_DATA, &mut Logger::silent());
        let json = serde_json::to_value(&outcome.report).expect("report should serialize");

        assert_eq!(json["passes"][0]["pass"], "signatures");
        assert_eq!(json["passes"][0]["removed"][0]["reason"]["kind"], "signature_card");
        assert_eq!(json["passes"][0]["removed"][0]["reason"]["id"], "hero-sig-blade");
        assert_eq!(json["passes"][0]["removed"][1]["reason"]["kind"], "signature_reference");
    }

    #[test]
    fn test_unbounded_card_is_skipped_not_cut() {
        let content = "id: 'stray-sig-1',\nname: 'Stray',\n";
        let outcome = Scrubber::default().run(content, &mut Logger::silent());

        assert_eq!(outcome.text, content);
        assert!(outcome.report.is_unchanged());
        assert_eq!(outcome.report.skipped_count(), 1);

        let skipped = &outcome.report.passes[0].skipped[0];
        assert_eq!(skipped.line, 1);
        assert_eq!(skipped.id.as_deref(), Some("stray-sig-1"));
        assert!(skipped.error.contains("no enclosing span found"));
    }

    #[test]
    fn test_card_with_inline_object_removed_whole() {
        let content = "[\n  {\n    id: 'a-sig-1', stats: { atk: 2 },\n    name: 'A',\n  },\n  {\n    id: 'b',\n  },\n]";
        assert_eq!(scrub_signatures(content), "[\n  {\n    id: 'b',\n  },\n]");
    }

    #[test]
    fn test_custom_marker() {
        let content = "[\n  {\n    id: 'old-promo-7',\n  },\n  {\n    id: 'keep-1',\n  },\n]";
        let config = Config::parse(None, vec!["--marker".to_string(), "-promo-".to_string()])
            .expect("config should parse");

        let outcome = Scrubber::from_config(&config).run(content, &mut Logger::silent());
        assert_eq!(outcome.text, "[\n  {\n    id: 'keep-1',\n  },\n]");
    }

    #[test]
    fn test_crlf_and_trailing_newline_survive() {
        let content = "[\r\n  {\r\n    id: 'a-sig-1',\r\n  },\r\n  'b',\r\n]\r\n";
        assert_eq!(scrub_signatures(content), "[\r\n  'b',\r\n]\r\n");
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::parse(None, Vec::new()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.passes, vec![Pass::Signatures]);
        assert_eq!(config.lookbehind, 10);
        assert_eq!(config.output_path(), config.input.as_path());
    }

    #[test]
    fn test_passes_in_order() {
        let config = Config::parse(
            None,
            args(&[
                "data.ts",
                "--pass",
                "orphans",
                "--pass=aggressive,signatures",
                "--lookbehind",
                "5",
                "--dry-run",
            ]),
        )
        .unwrap();

        assert_eq!(
            config.passes,
            vec![Pass::Orphans, Pass::Aggressive, Pass::Signatures]
        );
        assert_eq!(config.lookbehind, 5);
        assert!(config.dry_run);
        assert_eq!(config.input.to_str(), Some("data.ts"));
    }

    #[test]
    fn test_environment_options_come_first() {
        let config = Config::parse(
            Some("--marker '-signature-' --json --lookbehind 3"),
            args(&["file.ts", "--lookbehind", "7"]),
        )
        .unwrap();

        assert_eq!(config.marker, "-signature-");
        assert!(config.json);
        assert_eq!(config.lookbehind, 7);
        assert_eq!(config.input.to_str(), Some("file.ts"));
    }

    #[test]
    fn test_config_errors() {
        assert_eq!(
            Config::parse(None, args(&["--lookbehind", "abc"])),
            Err(ConfigError::InvalidValue {
                flag: "--lookbehind".to_string(),
                value: "abc".to_string()
            })
        );
        assert_eq!(
            Config::parse(None, args(&["--pass", "bogus"])),
            Err(ConfigError::UnknownPass("bogus".to_string()))
        );
        assert_eq!(
            Config::parse(None, args(&["--frobnicate"])),
            Err(ConfigError::UnknownFlag("--frobnicate".to_string()))
        );
        assert_eq!(
            Config::parse(None, args(&["--output"])),
            Err(ConfigError::MissingValue("--output".to_string()))
        );
        assert!(matches!(
            Config::parse(Some("--marker 'unterminated"), Vec::new()),
            Err(ConfigError::BadEnvironment(_))
        ));
    }

    #[test]
    fn test_switches_reject_inline_values() {
        assert_eq!(
            Config::parse(None, args(&["--dry-run=false"])),
            Err(ConfigError::InvalidValue {
                flag: "--dry-run".to_string(),
                value: "false".to_string()
            })
        );
        assert_eq!(
            Config::parse(None, args(&["--json=x"])),
            Err(ConfigError::InvalidValue {
                flag: "--json".to_string(),
                value: "x".to_string()
            })
        );
        assert!(Config::parse(None, args(&["--json", "--dry-run"])).is_ok());
    }
}

#[cfg(test)]
mod binary_tests {
    use super::*;

    fn card_scrub() -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_card-scrub"));
        cmd.env_remove(OPTS_ENV);
        cmd
    }

    #[test]
    fn test_rewrites_file_in_place() {
        let path = create_test_data(CARD_DATA, "in_place");

        let status = card_scrub()
            .args([path.as_str(), "--quiet"])
            .status()
            .expect("Failed to run card-scrub");
        assert!(status.success());

        let rewritten = fs::read_to_string(&path).expect("Could not read test file");
        assert_eq!(rewritten, CARD_DATA_SCRUBBED);

        cleanup_test_data(&path);
    }

    #[test]
    fn test_dry_run_prints_json_and_keeps_file() {
        let path = create_test_data(CARD_DATA, "dry_run");

        let output = card_scrub()
            .args([path.as_str(), "--dry-run", "--json", "--quiet"])
            .output()
            .expect("Failed to run card-scrub");
        assert!(output.status.success());

        let report: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
        assert_eq!(report["passes"][0]["removed"].as_array().map(Vec::len), Some(2));

        let untouched = fs::read_to_string(&path).expect("Could not read test file");
        assert_eq!(untouched, CARD_DATA);

        cleanup_test_data(&path);
    }

    #[test]
    fn test_output_flag_leaves_input_alone() {
        let path = create_test_data(CARD_DATA, "output_src");
        let out = "test_output_dst.ts";

        let status = card_scrub()
            .args([path.as_str(), "--output", out, "--quiet"])
            .status()
            .expect("Failed to run card-scrub");
        assert!(status.success());

        assert_eq!(fs::read_to_string(&path).unwrap(), CARD_DATA);
        assert_eq!(fs::read_to_string(out).unwrap(), CARD_DATA_SCRUBBED);

        cleanup_test_data(&path);
        cleanup_test_data(out);
    }

    #[test]
    fn test_log_file_appends_across_runs() {
        let content = format!("id: 'stray-sig-9',\n{}", CARD_DATA);
        let path = create_test_data(&content, "log_file");
        let log = "test_log_appends.txt";
        cleanup_test_data(log);

        for _ in 0..2 {
            let status = card_scrub()
                .args([path.as_str(), "--dry-run", "--quiet", "--log-file", log])
                .status()
                .expect("Failed to run card-scrub");
            assert!(status.success());
        }

        let logged = fs::read_to_string(log).expect("Could not read log file");
        assert_eq!(logged.matches("=== CARD-SCRUB STARTED").count(), 2);
        assert_eq!(
            logged
                .matches("Removing signature card 'hero-sig-blade'")
                .count(),
            2
        );
        assert_eq!(logged.matches("WARN Skipping line 1:").count(), 2);
        assert!(logged.lines().all(|l| l.starts_with('[')));

        cleanup_test_data(&path);
        cleanup_test_data(log);
    }

    #[test]
    fn test_bad_flag_exits_with_usage() {
        let output = card_scrub()
            .arg("--frobnicate")
            .output()
            .expect("Failed to run card-scrub");

        assert_eq!(output.status.code(), Some(2));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("unknown option"));
        assert!(stderr.contains("Usage: card-scrub"));
    }
}
