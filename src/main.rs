use card_scrub::config::USAGE;
use card_scrub::logging::Logger;
use card_scrub::{Config, Scrubber};
use std::fs;
use std::io;
use std::process;

fn main() -> io::Result<()> {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("❌ {}", err);
            eprintln!("\n{}", USAGE);
            process::exit(2);
        }
    };

    if config.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let mut log = Logger::new(config.log_file.as_deref(), config.quiet);
    log.file_only(&format!("Config: {:?}", config));

    log.info(&format!("Reading {}...", config.input.display()));
    let content = fs::read_to_string(&config.input)?;
    log.info(&format!(
        "Original: {} bytes, {} lines",
        content.len(),
        content.lines().count()
    ));

    let outcome = Scrubber::from_config(&config).run(&content, &mut log);

    if config.json {
        println!("{}", serde_json::to_string_pretty(&outcome.report)?);
    } else {
        print!("{}", outcome.report.summary());
    }

    if outcome.report.skipped_count() > 0 {
        log.warn(&format!(
            "{} target(s) left untouched, see report",
            outcome.report.skipped_count()
        ));
    }

    if config.dry_run {
        log.info("Dry run, nothing written");
    } else if outcome.report.is_unchanged() && config.output.is_none() {
        log.info("Nothing to remove, file left as is");
    } else {
        let out = config.output_path();
        log.info(&format!("Writing to {}...", out.display()));
        fs::write(out, &outcome.text)?;
        log.info("✓ Done!");
    }

    log.file_only("=== CARD-SCRUB EXITING ===");
    Ok(())
}
