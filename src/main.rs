// src/main.rs
mod cli;

use std::fs;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::time::FormatTime;

use cli::{Cli, validate};
use smlgen::errors::render_to_stderr;
use smlgen::manifest::{FileEntry, Manifest};
use smlgen::profile::get_profile;
use smlgen::program::generate_batch;

/// A timer that outputs nothing but still enables span timing calculation
struct NoTimestamp;

impl FormatTime for NoTimestamp {
    fn format_time(
        &self,
        _w: &mut tracing_subscriber::fmt::format::Writer<'_>,
    ) -> std::fmt::Result {
        Ok(())
    }
}

fn init_tracing() {
    // SMLGEN_LOG_STYLE: "compact" (default) or "full" (with timestamps)
    let Ok(filter) = EnvFilter::try_from_env("SMLGEN_LOG") else {
        return;
    };
    let style = std::env::var("SMLGEN_LOG_STYLE").unwrap_or_default();
    if style == "full" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_timer(NoTimestamp)
            .with_writer(std::io::stderr)
            .init();
    }
    tracing::debug!("tracing initialized");
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    if let Err(msg) = validate(&cli) {
        eprintln!("error: {msg}");
        return ExitCode::FAILURE;
    }

    let seed = cli.seed.unwrap_or_else(|| {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        println!("Using random seed: {seed}");
        seed
    });

    let profile = match get_profile(&cli.profile) {
        Ok(profile) => profile,
        Err(e) => {
            render_to_stderr(&e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = fs::create_dir_all(&cli.output) {
        eprintln!(
            "error: failed to create output directory '{}': {}",
            cli.output.display(),
            e
        );
        return ExitCode::FAILURE;
    }

    let selector = cli.complexity.selector();
    let fixtures = match generate_batch(cli.count, seed, selector, &profile) {
        Ok(fixtures) => fixtures,
        Err(e) => {
            render_to_stderr(&e);
            return ExitCode::FAILURE;
        }
    };

    let mut entries = Vec::with_capacity(fixtures.len());
    for fixture in &fixtures {
        let file = format!(
            "Program_{}_{}_{}.sml",
            fixture.index + 1,
            fixture.len(),
            seed
        );
        let path = cli.output.join(&file);
        if let Err(e) = fs::write(&path, &fixture.text) {
            eprintln!("error: failed to write '{}': {}", path.display(), e);
            return ExitCode::FAILURE;
        }
        println!("Generated: {file} ({} chars)", fixture.len());
        entries.push(FileEntry::new(file, fixture));
    }

    if !cli.no_manifest {
        let manifest = Manifest::new(seed, selector.to_string(), cli.profile.clone(), entries);
        if let Err(e) = manifest.write_to_dir(&cli.output) {
            eprintln!("error: failed to write manifest: {}", e);
            return ExitCode::FAILURE;
        }
    }

    println!(
        "Generated {} file(s) in {}",
        fixtures.len(),
        cli.output.display()
    );
    ExitCode::SUCCESS
}
