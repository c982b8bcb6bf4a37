use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tle_parser::{parse_catalog, ParseConfig};
use tle_types::prelude::*;

/// Scan TLE catalog files, reporting each record outcome
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Skip mod-10 checksum verification (for damaged catalog sources)
    #[arg(short = 'k', long)]
    no_checksums: bool,

    /// Print every parsed record, not only the failures
    #[arg(short, long)]
    verbose: bool,

    /// Catalog files to read
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();
    let config = ParseConfig {
        verify_checksums: !opts.no_checksums,
    };

    let mut records = 0_usize;
    let mut failures = 0_usize;

    for path in &opts.inputs {
        let text = fs::read_to_string(path)?;
        for entry in parse_catalog(&text, config) {
            match entry.result {
                Ok(tle) => {
                    records += 1;
                    if opts.verbose {
                        print_record(path, &tle);
                    }
                }
                Err(err) => {
                    failures += 1;
                    eprintln!("{}:{}: {err}", path.display(), entry.lines.start + 1);
                }
            }
        }
    }

    println!("{records} records, {failures} failures");
    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn print_record(path: &Path, tle: &Tle) {
    println!(
        "{}: {} {} epoch {}",
        path.display(),
        tle.norad_id,
        tle.name.as_deref().unwrap_or("(unnamed)"),
        tle.epoch(),
    );
}
