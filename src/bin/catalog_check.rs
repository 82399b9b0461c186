//! Offline validator and summarizer for library files.
//!
//! Reads a library file (or stdin), validates it against the shipped
//! schema, and prints a short summary so a file can be checked without
//! starting the interactive menu. Exits non-zero when the file violates
//! the contract, which makes it usable as a pre-commit or backup check.

use anyhow::{Context, Result, bail};
use bookcase::Book;
use bookcase::catalog::parse_library_value;
use serde_json::Value;
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    let (label, data) = args.source.read()?;

    let value: Value = serde_json::from_str(&data)
        .with_context(|| format!("parsing JSON from {label}"))?;
    let books = parse_library_value(value)
        .with_context(|| format!("validating library file from {label}"))?;

    let mut output = String::new();
    render_summary(&label, &books, &mut output)?;
    print!("{output}");
    Ok(())
}

struct CliArgs {
    source: InputSource,
}

enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    fn read(&self) -> Result<(String, String)> {
        match self {
            InputSource::File(path) => {
                let data = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Ok((path.display().to_string(), data))
            }
            InputSource::Stdin => {
                let mut data = String::new();
                io::stdin()
                    .read_to_string(&mut data)
                    .context("reading stdin")?;
                if data.trim().is_empty() {
                    bail!("No input provided on stdin");
                }
                Ok(("stdin".to_string(), data))
            }
        }
    }
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os();
        let _program = args.next();

        let Some(first) = args.next() else {
            return Ok(Self {
                source: InputSource::Stdin,
            });
        };

        let first_str = first
            .to_str()
            .with_context(|| "Invalid UTF-8 in argument")?;
        let source = match first_str {
            "--help" | "-h" => usage(0),
            "-" => InputSource::Stdin,
            _ => InputSource::File(PathBuf::from(first_str)),
        };

        if args.next().is_some() {
            usage(1);
        }
        Ok(Self { source })
    }
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: catalog-check [FILE]\n\nValidates a bookcase library file against schema/library.schema.json and\nprints a summary. With no FILE (or with '-'), reads from stdin.\n\nExamples:\n  catalog-check library.json\n  cat library.json | catalog-check"
    );
    std::process::exit(code);
}

fn render_summary(label: &str, books: &[Book], writer: &mut impl fmt::Write) -> Result<()> {
    let mut statuses: BTreeMap<&str, usize> = BTreeMap::new();
    for book in books {
        *statuses.entry(book.status.as_str()).or_insert(0) += 1;
    }

    writeln!(writer, "catalog check: {label}")?;
    writeln!(writer, "==========================")?;
    writeln!(writer, "books   : {}", books.len())?;
    writeln!(writer, "statuses: {}", format_counts(&statuses))?;
    match year_range(books) {
        Some((min, max)) => writeln!(writer, "years   : {min}..{max}")?,
        None => writeln!(writer, "years   : none")?,
    }
    writeln!(writer, "ok")?;
    Ok(())
}

fn format_counts(counts: &BTreeMap<&str, usize>) -> String {
    if counts.is_empty() {
        return "none".to_string();
    }
    counts
        .iter()
        .map(|(key, count)| format!("{key}={count}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn year_range(books: &[Book]) -> Option<(i32, i32)> {
    let mut years = books.iter().map(|book| book.year);
    let first = years.next()?;
    Some(years.fold((first, first), |(min, max), year| {
        (min.min(year), max.max(year))
    }))
}
