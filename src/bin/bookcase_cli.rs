//! Interactive console catalog.
//!
//! Presents the numbered menu on stdout and reads commands from stdin, one
//! catalog operation per iteration. All recoverable conditions (missing
//! ids, invalid fields or statuses, unreadable files) are reported inline
//! and the loop continues; the process only exits non-zero when the menu
//! loop itself cannot run.

use anyhow::{Context, Result};
use bookcase::{Catalog, run_menu};
use std::env;
use std::io;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    parse_args()?;

    let mut catalog = Catalog::new();
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stdout().lock();
    run_menu(&mut reader, &mut writer, &mut catalog)
}

fn parse_args() -> Result<()> {
    let mut args = env::args_os();
    let _program = args.next();

    if let Some(flag) = args.next() {
        let flag_str = flag
            .to_str()
            .with_context(|| "Invalid UTF-8 in command flag")?;
        match flag_str {
            "--help" | "-h" => usage(0),
            _ => usage(1),
        }
    }
    Ok(())
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: bookcase\n\nRuns the interactive library catalog menu (commands 0-7).\nSet BOOKCASE_LIBRARY to change the default library file offered at the\nload/save prompts (default: library.json).\n\nSee also:\n  catalog-check   Validate a library file against the shipped schema."
    );
    std::process::exit(code);
}
