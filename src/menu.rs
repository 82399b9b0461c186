//! Interactive command loop over the catalog.
//!
//! The loop is the sole caller of the `Catalog` contract and performs no
//! business logic of its own: it reads one command token per iteration,
//! prompts for any follow-up fields, invokes exactly one catalog operation,
//! and prints the outcome. It is generic over the input and output streams
//! so scripted sessions can drive full runs in tests without a terminal.
//!
//! Input validation happens here, at the boundary: non-numeric years,
//! fields outside the searchable set, and statuses outside the closed enum
//! are all rejected with a report and a re-prompt, never a crash and never
//! a catalog mutation.

use crate::catalog::{BookId, BookStatus, Catalog, SearchField};
use crate::{Book, default_library_path};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;

const MENU: &str = "\
0. Exit
1. Load the catalog from a file
2. Save the catalog to a file
3. Add a book
4. Search for books
5. Remove a book
6. List all books
7. Update a book's status";

/// Run the menu until the user exits or the input stream ends.
///
/// The advisory dirty flag lives here, not in the catalog: add, remove, and
/// status updates set it, a successful save or load clears it, and exit asks
/// for confirmation while it is set. End of input terminates the loop
/// unconditionally since no confirmation can be read.
pub fn run_menu<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    catalog: &mut Catalog,
) -> Result<()> {
    let mut dirty = false;

    loop {
        writeln!(writer, "{MENU}")?;
        let Some(choice) = prompt(reader, writer, "> ")? else {
            break;
        };

        match choice.trim() {
            "0" => {
                if dirty {
                    let answer = prompt(
                        reader,
                        writer,
                        "You have unsaved changes. Quit anyway? [y/n] ",
                    )?;
                    if answer.as_deref().map(str::trim) != Some("y") {
                        continue;
                    }
                }
                writeln!(writer, "Bye.")?;
                break;
            }
            "1" => {
                let Some(path) = prompt_path(reader, writer, "File to load from")? else {
                    break;
                };
                match catalog.load(&path) {
                    Ok(count) => {
                        writeln!(writer, "Loaded {count} book(s) from {}", path.display())?;
                        dirty = false;
                    }
                    Err(err) => writeln!(
                        writer,
                        "Unable to load {}: {err:#}. The catalog was left unchanged.",
                        path.display()
                    )?,
                }
            }
            "2" => {
                let Some(path) = prompt_path(reader, writer, "File to save to")? else {
                    break;
                };
                match catalog.save(&path) {
                    Ok(()) => {
                        writeln!(
                            writer,
                            "Saved {} book(s) to {}",
                            catalog.len(),
                            path.display()
                        )?;
                        dirty = false;
                    }
                    Err(err) => writeln!(writer, "Unable to save {}: {err:#}", path.display())?,
                }
            }
            "3" => {
                let Some(title) = prompt(reader, writer, "Title: ")? else {
                    break;
                };
                let Some(author) = prompt(reader, writer, "Author: ")? else {
                    break;
                };
                let Some(year_raw) = prompt(reader, writer, "Year: ")? else {
                    break;
                };
                let Ok(year) = year_raw.trim().parse::<i32>() else {
                    writeln!(writer, "Year must be a number.")?;
                    continue;
                };
                let book = catalog.add(title, author, year);
                writeln!(writer, "Added: {} (id: {})", book.title, book.id)?;
                dirty = true;
            }
            "4" => {
                let Some(field_raw) = prompt(reader, writer, "Search by (title/author/year): ")?
                else {
                    break;
                };
                let Some(field) = SearchField::parse(field_raw.trim()) else {
                    writeln!(writer, "Searchable fields are title, author, and year.")?;
                    continue;
                };
                let Some(query) = prompt(reader, writer, "Query: ")? else {
                    break;
                };
                let matches = catalog.search(field, &query);
                if matches.is_empty() {
                    writeln!(writer, "No books matched '{query}'.")?;
                } else {
                    writeln!(writer, "{} book(s) matched '{query}':", matches.len())?;
                    for book in matches {
                        render_book(writer, book)?;
                    }
                }
            }
            "5" => {
                let Some(id_raw) = prompt(reader, writer, "Id of the book to remove: ")? else {
                    break;
                };
                let id = BookId(id_raw.trim().to_string());
                match catalog.remove(&id) {
                    Some(book) => {
                        writeln!(writer, "Removed: {}", book.title)?;
                        dirty = true;
                    }
                    None => writeln!(writer, "No book with id {id}.")?,
                }
            }
            "6" => {
                if catalog.is_empty() {
                    writeln!(writer, "The catalog is empty.")?;
                } else {
                    writeln!(writer, "{} book(s) in the catalog:", catalog.len())?;
                    for book in catalog.list() {
                        render_book(writer, book)?;
                    }
                }
            }
            "7" => {
                let Some(id_raw) = prompt(reader, writer, "Id of the book to update: ")? else {
                    break;
                };
                let Some(status_raw) =
                    prompt(reader, writer, "New status (available/checked_out): ")?
                else {
                    break;
                };
                let Some(status) = BookStatus::parse(status_raw.trim()) else {
                    writeln!(writer, "Valid statuses are available and checked_out.")?;
                    continue;
                };
                let id = BookId(id_raw.trim().to_string());
                match catalog.update_status(&id, status) {
                    Some(book) => {
                        writeln!(writer, "{} is now {}.", book.title, book.status)?;
                        dirty = true;
                    }
                    None => writeln!(writer, "No book with id {id}.")?,
                }
            }
            _ => writeln!(writer, "Invalid choice. Commands are 0-7.")?,
        }
    }

    Ok(())
}

fn render_book<W: Write>(writer: &mut W, book: &Book) -> Result<()> {
    writeln!(
        writer,
        "  [{}] {} ({}) by {}  id={}",
        book.status, book.title, book.year, book.author, book.id
    )?;
    Ok(())
}

/// Print a prompt, flush, and read one line. `None` means end of input.
fn prompt<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    text: &str,
) -> Result<Option<String>> {
    write!(writer, "{text}")?;
    writer.flush()?;
    read_line(reader)
}

/// Prompt for a file path, falling back to the default library path when the
/// user submits an empty line.
fn prompt_path<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    label: &str,
) -> Result<Option<PathBuf>> {
    let default = default_library_path();
    let text = format!("{label} [{}]: ", default.display());
    let Some(raw) = prompt(reader, writer, &text)? else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Ok(Some(default))
    } else {
        Ok(Some(PathBuf::from(trimmed)))
    }
}

fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = reader.read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_session(input: &str, catalog: &mut Catalog) -> String {
        let mut reader = Cursor::new(input.as_bytes());
        let mut output = Vec::new();
        run_menu(&mut reader, &mut output, catalog).expect("menu session failed");
        String::from_utf8(output).expect("menu output was not UTF-8")
    }

    #[test]
    fn junk_commands_reprompt_without_crashing() {
        let mut catalog = Catalog::new();
        let output = run_session("9\nlist\n\n0\n", &mut catalog);
        assert_eq!(
            output.matches("Invalid choice. Commands are 0-7.").count(),
            3
        );
        assert!(output.ends_with("Bye.\n"));
    }

    #[test]
    fn add_rejects_non_numeric_year_before_touching_the_catalog() {
        let mut catalog = Catalog::new();
        let output = run_session("3\n1984\nGeorge Orwell\nnineteen49\n0\n", &mut catalog);
        assert!(output.contains("Year must be a number."));
        assert!(catalog.is_empty());
    }

    #[test]
    fn add_reports_title_and_id() {
        let mut catalog = Catalog::new();
        let output = run_session("3\n1984\nGeorge Orwell\n1949\n0\ny\n", &mut catalog);
        let id = &catalog.list()[0].id;
        assert!(output.contains(&format!("Added: 1984 (id: {id})")));
    }

    #[test]
    fn search_rejects_unknown_fields_without_scanning() {
        let mut catalog = Catalog::new();
        catalog.add("1984", "George Orwell", 1949);
        let output = run_session("4\nisbn\n0\n", &mut catalog);
        assert!(output.contains("Searchable fields are title, author, and year."));
        assert!(!output.contains("matched"));
    }

    #[test]
    fn bogus_status_never_changes_a_stored_status() {
        let mut catalog = Catalog::new();
        let id = catalog.add("1984", "George Orwell", 1949).id.clone();

        let input = format!("7\n{id}\nbogus\n0\n");
        let output = run_session(&input, &mut catalog);
        assert!(output.contains("Valid statuses are available and checked_out."));
        assert_eq!(catalog.list()[0].status, BookStatus::Available);
    }

    #[test]
    fn update_status_reports_not_found_for_unknown_ids() {
        let mut catalog = Catalog::new();
        catalog.add("1984", "George Orwell", 1949);
        let output = run_session("7\nno-such-id\nchecked_out\n0\n", &mut catalog);
        assert!(output.contains("No book with id no-such-id."));
        assert_eq!(catalog.list()[0].status, BookStatus::Available);
    }

    #[test]
    fn exit_with_unsaved_changes_requires_confirmation() {
        let mut catalog = Catalog::new();
        // Add a book (dirty), decline the first quit, then confirm the second.
        let input = "3\nDune\nFrank Herbert\n1965\n0\nn\n0\ny\n";
        let output = run_session(input, &mut catalog);
        assert_eq!(
            output
                .matches("You have unsaved changes. Quit anyway? [y/n]")
                .count(),
            2
        );
        assert!(output.ends_with("Bye.\n"));
    }

    #[test]
    fn exit_without_changes_skips_confirmation() {
        let mut catalog = Catalog::new();
        let output = run_session("0\n", &mut catalog);
        assert!(!output.contains("unsaved changes"));
        assert!(output.ends_with("Bye.\n"));
    }

    #[test]
    fn end_of_input_terminates_the_loop() {
        let mut catalog = Catalog::new();
        let output = run_session("6\n", &mut catalog);
        assert!(output.contains("The catalog is empty."));
    }

    #[test]
    fn list_shows_count_and_records_in_insertion_order() {
        let mut catalog = Catalog::new();
        catalog.add("1984", "George Orwell", 1949);
        catalog.add("Brave New World", "Aldous Huxley", 1932);

        let output = run_session("6\n0\n", &mut catalog);
        assert!(output.contains("2 book(s) in the catalog:"));
        let first = output.find("1984").expect("first title missing");
        let second = output.find("Brave New World").expect("second title missing");
        assert!(first < second);
    }

    #[test]
    fn remove_reports_the_removed_title_and_marks_dirty() {
        let mut catalog = Catalog::new();
        let id = catalog.add("Dune", "Frank Herbert", 1965).id.clone();

        // Removing makes the session dirty, so plain exit asks to confirm.
        let input = format!("5\n{id}\n0\ny\n");
        let output = run_session(&input, &mut catalog);
        assert!(output.contains("Removed: Dune"));
        assert!(output.contains("You have unsaved changes."));
        assert!(catalog.is_empty());
    }
}
