//! Text-mode prompt loop.
//!
//! Asks for a directory (unless one is given), prints the catalog, then
//! answers identifier queries until `exit` or end of input.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::catalog::{FilenameSource, ListingError};
use crate::session::Session;

use super::write_catalog;

/// Word that ends the query loop (case-insensitive)
pub const EXIT_WORD: &str = "exit";

/// Read one line, `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

/// Run the prompt session over `input`/`output`
pub async fn run<R: BufRead, W: Write>(
    source: &dyn FilenameSource,
    directory: Option<PathBuf>,
    mut input: R,
    mut output: W,
) -> Result<()> {
    writeln!(output, "Welcome to idcat")?;

    let directory = match directory {
        Some(dir) => dir,
        None => {
            write!(output, "Directory path: ")?;
            output.flush()?;
            match read_line(&mut input)? {
                Some(line) if !line.trim().is_empty() => PathBuf::from(line.trim()),
                _ => {
                    writeln!(output, "\nNo directory given.")?;
                    return Ok(());
                }
            }
        }
    };

    let session = match Session::open(source, &directory).await {
        Ok(session) => session,
        Err(e @ (ListingError::NotFound(_) | ListingError::NotADirectory(_))) => {
            writeln!(output, "Invalid directory: {}", e)?;
            return Ok(());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to catalog {}", directory.display()));
        }
    };

    if session.is_empty() {
        writeln!(
            output,
            "No files with an identifier in {}",
            session.directory().display()
        )?;
        return Ok(());
    }

    write_catalog(&mut output, session.catalog())?;

    loop {
        write!(
            output,
            "\nIdentifier to look up (or '{}' to quit): ",
            EXIT_WORD
        )?;
        output.flush()?;

        let Some(line) = read_line(&mut input)? else {
            writeln!(output)?;
            break;
        };
        let query = line.trim();

        if query.eq_ignore_ascii_case(EXIT_WORD) {
            writeln!(output, "Bye.")?;
            break;
        }
        if query.is_empty() {
            continue;
        }

        match session.lookup(query) {
            Some(filename) => writeln!(output, "Found: {}", filename)?,
            None => writeln!(output, "No file matches identifier: {}", query)?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::Path;

    use async_trait::async_trait;

    struct FixedSource(Vec<&'static str>);

    #[async_trait]
    impl FilenameSource for FixedSource {
        async fn filenames(&self, _dir: &Path) -> Result<Vec<String>, ListingError> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    async fn transcript(dir: Option<&str>, files: Vec<&'static str>, input: &str) -> String {
        let mut out = Vec::new();
        run(
            &FixedSource(files),
            dir.map(PathBuf::from),
            Cursor::new(input.to_string()),
            &mut out,
        )
        .await
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_prompt_lookup_and_exit() {
        let out = transcript(
            Some("/scans"),
            vec!["ABC-123.pdf", "readme.md"],
            "abc-123\nABC999\n\nEXIT\nabc-123\n",
        )
        .await;

        assert!(out.contains("ABC 123 - ABC-123.pdf"));
        assert!(out.contains("Found: ABC-123.pdf"));
        assert!(out.contains("No file matches identifier: ABC999"));
        assert!(out.contains("Bye."));
        // Nothing is answered after exit
        assert_eq!(out.matches("Found:").count(), 1);
    }

    #[tokio::test]
    async fn test_prompt_asks_for_directory() {
        let out = transcript(None, vec!["XYZ 789.doc"], "/docs\nxyz789\n").await;
        assert!(out.contains("Directory path: "));
        assert!(out.contains("Found: XYZ 789.doc"));
    }

    #[tokio::test]
    async fn test_prompt_empty_catalog_ends_session() {
        let out = transcript(Some("/docs"), vec!["readme.md"], "abc\n").await;
        assert!(out.contains("No files with an identifier in /docs"));
        assert!(!out.contains("Identifier to look up"));
    }

    #[tokio::test]
    async fn test_prompt_end_of_input_without_directory() {
        let out = transcript(None, vec!["AB1"], "").await;
        assert!(out.contains("No directory given."));
    }
}
