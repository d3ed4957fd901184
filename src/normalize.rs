//! Light text normalization of tokenized article/summary files into one
//! article string and one marker-wrapped abstract string
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{io_at, Result};

/// Right single curly quote
pub const SINGLE_CLOSE_QUOTE: &str = "\u{2019}";
/// Right double curly quote
pub const DOUBLE_CLOSE_QUOTE: &str = "\u{201d}";
/// Acceptable ways to end a sentence
pub const END_TOKENS: [&str; 10] = [
  ".",
  "!",
  "?",
  "...",
  "'",
  "`",
  "\"",
  SINGLE_CLOSE_QUOTE,
  DOUBLE_CLOSE_QUOTE,
  ")",
];
/// Lines containing this marker are annotations, not sentences
pub const HIGHLIGHT_MARKER: &str = "@highlight";
/// Opens every summary sentence in the abstract
pub const SENTENCE_START: &str = "<s>";
/// Closes every summary sentence in the abstract
pub const SENTENCE_END: &str = "</s>";

/// One normalized article and its abstract
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentPair {
  /// lowercased, punctuation-terminated article sentences joined by spaces
  pub article: String,
  /// summary sentences, each wrapped as `<s> sentence </s>`, joined by spaces
  pub abstract_text: String,
}

/// Read a text file into lines, trimming surrounding whitespace from each.
/// Bytes that are not UTF-8 become U+FFFD instead of failing the read.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
  let file = File::open(path).map_err(io_at(path))?;
  let mut reader = BufReader::new(file);
  let mut lines = Vec::new();
  let mut buffer = Vec::new();
  loop {
    buffer.clear();
    if reader.read_until(b'\n', &mut buffer).map_err(io_at(path))? == 0 {
      break;
    }
    lines.push(String::from_utf8_lossy(&buffer).trim().to_owned());
  }
  Ok(lines)
}

/// Adds " ." to a line lacking terminal punctuation. Empty lines, lines that
/// already end in one of `END_TOKENS` and `@highlight` lines pass unchanged.
pub fn ensure_terminal_punctuation(line: &str) -> String {
  if line.is_empty()
    || line.contains(HIGHLIGHT_MARKER)
    || END_TOKENS.iter().any(|token| line.ends_with(token))
  {
    line.to_owned()
  } else {
    format!("{} .", line)
  }
}

fn normalize_line(line: &str) -> String { ensure_terminal_punctuation(&line.to_lowercase()) }

/// Build the article and abstract strings from the raw lines of both files
pub fn build_document<A, S>(article_lines: &[A], summary_lines: &[S]) -> DocumentPair
where
  A: AsRef<str>,
  S: AsRef<str>,
{
  let article = article_lines
    .iter()
    .map(|line| normalize_line(line.as_ref()))
    .collect::<Vec<_>>()
    .join(" ");
  let abstract_text = summary_lines
    .iter()
    .map(|line| {
      format!(
        "{} {} {}",
        SENTENCE_START,
        normalize_line(line.as_ref()),
        SENTENCE_END
      )
    })
    .collect::<Vec<_>>()
    .join(" ");
  DocumentPair {
    article,
    abstract_text,
  }
}

/// Read and normalize a tokenized article file and its summary file
pub fn read_document(article_file: &Path, summary_file: &Path) -> Result<DocumentPair> {
  let article_lines = read_lines(article_file)?;
  let summary_lines = read_lines(summary_file)?;
  log::debug!(
    "-- {} article lines, {} summary lines",
    article_lines.len(),
    summary_lines.len()
  );
  Ok(build_document(&article_lines, &summary_lines))
}
