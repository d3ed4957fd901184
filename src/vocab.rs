//! Word-frequency counting over the written documents, dumped as a
//! frequency-ranked vocabulary file

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{io_at, Result};
use crate::normalize::{SENTENCE_END, SENTENCE_START};

/// Records the frequencies of tokens, remembering the order of first appearance
#[derive(Debug, Default)]
pub struct VocabCounter {
  /// (token, count), in order of first appearance
  entries: Vec<(String, u64)>,
  /// position of each token in `entries`
  index: HashMap<String, usize>,
}

impl VocabCounter {
  /// Creates a new, empty counter
  pub fn new() -> Self { VocabCounter::default() }

  /// Get the count of a token
  pub fn get(&self, token: &str) -> u64 {
    match self.index.get(token) {
      Some(position) => self.entries[*position].1,
      None => 0,
    }
  }

  /// Count one occurrence of `token`
  pub fn insert(&mut self, token: &str) {
    match self.index.get(token).copied() {
      Some(position) => self.entries[position].1 += 1,
      None => {
        self.index.insert(token.to_owned(), self.entries.len());
        self.entries.push((token.to_owned(), 1));
      },
    }
  }

  /// Count the tokens of a document pair. Both texts are split on single
  /// spaces; the sentence markers of the abstract and empty tokens are skipped.
  pub fn accumulate(&mut self, article: &str, abstract_text: &str) {
    let article_tokens = article.split(' ');
    let abstract_tokens = abstract_text
      .split(' ')
      .filter(|token| *token != SENTENCE_START && *token != SENTENCE_END);
    for token in article_tokens.chain(abstract_tokens) {
      let token = token.trim();
      if !token.is_empty() {
        self.insert(token);
      }
    }
  }

  /// The number of distinct tokens counted
  pub fn count(&self) -> usize { self.entries.len() }

  /// Is nothing counted yet?
  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  /// The `limit` most frequent tokens, most frequent first. Equal counts keep
  /// the order in which the tokens were first seen.
  pub fn most_common(&self, limit: usize) -> Vec<(&str, u64)> {
    let mut ranked: Vec<(&str, u64)> = self
      .entries
      .iter()
      .map(|(token, count)| (token.as_str(), *count))
      .collect();
    // stable, so first-seen order survives among ties
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
  }

  /// Write at most `max_entries` `token count` lines to `path`, most frequent
  /// first. Returns the number of lines written.
  pub fn flush(&self, path: &Path, max_entries: usize) -> Result<usize> {
    let file = File::create(path).map_err(io_at(path))?;
    let mut writer = BufWriter::new(file);
    let ranked = self.most_common(max_entries);
    for (token, count) in &ranked {
      writeln!(writer, "{} {}", token, count).map_err(io_at(path))?;
    }
    writer.flush().map_err(io_at(path))?;
    Ok(ranked.len())
  }
}
