//! Tokenizer backends producing one tokenized text file per selected input.
//!
//! The tokenization itself is an external concern: a backend only promises
//! that, once `tokenize` returns, the tokenized directory holds a file named
//! like each selected instance.
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{io_at, PrepError, Result};
use crate::selector::{self, MappingEntry};

/// Turns a set of raw text files into tokenized text files
pub trait Tokenizer {
  /// Tokenize `instances` (file names in `source_dir`), returning the directory
  /// that now holds the tokenized files
  fn tokenize(&self, source_dir: &Path, instances: &[String]) -> Result<PathBuf>;
}

/// Stanford CoreNLP's `PTBTokenizer`, driven through a list file in
/// `-ioFileList -preserveLines` mode
pub struct PtbTokenizer {
  /// program starting the JVM
  pub program: String,
  /// arguments for the program itself (classpath, heap size), given before
  /// the class
  pub jvm_args: Vec<String>,
  /// tokenizer class handed to the program
  pub class: String,
  /// list file written before the subprocess starts; it is left in place
  pub mapping_file: PathBuf,
  /// where the tokenized files are written
  pub tokenized_dir: PathBuf,
  /// treat an unsuccessful exit status as success, only logging it
  pub allow_failure: bool,
}

impl PtbTokenizer {
  /// The subprocess command line for the current list file
  pub fn command(&self) -> Command {
    let mut command = Command::new(&self.program);
    command
      .args(&self.jvm_args)
      .arg(&self.class)
      .arg("-ioFileList")
      .arg("-preserveLines")
      .arg(&self.mapping_file);
    command
  }
}

impl Tokenizer for PtbTokenizer {
  fn tokenize(&self, source_dir: &Path, instances: &[String]) -> Result<PathBuf> {
    log::info!("Making list of files to tokenize...");
    let entries = selector::mapping_entries(source_dir, &self.tokenized_dir, instances);
    selector::write_mapping(&self.mapping_file, &entries)?;

    log::info!(
      "Tokenizing {} files in {} and saving in {}...",
      instances.len(),
      source_dir.display(),
      self.tokenized_dir.display()
    );
    let status = self
      .command()
      .status()
      .map_err(|source| PrepError::TokenizerLaunch {
        program: self.program.clone(),
        source,
      })?;
    if !status.success() {
      if self.allow_failure {
        log::warn!("-- tokenizer exited with {}, continuing regardless", status);
      } else {
        return Err(PrepError::TokenizerFailed { status });
      }
    }
    log::info!("Stanford CoreNLP Tokenizer has finished.");
    Ok(self.tokenized_dir.clone())
  }
}

/// Copies the selected files unchanged, for input that is already tokenized
pub struct PassthroughTokenizer {
  /// where the copies are written
  pub tokenized_dir: PathBuf,
}

impl Tokenizer for PassthroughTokenizer {
  fn tokenize(&self, source_dir: &Path, instances: &[String]) -> Result<PathBuf> {
    let entries = selector::mapping_entries(source_dir, &self.tokenized_dir, instances);
    for MappingEntry {
      source,
      destination,
    } in &entries
    {
      if source.is_dir() {
        log::debug!("-- passthrough skips directory {}", source.display());
        continue;
      }
      fs::copy(source, destination).map_err(io_at(source))?;
    }
    log::info!(
      "Copied {} pre-tokenized files into {}",
      entries.len(),
      self.tokenized_dir.display()
    );
    Ok(self.tokenized_dir.clone())
  }
}
