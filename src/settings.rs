//! Run configuration for a data-file preparation job, and the filesystem
//! layout derived from it
use std::path::PathBuf;

use crate::error::Result;
use crate::util::path_helpers;

/// Directory (under the base directory) receiving the tokenized text files
pub const TOKENIZED_ARTICLES_DIR: &str = "tokenized_articles";
/// Directory (under the base directory) receiving the binary and vocab outputs
pub const FINISHED_FILES_DIR: &str = "finished_files";
/// Name of the binary record file
pub const BIN_FILE_NAME: &str = "test.bin";
/// Name of the vocabulary file
pub const VOCAB_FILE_NAME: &str = "vocab";
/// Default list file handed to the external tokenizer
pub const MAPPING_FILE_NAME: &str = "mapping.txt";
/// Default cap on the number of vocabulary entries
pub const VOCAB_SIZE: usize = 200_000;

/// Which tokenizer backend prepares the text files
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenizerChoice {
  /// Stanford CoreNLP's PTBTokenizer, run as a java subprocess
  Ptb,
  /// Copy the selected files unchanged (input is already tokenized)
  Passthrough,
}

/// Settings for a preparation run
#[derive(Clone, Debug)]
pub struct PrepSettings {
  /// directory holding the raw text files
  pub data_dir: PathBuf,
  /// only files whose name contains this fragment are tokenized; it is also
  /// the stem of the tokenized article/summary file names
  pub filename: String,
  /// tag in the article file name, `<filename>.<article_tag>.txt`
  pub article_tag: String,
  /// tag in the summary file name, `<filename>.<summary_tag>.txt`
  pub summary_tag: String,
  /// also count tokens and write a vocabulary file
  pub make_vocab: bool,
  /// maximum number of vocabulary entries written
  pub vocab_size: usize,
  /// list file for the external tokenizer
  pub mapping_file: PathBuf,
  /// tokenizer backend
  pub tokenizer: TokenizerChoice,
  /// program launching the PTB tokenizer
  pub tokenizer_program: String,
  /// arguments for the tokenizer program placed before the class, e.g.
  /// `-cp stanford-corenlp.jar`
  pub tokenizer_args: Vec<String>,
  /// java class of the PTB tokenizer
  pub tokenizer_class: String,
  /// keep going when the tokenizer subprocess reports failure
  pub allow_tokenizer_failure: bool,
}

impl Default for PrepSettings {
  fn default() -> PrepSettings {
    PrepSettings {
      data_dir: PathBuf::from("."),
      filename: "sample1".to_string(),
      article_tag: "newsarticle".to_string(),
      summary_tag: String::new(),
      make_vocab: false,
      vocab_size: VOCAB_SIZE,
      mapping_file: PathBuf::from(MAPPING_FILE_NAME),
      tokenizer: TokenizerChoice::Ptb,
      tokenizer_program: "java".to_string(),
      tokenizer_args: Vec::new(),
      tokenizer_class: "edu.stanford.nlp.process.PTBTokenizer".to_string(),
      allow_tokenizer_failure: false,
    }
  }
}

impl PrepSettings {
  /// Settings for the raw text files in `data_dir`, defaults otherwise
  pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
    PrepSettings {
      data_dir: data_dir.into(),
      ..PrepSettings::default()
    }
  }
}

/// Where a run reads and writes, all derived from the data directory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
  /// absolute parent of the data directory
  pub base_dir: PathBuf,
  /// `<base>/tokenized_articles`
  pub tokenized_dir: PathBuf,
  /// `<base>/finished_files`
  pub finished_dir: PathBuf,
  /// `<base>/finished_files/test.bin`
  pub bin_file: PathBuf,
  /// `<base>/finished_files/vocab`
  pub vocab_file: PathBuf,
  /// tokenizer list file
  pub mapping_file: PathBuf,
}

impl Layout {
  /// Derive the layout of a run from its settings
  pub fn from_settings(settings: &PrepSettings) -> Result<Self> {
    let base_dir = path_helpers::base_dir(&settings.data_dir)?;
    let tokenized_dir = base_dir.join(TOKENIZED_ARTICLES_DIR);
    let finished_dir = base_dir.join(FINISHED_FILES_DIR);
    Ok(Layout {
      bin_file: finished_dir.join(BIN_FILE_NAME),
      vocab_file: finished_dir.join(VOCAB_FILE_NAME),
      mapping_file: settings.mapping_file.clone(),
      base_dir,
      tokenized_dir,
      finished_dir,
    })
  }

  /// Create the output directories if they do not exist yet
  pub fn create_dirs(&self) -> Result<()> {
    path_helpers::ensure_dir(&self.tokenized_dir)?;
    path_helpers::ensure_dir(&self.finished_dir)
  }
}
