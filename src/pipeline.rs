//! The preparation job: select and tokenize the raw files, normalize each
//! article/summary pair, write it as a length-prefixed record and, on request,
//! dump the vocabulary of everything written.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{io_at, PrepError, Result};
use crate::normalize;
use crate::record;
use crate::selector;
use crate::settings::{Layout, PrepSettings, TokenizerChoice};
use crate::tokenizer::{PassthroughTokenizer, PtbTokenizer, Tokenizer};
use crate::util::path_helpers::tagged_file;
use crate::vocab::VocabCounter;

/// What a run did
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrepReport {
  /// raw files handed to the tokenizer
  pub instances: usize,
  /// records in the binary file
  pub records: u64,
  /// bytes in the binary file, length prefixes included
  pub bytes: u64,
  /// lines in the vocabulary file, if one was written
  pub vocab_entries: Option<usize>,
}

/// Context of one preparation run. The vocabulary counter lives here from
/// construction until `flush_vocab`.
pub struct Pipeline {
  /// run configuration
  pub settings: PrepSettings,
  /// paths derived from the configuration
  pub layout: Layout,
  tokenizer: Box<dyn Tokenizer>,
  vocab: Option<VocabCounter>,
}

impl Pipeline {
  /// A pipeline using the tokenizer backend chosen in `settings`
  pub fn new(settings: PrepSettings) -> Result<Self> {
    let layout = Layout::from_settings(&settings)?;
    let tokenizer: Box<dyn Tokenizer> = match settings.tokenizer {
      TokenizerChoice::Ptb => Box::new(PtbTokenizer {
        program: settings.tokenizer_program.clone(),
        jvm_args: settings.tokenizer_args.clone(),
        class: settings.tokenizer_class.clone(),
        mapping_file: layout.mapping_file.clone(),
        tokenized_dir: layout.tokenized_dir.clone(),
        allow_failure: settings.allow_tokenizer_failure,
      }),
      TokenizerChoice::Passthrough => Box::new(PassthroughTokenizer {
        tokenized_dir: layout.tokenized_dir.clone(),
      }),
    };
    Ok(Pipeline::with_tokenizer(settings, layout, tokenizer))
  }

  /// A pipeline with a caller-provided tokenizer backend
  pub fn with_tokenizer(settings: PrepSettings, layout: Layout, tokenizer: Box<dyn Tokenizer>) -> Self {
    let vocab = if settings.make_vocab {
      Some(VocabCounter::new())
    } else {
      None
    };
    Pipeline {
      settings,
      layout,
      tokenizer,
      vocab,
    }
  }

  /// Run every stage once, in order
  pub fn run(&mut self) -> Result<PrepReport> {
    self.layout.create_dirs()?;
    let (instances, tokenized_dir) = self.tokenize_stories()?;
    let filenames = vec![self.settings.filename.clone()];
    let (records, bytes) = self.write_to_bin(&tokenized_dir, &filenames)?;
    let vocab_entries = self.flush_vocab()?;
    Ok(PrepReport {
      instances: instances.len(),
      records,
      bytes,
      vocab_entries,
    })
  }

  /// Select the raw files matching the filename fragment and tokenize them.
  /// Returns the selected names and the directory holding their tokenized
  /// versions.
  pub fn tokenize_stories(&self) -> Result<(Vec<String>, PathBuf)> {
    let data_dir = &self.settings.data_dir;
    log::info!(
      "Preparing to tokenize {} to {}...",
      data_dir.display(),
      self.layout.tokenized_dir.display()
    );
    let instances = selector::select_instances(data_dir, &self.settings.filename)?;
    log::info!("{:?}", instances);
    let tokenized_dir = self.tokenizer.tokenize(data_dir, &instances)?;
    Ok((instances, tokenized_dir))
  }

  /// Write one record per filename to the binary file, counting tokens when a
  /// vocabulary was requested. Returns (records, bytes) written.
  pub fn write_to_bin(&mut self, tokenized_dir: &Path, filenames: &[String]) -> Result<(u64, u64)> {
    let bin_file = &self.layout.bin_file;
    let file = File::create(bin_file).map_err(io_at(bin_file))?;
    let mut writer = BufWriter::new(file);
    let (mut records, mut bytes) = (0, 0);

    for filename in filenames {
      log::info!("Making bin file for filename {}...", filename);
      let article_file = tagged_file(tokenized_dir, filename, &self.settings.article_tag);
      let summary_file = tagged_file(tokenized_dir, filename, &self.settings.summary_tag);
      let document = normalize::read_document(&article_file, &summary_file)?;

      let example = record::make_record(&document.article, &document.abstract_text);
      record::write_record(&mut writer, &example).map_err(|e| match e {
        PrepError::Stream(source) => PrepError::Io {
          path: bin_file.clone(),
          source,
        },
        other => other,
      })?;
      records += 1;
      bytes += (record::LENGTH_PREFIX_BYTES + example.len()) as u64;

      if let Some(ref mut vocab) = self.vocab {
        vocab.accumulate(&document.article, &document.abstract_text);
      }
    }
    writer.flush().map_err(io_at(bin_file))?;
    log::info!("Finished writing file {}", bin_file.display());
    Ok((records, bytes))
  }

  /// Write the vocabulary file, if one was requested, and drop the counter.
  /// Returns the number of entries written.
  pub fn flush_vocab(&mut self) -> Result<Option<usize>> {
    match self.vocab.take() {
      Some(vocab) => {
        log::info!("Writing vocab file...");
        let written = vocab.flush(&self.layout.vocab_file, self.settings.vocab_size)?;
        log::info!(
          "Finished writing vocab file ({} of {} distinct tokens)",
          written,
          vocab.count()
        );
        Ok(Some(written))
      },
      None => Ok(None),
    }
  }
}
