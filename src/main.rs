//! Reads an article/summary pair of raw text files and writes it in bin format.
//!
//! Usage: make-datafiles --data-dir raw/ [--filename sample1] \
//!        [--article-tag newsarticle] [--summary-tag ""] [--makevocab]
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use env_logger::Env;

use datafiles::settings::{TokenizerChoice, MAPPING_FILE_NAME, VOCAB_SIZE};
use datafiles::{Pipeline, PrepSettings};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TokenizerArg {
  /// Stanford CoreNLP PTBTokenizer via java
  Ptb,
  /// input files are already tokenized, copy them as they are
  Passthrough,
}

#[derive(Debug, Parser)]
#[command(
  name = "make-datafiles",
  about = "Reads an article,summary from a text file and writes it in bin format."
)]
struct Args {
  /// The directory where raw text file resides.
  #[arg(long)]
  data_dir: PathBuf,
  /// The filename only at sample level.
  #[arg(long, default_value = "sample1")]
  filename: String,
  /// The tag present in filename corresponding to articles.
  #[arg(long, default_value = "newsarticle")]
  article_tag: String,
  /// The tag present in filename corresponding to the summaries.
  #[arg(long, default_value = "")]
  summary_tag: String,
  /// Also write a frequency-ranked vocabulary file.
  #[arg(long)]
  makevocab: bool,
  /// Maximum number of vocabulary entries.
  #[arg(long, default_value_t = VOCAB_SIZE)]
  vocab_size: usize,
  /// List file handed to the tokenizer.
  #[arg(long, default_value = MAPPING_FILE_NAME)]
  mapping_file: PathBuf,
  /// Tokenizer backend.
  #[arg(long, value_enum, default_value = "ptb")]
  tokenizer: TokenizerArg,
  /// Program launching the PTB tokenizer.
  #[arg(long, default_value = "java")]
  tokenizer_program: String,
  /// Argument for the tokenizer program, placed before the class; repeat for
  /// several, e.g. `--tokenizer-arg=-cp --tokenizer-arg=stanford-corenlp.jar`.
  #[arg(long = "tokenizer-arg", allow_hyphen_values = true)]
  tokenizer_args: Vec<String>,
  /// Java class of the PTB tokenizer.
  #[arg(long, default_value = "edu.stanford.nlp.process.PTBTokenizer")]
  tokenizer_class: String,
  /// Continue even if the tokenizer exits unsuccessfully.
  #[arg(long)]
  allow_tokenizer_failure: bool,
}

impl From<Args> for PrepSettings {
  fn from(args: Args) -> PrepSettings {
    PrepSettings {
      data_dir: args.data_dir,
      filename: args.filename,
      article_tag: args.article_tag,
      summary_tag: args.summary_tag,
      make_vocab: args.makevocab,
      vocab_size: args.vocab_size,
      mapping_file: args.mapping_file,
      tokenizer: match args.tokenizer {
        TokenizerArg::Ptb => TokenizerChoice::Ptb,
        TokenizerArg::Passthrough => TokenizerChoice::Passthrough,
      },
      tokenizer_program: args.tokenizer_program,
      tokenizer_args: args.tokenizer_args,
      tokenizer_class: args.tokenizer_class,
      allow_tokenizer_failure: args.allow_tokenizer_failure,
    }
  }
}

fn main() -> anyhow::Result<()> {
  env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
  let start = Instant::now();
  let settings = PrepSettings::from(Args::parse());
  let data_dir = settings.data_dir.clone();

  let mut pipeline = Pipeline::new(settings)
    .with_context(|| format!("could not lay out outputs for {}", data_dir.display()))?;
  let report = pipeline.run().context("data file preparation failed")?;

  log::info!("---");
  log::info!("Finished in {:?}s, gathered:", start.elapsed().as_secs());
  log::info!("{} tokenized files;", report.instances);
  log::info!("{} records ({} bytes);", report.records, report.bytes);
  if let Some(entries) = report.vocab_entries {
    log::info!("{} vocabulary entries.", entries);
  }
  Ok(())
}
