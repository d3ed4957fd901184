//! Print the article and abstract of every record in a finished `.bin` file.
//!
//! Usage: read-datafiles finished_files/test.bin [--limit 10]
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;

use datafiles::record::{decode_record, RecordReader};

#[derive(Debug, Parser)]
#[command(name = "read-datafiles", about = "Dump the records of a length-prefixed bin file")]
struct Args {
  /// The bin file to read.
  bin_file: PathBuf,
  /// Stop after this many records.
  #[arg(long)]
  limit: Option<usize>,
}

fn main() -> anyhow::Result<()> {
  env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
  let args = Args::parse();
  let file = File::open(&args.bin_file)
    .with_context(|| format!("open {}", args.bin_file.display()))?;

  let mut shown = 0;
  for (index, each) in RecordReader::new(BufReader::new(file)).enumerate() {
    if args.limit.map_or(false, |limit| shown >= limit) {
      break;
    }
    let bytes = each.with_context(|| format!("read record {}", index))?;
    let pair = decode_record(&bytes).with_context(|| format!("decode record {}", index))?;
    println!("== record {} ({} bytes)", index, bytes.len());
    println!("article: {}", pair.article);
    println!("abstract: {}", pair.abstract_text);
    shown += 1;
  }
  log::info!("{} records read from {}", shown, args.bin_file.display());
  Ok(())
}
