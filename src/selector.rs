//! Selects the raw text files of a run and writes the list file handed to the
//! external tokenizer
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{io_at, PrepError, Result};

/// One selected file: where it is read from and where its tokenized copy goes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappingEntry {
  /// raw text file
  pub source: PathBuf,
  /// tokenized text file
  pub destination: PathBuf,
}

/// Names of the entries of `dir` (not recursive) containing `fragment`,
/// in file name order. Every kind of entry is listed, as `ls` would.
pub fn select_instances(dir: &Path, fragment: &str) -> Result<Vec<String>> {
  let mut instances = Vec::new();
  for each in WalkDir::new(dir)
    .min_depth(1)
    .max_depth(1)
    .sort_by_file_name()
  {
    let entry = each.map_err(|err| walk_error(dir, err))?;
    if let Some(name) = entry.file_name().to_str() {
      if name.contains(fragment) {
        instances.push(name.to_owned());
      }
    } else {
      log::warn!(
        "-- skipping non-UTF-8 file name {:?}",
        entry.file_name()
      );
    }
  }
  Ok(instances)
}

fn walk_error(dir: &Path, err: walkdir::Error) -> PrepError {
  let path = err.path().unwrap_or(dir).to_path_buf();
  let message = err.to_string();
  let source = err
    .into_io_error()
    .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, message));
  PrepError::Io { path, source }
}

/// Pair each instance in `source_dir` with its destination in `dest_dir`
pub fn mapping_entries(source_dir: &Path, dest_dir: &Path, instances: &[String]) -> Vec<MappingEntry> {
  instances
    .iter()
    .map(|instance| MappingEntry {
      source: source_dir.join(instance),
      destination: dest_dir.join(instance),
    })
    .collect()
}

/// Write the tokenizer list file, one `source \t destination` line per entry
pub fn write_mapping(mapping_file: &Path, entries: &[MappingEntry]) -> Result<()> {
  let file = File::create(mapping_file).map_err(io_at(mapping_file))?;
  let mut writer = BufWriter::new(file);
  for entry in entries {
    writeln!(
      writer,
      "{} \t {}",
      entry.source.display(),
      entry.destination.display()
    )
    .map_err(io_at(mapping_file))?;
  }
  writer.flush().map_err(io_at(mapping_file))
}
