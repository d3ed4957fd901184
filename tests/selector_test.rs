//! Tests for file selection and the tokenizer list file
use std::fs;

use datafiles::selector::*;
use datafiles::PrepError;
use tempfile::tempdir;

#[test]
fn selects_matching_names_in_order() {
  let dir = tempdir().unwrap();
  for name in &[
    "sample2.newsarticle.txt",
    "sample1..txt",
    "other.txt",
    "sample1.newsarticle.txt",
  ] {
    fs::write(dir.path().join(name), "text\n").unwrap();
  }
  fs::create_dir(dir.path().join("sample1_dir")).unwrap();
  fs::write(dir.path().join("sample1_dir").join("sample1.nested.txt"), "").unwrap();

  let selected = select_instances(dir.path(), "sample1").unwrap();
  assert_eq!(
    selected,
    vec!["sample1..txt", "sample1.newsarticle.txt", "sample1_dir"]
  );
}

#[test]
fn no_match_is_an_empty_selection() {
  let dir = tempdir().unwrap();
  fs::write(dir.path().join("unrelated.txt"), "").unwrap();
  assert!(select_instances(dir.path(), "sample1").unwrap().is_empty());
}

#[test]
fn missing_directory_is_an_io_error() {
  let dir = tempdir().unwrap();
  let missing = dir.path().join("absent");
  match select_instances(&missing, "sample1") {
    Err(PrepError::Io { .. }) => {},
    other => panic!("expected an I/O error, got {:?}", other),
  }
}

#[test]
fn mapping_file_has_one_tab_separated_line_per_entry() {
  let dir = tempdir().unwrap();
  let source_dir = dir.path().join("raw");
  let dest_dir = dir.path().join("tokenized_articles");
  let instances = vec!["a.txt".to_string(), "b.txt".to_string()];
  let entries = mapping_entries(&source_dir, &dest_dir, &instances);
  assert_eq!(entries[1].source, source_dir.join("b.txt"));
  assert_eq!(entries[1].destination, dest_dir.join("b.txt"));

  let mapping = dir.path().join("mapping.txt");
  write_mapping(&mapping, &entries).unwrap();
  let contents = fs::read_to_string(&mapping).unwrap();
  let expected = format!(
    "{} \t {}\n{} \t {}\n",
    source_dir.join("a.txt").display(),
    dest_dir.join("a.txt").display(),
    source_dir.join("b.txt").display(),
    dest_dir.join("b.txt").display()
  );
  assert_eq!(contents, expected);
}

#[test]
fn unwritable_mapping_file_is_an_io_error() {
  let dir = tempdir().unwrap();
  let mapping = dir.path().join("no_such_dir").join("mapping.txt");
  match write_mapping(&mapping, &[]) {
    Err(PrepError::Io { path, .. }) => assert_eq!(path, mapping),
    other => panic!("expected an I/O error, got {:?}", other),
  }
}
