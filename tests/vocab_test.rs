//! Tests for vocabulary counting and the vocab file
use std::fs;

use datafiles::vocab::VocabCounter;
use tempfile::tempdir;

#[test]
fn markers_and_empty_tokens_are_not_counted() {
  let mut vocab = VocabCounter::new();
  vocab.accumulate("the  cat sat . ", " <s> the cat . </s>  <s>  </s>");
  assert_eq!(vocab.get("<s>"), 0);
  assert_eq!(vocab.get("</s>"), 0);
  assert_eq!(vocab.get(""), 0);
  assert_eq!(vocab.get("the"), 2);
  assert_eq!(vocab.get("cat"), 2);
  assert_eq!(vocab.get("."), 2);
  assert_eq!(vocab.get("sat"), 1);
  assert_eq!(vocab.count(), 4);
}

#[test]
fn markers_in_the_article_are_ordinary_tokens() {
  let mut vocab = VocabCounter::new();
  vocab.accumulate("<s> in an article", "");
  assert_eq!(vocab.get("<s>"), 1);
}

#[test]
fn counts_accumulate_across_documents() {
  let mut vocab = VocabCounter::new();
  assert!(vocab.is_empty());
  vocab.accumulate("a b", "<s> a . </s>");
  vocab.accumulate("b a a", "");
  assert_eq!(vocab.get("a"), 4);
  assert_eq!(vocab.get("b"), 2);
  assert_eq!(vocab.get("."), 1);
}

#[test]
fn most_common_ranks_by_count_then_first_appearance() {
  let mut vocab = VocabCounter::new();
  vocab.accumulate("z y x y x w", "");
  let ranked = vocab.most_common(10);
  assert_eq!(ranked, vec![("y", 2), ("x", 2), ("z", 1), ("w", 1)]);
  assert_eq!(vocab.most_common(1), vec![("y", 2)]);
  assert!(vocab.most_common(0).is_empty());
}

#[test]
fn flush_caps_and_orders_the_vocab_file() {
  let dir = tempdir().unwrap();
  let path = dir.path().join("vocab");
  let mut vocab = VocabCounter::new();
  vocab.accumulate("c b a b a a d", "<s> a d . </s>");

  let written = vocab.flush(&path, 3).unwrap();
  assert_eq!(written, 3);
  let contents = fs::read_to_string(&path).unwrap();
  let lines: Vec<&str> = contents.lines().collect();
  assert_eq!(lines, vec!["a 4", "b 2", "d 2"]);

  let counts: Vec<u64> = lines
    .iter()
    .map(|line| line.rsplit(' ').next().unwrap().parse().unwrap())
    .collect();
  assert!(counts.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[test]
fn flush_of_small_vocab_writes_everything() {
  let dir = tempdir().unwrap();
  let path = dir.path().join("vocab");
  let mut vocab = VocabCounter::new();
  vocab.accumulate("only two", "");
  assert_eq!(vocab.flush(&path, 200_000).unwrap(), 2);
  assert_eq!(fs::read_to_string(&path).unwrap(), "only 1\ntwo 1\n");
}
