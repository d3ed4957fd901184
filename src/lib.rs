//! # Binary data files for abstractive summarization
//! Turns raw article/summary text pairs into the length-prefixed
//! `tf.train.Example` records consumed by summarization training pipelines,
//! and optionally into a frequency-ranked vocabulary.
//!
//! A run selects the raw files of one sample, has an external tokenizer write
//! their tokenized versions, normalizes the article and summary text, and
//! writes the pair as one record.

#![deny(
  missing_docs,
  trivial_casts,
  trivial_numeric_casts,
  unused_import_braces,
  unused_qualifications
)]

pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod selector;
pub mod settings;
pub mod tokenizer;
pub mod util;
pub mod vocab;

pub use crate::error::{PrepError, Result};
pub use crate::pipeline::{Pipeline, PrepReport};
pub use crate::settings::PrepSettings;
