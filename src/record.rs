//! Binary record format of the finished data files.
//!
//! A data file is a sequence of `[length][record]` units with no other
//! delimiter. `length` is a signed 64-bit little-endian integer counting the
//! record bytes. A record is a protobuf-encoded `tf.train.Example` holding two
//! single-valued bytes features, `article` and `abstract`:
//!
//! ```text
//! Example  { features: Features = 1 }
//! Features { feature: map<string, Feature> = 1 }
//! Feature  { bytes_list: BytesList = 1 }
//! BytesList{ value: repeated bytes = 1 }
//! ```
use std::convert::TryFrom;
use std::io::{self, Read, Write};

use crate::error::{PrepError, Result};
use crate::normalize::DocumentPair;

/// Width of the length prefix in front of every record
pub const LENGTH_PREFIX_BYTES: usize = 8;
/// Feature key of the article text
pub const ARTICLE_KEY: &str = "article";
/// Feature key of the abstract text
pub const ABSTRACT_KEY: &str = "abstract";

const WIRE_VARINT: u8 = 0;
const WIRE_FIXED64: u8 = 1;
const WIRE_LEN: u8 = 2;
const WIRE_FIXED32: u8 = 5;

// Every message in the Example schema keeps its payload in field 1; map
// entries add their value in field 2.
const FIELD_PAYLOAD: u32 = 1;
const FIELD_MAP_VALUE: u32 = 2;

fn put_varint(buf: &mut Vec<u8>, mut value: u64) {
  while value >= 0x80 {
    buf.push((value as u8 & 0x7f) | 0x80);
    value >>= 7;
  }
  buf.push(value as u8);
}

fn put_len_field(buf: &mut Vec<u8>, field: u32, payload: &[u8]) {
  put_varint(buf, u64::from(field << 3 | u32::from(WIRE_LEN)));
  put_varint(buf, payload.len() as u64);
  buf.extend_from_slice(payload);
}

/// Encode a `tf.train.Example` whose features are single-valued byte lists,
/// keeping the given feature order
pub fn encode_example(features: &[(&str, &[u8])]) -> Vec<u8> {
  let mut feature_map = Vec::new();
  for (key, value) in features {
    let mut bytes_list = Vec::with_capacity(value.len() + 4);
    put_len_field(&mut bytes_list, FIELD_PAYLOAD, value);
    let mut feature = Vec::with_capacity(bytes_list.len() + 4);
    put_len_field(&mut feature, FIELD_PAYLOAD, &bytes_list);
    let mut entry = Vec::with_capacity(key.len() + feature.len() + 8);
    put_len_field(&mut entry, FIELD_PAYLOAD, key.as_bytes());
    put_len_field(&mut entry, FIELD_MAP_VALUE, &feature);
    put_len_field(&mut feature_map, FIELD_PAYLOAD, &entry);
  }
  let mut example = Vec::with_capacity(feature_map.len() + 8);
  put_len_field(&mut example, FIELD_PAYLOAD, &feature_map);
  example
}

/// Serialize an (article, abstract) pair into record bytes
pub fn make_record(article: &str, abstract_text: &str) -> Vec<u8> {
  encode_example(&[
    (ARTICLE_KEY, article.as_bytes()),
    (ABSTRACT_KEY, abstract_text.as_bytes()),
  ])
}

/// A decoded protobuf field value
#[derive(Debug, PartialEq, Eq)]
enum WireValue<'a> {
  Varint(u64),
  Fixed,
  Bytes(&'a [u8]),
}

/// Walks the fields of one protobuf message
struct WireFields<'a> {
  buf: &'a [u8],
  pos: usize,
}

impl<'a> WireFields<'a> {
  fn new(buf: &'a [u8]) -> Self { WireFields { buf, pos: 0 } }

  fn varint(&mut self) -> Result<u64> {
    let mut value = 0u64;
    for shift in (0..64).step_by(7) {
      let byte = *self
        .buf
        .get(self.pos)
        .ok_or_else(|| PrepError::MalformedRecord("varint runs past the end".into()))?;
      self.pos += 1;
      value |= u64::from(byte & 0x7f) << shift;
      if byte & 0x80 == 0 {
        return Ok(value);
      }
    }
    Err(PrepError::MalformedRecord("varint longer than 10 bytes".into()))
  }

  fn take(&mut self, len: usize) -> Result<&'a [u8]> {
    let end = self
      .pos
      .checked_add(len)
      .filter(|end| *end <= self.buf.len())
      .ok_or_else(|| {
        PrepError::MalformedRecord(format!(
          "field of {} bytes at offset {} overruns a {} byte message",
          len,
          self.pos,
          self.buf.len()
        ))
      })?;
    let slice = &self.buf[self.pos..end];
    self.pos = end;
    Ok(slice)
  }

  fn next_field(&mut self) -> Result<Option<(u32, WireValue<'a>)>> {
    if self.pos >= self.buf.len() {
      return Ok(None);
    }
    let tag = self.varint()?;
    let field = u32::try_from(tag >> 3)
      .map_err(|_| PrepError::MalformedRecord(format!("field number {} out of range", tag >> 3)))?;
    let value = match (tag & 0x7) as u8 {
      WIRE_VARINT => WireValue::Varint(self.varint()?),
      WIRE_FIXED64 => {
        self.take(8)?;
        WireValue::Fixed
      },
      WIRE_LEN => {
        let len = self.varint()?;
        let len = usize::try_from(len).map_err(|_| {
          PrepError::MalformedRecord(format!("field length {} exceeds the address space", len))
        })?;
        WireValue::Bytes(self.take(len)?)
      },
      WIRE_FIXED32 => {
        self.take(4)?;
        WireValue::Fixed
      },
      other => {
        return Err(PrepError::MalformedRecord(format!(
          "unsupported wire type {} for field {}",
          other, field
        )))
      },
    };
    Ok(Some((field, value)))
  }
}

/// Collect the payloads of every length-delimited occurrence of `field`
fn len_fields(message: &[u8], field: u32) -> Result<Vec<&[u8]>> {
  let mut found = Vec::new();
  let mut fields = WireFields::new(message);
  while let Some((number, value)) = fields.next_field()? {
    if number != field {
      continue;
    }
    match value {
      WireValue::Bytes(payload) => found.push(payload),
      other => {
        return Err(PrepError::MalformedRecord(format!(
          "field {} is not length-delimited: {:?}",
          field, other
        )))
      },
    }
  }
  Ok(found)
}

/// Decode the bytes features of a `tf.train.Example` into (key, first value)
/// pairs, in encounter order. Features without a value decode to empty bytes.
pub fn decode_example(record: &[u8]) -> Result<Vec<(String, Vec<u8>)>> {
  let mut features = Vec::new();
  for feature_map in len_fields(record, FIELD_PAYLOAD)? {
    for entry in len_fields(feature_map, FIELD_PAYLOAD)? {
      let mut key = None;
      let mut feature = None;
      let mut fields = WireFields::new(entry);
      while let Some((number, value)) = fields.next_field()? {
        match (number, value) {
          (FIELD_PAYLOAD, WireValue::Bytes(bytes)) => key = Some(bytes),
          (FIELD_MAP_VALUE, WireValue::Bytes(bytes)) => feature = Some(bytes),
          _ => {},
        }
      }
      let key = String::from_utf8(key.unwrap_or_default().to_vec())
        .map_err(|_| PrepError::MalformedRecord("feature key is not UTF-8".into()))?;
      let lists = len_fields(feature.unwrap_or_default(), FIELD_PAYLOAD)?;
      let value = match (feature, lists.first()) {
        (_, Some(list)) => len_fields(list, FIELD_PAYLOAD)?
          .first()
          .map(|bytes| bytes.to_vec())
          .unwrap_or_default(),
        (None, None) => Vec::new(),
        (Some(_), None) => {
          log::debug!("-- skipping feature `{}`, not a bytes list", key);
          continue;
        },
      };
      features.push((key, value));
    }
  }
  Ok(features)
}

/// Recover the article and abstract texts from record bytes
pub fn decode_record(record: &[u8]) -> Result<DocumentPair> {
  let mut article = None;
  let mut abstract_text = None;
  for (key, value) in decode_example(record)? {
    let slot = match key.as_str() {
      ARTICLE_KEY => &mut article,
      ABSTRACT_KEY => &mut abstract_text,
      _ => continue,
    };
    let text = String::from_utf8(value)
      .map_err(|_| PrepError::MalformedRecord(format!("feature `{}` is not UTF-8", key)))?;
    *slot = Some(text);
  }
  Ok(DocumentPair {
    article: article.ok_or(PrepError::MissingField(ARTICLE_KEY))?,
    abstract_text: abstract_text.ok_or(PrepError::MissingField(ABSTRACT_KEY))?,
  })
}

/// Write one `[length][record]` unit to `stream`
pub fn write_record<W: Write>(stream: &mut W, record: &[u8]) -> Result<()> {
  let length = record.len() as i64;
  stream.write_all(&length.to_le_bytes())?;
  stream.write_all(record)?;
  Ok(())
}

/// Read one `[length][record]` unit from `stream`. `Ok(None)` marks a clean
/// end of stream; a stream ending inside a unit is an error.
pub fn read_record<R: Read>(stream: &mut R) -> Result<Option<Vec<u8>>> {
  let mut prefix = [0u8; LENGTH_PREFIX_BYTES];
  let mut filled = 0;
  while filled < LENGTH_PREFIX_BYTES {
    match stream.read(&mut prefix[filled..]) {
      Ok(0) => break,
      Ok(n) => filled += n,
      Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {},
      Err(e) => return Err(e.into()),
    }
  }
  if filled == 0 {
    return Ok(None);
  }
  if filled < LENGTH_PREFIX_BYTES {
    return Err(PrepError::TruncatedRecord {
      expected: LENGTH_PREFIX_BYTES as u64,
      found: filled as u64,
    });
  }
  let length = i64::from_le_bytes(prefix);
  if length < 0 {
    return Err(PrepError::MalformedRecord(format!(
      "negative record length {}",
      length
    )));
  }
  let expected = length as u64;
  let mut record = Vec::new();
  stream.by_ref().take(expected).read_to_end(&mut record)?;
  if (record.len() as u64) < expected {
    return Err(PrepError::TruncatedRecord {
      expected,
      found: record.len() as u64,
    });
  }
  Ok(Some(record))
}

/// Iterator over the raw records of a data file stream
pub struct RecordReader<R: Read> {
  stream: R,
  done: bool,
}

impl<R: Read> RecordReader<R> {
  /// Read records from `stream`
  pub fn new(stream: R) -> Self {
    RecordReader {
      stream,
      done: false,
    }
  }
}

impl<R: Read> Iterator for RecordReader<R> {
  type Item = Result<Vec<u8>>;
  fn next(&mut self) -> Option<Result<Vec<u8>>> {
    if self.done {
      return None;
    }
    match read_record(&mut self.stream) {
      Ok(Some(record)) => Some(Ok(record)),
      Ok(None) => {
        self.done = true;
        None
      },
      Err(e) => {
        self.done = true;
        Some(Err(e))
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn varint_encoding_matches_protobuf() {
    let mut buf = Vec::new();
    put_varint(&mut buf, 1);
    put_varint(&mut buf, 300);
    assert_eq!(buf, vec![0x01, 0xac, 0x02]);
    let mut fields = WireFields::new(&buf);
    assert_eq!(fields.varint().unwrap(), 1);
    assert_eq!(fields.varint().unwrap(), 300);
  }

  #[test]
  fn example_layout_is_nested_length_delimited() {
    let bytes = encode_example(&[("k", &b"v"[..])]);
    let expected = vec![
      0x0a, 0x0c, // Example.features
      0x0a, 0x0a, // Features.feature map entry
      0x0a, 0x01, b'k', // entry key
      0x12, 0x05, // entry value
      0x0a, 0x03, // Feature.bytes_list
      0x0a, 0x01, b'v', // BytesList.value
    ];
    assert_eq!(bytes, expected);
  }

  #[test]
  fn truncated_varint_is_rejected() {
    let mut fields = WireFields::new(&[0x80, 0x80]);
    assert!(matches!(fields.varint(), Err(PrepError::MalformedRecord(_))));
  }

  #[test]
  fn oversized_field_number_is_rejected() {
    // tag varint 2^35 | LEN: field number 2^32 does not fit a u32
    let mut bytes = Vec::new();
    put_varint(&mut bytes, 1u64 << 35 | u64::from(WIRE_LEN));
    bytes.push(0);
    let mut fields = WireFields::new(&bytes);
    assert!(matches!(fields.next_field(), Err(PrepError::MalformedRecord(_))));
  }

  #[test]
  fn huge_length_is_malformed_not_truncated() {
    // field 1, LEN, length u64::MAX: on 64-bit it overruns, on 32-bit it does
    // not fit usize; never a silently shortened slice
    let mut bytes = vec![0x0a];
    put_varint(&mut bytes, u64::MAX);
    bytes.extend_from_slice(b"abc");
    let mut fields = WireFields::new(&bytes);
    assert!(matches!(fields.next_field(), Err(PrepError::MalformedRecord(_))));
  }

  #[test]
  fn unknown_fields_are_skipped() {
    let mut bytes = make_record("a b", "<s> c . </s>");
    // field 7, varint 42 appended at the Example level
    bytes.extend_from_slice(&[0x38, 0x2a]);
    let pair = decode_record(&bytes).unwrap();
    assert_eq!(pair.article, "a b");
    assert_eq!(pair.abstract_text, "<s> c . </s>");
  }
}
