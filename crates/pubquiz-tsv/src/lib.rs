//! Tab-separated codec for pubquiz tables.
//!
//! Converts between TSV text and [`pubquiz_core::Table`]. Pure synchronous;
//! the only I/O is the pair of `*_path` convenience wrappers.
//!
//! # Quick start
//!
//! ```no_run
//! let tsv = "uuid\tquestion\tcorrect_answer\n\tWho wrote Hamlet?\tShakespeare\n";
//! let table = pubquiz_tsv::parse(tsv).unwrap();
//! assert_eq!(table.len(), 1);
//! println!("{}", pubquiz_tsv::serialize(&table).unwrap());
//! ```

mod decode;
mod encode;
pub mod error;

use std::{fs, path::Path};

pub use decode::{parse_difficulty, parse_flag, parse_prize};
pub use error::{Error, Result};
use pubquiz_core::Table;

/// Field delimiter.
pub const DELIMITER: u8 = b'\t';

// ─── Public API
// ───────────────────────────────────────────────────────────────

/// Decode a table from TSV text. The first line is the header.
///
/// Empty cells decode to null. Cells that fail lenient decoding (an
/// unrecognised difficulty, a non-boolean region flag) are nulled with a
/// warning rather than failing the table.
pub fn parse(input: &str) -> Result<Table> { decode::decode(input) }

/// Read and decode the table stored at `path`.
pub fn read_path(path: impl AsRef<Path>) -> Result<Table> {
  let input = fs::read_to_string(path)?;
  parse(&input)
}

/// Encode `table` as TSV text, columns in the table's header order.
pub fn serialize(table: &Table) -> Result<String> {
  let mut buf = Vec::new();
  encode::encode(table, &mut buf)?;
  // The csv writer only emits UTF-8 taken from `String`s.
  Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Encode `table` and write it to `path`, replacing any existing file.
pub fn write_path(table: &Table, path: impl AsRef<Path>) -> Result<()> {
  let file = fs::File::create(path)?;
  encode::encode(table, file)
}

#[cfg(test)]
mod roundtrip_tests {
  use pubquiz_core::{TriviaRecord, schema::column};

  use super::*;

  #[test]
  fn table_survives_serialize_then_parse() {
    let mut a = TriviaRecord::new("Capital of Peru?", "Lima", "Geography");
    a.wrong_answers = [Some("Quito".into()), Some("Bogota".into()), None];
    a.difficulty = Some(2);
    a.domain = Some("opentdb".into());
    a.region.is_usa = Some(false);
    a.normalized_category = Some("geography|travel".into());
    a.extra.insert("type".into(), "multiple".into());

    let mut b = TriviaRecord::new("Tab\there, \"quoted\"?", "yes", "Misc");
    b.extra.insert("url".into(), "https://example.org/q".into());

    let table = Table::from_records(vec![a, b]);
    let text = serialize(&table).unwrap();
    let back = parse(&text).unwrap();

    assert_eq!(back, table);
  }

  #[test]
  fn path_helpers_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bank.tsv");

    let table = Table::from_records(vec![TriviaRecord::new(
      "Largest ocean?",
      "Pacific",
      "Geography",
    )]);
    write_path(&table, &path).unwrap();
    let back = read_path(&path).unwrap();
    assert_eq!(back.columns()[0], column::UUID);
    assert_eq!(back, table);
  }
}
