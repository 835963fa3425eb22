//! TSV encoder. Writes the header, then one line per record in header order;
//! null fields become empty cells.

use std::{borrow::Cow, io::Write};

use pubquiz_core::{Table, TriviaRecord, schema::column};

use crate::{DELIMITER, error::Result};

pub(crate) fn encode<W: Write>(table: &Table, writer: W) -> Result<()> {
  let mut out = csv::WriterBuilder::new()
    .delimiter(DELIMITER)
    .from_writer(writer);

  out.write_record(table.columns())?;
  for record in table {
    out.write_record(
      table
        .columns()
        .iter()
        .map(|name| cell(record, name).into_owned()),
    )?;
  }
  out.flush()?;
  Ok(())
}

fn text(value: &Option<String>) -> Cow<'_, str> {
  Cow::Borrowed(value.as_deref().unwrap_or(""))
}

fn flag(value: Option<bool>) -> Cow<'static, str> {
  Cow::Borrowed(match value {
    Some(true) => "true",
    Some(false) => "false",
    None => "",
  })
}

fn cell<'a>(record: &'a TriviaRecord, name: &str) -> Cow<'a, str> {
  match name {
    column::UUID => Cow::Borrowed(&record.uuid),
    column::QUESTION => Cow::Borrowed(&record.question),
    column::CORRECT_ANSWER => Cow::Borrowed(&record.correct_answer),
    column::WRONG_ANSWER_1 => text(&record.wrong_answers[0]),
    column::WRONG_ANSWER_2 => text(&record.wrong_answers[1]),
    column::WRONG_ANSWER_3 => text(&record.wrong_answers[2]),
    column::CATEGORY => Cow::Borrowed(&record.category),
    column::DIFFICULTY => {
      record.difficulty.map_or(Cow::Borrowed(""), |d| Cow::Owned(d.to_string()))
    }
    column::DOMAIN => text(&record.domain),
    column::NORMALIZED_CATEGORY => text(&record.normalized_category),
    column::IS_UK => flag(record.region.is_uk),
    column::IS_USA => flag(record.region.is_usa),
    other => Cow::Borrowed(record.extra.get(other).map_or("", String::as_str)),
  }
}
