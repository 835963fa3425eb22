//! JSON export of a finished quiz, handed to slide and sheet generators.

use pubquiz_core::{Ordinal, TriviaRecord};
use serde::{Deserialize, Serialize};

use crate::{request::CategoryFilter, sampler::Round};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundKind {
  /// Uniform draw, multiple choice.
  Trivia,
  /// One question per difficulty band, easiest first.
  Ladder,
}

impl RoundKind {
  fn rules(self) -> &'static str {
    match self {
      Self::Trivia => "Pick the correct answer from the choices given.",
      Self::Ladder => "Questions get harder as the round goes on.",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDump {
  pub question:       String,
  pub correct_answer: String,
  pub wrong_answers:  Vec<String>,
  pub category:       String,
  pub difficulty:     Option<Ordinal>,
  pub uuid:           String,
}

impl From<&TriviaRecord> for QuestionDump {
  fn from(record: &TriviaRecord) -> Self {
    Self {
      question:       record.question.clone(),
      correct_answer: record.correct_answer.clone(),
      wrong_answers:  record.wrong_answers.iter().flatten().cloned().collect(),
      category:       record.display_category().to_string(),
      difficulty:     record.difficulty,
      uuid:           record.uuid.clone(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundDump {
  pub kind:      RoundKind,
  pub category:  String,
  pub rules:     String,
  pub questions: Vec<QuestionDump>,
}

impl RoundDump {
  pub fn new(round: &Round, kind: RoundKind) -> Self {
    let category = match &round.request.category {
      CategoryFilter::Any => crate::catalogue::ANY.to_string(),
      CategoryFilter::Named(name) => name.clone(),
    };
    Self {
      kind,
      category,
      rules: kind.rules().to_string(),
      questions: round.records.iter().map(QuestionDump::from).collect(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDump {
  pub title:  String,
  pub author: String,
  pub rounds: Vec<RoundDump>,
}

impl QuizDump {
  pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
    Self { title: title.into(), author: author.into(), rounds: Vec::new() }
  }

  pub fn push_round(&mut self, round: &Round, kind: RoundKind) {
    self.rounds.push(RoundDump::new(round, kind));
  }

  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string_pretty(self)
  }
}
