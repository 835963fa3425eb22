//! Errors raised while turning a round code into a request.
//!
//! Sampling itself never fails; an unsatisfiable request yields a short
//! round instead.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
  #[error("malformed round code {code:?}: expected <category>-<count>[-<flags>]")]
  Malformed { code: String },

  #[error("a round needs at least one question")]
  ZeroCount,

  #[error("unknown category index {index} (catalogue has {available} entries)")]
  UnknownCategory { index: usize, available: usize },

  #[error("unknown round flag {0:?}")]
  UnknownFlag(char),
}

pub type Result<T, E = RoundError> = std::result::Result<T, E>;
