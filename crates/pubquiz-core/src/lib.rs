//! Core types for the pubquiz question bank.
//!
//! This crate does no I/O. It defines the canonical
//! [`TriviaRecord`](record::TriviaRecord), the in-memory [`Table`](table::Table)
//! every source is decoded into, the schema rules a table must satisfy before
//! it may be merged, the prize-ladder difficulty classifier, and the
//! [`RecordStore`](store::RecordStore) abstraction implemented by storage
//! backends.

pub mod error;
pub mod ladder;
pub mod record;
pub mod schema;
pub mod store;
pub mod table;

pub use error::{Error, Result};
pub use record::{Ordinal, RegionFlags, TriviaRecord};
pub use table::Table;
