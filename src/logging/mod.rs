//! Structured logging setup.

mod format;

pub use format::{ImportanceEvent, StructuredLogger};
