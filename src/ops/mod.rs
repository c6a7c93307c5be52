//! High-level operations.
//!
//! This module provides the user-facing operations that orchestrate history
//! queries, rendering and storage.

pub mod generate;

pub use generate::{DayOutcome, GenerationReport, JournalGenerator};
