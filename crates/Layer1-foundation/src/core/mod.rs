//! Core Module - 레코드 모델
//!
//! - `types.rs`: Record, Column, FieldValue, RecordPatch, UpdateOutcome

pub mod types;

pub use types::{Column, FieldValue, Record, RecordPatch, UpdateFailure, UpdateOutcome};
