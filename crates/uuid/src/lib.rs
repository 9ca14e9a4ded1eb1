//! Record identifier utilities.
//!
//! Every record the ward keeps (assessments, restock requests, discharge summaries) is
//! identified by a *canonical* UUID representation: **32 lowercase hexadecimal characters**
//! (no hyphens).
//!
//! This crate provides:
//! - [`RecordId`], a random identifier that always displays in canonical form.
//! - [`TimestampId`], a time-prefixed identifier whose textual order matches creation order,
//!   and [`TimestampIdGenerator`] which hands out strictly increasing ones.
//!
//! ## Canonical UUID form
//! - Length: 32
//! - Characters: `0-9` and `a-f` only
//! - Example: `550e8400e29b41d4a716446655440000`

mod service;

// Re-export public types
pub use service::{RecordId, TimestampId, TimestampIdGenerator};
