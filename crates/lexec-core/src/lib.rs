//! # lexec-core — Foundational Types for the Standing Engine
//!
//! This crate defines the primitives every other engine crate builds on.
//! It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Calendar days, not instants.** Every legal record is dated with
//!    [`CalendarDate`], a `chrono::NaiveDate` newtype with a strict
//!    `YYYY-MM-DD` wire form. Chronological processing is defined over this
//!    type alone.
//!
//! 2. **Newtype identifiers.** `CaseId` and `IncidentId` are distinct types.
//!    No bare strings for identifiers.
//!
//! 3. **One error hierarchy.** [`LexecError`] is the boundary error; component
//!    errors convert into it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `lexec-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement `Serialize`/`Deserialize`.

pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::{DateError, LexecError};
pub use identity::{CaseId, IncidentId};
pub use temporal::CalendarDate;
