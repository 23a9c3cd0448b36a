//! # lexec-cli — Standing Engine Command-Line Interface
//!
//! Drives the standing engine from case files exported by the record
//! store. The engine itself performs no I/O; this crate reads files,
//! loads configuration and prints results.
//!
//! ## Subcommands
//!
//! - `standing` — full standing of one case (JSON or text)
//! - `remission` — remission ledger totals, optionally step by step
//! - `status` — status line for a regime/situation pair
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to `lexec-state`; no derivation logic here.

pub mod config;
pub mod input;
pub mod remission;
pub mod standing;
pub mod status;

pub use config::EngineConfig;
