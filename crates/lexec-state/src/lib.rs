//! # lexec-state — Standing Derivation
//!
//! Derives the legal standing of a criminal-execution case from its
//! recorded events, decisions and incidents. Every function here is pure:
//! inputs are borrowed, results are fresh values, nothing is shared or
//! mutated, so the engine can be called from any number of request
//! handlers at once.
//!
//! ## Components
//!
//! - **Custody** (`custody.rs`): event timeline state machine. Is the
//!   subject held, or under some restriction?
//!
//! - **Execution** (`execution.rs`): definitive vs. provisional execution,
//!   from the trânsito em julgado dates and the custody finding.
//!
//! - **Conviction** (`conviction.rs`): which crimes and penalties are in
//!   force after the chain of appellate decisions.
//!
//! - **Remission** (`remission.rs`): running balance of credited remission
//!   days net of misconduct forfeitures.
//!
//! - **Status** (`status.rs`): canonical status line for display.
//!
//! - **Standing** (`standing.rs`): all of the above for one case.
//!
//! ## Ordering
//!
//! Dated inputs are always processed in ascending date order whatever the
//! caller's order, with same-day records kept in input order.

pub mod conviction;
pub mod custody;
pub mod execution;
pub mod remission;
pub mod standing;
pub mod status;

/// Text shown where a value is absent.
pub const PLACEHOLDER_DASH: &str = "—";

// ─── Custody re-exports ─────────────────────────────────────────────

pub use custody::{
    custody_trail, derive_custody_state, CustodyFinding, CustodyState, EventEffect, EventKind,
    ProcessEvent,
};

// ─── Execution re-exports ───────────────────────────────────────────

pub use execution::{
    classify_execution, is_definitive_conviction, is_provisional_execution, ExecutionKind,
    TransitDates,
};

// ─── Conviction re-exports ──────────────────────────────────────────

pub use conviction::{
    format_penalty, resolve_current_crimes, resolve_in_force, total_penalty, ConvictionLayer,
    Crime, CrimeSource, LayerKind, LayerStatus, Penalty, ResolvedConviction,
};

// ─── Remission re-exports ───────────────────────────────────────────

pub use remission::{
    compute_balance, compute_balance_with, replay, Incident, IncidentKind, LedgerOptions,
    LedgerStep, RemicaoStatus, RemissionError, RemissionLedger, ZeroDenominatorPolicy,
};

// ─── Status re-exports ──────────────────────────────────────────────

pub use status::{
    format_status, ExecRegime, ExecSituacao, ExecutionStatusInput, FormattedStatus, StatusMarkers,
};

// ─── Standing re-exports ────────────────────────────────────────────

pub use standing::{derive_standing, CaseRecords, CaseStanding};
