//! # Case Standing
//!
//! Runs every derivation over one case's records and gathers the results
//! into a single report value. The components stay independent; this module
//! only wires the custody finding into the execution classifier.

use serde::{Deserialize, Serialize};

use lexec_core::{CaseId, LexecError};

use crate::conviction::{resolve_in_force, total_penalty, ConvictionLayer, Crime, Penalty, ResolvedConviction};
use crate::custody::{derive_custody_state, CustodyFinding, ProcessEvent};
use crate::execution::{classify_execution, ExecutionKind, TransitDates};
use crate::remission::{compute_balance_with, Incident, LedgerOptions, RemissionLedger};
use crate::status::{format_status, ExecutionStatusInput, FormattedStatus};

/// One case's validated records, as supplied by the record store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaseRecords {
    pub case_id: Option<CaseId>,
    pub events: Vec<ProcessEvent>,
    /// Crimes of the original sentence.
    pub base_crimes: Vec<Crime>,
    /// Review decisions in recorded order.
    pub layers: Vec<ConvictionLayer>,
    pub incidents: Vec<Incident>,
    #[serde(flatten)]
    pub transit: TransitDates,
    pub status: ExecutionStatusInput,
}

/// Everything derived for one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStanding {
    pub case_id: Option<CaseId>,
    pub custody: CustodyFinding,
    pub definitive: bool,
    pub provisional: bool,
    pub execution: ExecutionKind,
    pub conviction: ResolvedConviction,
    pub total_penalty: Penalty,
    pub remission: RemissionLedger,
    pub status: FormattedStatus,
}

/// Derive the standing of one case.
///
/// # Errors
///
/// Returns [`LexecError::Derivation`] when the remission ledger rejects an
/// incident (see [`crate::remission::ZeroDenominatorPolicy`]).
pub fn derive_standing(
    records: &CaseRecords,
    options: &LedgerOptions,
) -> Result<CaseStanding, LexecError> {
    let custody = derive_custody_state(&records.events);
    let execution = classify_execution(&records.transit, &custody);
    let conviction = resolve_in_force(&records.base_crimes, &records.layers);
    let remission = compute_balance_with(&records.incidents, options)?;

    tracing::debug!(
        case = records.case_id.as_ref().map(CaseId::as_str).unwrap_or("-"),
        %execution,
        in_custody = custody.in_custody,
        remission_balance = remission.balance,
        "case standing derived"
    );

    Ok(CaseStanding {
        case_id: records.case_id.clone(),
        custody,
        definitive: execution == ExecutionKind::Definitive,
        provisional: execution == ExecutionKind::Provisional,
        execution,
        total_penalty: total_penalty(&conviction.crimes),
        conviction,
        remission,
        status: format_status(&records.status),
    })
}
