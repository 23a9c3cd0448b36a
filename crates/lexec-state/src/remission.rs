//! # Remission Ledger
//!
//! Keeps the running balance of remission days (remição) credited to a
//! subject, net of the forfeitures triggered by approved serious-misconduct
//! rulings (homologação de falta grave).
//!
//! ## Processing
//!
//! Only `REMICAO` and `HOMOLOGACAO_FALTA_GRAVE` incidents touch the ledger.
//! They are applied in ascending reference-date order; same-day incidents
//! keep their input order.
//!
//! | incident | effect |
//! |---|---|
//! | `REMICAO`, approved (or no status) | balance += days, approved += days |
//! | `REMICAO`, not approved | unapproved += days; balance += days only when unapproved grants count |
//! | `HOMOLOGACAO_FALTA_GRAVE` | forfeit ⌊balance × num / den⌋, never more than the balance |
//!
//! ## Legal Defaults
//!
//! - A grant with no status is approved.
//! - A grant with no day count credits zero days.
//! - A forfeiture with no denominator uses 1; with no numerator, 0.
//!
//! ## Rounding
//!
//! Forfeitures round down, in favor of the convicted subject. The product
//! is computed in integer arithmetic, so the floor is exact.
//!
//! ## Invariants
//!
//! - The balance is never negative (it is a `u64` and every subtraction is
//!   capped at the current balance).
//! - A forfeiture never removes more days than the ledger holds.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lexec_core::{CalendarDate, IncidentId, LexecError};

// ─── Incidents ───────────────────────────────────────────────────────

/// The kind of a recorded execution incident.
///
/// The record store keeps other incident kinds too; they deserialize to
/// [`IncidentKind::Outro`] and are skipped by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum IncidentKind {
    /// A remission grant.
    Remicao,
    /// Judicial approval of a serious-misconduct finding.
    HomologacaoFaltaGrave,
    Outro,
}

impl IncidentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remicao => "REMICAO",
            Self::HomologacaoFaltaGrave => "HOMOLOGACAO_FALTA_GRAVE",
            Self::Outro => "OUTRO",
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "REMICAO" => Self::Remicao,
            "HOMOLOGACAO_FALTA_GRAVE" => Self::HomologacaoFaltaGrave,
            _ => Self::Outro,
        }
    }

    /// Whether incidents of this kind move the ledger.
    pub fn is_ledger_entry(&self) -> bool {
        matches!(self, Self::Remicao | Self::HomologacaoFaltaGrave)
    }
}

impl From<String> for IncidentKind {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<IncidentKind> for &'static str {
    fn from(kind: IncidentKind) -> Self {
        kind.as_str()
    }
}

impl std::fmt::Display for IncidentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the court approved a remission grant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemicaoStatus {
    #[default]
    Homologada,
    NaoHomologada,
}

/// A dated incident of a case's execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: IncidentId,
    #[serde(rename = "type")]
    pub kind: IncidentKind,
    pub reference_date: CalendarDate,
    #[serde(default)]
    pub remicao_dias: Option<u32>,
    #[serde(default)]
    pub remicao_status: Option<RemicaoStatus>,
    #[serde(default)]
    pub frac_num: Option<u32>,
    #[serde(default)]
    pub frac_den: Option<u32>,
}

impl Incident {
    /// A remission grant of `days` days.
    pub fn remicao(
        id: impl Into<String>,
        reference_date: CalendarDate,
        days: u32,
        status: Option<RemicaoStatus>,
    ) -> Self {
        Self {
            id: IncidentId::new(id),
            kind: IncidentKind::Remicao,
            reference_date,
            remicao_dias: Some(days),
            remicao_status: status,
            frac_num: None,
            frac_den: None,
        }
    }

    /// A misconduct ruling forfeiting `num/den` of the balance.
    pub fn falta_grave(
        id: impl Into<String>,
        reference_date: CalendarDate,
        num: u32,
        den: Option<u32>,
    ) -> Self {
        Self {
            id: IncidentId::new(id),
            kind: IncidentKind::HomologacaoFaltaGrave,
            reference_date,
            remicao_dias: None,
            remicao_status: None,
            frac_num: Some(num),
            frac_den: den,
        }
    }
}

// ─── Options ─────────────────────────────────────────────────────────

/// What a forfeiture with a zero denominator does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroDenominatorPolicy {
    /// Fail the computation with [`RemissionError::ZeroDenominator`].
    #[default]
    Reject,
    /// Forfeit nothing.
    NoForfeiture,
    /// Forfeit the whole balance.
    FullForfeiture,
}

/// Ledger options supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerOptions {
    /// Credit grants the court has not approved.
    pub include_unapproved: bool,
    pub zero_denominator: ZeroDenominatorPolicy,
}

impl LedgerOptions {
    pub fn including_unapproved(include_unapproved: bool) -> Self {
        Self {
            include_unapproved,
            ..Self::default()
        }
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors raised while applying incidents to the ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemissionError {
    /// A forfeiture fraction has denominator zero and the policy rejects it.
    #[error("incident {incident_id} ({reference_date}) has a forfeiture fraction with denominator 0")]
    ZeroDenominator {
        incident_id: IncidentId,
        reference_date: CalendarDate,
    },
}

impl From<RemissionError> for LexecError {
    fn from(err: RemissionError) -> Self {
        LexecError::Derivation(err.to_string())
    }
}

// ─── Ledger ──────────────────────────────────────────────────────────

/// The ledger totals after some prefix of the incident sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemissionLedger {
    /// Days currently credited.
    pub balance: u64,
    /// Days granted by approved remissions.
    pub total_approved: u64,
    /// Days granted by remissions not (yet) approved.
    pub total_unapproved: u64,
    /// Days removed by misconduct forfeitures.
    pub total_forfeited: u64,
}

/// One applied incident, for replay and audit views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerStep {
    pub incident_id: IncidentId,
    pub kind: IncidentKind,
    pub reference_date: CalendarDate,
    pub balance_before: u64,
    pub balance_after: u64,
    /// Days forfeited by this incident (0 for grants).
    pub forfeited: u64,
}

impl RemissionLedger {
    /// Apply one incident and return the resulting ledger.
    ///
    /// Incidents that are not ledger entries leave the ledger unchanged.
    pub fn apply(&self, incident: &Incident, options: &LedgerOptions) -> Result<Self, RemissionError> {
        let mut next = *self;
        match incident.kind {
            IncidentKind::Remicao => {
                let days = u64::from(incident.remicao_dias.unwrap_or(0));
                match incident.remicao_status.unwrap_or_default() {
                    RemicaoStatus::Homologada => {
                        next.balance = next.balance.saturating_add(days);
                        next.total_approved = next.total_approved.saturating_add(days);
                    }
                    RemicaoStatus::NaoHomologada => {
                        next.total_unapproved = next.total_unapproved.saturating_add(days);
                        if options.include_unapproved {
                            next.balance = next.balance.saturating_add(days);
                        }
                    }
                }
            }
            IncidentKind::HomologacaoFaltaGrave => {
                let effective = self.forfeiture(incident, options)?;
                next.balance -= effective;
                next.total_forfeited = next.total_forfeited.saturating_add(effective);
                tracing::debug!(
                    incident = %incident.id,
                    date = %incident.reference_date,
                    forfeited = effective,
                    balance = next.balance,
                    "remission forfeiture applied"
                );
            }
            IncidentKind::Outro => {}
        }
        Ok(next)
    }

    /// Days a misconduct ruling removes from this ledger, capped at the
    /// balance.
    fn forfeiture(&self, incident: &Incident, options: &LedgerOptions) -> Result<u64, RemissionError> {
        let num = u128::from(incident.frac_num.unwrap_or(0));
        let den = u128::from(incident.frac_den.unwrap_or(1));
        let balance = u128::from(self.balance);

        let raw = if den == 0 {
            tracing::warn!(
                incident = %incident.id,
                policy = ?options.zero_denominator,
                "forfeiture fraction has denominator 0"
            );
            match options.zero_denominator {
                ZeroDenominatorPolicy::Reject => {
                    return Err(RemissionError::ZeroDenominator {
                        incident_id: incident.id.clone(),
                        reference_date: incident.reference_date,
                    })
                }
                ZeroDenominatorPolicy::NoForfeiture => 0,
                ZeroDenominatorPolicy::FullForfeiture => balance,
            }
        } else {
            balance * num / den
        };

        // The cap keeps the result within u64.
        Ok(raw.min(balance) as u64)
    }
}

/// Ledger entries in processing order: ledger kinds only, ascending by
/// reference date, input order on ties.
fn chronological(incidents: &[Incident]) -> Vec<&Incident> {
    let mut ordered: Vec<&Incident> = incidents
        .iter()
        .filter(|incident| incident.kind.is_ledger_entry())
        .collect();
    // sort_by_key is stable.
    ordered.sort_by_key(|incident| incident.reference_date);
    ordered
}

/// Compute the ledger totals with the given options.
pub fn compute_balance_with(
    incidents: &[Incident],
    options: &LedgerOptions,
) -> Result<RemissionLedger, RemissionError> {
    chronological(incidents)
        .into_iter()
        .try_fold(RemissionLedger::default(), |ledger, incident| {
            ledger.apply(incident, options)
        })
}

/// Compute the ledger totals, rejecting zero-denominator forfeitures.
pub fn compute_balance(
    incidents: &[Incident],
    include_unapproved: bool,
) -> Result<RemissionLedger, RemissionError> {
    compute_balance_with(incidents, &LedgerOptions::including_unapproved(include_unapproved))
}

/// Apply the incidents one by one, recording every step.
pub fn replay(incidents: &[Incident], options: &LedgerOptions) -> Result<Vec<LedgerStep>, RemissionError> {
    let mut ledger = RemissionLedger::default();
    let mut steps = Vec::new();
    for incident in chronological(incidents) {
        let next = ledger.apply(incident, options)?;
        steps.push(LedgerStep {
            incident_id: incident.id.clone(),
            kind: incident.kind,
            reference_date: incident.reference_date,
            balance_before: ledger.balance,
            balance_after: next.balance,
            forfeited: next.total_forfeited - ledger.total_forfeited,
        });
        ledger = next;
    }
    Ok(steps)
}

// ─── Tests ───────────────────────────────────────────────────────────


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_status() -> impl Strategy<Value = Option<RemicaoStatus>> {
        proptest::option::of(prop_oneof![
            Just(RemicaoStatus::Homologada),
            Just(RemicaoStatus::NaoHomologada),
        ])
    }

    /// Incidents on distinct, increasing dates three days apart.
    fn arb_history() -> impl Strategy<Value = Vec<Incident>> {
        let entry = (
            any::<bool>(),
            0u32..200,
            arb_status(),
            0u32..5,
            proptest::option::of(1u32..6),
        );
        prop::collection::vec(entry, 0..24).prop_map(|entries| {
            let start = CalendarDate::from_ymd(2020, 1, 1).unwrap();
            entries
                .into_iter()
                .enumerate()
                .map(|(i, (grant, days, status, num, den))| {
                    let date = start.checked_add_days(i as u64 * 3).unwrap();
                    if grant {
                        Incident::remicao(format!("r{i}"), date, days, status)
                    } else {
                        Incident::falta_grave(format!("f{i}"), date, num, den)
                    }
                })
                .collect()
        })
    }

    /// A history paired with a permutation of itself.
    fn arb_history_and_shuffle() -> impl Strategy<Value = (Vec<Incident>, Vec<Incident>)> {
        arb_history().prop_flat_map(|history| (Just(history.clone()), Just(history).prop_shuffle()))
    }

    proptest! {
        /// No forfeiture exceeds the balance it is applied to, and the
        /// totals always reconcile.
        #[test]
        fn steps_never_overdraw(history in arb_history(), include in any::<bool>()) {
            let options = LedgerOptions::including_unapproved(include);
            let steps = replay(&history, &options).unwrap();
            for step in &steps {
                prop_assert!(step.forfeited <= step.balance_before);
                if step.kind == IncidentKind::HomologacaoFaltaGrave {
                    prop_assert_eq!(step.balance_after, step.balance_before - step.forfeited);
                } else {
                    prop_assert!(step.balance_after >= step.balance_before);
                }
            }
            let ledger = compute_balance_with(&history, &options).unwrap();
            let credited = ledger.total_approved
                + if include { ledger.total_unapproved } else { 0 };
            prop_assert_eq!(ledger.balance + ledger.total_forfeited, credited);
        }

        /// Shuffling inputs with distinct dates does not change the result.
        #[test]
        fn input_order_is_irrelevant(
            (history, shuffled) in arb_history_and_shuffle(),
            include in any::<bool>(),
        ) {
            prop_assert_eq!(
                compute_balance(&history, include).unwrap(),
                compute_balance(&shuffled, include).unwrap()
            );
        }
    }
}
