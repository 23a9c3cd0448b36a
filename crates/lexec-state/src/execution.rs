//! # Execution Classification
//!
//! Decides whether a case runs on definitive execution (the conviction is
//! final) or on provisional execution (the subject is restrained before the
//! conviction became final).
//!
//! ## Rules
//!
//! - The conviction is definitive when the whole case has a recorded
//!   trânsito em julgado, or when both the prosecution and the defense have
//!   theirs.
//! - Execution is provisional when the conviction is not definitive and the
//!   custody timeline shows custody or a restriction.
//! - A case that is neither definitive nor restrained is awaiting final
//!   judgment and has nothing to execute yet.

use serde::{Deserialize, Serialize};

use lexec_core::CalendarDate;

use crate::custody::CustodyFinding;

/// The three trânsito em julgado dates a case can carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitDates {
    /// Final for the whole case.
    #[serde(default)]
    pub transit_processo: Option<CalendarDate>,
    /// Final for the prosecution.
    #[serde(default)]
    pub transit_acusacao: Option<CalendarDate>,
    /// Final for the defense.
    #[serde(default)]
    pub transit_defesa: Option<CalendarDate>,
}

impl TransitDates {
    pub fn is_definitive(&self) -> bool {
        is_definitive_conviction(
            self.transit_processo,
            self.transit_acusacao,
            self.transit_defesa,
        )
    }

    /// The day the conviction became final, if it has.
    ///
    /// The case-wide date wins. Otherwise the conviction is final once the
    /// second party's appeal window closed, i.e. on the later party date.
    pub fn final_judgment_date(&self) -> Option<CalendarDate> {
        match (self.transit_processo, self.transit_acusacao, self.transit_defesa) {
            (Some(processo), _, _) => Some(processo),
            (None, Some(acusacao), Some(defesa)) => Some(acusacao.max(defesa)),
            _ => None,
        }
    }
}

/// How a case is being executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionKind {
    /// The conviction is final.
    Definitive,
    /// The subject is restrained before the conviction became final.
    Provisional,
    /// Not final and not restrained.
    AwaitingFinalJudgment,
}

impl std::fmt::Display for ExecutionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Definitive => "DEFINITIVE",
            Self::Provisional => "PROVISIONAL",
            Self::AwaitingFinalJudgment => "AWAITING_FINAL_JUDGMENT",
        };
        f.write_str(s)
    }
}

/// Whether the conviction is final.
pub fn is_definitive_conviction(
    transit_processo: Option<CalendarDate>,
    transit_acusacao: Option<CalendarDate>,
    transit_defesa: Option<CalendarDate>,
) -> bool {
    transit_processo.is_some() || (transit_acusacao.is_some() && transit_defesa.is_some())
}

/// Whether the case must be flagged as running on provisional execution.
pub fn is_provisional_execution(definitive: bool, custody: &CustodyFinding) -> bool {
    !definitive && custody.has_custody_or_restriction()
}

/// Classify a case from its transit dates and custody finding.
pub fn classify_execution(transit: &TransitDates, custody: &CustodyFinding) -> ExecutionKind {
    let definitive = transit.is_definitive();
    if definitive {
        ExecutionKind::Definitive
    } else if is_provisional_execution(definitive, custody) {
        ExecutionKind::Provisional
    } else {
        ExecutionKind::AwaitingFinalJudgment
    }
}
