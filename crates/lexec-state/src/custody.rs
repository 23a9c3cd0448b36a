//! # Custody Timeline
//!
//! Derives, from a case's custody and precautionary-measure events, whether
//! the subject is presently in custody and whether any restrictive measure
//! has been imposed.
//!
//! ## State Machine
//!
//! ```text
//!                 PRISAO_* / RECAPTURA
//!   ┌────────┐  ─────────────────────────▶  ┌──────────────────────┐
//!   │  Free  │                              │ Custody (restricted) │
//!   └────────┘  ◀─────────────────────────  └──────────────────────┘
//!       │        SOLTURA_ALVARA / LIBERDADE_*          │
//!       │                                              │ LIBERDADE_COM_CAUTELAR
//!       │ CAUTELAR_INICIO / cautelar types             ▼
//!       └──────────────────────────────────▶  ┌──────────────────────┐
//!                                             │ Free (restricted)    │
//!                                             └──────────────────────┘
//! ```
//!
//! The restriction flag is sticky: once any arrest, conditional release or
//! cautelary measure appears in the timeline it is never cleared. Releases
//! only close custody.
//!
//! ## Design
//!
//! Each [`EventKind`] maps to exactly one [`EventEffect`] through an
//! exhaustive `match`, so adding a kind forces its transition to be decided.
//! The walk is a fold over the `Copy` value [`CustodyState`]; every step
//! returns a fresh state, and [`custody_trail`] exposes the intermediate
//! states for inspection.

use serde::{Deserialize, Serialize};

use lexec_core::CalendarDate;

// ─── Event Kinds ─────────────────────────────────────────────────────

/// The kind of a recorded custody or precautionary-measure event.
///
/// Unknown tags deserialize to [`EventKind::Outro`], which is a no-op in
/// the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum EventKind {
    /// Arrest in the act (prisão em flagrante).
    PrisaoFlagrante,
    /// Pre-trial detention.
    PrisaoPreventiva,
    /// Temporary detention during investigation.
    PrisaoTemporaria,
    /// Arrest to begin serving the sentence.
    PrisaoTjInicioCumprimento,
    /// Release by court order (alvará de soltura).
    SolturaAlvara,
    /// Release with no precautionary measure.
    LiberdadeSemCautelar,
    /// Release subject to precautionary measures.
    LiberdadeComCautelar,
    /// Provisional release.
    LiberdadeProvisoria,
    /// A precautionary measure starts.
    CautelarInicio,
    /// A precautionary measure ends.
    CautelarFim,
    /// Escape.
    Fuga,
    /// Recapture after escape.
    Recaptura,
    /// Anything else.
    Outro,
}

/// How an event moves the custody state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventEffect {
    /// Opens custody and marks the subject as restricted.
    Detain,
    /// Closes custody. Restriction history is kept.
    Release,
    /// Closes custody and marks the subject as restricted.
    ReleaseRestricted,
    /// Marks the subject as restricted without touching custody.
    Restrict,
    /// No transition.
    NoChange,
}

impl EventKind {
    /// All kinds, in declaration order.
    pub const ALL: [EventKind; 13] = [
        Self::PrisaoFlagrante,
        Self::PrisaoPreventiva,
        Self::PrisaoTemporaria,
        Self::PrisaoTjInicioCumprimento,
        Self::SolturaAlvara,
        Self::LiberdadeSemCautelar,
        Self::LiberdadeComCautelar,
        Self::LiberdadeProvisoria,
        Self::CautelarInicio,
        Self::CautelarFim,
        Self::Fuga,
        Self::Recaptura,
        Self::Outro,
    ];

    /// The transition this kind applies.
    ///
    /// `Fuga` leaves the state untouched. Whether an escape should close
    /// custody is still an open product question.
    pub fn effect(&self) -> EventEffect {
        match self {
            Self::PrisaoFlagrante
            | Self::PrisaoPreventiva
            | Self::PrisaoTemporaria
            | Self::PrisaoTjInicioCumprimento
            | Self::Recaptura => EventEffect::Detain,
            Self::SolturaAlvara | Self::LiberdadeSemCautelar | Self::LiberdadeProvisoria => {
                EventEffect::Release
            }
            Self::LiberdadeComCautelar => EventEffect::ReleaseRestricted,
            Self::CautelarInicio => EventEffect::Restrict,
            Self::CautelarFim | Self::Fuga | Self::Outro => EventEffect::NoChange,
        }
    }

    /// The record-store tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrisaoFlagrante => "PRISAO_FLAGRANTE",
            Self::PrisaoPreventiva => "PRISAO_PREVENTIVA",
            Self::PrisaoTemporaria => "PRISAO_TEMPORARIA",
            Self::PrisaoTjInicioCumprimento => "PRISAO_TJ_INICIO_CUMPRIMENTO",
            Self::SolturaAlvara => "SOLTURA_ALVARA",
            Self::LiberdadeSemCautelar => "LIBERDADE_SEM_CAUTELAR",
            Self::LiberdadeComCautelar => "LIBERDADE_COM_CAUTELAR",
            Self::LiberdadeProvisoria => "LIBERDADE_PROVISORIA",
            Self::CautelarInicio => "CAUTELAR_INICIO",
            Self::CautelarFim => "CAUTELAR_FIM",
            Self::Fuga => "FUGA",
            Self::Recaptura => "RECAPTURA",
            Self::Outro => "OUTRO",
        }
    }

    /// Parse a record-store tag. Unknown tags map to `Outro`.
    pub fn from_tag(tag: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .unwrap_or(Self::Outro)
    }
}

impl From<String> for EventKind {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<EventKind> for &'static str {
    fn from(kind: EventKind) -> Self {
        kind.as_str()
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Process Event ───────────────────────────────────────────────────

/// A dated custody or precautionary-measure event of one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessEvent {
    /// What happened.
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// When it happened.
    pub event_date: CalendarDate,
    /// Precautionary measures imposed by this event, if any.
    #[serde(default)]
    pub cautelar_types: Vec<String>,
    /// Start of the precautionary measure period.
    #[serde(default)]
    pub cautelar_start: Option<CalendarDate>,
    /// End of the precautionary measure period.
    #[serde(default)]
    pub cautelar_end: Option<CalendarDate>,
    /// The period must not be credited as time served (detração).
    #[serde(default)]
    pub no_detraction: bool,
}

impl ProcessEvent {
    /// A bare event with no precautionary measure data.
    pub fn new(kind: EventKind, event_date: CalendarDate) -> Self {
        Self {
            kind,
            event_date,
            cautelar_types: Vec::new(),
            cautelar_start: None,
            cautelar_end: None,
            no_detraction: false,
        }
    }

    /// Whether this event imposes at least one precautionary measure.
    pub fn imposes_cautelar(&self) -> bool {
        !self.cautelar_types.is_empty()
    }
}

// ─── Custody State ───────────────────────────────────────────────────

/// Custody machine state after some prefix of the timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustodyState {
    /// The subject is held.
    pub custody_open: bool,
    /// Some restriction (arrest, conditional release, measure) was recorded.
    pub saw_restriction: bool,
}

impl CustodyState {
    /// Apply one event and return the resulting state.
    pub fn apply(self, event: &ProcessEvent) -> Self {
        let mut next = match event.kind.effect() {
            EventEffect::Detain => Self {
                custody_open: true,
                saw_restriction: true,
            },
            EventEffect::Release => Self {
                custody_open: false,
                ..self
            },
            EventEffect::ReleaseRestricted => Self {
                custody_open: false,
                saw_restriction: true,
            },
            EventEffect::Restrict => Self {
                saw_restriction: true,
                ..self
            },
            EventEffect::NoChange => self,
        };
        if event.imposes_cautelar() {
            next.saw_restriction = true;
        }
        next
    }

    /// The subject is held or has been placed under some restriction.
    pub fn has_custody_or_restriction(&self) -> bool {
        self.custody_open || self.saw_restriction
    }

    /// Project the machine state onto the public finding.
    pub fn finding(&self) -> CustodyFinding {
        CustodyFinding {
            in_custody: self.custody_open,
            under_restriction: self.has_custody_or_restriction(),
        }
    }
}

/// The derived custody standing of a case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustodyFinding {
    /// Custody is open at the end of the timeline.
    pub in_custody: bool,
    /// Custody is open or a restriction was recorded.
    pub under_restriction: bool,
}

impl CustodyFinding {
    /// Predicate consumed by the execution classifier.
    pub fn has_custody_or_restriction(&self) -> bool {
        self.in_custody || self.under_restriction
    }
}

// ─── Derivation ──────────────────────────────────────────────────────

/// Events in processing order: ascending by date, input order on ties.
fn chronological(events: &[ProcessEvent]) -> Vec<&ProcessEvent> {
    let mut ordered: Vec<&ProcessEvent> = events.iter().collect();
    // sort_by_key is stable.
    ordered.sort_by_key(|event| event.event_date);
    ordered
}

/// Derive the custody finding from an unordered event collection.
pub fn derive_custody_state(events: &[ProcessEvent]) -> CustodyFinding {
    let state = chronological(events)
        .into_iter()
        .fold(CustodyState::default(), CustodyState::apply);
    tracing::trace!(
        events = events.len(),
        custody_open = state.custody_open,
        saw_restriction = state.saw_restriction,
        "custody timeline walked"
    );
    state.finding()
}

/// The state after each event, in processing order.
pub fn custody_trail(events: &[ProcessEvent]) -> Vec<CustodyState> {
    chronological(events)
        .into_iter()
        .scan(CustodyState::default(), |state, event| {
            *state = state.apply(event);
            Some(*state)
        })
        .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────
