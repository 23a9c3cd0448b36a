//! # Conviction Layers
//!
//! A conviction is reviewed by a sequence of decisions: the sentence, an
//! appeal, special and extraordinary appeals, habeas corpus, criminal
//! review. Each decision either keeps the previous result (`MANTIDA`) or
//! replaces the crimes and penalties in force (`ALTERADA`).
//!
//! ## Resolution Rule
//!
//! The most recent altering decision supersedes everything before it.
//! Layers are scanned from last to first; the first `ALTERADA` layer found
//! supplies the crimes in force. `MANTIDA` layers are transparent. With no
//! altering layer the base sentence stands.
//!
//! The resolved set is never a mix: it is either the base crimes or the
//! crimes of exactly one layer.

use serde::{Deserialize, Serialize};

use lexec_core::CalendarDate;

use crate::PLACEHOLDER_DASH;

// ─── Layer Kinds ─────────────────────────────────────────────────────

/// The kind of judicial decision a layer records.
///
/// Unknown tags deserialize to [`LayerKind::Outro`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum LayerKind {
    Sentenca,
    Apelacao,
    /// Recurso especial.
    Resp,
    /// Recurso extraordinário.
    Re,
    /// Habeas corpus.
    Hc,
    RevisaoCriminal,
    Outro,
}

impl LayerKind {
    pub const ALL: [LayerKind; 7] = [
        Self::Sentenca,
        Self::Apelacao,
        Self::Resp,
        Self::Re,
        Self::Hc,
        Self::RevisaoCriminal,
        Self::Outro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sentenca => "SENTENCA",
            Self::Apelacao => "APELACAO",
            Self::Resp => "RESP",
            Self::Re => "RE",
            Self::Hc => "HC",
            Self::RevisaoCriminal => "REVISAO_CRIMINAL",
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

impl From<String> for LayerKind {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<LayerKind> for &'static str {
    fn from(kind: LayerKind) -> Self {
        kind.as_str()
    }
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a decision kept or altered the conviction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayerStatus {
    Mantida,
    Alterada,
}

// ─── Crimes and Penalties ────────────────────────────────────────────

/// A penalty expressed in calendar components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Penalty {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl Penalty {
    pub fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }
}

impl std::ops::Add for Penalty {
    type Output = Penalty;

    fn add(self, rhs: Penalty) -> Penalty {
        Penalty {
            years: self.years.saturating_add(rhs.years),
            months: self.months.saturating_add(rhs.months),
            days: self.days.saturating_add(rhs.days),
        }
    }
}

/// Renders `"{Y}a {M}m {D}d"` with only the non-zero components, or the
/// placeholder dash for a zero penalty.
impl std::fmt::Display for Penalty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return f.write_str(PLACEHOLDER_DASH);
        }
        let parts: Vec<String> = [(self.years, 'a'), (self.months, 'm'), (self.days, 'd')]
            .into_iter()
            .filter(|(n, _)| *n > 0)
            .map(|(n, unit)| format!("{n}{unit}"))
            .collect();
        f.write_str(&parts.join(" "))
    }
}

/// A crime with its penalty, as recorded in a sentence or decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crime {
    /// The statute, e.g. `"Lei 11.343/06"` or `"CP"`.
    pub law: String,
    /// The article, e.g. `"33, caput"`.
    pub article: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub penalty_years: Option<u32>,
    #[serde(default)]
    pub penalty_months: Option<u32>,
    #[serde(default)]
    pub penalty_days: Option<u32>,
}

impl Crime {
    /// The penalty, with absent components read as zero.
    pub fn penalty(&self) -> Penalty {
        Penalty {
            years: self.penalty_years.unwrap_or(0),
            months: self.penalty_months.unwrap_or(0),
            days: self.penalty_days.unwrap_or(0),
        }
    }
}

/// Render a crime's penalty for display.
pub fn format_penalty(crime: &Crime) -> String {
    crime.penalty().to_string()
}

/// Component-wise sum of the penalties. Components are not carried
/// (13 months stays 13 months).
pub fn total_penalty(crimes: &[Crime]) -> Penalty {
    crimes
        .iter()
        .map(Crime::penalty)
        .fold(Penalty::default(), |acc, p| acc + p)
}

// ─── Layers ──────────────────────────────────────────────────────────

/// One judicial decision in the review sequence of a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvictionLayer {
    pub kind: LayerKind,
    pub status: LayerStatus,
    #[serde(default)]
    pub decision_date: Option<CalendarDate>,
    /// Only meaningful when `status` is `ALTERADA`.
    #[serde(default)]
    pub crimes: Vec<Crime>,
}

impl ConvictionLayer {
    pub fn alters(&self) -> bool {
        self.status == LayerStatus::Alterada
    }
}

/// Where the crimes in force come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum CrimeSource {
    /// No decision altered the sentence.
    BaseSentence,
    /// The layer at `index` in the recorded sequence.
    Layer {
        index: usize,
        kind: LayerKind,
        #[serde(rename = "decisionDate")]
        decision_date: Option<CalendarDate>,
    },
}

/// The crimes in force together with their provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedConviction {
    pub source: CrimeSource,
    pub crimes: Vec<Crime>,
}

/// Resolve the crimes in force and report which record supplied them.
pub fn resolve_in_force(base_crimes: &[Crime], layers: &[ConvictionLayer]) -> ResolvedConviction {
    match layers.iter().enumerate().rev().find(|(_, layer)| layer.alters()) {
        Some((index, layer)) => {
            tracing::debug!(index, kind = %layer.kind, "altering layer in force");
            ResolvedConviction {
                source: CrimeSource::Layer {
                    index,
                    kind: layer.kind,
                    decision_date: layer.decision_date,
                },
                crimes: layer.crimes.clone(),
            }
        }
        None => ResolvedConviction {
            source: CrimeSource::BaseSentence,
            crimes: base_crimes.to_vec(),
        },
    }
}

/// The crimes currently in force.
pub fn resolve_current_crimes(base_crimes: &[Crime], layers: &[ConvictionLayer]) -> Vec<Crime> {
    resolve_in_force(base_crimes, layers).crimes
}

// ─── Tests ───────────────────────────────────────────────────────────


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_crime() -> impl Strategy<Value = Crime> {
        ("[0-9]{1,3}", proptest::option::of(0u32..30), proptest::option::of(0u32..12)).prop_map(
            |(article, y, m)| Crime {
                law: "CP".to_string(),
                article,
                description: None,
                penalty_years: y,
                penalty_months: m,
                penalty_days: None,
            },
        )
    }

    fn arb_layer() -> impl Strategy<Value = ConvictionLayer> {
        (
            prop::sample::select(LayerKind::ALL.to_vec()),
            prop_oneof![Just(LayerStatus::Mantida), Just(LayerStatus::Alterada)],
            prop::collection::vec(arb_crime(), 0..3),
        )
            .prop_map(|(kind, status, crimes)| ConvictionLayer {
                kind,
                status,
                decision_date: None,
                crimes,
            })
    }

    proptest! {
        /// Without an altering layer the base crimes are returned unchanged.
        #[test]
        fn maintained_only_is_identity(
            base in prop::collection::vec(arb_crime(), 0..4),
            n in 0usize..6,
        ) {
            let layers: Vec<ConvictionLayer> = (0..n)
                .map(|_| ConvictionLayer {
                    kind: LayerKind::Apelacao,
                    status: LayerStatus::Mantida,
                    decision_date: None,
                    crimes: vec![],
                })
                .collect();
            prop_assert_eq!(resolve_current_crimes(&base, &layers), base);
        }

        /// The resolved set is the base or exactly one altering layer's crimes.
        #[test]
        fn resolved_set_is_never_a_mix(
            base in prop::collection::vec(arb_crime(), 0..4),
            layers in prop::collection::vec(arb_layer(), 0..6),
        ) {
            let resolved = resolve_in_force(&base, &layers);
            match resolved.source {
                CrimeSource::BaseSentence => {
                    prop_assert!(layers.iter().all(|l| !l.alters()));
                    prop_assert_eq!(resolved.crimes, base);
                }
                CrimeSource::Layer { index, .. } => {
                    prop_assert!(layers[index].alters());
                    prop_assert!(layers[index + 1..].iter().all(|l| !l.alters()));
                    prop_assert_eq!(&resolved.crimes, &layers[index].crimes);
                }
            }
        }
    }
}
