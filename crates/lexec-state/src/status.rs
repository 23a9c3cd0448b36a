//! # Execution Status Presentation
//!
//! Maps a case's custody regime, execution situation and markers to the
//! canonical status line shown in case lists and reports.
//!
//! ## Decision Table
//!
//! | regime | situação | text | red |
//! |---|---|---|---|
//! | FECHADO | PRESO | `PRESO` | yes |
//! | FECHADO | FORAGIDO | `FORAGIDO` | yes |
//! | FECHADO | SUSPENSA_AGUARDANDO_CAPTURA | `Suspensa, aguardando captura` | no |
//! | FECHADO | anything else | `Outro` | no |
//! | SEMIABERTO, ABERTO | AGUARDANDO_INICIO | `Aguardando início` | no |
//! | SEMIABERTO, ABERTO | OUTRO | `Outro` | no |
//! | SEMIABERTO, ABERTO | anything else | `Cumprindo` + markers | no |
//!
//! Markers are appended only to `Cumprindo`, after ` — `, comma-joined, in
//! the fixed order `Monitorado` then `Recolhido` (semi-open) or
//! `Solto cumprindo` (open). With either regime or situation missing the
//! text is the placeholder dash.

use serde::{Deserialize, Serialize};

use lexec_core::LexecError;

use crate::PLACEHOLDER_DASH;

/// Custody regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecRegime {
    Fechado,
    Semiaberto,
    Aberto,
}

impl ExecRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fechado => "FECHADO",
            Self::Semiaberto => "SEMIABERTO",
            Self::Aberto => "ABERTO",
        }
    }
}

impl std::str::FromStr for ExecRegime {
    type Err = LexecError;

    /// Regimes form a closed set: unlike situations, an unknown regime is
    /// an error rather than `Outro`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FECHADO" => Ok(Self::Fechado),
            "SEMIABERTO" => Ok(Self::Semiaberto),
            "ABERTO" => Ok(Self::Aberto),
            other => Err(LexecError::UnknownValue {
                field: "execRegime",
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ExecRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Execution situation.
///
/// Unknown tags deserialize to [`ExecSituacao::Outro`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum ExecSituacao {
    Preso,
    Foragido,
    SuspensaAguardandoCaptura,
    Cumprindo,
    AguardandoInicio,
    Outro,
}

impl ExecSituacao {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preso => "PRESO",
            Self::Foragido => "FORAGIDO",
            Self::SuspensaAguardandoCaptura => "SUSPENSA_AGUARDANDO_CAPTURA",
            Self::Cumprindo => "CUMPRINDO",
            Self::AguardandoInicio => "AGUARDANDO_INICIO",
            Self::Outro => "OUTRO",
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "PRESO" => Self::Preso,
            "FORAGIDO" => Self::Foragido,
            "SUSPENSA_AGUARDANDO_CAPTURA" => Self::SuspensaAguardandoCaptura,
            "CUMPRINDO" => Self::Cumprindo,
            "AGUARDANDO_INICIO" => Self::AguardandoInicio,
            _ => Self::Outro,
        }
    }
}

impl From<String> for ExecSituacao {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<ExecSituacao> for &'static str {
    fn from(situacao: ExecSituacao) -> Self {
        situacao.as_str()
    }
}

/// Supervision markers for subjects actively serving in semi-open or open
/// regime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusMarkers {
    /// Electronic monitoring.
    pub monitorado: bool,
    /// Night/weekend confinement (semi-open).
    pub recolhido: bool,
    /// Serving at liberty (open).
    pub solto_cumprindo: bool,
}

/// Presentation input for one case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStatusInput {
    #[serde(default)]
    pub exec_regime: Option<ExecRegime>,
    #[serde(default)]
    pub exec_situacao: Option<ExecSituacao>,
    #[serde(default)]
    pub markers: StatusMarkers,
    #[serde(default)]
    pub observacao: Option<String>,
    #[serde(default)]
    pub destacar: bool,
}

/// The rendered status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedStatus {
    pub text: String,
    /// Trimmed observation; `None` when absent or blank.
    pub observation: Option<String>,
    pub is_highlighted_red: bool,
    pub observation_highlighted: bool,
}

/// Render the status line for a case.
pub fn format_status(input: &ExecutionStatusInput) -> FormattedStatus {
    let observation = input
        .observacao
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let (text, red) = match (input.exec_regime, input.exec_situacao) {
        (Some(regime), Some(situacao)) => status_text(regime, situacao, &input.markers),
        _ => (PLACEHOLDER_DASH.to_string(), false),
    };

    FormattedStatus {
        text,
        observation,
        is_highlighted_red: red,
        observation_highlighted: input.destacar,
    }
}

fn status_text(regime: ExecRegime, situacao: ExecSituacao, markers: &StatusMarkers) -> (String, bool) {
    match regime {
        ExecRegime::Fechado => match situacao {
            ExecSituacao::Preso => ("PRESO".to_string(), true),
            ExecSituacao::Foragido => ("FORAGIDO".to_string(), true),
            ExecSituacao::SuspensaAguardandoCaptura => {
                ("Suspensa, aguardando captura".to_string(), false)
            }
            _ => ("Outro".to_string(), false),
        },
        ExecRegime::Semiaberto | ExecRegime::Aberto => match situacao {
            ExecSituacao::AguardandoInicio => ("Aguardando início".to_string(), false),
            ExecSituacao::Outro => ("Outro".to_string(), false),
            _ => (serving_text(regime, markers), false),
        },
    }
}

fn serving_text(regime: ExecRegime, markers: &StatusMarkers) -> String {
    let regime_marker = match regime {
        ExecRegime::Semiaberto => (markers.recolhido, "Recolhido"),
        _ => (markers.solto_cumprindo, "Solto cumprindo"),
    };
    let labels: Vec<&str> = [(markers.monitorado, "Monitorado"), regime_marker]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect();
    if labels.is_empty() {
        "Cumprindo".to_string()
    } else {
        format!("Cumprindo — {}", labels.join(", "))
    }
}
