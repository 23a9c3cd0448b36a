//! # Status Subcommand
//!
//! Renders the status line for a regime/situation pair given on the
//! command line.

use clap::Args;

use lexec_state::{format_status, ExecRegime, ExecSituacao, ExecutionStatusInput, StatusMarkers};

/// Arguments for the status subcommand.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Custody regime: FECHADO, SEMIABERTO or ABERTO.
    #[arg(long)]
    pub regime: Option<ExecRegime>,

    /// Execution situation (e.g. PRESO, CUMPRINDO). Unknown values read as OUTRO.
    #[arg(long)]
    pub situacao: Option<String>,

    /// Subject is electronically monitored.
    #[arg(long)]
    pub monitorado: bool,

    /// Subject is confined at night (semi-open regime).
    #[arg(long)]
    pub recolhido: bool,

    /// Subject serves at liberty (open regime).
    #[arg(long)]
    pub solto_cumprindo: bool,

    /// Free-text observation.
    #[arg(long)]
    pub observacao: Option<String>,

    /// Highlight the observation.
    #[arg(long)]
    pub destacar: bool,
}

impl StatusArgs {
    pub fn to_input(&self) -> ExecutionStatusInput {
        ExecutionStatusInput {
            exec_regime: self.regime,
            exec_situacao: self.situacao.as_deref().map(ExecSituacao::from_tag),
            markers: StatusMarkers {
                monitorado: self.monitorado,
                recolhido: self.recolhido,
                solto_cumprindo: self.solto_cumprindo,
            },
            observacao: self.observacao.clone(),
            destacar: self.destacar,
        }
    }
}

/// Run the status subcommand.
pub fn run(args: &StatusArgs) -> anyhow::Result<()> {
    let status = format_status(&args.to_input());
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: StatusArgs,
    }

    #[test]
    fn test_args_build_presenter_input() {
        let h = Harness::parse_from([
            "status",
            "--regime",
            "ABERTO",
            "--situacao",
            "CUMPRINDO",
            "--monitorado",
            "--solto-cumprindo",
        ]);
        let out = format_status(&h.args.to_input());
        assert_eq!(out.text, "Cumprindo — Monitorado, Solto cumprindo");
    }

    #[test]
    fn test_missing_regime_renders_placeholder() {
        let h = Harness::parse_from(["status", "--situacao", "PRESO"]);
        let out = format_status(&h.args.to_input());
        assert_eq!(out.text, lexec_state::PLACEHOLDER_DASH);
    }

    #[test]
    fn test_unknown_regime_is_a_usage_error() {
        assert!(Harness::try_parse_from(["status", "--regime", "DOMICILIAR"]).is_err());
    }
}
