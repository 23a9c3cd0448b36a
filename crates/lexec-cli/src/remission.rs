//! # Remission Subcommand
//!
//! Computes the remission ledger of one case file, optionally with the
//! step-by-step replay.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use lexec_state::{compute_balance_with, replay, LedgerStep, RemissionLedger};

use crate::config::EngineConfig;
use crate::input::load_case;

/// Arguments for the remission subcommand.
#[derive(Args, Debug)]
pub struct RemissionArgs {
    /// Path to the case file (JSON, or YAML by extension).
    pub case_file: PathBuf,

    /// Credit remission grants the court has not approved.
    #[arg(long)]
    pub include_unapproved: bool,

    /// Include every applied incident in the output.
    #[arg(long)]
    pub steps: bool,
}

#[derive(Serialize)]
struct RemissionReport {
    #[serde(flatten)]
    totals: RemissionLedger,
    #[serde(skip_serializing_if = "Option::is_none")]
    steps: Option<Vec<LedgerStep>>,
}

/// Run the remission subcommand.
pub fn run(args: &RemissionArgs, config: &EngineConfig) -> anyhow::Result<()> {
    let records = load_case(&args.case_file)?;
    let options = config.ledger_options(args.include_unapproved);
    let report = RemissionReport {
        totals: compute_balance_with(&records.incidents, &options)?,
        steps: if args.steps {
            Some(replay(&records.incidents, &options)?)
        } else {
            None
        },
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
