//! # Standing Subcommand
//!
//! Derives the full standing of one case file and prints it as JSON or as a
//! short text summary.

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use lexec_state::{derive_standing, format_penalty, CaseStanding, CrimeSource};

use crate::config::EngineConfig;
use crate::input::load_case;

/// Output format of a derived result.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// Human-readable summary.
    Text,
}

/// Arguments for the standing subcommand.
#[derive(Args, Debug)]
pub struct StandingArgs {
    /// Path to the case file (JSON, or YAML by extension).
    pub case_file: PathBuf,

    /// Credit remission grants the court has not approved.
    #[arg(long)]
    pub include_unapproved: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Run the standing subcommand.
pub fn run(args: &StandingArgs, config: &EngineConfig) -> anyhow::Result<()> {
    let records = load_case(&args.case_file)?;
    let options = config.ledger_options(args.include_unapproved);
    let standing = derive_standing(&records, &options)?;
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&standing)?),
        OutputFormat::Text => print!("{}", render_text(&standing)),
    }
    Ok(())
}

/// Plain-text summary of a standing, one fact per line.
pub fn render_text(standing: &CaseStanding) -> String {
    let mut out = String::new();
    if let Some(case_id) = &standing.case_id {
        out.push_str(&format!("case:       {case_id}\n"));
    }
    out.push_str(&format!("status:     {}\n", standing.status.text));
    if let Some(observation) = &standing.status.observation {
        out.push_str(&format!("note:       {observation}\n"));
    }
    out.push_str(&format!("execution:  {}\n", standing.execution));
    out.push_str(&format!(
        "custody:    {}{}\n",
        if standing.custody.in_custody { "held" } else { "free" },
        if standing.custody.under_restriction { ", restricted" } else { "" }
    ));
    let source = match standing.conviction.source {
        CrimeSource::BaseSentence => "sentence".to_string(),
        CrimeSource::Layer { index, kind, .. } => format!("{kind} (layer {index})"),
    };
    out.push_str(&format!("in force:   {source}, total {}\n", standing.total_penalty));
    for crime in &standing.conviction.crimes {
        out.push_str(&format!(
            "  - {} art. {}: {}\n",
            crime.law,
            crime.article,
            format_penalty(crime)
        ));
    }
    out.push_str(&format!(
        "remission:  {} days (approved {}, unapproved {}, forfeited {})\n",
        standing.remission.balance,
        standing.remission.total_approved,
        standing.remission.total_unapproved,
        standing.remission.total_forfeited
    ));
    out
}
