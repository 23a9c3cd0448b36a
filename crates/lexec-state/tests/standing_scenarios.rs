//! # Standing Scenarios
//!
//! End-to-end checks of the derivations against worked case files,
//! including a full case as the record store serializes it.

use lexec_core::CalendarDate;
use lexec_state::{
    compute_balance, derive_custody_state, derive_standing, format_status, is_definitive_conviction,
    is_provisional_execution, CaseRecords, CrimeSource, EventKind, ExecRegime, ExecSituacao,
    ExecutionKind, ExecutionStatusInput, Incident, LayerKind, LedgerOptions, ProcessEvent,
    RemicaoStatus, StatusMarkers, PLACEHOLDER_DASH,
};

fn date(s: &str) -> CalendarDate {
    CalendarDate::parse(s).expect("valid test date")
}

// ---------------------------------------------------------------------------
// Worked examples
// ---------------------------------------------------------------------------

#[test]
fn grant_then_misconduct_forfeits_a_third() {
    let incidents = vec![
        Incident::remicao("1", date("2020-01-01"), 30, Some(RemicaoStatus::Homologada)),
        Incident::falta_grave("2", date("2020-02-01"), 1, Some(3)),
    ];
    let ledger = compute_balance(&incidents, false).unwrap();
    assert_eq!(ledger.balance, 20);
    assert_eq!(ledger.total_forfeited, 10);
}

#[test]
fn preventive_detention_then_conditional_release() {
    let events = vec![
        ProcessEvent::new(EventKind::PrisaoPreventiva, date("2021-01-01")),
        ProcessEvent::new(EventKind::LiberdadeComCautelar, date("2021-06-01")),
    ];
    let finding = derive_custody_state(&events);
    assert!(!finding.in_custody);
    assert!(finding.under_restriction);

    let definitive = is_definitive_conviction(None, Some(date("2022-01-01")), None);
    assert!(!definitive);
    assert!(is_provisional_execution(definitive, &finding));
}

#[test]
fn semi_open_monitored_status() {
    let input = ExecutionStatusInput {
        exec_regime: Some(ExecRegime::Semiaberto),
        exec_situacao: Some(ExecSituacao::Cumprindo),
        markers: StatusMarkers {
            monitorado: true,
            ..StatusMarkers::default()
        },
        ..ExecutionStatusInput::default()
    };
    let out = format_status(&input);
    assert_eq!(out.text, "Cumprindo — Monitorado");
    assert!(!out.is_highlighted_red);
}

#[test]
fn missing_regime_status_is_placeholder() {
    let input = ExecutionStatusInput {
        exec_situacao: Some(ExecSituacao::Preso),
        ..ExecutionStatusInput::default()
    };
    let out = format_status(&input);
    assert_eq!(out.text, PLACEHOLDER_DASH);
    assert!(!out.is_highlighted_red);
}

// ---------------------------------------------------------------------------
// Full case from the record store
// ---------------------------------------------------------------------------

const CASE_JSON: &str = r#"{
    "caseId": "0004521-10.2019.8.26.0041",
    "events": [
        {"type": "SOLTURA_ALVARA", "eventDate": "2020-03-10"},
        {"type": "PRISAO_FLAGRANTE", "eventDate": "2019-11-02"},
        {"type": "PRISAO_TJ_INICIO_CUMPRIMENTO", "eventDate": "2022-09-01"},
        {"type": "FUGA", "eventDate": "2023-01-15"}
    ],
    "baseCrimes": [
        {"law": "CP", "article": "157, §2º, II", "penaltyYears": 7, "penaltyMonths": 4}
    ],
    "layers": [
        {"kind": "APELACAO", "status": "ALTERADA", "decisionDate": "2021-05-20",
         "crimes": [{"law": "CP", "article": "157, caput", "penaltyYears": 5, "penaltyMonths": 4}]},
        {"kind": "RESP", "status": "MANTIDA", "decisionDate": "2022-02-11"}
    ],
    "incidents": [
        {"id": "i3", "type": "HOMOLOGACAO_FALTA_GRAVE", "referenceDate": "2023-03-01", "fracNum": 1, "fracDen": 3},
        {"id": "i1", "type": "REMICAO", "referenceDate": "2022-12-01", "remicaoDias": 40},
        {"id": "i2", "type": "REMICAO", "referenceDate": "2023-02-01", "remicaoDias": 9, "remicaoStatus": "NAO_HOMOLOGADA"},
        {"id": "i4", "type": "PROGRESSAO_REGIME", "referenceDate": "2023-04-01"}
    ],
    "transitProcesso": "2022-08-15",
    "status": {"execRegime": "FECHADO", "execSituacao": "FORAGIDO", "observacao": " evadido do CDP "}
}"#;

#[test]
fn full_case_standing() {
    let records: CaseRecords = serde_json::from_str(CASE_JSON).unwrap();
    let standing = derive_standing(&records, &LedgerOptions::default()).unwrap();

    // Escape is a no-op, so custody opened in 2022 is still open.
    assert!(standing.custody.in_custody);
    assert_eq!(standing.execution, ExecutionKind::Definitive);
    assert!(standing.definitive);
    assert!(!standing.provisional);

    match standing.conviction.source {
        CrimeSource::Layer { index, kind, .. } => {
            assert_eq!(index, 0);
            assert_eq!(kind, LayerKind::Apelacao);
        }
        CrimeSource::BaseSentence => panic!("appeal altered the sentence"),
    }
    assert_eq!(standing.total_penalty.to_string(), "5a 4m");

    // 40 approved; 9 unapproved not credited; ⌊40/3⌋ = 13 forfeited.
    assert_eq!(standing.remission.balance, 27);
    assert_eq!(standing.remission.total_unapproved, 9);
    assert_eq!(standing.remission.total_forfeited, 13);

    assert_eq!(standing.status.text, "FORAGIDO");
    assert!(standing.status.is_highlighted_red);
    assert_eq!(standing.status.observation.as_deref(), Some("evadido do CDP"));
}

#[test]
fn full_case_counting_unapproved_grants() {
    let records: CaseRecords = serde_json::from_str(CASE_JSON).unwrap();
    let standing = derive_standing(&records, &LedgerOptions::including_unapproved(true)).unwrap();
    // (40 + 9) = 49, ⌊49/3⌋ = 16 forfeited.
    assert_eq!(standing.remission.total_forfeited, 16);
    assert_eq!(standing.remission.balance, 33);
}

#[test]
fn standing_serializes_for_the_report_layer() {
    let records: CaseRecords = serde_json::from_str(CASE_JSON).unwrap();
    let standing = derive_standing(&records, &LedgerOptions::default()).unwrap();
    let json = serde_json::to_value(&standing).unwrap();
    assert_eq!(json["execution"], "DEFINITIVE");
    assert_eq!(json["custody"]["inCustody"], true);
    assert_eq!(json["conviction"]["source"]["source"], "layer");
    assert_eq!(json["remission"]["balance"], 27);
    assert_eq!(json["status"]["text"], "FORAGIDO");
}
