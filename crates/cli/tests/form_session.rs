use std::io::Cursor;
use std::path::PathBuf;

use petrocost_ai::{Alert, InferenceError, ModelSlot, OutputMode};
use petrocost_cli::args::PredictArgs;
use petrocost_cli::form::{Prompter, request_from_args};
use petrocost_cli::{Session, Submission};
use petrocost_core::{FeatureRecord, PredictionRequest};

fn demo_session(mode: OutputMode) -> Session {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models/modelo_costos.json");
    let slot = ModelSlot::new();
    Session::new(slot.init(path), mode)
}

fn answers(lines: &[&str]) -> String {
    let mut s = lines.join("\n");
    s.push('\n');
    s
}

#[test]
fn two_submissions_in_one_session() {
    colored::control::set_override(false);

    // First round: defaults throughout. Second: META drilling at 2M with heavy codes.
    let mut lines: Vec<&str> = vec![""; 25];
    lines.push("y");
    lines.extend(["Pozo 7", "META", "PERFORACION", "2000000", "25"]);
    lines.extend(vec![""; 8]); // 1200..1900
    lines.push("8"); // 2000
    lines.extend(vec![""; 6]); // 2100..2800
    lines.push("1"); // 2900
    lines.extend(vec![""; 3]); // 3000..3200
    lines.push("1"); // 3300
    lines.push("n");

    let mut prompter = Prompter::new(Cursor::new(answers(&lines).into_bytes()), Vec::new());
    let session = demo_session(OutputMode::Overrun);
    let successes = session.run_form(&mut prompter).unwrap();
    assert_eq!(successes, 2);

    let out = String::from_utf8(prompter.output_mut().clone()).unwrap();
    assert!(out.contains("Final estimate: $510,000.00 USD"), "{out}");
    assert!(out.contains("Overrun factor: 1.020x"), "{out}");
    assert!(out.contains("Overrun factor: 1.245x"), "{out}");
    assert!(out.contains("sobrecosto"), "{out}");
    assert_eq!(out.matches("New prediction?").count(), 2);
}

#[test]
fn second_round_defaults_to_previous_answers() {
    let mut lines: Vec<&str> = vec!["Pozo 1", "CASANARE", "WORKOVER", "750000"];
    lines.extend(vec![""; 21]);
    lines.push("yes");
    lines.extend(vec![""; 25]);

    let mut prompter = Prompter::new(Cursor::new(answers(&lines).into_bytes()), Vec::new());
    let successes = demo_session(OutputMode::Direct).run_form(&mut prompter).unwrap();
    assert_eq!(successes, 2);

    let out = String::from_utf8(prompter.output_mut().clone()).unwrap();
    assert!(out.contains("PROYECTO [Pozo 1]"), "{out}");
    assert!(out.contains("COSTO_TOTAL_PLANEADO (US) [750000]"), "{out}");
}

#[test]
fn missing_model_keeps_session_alive() {
    colored::control::set_override(false);
    let slot = ModelSlot::new();
    let session = Session::new(slot.init("/nowhere/modelo.json"), OutputMode::Overrun);

    let mut lines: Vec<&str> = vec![""; 25];
    lines.push("y");
    lines.extend(vec![""; 25]);
    lines.push("n");

    let mut prompter = Prompter::new(Cursor::new(answers(&lines).into_bytes()), Vec::new());
    assert_eq!(session.run_form(&mut prompter).unwrap(), 0);

    let out = String::from_utf8(prompter.output_mut().clone()).unwrap();
    assert_eq!(out.matches("model unavailable").count(), 2, "{out}");
}

#[test]
fn predict_from_form_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pozo.toml");
    std::fs::write(
        &path,
        r#"
PROYECTO = "Pozo 2"
DEPARTAMENTO = "TOLIMA"
OBJETIVO_EVENTO = "ABANDONO"
"COSTO_TOTAL_PLANEADO (US)" = 80000.0
"#,
    )
    .unwrap();

    let args = PredictArgs {
        input: Some(path),
        ..PredictArgs::default()
    };
    let request = request_from_args(&args).unwrap();
    match demo_session(OutputMode::Overrun).submit(&request) {
        Submission::Estimated(est) => {
            assert_eq!(est.alert, Alert::Savings);
            assert!((est.final_cost - 73_600.0).abs() < 1e-6);
        }
        other => panic!("expected estimate, got {other:?}"),
    }
}

#[test]
fn zero_planned_cost_is_not_an_error() {
    let args = PredictArgs::default();
    let request = request_from_args(&args).unwrap();
    assert_eq!(request.planned_cost, 0.0);

    let session = demo_session(OutputMode::Direct);
    let sub = session.submit(&request);
    let Submission::Estimated(est) = &sub else {
        panic!("expected estimate, got {sub:?}");
    };
    assert_eq!(est.final_cost, 0.0);
    assert!(session.render(&sub).contains("(n/a)"));
}

#[test]
fn failed_submission_is_typed() {
    let session = demo_session(OutputMode::Overrun);
    let record = FeatureRecord::assemble(&PredictionRequest::default()).without("3000");
    let sub = session.submit_record(&record);
    assert!(matches!(
        sub,
        Submission::Failed(InferenceError::SchemaMismatch { .. })
    ));
}
