use std::io::Write;
use std::path::PathBuf;

use petrocost_ai::{
    Alert, Estimator, InferenceError, ModelSlot, ObliviousEnsemble, OutputMode, Regressor,
};
use petrocost_core::{FeatureRecord, PredictionRequest};

fn demo_model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models/modelo_costos.json")
}

fn demo_estimator(mode: OutputMode) -> Estimator {
    let slot = ModelSlot::new();
    let model = slot.init(demo_model_path()).expect("demo model should load");
    Estimator::new(model, mode)
}

#[test]
fn demo_model_accepts_assembled_record() {
    let model = ObliviousEnsemble::load(demo_model_path()).unwrap();
    let record = FeatureRecord::assemble(&PredictionRequest::default());
    let out = model.predict(&record).unwrap();
    assert_eq!(out.len(), 1);
    assert!((out[0] - 1.02).abs() < 1e-9, "got {}", out[0]);
}

#[test]
fn default_form_in_direct_mode_gives_510k() {
    let record = FeatureRecord::assemble(&PredictionRequest::default());
    let est = demo_estimator(OutputMode::Direct).estimate(&record).unwrap();
    assert!((est.final_cost - 510_000.0).abs() < 1e-3);
    assert!((est.deviation - 10_000.0).abs() < 1e-3);
    assert!((est.deviation_pct - 2.0).abs() < 1e-6);
    assert_eq!(est.model.as_deref(), Some("modelo_costos"));
}

#[test]
fn costly_profile_triggers_overrun_alert() {
    let req = PredictionRequest::new("Pozo 7", "META", "PERFORACION")
        .with_cost_code("1000", 25.0)
        .unwrap()
        .with_cost_code("2000", 8.0)
        .unwrap()
        .with_cost_code("2900", 1.0)
        .unwrap()
        .with_cost_code("3300", 1.0)
        .unwrap()
        .with_planned_cost(2_000_000.0);

    let est = demo_estimator(OutputMode::Overrun)
        .estimate(&FeatureRecord::assemble(&req))
        .unwrap();

    // 1.0 + 0.12 + 0.03 + 0.06 + 0.035
    assert!((est.model_output - 1.245).abs() < 1e-9);
    assert_eq!(est.alert, Alert::Overrun);
}

#[test]
fn abandonment_profile_triggers_savings_notice() {
    let req = PredictionRequest::new("Pozo 2", "TOLIMA", "ABANDONO").with_planned_cost(80_000.0);
    let est = demo_estimator(OutputMode::Overrun)
        .estimate(&FeatureRecord::assemble(&req))
        .unwrap();

    // 1.0 - 0.06 - 0.02
    assert!((est.model_output - 0.92).abs() < 1e-9);
    assert_eq!(est.alert, Alert::Savings);
    assert!(est.final_cost < est.planned_cost);
}

#[test]
fn record_missing_numeric_column_is_caught() {
    let record = FeatureRecord::assemble(&PredictionRequest::default()).without("2600");
    let err = demo_estimator(OutputMode::Overrun)
        .estimate(&record)
        .unwrap_err();

    assert!(matches!(err, InferenceError::SchemaMismatch { .. }));
    let msg = err.user_message();
    assert!(msg.contains("2600"));
    assert!(msg.starts_with("prediction failed"));
}

#[test]
fn zero_planned_cost_does_not_fail() {
    let req = PredictionRequest::default().with_planned_cost(0.0);
    let est = demo_estimator(OutputMode::Overrun)
        .estimate(&FeatureRecord::assemble(&req))
        .unwrap();
    assert_eq!(est.final_cost, 0.0);
    assert_eq!(est.deviation_pct, 0.0);
}

#[test]
fn artifact_written_to_disk_round_trips_through_slot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tiny.json");
    let artifact = serde_json::json!({
        "name": "tiny",
        "features": [ { "name": "1000", "kind": "numeric" } ],
        "bias": 1.5,
        "trees": []
    });
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{artifact}").unwrap();

    let slot = ModelSlot::new();
    let model = slot.init(&path).unwrap();
    assert_eq!(model.name(), "tiny");

    let record = FeatureRecord::from_columns([("1000", petrocost_core::FeatureValue::Number(3.0))]);
    assert_eq!(model.predict(&record).unwrap(), vec![1.5]);

    // Full-schema records do not fit this model.
    let err = model
        .predict(&FeatureRecord::assemble(&PredictionRequest::default()))
        .unwrap_err();
    assert!(matches!(err, InferenceError::SchemaMismatch { expected: 1, found: 25, .. }));
}

#[test]
fn process_model_is_installed_once_and_shared() {
    // The only test in this binary that touches the process-wide slot.
    let installed = petrocost_ai::registry::init(demo_model_path()).unwrap();
    let fetched = petrocost_ai::registry::get().unwrap();
    assert!(std::sync::Arc::ptr_eq(&installed, &fetched));

    // A second init keeps the first model.
    let again = petrocost_ai::registry::init("/nowhere/modelo.json").unwrap();
    assert!(std::sync::Arc::ptr_eq(&installed, &again));
}
