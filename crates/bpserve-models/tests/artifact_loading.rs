//! Artifact loading integration tests
//!
//! Writes real artifact files to a temporary directory and loads them the
//! way the server does at startup.

use bpserve_core::{Error, Label, PredictionOutcome, Result};
use bpserve_models::{
    predict, DecisionTreeClassifier, Estimator, LoadStrategy, LogisticRegression, Model,
    ModelArtifact, ModelLoader, ModelSlot, JsonStrategy, MODEL_FILE_NAME,
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tracing::subscriber::with_default;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

fn bp_classifier() -> ModelArtifact {
    ModelArtifact::new(Estimator::LogisticRegression(LogisticRegression {
        classes: vec![Label::Int(0), Label::Int(1)],
        coef: vec![vec![0.04, 0.03, 0.01]],
        intercept: vec![-8.5],
    }))
    .with_feature_names(["systolic", "diastolic", "age"])
}

fn write_artifact(bytes: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(MODEL_FILE_NAME);
    std::fs::write(&path, bytes).unwrap();
    (dir, path)
}

#[test]
fn test_json_artifact_loads() {
    let (_dir, path) = write_artifact(&serde_json::to_vec_pretty(&bp_classifier()).unwrap());

    let slot = ModelSlot::new();
    assert!(slot.load(&ModelLoader::new(&path)));

    let model = slot.get().unwrap();
    assert_eq!(model.type_name(), "LogisticRegression");
    assert_eq!(model.n_features(), Some(3));
    assert_eq!(
        model.feature_names().unwrap(),
        &["systolic".to_string(), "diastolic".into(), "age".into()]
    );
}

#[test]
fn test_bincode_artifact_loads_after_json_fails() {
    let bytes = bincode::serialize(&bp_classifier()).unwrap();
    let (_dir, path) = write_artifact(&bytes);

    // JSON alone cannot read it
    let json_only = ModelLoader::with_strategies(&path, vec![Box::new(JsonStrategy)]);
    assert!(json_only.load().is_err());

    let slot = ModelSlot::new();
    assert!(slot.load(&ModelLoader::new(&path)));
    assert_eq!(slot.get().unwrap().type_name(), "LogisticRegression");
}

#[test]
fn test_bincode_preserves_string_classes() {
    let artifact = ModelArtifact::new(Estimator::DecisionTreeClassifier(DecisionTreeClassifier {
        classes: vec![Label::from("normal"), Label::from("elevated")],
        n_features: 1,
        children_left: vec![1, -1, -1],
        children_right: vec![2, -1, -1],
        feature: vec![0, -2, -2],
        threshold: vec![120.0, -2.0, -2.0],
        value: vec![vec![5.0, 5.0], vec![5.0, 0.0], vec![0.0, 5.0]],
    }));
    let (_dir, path) = write_artifact(&bincode::serialize(&artifact).unwrap());

    let model = ModelLoader::new(&path).load().unwrap();
    let outcome = predict(&model, &json!([[110], [135]])).unwrap();
    assert_eq!(
        outcome,
        PredictionOutcome::Success {
            prediction: vec![Label::from("normal"), Label::from("elevated")],
            probabilities: Some(vec![vec![1.0, 0.0], vec![0.0, 1.0]]),
        }
    );
}

#[test]
fn test_structurally_invalid_artifact_rejected() {
    let mut artifact = bp_classifier();
    if let Estimator::LogisticRegression(m) = &mut artifact.estimator {
        m.intercept.push(0.0);
    }
    let (_dir, path) = write_artifact(&serde_json::to_vec(&artifact).unwrap());

    let slot = ModelSlot::new();
    assert!(!slot.load(&ModelLoader::new(&path)));
    assert!(!slot.is_loaded());
}

#[test]
fn test_unknown_fields_tolerated() {
    let (_dir, path) = write_artifact(
        json!({
            "format_version": 1,
            "exported_by": "trainer 2.3",
            "estimator": {"LinearRegression": {"coef": [0.5, 0.5], "intercept": 1.0}}
        })
        .to_string()
        .as_bytes(),
    );
    let model = ModelLoader::new(&path).load().unwrap();
    assert_eq!(model.type_name(), "LinearRegression");
    assert!(model.feature_names().is_none());
}

/// Counts events emitted with the `noisy_decoder` target
struct CountingLayer(Arc<AtomicUsize>);

impl<S: tracing::Subscriber> Layer<S> for CountingLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if event.metadata().target() == "noisy_decoder" {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

struct NoisyStrategy;

impl LoadStrategy for NoisyStrategy {
    fn name(&self) -> &'static str {
        "noisy"
    }

    fn decode(&self, _bytes: &[u8]) -> Result<ModelArtifact> {
        tracing::warn!(target: "noisy_decoder", "deprecated field layout");
        Err(Error::artifact("noisy decoder gave up"))
    }
}

#[test]
fn test_decoder_diagnostics_suppressed_only_during_decode() {
    let (_dir, path) = write_artifact(b"{}");
    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(CountingLayer(count.clone()));

    with_default(subscriber, || {
        let loader = ModelLoader::with_strategies(&path, vec![Box::new(NoisyStrategy)]);
        assert!(loader.load().is_err());
        assert_eq!(count.load(Ordering::SeqCst), 0);

        // Outside a decode the same event is recorded again
        tracing::warn!(target: "noisy_decoder", "after load");
        assert_eq!(count.load(Ordering::SeqCst), 1);
    });
}
