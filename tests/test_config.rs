// Loading parameter files from disk in both encodings.

use std::fs;
use std::path::PathBuf;

use bpnn::{ActivationFunction, BpnnError, Mode, Scaling, TrainingConfig};

const TEXT_PARAMS: &str = "\
Parameters for the XOR problem
# Data file
xor.dat
# Input columns
2
# Output columns
1
# Hidden layers
1
# Nodes per hidden layer
2
# Scaling
none
# Weight range
-1 1
# Threshold range
-0.5 0.5
# Epochs
10
# Learning rate
0.5
# Momentum
0.8
# Mode
batch
# Test patterns
0
# Cross-validation k
2
# Hidden activation
tanh 1
# Output activation
transfer 0
# Cost function
energy
# Output file
xor_report.txt
";

#[test]
fn loads_text_parameters() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Input.txt");
    fs::write(&path, TEXT_PARAMS).unwrap();

    let cfg = TrainingConfig::load(&path).unwrap();
    assert_eq!(cfg.hidden_layers, vec![2]);
    assert_eq!(cfg.mode, Mode::Batch);
    assert_eq!(cfg.scaling, Scaling::None);
    assert_eq!(cfg.output_activation, ActivationFunction::Transfer);
    assert_eq!(cfg.output_file, PathBuf::from("xor_report.txt"));
}

#[test]
fn json_round_trips_through_serde() {
    let dir = tempfile::tempdir().unwrap();
    let text_path = dir.path().join("Input.txt");
    fs::write(&text_path, TEXT_PARAMS).unwrap();
    let cfg = TrainingConfig::load(&text_path).unwrap();

    let json_path = dir.path().join("params.json");
    fs::write(&json_path, serde_json::to_string_pretty(&cfg).unwrap()).unwrap();
    assert_eq!(TrainingConfig::load(&json_path).unwrap(), cfg);
}

#[test]
fn json_cost_function_defaults_to_energy() {
    let json = r#"{
        "data_file": "iris.dat",
        "in_columns": 4,
        "out_columns": 3,
        "hidden_layers": [6],
        "scaling": "mean",
        "weight_range": [-0.3, 0.3],
        "threshold_range": [0.0, 0.0],
        "epochs": 200,
        "learning_rate": 0.05,
        "momentum": 0.5,
        "mode": "online",
        "test_patterns": 15,
        "k": 5,
        "hidden_activation": { "name": "logistic", "beta": 0.5 },
        "output_activation": { "name": "logistic", "beta": 1.0 },
        "output_file": "iris_report.txt"
    }"#;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("iris.json");
    fs::write(&path, json).unwrap();

    let cfg = TrainingConfig::load(&path).unwrap();
    assert_eq!(cfg.cost_function, "energy");
    assert_eq!(cfg.scaling, Scaling::Mean);
    assert_eq!(cfg.hidden_activation, ActivationFunction::Logistic { beta: 0.5 });
    assert_eq!(cfg.topology().hidden, vec![6]);
}

#[test]
fn zero_folds_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Input.txt");
    fs::write(&path, TEXT_PARAMS.replace("# Cross-validation k\n2", "# Cross-validation k\n0")).unwrap();
    match TrainingConfig::load(&path).unwrap_err() {
        BpnnError::Config { field, .. } => assert_eq!(field, "cross-validation k"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn missing_file_reports_path() {
    let err = TrainingConfig::load("no/such/Input.txt").unwrap_err();
    assert!(matches!(err, BpnnError::Io { .. }));
    assert!(err.to_string().contains("no/such/Input.txt"));
}

#[test]
fn malformed_json_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ \"data_file\": ").unwrap();
    assert!(matches!(TrainingConfig::load(&path), Err(BpnnError::Json(_))));
}
