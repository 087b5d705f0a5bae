// Full runs: parameter file, data file, report and results file on disk.

use std::fs;
use std::path::Path;

use bpnn::{BpnnError, TrainingConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn write_inputs(dir: &Path, params_extra: &str) -> TrainingConfig {
    // OR truth table, repeated, with a comment header.
    let mut data = String::from("# x1 x2 y\n");
    for _ in 0..4 {
        data.push_str("0 0 0\n0 1 1\n1 0 1\n1 1 1\n");
    }
    data.push_str("\nthis line is past the data block\n");
    fs::write(dir.join("or.dat"), data).unwrap();

    let params = format!(
        "OR problem\n\
         # Data file\n{data}\n\
         # Input columns\n2\n\
         # Output columns\n1\n\
         # Hidden layers\n1\n\
         # Nodes per hidden layer\n3\n\
         # Scaling\nnone\n\
         # Weight range\n-0.5 0.5\n\
         # Threshold range\n0 0\n\
         # Epochs\n300\n\
         # Learning rate\n0.5\n\
         # Momentum\n0.5\n\
         # Mode\n{mode}\n\
         # Test patterns\n4\n\
         # Cross-validation k\n3\n\
         # Hidden activation\nlogistic 1\n\
         # Output activation\nlogistic 1\n\
         # Cost function\nenergy\n\
         # Output file\n{report}\n",
        data = dir.join("or.dat").display(),
        mode = params_extra,
        report = dir.join("report.txt").display(),
    );
    let path = dir.join("Input.txt");
    fs::write(&path, params).unwrap();
    TrainingConfig::load(&path).unwrap()
}

#[test]
fn full_run_writes_report_and_results() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_inputs(dir.path(), "online");
    let results = dir.path().join("Results.txt");

    let folds = bpnn::train::run(&config, &results, &mut StdRng::seed_from_u64(2024)).unwrap();
    assert_eq!(folds.len(), 3);
    for (fold, summary) in folds.iter().enumerate() {
        assert_eq!(summary.outcome.fold, fold);
        assert_eq!(summary.test_errors.len(), 1);
        assert_eq!(summary.crossvalidation_errors.len(), 1);
        // 12 training rows, 4 held out per fold, 300 epochs online.
        assert_eq!(summary.outcome.updates, 300 * 8);
    }
    // OR is linearly separable; after three folds of training it is learnt.
    assert_eq!(folds[2].test_errors, vec![0.0]);

    let report = fs::read_to_string(dir.path().join("report.txt")).unwrap();
    assert!(report.starts_with(&format!("Reading file: {}\n", config.data_file.display())));
    assert!(report.contains("Architecture of the Neural Network: 2:3:1\n"));
    assert!(report.contains("Data Statistics: Min Max Mean StdDev\nInput: 0    1    0.5    0.5\n"));
    assert!(report.contains("Output: 0    1    0.75    0.4330127018922193\n"));
    for fold in 0..3 {
        assert!(report.contains(&format!("excluding every {fold} +n3\n")));
        assert!(report.contains(&format!("Results of cross validation using every {fold} +n3 pattern\n")));
    }
    assert_eq!(report.matches("Results of tests:").count(), 3);
    assert_eq!(report.matches("Output layer weights\n").count(), 3);

    let lines: Vec<String> = fs::read_to_string(&results).unwrap().lines().map(String::from).collect();
    assert_eq!(lines.len(), 4);
    let expected: Vec<&str> = lines.iter().map(|l| l.split_whitespace().nth(1).unwrap()).collect();
    assert_eq!(expected, vec!["0", "1", "1", "1"]);
}

#[test]
fn same_seed_same_report() {
    let run_once = |seed: u64| {
        let dir = tempfile::tempdir().unwrap();
        let config = write_inputs(dir.path(), "batch");
        let results = dir.path().join("Results.txt");
        bpnn::train::run(&config, &results, &mut StdRng::seed_from_u64(seed)).unwrap();
        let report = fs::read_to_string(dir.path().join("report.txt")).unwrap();
        // Paths differ between temp dirs; compare from the statistics on.
        let start = report.find("Data Statistics").unwrap();
        report[start..].to_string()
    };
    assert_eq!(run_once(7), run_once(7));
}

#[test]
fn unwritable_report_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = write_inputs(dir.path(), "online");
    config.output_file = dir.path().join("missing_dir").join("report.txt");
    let results = dir.path().join("Results.txt");
    let err = bpnn::train::run(&config, &results, &mut StdRng::seed_from_u64(1)).unwrap_err();
    assert!(matches!(err, BpnnError::Io { .. }));
}

#[test]
fn rejected_run_keeps_previous_report() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = write_inputs(dir.path(), "online");
    // 16 rows are loaded, so this many test patterns cannot be honoured.
    config.test_patterns = 20;
    fs::write(&config.output_file, "PREVIOUS RUN\n").unwrap();
    let results = dir.path().join("Results.txt");

    let err = bpnn::train::run(&config, &results, &mut StdRng::seed_from_u64(1)).unwrap_err();
    match err {
        BpnnError::Config { field, .. } => assert_eq!(field, "test patterns"),
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(fs::read_to_string(&config.output_file).unwrap(), "PREVIOUS RUN\n");
    assert!(!results.exists());
}
