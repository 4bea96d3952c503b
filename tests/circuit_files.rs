//! Circuit and config files on disk.
use qplayground::circuit::{simulate, CircuitFile, Operation};
use qplayground::core::{ControlledGate, Gate};
use qplayground::{SimConfig, SimError};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn ghz(n: usize) -> CircuitFile {
    let mut ops = vec![Operation::single(Gate::H, 0, 0)];
    ops.extend((1..n).map(|q| Operation::controlled(ControlledGate::Cnot, 0, q, q)));
    CircuitFile::new(n, ops)
}

#[test]
fn test_saved_circuit_loads_back() {
    let circuit = ghz(3);
    let file = write_temp(&circuit.to_json().unwrap());
    let loaded = CircuitFile::load(file.path()).unwrap();
    assert_eq!(loaded, circuit);
    assert_eq!(loaded.to_qasm().unwrap(), circuit.to_qasm().unwrap());
}

#[test]
fn test_simulate_with_config_file() {
    let config_file = write_temp("max_qubits = 4\nseed = 3\n");
    let config = SimConfig::load(config_file.path()).unwrap();

    let sim = simulate(&ghz(4), &config).unwrap();
    let probs = sim.probabilities();
    assert!((probs[0] - 0.5).abs() < 1e-12);
    assert!((probs[15] - 0.5).abs() < 1e-12);

    assert!(matches!(
        simulate(&ghz(5), &config),
        Err(SimError::InvalidDimension { requested: 5, max: 4 })
    ));
}

#[test]
fn test_seeded_runs_agree() {
    let config = SimConfig::seeded(1234);
    let outcomes = || {
        let mut sim = simulate(&ghz(3), &config).unwrap();
        sim.measure_all().unwrap().into_iter().map(|m| m.result).collect::<Vec<_>>()
    };
    let first = outcomes();
    assert_eq!(first, outcomes());
    assert!(first.iter().all(|&r| r == first[0]));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CircuitFile::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, SimError::Io(_)));
}

#[test]
fn test_malformed_json_is_json_error() {
    let file = write_temp("{ \"numQubits\": 2, ");
    assert!(matches!(CircuitFile::load(file.path()), Err(SimError::Json(_))));
}

#[test]
fn test_bad_config_rejected() {
    let file = write_temp("max_qubits = 64\n");
    assert!(matches!(SimConfig::load(file.path()), Err(SimError::Config(_))));
    let file = write_temp("qubits = 3\n");
    assert!(matches!(SimConfig::load(file.path()), Err(SimError::Config(_))));
}
