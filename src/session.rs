//! Interactive playground session.
//!
//! A `Playground` owns the live simulator for one circuit-editing session
//! and a linear history of immutable snapshots:
//!
//! ```text
//! history: [ |0…0⟩ ] → [ +H q0 ] → [ +CNOT 0→1 ] → …
//!                                        ^ cursor
//! ```
//!
//! Each gate clones the present simulator, applies the gate to the clone and
//! pushes a new snapshot, so undo and redo only move the cursor. Adding a
//! gate or measuring while the cursor is behind the tip discards the redo
//! tail.
use crate::circuit::{replay, CircuitMetrics, CircuitValidation, GateName, Operation};
use crate::config::SimConfig;
use crate::core::{Measurement, Simulator};
use crate::error::{Result, SimError};
use crate::qasm::circuit_to_qasm;
use tracing::debug;

/// One step of the session history.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Circuit as of this step.
    pub operations: Vec<Operation>,
    pub simulator: Simulator,
    /// Cached `simulator.probabilities()`.
    pub probabilities: Vec<f64>,
}

impl Snapshot {
    fn new(operations: Vec<Operation>, simulator: Simulator) -> Self {
        let probabilities = simulator.probabilities();
        Self {
            operations,
            simulator,
            probabilities,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Playground {
    config: SimConfig,
    history: Vec<Snapshot>,
    cursor: usize,
    /// Number of measurements taken per qubit.
    measurement_counts: Vec<usize>,
    last_measurements: Vec<Option<Measurement>>,
}

impl Playground {
    pub fn new(num_qubits: usize, config: SimConfig) -> Result<Self> {
        let simulator = Simulator::with_config(num_qubits, &config)?;
        debug!(num_qubits, "playground created");
        Ok(Self {
            config,
            history: vec![Snapshot::new(Vec::new(), simulator)],
            cursor: 0,
            measurement_counts: vec![0; num_qubits],
            last_measurements: vec![None; num_qubits],
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    fn current(&self) -> &Snapshot {
        &self.history[self.cursor]
    }

    pub fn num_qubits(&self) -> usize {
        self.current().simulator.num_qubits()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn simulator(&self) -> &Simulator {
        &self.current().simulator
    }

    pub fn operations(&self) -> &[Operation] {
        &self.current().operations
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.current().probabilities
    }

    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.history.len()
    }

    pub fn measurement_counts(&self) -> &[usize] {
        &self.measurement_counts
    }

    pub fn last_measurement(&self, qubit: usize) -> Option<Measurement> {
        self.last_measurements.get(qubit).copied().flatten()
    }

    // ── Editing ───────────────────────────────────────────────────────────

    /// Next free time lane for the given qubits.
    fn next_time(&self, qubits: &[usize]) -> usize {
        self.operations()
            .iter()
            .filter(|op| qubits.iter().any(|&q| op.touches(q)))
            .map(|op| op.time + 1)
            .max()
            .unwrap_or(0)
    }

    fn push(&mut self, snapshot: Snapshot) {
        self.history.truncate(self.cursor + 1);
        self.history.push(snapshot);
        self.cursor = self.history.len() - 1;
    }

    /// Append a gate to the circuit and apply it.
    ///
    /// The new operation lands in the first time lane after every existing
    /// operation on its qubits. Returns the recorded operation.
    pub fn add_gate(
        &mut self,
        gate: impl Into<GateName>,
        target: usize,
        control: Option<usize>,
    ) -> Result<Operation> {
        let mut op = Operation {
            gate: gate.into(),
            target,
            control,
            time: 0,
        };
        op.check(self.num_qubits())?;
        op.time = self.next_time(&op.qubits());

        let mut simulator = self.simulator().clone();
        simulator.apply_operation(&op)?;

        let mut operations = self.operations().to_vec();
        operations.push(op.clone());
        self.push(Snapshot::new(operations, simulator));
        debug!(op = %op, step = self.cursor, "gate applied");
        Ok(op)
    }

    /// Like [`add_gate`](Self::add_gate) for a gate name from text input.
    pub fn add_gate_by_name(
        &mut self,
        name: &str,
        target: usize,
        control: Option<usize>,
    ) -> Result<Operation> {
        let gate: GateName = name.parse()?;
        self.add_gate(gate, target, control)
    }

    /// Measure `qubit` on the present step, collapsing it in place.
    pub fn measure(&mut self, qubit: usize) -> Result<Measurement> {
        let snapshot = &mut self.history[self.cursor];
        let measurement = snapshot.simulator.measure(qubit)?;
        snapshot.probabilities = snapshot.simulator.probabilities();

        self.history.truncate(self.cursor + 1);
        self.measurement_counts[qubit] += 1;
        self.last_measurements[qubit] = Some(measurement);
        debug!(
            qubit,
            result = measurement.result,
            probability = measurement.probability,
            "qubit measured"
        );
        Ok(measurement)
    }

    pub fn undo(&mut self) -> Result<()> {
        if !self.can_undo() {
            return Err(SimError::NothingToUndo);
        }
        self.cursor -= 1;
        debug!(step = self.cursor, "undo");
        Ok(())
    }

    pub fn redo(&mut self) -> Result<()> {
        if !self.can_redo() {
            return Err(SimError::NothingToRedo);
        }
        self.cursor += 1;
        debug!(step = self.cursor, "redo");
        Ok(())
    }

    /// Back to |0…0⟩ with an empty circuit, tally and history. Measurement
    /// sampling carries on from the current stream.
    pub fn reset(&mut self) {
        let mut simulator = self.history[0].simulator.clone();
        simulator.reset();
        let num_qubits = simulator.num_qubits();

        self.history = vec![Snapshot::new(Vec::new(), simulator)];
        self.cursor = 0;
        self.measurement_counts = vec![0; num_qubits];
        self.last_measurements = vec![None; num_qubits];
        debug!(num_qubits, "playground reset");
    }

    /// Change the register size, clamped to `[1, max_qubits]`, and reset.
    /// Returns the qubit count actually used.
    pub fn resize(&mut self, num_qubits: usize) -> Result<usize> {
        let clamped = self.config.clamp_qubits(num_qubits);
        let simulator = self.history[0].simulator.resized(clamped)?;

        self.history = vec![Snapshot::new(Vec::new(), simulator)];
        self.cursor = 0;
        self.measurement_counts = vec![0; clamped];
        self.last_measurements = vec![None; clamped];
        debug!(num_qubits = clamped, "playground resized");
        Ok(clamped)
    }

    /// Replace the circuit with `operations`, replayed on a fresh register.
    ///
    /// All-or-nothing: on error the session is unchanged.
    pub fn load_operations(&mut self, operations: Vec<Operation>) -> Result<()> {
        let mut simulator = self.history[0].simulator.clone();
        simulator.reset();
        replay(&operations, &mut simulator)?;

        let count = operations.len();
        self.push(Snapshot::new(operations, simulator));
        debug!(operations = count, step = self.cursor, "circuit loaded");
        Ok(())
    }

    // ── Reporting ─────────────────────────────────────────────────────────

    pub fn export_qasm(&self) -> Result<String> {
        circuit_to_qasm(self.operations(), self.num_qubits())
    }

    pub fn metrics(&self) -> CircuitMetrics {
        CircuitMetrics::compute(self.operations(), self.num_qubits())
            .with_measurements(self.measurement_counts.iter().sum())
    }

    pub fn validate(&self) -> CircuitValidation {
        CircuitValidation::check(self.operations(), self.num_qubits())
    }
}
