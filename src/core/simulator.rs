//! High-level simulator interface.
//!
//! `Simulator` wraps the state vector behind a validated API:
//!   - Single-qubit and controlled gate application
//!   - Measurement with wavefunction collapse
//!   - Seeded mode for reproducible measurement outcomes
//!   - Deep cloning for undo history
//!
//! A clone copies the amplitudes but not the RNG position: the copy is
//! seeded from a draw on the original's stream, so clones and the original
//! sample independently while a seeded run stays reproducible.
//!
//! Every method validates its arguments before touching the amplitudes, so
//! a returned error never leaves a half-applied gate behind.
use super::gates::{self, apply_controlled_gate, apply_single_qubit_gate, Gate, Matrix2x2};
use super::state::{Measurement, StateVector};
use crate::circuit::{Operation, ResolvedGate};
use crate::config::SimConfig;
use crate::error::{Result, SimError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::fmt;

#[derive(Debug)]
pub struct Simulator {
    state: StateVector,
    /// Sampling source for measurement. Interior mutability lets `clone`
    /// advance it through a shared reference.
    rng: RefCell<StdRng>,
    tolerance: f64,
}

impl Clone for Simulator {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            rng: RefCell::new(self.fork_rng()),
            tolerance: self.tolerance,
        }
    }
}

impl Simulator {
    /// Create a simulator for `num_qubits` qubits in |0...0⟩ with the default config.
    pub fn new(num_qubits: usize) -> Result<Self> {
        Self::with_config(num_qubits, &SimConfig::default())
    }

    /// Create a simulator whose measurements are reproducible for a given seed.
    pub fn with_seed(num_qubits: usize, seed: u64) -> Result<Self> {
        Self::with_config(num_qubits, &SimConfig::seeded(seed))
    }

    pub fn with_config(num_qubits: usize, config: &SimConfig) -> Result<Self> {
        config.check_qubits(num_qubits)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            state: StateVector::new(num_qubits)?,
            rng: RefCell::new(rng),
            tolerance: config.tolerance,
        })
    }

    /// A fresh |0...0⟩ register of another size whose RNG is forked from
    /// this one, as `clone` does.
    pub fn resized(&self, num_qubits: usize) -> Result<Self> {
        Ok(Self {
            state: StateVector::new(num_qubits)?,
            rng: RefCell::new(self.fork_rng()),
            tolerance: self.tolerance,
        })
    }

    fn fork_rng(&self) -> StdRng {
        let seed: u64 = self.rng.borrow_mut().gen();
        StdRng::seed_from_u64(seed)
    }

    pub fn num_qubits(&self) -> usize {
        self.state.num_qubits
    }

    /// Read-only view of the amplitudes.
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits() {
            return Err(SimError::invalid_qubit(qubit, self.num_qubits()));
        }
        Ok(())
    }

    // ── Gates ─────────────────────────────────────────────────────────────

    pub fn apply_gate(&mut self, gate: Gate, target: usize) -> Result<&mut Self> {
        self.check_qubit(target)?;
        apply_single_qubit_gate(&mut self.state, &gate.matrix(), target);
        Ok(self)
    }

    /// Apply `gate` to `target` on the branches where `control` is |1⟩.
    pub fn apply_controlled_gate(
        &mut self,
        gate: Gate,
        control: usize,
        target: usize,
    ) -> Result<&mut Self> {
        self.check_qubit(control)?;
        self.check_qubit(target)?;
        if control == target {
            return Err(SimError::invalid_operation(
                "control and target qubits cannot be the same",
            ));
        }
        apply_controlled_gate(&mut self.state, &gate.matrix(), control, target);
        Ok(self)
    }

    /// Apply an arbitrary 2×2 matrix. Non-unitary matrices are rejected.
    pub fn apply_matrix(&mut self, matrix: &Matrix2x2, target: usize) -> Result<&mut Self> {
        self.check_qubit(target)?;
        if !gates::is_unitary(matrix, self.tolerance) {
            return Err(SimError::invalid_operation("matrix is not unitary"));
        }
        apply_single_qubit_gate(&mut self.state, matrix, target);
        Ok(self)
    }

    /// Apply a circuit operation, resolving controlled gates to their base.
    pub fn apply_operation(&mut self, op: &Operation) -> Result<&mut Self> {
        let resolved = op.check(self.num_qubits())?;
        self.apply_resolved(resolved)
    }

    pub(crate) fn apply_resolved(&mut self, gate: ResolvedGate) -> Result<&mut Self> {
        match gate {
            ResolvedGate::Single { gate, target } => self.apply_gate(gate, target),
            ResolvedGate::Controlled { gate, control, target } => {
                self.apply_controlled_gate(gate.base(), control, target)
            }
        }
    }

    // ── Measurement ───────────────────────────────────────────────────────

    /// Measure `qubit`, collapsing the state. The simulator stays usable.
    pub fn measure(&mut self, qubit: usize) -> Result<Measurement> {
        self.check_qubit(qubit)?;
        let r: f64 = self.rng.get_mut().gen();
        self.state.collapse(qubit, r)
    }

    /// Measure all qubits in index order.
    pub fn measure_all(&mut self) -> Result<Vec<Measurement>> {
        (0..self.num_qubits()).map(|q| self.measure(q)).collect()
    }

    /// Probabilities of every basis state without collapsing.
    pub fn probabilities(&self) -> Vec<f64> {
        self.state.probabilities()
    }

    /// Probability of `qubit` measuring as |1⟩.
    pub fn qubit_probability_one(&self, qubit: usize) -> Result<f64> {
        self.check_qubit(qubit)?;
        Ok(self.state.marginal_probability_one(qubit))
    }

    /// True while Σ|a|² stays within the configured tolerance of 1.
    pub fn is_normalized(&self) -> bool {
        self.state.is_normalized(self.tolerance)
    }

    // ── State Control ─────────────────────────────────────────────────────

    /// Reset to |0...0⟩. The RNG stream continues.
    pub fn reset(&mut self) {
        self.state.reset();
    }
}

impl fmt::Display for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state)
    }
}
