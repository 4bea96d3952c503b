//! Circuits as ordered operation lists.
//!
//! A circuit is a qubit count plus the operations applied to it, in order.
//! Circuit files are JSON:
//!
//! ```json
//! { "numQubits": 2,
//!   "operations": [ { "gate": "H", "target": 0, "time": 0 },
//!                   { "gate": "CNOT", "control": 0, "target": 1, "time": 1 } ] }
//! ```
pub mod analysis;
pub mod operation;

pub use analysis::{CircuitMetrics, CircuitValidation};
pub use operation::{operations_from_json, GateName, Operation, ResolvedGate};

use crate::config::HARD_QUBIT_LIMIT;
use crate::core::Simulator;
use crate::error::{Result, SimError};
use operation::RawOperation;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitFile {
    pub num_qubits: usize,
    pub operations: Vec<Operation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCircuitFile {
    num_qubits: usize,
    operations: Vec<RawOperation>,
}

impl CircuitFile {
    pub fn new(num_qubits: usize, operations: Vec<Operation>) -> Self {
        Self { num_qubits, operations }
    }

    /// Parse circuit JSON; unknown gate names are `UnsupportedGate`, a
    /// register above `HARD_QUBIT_LIMIT` is `InvalidDimension`.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawCircuitFile = serde_json::from_str(json)?;
        if raw.num_qubits > HARD_QUBIT_LIMIT {
            return Err(SimError::InvalidDimension {
                requested: raw.num_qubits,
                max: HARD_QUBIT_LIMIT,
            });
        }
        let operations = raw
            .operations
            .into_iter()
            .map(Operation::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { num_qubits: raw.num_qubits, operations })
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn metrics(&self) -> CircuitMetrics {
        CircuitMetrics::compute(&self.operations, self.num_qubits)
    }

    pub fn validate(&self) -> CircuitValidation {
        CircuitValidation::check(&self.operations, self.num_qubits)
    }

    pub fn to_qasm(&self) -> Result<String> {
        crate::qasm::circuit_to_qasm(&self.operations, self.num_qubits)
    }
}

/// Apply `operations` to `sim` in list order (`time` is ignored).
///
/// Every operation is checked before the first one is applied, so an
/// invalid list leaves `sim` untouched.
pub fn replay(operations: &[Operation], sim: &mut Simulator) -> Result<()> {
    let num_qubits = sim.num_qubits();
    let resolved = operations
        .iter()
        .map(|op| op.check(num_qubits))
        .collect::<Result<Vec<_>>>()?;

    for gate in resolved {
        sim.apply_resolved(gate)?;
    }
    Ok(())
}

/// Build a fresh simulator for `file` and replay its operations.
pub fn simulate(file: &CircuitFile, config: &crate::config::SimConfig) -> Result<Simulator> {
    let mut sim = Simulator::with_config(file.num_qubits, config)?;
    replay(&file.operations, &mut sim)?;
    Ok(sim)
}
