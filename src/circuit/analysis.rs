//! Static circuit analysis: metrics and validation without simulating.
//!
//! | Metric               | Description                                          |
//! |----------------------|------------------------------------------------------|
//! | `depth`              | Critical-path length assuming unbounded parallelism  |
//! | `total_gates`        | Number of operations                                 |
//! | `single_qubit_gates` | Operations without a control                         |
//! | `multi_qubit_gates`  | Controlled operations                                |
//! | `measurements`       | Measurements recorded by the caller (e.g. a session) |
use super::operation::{GateName, Operation};
use crate::config::HARD_QUBIT_LIMIT;
use crate::core::gates::Gate;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

// ── Metrics ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitMetrics {
    pub depth: usize,
    pub total_gates: usize,
    pub multi_qubit_gates: usize,
    pub single_qubit_gates: usize,
    pub measurements: usize,
}

impl CircuitMetrics {
    /// Compute metrics for `operations` on a register of `num_qubits`.
    ///
    /// Operations referencing qubits outside the register, or beyond
    /// `HARD_QUBIT_LIMIT`, are counted but do not contribute to depth.
    /// `measurements` is left at zero.
    pub fn compute(operations: &[Operation], num_qubits: usize) -> Self {
        let tracked = num_qubits.min(HARD_QUBIT_LIMIT);
        // `frontier[q]` = depth reached so far on qubit `q`
        let mut frontier = vec![0usize; tracked];
        let mut metrics = Self::default();

        for op in operations {
            metrics.total_gates += 1;
            if op.is_multi_qubit() {
                metrics.multi_qubit_gates += 1;
            } else {
                metrics.single_qubit_gates += 1;
            }

            let qubits: Vec<usize> = op.qubits().into_iter().filter(|&q| q < tracked).collect();
            let start = qubits.iter().map(|&q| frontier[q]).max().unwrap_or(0);
            for &q in &qubits {
                frontier[q] = start + 1;
            }
        }

        metrics.depth = frontier.into_iter().max().unwrap_or(0);
        metrics
    }

    pub fn with_measurements(mut self, measurements: usize) -> Self {
        self.measurements = measurements;
        self
    }
}

impl fmt::Display for CircuitMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Depth          : {}", self.depth)?;
        writeln!(f, "  Total gates    : {}", self.total_gates)?;
        writeln!(f, "  Single-qubit   : {}", self.single_qubit_gates)?;
        writeln!(f, "  Multi-qubit    : {}", self.multi_qubit_gates)?;
        writeln!(f, "  Measurements   : {}", self.measurements)
    }
}

// ── Validation ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl CircuitValidation {
    /// Check every operation against a register of `num_qubits`.
    ///
    /// Errors make the circuit unrunnable; warnings flag likely mistakes
    /// (idle qubits, no-op gates, overlapping time lanes).
    pub fn check(operations: &[Operation], num_qubits: usize) -> Self {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if num_qubits == 0 {
            errors.push("circuit must have at least one qubit".to_string());
        }
        if num_qubits > HARD_QUBIT_LIMIT {
            errors.push(format!(
                "circuit has {num_qubits} qubits, at most {HARD_QUBIT_LIMIT} are supported"
            ));
        }
        if operations.is_empty() {
            warnings.push("circuit has no operations".to_string());
        }

        let tracked = num_qubits.min(HARD_QUBIT_LIMIT);
        let mut used = vec![false; tracked];
        let mut lanes: HashMap<(usize, usize), usize> = HashMap::new();

        for (index, op) in operations.iter().enumerate() {
            if let Err(e) = op.check(num_qubits) {
                errors.push(format!("operation {index} ({op}): {e}"));
                continue;
            }

            if op.gate == GateName::Single(Gate::I) {
                warnings.push(format!("operation {index} ({op}) is an identity gate"));
            }

            for q in op.qubits() {
                if let Some(slot) = used.get_mut(q) {
                    *slot = true;
                }
                if let Some(prev) = lanes.insert((q, op.time), index) {
                    warnings.push(format!(
                        "operations {prev} and {index} share time step {} on qubit {q}",
                        op.time
                    ));
                }
            }
        }

        if !operations.is_empty() {
            for q in (0..tracked).filter(|&q| !used[q]) {
                warnings.push(format!("qubit {q} is never used"));
            }
        }

        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

impl fmt::Display for CircuitValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Valid          : {}", if self.is_valid { "yes" } else { "no" })?;
        for e in &self.errors {
            writeln!(f, "  error: {e}")?;
        }
        for w in &self.warnings {
            writeln!(f, "  warning: {w}")?;
        }
        Ok(())
    }
}
