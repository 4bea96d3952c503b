//! Circuit operations.
//!
//! An `Operation` names a gate, its target and optional control qubit, and a
//! `time` lane used only for presentation. Simulators apply operations in
//! list order regardless of `time`.
//!
//! Gate names arriving as text (circuit files, suggested circuits) resolve
//! through [`GateName`]; anything outside the catalog is `UnsupportedGate`.
use crate::core::gates::{ControlledGate, Gate};
use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── GateName ──────────────────────────────────────────────────────────────

/// Any gate an operation may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GateName {
    Single(Gate),
    Controlled(ControlledGate),
}

impl GateName {
    pub fn name(self) -> &'static str {
        match self {
            Self::Single(g) => g.name(),
            Self::Controlled(c) => c.name(),
        }
    }
}

impl From<Gate> for GateName {
    fn from(gate: Gate) -> Self {
        Self::Single(gate)
    }
}

impl From<ControlledGate> for GateName {
    fn from(gate: ControlledGate) -> Self {
        Self::Controlled(gate)
    }
}

impl FromStr for GateName {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<ControlledGate>()
            .map(Self::Controlled)
            .or_else(|_| s.parse::<Gate>().map(Self::Single))
    }
}

impl TryFrom<String> for GateName {
    type Error = SimError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<GateName> for String {
    fn from(name: GateName) -> Self {
        name.name().to_string()
    }
}

impl fmt::Display for GateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Operation ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOperation")]
pub struct Operation {
    pub gate: GateName,
    pub target: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control: Option<usize>,
    /// Rendering lane; does not affect simulation order.
    pub time: usize,
}

/// An operation whose gate/control pairing has been checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedGate {
    Single { gate: Gate, target: usize },
    Controlled { gate: ControlledGate, control: usize, target: usize },
}

impl Operation {
    pub fn single(gate: Gate, target: usize, time: usize) -> Self {
        Self { gate: GateName::Single(gate), target, control: None, time }
    }

    pub fn controlled(gate: ControlledGate, control: usize, target: usize, time: usize) -> Self {
        Self { gate: GateName::Controlled(gate), target, control: Some(control), time }
    }

    /// Qubits touched by this operation, control first.
    pub fn qubits(&self) -> Vec<usize> {
        match self.control {
            Some(c) => vec![c, self.target],
            None => vec![self.target],
        }
    }

    pub fn is_multi_qubit(&self) -> bool {
        self.control.is_some()
    }

    pub fn touches(&self, qubit: usize) -> bool {
        self.target == qubit || self.control == Some(qubit)
    }

    /// Pair the gate with its control qubit.
    ///
    /// A single gate given a control has no controlled form in the catalog
    /// (`UnsupportedGate`); a controlled gate without a control is
    /// `InvalidOperation`.
    pub fn resolve(&self) -> Result<ResolvedGate> {
        match (self.gate, self.control) {
            (GateName::Single(gate), None) => Ok(ResolvedGate::Single { gate, target: self.target }),
            (GateName::Controlled(gate), Some(control)) => Ok(ResolvedGate::Controlled {
                gate,
                control,
                target: self.target,
            }),
            (GateName::Single(gate), Some(_)) => Err(SimError::unsupported_gate(format!(
                "{gate} (no controlled form)"
            ))),
            (GateName::Controlled(gate), None) => Err(SimError::invalid_operation(format!(
                "{gate} requires a control qubit"
            ))),
        }
    }

    /// Resolve and validate qubit indices against a register of `num_qubits`.
    pub fn check(&self, num_qubits: usize) -> Result<ResolvedGate> {
        let resolved = self.resolve()?;
        for q in self.qubits() {
            if q >= num_qubits {
                return Err(SimError::invalid_qubit(q, num_qubits));
            }
        }
        if self.control == Some(self.target) {
            return Err(SimError::invalid_operation(
                "control and target qubits cannot be the same",
            ));
        }
        Ok(resolved)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.control {
            Some(c) => write!(f, "{} {c} {} @t{}", self.gate, self.target, self.time),
            None => write!(f, "{} {} @t{}", self.gate, self.target, self.time),
        }
    }
}

/// Wire form of an operation with the gate still as text.
#[derive(Debug, Deserialize)]
pub(crate) struct RawOperation {
    gate: String,
    target: usize,
    #[serde(default)]
    control: Option<usize>,
    #[serde(default)]
    time: usize,
}

impl TryFrom<RawOperation> for Operation {
    type Error = SimError;

    fn try_from(raw: RawOperation) -> Result<Self> {
        Ok(Self {
            gate: raw.gate.parse()?,
            target: raw.target,
            control: raw.control,
            time: raw.time,
        })
    }
}

/// Parse a JSON array of operations.
///
/// Unknown gate names surface as `UnsupportedGate` rather than a JSON error.
pub fn operations_from_json(json: &str) -> Result<Vec<Operation>> {
    let raw: Vec<RawOperation> = serde_json::from_str(json)?;
    raw.into_iter().map(Operation::try_from).collect()
}
