//! Error types for the simulator, exporter and playground session.

use thiserror::Error;

/// Convenience result type used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors raised synchronously by the offending call.
///
/// No variant is ever produced after a partial mutation: every operation
/// validates its inputs before touching the state vector.
#[derive(Debug, Error)]
pub enum SimError {
    /// Qubit count outside `[1, max_qubits]`.
    #[error("invalid qubit count {requested}: must be between 1 and {max}")]
    InvalidDimension { requested: usize, max: usize },

    /// Qubit index outside `[0, num_qubits)`.
    #[error("invalid qubit index {index}: register has only {num_qubits} qubits")]
    InvalidQubitIndex { index: usize, num_qubits: usize },

    /// Structurally invalid request (e.g. control == target).
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Gate name absent from the catalog or translation table.
    #[error("unsupported gate '{0}'")]
    UnsupportedGate(String),

    /// Sampled measurement branch carries ~zero probability.
    #[error("degenerate state: measured outcome {outcome} on qubit {qubit} has probability {probability:e}")]
    DegenerateState {
        qubit: usize,
        outcome: u8,
        probability: f64,
    },

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,

    /// Invalid or unreadable configuration.
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed circuit JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    pub fn invalid_qubit(index: usize, num_qubits: usize) -> Self {
        Self::InvalidQubitIndex { index, num_qubits }
    }

    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    pub fn unsupported_gate(name: impl Into<String>) -> Self {
        Self::UnsupportedGate(name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_qubit_message() {
        let msg = SimError::invalid_qubit(5, 2).to_string();
        assert!(msg.contains('5'));
        assert!(msg.contains('2'));
    }

    #[test]
    fn test_invalid_dimension_message() {
        let err = SimError::InvalidDimension { requested: 0, max: 10 };
        assert!(err.to_string().contains("between 1 and 10"));
    }

    #[test]
    fn test_unsupported_gate_message() {
        let err = SimError::unsupported_gate("FOO");
        assert_eq!(err.to_string(), "unsupported gate 'FOO'");
    }

    #[test]
    fn test_json_error_converts() {
        let bad: std::result::Result<Vec<u8>, _> = serde_json::from_str("[1,");
        let err: SimError = bad.unwrap_err().into();
        assert!(matches!(err, SimError::Json(_)));
    }
}
