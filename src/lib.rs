//! # qplayground
//!
//! State-vector quantum circuit simulator with an undo-able playground
//! session and OpenQASM 2.0 export.
//!
//! ## Quick Start
//!
//! ```rust
//! use qplayground::core::{Gate, Simulator};
//!
//! // Create a 2-qubit simulator with reproducible measurements
//! let mut sim = Simulator::with_seed(2, 42)?;
//!
//! // Build a Bell state: (|00⟩ + |11⟩) / √2
//! sim.apply_gate(Gate::H, 0)?.apply_controlled_gate(Gate::X, 0, 1)?;
//!
//! // Inspect probabilities (no collapse)
//! let probs = sim.probabilities();
//! assert!((probs[0] - 0.5).abs() < 1e-12);
//! assert!((probs[3] - 0.5).abs() < 1e-12);
//!
//! // Measure, collapsing the state
//! let m = sim.measure(0)?;
//! assert_eq!(sim.measure(1)?.result, m.result);
//! # Ok::<(), qplayground::SimError>(())
//! ```

pub mod circuit;
pub mod config;
pub mod core;
pub mod error;
pub mod qasm;
pub mod session;

pub use circuit::{CircuitFile, CircuitMetrics, CircuitValidation, GateName, Operation};
pub use config::SimConfig;
pub use error::{Result, SimError};
pub use qasm::circuit_to_qasm;
pub use session::Playground;
