pub mod complex;
pub mod gates;
pub mod simulator;
pub mod state;

// Convenience re-exports for library users
pub use complex::Complex;
pub use gates::{ControlledGate, Gate, Matrix2x2};
pub use simulator::Simulator;
pub use state::{Measurement, StateVector};
