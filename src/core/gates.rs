//! Gate catalog and gate application kernels.
//!
//! Gates are 2×2 complex unitary matrices. The catalog is a closed enum
//! with a total mapping to matrices, so only names arriving as text can
//! fail to resolve.
//!
//! Application strategy: iterate over all 2^n basis states, pair up the
//! states that differ only in the target qubit, then apply the 2×2 matrix
//! to each pair. O(2^n) per gate.
use super::complex::Complex;
use super::state::StateVector;
use crate::error::SimError;
use std::f64::consts::{FRAC_1_SQRT_2, PI};
use std::fmt;
use std::str::FromStr;

/// A 2×2 complex matrix, row-major: `matrix[row][col]`.
pub type Matrix2x2 = [[Complex; 2]; 2];

// ── Catalog ────────────────────────────────────────────────────────────────

/// Fixed single-qubit gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    I,
    H,
    X,
    Y,
    Z,
    S,
    T,
}

impl Gate {
    pub const ALL: [Gate; 7] = [Gate::I, Gate::H, Gate::X, Gate::Y, Gate::Z, Gate::S, Gate::T];

    pub fn matrix(self) -> Matrix2x2 {
        match self {
            Gate::I => identity(),
            Gate::H => hadamard(),
            Gate::X => pauli_x(),
            Gate::Y => pauli_y(),
            Gate::Z => pauli_z(),
            Gate::S => s_gate(),
            Gate::T => t_gate(),
        }
    }

    /// Canonical name, as used in circuit files.
    pub fn name(self) -> &'static str {
        match self {
            Gate::I => "I",
            Gate::H => "H",
            Gate::X => "X",
            Gate::Y => "Y",
            Gate::Z => "Z",
            Gate::S => "S",
            Gate::T => "T",
        }
    }

    /// OpenQASM 2.0 (`qelib1.inc`) mnemonic.
    pub fn qasm(self) -> &'static str {
        match self {
            Gate::I => "id",
            Gate::H => "h",
            Gate::X => "x",
            Gate::Y => "y",
            Gate::Z => "z",
            Gate::S => "s",
            Gate::T => "t",
        }
    }

    /// The controlled form of this gate, if one exists.
    pub fn controlled(self) -> Option<ControlledGate> {
        ControlledGate::ALL.into_iter().find(|c| c.base() == self)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Gate {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "I" | "ID" | "IDENTITY" => Ok(Gate::I),
            "H" | "HADAMARD" => Ok(Gate::H),
            "X" => Ok(Gate::X),
            "Y" => Ok(Gate::Y),
            "Z" => Ok(Gate::Z),
            "S" | "PHASE" => Ok(Gate::S),
            "T" => Ok(Gate::T),
            _ => Err(SimError::unsupported_gate(s)),
        }
    }
}

/// Controlled two-qubit gates, each wrapping a base single-qubit gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlledGate {
    Cnot,
    Cy,
    Cz,
    Ch,
}

impl ControlledGate {
    pub const ALL: [ControlledGate; 4] = [
        ControlledGate::Cnot,
        ControlledGate::Cy,
        ControlledGate::Cz,
        ControlledGate::Ch,
    ];

    /// The gate applied to the target when the control is |1⟩.
    pub fn base(self) -> Gate {
        match self {
            ControlledGate::Cnot => Gate::X,
            ControlledGate::Cy => Gate::Y,
            ControlledGate::Cz => Gate::Z,
            ControlledGate::Ch => Gate::H,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ControlledGate::Cnot => "CNOT",
            ControlledGate::Cy => "CY",
            ControlledGate::Cz => "CZ",
            ControlledGate::Ch => "CH",
        }
    }

    pub fn qasm(self) -> &'static str {
        match self {
            ControlledGate::Cnot => "cx",
            ControlledGate::Cy => "cy",
            ControlledGate::Cz => "cz",
            ControlledGate::Ch => "ch",
        }
    }
}

impl fmt::Display for ControlledGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ControlledGate {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CNOT" | "CX" => Ok(ControlledGate::Cnot),
            "CY" => Ok(ControlledGate::Cy),
            "CZ" => Ok(ControlledGate::Cz),
            "CH" => Ok(ControlledGate::Ch),
            _ => Err(SimError::unsupported_gate(s)),
        }
    }
}

// ── Standard Gate Matrices ─────────────────────────────────────────────────

/// Identity gate: no-op.
pub fn identity() -> Matrix2x2 {
    [
        [Complex::ONE, Complex::ZERO],
        [Complex::ZERO, Complex::ONE],
    ]
}

/// Hadamard gate: creates superposition from a basis state.
/// H = (1/√2) * [[1, 1], [1, -1]]
pub fn hadamard() -> Matrix2x2 {
    let h = Complex::new(FRAC_1_SQRT_2, 0.0);
    [
        [h, h],
        [h, -h],
    ]
}

/// Pauli-X gate: quantum NOT, flips |0⟩ ↔ |1⟩.
pub fn pauli_x() -> Matrix2x2 {
    [
        [Complex::ZERO, Complex::ONE],
        [Complex::ONE, Complex::ZERO],
    ]
}

/// Pauli-Y gate: bit + phase flip.
/// Y = [[0, -i], [i, 0]]
pub fn pauli_y() -> Matrix2x2 {
    [
        [Complex::ZERO, -Complex::I],
        [Complex::I, Complex::ZERO],
    ]
}

/// Pauli-Z gate: phase flip, |1⟩ → -|1⟩.
pub fn pauli_z() -> Matrix2x2 {
    [
        [Complex::ONE, Complex::ZERO],
        [Complex::ZERO, -Complex::ONE],
    ]
}

/// S gate: π/2 phase.
/// S = [[1, 0], [0, i]]
pub fn s_gate() -> Matrix2x2 {
    [
        [Complex::ONE, Complex::ZERO],
        [Complex::ZERO, Complex::I],
    ]
}

/// T gate: π/4 phase.
/// T = [[1, 0], [0, e^(iπ/4)]]
pub fn t_gate() -> Matrix2x2 {
    [
        [Complex::ONE, Complex::ZERO],
        [Complex::ZERO, Complex::from_polar(1.0, PI / 4.0)],
    ]
}

// ── Matrix helpers ─────────────────────────────────────────────────────────

pub fn conjugate_transpose(m: &Matrix2x2) -> Matrix2x2 {
    [
        [m[0][0].conjugate(), m[1][0].conjugate()],
        [m[0][1].conjugate(), m[1][1].conjugate()],
    ]
}

pub fn matmul(a: &Matrix2x2, b: &Matrix2x2) -> Matrix2x2 {
    let mut out = [[Complex::ZERO; 2]; 2];
    for (r, row) in out.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = a[r][0] * b[0][c] + a[r][1] * b[1][c];
        }
    }
    out
}

/// True if `M·M† = I` elementwise within `eps`.
pub fn is_unitary(m: &Matrix2x2, eps: f64) -> bool {
    let product = matmul(m, &conjugate_transpose(m));
    let id = identity();
    (0..2).all(|r| (0..2).all(|c| product[r][c].approx_eq(&id[r][c], eps)))
}

// ── Gate Application ───────────────────────────────────────────────────────
//
// Kernels assume the caller has validated every qubit index.

#[inline(always)]
fn apply_to_pair(state: &mut StateVector, gate: &Matrix2x2, i: usize, j: usize) {
    let a0 = state.amplitudes[i];
    let a1 = state.amplitudes[j];
    state.amplitudes[i] = gate[0][0] * a0 + gate[0][1] * a1;
    state.amplitudes[j] = gate[1][0] * a0 + gate[1][1] * a1;
}

/// Apply a single-qubit gate to `target`, identity on all other qubits.
pub fn apply_single_qubit_gate(state: &mut StateVector, gate: &Matrix2x2, target: usize) {
    debug_assert!(target < state.num_qubits, "target qubit out of range");
    let mask = 1 << target;

    for i in 0..state.dim() {
        // Visit each pair once, from its |…0…⟩ member
        if i & mask == 0 {
            apply_to_pair(state, gate, i, i | mask);
        }
    }
}

/// Apply `gate` to `target` on every basis state whose `control` bit is 1.
/// Basis states with control = 0 are left untouched.
pub fn apply_controlled_gate(
    state: &mut StateVector,
    gate: &Matrix2x2,
    control: usize,
    target: usize,
) {
    debug_assert!(control < state.num_qubits, "control qubit out of range");
    debug_assert!(target < state.num_qubits, "target qubit out of range");
    debug_assert_ne!(control, target, "control and target must be different qubits");

    let control_mask = 1 << control;
    let target_mask = 1 << target;

    for i in 0..state.dim() {
        if (i & control_mask != 0) && (i & target_mask == 0) {
            apply_to_pair(state, gate, i, i | target_mask);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nearly_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    #[test]
    fn test_catalog_is_unitary() {
        for gate in Gate::ALL {
            assert!(is_unitary(&gate.matrix(), 1e-9), "{gate} is not unitary");
        }
    }

    #[test]
    fn test_name_round_trip() {
        for gate in Gate::ALL {
            assert_eq!(gate.name().parse::<Gate>().unwrap(), gate);
        }
        for gate in ControlledGate::ALL {
            assert_eq!(gate.name().parse::<ControlledGate>().unwrap(), gate);
        }
    }

    #[test]
    fn test_parse_aliases_and_case() {
        assert_eq!("h".parse::<Gate>().unwrap(), Gate::H);
        assert_eq!("Identity".parse::<Gate>().unwrap(), Gate::I);
        assert_eq!("cx".parse::<ControlledGate>().unwrap(), ControlledGate::Cnot);
    }

    #[test]
    fn test_unknown_name_is_unsupported() {
        assert!(matches!("U3".parse::<Gate>(), Err(SimError::UnsupportedGate(_))));
        assert!(matches!("CCX".parse::<ControlledGate>(), Err(SimError::UnsupportedGate(_))));
    }

    #[test]
    fn test_controlled_mapping() {
        assert_eq!(ControlledGate::Cnot.base(), Gate::X);
        assert_eq!(ControlledGate::Cy.base(), Gate::Y);
        assert_eq!(ControlledGate::Cz.base(), Gate::Z);
        assert_eq!(Gate::X.controlled(), Some(ControlledGate::Cnot));
        assert_eq!(Gate::T.controlled(), None);
    }

    #[test]
    fn test_x_gate_flips_qubit() {
        let mut state = StateVector::new(1).unwrap();
        apply_single_qubit_gate(&mut state, &pauli_x(), 0);
        assert!(nearly_eq(state.probability(0), 0.0));
        assert!(nearly_eq(state.probability(1), 1.0));
    }

    #[test]
    fn test_hadamard_twice_is_identity() {
        let mut state = StateVector::new(1).unwrap();
        let h = hadamard();
        apply_single_qubit_gate(&mut state, &h, 0);
        assert!(nearly_eq(state.probability(0), 0.5));
        apply_single_qubit_gate(&mut state, &h, 0);
        assert!(nearly_eq(state.probability(0), 1.0));
        assert!(nearly_eq(state.probability(1), 0.0));
    }

    #[test]
    fn test_gate_on_high_qubit_leaves_low_qubit() {
        // X on qubit 2 of |000⟩ → |100⟩ = index 4
        let mut state = StateVector::new(3).unwrap();
        apply_single_qubit_gate(&mut state, &pauli_x(), 2);
        assert!(nearly_eq(state.probability(4), 1.0));
    }

    #[test]
    fn test_z_gate_phase_flip() {
        let mut state = StateVector::new(1).unwrap();
        apply_single_qubit_gate(&mut state, &pauli_x(), 0);
        apply_single_qubit_gate(&mut state, &pauli_z(), 0);
        assert!(nearly_eq(state.amplitudes[1].real, -1.0));
    }

    #[test]
    fn test_controlled_x_requires_control() {
        // |00⟩ untouched
        let mut state = StateVector::new(2).unwrap();
        apply_controlled_gate(&mut state, &pauli_x(), 0, 1);
        assert!(nearly_eq(state.probability(0), 1.0));

        // |01⟩ (qubit 0 = 1) → |11⟩
        apply_single_qubit_gate(&mut state, &pauli_x(), 0);
        apply_controlled_gate(&mut state, &pauli_x(), 0, 1);
        assert!(nearly_eq(state.probability(3), 1.0));
    }

    #[test]
    fn test_bell_state_creation() {
        let mut state = StateVector::new(2).unwrap();
        apply_single_qubit_gate(&mut state, &hadamard(), 0);
        apply_controlled_gate(&mut state, &pauli_x(), 0, 1);

        assert!(nearly_eq(state.probability(0), 0.5));
        assert!(nearly_eq(state.probability(1), 0.0));
        assert!(nearly_eq(state.probability(2), 0.0));
        assert!(nearly_eq(state.probability(3), 0.5));
    }

    #[test]
    fn test_controlled_z_phase_on_11_only() {
        let mut state = StateVector::new(2).unwrap();
        apply_single_qubit_gate(&mut state, &pauli_x(), 0);
        apply_single_qubit_gate(&mut state, &pauli_x(), 1);
        apply_controlled_gate(&mut state, &pauli_z(), 0, 1);
        assert!(nearly_eq(state.amplitudes[3].real, -1.0));
    }
}
