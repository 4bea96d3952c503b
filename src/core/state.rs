//! Quantum state vector representation.
//!
//! An n-qubit register has 2^n basis states and one complex amplitude per
//! basis state. Qubit `b` is bit `b` of the basis index (qubit 0 is the
//! least-significant bit). The vector satisfies Σ|αᵢ|² = 1.
use super::complex::Complex;
use crate::config::HARD_QUBIT_LIMIT;
use crate::error::{Result, SimError};
use serde::Serialize;
use std::fmt;

/// Below this the sampled branch is treated as impossible.
const DEGENERATE_PROBABILITY: f64 = 1e-12;

/// Outcome of a single-qubit projective measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    /// Measured bit, 0 or 1.
    pub result: u8,
    /// Probability of the sampled outcome before collapse.
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    pub num_qubits: usize,
    pub amplitudes: Vec<Complex>,
}

impl StateVector {
    /// Create a state vector initialized to |0...0⟩.
    ///
    /// Fails with `InvalidDimension` outside `1..=HARD_QUBIT_LIMIT`; callers
    /// apply the tighter configured cap first.
    pub fn new(num_qubits: usize) -> Result<Self> {
        if num_qubits == 0 || num_qubits > HARD_QUBIT_LIMIT {
            return Err(SimError::InvalidDimension {
                requested: num_qubits,
                max: HARD_QUBIT_LIMIT,
            });
        }

        let dim = 1 << num_qubits;
        let mut amplitudes = vec![Complex::ZERO; dim];
        amplitudes[0] = Complex::ONE;

        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// Dimension of the state space: 2^n
    #[inline(always)]
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Probability of basis state `index`: |αᵢ|²
    #[inline(always)]
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitudes[index].magnitude_squared()
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex::magnitude_squared).collect()
    }

    /// Total probability (≈ 1.0 for a valid state)
    pub fn total_probability(&self) -> f64 {
        self.amplitudes.iter().map(Complex::magnitude_squared).sum()
    }

    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.total_probability() - 1.0).abs() <= tolerance
    }

    /// Reset to |0...0⟩
    pub fn reset(&mut self) {
        self.amplitudes.fill(Complex::ZERO);
        self.amplitudes[0] = Complex::ONE;
    }

    /// Value of `qubit` in basis state `basis_idx`.
    #[inline(always)]
    pub fn qubit_bit(basis_idx: usize, qubit: usize) -> bool {
        (basis_idx >> qubit) & 1 == 1
    }

    /// Ket label for basis state `index`, qubit 0 rightmost: |010⟩ → "010".
    pub fn basis_label(&self, index: usize) -> String {
        (0..self.num_qubits)
            .rev()
            .map(|q| if Self::qubit_bit(index, q) { '1' } else { '0' })
            .collect()
    }

    /// Probability of measuring `qubit` as |1⟩, marginalized over the rest.
    pub fn marginal_probability_one(&self, qubit: usize) -> f64 {
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| Self::qubit_bit(*i, qubit))
            .map(|(_, a)| a.magnitude_squared())
            .sum()
    }

    /// Projective measurement of `qubit` given a uniform sample `r ∈ [0, 1)`.
    ///
    /// Outcome is 1 iff `r < P(qubit = 1)`. Amplitudes inconsistent with the
    /// outcome are zeroed and the survivors divided by √P(outcome). Nothing
    /// is mutated when an error is returned.
    pub fn collapse(&mut self, qubit: usize, r: f64) -> Result<Measurement> {
        if qubit >= self.num_qubits {
            return Err(SimError::invalid_qubit(qubit, self.num_qubits));
        }

        let prob_one = self.marginal_probability_one(qubit);
        let outcome = r < prob_one;
        let probability = if outcome {
            prob_one
        } else {
            self.total_probability() - prob_one
        };
        let result = u8::from(outcome);

        if probability < DEGENERATE_PROBABILITY {
            return Err(SimError::DegenerateState {
                qubit,
                outcome: result,
                probability,
            });
        }

        let inv_norm = 1.0 / probability.sqrt();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp = if Self::qubit_bit(i, qubit) == outcome {
                amp.scale(inv_norm)
            } else {
                Complex::ZERO
            };
        }

        Ok(Measurement {
            result,
            probability,
        })
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "StateVector ({} qubits, dim={}):", self.num_qubits, self.dim())?;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let prob = amp.magnitude_squared();
            if prob > 1e-12 {
                writeln!(
                    f,
                    "  |{}⟩  amplitude: {}  probability: {:.4}",
                    self.basis_label(i),
                    amp,
                    prob
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn plus_state() -> StateVector {
        let mut sv = StateVector::new(1).unwrap();
        let amp = Complex::new(FRAC_1_SQRT_2, 0.0);
        sv.amplitudes[0] = amp;
        sv.amplitudes[1] = amp;
        sv
    }

    #[test]
    fn test_initial_state() {
        let sv = StateVector::new(2).unwrap();
        assert_eq!(sv.dim(), 4);
        assert_eq!(sv.amplitudes[0], Complex::ONE);
        assert!(sv.amplitudes[1..].iter().all(|a| *a == Complex::ZERO));
        assert!(sv.is_normalized(1e-12));
    }

    #[test]
    fn test_new_rejects_bad_dimension() {
        assert!(matches!(
            StateVector::new(0),
            Err(SimError::InvalidDimension { requested: 0, .. })
        ));
        assert!(matches!(
            StateVector::new(HARD_QUBIT_LIMIT + 1),
            Err(SimError::InvalidDimension { max: HARD_QUBIT_LIMIT, .. })
        ));
    }

    #[test]
    fn test_qubit_bit() {
        // 5 = 0b101: qubit 0 = 1, qubit 1 = 0, qubit 2 = 1
        assert!(StateVector::qubit_bit(5, 0));
        assert!(!StateVector::qubit_bit(5, 1));
        assert!(StateVector::qubit_bit(5, 2));
    }

    #[test]
    fn test_basis_label() {
        let sv = StateVector::new(3).unwrap();
        assert_eq!(sv.basis_label(0), "000");
        assert_eq!(sv.basis_label(1), "001");
        assert_eq!(sv.basis_label(6), "110");
    }

    #[test]
    fn test_marginal_probability() {
        let sv = plus_state();
        assert!((sv.marginal_probability_one(0) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_collapse_to_one() {
        let mut sv = plus_state();
        let m = sv.collapse(0, 0.1).unwrap();
        assert_eq!(m.result, 1);
        assert!((m.probability - 0.5).abs() < 1e-10);
        assert!((sv.probability(1) - 1.0).abs() < 1e-10);
        assert_eq!(sv.amplitudes[0], Complex::ZERO);
    }

    #[test]
    fn test_collapse_to_zero() {
        let mut sv = plus_state();
        let m = sv.collapse(0, 0.9).unwrap();
        assert_eq!(m.result, 0);
        assert!((sv.probability(0) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_collapse_out_of_range_leaves_state() {
        let mut sv = plus_state();
        let before = sv.clone();
        assert!(matches!(
            sv.collapse(3, 0.5),
            Err(SimError::InvalidQubitIndex { index: 3, num_qubits: 1 })
        ));
        assert_eq!(sv, before);
    }

    #[test]
    fn test_collapse_degenerate_state() {
        // Unnormalized vector: P(1) = 0 and P(0) = 0
        let mut sv = StateVector::new(1).unwrap();
        sv.amplitudes[0] = Complex::ZERO;
        let before = sv.clone();
        assert!(matches!(sv.collapse(0, 0.5), Err(SimError::DegenerateState { .. })));
        assert_eq!(sv, before);
    }

    #[test]
    fn test_reset() {
        let mut sv = StateVector::new(2).unwrap();
        sv.amplitudes[0] = Complex::ZERO;
        sv.amplitudes[3] = Complex::ONE;
        sv.reset();
        assert_eq!(sv.amplitudes[0], Complex::ONE);
        assert_eq!(sv.amplitudes[3], Complex::ZERO);
    }
}
