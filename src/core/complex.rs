//! A complex number with 64-bit floating-point components.
//!
//! Amplitudes of the state vector are complex numbers `real + imag·i`;
//! each contributes `real² + imag²` to the total probability.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub real: f64,
    pub imag: f64,
}

impl Complex {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 0.0);
    /// Imaginary unit i
    pub const I: Self = Self::new(0.0, 1.0);

    #[inline(always)]
    pub const fn new(real: f64, imag: f64) -> Self {
        Self { real, imag }
    }

    /// Squared magnitude: |z|² = real² + imag²
    #[inline(always)]
    pub fn magnitude_squared(&self) -> f64 {
        self.real * self.real + self.imag * self.imag
    }

    #[inline(always)]
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Complex conjugate: z* = real - imag·i
    #[inline(always)]
    pub fn conjugate(&self) -> Self {
        Self {
            real: self.real,
            imag: -self.imag,
        }
    }

    /// Euler's formula: r·e^(iθ) = r·cos(θ) + i·r·sin(θ)
    #[inline(always)]
    pub fn from_polar(r: f64, theta: f64) -> Self {
        Self {
            real: r * theta.cos(),
            imag: r * theta.sin(),
        }
    }

    /// Scale by a real scalar
    #[inline(always)]
    pub fn scale(&self, s: f64) -> Self {
        Self {
            real: self.real * s,
            imag: self.imag * s,
        }
    }

    /// Componentwise comparison within `eps`.
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        (self.real - other.real).abs() < eps && (self.imag - other.imag).abs() < eps
    }
}

impl Add for Complex {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self {
            real: self.real + rhs.real,
            imag: self.imag + rhs.imag,
        }
    }
}

impl Sub for Complex {
    type Output = Self;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self {
            real: self.real - rhs.real,
            imag: self.imag - rhs.imag,
        }
    }
}

/// (a + bi)(c + di) = (ac - bd) + (ad + bc)i
impl Mul for Complex {
    type Output = Self;
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self {
            real: self.real * rhs.real - self.imag * rhs.imag,
            imag: self.real * rhs.imag + self.imag * rhs.real,
        }
    }
}

impl Neg for Complex {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self {
            real: -self.real,
            imag: -self.imag,
        }
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.imag >= 0.0 {
            write!(f, "{:.6} + {:.6}i", self.real, self.imag)
        } else {
            write!(f, "{:.6} - {:.6}i", self.real, self.imag.abs())
        }
    }
}

impl From<f64> for Complex {
    fn from(real: f64) -> Self {
        Self { real, imag: 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-10;

    #[test]
    fn test_add() {
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, 4.0);
        assert_eq!(a + b, Complex::new(4.0, 6.0));
    }

    #[test]
    fn test_sub() {
        let a = Complex::new(5.0, 3.0);
        let b = Complex::new(2.0, 1.0);
        assert_eq!(a - b, Complex::new(3.0, 2.0));
    }

    #[test]
    fn test_mul() {
        // (1 + 2i)(3 + 4i) = (3 - 8) + (4 + 6)i = -5 + 10i
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, 4.0);
        assert_eq!(a * b, Complex::new(-5.0, 10.0));
    }

    #[test]
    fn test_mul_i_squared() {
        assert_eq!(Complex::I * Complex::I, Complex::new(-1.0, 0.0));
    }

    #[test]
    fn test_conjugate() {
        let z = Complex::new(3.0, -4.0);
        assert_eq!(z.conjugate(), Complex::new(3.0, 4.0));
    }

    #[test]
    fn test_magnitude() {
        // |3 + 4i| = 5
        let z = Complex::new(3.0, 4.0);
        assert!((z.magnitude() - 5.0).abs() < EPS);
        assert!((z.magnitude_squared() - 25.0).abs() < EPS);
    }

    #[test]
    fn test_z_times_conjugate_is_real() {
        let z = Complex::new(0.6, -0.8);
        let p = z * z.conjugate();
        assert!(p.approx_eq(&Complex::new(z.magnitude_squared(), 0.0), EPS));
    }

    #[test]
    fn test_from_polar() {
        // e^(iπ) = -1
        let z = Complex::from_polar(1.0, PI);
        assert!(z.approx_eq(&Complex::new(-1.0, 0.0), EPS));
    }

    #[test]
    fn test_neg_and_scale() {
        let z = Complex::new(1.0, -2.0);
        assert_eq!(-z, Complex::new(-1.0, 2.0));
        assert_eq!(z.scale(2.0), Complex::new(2.0, -4.0));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&Complex::new(0.5, -1.0)).unwrap();
        assert_eq!(json, r#"{"real":0.5,"imag":-1.0}"#);
    }
}
