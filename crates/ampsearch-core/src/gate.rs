//! Gate set for oracle, diffuser and reference-preparation operators
//!
//! Amplification itself only needs `H`, `X` and [`Gate::Mcz`]. The rotations
//! and `Cnot` let callers write non-uniform reference preparations, and `Y`/`Z`
//! are the Pauli errors injected by the noise channels.

use crate::types::{Complex, QubitIndex};
use std::f64::consts::FRAC_1_SQRT_2;

/// 2x2 unitary acting on one position, row-major.
pub type Unitary2 = [[Complex; 2]; 2];

/// Unitary gate acting on one or more register positions
#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    H(QubitIndex),
    X(QubitIndex),
    Y(QubitIndex),
    Z(QubitIndex),
    Ry(QubitIndex, f64),
    Rz(QubitIndex, f64),

    /// Flip `target` on the basis states where `control` is |1>.
    Cnot { control: QubitIndex, target: QubitIndex },

    /// Phase flip on the basis states where every listed position is |1>.
    ///
    /// With one position this is `Z`. Positions must be distinct.
    Mcz(Vec<QubitIndex>),
}

/// Coarse gate class used to pick a noise channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateClass {
    SingleQubit,
    MultiQubit,
}

impl Gate {
    /// Positions this gate acts on.
    pub fn qubits(&self) -> Vec<QubitIndex> {
        match self {
            Gate::H(q) | Gate::X(q) | Gate::Y(q) | Gate::Z(q) | Gate::Ry(q, _) | Gate::Rz(q, _) => {
                vec![*q]
            }
            Gate::Cnot { control, target } => vec![*control, *target],
            Gate::Mcz(qs) => qs.clone(),
        }
    }

    pub fn class(&self) -> GateClass {
        if self.qubits().len() > 1 {
            GateClass::MultiQubit
        } else {
            GateClass::SingleQubit
        }
    }

    /// The adjoint, so that `g.inverse()` undoes `g`.
    pub fn inverse(&self) -> Gate {
        match self {
            Gate::Ry(q, theta) => Gate::Ry(*q, -theta),
            Gate::Rz(q, theta) => Gate::Rz(*q, -theta),
            // the rest are self-inverse
            other => other.clone(),
        }
    }

    /// Matrix of a single-position gate; `None` for `Cnot` and `Mcz`, which
    /// the state vector applies as index permutations and sign flips.
    pub fn unitary(&self) -> Option<Unitary2> {
        let zero = Complex::ZERO;
        let one = Complex::ONE;
        let real = |re: f64| Complex::new(re, 0.0);

        let m = match self {
            Gate::H(_) => {
                let h = real(FRAC_1_SQRT_2);
                [[h, h], [h, -h]]
            }
            Gate::X(_) => [[zero, one], [one, zero]],
            Gate::Y(_) => [[zero, Complex::new(0.0, -1.0)], [Complex::new(0.0, 1.0), zero]],
            Gate::Z(_) => [[one, zero], [zero, -one]],
            Gate::Ry(_, theta) => {
                let (s, c) = (theta / 2.0).sin_cos();
                [[real(c), real(-s)], [real(s), real(c)]]
            }
            Gate::Rz(_, theta) => {
                let (s, c) = (theta / 2.0).sin_cos();
                [[Complex::new(c, -s), zero], [zero, Complex::new(c, s)]]
            }
            Gate::Cnot { .. } | Gate::Mcz(_) => return None,
        };
        Some(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(a: &Unitary2, b: &Unitary2) -> Unitary2 {
        let mut out = [[Complex::ZERO; 2]; 2];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = a[r][0] * b[0][c] + a[r][1] * b[1][c];
            }
        }
        out
    }

    #[test]
    fn test_inverse_undoes_single_position_gates() {
        for g in [Gate::H(0), Gate::Y(0), Gate::Ry(0, -1.3), Gate::Rz(0, 2.1)] {
            let m = g.unitary().unwrap();
            let inv = g.inverse().unitary().unwrap();
            let p = product(&inv, &m);
            assert!(p[0][0].approx_eq(&Complex::ONE, 1e-12), "{g:?}");
            assert!(p[1][1].approx_eq(&Complex::ONE, 1e-12), "{g:?}");
            assert!(p[0][1].approx_eq(&Complex::ZERO, 1e-12), "{g:?}");
            assert!(p[1][0].approx_eq(&Complex::ZERO, 1e-12), "{g:?}");
        }
    }

    #[test]
    fn test_gate_class() {
        assert_eq!(Gate::H(3).class(), GateClass::SingleQubit);
        assert_eq!(Gate::Mcz(vec![2]).class(), GateClass::SingleQubit);
        assert_eq!(Gate::Mcz(vec![0, 1, 2]).class(), GateClass::MultiQubit);
        assert_eq!(
            Gate::Cnot {
                control: 0,
                target: 1
            }
            .class(),
            GateClass::MultiQubit
        );
    }

    #[test]
    fn test_multi_position_gates_have_no_matrix() {
        assert!(Gate::Mcz(vec![0, 2, 4]).unitary().is_none());
        assert_eq!(Gate::Mcz(vec![0, 2, 4]).qubits(), vec![0, 2, 4]);
        assert!(Gate::Cnot {
            control: 1,
            target: 0
        }
        .unitary()
        .is_none());
    }
}
