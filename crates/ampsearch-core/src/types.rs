//! Value types shared by the simulator and the amplification engine

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg};

/// Complex amplitude
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 0.0);

    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Born-rule weight `|z|^2`.
    #[inline]
    pub fn norm_sq(&self) -> f64 {
        self.re.mul_add(self.re, self.im * self.im)
    }

    #[inline]
    pub fn conj(&self) -> Self {
        Self::new(self.re, -self.im)
    }

    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        (self.re - other.re).abs() <= eps && (self.im - other.im).abs() <= eps
    }
}

impl Add for Complex {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl AddAssign for Complex {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul for Complex {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

/// Real scaling.
impl Mul<f64> for Complex {
    type Output = Self;
    #[inline]
    fn mul(self, k: f64) -> Self {
        Self::new(self.re * k, self.im * k)
    }
}

impl Neg for Complex {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

impl fmt::Debug for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im < 0.0 {
            write!(f, "{}-{}i", self.re, -self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}

/// Register position index
pub type QubitIndex = u32;

/// One projective measurement of a single position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementOutcome {
    pub qubit: QubitIndex,
    pub result: bool,
    /// Probability of the observed branch before collapse.
    pub probability: f64,
}

/// What one backend execution cost
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationMetrics {
    pub num_qubits: u32,
    /// Gates applied, summed over every evolved trajectory.
    pub gate_count: usize,
    /// State-vector evolutions: 1 when noiseless, `shots` when noisy.
    pub trajectories: u32,
    pub execution_time_ns: u64,
    pub peak_memory_bytes: usize,
}
