//! Amplification round: one oracle followed by one diffuser

use ampsearch_core::operator::Operator;

/// The repeatable unit of amplification.
///
/// Holds handles to operators built once per search. Applying `k` rounds to
/// the reference state rotates it by `2kθ` toward the marked subspace, with
/// `sin θ = sqrt(marked / size)`.
#[derive(Debug, Clone)]
pub struct AmplificationRound {
    oracle: Operator,
    reflection: Operator,
}

/// Group an oracle and a diffuser into one round.
pub fn compose_round(oracle: Operator, reflection: Operator) -> AmplificationRound {
    AmplificationRound { oracle, reflection }
}

impl AmplificationRound {
    pub fn oracle(&self) -> &Operator {
        &self.oracle
    }

    pub fn reflection(&self) -> &Operator {
        &self.reflection
    }

    /// Full execution sequence: `preparation`, then `rounds` x (oracle, diffuser).
    ///
    /// Every call starts again from the preparation step; sequences are never
    /// extended from a previous attempt.
    pub fn unroll(&self, preparation: &Operator, rounds: u64) -> Vec<Operator> {
        let mut sequence = Vec::with_capacity(1 + 2 * rounds as usize);
        sequence.push(preparation.clone());
        for _ in 0..rounds {
            sequence.push(self.oracle.clone());
            sequence.push(self.reflection.clone());
        }
        sequence
    }
}
