//! The two decryption protocols being compared.
//!
//! Both start from a ciphertext encrypted under the key of the data owner
//! and end with the decoded vector at the processor. Transmissions between
//! the parties are simulated: only their size is recorded.

pub mod baseline;
mod partition;
pub mod splice;

pub use partition::Partition;

/// A simulated transmission between the parties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    /// What is transmitted, and to whom.
    pub description: &'static str,
    /// Size of the transmitted data.
    pub bytes: usize,
}

impl Transmission {
    pub(crate) const fn new(description: &'static str, bytes: usize) -> Self {
        Self { description, bytes }
    }
}

/// What a protocol run produces besides its samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Transmissions of one trial, in protocol order.
    pub transmissions: Vec<Transmission>,
    /// The decoded vector of the first trial.
    pub exemplary: Vec<f64>,
}
