use crate::{Error, Result};

/// Configuration of a benchmark run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchConfig {
    /// Number of trials of each protocol.
    pub execution_count: usize,
    /// Value of every slot of the encrypted vector.
    pub fill_value: f64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            execution_count: Self::DEFAULT_EXECUTION_COUNT,
            fill_value: Self::DEFAULT_FILL_VALUE,
        }
    }
}

impl BenchConfig {
    /// Default number of trials.
    pub const DEFAULT_EXECUTION_COUNT: usize = 1000;

    /// Default slot value.
    pub const DEFAULT_FILL_VALUE: f64 = 9.0;

    /// A standard deviation needs at least two samples.
    pub const MIN_EXECUTION_COUNT: usize = 2;

    /// Returns an error if there are too few trials to report every
    /// statistic.
    pub fn validate(&self) -> Result<()> {
        if self.execution_count < Self::MIN_EXECUTION_COUNT {
            return Err(Error::TooFewSamples(
                self.execution_count,
                Self::MIN_EXECUTION_COUNT,
            ));
        }
        Ok(())
    }

    /// The vector to encrypt, with every one of the `slots` slots holding
    /// the fill value.
    pub fn input_vector(&self, slots: usize) -> Vec<f64> {
        vec![self.fill_value; slots]
    }
}
