//! Descriptive statistics over sample vectors.

use crate::{Error, Result};

/// An ordered sequence of samples, such as latencies in nanoseconds or
/// absolute errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleVector {
    values: Vec<f64>,
}

/// The statistics reported for a sample vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
    /// Median of the samples.
    pub median: f64,
    /// Arithmetic mean of the samples.
    pub mean: f64,
    /// Sample standard deviation.
    pub std_deviation: f64,
}

impl SampleVector {
    /// Creates an empty sample vector.
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Creates an empty sample vector able to hold `capacity` samples without
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Appends a sample.
    pub fn push(&mut self, value: f64) {
        self.values.push(value)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there is no sample.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The samples, in insertion order.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// The last sample appended.
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Smallest sample.
    pub fn min(&self) -> Result<f64> {
        self.values
            .iter()
            .copied()
            .min_by(f64::total_cmp)
            .ok_or(Error::EmptyInput("minimum"))
    }

    /// Largest sample.
    pub fn max(&self) -> Result<f64> {
        self.values
            .iter()
            .copied()
            .max_by(f64::total_cmp)
            .ok_or(Error::EmptyInput("maximum"))
    }

    /// Arithmetic mean.
    pub fn mean(&self) -> Result<f64> {
        if self.values.is_empty() {
            return Err(Error::EmptyInput("mean"));
        }
        Ok(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }

    /// Median: the middle order statistic for an odd number of samples, the
    /// average of the two middle ones otherwise.
    ///
    /// The order statistics are found by selection on a scratch copy, in
    /// expected linear time; the samples themselves are left untouched.
    pub fn median(&self) -> Result<f64> {
        if self.values.is_empty() {
            return Err(Error::EmptyInput("median"));
        }

        let odd = self.values.len() % 2 == 1;
        let mut scratch = self.values.clone();
        let middle = scratch.len() / 2;
        let (lower, upper, _) = scratch.select_nth_unstable_by(middle, f64::total_cmp);
        let upper = *upper;
        if odd {
            Ok(upper)
        } else {
            // The order statistic at `middle - 1` is the largest element of
            // the left partition.
            let lower = lower
                .iter()
                .copied()
                .max_by(f64::total_cmp)
                .ok_or(Error::EmptyInput("median"))?;
            Ok((lower + upper) / 2.0)
        }
    }

    /// Sample variance, with Bessel's correction.
    pub fn variance(&self) -> Result<f64> {
        match self.values.len() {
            0 => Err(Error::EmptyInput("variance")),
            1 => Err(Error::TooFewSamples(1, 2)),
            n => {
                let mean = self.mean()?;
                let squared_diffs = self
                    .values
                    .iter()
                    .map(|v| (v - mean) * (v - mean))
                    .sum::<f64>();
                Ok(squared_diffs / (n - 1) as f64)
            }
        }
    }

    /// Sample standard deviation.
    pub fn std_deviation(&self) -> Result<f64> {
        self.variance().map(f64::sqrt)
    }

    /// Computes every reported statistic at once.
    pub fn summary(&self) -> Result<Summary> {
        Ok(Summary {
            min: self.min()?,
            max: self.max()?,
            median: self.median()?,
            mean: self.mean()?,
            std_deviation: self.std_deviation()?,
        })
    }

    /// Adds vectors of equal length sample by sample.
    pub fn elementwise_sum(vectors: &[&SampleVector]) -> Result<SampleVector> {
        let (first, rest) = vectors
            .split_first()
            .ok_or(Error::EmptyInput("element-wise sum"))?;

        let mut sum = (*first).clone();
        for v in rest {
            if v.len() != sum.len() {
                return Err(Error::DimensionMismatch(format!(
                    "cannot add a vector of {} samples to a vector of {} samples",
                    v.len(),
                    sum.len()
                )));
            }
            sum.values
                .iter_mut()
                .zip(v.values.iter())
                .for_each(|(s, x)| *s += x);
        }
        Ok(sum)
    }
}

impl From<Vec<f64>> for SampleVector {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl FromIterator<f64> for SampleVector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Extend<f64> for SampleVector {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        self.values.extend(iter)
    }
}
