//! Create parameters for the CKKS encryption scheme

use crate::encoding::FftTables;
use crate::{Encoding, Error, ParametersError, Result};
use ckks_math::{rq::Context, zq::primes::generate_prime};
use ckks_traits::FheParameters;
use log::debug;
use std::fmt::Debug;
use std::sync::Arc;

/// Parameters for the CKKS encryption scheme.
pub struct CkksParameters {
    /// Number of coefficients in a polynomial.
    polynomial_degree: usize,

    /// Vector of coprime moduli q_i for the ciphertext.
    pub(crate) moduli: Box<[u64]>,

    /// Vector of the sizes of the coprime moduli q_i for the ciphertext.
    moduli_sizes: Box<[usize]>,

    /// Default scale of the encoded values.
    scale: f64,

    /// Error variance
    pub(crate) variance: usize,

    /// Context for the underlying polynomials
    pub(crate) ctx: Arc<Context>,

    /// Tables of the canonical embedding
    pub(crate) fft: FftTables,
}

impl Debug for CkksParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CkksParameters")
            .field("polynomial_degree", &self.polynomial_degree)
            .field("moduli", &self.moduli)
            .field("scale", &self.scale)
            .field("variance", &self.variance)
            .finish()
    }
}

// Two parameter sets built from the same values are interchangeable, even
// when they were built independently.
impl PartialEq for CkksParameters {
    fn eq(&self, other: &Self) -> bool {
        self.polynomial_degree == other.polynomial_degree
            && self.moduli == other.moduli
            && self.scale.to_bits() == other.scale.to_bits()
            && self.variance == other.variance
    }
}

impl FheParameters for CkksParameters {}

impl CkksParameters {
    /// Polynomial degree of the benchmark parameters.
    pub const BENCHMARK_DEGREE: usize = 8192;

    /// Moduli sizes of the benchmark parameters.
    pub const BENCHMARK_MODULI_SIZES: [usize; 4] = [60, 40, 40, 60];

    /// Scale of the benchmark parameters.
    pub const BENCHMARK_SCALE: f64 = (1u64 << 40) as f64;

    /// Returns the underlying polynomial degree
    pub const fn degree(&self) -> usize {
        self.polynomial_degree
    }

    /// Returns the number of real slots of a plaintext.
    pub const fn slots(&self) -> usize {
        self.polynomial_degree / 2
    }

    /// Returns a reference to the ciphertext moduli
    pub fn moduli(&self) -> &[u64] {
        &self.moduli
    }

    /// Returns a reference to the ciphertext moduli sizes
    pub fn moduli_sizes(&self) -> &[usize] {
        &self.moduli_sizes
    }

    /// Returns the default scale
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the variance
    pub const fn variance(&self) -> usize {
        self.variance
    }

    /// Returns the polynomial context
    pub fn ctx(&self) -> &Arc<Context> {
        &self.ctx
    }

    /// Returns the encoding at the default scale
    pub fn encoding(&self) -> Encoding {
        Encoding::with_scale(self.scale)
    }

    /// Parameters used by the benchmark: degree 8192, moduli of 60, 40, 40
    /// and 60 bits, and a scale of 2^40.
    pub fn benchmark() -> Result<Arc<Self>> {
        CkksParametersBuilder::new()
            .set_degree(Self::BENCHMARK_DEGREE)
            .set_moduli_sizes(&Self::BENCHMARK_MODULI_SIZES)
            .set_scale(Self::BENCHMARK_SCALE)
            .build_arc()
    }

    #[cfg(test)]
    #[allow(missing_docs)]
    pub fn default_arc(degree: usize, variance: usize) -> Arc<Self> {
        CkksParametersBuilder::new()
            .set_degree(degree)
            .set_moduli_sizes(&[60, 40, 40, 60])
            .set_scale((1u64 << 40) as f64)
            .set_variance(variance)
            .build_arc()
            .unwrap()
    }
}

/// Builder for parameters for the CKKS encryption scheme.
#[derive(Debug)]
pub struct CkksParametersBuilder {
    degree: usize,
    scale: f64,
    variance: usize,
    ciphertext_moduli: Vec<u64>,
    ciphertext_moduli_sizes: Vec<usize>,
}

impl CkksParametersBuilder {
    /// Creates a new instance of the builder
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            degree: Default::default(),
            scale: CkksParameters::BENCHMARK_SCALE,
            variance: 10,
            ciphertext_moduli: Default::default(),
            ciphertext_moduli_sizes: Default::default(),
        }
    }

    /// Sets the polynomial degree. Building fails if the degree is not
    /// a power of two larger or equal to 8.
    pub fn set_degree(&mut self, degree: usize) -> &mut Self {
        self.degree = degree;
        self
    }

    /// Sets the sizes of the ciphertext moduli.
    /// Only one of `set_moduli_sizes` and `set_moduli`
    /// can be specified.
    pub fn set_moduli_sizes(&mut self, sizes: &[usize]) -> &mut Self {
        self.ciphertext_moduli_sizes = sizes.to_owned();
        self
    }

    /// Sets the ciphertext moduli to use.
    /// Only one of `set_moduli_sizes` and `set_moduli`
    /// can be specified.
    pub fn set_moduli(&mut self, moduli: &[u64]) -> &mut Self {
        self.ciphertext_moduli = moduli.to_owned();
        self
    }

    /// Sets the default scale. Building fails if the scale is not a finite
    /// number larger or equal to 1.
    pub fn set_scale(&mut self, scale: f64) -> &mut Self {
        self.scale = scale;
        self
    }

    /// Sets the error variance. Building fails if the variance is larger
    /// than sixteen. A variance of zero disables the encryption noise.
    pub fn set_variance(&mut self, variance: usize) -> &mut Self {
        self.variance = variance;
        self
    }

    /// Generate ciphertext moduli with the specified sizes
    fn generate_moduli(moduli_sizes: &[usize], degree: usize) -> Result<Vec<u64>> {
        let mut moduli = vec![];
        for size in moduli_sizes {
            if *size > 62 || *size < 10 {
                return Err(Error::ParametersError(ParametersError::InvalidModulusSize(
                    *size, 10, 62,
                )));
            }

            let mut upper_bound = 1 << size;
            loop {
                if let Some(prime) = generate_prime(*size, 2 * degree as u64, upper_bound) {
                    if !moduli.contains(&prime) {
                        moduli.push(prime);
                        break;
                    } else {
                        upper_bound = prime;
                    }
                } else {
                    return Err(Error::ParametersError(ParametersError::NotEnoughPrimes(
                        *size, degree,
                    )));
                }
            }
        }

        Ok(moduli)
    }

    /// Build a new `CkksParameters` inside an `Arc`.
    pub fn build_arc(&self) -> Result<Arc<CkksParameters>> {
        self.build().map(Arc::new)
    }

    /// Build a new `CkksParameters`.
    pub fn build(&self) -> Result<CkksParameters> {
        // Check that the degree is a power of 2 (and large enough).
        if self.degree < 8 || !self.degree.is_power_of_two() {
            return Err(Error::ParametersError(ParametersError::InvalidDegree(
                self.degree,
            )));
        }

        if !self.scale.is_finite() || self.scale < 1.0 {
            return Err(Error::ParametersError(ParametersError::InvalidScale(
                self.scale.to_string(),
            )));
        }

        if self.variance > 16 {
            return Err(Error::ParametersError(ParametersError::InvalidVariance(
                self.variance,
                0,
                16,
            )));
        }

        // Check that one of `ciphertext_moduli` and `ciphertext_moduli_sizes` is
        // specified.
        if !self.ciphertext_moduli.is_empty() && !self.ciphertext_moduli_sizes.is_empty() {
            return Err(Error::ParametersError(ParametersError::TooManySpecified(
                "Only one of `ciphertext_moduli` and `ciphertext_moduli_sizes` can be specified"
                    .to_string(),
            )));
        } else if self.ciphertext_moduli.is_empty() && self.ciphertext_moduli_sizes.is_empty() {
            return Err(Error::ParametersError(ParametersError::TooFewSpecified(
                "One of `ciphertext_moduli` and `ciphertext_moduli_sizes` must be specified"
                    .to_string(),
            )));
        }

        // Get or generate the moduli
        let mut moduli = self.ciphertext_moduli.clone();
        if !self.ciphertext_moduli_sizes.is_empty() {
            moduli = Self::generate_moduli(&self.ciphertext_moduli_sizes, self.degree)?
        }

        // Recomputes the moduli sizes
        let moduli_sizes = moduli
            .iter()
            .map(|m| 64 - m.leading_zeros() as usize)
            .collect::<Vec<_>>();

        let ctx = Context::new_arc(&moduli, self.degree)?;
        debug!(
            "Built a context of degree {} with moduli {:?}",
            self.degree, moduli
        );

        Ok(CkksParameters {
            polynomial_degree: self.degree,
            moduli: moduli.into_boxed_slice(),
            moduli_sizes: moduli_sizes.into_boxed_slice(),
            scale: self.scale,
            variance: self.variance,
            ctx,
            fft: FftTables::new(self.degree),
        })
    }
}
