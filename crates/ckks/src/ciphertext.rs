//! Ciphertext type in the CKKS encryption scheme.

use crate::{CkksParameters, Error, Result};
use ckks_math::rq::{Poly, Representation};
use ckks_traits::{FheCiphertext, FheParametrized, RawLimbs};
use std::sync::Arc;

/// A ciphertext encrypting a plaintext.
///
/// The two polynomials (c0, c1) are stored contiguously, each as
/// `moduli * degree` limbs in Ntt representation.
#[derive(Debug, Clone, PartialEq)]
pub struct Ciphertext {
    /// The parameters of the underlying CKKS encryption scheme.
    pub(crate) par: Arc<CkksParameters>,

    /// The limbs of the ciphertext elements.
    pub(crate) limbs: Box<[u64]>,

    /// The scale of the encrypted values.
    pub(crate) scale: f64,
}

impl Ciphertext {
    /// Number of polynomials in a ciphertext.
    pub const SIZE: usize = 2;

    /// Create a ciphertext from a vector of polynomials.
    /// A ciphertext must contain exactly two polynomials, and all polynomials
    /// must be in Ntt representation and with the context of the parameters.
    pub fn new(c: Vec<Poly>, scale: f64, par: &Arc<CkksParameters>) -> Result<Self> {
        if c.len() < Self::SIZE {
            return Err(Error::TooFewValues(c.len(), Self::SIZE));
        } else if c.len() > Self::SIZE {
            return Err(Error::TooManyValues(c.len(), Self::SIZE));
        }

        // Check that all polynomials have the expected representation and context.
        for ci in c.iter() {
            if ci.representation() != &Representation::Ntt {
                return Err(Error::MathError(
                    ckks_math::Error::IncorrectRepresentation(
                        ci.representation().clone(),
                        Representation::Ntt,
                    ),
                ));
            }
            if ci.ctx() != &par.ctx {
                return Err(Error::MathError(ckks_math::Error::InvalidContext));
            }
        }

        Ok(Self {
            par: par.clone(),
            limbs: c.iter().flat_map(|ci| ci.limbs().copied()).collect(),
            scale,
        })
    }

    /// Get the i-th polynomial of the ciphertext.
    pub fn get(&self, i: usize) -> Result<Poly> {
        let width = self.par.ctx.limb_count();
        let limbs = self
            .limbs
            .get(i * width..(i + 1) * width)
            .ok_or(Error::TooFewValues(i + 1, Self::SIZE))?;
        Ok(Poly::try_from_limbs(
            limbs,
            &self.par.ctx,
            Representation::Ntt,
        )?)
    }

    /// The scale of the encrypted values.
    pub const fn scale(&self) -> f64 {
        self.scale
    }
}

impl FheParametrized for Ciphertext {
    type Parameters = CkksParameters;
}

impl FheCiphertext for Ciphertext {}

impl RawLimbs for Ciphertext {
    fn raw_limbs(&self) -> &[u64] {
        &self.limbs
    }

    fn raw_limbs_mut(&mut self) -> &mut [u64] {
        &mut self.limbs
    }
}

#[cfg(test)]
mod tests {
    use super::Ciphertext;
    use crate::{CkksParameters, Error};
    use ckks_math::rq::{Poly, Representation};
    use ckks_traits::RawLimbs;
    use rand::thread_rng;
    use std::error::Error as StdError;

    #[test]
    fn new_and_get() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        let params = CkksParameters::default_arc(16, 10);
        let c0 = Poly::random(params.ctx(), Representation::Ntt, &mut rng);
        let c1 = Poly::random(params.ctx(), Representation::Ntt, &mut rng);

        let ct = Ciphertext::new(vec![c0.clone(), c1.clone()], params.scale(), &params)?;
        assert_eq!(ct.raw_len(), 2 * 4 * 16);
        assert_eq!(ct.get(0)?, c0);
        assert_eq!(ct.get(1)?, c1);
        assert_eq!(ct.get(2).unwrap_err(), Error::TooFewValues(3, 2));

        // The first half of the limbs is c0.
        assert!(ct.raw_limbs()[..4 * 16]
            .iter()
            .eq(c0.limbs()));
        Ok(())
    }

    #[test]
    fn new_failures() {
        let mut rng = thread_rng();
        let params = CkksParameters::default_arc(16, 10);
        let other = CkksParameters::default_arc(32, 10);
        let c = Poly::random(params.ctx(), Representation::Ntt, &mut rng);

        assert_eq!(
            Ciphertext::new(vec![c.clone()], 1.0, &params).unwrap_err(),
            Error::TooFewValues(1, 2)
        );
        assert_eq!(
            Ciphertext::new(vec![c.clone(), c.clone(), c.clone()], 1.0, &params).unwrap_err(),
            Error::TooManyValues(3, 2)
        );

        let mut power_basis = c.clone();
        power_basis.change_representation(Representation::PowerBasis);
        assert_eq!(
            Ciphertext::new(vec![c.clone(), power_basis], 1.0, &params).unwrap_err(),
            Error::MathError(ckks_math::Error::IncorrectRepresentation(
                Representation::PowerBasis,
                Representation::Ntt
            ))
        );
        assert_eq!(
            Ciphertext::new(vec![c.clone(), c], 1.0, &other).unwrap_err(),
            Error::MathError(ckks_math::Error::InvalidContext)
        );
    }
}
