//! Secret keys for the CKKS encryption scheme

use crate::{Ciphertext, CkksParameters, Error, Plaintext, Result};
use ckks_math::rq::{Poly, Representation};
use ckks_traits::{FheDecrypter, FheEncrypter, FheParametrized};
use ckks_util::sample_vec_cbd_f32;
use rand::{CryptoRng, RngCore};
use std::sync::Arc;
use zeroize::Zeroizing;
use zeroize_derive::{Zeroize, ZeroizeOnDrop};

/// Secret key for the CKKS encryption scheme.
#[derive(Debug, PartialEq, Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    /// The CKKS parameters
    #[zeroize(skip)]
    pub(crate) par: Arc<CkksParameters>,
    /// The secret key coefficients
    pub(crate) coeffs: Box<[i64]>,
    /// The secret key polynomial, in Ntt representation
    s: Poly,
}

impl SecretKey {
    /// The variance used for secret key sampling
    pub const SK_VARIANCE: f32 = 0.5;

    /// Generate a random [`SecretKey`] with ternary coefficients.
    pub fn random<R: RngCore + CryptoRng>(par: &Arc<CkksParameters>, rng: &mut R) -> Result<Self> {
        let s_coefficients = sample_vec_cbd_f32(par.degree(), Self::SK_VARIANCE, rng)
            .map_err(|e| Error::DefaultError(e.to_string()))?;
        Self::new(s_coefficients, par)
    }

    /// Generate a [`SecretKey`] from its coefficients.
    pub fn new(coeffs: Vec<i64>, par: &Arc<CkksParameters>) -> Result<Self> {
        let s = Poly::try_convert_from_i64(&coeffs, &par.ctx, Representation::Ntt)?;
        Ok(Self {
            par: par.clone(),
            coeffs: coeffs.into_boxed_slice(),
            s,
        })
    }

    /// Encrypt a polynomial in Ntt representation: (-a * s + e + p, a).
    pub(crate) fn encrypt_poly<R: RngCore + CryptoRng>(
        &self,
        p: &Poly,
        scale: f64,
        rng: &mut R,
    ) -> Result<Ciphertext> {
        assert_eq!(p.representation(), &Representation::Ntt);

        let a = Poly::random(&self.par.ctx, Representation::Ntt, rng);
        let a_s = Zeroizing::new(&a * &self.s);

        let mut b = Poly::small(&self.par.ctx, Representation::Ntt, self.par.variance, rng)?;
        b -= &*a_s;
        b += p;

        Ciphertext::new(vec![b, a], scale, &self.par)
    }
}

impl FheParametrized for SecretKey {
    type Parameters = CkksParameters;
}

impl FheEncrypter<Plaintext, Ciphertext> for SecretKey {
    type Error = Error;

    fn try_encrypt<R: RngCore + CryptoRng>(
        &self,
        pt: &Plaintext,
        rng: &mut R,
    ) -> Result<Ciphertext> {
        if self.par != pt.par {
            return Err(Error::DefaultError(
                "Incompatible CKKS parameters".to_string(),
            ));
        }
        let m = Zeroizing::new(pt.to_poly()?);
        self.encrypt_poly(&m, pt.scale(), rng)
    }
}

impl FheDecrypter<Plaintext, Ciphertext> for SecretKey {
    type Error = Error;

    /// Computes c0 + c1 * s. The result is not validated, so decrypting a
    /// ciphertext under the wrong key yields a meaningless plaintext.
    fn try_decrypt(&self, ct: &Ciphertext) -> Result<Plaintext> {
        if self.par != ct.par {
            return Err(Error::DefaultError(
                "Incompatible CKKS parameters".to_string(),
            ));
        }

        let ctx = &self.par.ctx;
        let (c0, c1) = ct.limbs.split_at(ctx.limb_count());
        let c0 = Poly::try_from_limbs(c0, ctx, Representation::Ntt)?;
        let mut m = Zeroizing::new(Poly::try_from_limbs(c1, ctx, Representation::Ntt)?);
        *m *= &self.s;
        *m += &c0;

        Ok(Plaintext::from_poly(&m, ct.scale, &self.par))
    }
}
