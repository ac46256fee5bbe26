//! Public keys for the CKKS encryption scheme

use crate::{Ciphertext, CkksParameters, Error, Plaintext, Result};
use ckks_math::rq::{Poly, Representation};
use ckks_traits::{FheEncrypter, FheParametrized};
use ckks_util::sample_vec_cbd_f32;
use rand::{CryptoRng, RngCore};
use std::sync::Arc;
use zeroize::Zeroizing;

use super::SecretKey;

/// Public key for the CKKS encryption scheme.
#[derive(Debug, PartialEq, Clone)]
pub struct PublicKey {
    /// The CKKS parameters
    pub(crate) par: Arc<CkksParameters>,
    /// The public key ciphertext, an encryption of zero
    pub(crate) c: Ciphertext,
}

impl PublicKey {
    /// Generate a new [`PublicKey`] from a [`SecretKey`].
    pub fn new<R: RngCore + CryptoRng>(sk: &SecretKey, rng: &mut R) -> Result<Self> {
        let zero = Poly::zero(&sk.par.ctx, Representation::Ntt);
        let c = sk.encrypt_poly(&zero, sk.par.scale(), rng)?;
        Ok(Self {
            par: sk.par.clone(),
            c,
        })
    }
}

impl FheParametrized for PublicKey {
    type Parameters = CkksParameters;
}

impl FheEncrypter<Plaintext, Ciphertext> for PublicKey {
    type Error = Error;

    /// Computes (b * u + e0 + m, a * u + e1) with u ternary.
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

        let ctx = &self.par.ctx;
        let u = Zeroizing::new(Poly::try_convert_from_i64(
            &Zeroizing::new(
                sample_vec_cbd_f32(ctx.degree(), SecretKey::SK_VARIANCE, rng)
                    .map_err(|e| Error::DefaultError(e.to_string()))?,
            ),
            ctx,
            Representation::Ntt,
        )?);
        let e0 = Zeroizing::new(Poly::small(ctx, Representation::Ntt, self.par.variance, rng)?);
        let e1 = Zeroizing::new(Poly::small(ctx, Representation::Ntt, self.par.variance, rng)?);
        let m = Zeroizing::new(pt.to_poly()?);

        let mut c0 = &self.c.get(0)? * &*u;
        c0 += &*e0;
        c0 += &*m;
        let mut c1 = &self.c.get(1)? * &*u;
        c1 += &*e1;

        Ciphertext::new(vec![c0, c1], pt.scale(), &self.par)
    }
}
