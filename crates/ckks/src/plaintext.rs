//! Plaintext type in the CKKS encryption scheme.

use crate::{CkksParameters, Error, Result};
use ckks_math::rq::{Poly, Representation};
use ckks_traits::{
    FheDecoder, FheEncoder, FheParametrized, FhePlaintext, FhePlaintextEncoding, RawLimbs,
};
use itertools::izip;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use std::sync::Arc;
use zeroize::Zeroizing;
use zeroize_derive::Zeroize;

// Largest magnitude of a scaled coefficient, exclusive.
const MAX_SCALED_COEFFICIENT: f64 = 9_223_372_036_854_775_808.0;

/// An encoding for the plaintext: the scale by which the encoded values are
/// multiplied before rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Encoding {
    pub(crate) scale: f64,
}

impl Encoding {
    /// An encoding at the given scale.
    pub const fn with_scale(scale: f64) -> Self {
        Self { scale }
    }

    /// The scale of the encoding.
    pub const fn scale(&self) -> f64 {
        self.scale
    }
}

impl FhePlaintextEncoding for Encoding {}

/// A plaintext object, that encodes a vector of real values at a given
/// scale.
///
/// The plaintext is stored as `moduli * degree` limbs in Ntt representation,
/// modulus by modulus.
#[derive(Debug, Clone, PartialEq, Zeroize)]
pub struct Plaintext {
    /// The parameters of the underlying CKKS encryption scheme.
    #[zeroize(skip)]
    pub(crate) par: Arc<CkksParameters>,
    /// The limbs of the polynomial.
    pub(crate) limbs: Box<[u64]>,
    /// The encoding of the plaintext.
    #[zeroize(skip)]
    pub(crate) encoding: Encoding,
}

impl FheParametrized for Plaintext {
    type Parameters = CkksParameters;
}

impl FhePlaintext for Plaintext {
    type Encoding = Encoding;
}

impl RawLimbs for Plaintext {
    fn raw_limbs(&self) -> &[u64] {
        &self.limbs
    }

    fn raw_limbs_mut(&mut self) -> &mut [u64] {
        &mut self.limbs
    }
}

impl Plaintext {
    /// Reinterpret limbs as a plaintext of the given scale, without
    /// encoding.
    ///
    /// Returns an error if there are not exactly `moduli * degree` limbs or
    /// if a limb is not reduced modulo its prime.
    pub fn try_from_raw_limbs(
        limbs: &[u64],
        scale: f64,
        par: &Arc<CkksParameters>,
    ) -> Result<Self> {
        let expected = par.ctx.limb_count();
        if limbs.len() != expected {
            return Err(Error::MathError(ckks_math::Error::IncorrectLimbCount(
                limbs.len(),
                expected,
            )));
        }
        for (row, qi) in izip!(limbs.chunks_exact(par.degree()), par.moduli.iter()) {
            if row.iter().any(|limb| limb >= qi) {
                return Err(Error::UnspecifiedInput(format!(
                    "A limb is not reduced modulo {}",
                    qi
                )));
            }
        }

        Ok(Self {
            par: par.clone(),
            limbs: limbs.into(),
            encoding: Encoding::with_scale(scale),
        })
    }

    pub(crate) fn from_poly(poly: &Poly, scale: f64, par: &Arc<CkksParameters>) -> Self {
        debug_assert_eq!(poly.representation(), &Representation::Ntt);
        Self {
            par: par.clone(),
            limbs: poly.limbs().copied().collect(),
            encoding: Encoding::with_scale(scale),
        }
    }

    /// Returns the polynomial underlying the plaintext, in Ntt
    /// representation.
    pub fn to_poly(&self) -> Result<Poly> {
        Ok(Poly::try_from_limbs(
            &self.limbs,
            &self.par.ctx,
            Representation::Ntt,
        )?)
    }

    /// The scale of the plaintext.
    pub const fn scale(&self) -> f64 {
        self.encoding.scale
    }

    /// The encoding of the plaintext.
    pub const fn encoding(&self) -> &Encoding {
        &self.encoding
    }
}

impl FheEncoder<&[f64]> for Plaintext {
    type Error = Error;

    fn try_encode(value: &[f64], encoding: Encoding, par: &Arc<CkksParameters>) -> Result<Self> {
        if value.len() > par.slots() {
            return Err(Error::TooManyValues(value.len(), par.slots()));
        }
        if !encoding.scale.is_finite() || encoding.scale < 1.0 {
            return Err(Error::UnspecifiedInput(format!(
                "Invalid encoding scale {}",
                encoding.scale
            )));
        }

        let mut slots = vec![0.0; par.slots()];
        slots[..value.len()].copy_from_slice(value);

        let coefficients = Zeroizing::new(
            par.fft
                .embed_inverse(&slots)
                .iter()
                .map(|c| {
                    let scaled = (c * encoding.scale).round();
                    if scaled.is_finite() && scaled.abs() < MAX_SCALED_COEFFICIENT {
                        Ok(scaled as i64)
                    } else {
                        Err(Error::UnspecifiedInput(format!(
                            "The values are too large to be encoded at scale {}",
                            encoding.scale
                        )))
                    }
                })
                .collect::<Result<Vec<i64>>>()?,
        );

        let poly = Zeroizing::new(Poly::try_convert_from_i64(
            &coefficients,
            &par.ctx,
            Representation::Ntt,
        )?);
        Ok(Plaintext::from_poly(&poly, encoding.scale, par))
    }
}

impl FheEncoder<&Vec<f64>> for Plaintext {
    type Error = Error;

    fn try_encode(value: &Vec<f64>, encoding: Encoding, par: &Arc<CkksParameters>) -> Result<Self> {
        Plaintext::try_encode(value.as_slice(), encoding, par)
    }
}

impl FheDecoder<Plaintext> for Vec<f64> {
    type Error = Error;

    fn try_decode<O>(pt: &Plaintext, encoding: O) -> Result<Self>
    where
        O: Into<Option<Encoding>>,
    {
        let scale = encoding.into().map_or(pt.encoding.scale, |e| e.scale);

        let mut poly = Zeroizing::new(pt.to_poly()?);
        poly.change_representation(Representation::PowerBasis);

        let modulus = pt.par.ctx.modulus();
        let half_modulus: BigUint = modulus >> 1usize;
        let coefficients = poly
            .to_biguint_vec()?
            .iter()
            .map(|c| {
                // Conversions from BigUint saturate instead of failing.
                let centered = if c > &half_modulus {
                    -(modulus - c).to_f64().unwrap_or(f64::INFINITY)
                } else {
                    c.to_f64().unwrap_or(f64::INFINITY)
                };
                centered / scale
            })
            .collect::<Vec<f64>>();

        Ok(pt.par.fft.embed(&coefficients))
    }
}
