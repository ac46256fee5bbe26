//! Polynomials in R_q\[x\] = (ZZ_q1 x ... x ZZ_qn)\[x\] where the qi's are
//! prime moduli in zq, reduced modulo x^degree + 1.

mod context;
mod ops;

pub use context::Context;

use crate::{Error, Result};
use itertools::izip;
use ndarray::{Array2, ArrayView2, Axis};
use num_bigint::BigUint;
use rand::{distributions::Uniform, CryptoRng, Rng, RngCore};
use std::sync::Arc;
use zeroize::Zeroize;

/// Possible representations of the underlying polynomial.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub enum Representation {
    /// This is the list of coefficients ci, such that the polynomial is c0 +
    /// c1 * x + ... + c_(degree - 1) * x^(degree - 1)
    #[default]
    PowerBasis,
    /// This is the NTT representation of the PowerBasis representation.
    Ntt,
}

/// Struct that holds a polynomial for a specific context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poly {
    ctx: Arc<Context>,
    representation: Representation,
    coefficients: Array2<u64>,
}

impl Zeroize for Poly {
    fn zeroize(&mut self) {
        self.coefficients.iter_mut().for_each(|c| c.zeroize());
    }
}

impl AsRef<Poly> for Poly {
    fn as_ref(&self) -> &Poly {
        self
    }
}

impl AsMut<Poly> for Poly {
    fn as_mut(&mut self) -> &mut Poly {
        self
    }
}

impl Poly {
    /// Creates a polynomial holding the constant 0.
    pub fn zero(ctx: &Arc<Context>, representation: Representation) -> Self {
        Self {
            ctx: ctx.clone(),
            representation,
            coefficients: Array2::zeros((ctx.q.len(), ctx.degree)),
        }
    }

    /// Current representation of the polynomial.
    pub const fn representation(&self) -> &Representation {
        &self.representation
    }

    /// Context of the polynomial.
    pub const fn ctx(&self) -> &Arc<Context> {
        &self.ctx
    }

    /// Returns a view of the coefficients, one row per modulus.
    pub fn coefficients(&self) -> ArrayView2<u64> {
        self.coefficients.view()
    }

    /// Iterates over the coefficients in row-major order: all the residues
    /// modulo the first prime, then all the residues modulo the second one,
    /// and so on.
    pub fn limbs(&self) -> impl Iterator<Item = &u64> + '_ {
        self.coefficients.iter()
    }

    /// Change the representation of the underlying polynomial.
    pub fn change_representation(&mut self, to: Representation) {
        match (&self.representation, &to) {
            (Representation::PowerBasis, Representation::Ntt) => {
                izip!(self.coefficients.outer_iter_mut(), self.ctx.ops.iter())
                    .for_each(|(v, op)| op.forward(v));
            }
            (Representation::Ntt, Representation::PowerBasis) => {
                izip!(self.coefficients.outer_iter_mut(), self.ctx.ops.iter())
                    .for_each(|(v, op)| op.backward(v));
            }
            _ => {}
        }
        self.representation = to;
    }

    /// Generate a random polynomial, uniform in every representation.
    pub fn random<R: RngCore + CryptoRng>(
        ctx: &Arc<Context>,
        representation: Representation,
        rng: &mut R,
    ) -> Self {
        let mut p = Poly::zero(ctx, representation);
        izip!(p.coefficients.outer_iter_mut(), ctx.q.iter()).for_each(|(mut v, qi)| {
            let distribution = Uniform::from(0..qi.modulus());
            v.iter_mut().for_each(|vi| *vi = rng.sample(distribution));
        });
        p
    }

    /// Generate a small polynomial with coefficients following a centered
    /// binomial distribution of the given variance, and convert it into the
    /// specified representation.
    ///
    /// Returns an error if the variance does not belong to [0, ..., 16].
    pub fn small<R: RngCore + CryptoRng>(
        ctx: &Arc<Context>,
        representation: Representation,
        variance: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let coeffs = zeroize::Zeroizing::new(
            ckks_util::sample_vec_cbd(ctx.degree, variance, rng)
                .map_err(|e| Error::Default(e.to_string()))?,
        );
        Self::try_convert_from_i64(&coeffs, ctx, representation)
    }

    /// Create a polynomial from its (signed) power basis coefficients, and
    /// convert it into the specified representation.
    pub fn try_convert_from_i64(
        coeffs: &[i64],
        ctx: &Arc<Context>,
        representation: Representation,
    ) -> Result<Self> {
        if coeffs.len() != ctx.degree {
            return Err(Error::Default(format!(
                "Expected {} coefficients, got {}",
                ctx.degree,
                coeffs.len()
            )));
        }

        let mut p = Poly::zero(ctx, Representation::PowerBasis);
        izip!(p.coefficients.outer_iter_mut(), ctx.q.iter()).for_each(|(mut v, qi)| {
            izip!(v.iter_mut(), coeffs.iter()).for_each(|(vi, ci)| *vi = qi.reduce_i64(*ci));
        });
        p.change_representation(representation);
        Ok(p)
    }

    /// Create a polynomial from limbs given in row-major order (see
    /// [`Poly::limbs`]), in the specified representation.
    ///
    /// Returns an error if the number of limbs is not `degree * moduli`, or
    /// if a limb is not reduced modulo its prime.
    pub fn try_from_limbs(
        limbs: &[u64],
        ctx: &Arc<Context>,
        representation: Representation,
    ) -> Result<Self> {
        if limbs.len() != ctx.limb_count() {
            return Err(Error::IncorrectLimbCount(limbs.len(), ctx.limb_count()));
        }

        let coefficients = Array2::from_shape_vec((ctx.q.len(), ctx.degree), limbs.to_vec())
            .map_err(|e| Error::Default(e.to_string()))?;
        for (row, qi) in izip!(coefficients.outer_iter(), ctx.q.iter()) {
            if let Some(limb) = row.iter().find(|limb| **limb >= qi.modulus()) {
                return Err(Error::Default(format!(
                    "Limb {} is not reduced modulo {}",
                    limb,
                    qi.modulus()
                )));
            }
        }

        Ok(Self {
            ctx: ctx.clone(),
            representation,
            coefficients,
        })
    }

    /// Lift every coefficient into [0, Q) where Q is the product of the
    /// moduli.
    ///
    /// Returns an error if the polynomial is not in PowerBasis
    /// representation.
    pub fn to_biguint_vec(&self) -> Result<Vec<BigUint>> {
        if self.representation != Representation::PowerBasis {
            return Err(Error::IncorrectRepresentation(
                self.representation.clone(),
                Representation::PowerBasis,
            ));
        }

        Ok(self
            .coefficients
            .axis_iter(Axis(1))
            .map(|rests| self.ctx.rns.lift(rests))
            .collect())
    }
}
