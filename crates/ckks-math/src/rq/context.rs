use num_bigint::BigUint;
use std::fmt::{self, Debug};
use std::sync::Arc;

use crate::{ntt::NttOperator, rns::RnsContext, zq::Modulus, Error, Result};

/// Precomputed tables for polynomials of a fixed degree over a fixed chain
/// of moduli.
///
/// Two contexts built from the same moduli and degree compare equal.
#[derive(Clone, PartialEq, Eq)]
pub struct Context {
    pub(crate) moduli: Box<[u64]>,
    pub(crate) q: Box<[Modulus]>,
    pub(crate) rns: RnsContext,
    pub(crate) ops: Box<[NttOperator]>,
    pub(crate) degree: usize,
}

impl Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("moduli", &self.moduli)
            .field("degree", &self.degree)
            .finish_non_exhaustive()
    }
}

impl Context {
    /// Builds the context of polynomials of degree `degree` modulo every
    /// prime of `moduli`.
    ///
    /// Fails if the degree is not a power of two of at least 8, or if a
    /// modulus is not a prime congruent to 1 modulo `2 * degree`.
    pub fn new(moduli: &[u64], degree: usize) -> Result<Self> {
        if degree < 8 || !degree.is_power_of_two() {
            return Err(Error::Default(format!(
                "Invalid degree {}: expected a power of two of at least 8",
                degree
            )));
        }

        let q = moduli
            .iter()
            .map(|&m| Modulus::new(m))
            .collect::<Result<Box<[_]>>>()?;
        let mut ops = Vec::with_capacity(q.len());
        for qi in q.iter() {
            let op = NttOperator::new(qi, degree).ok_or_else(|| {
                Error::Default(format!(
                    "Modulus {} does not support an NTT of size {}",
                    qi.modulus(),
                    degree
                ))
            })?;
            ops.push(op);
        }

        Ok(Self {
            moduli: moduli.into(),
            q,
            rns: RnsContext::new(moduli)?,
            ops: ops.into_boxed_slice(),
            degree,
        })
    }

    /// Same as [`Context::new`], in an `Arc`.
    pub fn new_arc(moduli: &[u64], degree: usize) -> Result<Arc<Self>> {
        Ok(Arc::new(Self::new(moduli, degree)?))
    }

    /// Product of the moduli.
    pub fn modulus(&self) -> &BigUint {
        self.rns.modulus()
    }

    /// The chain of moduli.
    pub fn moduli(&self) -> &[u64] {
        &self.moduli
    }

    /// Polynomial degree.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of limbs of one polynomial: one coefficient per modulus.
    pub fn limb_count(&self) -> usize {
        self.degree * self.moduli.len()
    }
}
