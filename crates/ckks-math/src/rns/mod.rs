//! Residue-Number System operations.

use crate::{zq::Modulus, Error, Result};
use itertools::izip;
use ndarray::ArrayView1;
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use std::fmt::Debug;

/// Context for a Residue Number System.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct RnsContext {
    moduli_u64: Box<[u64]>,
    moduli: Box<[Modulus]>,
    q_tilde: Box<[u64]>,
    q_star: Box<[BigUint]>,
    garner: Box<[BigUint]>,
    product: BigUint,
}

impl Debug for RnsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RnsContext")
            .field("moduli_u64", &self.moduli_u64)
            // .field("q_tilde", &self.q_tilde)
            // .field("q_star", &self.q_star)
            // .field("garner", &self.garner)
            .field("product", &self.product)
            .finish()
    }
}

impl RnsContext {
    /// Create a RNS context from a list of moduli.
    ///
    /// Returns an error if the list is empty, or if the moduli are no
    /// coprime.
    pub fn new(moduli_u64: &[u64]) -> Result<Self> {
        if moduli_u64.is_empty() {
            Err(Error::Default("The list of moduli is empty".to_string()))
        } else {
            let mut product = BigUint::from(1u64);
            let mut moduli = Vec::with_capacity(moduli_u64.len());
            for (i, modulus) in moduli_u64.iter().enumerate() {
                if moduli_u64[..i].iter().any(|other| gcd(*other, *modulus) != 1) {
                    return Err(Error::Default("The moduli are not coprime".to_string()));
                }
                moduli.push(Modulus::new(*modulus)?);
                product *= *modulus;
            }

            let mut q_tilde = Vec::with_capacity(moduli.len());
            let mut q_star = Vec::with_capacity(moduli.len());
            let mut garner = Vec::with_capacity(moduli.len());
            for qi in &moduli {
                // q* = product / qi
                let q_star_i = &product / qi.modulus();
                // q~ = (product / qi) ^ (-1) % qi
                let q_star_mod_qi = (&q_star_i % qi.modulus())
                    .to_u64()
                    .ok_or_else(|| Error::Default("Residue does not fit in 64 bits".to_string()))?;
                let q_tilde_i = qi
                    .inv(q_star_mod_qi)
                    .ok_or_else(|| Error::Default("The moduli are not coprime".to_string()))?;

                garner.push(&q_star_i * q_tilde_i);
                q_tilde.push(q_tilde_i);
                q_star.push(q_star_i);
            }

            Ok(Self {
                moduli_u64: moduli_u64.to_owned().into_boxed_slice(),
                moduli: moduli.into_boxed_slice(),
                q_tilde: q_tilde.into_boxed_slice(),
                q_star: q_star.into_boxed_slice(),
                garner: garner.into_boxed_slice(),
                product,
            })
        }
    }

    /// Returns the product of the moduli used when creating the RNS context.
    pub const fn modulus(&self) -> &BigUint {
        &self.product
    }

    /// Returns the moduli of the RNS context.
    pub fn moduli(&self) -> &[u64] {
        &self.moduli_u64
    }

    /// Project a BigUint into its rests.
    pub fn project(&self, a: &BigUint) -> Vec<u64> {
        self.moduli_u64
            .iter()
            .map(|modulus| (a % *modulus).to_u64().unwrap_or_default())
            .collect()
    }

    /// Lift rests into a BigUint in [0, product).
    ///
    /// Aborts if the number of rests is different than the number of moduli
    /// in debug mode.
    pub fn lift(&self, rests: ArrayView1<u64>) -> BigUint {
        debug_assert_eq!(rests.len(), self.garner.len());

        let mut result = BigUint::zero();
        izip!(self.garner.iter(), rests.iter())
            .for_each(|(garner_i, rests_i)| result += garner_i * *rests_i);
        result % &self.product
    }

    /// Getter for the i-th garner coefficient.
    pub fn get_garner(&self, i: usize) -> Option<&BigUint> {
        self.garner.get(i)
    }
}

const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}
