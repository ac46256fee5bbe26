//! Ring of integers modulo a prime `p < 2^62`.

pub mod primes;

use crate::{Error, Result};
use rand::{distributions::Uniform, CryptoRng, Rng, RngCore};

/// Structure encapsulating an integer modulus up to 62 bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modulus {
    pub(crate) p: u64,
}

impl Modulus {
    /// Create a modulus from an integer of at most 62 bits.
    pub fn new(p: u64) -> Result<Self> {
        if p < 2 || (p >> 62) != 0 {
            Err(Error::InvalidModulus(p))
        } else {
            Ok(Self { p })
        }
    }

    /// Returns the value of the modulus.
    pub const fn modulus(&self) -> u64 {
        self.p
    }

    /// Modular addition of a and b in constant time.
    ///
    /// Aborts if a >= p or b >= p in debug mode.
    pub const fn add(&self, a: u64, b: u64) -> u64 {
        debug_assert!(a < self.p && b < self.p);
        Self::reduce1(a + b, self.p)
    }

    /// Modular subtraction of a and b in constant time.
    ///
    /// Aborts if a >= p or b >= p in debug mode.
    pub const fn sub(&self, a: u64, b: u64) -> u64 {
        debug_assert!(a < self.p && b < self.p);
        Self::reduce1(a + self.p - b, self.p)
    }

    /// Modular negation in constant time.
    ///
    /// Aborts if a >= p in debug mode.
    pub const fn neg(&self, a: u64) -> u64 {
        debug_assert!(a < self.p);
        Self::reduce1(self.p - a, self.p)
    }

    /// Modular multiplication of a and b.
    ///
    /// Aborts if a >= p or b >= p in debug mode.
    pub const fn mul(&self, a: u64, b: u64) -> u64 {
        debug_assert!(a < self.p && b < self.p);
        self.reduce_u128((a as u128) * (b as u128))
    }

    /// Shoup representation of a value, used for multiplications by a
    /// constant operand.
    ///
    /// Aborts if b >= p in debug mode.
    pub const fn shoup(&self, b: u64) -> u64 {
        debug_assert!(b < self.p);
        (((b as u128) << 64) / (self.p as u128)) as u64
    }

    /// Shoup representation of a vector of values.
    pub fn shoup_vec(&self, a: &[u64]) -> Vec<u64> {
        a.iter().map(|ai| self.shoup(*ai)).collect()
    }

    /// Lazy Shoup multiplication of a and b; the output is in [0, 2p).
    ///
    /// Aborts if b >= p or b_shoup is not the Shoup representation of b in
    /// debug mode.
    pub const fn lazy_mul_shoup(&self, a: u64, b: u64, b_shoup: u64) -> u64 {
        debug_assert!(b < self.p);
        let q = (((a as u128) * (b_shoup as u128)) >> 64) as u64;
        let r = a.wrapping_mul(b).wrapping_sub(q.wrapping_mul(self.p));
        debug_assert!(r < 2 * self.p);
        r
    }

    /// Shoup multiplication of a and b.
    pub const fn mul_shoup(&self, a: u64, b: u64, b_shoup: u64) -> u64 {
        Self::reduce1(self.lazy_mul_shoup(a, b, b_shoup), self.p)
    }

    /// Modular exponentiation by square-and-multiply.
    pub fn pow(&self, a: u64, n: u64) -> u64 {
        let mut result = 1 % self.p;
        let mut base = self.reduce(a);
        let mut n = n;
        while n > 0 {
            if n & 1 == 1 {
                result = self.mul(result, base);
            }
            base = self.mul(base, base);
            n >>= 1;
        }
        result
    }

    /// Modular inversion, using the extended Euclidean algorithm.
    ///
    /// Returns None if a is not invertible modulo p.
    pub fn inv(&self, a: u64) -> Option<u64> {
        let (mut t, mut new_t) = (0i128, 1i128);
        let (mut r, mut new_r) = (self.p as i128, self.reduce(a) as i128);
        while new_r != 0 {
            let quotient = r / new_r;
            (t, new_t) = (new_t, t - quotient * new_t);
            (r, new_r) = (new_r, r - quotient * new_r);
        }
        if r != 1 {
            None
        } else {
            Some(t.rem_euclid(self.p as i128) as u64)
        }
    }

    /// Reduce an integer modulo p.
    pub const fn reduce(&self, a: u64) -> u64 {
        a % self.p
    }

    /// Reduce a 128-bit integer modulo p.
    pub const fn reduce_u128(&self, a: u128) -> u64 {
        (a % (self.p as u128)) as u64
    }

    /// Reduce a signed integer modulo p, returning a value in [0, p).
    pub const fn reduce_i64(&self, a: i64) -> u64 {
        let r = a.unsigned_abs() % self.p;
        if a < 0 {
            Self::reduce1(self.p - r, self.p)
        } else {
            r
        }
    }

    /// Generate a vector of `size` uniform elements modulo p.
    pub fn random_vec<R: RngCore + CryptoRng>(&self, size: usize, rng: &mut R) -> Vec<u64> {
        let distribution = Uniform::from(0..self.p);
        (0..size).map(|_| rng.sample(distribution)).collect()
    }

    /// Return x mod p when x < 2 * p.
    pub(crate) const fn reduce1(x: u64, p: u64) -> u64 {
        debug_assert!(p >> 63 == 0);
        debug_assert!(x < 2 * p);
        if x >= p {
            x - p
        } else {
            x
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Modulus;
    use proptest::prelude::*;
    use rand::thread_rng;

    const P: u64 = 4611686018326724609;

    #[test]
    fn constructor() {
        assert!(Modulus::new(0).is_err());
        assert!(Modulus::new(1).is_err());
        assert!(Modulus::new(1 << 62).is_err());
        assert!(Modulus::new(2).is_ok());
        assert!(Modulus::new((1 << 62) - 1).is_ok());
    }

    #[test]
    fn inverse() {
        let q = Modulus::new(1153).unwrap();
        assert!(q.inv(0).is_none());
        for a in 1..1153 {
            let b = q.inv(a).unwrap();
            assert_eq!(q.mul(a, b), 1);
        }

        let q = Modulus::new(15).unwrap();
        assert!(q.inv(5).is_none());
        assert_eq!(q.inv(7), Some(13));
    }

    #[test]
    fn random_vec_in_range() {
        let q = Modulus::new(P).unwrap();
        let v = q.random_vec(1000, &mut thread_rng());
        assert_eq!(v.len(), 1000);
        assert!(v.iter().all(|vi| *vi < P));
    }

    proptest! {
        #[test]
        fn add_sub_neg(a in 0..P, b in 0..P) {
            let q = Modulus::new(P).unwrap();
            prop_assert_eq!(q.add(a, b) as u128, (a as u128 + b as u128) % P as u128);
            prop_assert_eq!(q.sub(q.add(a, b), b), a);
            prop_assert_eq!(q.add(a, q.neg(a)), 0);
        }

        #[test]
        fn mul_and_shoup(a in 0..P, b in 0..P) {
            let q = Modulus::new(P).unwrap();
            let expected = ((a as u128 * b as u128) % P as u128) as u64;
            prop_assert_eq!(q.mul(a, b), expected);
            prop_assert_eq!(q.mul_shoup(a, b, q.shoup(b)), expected);
        }

        #[test]
        fn reduce_signed(a in any::<i64>()) {
            let q = Modulus::new(P).unwrap();
            let expected = (a as i128).rem_euclid(P as i128) as u64;
            prop_assert_eq!(q.reduce_i64(a), expected);
        }
    }
}
