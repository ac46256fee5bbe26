use crate::zq::Modulus;
use itertools::Itertools;
use ndarray::ArrayViewMut1;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::iter::successors;

/// Negacyclic Number-Theoretic Transform operator.
///
/// The forward transform evaluates a polynomial of `Z_p[X]/(X^size + 1)` at
/// the odd powers of a primitive `2 * size`-th root of unity, with the
/// outputs in bit-reversed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NttOperator {
    p: Modulus,
    size: usize,
    psi_powers: Box<[u64]>,
    psi_powers_shoup: Box<[u64]>,
    psi_inv_powers: Box<[u64]>,
    psi_inv_powers_shoup: Box<[u64]>,
    size_inv: u64,
    size_inv_shoup: u64,
}

impl NttOperator {
    /// Create an NTT operator given a modulus for a specific size.
    ///
    /// Aborts if the size is not a power of 2 that is >= 8.
    /// Returns None if the modulus does not support the NTT for this specific
    /// size.
    pub fn new(p: &Modulus, size: usize) -> Option<Self> {
        if !super::supports_ntt(p.p, size) {
            None
        } else {
            let size_inv = p.inv(size as u64)?;

            let psi = Self::primitive_root(size, p);
            let psi_inv = p.inv(psi)?;

            let powers = successors(Some(1u64), |n| Some(p.mul(*n, psi)))
                .take(size)
                .collect_vec();
            let powers_inv = successors(Some(1u64), |n| Some(p.mul(*n, psi_inv)))
                .take(size)
                .collect_vec();

            let mut psi_powers = Vec::with_capacity(size);
            let mut psi_inv_powers = Vec::with_capacity(size);
            for i in 0..size {
                let j = i.reverse_bits() >> (size.leading_zeros() + 1);
                psi_powers.push(powers[j]);
                psi_inv_powers.push(powers_inv[j]);
            }

            let psi_powers_shoup = p.shoup_vec(&psi_powers);
            let psi_inv_powers_shoup = p.shoup_vec(&psi_inv_powers);

            Some(Self {
                p: p.clone(),
                size,
                psi_powers: psi_powers.into_boxed_slice(),
                psi_powers_shoup: psi_powers_shoup.into_boxed_slice(),
                psi_inv_powers: psi_inv_powers.into_boxed_slice(),
                psi_inv_powers_shoup: psi_inv_powers_shoup.into_boxed_slice(),
                size_inv,
                size_inv_shoup: p.shoup(size_inv),
            })
        }
    }

    /// Size of the transform.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Compute the forward NTT in place (Cooley-Tukey butterflies).
    /// Aborts if a is not of the size handled by the operator.
    pub fn forward(&self, mut a: ArrayViewMut1<u64>) {
        assert_eq!(a.len(), self.size);

        let mut t = self.size;
        let mut m = 1;
        while m < self.size {
            t >>= 1;
            for i in 0..m {
                let s = self.psi_powers[m + i];
                let s_shoup = self.psi_powers_shoup[m + i];
                let j1 = 2 * i * t;
                for j in j1..(j1 + t) {
                    let u = a[j];
                    let v = self.p.mul_shoup(a[j + t], s, s_shoup);
                    a[j] = self.p.add(u, v);
                    a[j + t] = self.p.sub(u, v);
                }
            }
            m <<= 1;
        }
    }

    /// Compute the backward NTT in place (Gentleman-Sande butterflies).
    /// Aborts if a is not of the size handled by the operator.
    pub fn backward(&self, mut a: ArrayViewMut1<u64>) {
        assert_eq!(a.len(), self.size);

        let mut t = 1;
        let mut m = self.size;
        while m > 1 {
            let h = m >> 1;
            let mut j1 = 0;
            for i in 0..h {
                let s = self.psi_inv_powers[h + i];
                let s_shoup = self.psi_inv_powers_shoup[h + i];
                for j in j1..(j1 + t) {
                    let u = a[j];
                    let v = a[j + t];
                    a[j] = self.p.add(u, v);
                    a[j + t] = self.p.mul_shoup(self.p.sub(u, v), s, s_shoup);
                }
                j1 += 2 * t;
            }
            t <<= 1;
            m = h;
        }

        a.iter_mut()
            .for_each(|ai| *ai = self.p.mul_shoup(*ai, self.size_inv, self.size_inv_shoup));
    }

    /// Returns a primitive `2 * size`-th root of unity modulo p.
    ///
    /// The root is found from a fixed seed so that two operators built from
    /// the same modulus and size agree on their evaluation points.
    fn primitive_root(size: usize, p: &Modulus) -> u64 {
        debug_assert!(super::supports_ntt(p.p, size));

        let lambda = (p.p - 1) / (2 * size as u64);

        let mut rng: ChaCha8Rng = SeedableRng::seed_from_u64(0);
        for _ in 0..100 {
            let mut root = rng.gen_range(0..p.p);
            root = p.pow(root, lambda);
            if Self::is_primitive_root(root, 2 * size, p) {
                return root;
            }
        }

        debug_assert!(false, "Couldn't find primitive root");
        0
    }

    /// Returns whether a is a primitive `n`-th root of unity modulo p.
    fn is_primitive_root(a: u64, n: usize, p: &Modulus) -> bool {
        debug_assert!(a < p.p);
        debug_assert!(n.is_power_of_two());

        // A root of unity of order a power of two is primitive if and only
        // if its (n/2)-th power equals -1.
        p.pow(a, (n / 2) as u64) == p.p - 1
    }
}
