#![crate_name = "ckks_util"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Utilities for the ckks workspace.

use num_bigint_dig::{prime::probably_prime, BigUint};
use rand::{CryptoRng, RngCore};

/// Returns whether the modulus p is prime; this function is 100% accurate.
pub fn is_prime(p: u64) -> bool {
    probably_prime(&BigUint::from(p), 0)
}

/// Sample a vector of independent centered binomial distributions of a given
/// variance. A variance of zero yields the zero vector.
///
/// Returns an error if the variance is strictly larger than 16.
pub fn sample_vec_cbd<R: RngCore + CryptoRng>(
    vector_size: usize,
    variance: usize,
    rng: &mut R,
) -> Result<Vec<i64>, &'static str> {
    match variance {
        0 => Ok(vec![0; vector_size]),
        1..=16 => sample_vec_cbd_f32(vector_size, variance as f32, rng),
        _ => Err("The variance should be between 0 and 16"),
    }
}

/// Sample a vector of independent centered binomial distributions whose
/// variance is a multiple of 1/2.
///
/// Each coefficient is the difference of the popcounts of two words of
/// `2 * variance` uniform bits. Returns an error if the variance is not a
/// multiple of 1/2 between 1/2 and 16.
pub fn sample_vec_cbd_f32<R: RngCore + CryptoRng>(
    vector_size: usize,
    variance: f32,
    rng: &mut R,
) -> Result<Vec<i64>, &'static str> {
    let side_bits = 2.0 * variance;
    if !(1.0..=32.0).contains(&side_bits) || side_bits.fract() != 0.0 {
        return Err("The variance should be a multiple of 0.5 between 0.5 and 16");
    }

    let mask = u64::MAX >> (64 - side_bits as u32);
    let mut out = Vec::with_capacity(vector_size);
    for _ in 0..vector_size {
        let word = rng.next_u64();
        let added = (word & mask).count_ones() as i64;
        let subtracted = ((word >> 32) & mask).count_ones() as i64;
        out.push(added - subtracted);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{is_prime, sample_vec_cbd, sample_vec_cbd_f32};
    use num_traits::ToPrimitive;
    use rand::thread_rng;

    /// Population variance of at least two values.
    fn variance<T: ToPrimitive>(values: &[T]) -> f64 {
        assert!(values.len() > 1);
        let values = values
            .iter()
            .map(|v| v.to_f64().unwrap_or(f64::NAN))
            .collect::<Vec<_>>();
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64
    }

    #[test]
    fn prime() {
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(is_prime(5));
        assert!(is_prime(7));
        assert!(is_prime(4611686018326724609));

        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(!is_prime(4));
        assert!(!is_prime(6));
        assert!(!is_prime(8));
        assert!(!is_prime(9));
        assert!(!is_prime(4611686014132420609)); // (2^31 - 1)^2
    }

    #[test]
    fn sample_cbd() {
        assert!(sample_vec_cbd(10, 17, &mut thread_rng()).is_err());
        assert!(sample_vec_cbd_f32(10, 0.25, &mut thread_rng()).is_err());
        assert!(sample_vec_cbd_f32(10, 0.0, &mut thread_rng()).is_err());

        let zeros = sample_vec_cbd(100, 0, &mut thread_rng()).unwrap();
        assert!(zeros.iter().all(|v| *v == 0));

        for var in 1..=16 {
            for size in 0..=100 {
                let v = sample_vec_cbd(size, var, &mut thread_rng()).unwrap();
                assert_eq!(v.len(), size);
            }

            // Verifies that the min, max are in absolute value smaller than 2 * var
            let v = sample_vec_cbd(100000, var, &mut thread_rng()).unwrap();
            let w = v.iter().map(|vi| vi.abs()).max().unwrap();
            assert!(w <= 2 * var as i64);

            // Verifies that the variance is correct. We could probably refine the bound
            // but for now, we will just check that the rounded value is equal to the
            // variance.
            assert_eq!(variance(&v).round(), var as f64);
        }
    }

    #[test]
    fn sample_ternary() {
        let v = sample_vec_cbd_f32(100000, 0.5, &mut thread_rng()).unwrap();
        assert!(v.iter().all(|vi| (-1..=1).contains(vi)));
        assert!((variance(&v) - 0.5).abs() < 0.05);
    }
}
