//! Generation of NTT-friendly primes.

use ckks_util::is_prime;

/// Returns the largest prime of `num_bits` bits congruent to 1 modulo
/// `modulo` that is strictly smaller than `upper_bound`.
///
/// Returns None if `num_bits` is not between 10 and 62, or if no such prime
/// exists.
pub fn generate_prime(num_bits: usize, modulo: u64, upper_bound: u64) -> Option<u64> {
    if !(10..=62).contains(&num_bits) || modulo == 0 || upper_bound < 2 {
        return None;
    }
    debug_assert!((1u64 << num_bits) >= upper_bound);

    let lower_bound = 1u64 << (num_bits - 1);
    let max = upper_bound - 1;
    let mut candidate = max - (max - 1) % modulo;
    while candidate > lower_bound {
        if is_prime(candidate) {
            return Some(candidate);
        }
        candidate = candidate.checked_sub(modulo)?;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::generate_prime;
    use ckks_util::is_prime;

    #[test]
    fn prime_generation() {
        assert_eq!(generate_prime(2, 2, 1 << 2), None);
        assert_eq!(generate_prime(63, 2, 1 << 62), None);

        assert_eq!(generate_prime(10, 2, 1 << 10), Some(1021));
        assert_eq!(generate_prime(10, 2, 1021), Some(1019));
        assert_eq!(generate_prime(10, 2 * 1024, 1 << 10), None);

        let p = generate_prime(62, 2 * 1024, 1 << 62).unwrap();
        assert!(is_prime(p));
        assert_eq!(p % 2048, 1);
        assert_eq!(64 - p.leading_zeros(), 62);
        assert_eq!(p, 4611686018427365377);
    }

    #[test]
    fn successive_primes_are_distinct_and_decreasing() {
        let degree = 8192u64;
        let mut upper_bound = 1u64 << 40;
        for _ in 0..3 {
            let p = generate_prime(40, 2 * degree, upper_bound).unwrap();
            assert!(p < upper_bound);
            assert_eq!(p % (2 * degree), 1);
            assert!(is_prime(p));
            upper_bound = p;
        }
    }
}
