//! Number-Theoretic Transform in ZZ_q.

mod native;

pub use native::NttOperator;

/// Returns whether a modulus p is prime and supports the Number Theoretic
/// Transform of size n.
///
/// Aborts if n is not a power of 2 that is >= 8.
pub fn supports_ntt(p: u64, n: usize) -> bool {
    assert!(n >= 8 && n.is_power_of_two());

    p % ((n as u64) << 1) == 1 && ckks_util::is_prime(p)
}

#[cfg(test)]
mod tests {
    use super::supports_ntt;

    #[test]
    fn supports() {
        assert!(supports_ntt(1153, 8));
        assert!(supports_ntt(1153, 16));
        assert!(supports_ntt(1153, 32));
        assert!(!supports_ntt(1153, 128));
        assert!(!supports_ntt(1155, 8));
    }
}
