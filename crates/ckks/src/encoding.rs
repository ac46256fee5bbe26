//! Canonical embedding of real vectors into polynomials over the reals.
//!
//! A polynomial m of degree `n` is identified with its evaluations at the
//! odd powers of ζ = exp(iπ/n). Since m(ζ^(2n-2k-1)) is the conjugate of
//! m(ζ^(2k+1)), a real vector of `n / 2` slots determines a real polynomial.
//! Both directions are computed with a twisted FFT of size `n`:
//! m(ζ^(2k+1)) = Σ_j (m_j ζ^j) exp(2iπkj/n).

use itertools::izip;
use std::f64::consts::PI;

/// Precomputed tables for the twisted FFT of a given size.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FftTables {
    degree: usize,
    /// ζ^j for j < n, as (cos, sin) pairs.
    twist: Box<[(f64, f64)]>,
    /// exp(-2iπt/n) for t < n / 2.
    roots: Box<[(f64, f64)]>,
    bit_reversal: Box<[usize]>,
}

impl FftTables {
    /// Build the tables for polynomials of degree `degree`, which must be a
    /// power of two larger or equal to 8.
    pub(crate) fn new(degree: usize) -> Self {
        debug_assert!(degree.is_power_of_two() && degree >= 8);

        let log_degree = degree.trailing_zeros();
        let twist = (0..degree)
            .map(|j| {
                let angle = PI * j as f64 / degree as f64;
                (angle.cos(), angle.sin())
            })
            .collect();
        let roots = (0..degree / 2)
            .map(|t| {
                let angle = -2.0 * PI * t as f64 / degree as f64;
                (angle.cos(), angle.sin())
            })
            .collect();
        let bit_reversal = (0..degree)
            .map(|i| i.reverse_bits() >> (usize::BITS - log_degree))
            .collect();

        Self {
            degree,
            twist,
            roots,
            bit_reversal,
        }
    }

    /// Number of real slots.
    pub(crate) const fn slots(&self) -> usize {
        self.degree / 2
    }

    /// In-place radix-2 decimation-in-time FFT computing
    /// Σ_j x_j exp(-2iπkj/n).
    fn fft(&self, re: &mut [f64], im: &mut [f64]) {
        debug_assert_eq!(re.len(), self.degree);
        debug_assert_eq!(im.len(), self.degree);

        for (i, j) in self.bit_reversal.iter().enumerate() {
            if i < *j {
                re.swap(i, *j);
                im.swap(i, *j);
            }
        }

        let mut half = 1;
        while half < self.degree {
            let stride = self.degree / (2 * half);
            for start in (0..self.degree).step_by(2 * half) {
                for k in 0..half {
                    let (w_re, w_im) = self.roots[k * stride];
                    let (i0, i1) = (start + k, start + k + half);

                    let v_re = w_re * re[i1] - w_im * im[i1];
                    let v_im = w_re * im[i1] + w_im * re[i1];
                    let (u_re, u_im) = (re[i0], im[i0]);

                    re[i0] = u_re + v_re;
                    im[i0] = u_im + v_im;
                    re[i1] = u_re - v_re;
                    im[i1] = u_im - v_im;
                }
            }
            half *= 2;
        }
    }

    /// Coefficients of the real polynomial whose evaluations at the first
    /// `n / 2` odd powers of ζ are `values`.
    pub(crate) fn embed_inverse(&self, values: &[f64]) -> Vec<f64> {
        assert_eq!(values.len(), self.slots());

        let mut re = vec![0.0; self.degree];
        let mut im = vec![0.0; self.degree];
        for (k, v) in values.iter().enumerate() {
            re[k] = *v;
            re[self.degree - 1 - k] = *v;
        }

        self.fft(&mut re, &mut im);

        // m_j = Re(a_j ζ^(-j)) with a = fft(values) / n
        let inv_degree = 1.0 / self.degree as f64;
        izip!(re.iter(), im.iter(), self.twist.iter())
            .map(|(a_re, a_im, (cos, sin))| (a_re * cos + a_im * sin) * inv_degree)
            .collect()
    }

    /// Real parts of the evaluations of the polynomial at the first `n / 2`
    /// odd powers of ζ.
    pub(crate) fn embed(&self, coefficients: &[f64]) -> Vec<f64> {
        assert_eq!(coefficients.len(), self.degree);

        // Evaluating the conjugate-twisted coefficients yields the conjugate
        // of the evaluations, which has the same real part.
        let (mut re, mut im): (Vec<f64>, Vec<f64>) = coefficients
            .iter()
            .zip(self.twist.iter())
            .map(|(c, (cos, sin))| (c * cos, -c * sin))
            .unzip();

        self.fft(&mut re, &mut im);
        re.truncate(self.slots());
        re
    }
}

#[cfg(test)]
mod tests {
    use super::FftTables;
    use rand::{thread_rng, Rng};
    use std::f64::consts::PI;

    // Direct O(n^2) evaluation at the odd powers of ζ.
    fn evaluate(coefficients: &[f64]) -> Vec<f64> {
        let n = coefficients.len();
        (0..n / 2)
            .map(|k| {
                coefficients
                    .iter()
                    .enumerate()
                    .map(|(j, c)| c * (PI * ((2 * k + 1) * j) as f64 / n as f64).cos())
                    .sum()
            })
            .collect()
    }

    #[test]
    fn embed_matches_direct_evaluation() {
        let mut rng = thread_rng();
        for degree in [8, 16, 64, 256] {
            let tables = FftTables::new(degree);
            let coefficients = (0..degree)
                .map(|_| rng.gen_range(-1.0..1.0))
                .collect::<Vec<f64>>();

            let fast = tables.embed(&coefficients);
            let slow = evaluate(&coefficients);
            assert_eq!(fast.len(), degree / 2);
            for (f, s) in fast.iter().zip(slow.iter()) {
                assert!((f - s).abs() < 1e-9, "{} != {}", f, s);
            }
        }
    }

    #[test]
    fn embed_inverts_embed_inverse() {
        let mut rng = thread_rng();
        let tables = FftTables::new(1024);
        let values = (0..512)
            .map(|_| rng.gen_range(-100.0..100.0))
            .collect::<Vec<f64>>();

        let coefficients = tables.embed_inverse(&values);
        let decoded = tables.embed(&coefficients);
        for (v, d) in values.iter().zip(decoded.iter()) {
            assert!((v - d).abs() < 1e-9);
        }
    }

    #[test]
    fn constant_vector_is_a_constant_polynomial() {
        let tables = FftTables::new(64);
        let coefficients = tables.embed_inverse(&[9.0; 32]);
        assert!((coefficients[0] - 9.0).abs() < 1e-12);
        assert!(coefficients[1..].iter().all(|c| c.abs() < 1e-12));
    }
}
