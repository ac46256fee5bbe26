//! Implementation of operations over polynomials.

use super::{Poly, Representation};
use itertools::izip;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

impl AddAssign<&Poly> for Poly {
    fn add_assign(&mut self, p: &Poly) {
        assert_eq!(
            self.representation, p.representation,
            "Incompatible representations"
        );
        debug_assert_eq!(self.ctx, p.ctx, "Incompatible contexts");
        izip!(
            self.coefficients.outer_iter_mut(),
            p.coefficients.outer_iter(),
            self.ctx.q.iter()
        )
        .for_each(|(mut v1, v2, qi)| {
            izip!(v1.iter_mut(), v2.iter()).for_each(|(a, b)| *a = qi.add(*a, *b))
        });
    }
}

impl Add<&Poly> for &Poly {
    type Output = Poly;
    fn add(self, p: &Poly) -> Poly {
        let mut q = self.clone();
        q += p;
        q
    }
}

impl SubAssign<&Poly> for Poly {
    fn sub_assign(&mut self, p: &Poly) {
        assert_eq!(
            self.representation, p.representation,
            "Incompatible representations"
        );
        debug_assert_eq!(self.ctx, p.ctx, "Incompatible contexts");
        izip!(
            self.coefficients.outer_iter_mut(),
            p.coefficients.outer_iter(),
            self.ctx.q.iter()
        )
        .for_each(|(mut v1, v2, qi)| {
            izip!(v1.iter_mut(), v2.iter()).for_each(|(a, b)| *a = qi.sub(*a, *b))
        });
    }
}

impl Sub<&Poly> for &Poly {
    type Output = Poly;
    fn sub(self, p: &Poly) -> Poly {
        let mut q = self.clone();
        q -= p;
        q
    }
}

impl MulAssign<&Poly> for Poly {
    fn mul_assign(&mut self, p: &Poly) {
        assert_eq!(
            self.representation,
            Representation::Ntt,
            "Multiplication requires an Ntt representation."
        );
        assert_eq!(
            p.representation,
            Representation::Ntt,
            "Multiplication requires an Ntt representation."
        );
        debug_assert_eq!(self.ctx, p.ctx, "Incompatible contexts");
        izip!(
            self.coefficients.outer_iter_mut(),
            p.coefficients.outer_iter(),
            self.ctx.q.iter()
        )
        .for_each(|(mut v1, v2, qi)| {
            izip!(v1.iter_mut(), v2.iter()).for_each(|(a, b)| *a = qi.mul(*a, *b))
        });
    }
}

impl Mul<&Poly> for &Poly {
    type Output = Poly;
    fn mul(self, p: &Poly) -> Poly {
        let mut q = self.clone();
        q *= p;
        q
    }
}

impl Neg for &Poly {
    type Output = Poly;

    fn neg(self) -> Poly {
        let mut out = self.clone();
        izip!(out.coefficients.outer_iter_mut(), self.ctx.q.iter())
            .for_each(|(mut v, qi)| v.iter_mut().for_each(|vi| *vi = qi.neg(*vi)));
        out
    }
}

impl Neg for Poly {
    type Output = Poly;

    fn neg(mut self) -> Poly {
        let ctx = self.ctx.clone();
        izip!(self.coefficients.outer_iter_mut(), ctx.q.iter())
            .for_each(|(mut v, qi)| v.iter_mut().for_each(|vi| *vi = qi.neg(*vi)));
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::rq::{Context, Poly, Representation};
    use num_bigint::BigUint;
    use rand::thread_rng;
    use std::{error::Error, sync::Arc};

    const MODULI: &[u64; 3] = &[1153, 4611686018326724609, 4611686018309947393];

    #[test]
    fn add_sub_neg() -> Result<(), Box<dyn Error>> {
        let mut rng = thread_rng();
        let ctx = Arc::new(Context::new(MODULI, 16)?);
        for _ in 0..20 {
            let p = Poly::random(&ctx, Representation::PowerBasis, &mut rng);
            let q = Poly::random(&ctx, Representation::PowerBasis, &mut rng);

            let r = &p + &q;
            let modulus = ctx.modulus();
            for (ri, pi, qi) in itertools::izip!(
                r.to_biguint_vec()?,
                p.to_biguint_vec()?,
                q.to_biguint_vec()?
            ) {
                assert_eq!(ri, (pi + qi) % modulus);
            }

            assert_eq!(&r - &q, p);
            assert_eq!(&(-&p) + &p, Poly::zero(&ctx, Representation::PowerBasis));
            assert_eq!(-p.clone(), -&p);
        }
        Ok(())
    }

    #[test]
    fn mul_is_negacyclic() -> Result<(), Box<dyn Error>> {
        let ctx = Arc::new(Context::new(MODULI, 8)?);

        // x^7 * x = x^8 = -1
        let mut x7 = Poly::try_convert_from_i64(&[0, 0, 0, 0, 0, 0, 0, 1], &ctx, Representation::PowerBasis)?;
        let mut x = Poly::try_convert_from_i64(&[0, 1, 0, 0, 0, 0, 0, 0], &ctx, Representation::PowerBasis)?;
        x7.change_representation(Representation::Ntt);
        x.change_representation(Representation::Ntt);

        let mut r = &x7 * &x;
        r.change_representation(Representation::PowerBasis);
        let lifted = r.to_biguint_vec()?;
        assert_eq!(lifted[0], ctx.modulus() - 1u64);
        assert!(lifted[1..].iter().all(|c| *c == BigUint::from(0u64)));
        Ok(())
    }

    #[test]
    #[should_panic(expected = "Multiplication requires an Ntt representation.")]
    fn mul_in_power_basis_panics() {
        let ctx = Arc::new(Context::new(MODULI, 8).unwrap());
        let p = Poly::zero(&ctx, Representation::PowerBasis);
        let _ = &p * &p;
    }
}
