use super::fq::Fq;
use crate::error::{Error, Result};
use crate::ff_ext::quadratic::QuadExtField;
use crate::ff_ext::ExtField;

/// `Fq2 = Fq[u] / (u^2 + 1)`
pub type Fq2 = QuadExtField<Fq>;

crate::impl_binops_additive!(Fq2, Fq2);
crate::impl_binops_multiplicative!(Fq2, Fq2);
crate::impl_binops_calls!(Fq2);
crate::impl_sum_prod!(Fq2);

impl ExtField for Fq2 {
    // u + 1
    const NON_RESIDUE: Self = Fq2::new(Fq::one(), Fq::one());

    fn mul_by_nonresidue(&self) -> Self {
        // (a + bu)(1 + u) = (a - b) + (a + b)u
        Fq2::new(self.c0 - self.c1, self.c0 + self.c1)
    }

    fn frobenius_map(&mut self, power: usize) {
        if power % 2 != 0 {
            self.conjugate();
        }
    }
}

impl Fq2 {
    pub const SIZE: usize = 2 * Fq::SIZE;

    /// Big-endian encoding, `c1 || c0`.
    pub fn to_bytes(&self) -> [u8; 96] {
        let mut res = [0u8; 96];
        res[..Fq::SIZE].copy_from_slice(&self.c1.to_bytes());
        res[Fq::SIZE..].copy_from_slice(&self.c0.to_bytes());
        res
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Fq2> {
        if bytes.len() != Self::SIZE {
            return Err(Error::InvalidLength {
                expected: Self::SIZE,
                actual: bytes.len(),
            });
        }
        let c1 = Fq::from_bytes(&bytes[..Fq::SIZE])?;
        let c0 = Fq::from_bytes(&bytes[Fq::SIZE..])?;
        Ok(Fq2::new(c0, c1))
    }

    /// Samples both coefficients, propagating entropy failures.
    pub fn try_random(mut rng: impl rand_core::RngCore) -> Result<Fq2> {
        Ok(Fq2::new(Fq::try_random(&mut rng)?, Fq::try_random(&mut rng)?))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tests::field::{random_field_tests, random_frobenius_tests, random_sqrt_tests};
    use crate::tests::SEED;
    use ff::{Field, PrimeField};
    use rand_core::SeedableRng;
    use rand_xorshift::XorShiftRng;

    #[test]
    fn test_field() {
        random_field_tests::<Fq2>();
    }

    #[test]
    fn test_frobenius() {
        random_frobenius_tests::<Fq2, _>(super::super::fq::MODULUS.0, 20);
    }

    #[test]
    fn test_sqrt() {
        random_sqrt_tests::<Fq2>(1000);

        // Purely real inputs. Exactly one of 2 and -2 is a square in Fq;
        // both are squares in Fq2.
        for c in [Fq::from(2), -Fq::from(2), Fq::zero()] {
            let a = Fq2::new(c, Fq::zero());
            let root = a.sqrt().unwrap();
            assert_eq!(root.square(), a);
        }

        // u^2 = -1, so -1 has a square root in Fq2.
        let minus_one = -Fq2::one();
        let root = minus_one.sqrt().unwrap();
        assert_eq!(root.square(), minus_one);

        // The non-residue generating Fq6 has no square root.
        assert!(bool::from(Fq2::NON_RESIDUE.sqrt().is_none()));
    }

    #[test]
    fn test_fq2_mul_nonresidue() {
        let mut rng = XorShiftRng::from_seed(SEED);
        for _ in 0..100 {
            let e = Fq2::random(&mut rng);
            assert_eq!(e.mul_by_nonresidue(), e * Fq2::NON_RESIDUE);
        }
    }

    #[test]
    fn test_fq2_basics() {
        let u = Fq2::new(Fq::zero(), Fq::one());
        assert_eq!(u.square(), -Fq2::one());

        let a = Fq2::new(Fq::from(3), Fq::from(5));
        let mut conj = a;
        conj.conjugate();
        assert_eq!(conj, Fq2::new(Fq::from(3), -Fq::from(5)));
        assert_eq!(a * conj, Fq2::new(a.norm(), Fq::zero()));
        assert_eq!(a.scale(&Fq::from(2)), a.double());
        assert!(bool::from(Fq2::one().is_one()));
        assert!(!bool::from(a.is_one()));
        assert!(!bool::from(Fq2::new(Fq::one(), Fq::one()).is_one()));
    }

    #[test]
    fn test_fq2_bytes() {
        let mut rng = XorShiftRng::from_seed(SEED);
        for _ in 0..100 {
            let a = Fq2::random(&mut rng);
            let bytes = a.to_bytes();
            assert_eq!(&bytes[..48], &a.c1.to_bytes()[..]);
            assert_eq!(Fq2::from_bytes(&bytes).unwrap(), a);
        }

        assert!(matches!(
            Fq2::from_bytes(&[0u8; 95]),
            Err(Error::InvalidLength {
                expected: 96,
                actual: 95
            })
        ));
        let mut bad = [0u8; 96];
        bad[..48].copy_from_slice(&[0xff; 48]);
        assert!(matches!(Fq2::from_bytes(&bad), Err(Error::NonCanonical)));

        assert_eq!(Fq::NUM_BITS, 381);
    }
}
