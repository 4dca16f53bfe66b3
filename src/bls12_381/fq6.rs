use super::fq::Fq;
use super::fq2::Fq2;
use crate::error::{Error, Result};
use crate::ff_ext::{cubic::CubicExtField, ExtField};

/// `Fq6 = Fq2[v] / (v^3 - (u + 1))`
pub type Fq6 = CubicExtField<Fq2>;

crate::impl_binops_additive!(Fq6, Fq6);
crate::impl_binops_multiplicative!(Fq6, Fq6);
crate::impl_binops_calls!(Fq6);
crate::impl_sum_prod!(Fq6);

impl ExtField for Fq6 {
    // v
    const NON_RESIDUE: Self = Fq6::new(Fq2::zero(), Fq2::one(), Fq2::zero());

    fn mul_by_nonresidue(&self) -> Self {
        // (c0 + c1 v + c2 v^2) v = c2 (u + 1) + c0 v + c1 v^2
        Fq6::new(self.c2.mul_by_nonresidue(), self.c0, self.c1)
    }

    fn frobenius_map(&mut self, power: usize) {
        self.c0.frobenius_map(power);
        self.c1.frobenius_map(power);
        self.c2.frobenius_map(power);
        self.c1 *= FROBENIUS_COEFF_FQ6_C1[power % 6];
        self.c2 *= FROBENIUS_COEFF_FQ6_C2[power % 6];
    }
}

impl Fq6 {
    pub const SIZE: usize = 3 * Fq2::SIZE;

    /// `self * (c1 v)`
    pub fn mul_by_1(&self, c1: &Fq2) -> Fq6 {
        Fq6::new(
            (self.c2 * c1).mul_by_nonresidue(),
            self.c0 * c1,
            self.c1 * c1,
        )
    }

    /// `self * (c0 + c1 v)`
    pub fn mul_by_01(&self, c0: &Fq2, c1: &Fq2) -> Fq6 {
        let v0 = self.c0 * c0;
        let v1 = self.c1 * c1;
        Fq6::new(
            v0 + (self.c2 * c1).mul_by_nonresidue(),
            (self.c0 + self.c1) * (c0 + c1) - v0 - v1,
            v1 + self.c2 * c0,
        )
    }

    /// Big-endian encoding, `c2 || c1 || c0`.
    pub fn to_bytes(&self) -> [u8; 288] {
        let mut res = [0u8; 288];
        for (chunk, c) in res
            .chunks_exact_mut(Fq2::SIZE)
            .zip([&self.c2, &self.c1, &self.c0])
        {
            chunk.copy_from_slice(&c.to_bytes());
        }
        res
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Fq6> {
        if bytes.len() != Self::SIZE {
            return Err(Error::InvalidLength {
                expected: Self::SIZE,
                actual: bytes.len(),
            });
        }
        let c2 = Fq2::from_bytes(&bytes[..Fq2::SIZE])?;
        let c1 = Fq2::from_bytes(&bytes[Fq2::SIZE..2 * Fq2::SIZE])?;
        let c0 = Fq2::from_bytes(&bytes[2 * Fq2::SIZE..])?;
        Ok(Fq6::new(c0, c1, c2))
    }
}

// Sixth roots of unity in Fq. Every Fq6 Frobenius coefficient is one of
// these, possibly times u.
pub(crate) const ONE: Fq = Fq::one();
pub(crate) const NEG_ONE: Fq = Fq([
    0x43f5fffffffcaaae,
    0x32b7fff2ed47fffd,
    0x07e83a49a2e99d69,
    0xeca8f3318332bb7a,
    0xef148d1ea0f4c069,
    0x040ab3263eff0206,
]);
pub(crate) const OMEGA: Fq = Fq([
    0xcd03c9e48671f071,
    0x5dab22461fcda5d2,
    0x587042afd3851b95,
    0x8eb60ebe01bacb9e,
    0x03f97d6e83d050d2,
    0x18f0206554638741,
]);
pub(crate) const OMEGA_2: Fq = Fq([
    0x30f1361b798a64e8,
    0xf3b8ddab7ece5a2a,
    0x16a8ca3ac61577f7,
    0xc26a2ff874fd029b,
    0x3636b76660701c6e,
    0x051ba4ab241b6160,
]);
pub(crate) const NEG_OMEGA_2: Fq = Fq([
    0x890dc9e4867545c3,
    0x2af322533285a5d5,
    0x50880866309b7e2c,
    0xa20d1b8c7e881024,
    0x14e4f04fe2db9068,
    0x14e56d3f1564853a,
]);
pub(crate) const NEG_OMEGA: Fq = Fq([
    0xecfb361b798dba3a,
    0xc100ddb891865a2c,
    0x0ec08ff1232bda8e,
    0xd5c13cc6f1ca4721,
    0x47222a47bf7b5c04,
    0x0110f184e51c5f59,
]);

pub(crate) const fn real(c: Fq) -> Fq2 {
    Fq2::new(c, Fq::zero())
}

pub(crate) const fn imag(c: Fq) -> Fq2 {
    Fq2::new(Fq::zero(), c)
}

/// `(u + 1)^((p^i - 1) / 3)` for `i = 0..6`
pub const FROBENIUS_COEFF_FQ6_C1: [Fq2; 6] = [
    real(ONE),
    imag(OMEGA),
    real(OMEGA_2),
    imag(ONE),
    real(OMEGA),
    imag(OMEGA_2),
];

/// `(u + 1)^((2p^i - 2) / 3)` for `i = 0..6`
pub const FROBENIUS_COEFF_FQ6_C2: [Fq2; 6] = [
    real(ONE),
    real(NEG_OMEGA_2),
    real(OMEGA),
    real(NEG_ONE),
    real(OMEGA_2),
    real(NEG_OMEGA),
];

#[cfg(test)]
mod test {
    use super::*;
    use crate::bls12_381::fq::MODULUS;
    use crate::tests::field::{random_field_tests_n, random_frobenius_tests};
    use crate::tests::SEED;
    use ff::Field;
    use rand_core::SeedableRng;
    use rand_xorshift::XorShiftRng;

    #[test]
    fn test_field() {
        random_field_tests_n::<Fq6>(1000);
    }

    #[test]
    fn test_frobenius() {
        random_frobenius_tests::<Fq6, _>(MODULUS.0, 5);
    }

    #[test]
    fn test_frobenius_coefficients() {
        // OMEGA is a primitive third root of unity.
        assert_eq!(NEG_ONE, -ONE);
        assert_eq!(NEG_OMEGA, -OMEGA);
        assert_eq!(NEG_OMEGA_2, -OMEGA_2);
        assert_eq!(OMEGA.square(), OMEGA_2);
        assert_eq!(OMEGA * OMEGA_2, ONE);
        assert_ne!(OMEGA, ONE);
        assert_eq!(NEG_OMEGA.square(), OMEGA_2);

        let xi = Fq2::NON_RESIDUE;
        let mut exp = MODULUS.0;
        exp[0] -= 1;
        // (p - 1) / 3 is exact; check the first coefficient against the
        // defining power via xi^(p - 1) = (xi^((p - 1) / 3))^3.
        let c1 = FROBENIUS_COEFF_FQ6_C1[1];
        assert_eq!(c1.square() * c1, xi.pow_vartime(exp));
        assert_eq!(FROBENIUS_COEFF_FQ6_C2[1], c1.square());
    }

    #[test]
    fn test_fq6_mul_nonresidue() {
        let mut rng = XorShiftRng::from_seed(SEED);
        for _ in 0..100 {
            let e = Fq6::random(&mut rng);
            assert_eq!(e.mul_by_nonresidue(), e * Fq6::NON_RESIDUE);
        }
    }

    #[test]
    fn test_fq6_sparse_mul() {
        let mut rng = XorShiftRng::from_seed(SEED);
        for _ in 0..100 {
            let a = Fq6::random(&mut rng);
            let c0 = Fq2::random(&mut rng);
            let c1 = Fq2::random(&mut rng);

            let b = Fq6::new(Fq2::zero(), c1, Fq2::zero());
            assert_eq!(Fq6::mul_by_1(&a, &c1), a * b);

            let b = Fq6::new(c0, c1, Fq2::zero());
            assert_eq!(Fq6::mul_by_01(&a, &c0, &c1), a * b);
        }
    }

    #[test]
    fn test_fq6_one() {
        assert!(bool::from(Fq6::one().is_one()));
        assert!(!bool::from(Fq6::NON_RESIDUE.is_one()));
        assert_eq!(Fq6::one().invert().unwrap(), Fq6::one());
        assert!(bool::from(Fq6::zero().invert().is_none()));
    }

    #[test]
    fn test_fq6_bytes() {
        let mut rng = XorShiftRng::from_seed(SEED);
        let a = Fq6::random(&mut rng);
        let bytes = a.to_bytes();
        assert_eq!(&bytes[..96], &a.c2.to_bytes()[..]);
        assert_eq!(&bytes[192..], &a.c0.to_bytes()[..]);
        assert_eq!(Fq6::from_bytes(&bytes).unwrap(), a);
        assert!(matches!(
            Fq6::from_bytes(&bytes[1..]),
            Err(Error::InvalidLength { .. })
        ));
    }
}
