use super::fq::Fq;
use super::fq2::Fq2;
use super::fq6::{real, Fq6, NEG_OMEGA, NEG_OMEGA_2, NEG_ONE, OMEGA, OMEGA_2, ONE};
use crate::error::{Error, Result};
use crate::ff_ext::{quadratic::QuadExtField, ExtField};

/// `Fq12 = Fq6[w] / (w^2 - v)`
pub type Fq12 = QuadExtField<Fq6>;

crate::impl_binops_additive!(Fq12, Fq12);
crate::impl_binops_multiplicative!(Fq12, Fq12);
crate::impl_binops_calls!(Fq12);
crate::impl_sum_prod!(Fq12);

impl ExtField for Fq12 {
    // w
    const NON_RESIDUE: Self = Fq12::new(Fq6::zero(), Fq6::one());

    fn mul_by_nonresidue(&self) -> Self {
        Fq12::new(self.c1.mul_by_nonresidue(), self.c0)
    }

    fn frobenius_map(&mut self, power: usize) {
        self.c0.frobenius_map(power);
        self.c1.frobenius_map(power);

        let coeff = &FROBENIUS_COEFF_FQ12_C1[power % 12];
        self.c1.c0 *= coeff;
        self.c1.c1 *= coeff;
        self.c1.c2 *= coeff;
    }
}

impl Fq12 {
    pub const SIZE: usize = 2 * Fq6::SIZE;

    /// Multiplies by a line value `(c0 + c1 v) + (c4 v) w`, the shape the
    /// M-twist lines take once evaluated at a G1 point.
    pub fn mul_by_014(&mut self, c0: &Fq2, c1: &Fq2, c4: &Fq2) {
        let a = self.c0.mul_by_01(c0, c1);
        let b = self.c1.mul_by_1(c4);
        let cross = (self.c0 + self.c1).mul_by_01(c0, &(c1 + c4));
        self.c1 = cross - a - b;
        self.c0 = b.mul_by_nonresidue() + a;
    }

    /// Squaring for elements of the cyclotomic subgroup, the image of the
    /// easy part of the final exponentiation. Meaningless anywhere else.
    ///
    /// Granger-Scott, https://eprint.iacr.org/2009/565.pdf
    pub fn cyclotomic_square(&mut self) {
        // (a0 + a1 s)^2 in Fq4 = Fq2[s] / (s^2 - (u + 1))
        fn fq4_square(a0: &Fq2, a1: &Fq2) -> (Fq2, Fq2) {
            let t0 = a0.square();
            let t1 = a1.square();
            let c0 = t1.mul_by_nonresidue() + t0;
            let c1 = (a0 + a1).square() - t0 - t1;
            (c0, c1)
        }

        // 3t - 2a and 3t + 2a
        let sub3 = |t: Fq2, a: Fq2| (t - a).double() + t;
        let add3 = |t: Fq2, a: Fq2| (t + a).double() + t;

        let (t0, t1) = fq4_square(&self.c0.c0, &self.c1.c1);
        let (t2, t3) = fq4_square(&self.c1.c0, &self.c0.c2);
        let (t4, t5) = fq4_square(&self.c0.c1, &self.c1.c2);

        self.c0.c0 = sub3(t0, self.c0.c0);
        self.c1.c1 = add3(t1, self.c1.c1);
        self.c0.c1 = sub3(t2, self.c0.c1);
        self.c1.c2 = add3(t3, self.c1.c2);
        self.c1.c0 = add3(t5.mul_by_nonresidue(), self.c1.c0);
        self.c0.c2 = sub3(t4, self.c0.c2);
    }

    /// Exponentiation in the cyclotomic subgroup, most significant bit first.
    /// The exponent is little-endian `u64` limbs.
    pub fn cyclotomic_exp<S: AsRef<[u64]>>(&self, exp: S) -> Fq12 {
        let mut res = Fq12::one();
        let mut started = false;
        for limb in exp.as_ref().iter().rev() {
            for i in (0..64).rev() {
                if started {
                    res.cyclotomic_square();
                }
                if (limb >> i) & 1 == 1 {
                    started = true;
                    res *= self;
                }
            }
        }
        res
    }

    /// Big-endian encoding, `c1 || c0`.
    pub fn to_bytes(&self) -> [u8; 576] {
        let mut res = [0u8; 576];
        res[..Fq6::SIZE].copy_from_slice(&self.c1.to_bytes());
        res[Fq6::SIZE..].copy_from_slice(&self.c0.to_bytes());
        res
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Fq12> {
        if bytes.len() != Self::SIZE {
            return Err(Error::InvalidLength {
                expected: Self::SIZE,
                actual: bytes.len(),
            });
        }
        let c1 = Fq6::from_bytes(&bytes[..Fq6::SIZE])?;
        let c0 = Fq6::from_bytes(&bytes[Fq6::SIZE..])?;
        Ok(Fq12::new(c0, c1))
    }
}

// (u + 1)^((p - 1) / 6) and its odd powers. Entries 7, 9 and 11 of the
// table swap the two coefficients.
const GAMMA_1: (Fq, Fq) = (
    Fq([
        0x07089552b319d465,
        0xc6695f92b50a8313,
        0x97e83cccd117228f,
        0xa35baecab2dc29ee,
        0x1ce393ea5daace4d,
        0x08f2220fb0fb66eb,
    ]),
    Fq([
        0xb2f66aad4ce5d646,
        0x5842a06bfc497cec,
        0xcf4895d42599d394,
        0xc11b9cba40a8e8d0,
        0x2e3813cbe5a0de89,
        0x110eefda88847faf,
    ]),
);
const GAMMA_3: (Fq, Fq) = (
    Fq([
        0x3e2f585da55c9ad1,
        0x4294213d86c18183,
        0x382844c88b623732,
        0x92ad2afd19103e18,
        0x1d794e4fac7cf0b9,
        0x0bd592fc7d825ec8,
    ]),
    Fq([
        0x7bcfa7a25aa30fda,
        0xdc17dec12a927e7c,
        0x2f088dd86b4ebef1,
        0xd1ca2087da74d4a7,
        0x2da2596696cebc1d,
        0x0e2b7eedbbfd87d2,
    ]),
);
const GAMMA_5: (Fq, Fq) = (
    Fq([
        0x3726c30af242c66c,
        0x7c2ac1aad1b6fe70,
        0xa04007fbba4b14a2,
        0xef517c3266341429,
        0x0095ba654ed2226b,
        0x02e370eccc86f7dd,
    ]),
    Fq([
        0x82d83cf50dbce43f,
        0xa2813e53df9d018f,
        0xc6f0caa53c65e181,
        0x7525cf528d50fe95,
        0x4a85ed50f4798a6b,
        0x171da0fd6cf8eebd,
    ]),
);

/// `(u + 1)^((p^i - 1) / 6)` for `i = 0..12`
pub const FROBENIUS_COEFF_FQ12_C1: [Fq2; 12] = [
    real(ONE),
    Fq2::new(GAMMA_1.0, GAMMA_1.1),
    real(NEG_OMEGA),
    Fq2::new(GAMMA_3.0, GAMMA_3.1),
    real(OMEGA_2),
    Fq2::new(GAMMA_5.0, GAMMA_5.1),
    real(NEG_ONE),
    Fq2::new(GAMMA_1.1, GAMMA_1.0),
    real(OMEGA),
    Fq2::new(GAMMA_3.1, GAMMA_3.0),
    real(NEG_OMEGA_2),
    Fq2::new(GAMMA_5.1, GAMMA_5.0),
];

#[cfg(test)]
mod test {
    use super::*;
    use crate::bls12_381::fq::MODULUS;
    use crate::tests::field::{random_field_tests_n, random_frobenius_tests};
    use crate::tests::SEED;
    use ark_std::{end_timer, start_timer};
    use ff::Field;
    use rand_core::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn rng() -> XorShiftRng {
        XorShiftRng::from_seed(SEED)
    }

    /// Maps a random element into the cyclotomic subgroup.
    fn random_cyclotomic(rng: &mut XorShiftRng) -> Fq12 {
        let f = Fq12::random(rng);
        let mut t = f;
        t.conjugate();
        let mut t = t * f.invert().unwrap();
        let mut t2 = t;
        t2.frobenius_map(2);
        t *= t2;
        t
    }

    #[test]
    fn test_field() {
        random_field_tests_n::<Fq12>(100);
    }

    #[test]
    fn test_frobenius() {
        random_frobenius_tests::<Fq12, _>(MODULUS.0, 2);
    }

    #[test]
    fn test_frobenius_conjugation() {
        // Frobenius at power 6 is the conjugation of Fq12 over Fq6.
        let mut rng = rng();
        for _ in 0..10 {
            let a = Fq12::random(&mut rng);
            let mut b = a;
            b.frobenius_map(6);
            let mut c = a;
            c.conjugate();
            assert_eq!(b, c);
        }
    }

    #[test]
    fn test_fq12_mul_nonresidue() {
        let mut rng = rng();
        for _ in 0..10 {
            let e = Fq12::random(&mut rng);
            assert_eq!(e.mul_by_nonresidue(), e * Fq12::NON_RESIDUE);
        }
    }

    #[test]
    fn test_mul_by_014() {
        let mut rng = rng();
        for _ in 0..100 {
            let c0 = Fq2::random(&mut rng);
            let c1 = Fq2::random(&mut rng);
            let c4 = Fq2::random(&mut rng);
            let a = Fq12::random(&mut rng);

            let mut b = a;
            Fq12::mul_by_014(&mut b, &c0, &c1, &c4);

            let sparse = Fq12::new(
                Fq6::new(c0, c1, Fq2::zero()),
                Fq6::new(Fq2::zero(), c4, Fq2::zero()),
            );
            assert_eq!(b, a * sparse);
        }
    }

    #[test]
    fn test_cyclotomic_square() {
        let mut rng = rng();
        for _ in 0..20 {
            let a = random_cyclotomic(&mut rng);
            let mut b = a;
            b.cyclotomic_square();
            assert_eq!(b, a.square());
        }
    }

    #[test]
    fn test_cyclotomic_exp() {
        let mut rng = rng();
        let a = random_cyclotomic(&mut rng);

        let exp = [0xd201000000010000u64];
        let timer = start_timer!(|| "cyclotomic exp");
        let b = a.cyclotomic_exp(exp);
        end_timer!(timer);
        assert_eq!(b, a.pow_vartime(exp));

        assert_eq!(a.cyclotomic_exp([0u64]), Fq12::one());
        assert_eq!(a.cyclotomic_exp([1u64, 0]), a);

        // Conjugation inverts cyclotomic elements.
        let mut inv = a;
        inv.conjugate();
        assert_eq!(inv * a, Fq12::one());
    }

    #[test]
    fn test_fq12_bytes() {
        let mut rng = rng();
        let a = Fq12::random(&mut rng);
        let bytes = a.to_bytes();
        assert_eq!(&bytes[..288], &a.c1.to_bytes()[..]);
        assert_eq!(Fq12::from_bytes(&bytes).unwrap(), a);
        assert!(matches!(
            Fq12::from_bytes(&[0u8; 575]),
            Err(Error::InvalidLength {
                expected: 576,
                actual: 575
            })
        ));
        assert!(bool::from(Fq12::one().is_one()));
        assert!(!bool::from(a.is_one()));
    }
}
