use core::fmt;
use core::str::FromStr;

use ff::{Field, PrimeField};
use num_bigint::BigUint;
use num_traits::Num;
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use crate::arithmetic::{add_assign, adc, gt, gte, is_even, is_zero, mac, sbb, shl1, shr1, sub_assign};
use crate::error::{Error, Result};
use crate::ff_ext::ExtField;

#[cfg(feature = "derive_serde")]
use serde::{Deserialize, Serialize};

/// An element of the BLS12-381 base field.
///
/// The internal representation is six 64-bit limbs in little-endian order,
/// always in Montgomery form: `Fq(a) = aR mod p` with `R = 2^384`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "derive_serde", derive(Serialize, Deserialize))]
pub struct Fq(pub(crate) [u64; 6]);

/// Constant representing the modulus
/// p = 0x1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab
pub const MODULUS: Fq = Fq([
    0xb9feffffffffaaab,
    0x1eabfffeb153ffff,
    0x6730d2a0f6b0f624,
    0x64774b84f38512bf,
    0x4b1ba7b6434bacd7,
    0x1a0111ea397fe69a,
]);

const MODULUS_STR: &str = "0x1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab";

/// INV = -(p^{-1} mod 2^64) mod 2^64
const INV: u64 = 0x89f3fffcfffcfffd;

/// R = 2^384 mod p
const R: Fq = Fq([
    0x760900000002fffd,
    0xebf4000bc40c0002,
    0x5f48985753c758ba,
    0x77ce585370525745,
    0x5c071a97a256ec6d,
    0x15f65ec3fa80e493,
]);

/// R^2 = 2^768 mod p
const R2: Fq = Fq([
    0xf4df1f341c341746,
    0x0a76e6a609d104f1,
    0x8de5476c4c95b6d5,
    0x67eb88a9939d83c0,
    0x9a793e85b519952d,
    0x11988fe592cae3aa,
]);

/// R^3 = 2^1152 mod p
#[cfg(test)]
const R3: Fq = Fq([
    0xed48ac6bd94ca1e0,
    0x315f831e03a7adf8,
    0x9a53352a615e29dd,
    0x34c04e5e921e1761,
    0x2512d43565724728,
    0x0aa6346091755d4d,
]);

/// `2` is a generator of the multiplicative group.
const GENERATOR: Fq = Fq([
    0x321300000006554f,
    0xb93c0018d6c40005,
    0x57605e0db0ddbb51,
    0x8b256521ed1f9bcb,
    0x6cf28d7901622c03,
    0x11ebab9dbb81e28c,
]);

/// 2^-1 mod p
const TWO_INV: Fq = Fq([
    0x1804000000015554,
    0x855000053ab00001,
    0x633cb57c253c276f,
    0x6e22d1ec31ebb502,
    0xd3916126f2d14ca2,
    0x17fbb8571a006596,
]);

/// p - 1 = 2 * t, so the 2-adic root of unity is -1.
const NEGATIVE_ONE: Fq = Fq([
    0x43f5fffffffcaaae,
    0x32b7fff2ed47fffd,
    0x07e83a49a2e99d69,
    0xeca8f3318332bb7a,
    0xef148d1ea0f4c069,
    0x040ab3263eff0206,
]);

/// GENERATOR^(2^S) = 4
const DELTA: Fq = Fq([
    0xaa270000000cfff3,
    0x53cc0032fc34000a,
    0x478fe97a6b0a807f,
    0xb1d37ebee6ba24d7,
    0x8ec9733bbf78ab2f,
    0x09d645513d83de7e,
]);

/// (p + 1) / 4, the square root exponent for p = 3 mod 4.
const P_PLUS_1_OVER_4: [u64; 6] = [
    0xee7fbfffffffeaab,
    0x07aaffffac54ffff,
    0xd9cc34a83dac3d89,
    0xd91dd2e13ce144af,
    0x92c6e9ed90d2eb35,
    0x0680447a8e5ff9a6,
];

const NUM_BITS: u32 = 381;

/// Iteration budget of the binary inverse: twice the limb width in bits.
const INVERSE_ITERATIONS: usize = 768;

/// Bounds on the phase-one step count of any invertible input.
/// Depends on `NUM_BITS` and the 384-bit limb width; recompute both for a
/// different modulus.
const INVERSE_MIN_STEPS: usize = NUM_BITS as usize;
const INVERSE_MAX_STEPS: usize = NUM_BITS as usize + 384;

impl fmt::Debug for Fq {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_bytes()))
    }
}

impl fmt::Display for Fq {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl fmt::LowerHex for Fq {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            write!(f, "0x")?;
        }
        write!(f, "{}", hex::encode(self.to_bytes()))
    }
}

impl Default for Fq {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl ConstantTimeEq for Fq {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(Choice::from(1), |acc, (a, b)| acc & a.ct_eq(b))
    }
}

impl ConditionallySelectable for Fq {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut limbs = [0u64; 6];
        for (i, limb) in limbs.iter_mut().enumerate() {
            *limb = u64::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Fq(limbs)
    }
}

impl From<u64> for Fq {
    fn from(val: u64) -> Fq {
        Fq::from_raw([val, 0, 0, 0, 0, 0])
    }
}

impl FromStr for Fq {
    type Err = Error;

    /// Parses a hexadecimal integer, with or without a `0x` prefix.
    fn from_str(s: &str) -> Result<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let value = BigUint::from_str_radix(digits, 16)
            .map_err(|_| Error::InvalidString(s.to_string()))?;
        Fq::from_biguint(&value)
    }
}

crate::impl_binops_calls!(Fq);
crate::impl_binops_additive!(Fq, Fq);
crate::impl_binops_multiplicative!(Fq, Fq);
crate::impl_sum_prod!(Fq);

impl Fq {
    /// Size of the canonical big-endian encoding in bytes.
    pub const SIZE: usize = 48;

    /// Returns zero, the additive identity.
    #[inline]
    pub const fn zero() -> Fq {
        Fq([0, 0, 0, 0, 0, 0])
    }

    /// Returns one, the multiplicative identity.
    #[inline]
    pub const fn one() -> Fq {
        R
    }

    pub fn is_one(&self) -> Choice {
        self.ct_eq(&R)
    }

    /// Converts canonical little-endian limbs into Montgomery form.
    /// The input is expected to be below the modulus.
    pub const fn from_raw(val: [u64; 6]) -> Self {
        (&Fq(val)).mul(&R2)
    }

    /// Converts out of Montgomery form, returning the canonical
    /// little-endian limbs.
    pub const fn to_canonical_limbs(&self) -> [u64; 6] {
        let s = &self.0;
        Fq::montgomery_reduce(&[s[0], s[1], s[2], s[3], s[4], s[5], 0, 0, 0, 0, 0, 0]).0
    }

    /// Decodes a 48-byte big-endian integer, rejecting values that are not
    /// below the modulus.
    pub fn from_bytes(bytes: &[u8]) -> Result<Fq> {
        let bytes: [u8; 48] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: Self::SIZE,
            actual: bytes.len(),
        })?;
        Option::from(Fq::from_repr(FqRepr(bytes))).ok_or(Error::NonCanonical)
    }

    /// Encodes the canonical value as 48 big-endian bytes.
    pub fn to_bytes(&self) -> [u8; 48] {
        let limbs = self.to_canonical_limbs();
        let mut res = [0u8; 48];
        for (chunk, limb) in res.rchunks_exact_mut(8).zip(limbs.iter()) {
            chunk.copy_from_slice(&limb.to_be_bytes());
        }
        res
    }

    pub fn from_biguint(value: &BigUint) -> Result<Fq> {
        let be = value.to_bytes_be();
        if be.len() > Self::SIZE {
            return Err(Error::NonCanonical);
        }
        let mut bytes = [0u8; 48];
        bytes[Self::SIZE - be.len()..].copy_from_slice(&be);
        Fq::from_bytes(&bytes)
    }

    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.to_bytes())
    }

    /// Samples a uniform element by rejection, propagating entropy failures.
    pub fn try_random(mut rng: impl RngCore) -> Result<Fq> {
        loop {
            let mut bytes = [0u8; 48];
            rng.try_fill_bytes(&mut bytes)?;
            if let Some(fe) = Fq::from_candidate(bytes) {
                return Ok(fe);
            }
        }
    }

    /// Masks a random buffer to 381 bits and accepts it if canonical.
    fn from_candidate(mut bytes: [u8; 48]) -> Option<Fq> {
        bytes[0] &= 0x1f;
        Option::from(Fq::from_repr(FqRepr(bytes)))
    }

    /// Multiplicative inverse by a bounded binary extended Euclid.
    ///
    /// Returns zero when no inverse exists, including for zero itself.
    pub fn inverse(&self) -> Fq {
        let (mut r, overflow, k) = match self.almost_inverse() {
            Some(state) => state,
            None => return Fq::zero(),
        };
        if !(INVERSE_MIN_STEPS..=INVERSE_MAX_STEPS).contains(&k) {
            return Fq::zero();
        }

        if overflow || gte(&r, &MODULUS.0) {
            sub_assign(&mut r, &MODULUS.0);
        }
        let mut u = MODULUS.0;
        sub_assign(&mut u, &r);

        // Each halving step left a factor of two behind.
        let mut inv = Fq(u);
        for _ in k..INVERSE_ITERATIONS {
            inv = inv.double();
        }
        inv
    }

    /// First phase of `inverse`: runs the halving loop on `(p, self)` until
    /// `v` vanishes. Returns the accumulator `r`, whether it overflowed, and
    /// the step count, or `None` if the budget ran out.
    pub(crate) fn almost_inverse(&self) -> Option<([u64; 6], bool, usize)> {
        let mut u = MODULUS.0;
        let mut v = self.0;
        let mut s = [1, 0, 0, 0, 0, 0];
        let mut r = [0u64; 6];
        let mut overflow = false;

        for k in 0..INVERSE_ITERATIONS {
            if is_zero(&v) {
                return Some((r, overflow, k));
            }
            if is_even(&u) {
                shr1(&mut u);
                shl1(&mut s);
            } else if is_even(&v) {
                shr1(&mut v);
                overflow |= shl1(&mut r) != 0;
            } else if gt(&u, &v) {
                sub_assign(&mut u, &v);
                shr1(&mut u);
                add_assign(&mut r, &s);
                shl1(&mut s);
            } else {
                sub_assign(&mut v, &u);
                shr1(&mut v);
                add_assign(&mut s, &r);
                overflow |= shl1(&mut r) != 0;
            }
        }
        None
    }

    #[inline]
    pub const fn double(&self) -> Fq {
        self.add(self)
    }

    #[inline]
    pub const fn add(&self, rhs: &Fq) -> Fq {
        let mut d = [0u64; 6];
        let mut carry = 0;
        let mut i = 0;
        while i < 6 {
            (d[i], carry) = adc(self.0[i], rhs.0[i], carry);
            i += 1;
        }

        // p has three spare bits, so the sum fits and a single
        // subtraction reduces it.
        (&Fq(d)).sub(&MODULUS)
    }

    #[inline]
    pub const fn sub(&self, rhs: &Fq) -> Fq {
        let mut d = [0u64; 6];
        let mut borrow = 0;
        let mut i = 0;
        while i < 6 {
            (d[i], borrow) = sbb(self.0[i], rhs.0[i], borrow);
            i += 1;
        }

        // If underflow occurred on the final limb, borrow = 0xfff...fff,
        // otherwise borrow = 0x000...000. Thus, we use it as a mask to
        // conditionally add the modulus.
        let mut carry = 0;
        let mut i = 0;
        while i < 6 {
            (d[i], carry) = adc(d[i], MODULUS.0[i] & borrow, carry);
            i += 1;
        }
        Fq(d)
    }

    #[inline]
    pub const fn neg(&self) -> Fq {
        let mut d = [0u64; 6];
        let mut borrow = 0;
        let mut i = 0;
        while i < 6 {
            (d[i], borrow) = sbb(MODULUS.0[i], self.0[i], borrow);
            i += 1;
        }

        // Zero must map to zero, not to p.
        let s = &self.0;
        let mask = (((s[0] | s[1] | s[2] | s[3] | s[4] | s[5]) == 0) as u64).wrapping_sub(1);
        let mut i = 0;
        while i < 6 {
            d[i] &= mask;
            i += 1;
        }
        Fq(d)
    }

    #[inline]
    pub const fn mul(&self, rhs: &Fq) -> Fq {
        // Schoolbook multiplication
        let mut t = [0u64; 12];
        let mut i = 0;
        while i < 6 {
            let mut carry = 0;
            let mut j = 0;
            while j < 6 {
                (t[i + j], carry) = mac(t[i + j], self.0[i], rhs.0[j], carry);
                j += 1;
            }
            t[i + 6] = carry;
            i += 1;
        }

        Fq::montgomery_reduce(&t)
    }

    #[inline]
    pub const fn square(&self) -> Fq {
        let a = &self.0;
        let mut t = [0u64; 12];

        // Off-diagonal products
        let mut i = 0;
        while i < 5 {
            let mut carry = 0;
            let mut j = i + 1;
            while j < 6 {
                (t[i + j], carry) = mac(t[i + j], a[i], a[j], carry);
                j += 1;
            }
            t[i + 6] = carry;
            i += 1;
        }

        // Doubled
        let mut k = 11;
        while k > 0 {
            t[k] = (t[k] << 1) | (t[k - 1] >> 63);
            k -= 1;
        }
        t[0] <<= 1;

        // Plus the squares on the diagonal
        let mut carry = 0;
        let mut i = 0;
        while i < 6 {
            (t[2 * i], carry) = mac(t[2 * i], a[i], a[i], carry);
            (t[2 * i + 1], carry) = adc(t[2 * i + 1], 0, carry);
            i += 1;
        }

        Fq::montgomery_reduce(&t)
    }

    // Algorithm 14.32 in Handbook of Applied Cryptography
    // https://cacr.uwaterloo.ca/hac/about/chap14.pdf
    #[inline(always)]
    const fn montgomery_reduce(t: &[u64; 12]) -> Fq {
        let mut r = *t;
        let mut carry2 = 0;
        let mut i = 0;
        while i < 6 {
            let k = r[i].wrapping_mul(INV);
            let (_, mut carry) = mac(r[i], k, MODULUS.0[0], 0);
            let mut j = 1;
            while j < 6 {
                (r[i + j], carry) = mac(r[i + j], k, MODULUS.0[j], carry);
                j += 1;
            }
            (r[i + 6], carry2) = adc(r[i + 6], carry2, carry);
            i += 1;
        }

        // Result may be within MODULUS of the correct value
        (&Fq([r[6], r[7], r[8], r[9], r[10], r[11]])).sub(&MODULUS)
    }
}

impl Field for Fq {
    const ZERO: Self = Self::zero();
    const ONE: Self = Self::one();

    fn random(mut rng: impl RngCore) -> Self {
        loop {
            let mut bytes = [0u8; 48];
            rng.fill_bytes(&mut bytes);
            if let Some(fe) = Fq::from_candidate(bytes) {
                return fe;
            }
        }
    }

    fn double(&self) -> Self {
        self.double()
    }

    #[inline(always)]
    fn square(&self) -> Self {
        self.square()
    }

    /// Computes the square root of this element, if it exists.
    fn sqrt(&self) -> CtOption<Self> {
        // p = 3 mod 4, so a^((p+1)/4) is a root whenever one exists.
        let tmp = self.pow_vartime(P_PLUS_1_OVER_4);
        CtOption::new(tmp, tmp.square().ct_eq(self))
    }

    fn sqrt_ratio(num: &Self, div: &Self) -> (Choice, Self) {
        ff::helpers::sqrt_ratio_generic(num, div)
    }

    /// Computes the multiplicative inverse of this element,
    /// failing if the element is zero.
    fn invert(&self) -> CtOption<Self> {
        let tmp = self.inverse();
        CtOption::new(tmp, !tmp.is_zero())
    }
}

/// Big-endian canonical encoding of an `Fq` element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FqRepr(pub(crate) [u8; 48]);

impl Default for FqRepr {
    fn default() -> Self {
        FqRepr([0u8; 48])
    }
}

impl AsRef<[u8]> for FqRepr {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsMut<[u8]> for FqRepr {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl From<[u8; 48]> for FqRepr {
    fn from(bytes: [u8; 48]) -> Self {
        FqRepr(bytes)
    }
}

impl PrimeField for Fq {
    type Repr = FqRepr;

    const MODULUS: &'static str = MODULUS_STR;
    const NUM_BITS: u32 = NUM_BITS;
    const CAPACITY: u32 = NUM_BITS - 1;
    const TWO_INV: Self = TWO_INV;
    const MULTIPLICATIVE_GENERATOR: Self = GENERATOR;
    const S: u32 = 1;
    const ROOT_OF_UNITY: Self = NEGATIVE_ONE;
    const ROOT_OF_UNITY_INV: Self = NEGATIVE_ONE;
    const DELTA: Self = DELTA;

    fn from_repr(repr: FqRepr) -> CtOption<Self> {
        let mut tmp = Fq([0u64; 6]);
        for (limb, chunk) in tmp.0.iter_mut().zip(repr.0.rchunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            *limb = u64::from_be_bytes(buf);
        }

        // Try to subtract the modulus
        let borrow = tmp
            .0
            .iter()
            .zip(MODULUS.0.iter())
            .fold(0, |borrow, (a, m)| sbb(*a, *m, borrow).1);

        // If the element is smaller than MODULUS then the
        // subtraction will underflow, producing a borrow value
        // of 0xffff...ffff. Otherwise, it'll be zero.
        let is_some = (borrow as u8) & 1;

        // Convert to Montgomery form by computing
        // (a.R^0 * R^2) / R = a.R
        tmp *= &R2;

        CtOption::new(tmp, Choice::from(is_some))
    }

    fn to_repr(&self) -> FqRepr {
        FqRepr(self.to_bytes())
    }

    fn is_odd(&self) -> Choice {
        Choice::from(self.to_canonical_limbs()[0] as u8 & 1)
    }
}

#[cfg(all(feature = "bits", target_pointer_width = "64"))]
impl ff::PrimeFieldBits for Fq {
    type ReprBits = [u64; 6];

    fn to_le_bits(&self) -> ff::FieldBits<Self::ReprBits> {
        ff::FieldBits::new(self.to_canonical_limbs())
    }

    fn char_le_bits() -> ff::FieldBits<Self::ReprBits> {
        ff::FieldBits::new(MODULUS.0)
    }
}

impl ExtField for Fq {
    // u^2 = -1
    const NON_RESIDUE: Self = NEGATIVE_ONE;

    fn mul_by_nonresidue(&self) -> Self {
        self.neg()
    }

    fn frobenius_map(&mut self, _: usize) {}
}
