//! Degree-three extensions `F[Y] / (Y^3 - F::NON_RESIDUE)`.

use ff::Field;
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::ExtField;

#[cfg(feature = "derive_serde")]
use serde::{Deserialize, Serialize};

/// `c0 + c1 Y + c2 Y^2`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "derive_serde", derive(Serialize, Deserialize))]
pub struct CubicExtField<F> {
    pub(crate) c0: F,
    pub(crate) c1: F,
    pub(crate) c2: F,
}

impl<F: Field> CubicExtField<F> {
    pub const fn new(c0: F, c1: F, c2: F) -> Self {
        Self { c0, c1, c2 }
    }

    pub const fn zero() -> Self {
        Self::new(F::ZERO, F::ZERO, F::ZERO)
    }

    pub const fn one() -> Self {
        Self::new(F::ONE, F::ZERO, F::ZERO)
    }

    pub fn c0(&self) -> &F {
        &self.c0
    }

    pub fn c1(&self) -> &F {
        &self.c1
    }

    pub fn c2(&self) -> &F {
        &self.c2
    }

    pub fn is_one(&self) -> Choice {
        self.ct_eq(&Self::one())
    }

    #[inline]
    fn map(&self, f: impl Fn(&F) -> F) -> Self {
        Self::new(f(&self.c0), f(&self.c1), f(&self.c2))
    }

    #[inline]
    fn zip(&self, rhs: &Self, f: impl Fn(&F, &F) -> F) -> Self {
        Self::new(
            f(&self.c0, &rhs.c0),
            f(&self.c1, &rhs.c1),
            f(&self.c2, &rhs.c2),
        )
    }

    pub fn add(&self, rhs: &Self) -> Self {
        self.zip(rhs, |a, b| *a + b)
    }

    pub fn sub(&self, rhs: &Self) -> Self {
        self.zip(rhs, |a, b| *a - b)
    }

    pub fn neg(&self) -> Self {
        self.map(|a| -*a)
    }

    pub fn double(&self) -> Self {
        self.map(F::double)
    }
}

impl<F: ExtField> CubicExtField<F> {
    /// Karatsuba over three coefficients: six base multiplications.
    pub fn mul(&self, rhs: &Self) -> Self {
        let (a, b) = (self, rhs);
        let v0 = a.c0 * b.c0;
        let v1 = a.c1 * b.c1;
        let v2 = a.c2 * b.c2;

        let y0 = (a.c1 + a.c2) * (b.c1 + b.c2) - v1 - v2;
        let y1 = (a.c0 + a.c1) * (b.c0 + b.c1) - v0 - v1;
        let y2 = (a.c0 + a.c2) * (b.c0 + b.c2) - v0 - v2;

        Self::new(
            v0 + y0.mul_by_nonresidue(),
            y1 + v2.mul_by_nonresidue(),
            y2 + v1,
        )
    }

    /// Two squarings, two products and one full square of the coefficient
    /// sum; the `Y^2` term is what remains of that square.
    pub fn square(&self) -> Self {
        let s0 = self.c0.square();
        let s4 = self.c2.square();
        let s1 = (self.c0 * self.c1).double();
        let s3 = (self.c1 * self.c2).double();
        let sum = (self.c0 + self.c1 + self.c2).square();

        Self::new(
            s0 + s3.mul_by_nonresidue(),
            s1 + s4.mul_by_nonresidue(),
            sum - s0 - s1 - s3 - s4,
        )
    }

    pub fn square_assign(&mut self) {
        *self = self.square();
    }
}

// Operators come from the per-level macros, reached through `Self: ExtField`.
impl<F: ExtField> Field for CubicExtField<F>
where
    Self: ExtField,
{
    const ZERO: Self = Self::zero();
    const ONE: Self = Self::one();

    fn random(mut rng: impl RngCore) -> Self {
        let c0 = F::random(&mut rng);
        let c1 = F::random(&mut rng);
        Self::new(c0, c1, F::random(&mut rng))
    }

    fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero() & self.c2.is_zero()
    }

    fn square(&self) -> Self {
        CubicExtField::square(self)
    }

    fn double(&self) -> Self {
        CubicExtField::double(self)
    }

    // No level built on a cubic extension takes square roots.
    fn sqrt(&self) -> CtOption<Self> {
        unimplemented!()
    }

    fn sqrt_ratio(_: &Self, _: &Self) -> (Choice, Self) {
        unimplemented!()
    }

    /// Adjugate over the norm: `t` below is the product of `self` with its
    /// two conjugates, an element of `F`.
    fn invert(&self) -> CtOption<Self> {
        let (a0, a1, a2) = (self.c0, self.c1, self.c2);
        let b0 = a0.square() - (a1 * a2).mul_by_nonresidue();
        let b1 = a2.square().mul_by_nonresidue() - a0 * a1;
        let b2 = a1.square() - a0 * a2;

        let t = a0 * b0 + (a2 * b1 + a1 * b2).mul_by_nonresidue();
        t.invert()
            .map(|t| Self::new(b0 * t, b1 * t, b2 * t))
    }
}

impl<F: ConditionallySelectable> ConditionallySelectable for CubicExtField<F> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        CubicExtField {
            c0: F::conditional_select(&a.c0, &b.c0, choice),
            c1: F::conditional_select(&a.c1, &b.c1, choice),
            c2: F::conditional_select(&a.c2, &b.c2, choice),
        }
    }
}

impl<F: ConstantTimeEq> ConstantTimeEq for CubicExtField<F> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1) & self.c2.ct_eq(&other.c2)
    }
}
