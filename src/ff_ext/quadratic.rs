//! Degree-two extensions `F[X] / (X^2 - F::NON_RESIDUE)`.

use ff::Field;
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::ExtField;

#[cfg(feature = "derive_serde")]
use serde::{Deserialize, Serialize};

/// `c0 + c1 X`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "derive_serde", derive(Serialize, Deserialize))]
pub struct QuadExtField<F> {
    pub(crate) c0: F,
    pub(crate) c1: F,
}

impl<F: Field> QuadExtField<F> {
    pub const fn new(c0: F, c1: F) -> Self {
        Self { c0, c1 }
    }

    pub const fn zero() -> Self {
        Self::new(F::ZERO, F::ZERO)
    }

    pub const fn one() -> Self {
        Self::new(F::ONE, F::ZERO)
    }

    pub fn c0(&self) -> &F {
        &self.c0
    }

    pub fn c1(&self) -> &F {
        &self.c1
    }

    pub fn is_one(&self) -> Choice {
        self.ct_eq(&Self::one())
    }

    #[inline]
    fn map(&self, f: impl Fn(&F) -> F) -> Self {
        Self::new(f(&self.c0), f(&self.c1))
    }

    #[inline]
    fn zip(&self, rhs: &Self, f: impl Fn(&F, &F) -> F) -> Self {
        Self::new(f(&self.c0, &rhs.c0), f(&self.c1, &rhs.c1))
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

    /// Scales both coefficients by an element of the base field.
    pub fn scale(&self, k: &F) -> Self {
        self.map(|a| *a * k)
    }

    /// `c0 - c1 X`, the image under the nontrivial automorphism over `F`.
    pub fn conjugate(&mut self) {
        self.c1 = -self.c1;
    }
}

impl<F: ExtField> QuadExtField<F> {
    /// Karatsuba: three base multiplications.
    pub fn mul(&self, rhs: &Self) -> Self {
        let lo = self.c0 * rhs.c0;
        let hi = self.c1 * rhs.c1;
        let mid = (self.c0 + self.c1) * (rhs.c0 + rhs.c1);
        Self::new(lo + hi.mul_by_nonresidue(), mid - lo - hi)
    }

    /// `(a + bX)^2 = (a + b)(a + bβ) - ab - abβ + 2abX`
    pub fn square(&self) -> Self {
        let ab = self.c0 * self.c1;
        let t = (self.c0 + self.c1) * (self.c0 + self.c1.mul_by_nonresidue());
        Self::new(t - ab - ab.mul_by_nonresidue(), ab.double())
    }

    pub fn square_assign(&mut self) {
        *self = self.square();
    }

    /// `N(a + bX) = a^2 - b^2 β`, an element of the base field.
    pub fn norm(&self) -> F {
        self.c0.square() - self.c1.square().mul_by_nonresidue()
    }
}

// Operators come from the per-level macros, reached through `Self: ExtField`.
impl<F: ExtField> Field for QuadExtField<F>
where
    Self: ExtField,
{
    const ZERO: Self = Self::zero();
    const ONE: Self = Self::one();

    fn random(mut rng: impl RngCore) -> Self {
        let c0 = F::random(&mut rng);
        Self::new(c0, F::random(&mut rng))
    }

    fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero()
    }

    fn square(&self) -> Self {
        QuadExtField::square(self)
    }

    fn double(&self) -> Self {
        QuadExtField::double(self)
    }

    /// Square root through the norm: for `a + bX` with `b != 0` the root is
    /// `x + yX` with `x^2 = (a ± sqrt(N)) / 2` and `y = b / 2x`. Needs square
    /// roots in the base field.
    fn sqrt(&self) -> CtOption<Self> {
        let none = CtOption::new(Self::ZERO, Choice::from(0));
        let half = F::ONE.double().invert().unwrap_or(F::ZERO);

        if bool::from(self.c1.is_zero()) {
            // Either a is a square in F, or a / β is.
            let direct = self.c0.sqrt();
            if bool::from(direct.is_some()) {
                return direct.map(|x| Self::new(x, F::ZERO));
            }
            let beta_inv = F::NON_RESIDUE.invert().unwrap_or(F::ZERO);
            return (self.c0 * beta_inv).sqrt().map(|y| Self::new(F::ZERO, y));
        }

        let s = self.norm().sqrt();
        if bool::from(s.is_none()) {
            return none;
        }
        let s = s.unwrap_or(F::ZERO);

        let mut x = ((self.c0 + s) * half).sqrt();
        if bool::from(x.is_none()) {
            x = ((self.c0 - s) * half).sqrt();
        }
        if bool::from(x.is_none()) {
            return none;
        }
        let x = x.unwrap_or(F::ZERO);

        match Option::<F>::from(x.double().invert()) {
            Some(inv) => {
                let root = Self::new(x, self.c1 * inv);
                CtOption::new(root, root.square().ct_eq(self))
            }
            None => none,
        }
    }

    fn sqrt_ratio(num: &Self, div: &Self) -> (Choice, Self) {
        ff::helpers::sqrt_ratio_generic(num, div)
    }

    /// `(a + bX)^-1 = (a - bX) / N(a + bX)`
    fn invert(&self) -> CtOption<Self> {
        self.norm().invert().map(|n| {
            let mut conj = *self;
            conj.conjugate();
            conj.scale(&n)
        })
    }
}

impl<F: ConditionallySelectable> ConditionallySelectable for QuadExtField<F> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        QuadExtField {
            c0: F::conditional_select(&a.c0, &b.c0, choice),
            c1: F::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl<F: ConstantTimeEq> ConstantTimeEq for QuadExtField<F> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}
