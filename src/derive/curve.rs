/// Generates a short Weierstrass group `y^2 = x^3 + b` in homogeneous
/// projective coordinates, together with its affine form.
///
/// The projective identity is any point with `Z = 0`; the affine identity
/// is encoded as `(0, 0)`, which is never on a curve with `b != 0`.
#[macro_export]
macro_rules! new_curve_impl {
    (($($privacy:tt)*),
    $name:ident,
    $name_affine:ident,
    $base:ident,
    $generator:expr,
    $constant_b:expr,
    $constant_3b:expr,
    $curve_id:literal,
    ) => {
        #[derive(Copy, Clone, Debug)]
        $($privacy)* struct $name {
            pub(crate) x: $base,
            pub(crate) y: $base,
            pub(crate) z: $base,
        }

        #[derive(Copy, Clone)]
        #[cfg_attr(feature = "derive_serde", derive(::serde::Serialize, ::serde::Deserialize))]
        $($privacy)* struct $name_affine {
            pub(crate) x: $base,
            pub(crate) y: $base,
        }

        impl $name {
            pub const CURVE_ID: &'static str = $curve_id;

            pub fn identity() -> Self {
                Self {
                    x: <$base as ::ff::Field>::ZERO,
                    y: <$base as ::ff::Field>::ONE,
                    z: <$base as ::ff::Field>::ZERO,
                }
            }

            pub fn generator() -> Self {
                $name_affine::generator().to_curve()
            }

            /// `generator` multiplied by a scalar drawn from `rng`.
            pub fn random(mut rng: impl ::rand_core::RngCore) -> Self {
                let scalar = [rng.next_u64(), rng.next_u64(), rng.next_u64(), rng.next_u64()];
                Self::generator().multiply(&scalar)
            }

            pub fn is_identity(&self) -> ::subtle::Choice {
                <$base as ::ff::Field>::is_zero(&self.z)
            }

            pub fn b() -> $base {
                $constant_b
            }

            #[inline]
            fn mul_by_3b(input: &$base) -> $base {
                *input * $constant_3b
            }

            pub fn is_on_curve(&self) -> ::subtle::Choice {
                // (Y/Z)^2 = (X/Z)^3 + b  <=>  Z Y^2 - X^3 = Z^3 b
                (self.z * self.y.square() - self.x.square() * self.x)
                    .ct_eq(&(self.z.square() * self.z * $constant_b))
                    | self.is_identity()
            }

            pub fn to_affine(&self) -> $name_affine {
                let zinv = <$base as ::ff::Field>::invert(&self.z)
                    .unwrap_or(<$base as ::ff::Field>::ZERO);
                let tmp = $name_affine {
                    x: self.x * zinv,
                    y: self.y * zinv,
                };
                $name_affine::conditional_select(&tmp, &$name_affine::identity(), self.is_identity())
            }

            /// Closed form of Algorithm 9, https://eprint.iacr.org/2015/1060.pdf
            /// with `a = 0`. Returns the identity when `self` is the identity.
            pub fn double(&self) -> Self {
                let yy = self.y.square();
                let yy8 = yy.double().double().double();
                let bzz = Self::mul_by_3b(&self.z.square());
                let e = yy - (bzz.double() + bzz);

                let tmp = Self {
                    x: (e * (self.x * self.y)).double(),
                    y: e * (yy + bzz) + yy8 * bzz,
                    z: yy8 * (self.y * self.z),
                };
                Self::conditional_select(&tmp, &Self::identity(), self.is_identity())
            }

            /// Shared tail of the complete addition formulas, Algorithms 7
            /// and 8 of https://eprint.iacr.org/2015/1060.pdf with `a = 0`.
            /// Takes the products `X1X2`, `Y1Y2`, `Z1Z2` and the cross sums
            /// `X1Y2 + X2Y1`, `Y1Z2 + Y2Z1`, `X1Z2 + X2Z1`.
            #[inline]
            fn add_from_products(
                xx: $base,
                yy: $base,
                zz: $base,
                xy: $base,
                yz: $base,
                xz: $base,
            ) -> Self {
                let xx3 = xx.double() + xx;
                let bzz = Self::mul_by_3b(&zz);
                let bxz = Self::mul_by_3b(&xz);
                let sum = yy + bzz;
                let diff = yy - bzz;

                Self {
                    x: xy * diff - yz * bxz,
                    y: diff * sum + bxz * xx3,
                    z: sum * yz + xx3 * xy,
                }
            }

            /// Double-and-add over a little-endian limb scalar, most
            /// significant bit first.
            pub fn multiply(&self, by: &[u64]) -> Self {
                let mut acc = Self::identity();
                for limb in by.iter().rev() {
                    for i in (0..64).rev() {
                        acc = acc.double();
                        let bit = ::subtle::Choice::from(((limb >> i) & 1) as u8);
                        acc = Self::conditional_select(&acc, &(acc + self), bit);
                    }
                }
                acc
            }
        }

        impl $name_affine {
            pub fn identity() -> Self {
                Self {
                    x: <$base as ::ff::Field>::ZERO,
                    y: <$base as ::ff::Field>::ZERO,
                }
            }

            pub fn generator() -> Self {
                Self {
                    x: $generator.0,
                    y: $generator.1,
                }
            }

            pub fn is_identity(&self) -> ::subtle::Choice {
                <$base as ::ff::Field>::is_zero(&self.x) & <$base as ::ff::Field>::is_zero(&self.y)
            }

            pub fn is_on_curve(&self) -> ::subtle::Choice {
                // y^2 - x^3 ?= b
                (self.y.square() - self.x.square() * self.x).ct_eq(&$constant_b)
                    | self.is_identity()
            }

            /// Builds a point from affine coordinates, rejecting pairs off the
            /// curve. `(0, 0)` is accepted as the identity.
            pub fn from_xy(x: $base, y: $base) -> $crate::Result<Self> {
                let p = Self { x, y };
                if bool::from(p.is_on_curve()) {
                    Ok(p)
                } else {
                    Err($crate::Error::NotOnCurve)
                }
            }

            pub fn x(&self) -> &$base {
                &self.x
            }

            pub fn y(&self) -> &$base {
                &self.y
            }

            pub fn to_curve(&self) -> $name {
                let tmp = $name {
                    x: self.x,
                    y: self.y,
                    z: <$base as ::ff::Field>::ONE,
                };
                $name::conditional_select(&tmp, &$name::identity(), self.is_identity())
            }
        }

        impl ::core::fmt::Debug for $name_affine {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                if self.is_identity().into() {
                    write!(f, "Infinity")
                } else {
                    write!(f, "({:?}, {:?})", self.x, self.y)
                }
            }
        }

        impl From<$name_affine> for $name {
            fn from(p: $name_affine) -> $name {
                p.to_curve()
            }
        }

        impl From<$name> for $name_affine {
            fn from(p: $name) -> $name_affine {
                p.to_affine()
            }
        }

        impl Default for $name {
            fn default() -> $name {
                $name::identity()
            }
        }

        impl Default for $name_affine {
            fn default() -> $name_affine {
                $name_affine::identity()
            }
        }

        impl ::subtle::ConstantTimeEq for $name {
            /// Projective equality by cross multiplication: `XZ' = X'Z` and
            /// `YZ' = Y'Z`, or both points at infinity.
            fn ct_eq(&self, other: &Self) -> ::subtle::Choice {
                let (inf, other_inf) = (self.is_identity(), other.is_identity());
                let same_x = (self.x * other.z).ct_eq(&(other.x * self.z));
                let same_y = (self.y * other.z).ct_eq(&(other.y * self.z));
                (inf & other_inf) | (!inf & !other_inf & same_x & same_y)
            }
        }

        impl ::subtle::ConstantTimeEq for $name_affine {
            fn ct_eq(&self, other: &Self) -> ::subtle::Choice {
                let (inf, other_inf) = (self.is_identity(), other.is_identity());
                let same = self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y);
                (inf & other_inf) | (!inf & !other_inf & same)
            }
        }

        impl ::subtle::ConditionallySelectable for $name {
            fn conditional_select(a: &Self, b: &Self, choice: ::subtle::Choice) -> Self {
                $name {
                    x: $base::conditional_select(&a.x, &b.x, choice),
                    y: $base::conditional_select(&a.y, &b.y, choice),
                    z: $base::conditional_select(&a.z, &b.z, choice),
                }
            }
        }

        impl ::subtle::ConditionallySelectable for $name_affine {
            fn conditional_select(a: &Self, b: &Self, choice: ::subtle::Choice) -> Self {
                $name_affine {
                    x: $base::conditional_select(&a.x, &b.x, choice),
                    y: $base::conditional_select(&a.y, &b.y, choice),
                }
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                bool::from(self.ct_eq(other))
            }
        }

        impl PartialEq for $name_affine {
            fn eq(&self, other: &Self) -> bool {
                bool::from(self.ct_eq(other))
            }
        }

        impl Eq for $name {}
        impl Eq for $name_affine {}

        $crate::impl_binops_additive!($name, $name);
        $crate::impl_binops_additive!($name, $name_affine);
        $crate::impl_binops_additive_specify_output!($name_affine, $name_affine, $name);
        $crate::impl_binops_additive_specify_output!($name_affine, $name, $name);

        impl $name {
            fn negated(&self) -> Self {
                Self { y: -self.y, ..*self }
            }
        }

        impl $name_affine {
            fn negated(&self) -> Self {
                Self { y: -self.y, ..*self }
            }
        }

        $crate::impl_neg_by_method!($name);
        $crate::impl_neg_by_method!($name_affine);

        impl<T> ::core::iter::Sum<T> for $name
        where
            T: ::core::borrow::Borrow<$name>,
        {
            fn sum<I: Iterator<Item = T>>(iter: I) -> Self {
                iter.fold(Self::identity(), |acc, item| acc + item.borrow())
            }
        }

        impl<'a, 'b> ::core::ops::Add<&'a $name> for &'b $name {
            type Output = $name;

            fn add(self, rhs: &'a $name) -> $name {
                let (a, b) = (self, rhs);
                let xx = a.x * b.x;
                let yy = a.y * b.y;
                let zz = a.z * b.z;
                $name::add_from_products(
                    xx,
                    yy,
                    zz,
                    (a.x + a.y) * (b.x + b.y) - xx - yy,
                    (a.y + a.z) * (b.y + b.z) - yy - zz,
                    (a.x + a.z) * (b.x + b.z) - xx - zz,
                )
            }
        }

        impl<'a, 'b> ::core::ops::Add<&'a $name_affine> for &'b $name {
            type Output = $name;

            // Z2 = 1 saves three multiplications.
            fn add(self, rhs: &'a $name_affine) -> $name {
                let (a, b) = (self, rhs);
                let xx = a.x * b.x;
                let yy = a.y * b.y;
                let sum = $name::add_from_products(
                    xx,
                    yy,
                    a.z,
                    (a.x + a.y) * (b.x + b.y) - xx - yy,
                    b.y * a.z + a.y,
                    b.x * a.z + a.x,
                );
                // (0, 0) is not a projective point.
                $name::conditional_select(&sum, a, b.is_identity())
            }
        }

        impl<'a, 'b> ::core::ops::Add<&'a $name> for &'b $name_affine {
            type Output = $name;

            fn add(self, rhs: &'a $name) -> $name {
                rhs + self
            }
        }

        impl<'a, 'b> ::core::ops::Add<&'a $name_affine> for &'b $name_affine {
            type Output = $name;

            fn add(self, rhs: &'a $name_affine) -> $name {
                self.to_curve() + rhs
            }
        }

        $crate::impl_sub_by_neg!($name, $name, $name);
        $crate::impl_sub_by_neg!($name, $name_affine, $name);
        $crate::impl_sub_by_neg!($name_affine, $name, $name);
        $crate::impl_sub_by_neg!($name_affine, $name_affine, $name);
    };
}

/// `Neg` for a type and its reference, through an inherent `negated`.
#[macro_export]
macro_rules! impl_neg_by_method {
    ($t:ident) => {
        impl<'a> ::core::ops::Neg for &'a $t {
            type Output = $t;

            fn neg(self) -> $t {
                self.negated()
            }
        }

        impl ::core::ops::Neg for $t {
            type Output = $t;

            fn neg(self) -> $t {
                self.negated()
            }
        }
    };
}

/// `a - b` as `a + (-b)`, by reference.
#[macro_export]
macro_rules! impl_sub_by_neg {
    ($lhs:ident, $rhs:ident, $output:ident) => {
        impl<'a, 'b> ::core::ops::Sub<&'a $rhs> for &'b $lhs {
            type Output = $output;

            fn sub(self, rhs: &'a $rhs) -> $output {
                self + &rhs.negated()
            }
        }
    };
}
