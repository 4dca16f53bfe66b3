use core::ops::{Mul, Neg};

use ff::{Field, PrimeField};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use tracing::{debug, debug_span, trace};

use super::fq::Fq;
use super::fq12::Fq12;
use super::fq2::Fq2;
use super::fq6::Fq6;
use super::g2::G2_B;
use super::{G1Affine, G2Affine, BLS_X, G1, G2};
use crate::ff_ext::ExtField;

/// Bit length of `|x|`.
const X_BITS: u32 = 64 - BLS_X.leading_zeros();

/// Number of line evaluations per prepared G2 point: one doubling per bit
/// of `|x|` below the leading one, plus one addition per set bit among them.
pub const LINE_TABLE_LEN: usize = (X_BITS - 1 + BLS_X.count_ones() - 1) as usize;

/// An element of the target group, written multiplicatively.
#[derive(Copy, Clone, Debug)]
pub struct Gt(pub(crate) Fq12);

impl Gt {
    pub fn identity() -> Gt {
        Gt(Fq12::one())
    }

    /// `e(G1::generator(), G2::generator())`
    pub fn generator() -> Gt {
        Gt(GT_GENERATOR)
    }

    pub fn is_identity(&self) -> Choice {
        self.ct_eq(&Self::identity())
    }

    /// Exponentiation by little-endian `u64` limbs. Target group elements
    /// lie in the cyclotomic subgroup, so the cheap squaring applies.
    pub fn pow_vartime<S: AsRef<[u64]>>(&self, exp: S) -> Gt {
        Gt(self.0.cyclotomic_exp(exp))
    }

    pub fn inner(&self) -> &Fq12 {
        &self.0
    }

    pub fn to_bytes(&self) -> [u8; 576] {
        self.0.to_bytes()
    }
}

impl Default for Gt {
    fn default() -> Gt {
        Gt::identity()
    }
}

impl ConstantTimeEq for Gt {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl ConditionallySelectable for Gt {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Gt(Fq12::conditional_select(&a.0, &b.0, choice))
    }
}

impl PartialEq for Gt {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Gt {}

impl<'a> Neg for &'a Gt {
    type Output = Gt;

    // Inversion in the cyclotomic subgroup is conjugation.
    fn neg(self) -> Gt {
        let mut k = self.0;
        k.conjugate();
        Gt(k)
    }
}

impl Neg for Gt {
    type Output = Gt;

    fn neg(self) -> Gt {
        -&self
    }
}

impl<'a, 'b> Mul<&'b Gt> for &'a Gt {
    type Output = Gt;

    fn mul(self, rhs: &'b Gt) -> Gt {
        Gt(self.0 * rhs.0)
    }
}

crate::impl_binops_multiplicative!(Gt, Gt);

/// The line table of one G2 point, reusable against any number of G1
/// points. The default value is the table of the identity.
#[derive(Clone, Debug)]
pub struct G2Prepared {
    pub(crate) coeffs: Vec<(Fq2, Fq2, Fq2)>,
    pub(crate) infinity: bool,
}

impl Default for G2Prepared {
    fn default() -> G2Prepared {
        G2Prepared {
            coeffs: Vec::new(),
            infinity: true,
        }
    }
}

impl G2Prepared {
    pub fn is_identity(&self) -> bool {
        self.infinity
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Recomputes the table for `q` in place, keeping the allocation.
    pub(crate) fn prepare(&mut self, q: &G2Affine) {
        self.coeffs.clear();
        self.infinity = bool::from(q.is_identity());
        if self.infinity {
            return;
        }
        self.coeffs.reserve(LINE_TABLE_LEN);

        let mut r = G2 {
            x: q.x,
            y: q.y,
            z: Fq2::one(),
        };

        for i in (0..X_BITS - 1).rev() {
            self.coeffs.push(doubling_step(&mut r));
            if (BLS_X >> i) & 1 == 1 {
                self.coeffs.push(addition_step(&mut r, q));
            }
        }
        debug_assert_eq!(self.coeffs.len(), LINE_TABLE_LEN);
        trace!(entries = self.coeffs.len(), "prepared G2 line table");
    }
}

impl From<G2Affine> for G2Prepared {
    fn from(q: G2Affine) -> G2Prepared {
        let mut prepared = G2Prepared::default();
        prepared.prepare(&q);
        prepared
    }
}

impl<'a> From<&'a G2Affine> for G2Prepared {
    fn from(q: &'a G2Affine) -> G2Prepared {
        G2Prepared::from(*q)
    }
}

/// Doubles `r` in place and returns the tangent line at the old `r`.
///
/// Homogeneous projective formulas from https://eprint.iacr.org/2013/722.pdf
/// (section 4.3), adapted to the M-type twist.
fn doubling_step(r: &mut G2) -> (Fq2, Fq2, Fq2) {
    let t0 = (r.x * r.y).scale(&Fq::TWO_INV);
    let t1 = r.y.square();
    let t2 = r.z.square();
    let t3 = (t2.double() + t2) * G2_B;
    let t4 = t3.double() + t3;
    let t5 = (t1 + t4).scale(&Fq::TWO_INV);
    let t6 = (r.y + r.z).square() - (t2 + t1);
    let c0 = t3 - t1;
    let t7 = r.x.square();
    let t4 = t1 - t4;

    r.x = t4 * t0;
    let t2 = t3.square();
    let t3 = t2.double() + t2;
    r.y = t5.square() - t3;
    r.z = t1 * t6;

    let c1 = t7.double() + t7;
    let c2 = -t6;
    (c0, c1, c2)
}

/// Replaces `r` by `r + q` and returns the line through them.
fn addition_step(r: &mut G2, q: &G2Affine) -> (Fq2, Fq2, Fq2) {
    let t0 = r.y - q.y * r.z;
    let t1 = r.x - q.x * r.z;
    let t2 = r.z * t0.square();
    let t3 = t1.square();
    let t4 = t1 * t3;
    let t3 = r.x * t3;
    let t5 = t4 - t3.double() + t2;

    r.x = t1 * t5;
    let t2 = (t3 - t5) * t0;
    let t3 = r.y * t4;
    r.y = t2 - t3;
    r.z *= t4;

    let c0 = t0 * q.x - t1 * q.y;
    (c0, -t0, t1)
}

/// Folds one line into `f`, scaling it by the G1 point.
fn ell(f: &mut Fq12, coeffs: &(Fq2, Fq2, Fq2), p: &G1Affine) {
    let c1 = coeffs.1.scale(&p.x);
    let c4 = coeffs.2.scale(&p.y);
    f.mul_by_014(&coeffs.0, &c1, &c4);
}

fn miller_loop<'a, I>(terms: I) -> Fq12
where
    I: Iterator<Item = (&'a G1Affine, &'a G2Prepared)> + Clone,
{
    let mut f = Fq12::one();
    if terms.clone().next().is_none() {
        return f;
    }

    let ell_all = |f: &mut Fq12, j: usize| {
        for (p, q) in terms.clone() {
            ell(f, &q.coeffs[j], p);
        }
    };

    let mut j = 0;
    for i in (0..X_BITS - 1).rev() {
        // f = 1 before the first bit.
        if i != X_BITS - 2 {
            f.square_assign();
        }
        ell_all(&mut f, j);
        j += 1;
        if (BLS_X >> i) & 1 == 1 {
            ell_all(&mut f, j);
            j += 1;
        }
    }
    debug_assert_eq!(j, LINE_TABLE_LEN);

    // x is negative.
    f.conjugate();
    f
}

/// Runs the Miller loop over a batch, skipping terms with an identity on
/// either side or an empty line table. An empty batch gives one.
pub fn multi_miller_loop(terms: &[(&G1Affine, &G2Prepared)]) -> Fq12 {
    miller_loop(
        terms
            .iter()
            .map(|&(p, q)| (p, q))
            .filter(|(p, q)| {
                !bool::from(p.is_identity()) && !q.is_identity() && !q.is_empty()
            }),
    )
}

/// Raises a Miller loop output to `(p^12 - 1) / r`.
///
/// Hard part from https://eprint.iacr.org/2020/875.pdf, computing the
/// power `3 (p^4 - p^2 + 1) / r`.
pub fn final_exponentiation(f: &Fq12) -> Gt {
    #[must_use]
    fn exp_by_x(f: &Fq12) -> Fq12 {
        let mut res = f.cyclotomic_exp([BLS_X]);
        res.conjugate();
        res
    }

    // Easy part: f^((p^6 - 1)(p^2 + 1)). A zero input has no inverse
    // and leaves zero behind.
    let mut t0 = *f;
    t0.frobenius_map(6);
    let t1 = f.invert().unwrap_or(Fq12::zero());
    let mut t2 = t0 * t1;
    let t1 = t2;
    t2.frobenius_map(2);
    t2 *= t1;

    // Hard part
    let mut t1 = t2;
    t1.cyclotomic_square();
    t1.conjugate();
    let t3 = exp_by_x(&t2);
    let mut t4 = t3;
    t4.cyclotomic_square();
    let mut t5 = t1 * t3;
    let t1 = exp_by_x(&t5);
    let t0 = exp_by_x(&t1);
    let mut t6 = exp_by_x(&t0) * t4;
    let mut t4 = exp_by_x(&t6);
    t5.conjugate();
    t4 *= t5 * t2;
    let mut t5 = t2;
    t5.conjugate();
    let mut t1 = t1 * t2;
    t1.frobenius_map(3);
    t6 *= t5;
    t6.frobenius_map(1);
    let mut t3 = t3 * t0;
    t3.frobenius_map(2);
    t3 *= t1;
    t3 *= t6;

    Gt(t3 * t4)
}

/// The optimal ate pairing of a single pair.
pub fn pairing(p: &G1Affine, q: &G2Affine) -> Gt {
    let q = G2Prepared::from(*q);
    final_exponentiation(&multi_miller_loop(&[(p, &q)]))
}

/// Batched pairing evaluation with reusable scratch space.
///
/// Takes `&mut self` for every evaluation: one engine serves one caller
/// at a time. Use one engine per thread for parallel checks.
#[derive(Debug, Default)]
pub struct PairingEngine {
    points: Vec<G1Affine>,
    tables: Vec<G2Prepared>,
}

impl PairingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sizes the scratch space for batches of `n` pairs.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            points: Vec::with_capacity(n),
            tables: (0..n)
                .map(|_| G2Prepared {
                    coeffs: Vec::with_capacity(LINE_TABLE_LEN),
                    ..G2Prepared::default()
                })
                .collect(),
        }
    }

    /// Computes the product of the pairings of every pair in the batch.
    pub fn pair(&mut self, pairs: &[(G1, G2)]) -> Gt {
        let _span = debug_span!("pair", pairs = pairs.len()).entered();

        self.points.clear();
        for (p, q) in pairs {
            let (p, q) = (p.to_affine(), q.to_affine());
            if bool::from(p.is_identity() | q.is_identity()) {
                continue;
            }
            let k = self.points.len();
            if k == self.tables.len() {
                self.tables.push(G2Prepared::default());
            }
            self.tables[k].prepare(&q);
            self.points.push(p);
        }
        debug!(retained = self.points.len(), "filtered identity pairs");

        if self.points.is_empty() {
            debug!("no pairs left, result is the identity");
            return Gt::identity();
        }

        let f = miller_loop(self.points.iter().zip(self.tables.iter()));
        final_exponentiation(&f)
    }

    /// Whether the product of the pairings of the batch is the identity.
    pub fn check(&mut self, pairs: &[(G1, G2)]) -> bool {
        let res = bool::from(self.pair(pairs).is_identity());
        debug!(pairs = pairs.len(), res, "pairing check");
        res
    }
}

// e(G1::generator(), G2::generator()), Montgomery limbs.
pub(crate) const GT_GENERATOR: Fq12 = Fq12::new(
    Fq6::new(
        Fq2::new(
            Fq([
                0x1972e433a01f85c5,
                0x97d32b76fd772538,
                0xc8ce546fc96bcdf9,
                0xcef63e7366d40614,
                0xa611342781843780,
                0x13f3448a3fc6d825,
            ]),
            Fq([
                0xd26331b02e9d6995,
                0x9d68a482f7797e7d,
                0x9c9b29248d39ea92,
                0xf4801ca2e13107aa,
                0xa16c0732bdbcb066,
                0x083ca4afba360478,
            ]),
        ),
        Fq2::new(
            Fq([
                0x59e261db0916b641,
                0x2716b6f4b23e960d,
                0xc8e55b10a0bd9c45,
                0x0bdb0bd99c4deda8,
                0x8cf89ebf57fdaac5,
                0x12d6b7929e777a5e,
            ]),
            Fq([
                0x5fc85188b0e15f35,
                0x34a06e3a8f096365,
                0xdb3126a6e02ad62c,
                0xfc6f5aa97d9a990b,
                0xa12f55f5eb89c210,
                0x1723703a926f8889,
            ]),
        ),
        Fq2::new(
            Fq([
                0x93588f2971828778,
                0x43f65b8611ab7585,
                0x3183aaf5ec279fdf,
                0xfa73d7e18ac99df6,
                0x64e176a6a64c99b0,
                0x179fa78c58388f1f,
            ]),
            Fq([
                0x672a0a11ca2aef12,
                0x0d11b9b52aa3f16b,
                0xa44412d0699d056e,
                0xc01d0177221a5ba5,
                0x66e0cede6c735529,
                0x05f5a71e9fddc339,
            ]),
        ),
    ),
    Fq6::new(
        Fq2::new(
            Fq([
                0xd30a88a1b062c679,
                0x5ac56a5d35fc8304,
                0xd0c834a6a81f290d,
                0xcd5430c2da3707c7,
                0xf0c27ff780500af0,
                0x09245da6e2d72eae,
            ]),
            Fq([
                0x9f2e0676791b5156,
                0xe2d1c8234918fe13,
                0x4c9e459f3c561bf4,
                0xa3e85e53b9d3e3c1,
                0x820a121e21a70020,
                0x15af618341c59acc,
            ]),
        ),
        Fq2::new(
            Fq([
                0x7c95658c24993ab1,
                0x73eb38721ca886b9,
                0x5256d749477434bc,
                0x8ba41902ea504a8b,
                0x04a3d3f80c86ce6d,
                0x18a64a87fb686eaa,
            ]),
            Fq([
                0xbb83e71bb920cf26,
                0x2a5277ac92a73945,
                0xfc0ee59f94f046a0,
                0x7158cdf3786058f7,
                0x7cc1061b82f945f6,
                0x03f847aa9fdbe567,
            ]),
        ),
        Fq2::new(
            Fq([
                0x8078dba56134e657,
                0x1cd7ec9a43998a6e,
                0xb1aa599a1a993766,
                0xc9a0f62f0842ee44,
                0x8e159be3b605dffa,
                0x0c86ba0d4af13fc2,
            ]),
            Fq([
                0xe80ff2a06a52ffb1,
                0x7694ca48721a906c,
                0x7583183e03b08514,
                0xf567afdd40cee4e2,
                0x9a6d96d2e526a5fc,
                0x197e9f49861f2242,
            ]),
        ),
    ),
);
