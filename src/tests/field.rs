use ff::Field;
use rand_core::{RngCore, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::ff_ext::ExtField;

use super::SEED;

/// Ring-axiom checks shared by every level of the tower.
pub fn random_field_tests<F: Field>() {
    random_field_tests_n::<F>(10000)
}

pub fn random_field_tests_n<F: Field>(n: usize) {
    let mut rng = XorShiftRng::from_seed(SEED);

    random_multiplication_tests::<F, _>(&mut rng, n);
    random_addition_tests::<F, _>(&mut rng, n);
    random_subtraction_tests::<F, _>(&mut rng, n);
    random_negation_tests::<F, _>(&mut rng, n);
    random_doubling_tests::<F, _>(&mut rng, n);
    random_squaring_tests::<F, _>(&mut rng, n);
    random_inversion_tests::<F, _>(&mut rng, n);
    random_expansion_tests::<F, _>(&mut rng, n);

    assert!(bool::from(F::ZERO.is_zero()));
    assert!(bool::from((-F::ZERO).is_zero()));
    assert!(bool::from(F::ZERO.invert().is_none()));

    // Multiplication by zero
    let a = F::random(&mut rng);
    assert!(bool::from((a * F::ZERO).is_zero()));

    // Identities
    assert_eq!(a + F::ZERO, a);
    assert_eq!(a * F::ONE, a);
}

/// Checks `frobenius_map(1)` against raising to the characteristic, then
/// composes powers.
pub fn random_frobenius_tests<F: ExtField, S: AsRef<[u64]> + Copy>(characteristic: S, n: usize) {
    let mut rng = XorShiftRng::from_seed(SEED);
    for _ in 0..n {
        let a = F::random(&mut rng);

        let mut b = a;
        b.frobenius_map(1);
        assert_eq!(b, a.pow_vartime(characteristic));

        let mut c = a;
        for power in 1..13 {
            c.frobenius_map(1);
            let mut d = a;
            d.frobenius_map(power);
            assert_eq!(c, d, "frobenius power {}", power);
        }
        assert_eq!(c, a);
    }
}

pub fn random_sqrt_tests<F: Field>(n: usize) {
    let mut rng = XorShiftRng::from_seed(SEED);
    for _ in 0..n {
        let a = F::random(&mut rng);
        let b = a.square();
        let root = b.sqrt().unwrap();
        assert_eq!(root.square(), b);
        assert!(root == a || root == -a);
    }
    assert_eq!(F::ZERO.sqrt().unwrap(), F::ZERO);
}

fn random_multiplication_tests<F: Field, R: RngCore>(mut rng: R, n: usize) {
    for _ in 0..n {
        let a = F::random(&mut rng);
        let b = F::random(&mut rng);
        let c = F::random(&mut rng);

        let t0 = a * b * c;
        let t1 = a * c * b;
        let t2 = b * c * a;

        assert_eq!(t0, t1);
        assert_eq!(t1, t2);
    }
}

fn random_addition_tests<F: Field, R: RngCore>(mut rng: R, n: usize) {
    for _ in 0..n {
        let a = F::random(&mut rng);
        let b = F::random(&mut rng);
        let c = F::random(&mut rng);

        let mut t0 = a;
        t0 += &b;
        t0 += &c;

        let t1 = (a + c) + b;
        let t2 = (b + c) + a;

        assert_eq!(t0, t1);
        assert_eq!(t1, t2);
    }
}

fn random_subtraction_tests<F: Field, R: RngCore>(mut rng: R, n: usize) {
    for _ in 0..n {
        let a = F::random(&mut rng);
        let b = F::random(&mut rng);

        let mut t0 = a;
        t0 -= &b;
        let t1 = b - a;

        assert!(bool::from((t0 + t1).is_zero()));
        assert_eq!(t0 + b, a);
    }
}

fn random_negation_tests<F: Field, R: RngCore>(mut rng: R, n: usize) {
    for _ in 0..n {
        let a = F::random(&mut rng);
        assert!(bool::from((-a + a).is_zero()));
        assert_eq!(-(-a), a);
    }
}

fn random_doubling_tests<F: Field, R: RngCore>(mut rng: R, n: usize) {
    for _ in 0..n {
        let a = F::random(&mut rng);
        assert_eq!(a + a, a.double());
    }
}

fn random_squaring_tests<F: Field, R: RngCore>(mut rng: R, n: usize) {
    for _ in 0..n {
        let a = F::random(&mut rng);
        assert_eq!(a * a, a.square());
    }
}

fn random_inversion_tests<F: Field, R: RngCore>(mut rng: R, n: usize) {
    for _ in 0..n {
        let mut a = F::random(&mut rng);
        let b = a.invert().unwrap(); // probablistically nonzero
        a *= &b;

        assert_eq!(a, F::ONE);
    }
}

fn random_expansion_tests<F: Field, R: RngCore>(mut rng: R, n: usize) {
    for _ in 0..n {
        // Compare (a + b)(c + d) and (a*c + b*c + a*d + b*d)
        let a = F::random(&mut rng);
        let b = F::random(&mut rng);
        let c = F::random(&mut rng);
        let d = F::random(&mut rng);

        let t0 = (a + b) * (c + d);
        let t1 = a * c + b * c + a * d + b * d;

        assert_eq!(t0, t1);
    }
}
