//! Limb-level primitives shared by the field implementations.
//!
//! Multi-limb values are little-endian arrays of `u64`.

/// Compute a + b + carry, returning the result and the new carry over.
#[inline(always)]
pub(crate) const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Compute a - (b + borrow), returning the result and the new borrow.
#[inline(always)]
pub(crate) const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let ret = (a as u128).wrapping_sub((b as u128) + ((borrow >> 63) as u128));
    (ret as u64, (ret >> 64) as u64)
}

/// Compute a + (b * c) + carry, returning the result and the new carry over.
#[inline(always)]
pub(crate) const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + ((b as u128) * (c as u128)) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

#[inline(always)]
pub(crate) fn is_zero<const N: usize>(a: &[u64; N]) -> bool {
    a.iter().all(|&limb| limb == 0)
}

#[inline(always)]
pub(crate) fn is_even<const N: usize>(a: &[u64; N]) -> bool {
    a[0] & 1 == 0
}

/// `a > b` as unsigned integers.
#[inline(always)]
pub(crate) fn gt<const N: usize>(a: &[u64; N], b: &[u64; N]) -> bool {
    for i in (0..N).rev() {
        if a[i] != b[i] {
            return a[i] > b[i];
        }
    }
    false
}

/// `a >= b` as unsigned integers.
#[inline(always)]
pub(crate) fn gte<const N: usize>(a: &[u64; N], b: &[u64; N]) -> bool {
    !gt(b, a)
}

/// In-place `a += b` modulo 2^(64N). Returns the carry out.
#[inline(always)]
pub(crate) fn add_assign<const N: usize>(a: &mut [u64; N], b: &[u64; N]) -> u64 {
    let mut carry = 0;
    for i in 0..N {
        (a[i], carry) = adc(a[i], b[i], carry);
    }
    carry
}

/// In-place `a -= b` modulo 2^(64N). Returns `true` on underflow.
#[inline(always)]
pub(crate) fn sub_assign<const N: usize>(a: &mut [u64; N], b: &[u64; N]) -> bool {
    let mut borrow = 0;
    for i in 0..N {
        (a[i], borrow) = sbb(a[i], b[i], borrow);
    }
    borrow != 0
}

/// In-place `a <<= 1`. Returns the bit shifted out of the top limb.
#[inline(always)]
pub(crate) fn shl1<const N: usize>(a: &mut [u64; N]) -> u64 {
    let mut carry = 0;
    for limb in a.iter_mut() {
        let next = *limb >> 63;
        *limb = (*limb << 1) | carry;
        carry = next;
    }
    carry
}

/// In-place `a >>= 1`.
#[inline(always)]
pub(crate) fn shr1<const N: usize>(a: &mut [u64; N]) {
    let mut carry = 0;
    for limb in a.iter_mut().rev() {
        let next = *limb << 63;
        *limb = (*limb >> 1) | carry;
        carry = next;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_shifts_carry_across_limbs() {
        let mut a = [0x8000_0000_0000_0001u64, 0x8000_0000_0000_0000];
        assert_eq!(shl1(&mut a), 1);
        assert_eq!(a, [0x2, 0x1]);
        shr1(&mut a);
        assert_eq!(a, [0x8000_0000_0000_0001, 0x0]);
    }

    #[test]
    fn test_add_sub_wrap() {
        let mut a = [u64::MAX, u64::MAX];
        assert_eq!(add_assign(&mut a, &[1, 0]), 1);
        assert!(is_zero(&a));
        assert!(sub_assign(&mut a, &[1, 0]));
        assert_eq!(a, [u64::MAX, u64::MAX]);
        assert!(!sub_assign(&mut a, &[u64::MAX, 0]));
        assert_eq!(a, [0, u64::MAX]);
    }

    #[test]
    fn test_comparisons() {
        let a = [5u64, 1];
        let b = [u64::MAX, 0];
        assert!(gt(&a, &b));
        assert!(!gt(&b, &a));
        assert!(gte(&a, &a));
        assert!(!gt(&a, &a));
        assert!(is_even(&[4u64, 3]));
        assert!(!is_even(&a));
    }
}
