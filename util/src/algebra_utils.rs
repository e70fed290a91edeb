//! Utility functions for field and group elements.

use std::mem;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

/// Returns the number of bits required to encode the given number.
pub fn cnt_bits_repr(n: &BigUint) -> usize {
    if n.is_zero() {
        1
    } else {
        n.bits() as usize
    }
}

/// Encodes `n` in big-endian as a left-padded byte string of length `len`.
pub fn to_be_bytes_left_pad(n: &BigUint, len: usize) -> Vec<u8> {
    let mut v = n.to_bytes_be();

    if v.len() < len {
        let left_pad = len - v.len();
        v.reserve(left_pad);
        v.extend(std::iter::repeat(0).take(left_pad));
        v.rotate_right(left_pad);
    }

    assert!(len <= v.len());

    v
}

/// Computes the inverse of `a` modulo `m`, if it exists.
///
/// Returns `Some` iff `gcd(a, m) == 1`.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }
    let m = BigInt::from_biguint(Sign::Plus, m.clone());
    let mut t = (BigInt::zero(), BigInt::one());
    let mut r = (m.clone(), BigInt::from_biguint(Sign::Plus, a.clone()));
    while !r.1.is_zero() {
        let q = &r.0 / &r.1;
        let f = |mut r: (BigInt, BigInt)| {
            mem::swap(&mut r.0, &mut r.1);
            r.1 -= &q * &r.0;
            r
        };
        r = f(r);
        t = f(t);
    }
    if r.0.is_one() {
        if t.0 < BigInt::zero() {
            return Some((t.0 + m).magnitude().clone());
        }
        return Some(t.0.magnitude().clone());
    }

    None
}
