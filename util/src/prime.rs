//! Primality testing.
//!
//! Small numbers are resolved by trial division; anything larger is checked
//! probabilistically with Miller-Rabin, following NIST FIPS 186-5 B.3.1.

use std::cmp::Ordering;
use std::num::NonZeroUsize;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::RngCore;

pub const PRIMES_TABLE_U8: [u8; 54] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// The log2 of the largest number for which we do exhaustive trial division.
const EXHAUSTIVE_TRIAL_DIVISION_MAX_L2: u64 = 20;

/// The number of Miller-Rabin iterations to perform for the probabilistic test.
pub const MILLER_RABIN_ITERATIONS: usize = 50;

/// Returns a uniform random integer in `[0, 2^bits)`.
fn random_biguint_bits(rng: &mut impl RngCore, bits: usize) -> BigUint {
    let byte_len = bits.div_ceil(8);
    let mut buf = vec![0_u8; byte_len];
    rng.fill_bytes(&mut buf);
    let extra_bits = byte_len * 8 - bits;
    if extra_bits > 0 {
        buf[0] &= 0xff_u8 >> extra_bits;
    }
    BigUint::from_bytes_be(&buf)
}

/// Returns a uniform random integer in `[0, bound)`, via rejection sampling.
pub fn random_biguint_lt(rng: &mut impl RngCore, bound: &BigUint) -> BigUint {
    if bound.is_zero() {
        return BigUint::zero();
    }
    let bits = bound.bits() as usize;
    loop {
        let candidate = random_biguint_bits(rng, bits);
        if &candidate < bound {
            return candidate;
        }
    }
}

/// Primality test.
///
/// Numbers with more than `2^EXHAUSTIVE_TRIAL_DIVISION_MAX_L2` bits fall back
/// to [`MILLER_RABIN_ITERATIONS`] rounds of Miller-Rabin, which errs on the
/// side of calling a composite "probably prime" with probability at most
/// `4^-MILLER_RABIN_ITERATIONS`.
pub fn is_prime(n: &BigUint, rng: &mut impl RngCore) -> bool {
    use num_integer::Roots;

    let n_low_u32 = n.iter_u32_digits().next().unwrap_or_default();

    let mut is_prime = false;
    match n.bits() {
        0..=1 => {}
        2 => is_prime = true,
        n_bits => {
            if n_low_u32 % 2 == 0 {
                // even and > 2: not prime
            } else {
                match n_bits {
                    0..=8 => {
                        let n_u8 = n_low_u32 as u8;
                        for p in PRIMES_TABLE_U8 {
                            match n_u8.cmp(&p) {
                                Ordering::Less => break,
                                Ordering::Equal => {
                                    is_prime = true;
                                    break;
                                }
                                _ => {}
                            }
                        }
                    }
                    9..=EXHAUSTIVE_TRIAL_DIVISION_MAX_L2 => {
                        let n = n_low_u32;
                        let n_sqrt = n.sqrt();

                        is_prime = true;
                        for p in (3_u32..=n_sqrt).step_by(2) {
                            if n % p == 0 {
                                is_prime = false;
                                break;
                            }
                        }
                    }
                    _ => {
                        is_prime = miller_rabin(n, MILLER_RABIN_ITERATIONS, rng);
                    }
                }
            }
        }
    }

    is_prime
}

fn miller_rabin(w: &BigUint, iterations: usize, rng: &mut impl RngCore) -> bool {
    // NIST FIPS 186-5, B.3.1 Miller-Rabin Probabilistic Primality Test.
    assert!(w.is_odd(), "requires w odd");
    assert!(!w.is_one(), "requires 3 <= w");
    assert!(iterations > 0);

    // 1. Let a be the largest integer such that 2^a divides w-1.
    let w_minus_1: BigUint = w - 1_u8;
    #[allow(clippy::unwrap_used)]
    let a = w_minus_1.trailing_zeros().unwrap();

    // 2. m = (w-1) / 2^a.
    let m = &w_minus_1 >> a;

    // 3. wlen = len(w).
    #[allow(clippy::unwrap_used)]
    let wlen: NonZeroUsize = NonZeroUsize::new(w.bits() as usize).unwrap();

    let two = BigUint::from(2_u8);

    'for_i: for _i in 0..iterations {
        let b = loop {
            let b = random_biguint_bits(rng, wlen.get());
            if !(b.is_zero() || b.is_one() || b >= w_minus_1) {
                break b;
            }
        };

        let mut z = b.modpow(&m, w);

        if z.is_one() || z == w_minus_1 {
            continue 'for_i;
        }

        for _j in 1..a {
            z = z.modpow(&two, w);

            if z == w_minus_1 {
                continue 'for_i;
            }
            if z.is_one() {
                break;
            }
        }

        return false;
    }

    true
}
