//! Fiat-Shamir transcript hashing.
//!
//! This is the single most error-prone piece of the verifier: the exact
//! byte sequence fed to SHA-256 must match the reference implementation or
//! every challenge recomputation silently disagrees with the record. See
//! the module tests for golden vectors pinning the canonicalization.

use num_bigint::BigUint;
use num_traits::One;
use sha2::{Digest, Sha256};

/// One argument to [`hash_elems`].
///
/// Mirrors the reference implementation's dynamically-typed `*args`: a
/// value is either "empty" (serialized as the literal `"null"`), text fed
/// verbatim, an ordered sequence hashed recursively, or an integer fed as
/// a decimal string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashInput {
    /// `None` / absent — serializes to `"null"`.
    Empty,
    /// A text value. An empty string is treated as [`HashInput::Empty`],
    /// matching the reference implementation's `if not x` falsy check.
    Text(String),
    /// An arbitrary-precision integer, fed as its decimal representation.
    Int(BigUint),
    /// An ordered sequence, hashed recursively and fed as the decimal
    /// representation of the recursive digest. An empty sequence is
    /// treated as [`HashInput::Empty`].
    Seq(Vec<HashInput>),
}

impl HashInput {
    pub fn int<T: Into<BigUint>>(v: T) -> Self {
        HashInput::Int(v.into())
    }

    pub fn text(s: impl Into<String>) -> Self {
        HashInput::Text(s.into())
    }

    pub fn biguint_ref(v: &BigUint) -> Self {
        HashInput::Int(v.clone())
    }
}

/// Computes the raw 32-byte SHA-256 transcript digest for `items`.
///
/// A nested [`HashInput::Seq`] is stringified as the *reduced* value
/// `hash_elems(elems, q)` would return, not the raw digest of the nested
/// transcript — the reference implementation's `hash_elems` is recursive
/// and always applies its own `% (q - 1)` reduction, including on nested
/// calls, so `q` must be threaded through every level.
fn transcript_digest(items: &[HashInput], q: &BigUint) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"|");
    for item in items {
        let piece = canonical_piece(item, q);
        hasher.update(piece.as_bytes());
        hasher.update(b"|");
    }
    hasher.finalize().into()
}

fn canonical_piece(item: &HashInput, q: &BigUint) -> String {
    match item {
        HashInput::Empty => "null".to_string(),
        HashInput::Text(s) if s.is_empty() => "null".to_string(),
        HashInput::Text(s) => s.clone(),
        HashInput::Seq(elems) if elems.is_empty() => "null".to_string(),
        HashInput::Seq(elems) => hash_elems(elems, q).to_str_radix(10),
        HashInput::Int(n) => n.to_str_radix(10),
    }
}

/// `H(x1, ..., xn) -> Z_q`: the canonical transcript hash, reduced modulo
/// `(q - 1)` with no `+1` lift. This exact rule (not the `[1, q)` lift a
/// casual reading of Chaum-Pedersen might suggest) is required to
/// reproduce existing records.
pub fn hash_elems(items: &[HashInput], q: &BigUint) -> BigUint {
    let digest = transcript_digest(items, q);
    let q_minus_1 = q - BigUint::one();
    BigUint::from_bytes_be(&digest) % q_minus_1
}
