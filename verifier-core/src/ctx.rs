//! The verification context threaded through every free function.
//!
//! The reference source scatters `p`/`q`/`g`/public key lookups across
//! several overlapping verifier base classes (`IVerifier`, `IContestVerifier`,
//! `IBallotVerifier`, ...). Per the redesign notes, that hierarchy collapses
//! to a single plain value, [`VerificationCtx`], passed by reference to free
//! functions — there is no dynamic dispatch over verifier kinds here, so the
//! polymorphism bought nothing.

use num_bigint::BigUint;

use crate::record::ElectionContext;

/// The subset of the election context needed to verify any proof: the
/// group parameters, the joint public key, and the domain-separating
/// extended base hash.
#[derive(Debug, Clone)]
pub struct VerificationCtx {
    pub p: BigUint,
    pub q: BigUint,
    pub g: BigUint,
    /// The joint public key `K`.
    pub k: BigUint,
    /// `Q-bar`, the extended base hash.
    pub extended_base_hash: BigUint,
}

impl VerificationCtx {
    pub fn from_election_context(ctx: &ElectionContext) -> Self {
        VerificationCtx {
            p: ctx.p.clone(),
            q: ctx.q.clone(),
            g: ctx.g.clone(),
            k: ctx.k.clone(),
            extended_base_hash: ctx.crypto_extended_base_hash.clone(),
        }
    }
}
