//! Guardian decryption-share verification: the Chaum-Pedersen equality
//! proof binding a guardian's partial decryption to its public commitment.

use crate::ctx::VerificationCtx;
use crate::errors::FailureKind;
use crate::fiat_shamir::{HashInput, hash_elems};
use crate::modmath;
use crate::record::DecryptionShare;
use crate::report::Report;

/// Verifies one guardian's decryption share of the accumulated ciphertext
/// `(a, b)`, against the guardian's public commitment `k_i`.
pub fn verify_share(
    ctx: &VerificationCtx,
    a: &num_bigint::BigUint,
    b: &num_bigint::BigUint,
    k_i: &num_bigint::BigUint,
    share: &DecryptionShare,
    location: &str,
) -> Report {
    let mut report = Report::new();
    let proof = &share.proof;

    for (name, v) in [("a_i", &proof.pad), ("b_i", &proof.data)] {
        if !modmath::in_zrp(v, &ctx.p, &ctx.q) {
            report.push(
                FailureKind::MembershipError(format!("{name} is not in the order-q subgroup")),
                location.to_string(),
            );
        }
    }
    for (name, v) in [("c_i", &proof.challenge), ("v_i", &proof.response)] {
        if !modmath::in_zq(v, &ctx.q) {
            report.push(
                FailureKind::MembershipError(format!("{name} is not in Z_q")),
                location.to_string(),
            );
        }
    }

    let recomputed = hash_elems(
        &[
            HashInput::biguint_ref(&ctx.extended_base_hash),
            HashInput::biguint_ref(a),
            HashInput::biguint_ref(b),
            HashInput::biguint_ref(&proof.pad),
            HashInput::biguint_ref(&proof.data),
            HashInput::biguint_ref(&share.share),
        ],
        &ctx.q,
    );
    if !modmath::equals(&recomputed, &modmath::mod_q(&proof.challenge, &ctx.q)) {
        report.push(
            FailureKind::ChallengeMismatch(format!(
                "share challenge mismatch for guardian {}",
                share.guardian_id
            )),
            location.to_string(),
        );
    }

    // E1: g^v_i == a_i * K_i^c_i
    let e1_lhs = modmath::pow_mod(&ctx.g, &proof.response, &ctx.p);
    let e1_rhs = modmath::mod_p(
        &(&proof.pad * modmath::pow_mod(k_i, &proof.challenge, &ctx.p)),
        &ctx.p,
    );
    if !modmath::equals(&e1_lhs, &e1_rhs) {
        report.push(
            FailureKind::EquationFailure("share E1".to_string()),
            location.to_string(),
        );
    }

    // E2: A^v_i == b_i * M_i^c_i
    let e2_lhs = modmath::pow_mod(a, &proof.response, &ctx.p);
    let e2_rhs = modmath::mod_p(
        &(&proof.data * modmath::pow_mod(&share.share, &proof.challenge, &ctx.p)),
        &ctx.p,
    );
    if !modmath::equals(&e2_lhs, &e2_rhs) {
        report.push(
            FailureKind::EquationFailure("share E2".to_string()),
            location.to_string(),
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::EqualityChaumPedersenProof;
    use num_bigint::BigUint;

    fn toy_ctx() -> VerificationCtx {
        let p = BigUint::from(59183_u32);
        let q = BigUint::from(127_u8);
        let g = BigUint::from(32616_u32);
        VerificationCtx {
            p,
            q,
            g,
            k: BigUint::from(2_u8),
            extended_base_hash: BigUint::from(42_u32),
        }
    }

    /// Builds a genuine share and equality proof for secret `x_i`
    /// (`K_i = g^x_i`, `M_i = A^x_i`), via the standard Chaum-Pedersen
    /// Schnorr-style construction.
    fn build_share(ctx: &VerificationCtx, a: &BigUint, x_i: &BigUint, u: &BigUint) -> (BigUint, DecryptionShare) {
        let k_i = ctx.g.modpow(x_i, &ctx.p);
        let m_i = a.modpow(x_i, &ctx.p);
        let a_i = ctx.g.modpow(u, &ctx.p);
        let b_i = a.modpow(u, &ctx.p);

        let b_dummy = modmath::mod_p(&(a * BigUint::from(3_u8)), &ctx.p); // stand-in for B in the transcript
        let challenge = hash_elems(
            &[
                HashInput::biguint_ref(&ctx.extended_base_hash),
                HashInput::biguint_ref(a),
                HashInput::biguint_ref(&b_dummy),
                HashInput::biguint_ref(&a_i),
                HashInput::biguint_ref(&b_i),
                HashInput::biguint_ref(&m_i),
            ],
            &ctx.q,
        );
        let response = modmath::mod_q(&(u + &challenge * x_i), &ctx.q);

        (
            k_i,
            DecryptionShare {
                guardian_id: "g1".to_string(),
                share: m_i,
                proof: EqualityChaumPedersenProof {
                    pad: a_i,
                    data: b_i,
                    challenge,
                    response,
                },
            },
        )
    }

    #[test]
    fn valid_share_proof_verifies() {
        let ctx = toy_ctx();
        let a = BigUint::from(7_u32);
        let b = modmath::mod_p(&(&a * BigUint::from(3_u8)), &ctx.p);
        let (k_i, share) = build_share(&ctx, &a, &BigUint::from(5_u32), &BigUint::from(13_u32));
        let report = verify_share(&ctx, &a, &b, &k_i, &share, "loc");
        assert!(report.ok(), "{:?}", report.failures);
    }

    #[test]
    fn forged_response_fails_equations() {
        let ctx = toy_ctx();
        let a = BigUint::from(7_u32);
        let b = modmath::mod_p(&(&a * BigUint::from(3_u8)), &ctx.p);
        let (k_i, mut share) = build_share(&ctx, &a, &BigUint::from(5_u32), &BigUint::from(13_u32));
        share.proof.response = modmath::mod_q(&(&share.proof.response + BigUint::from(1_u8)), &ctx.q);
        let report = verify_share(&ctx, &a, &b, &k_i, &share, "loc");
        assert!(!report.ok());
    }
}
