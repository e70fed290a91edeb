//! Selection-level verification: the Chaum-Pedersen disjunctive proof that
//! a selection's ciphertext encrypts 0 or 1.

use num_bigint::BigUint;

use crate::ctx::VerificationCtx;
use crate::errors::FailureKind;
use crate::fiat_shamir::{HashInput, hash_elems};
use crate::modmath;
use crate::record::Selection;
use crate::report::Report;

/// Verifies one selection's group membership and disjunctive proof,
/// recording every failed check rather than stopping at the first.
///
/// `location` names the selection for diagnostics, e.g.
/// `"ballot=b0 contest=c0 selection=s0"`.
pub fn verify_selection(ctx: &VerificationCtx, selection: &Selection, location: &str) -> Report {
    let mut report = Report::new();

    let alpha = selection.ciphertext.alpha();
    let beta = selection.ciphertext.beta();
    let proof = &selection.proof;

    // 1. Group membership.
    let zrp_checks: [(&str, &BigUint); 6] = [
        ("alpha", alpha),
        ("beta", beta),
        ("a0", &proof.proof_zero_pad),
        ("b0", &proof.proof_zero_data),
        ("a1", &proof.proof_one_pad),
        ("b1", &proof.proof_one_data),
    ];
    for (name, v) in zrp_checks {
        if !modmath::in_zrp(v, &ctx.p, &ctx.q) {
            report.push(
                FailureKind::MembershipError(format!("{name} is not in the order-q subgroup")),
                location.to_string(),
            );
        }
    }
    let zq_checks: [(&str, &BigUint); 4] = [
        ("c0", &proof.proof_zero_challenge),
        ("c1", &proof.proof_one_challenge),
        ("v0", &proof.proof_zero_response),
        ("v1", &proof.proof_one_response),
    ];
    for (name, v) in zq_checks {
        if !modmath::in_zq(v, &ctx.q) {
            report.push(
                FailureKind::MembershipError(format!("{name} is not in Z_q")),
                location.to_string(),
            );
        }
    }

    // 2. Fiat-Shamir challenge: c = H(Q-bar, alpha, beta, a0, b0, a1, b1).
    let challenge = hash_elems(
        &[
            HashInput::biguint_ref(&ctx.extended_base_hash),
            HashInput::biguint_ref(alpha),
            HashInput::biguint_ref(beta),
            HashInput::biguint_ref(&proof.proof_zero_pad),
            HashInput::biguint_ref(&proof.proof_zero_data),
            HashInput::biguint_ref(&proof.proof_one_pad),
            HashInput::biguint_ref(&proof.proof_one_data),
        ],
        &ctx.q,
    );

    // 3. Challenge split: c == (c0 + c1) mod q.
    let split = modmath::mod_q(
        &(&proof.proof_zero_challenge + &proof.proof_one_challenge),
        &ctx.q,
    );
    if !modmath::equals(&modmath::mod_q(&challenge, &ctx.q), &split) {
        report.push(
            FailureKind::ChallengeMismatch(
                "disjunctive challenge does not equal c0 + c1 mod q".to_string(),
            ),
            location.to_string(),
        );
    }

    // 4. The four proof equations, mod p.
    // E1 (zero branch, g): g^v0 == a0 * alpha^c0
    let e1_lhs = modmath::pow_mod(&ctx.g, &proof.proof_zero_response, &ctx.p);
    let e1_rhs = modmath::mod_p(
        &(&proof.proof_zero_pad * modmath::pow_mod(alpha, &proof.proof_zero_challenge, &ctx.p)),
        &ctx.p,
    );
    if !modmath::equals(&e1_lhs, &e1_rhs) {
        report.push(
            FailureKind::EquationFailure("E1".to_string()),
            location.to_string(),
        );
    }

    // E2 (zero branch, K): K^v0 == b0 * beta^c0
    let e2_lhs = modmath::pow_mod(&ctx.k, &proof.proof_zero_response, &ctx.p);
    let e2_rhs = modmath::mod_p(
        &(&proof.proof_zero_data * modmath::pow_mod(beta, &proof.proof_zero_challenge, &ctx.p)),
        &ctx.p,
    );
    if !modmath::equals(&e2_lhs, &e2_rhs) {
        report.push(
            FailureKind::EquationFailure("E2".to_string()),
            location.to_string(),
        );
    }

    // E3 (one branch, g): g^v1 == a1 * alpha^c1
    let e3_lhs = modmath::pow_mod(&ctx.g, &proof.proof_one_response, &ctx.p);
    let e3_rhs = modmath::mod_p(
        &(&proof.proof_one_pad * modmath::pow_mod(alpha, &proof.proof_one_challenge, &ctx.p)),
        &ctx.p,
    );
    if !modmath::equals(&e3_lhs, &e3_rhs) {
        report.push(
            FailureKind::EquationFailure("E3".to_string()),
            location.to_string(),
        );
    }

    // E4 (one branch, K): g^c1 * K^v1 == b1 * beta^c1
    let e4_lhs = modmath::mod_p(
        &(modmath::pow_mod(&ctx.g, &proof.proof_one_challenge, &ctx.p)
            * modmath::pow_mod(&ctx.k, &proof.proof_one_response, &ctx.p)),
        &ctx.p,
    );
    let e4_rhs = modmath::mod_p(
        &(&proof.proof_one_data * modmath::pow_mod(beta, &proof.proof_one_challenge, &ctx.p)),
        &ctx.p,
    );
    if !modmath::equals(&e4_lhs, &e4_rhs) {
        report.push(
            FailureKind::EquationFailure("E4".to_string()),
            location.to_string(),
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Ciphertext, DisjunctiveChaumPedersenProof};

    /// Toy group with p=59183, q=127, g=32616, matching `util::algebra`'s
    /// test fixtures, with a fixed secret key x=11 giving K = g^x mod p.
    fn toy_ctx() -> VerificationCtx {
        let p = BigUint::from(59183_u32);
        let q = BigUint::from(127_u8);
        let g = BigUint::from(32616_u32);
        let k = g.modpow(&BigUint::from(11_u8), &p);
        VerificationCtx {
            p,
            q,
            g,
            k,
            extended_base_hash: BigUint::from(42_u32),
        }
    }

    /// Builds a valid disjunctive proof that `alpha = g^r, beta = K^r * g^m`
    /// encrypts `m` (0 or 1), using randomness `r` and proof nonces chosen
    /// so the equations and the Fiat-Shamir challenge agree exactly.
    fn encrypt_and_prove(ctx: &VerificationCtx, m: u8, r: &BigUint) -> (Ciphertext, DisjunctiveChaumPedersenProof) {
        let alpha = ctx.g.modpow(r, &ctx.p);
        let beta = modmath::mod_p(
            &(ctx.k.modpow(r, &ctx.p) * ctx.g.modpow(&BigUint::from(m), &ctx.p)),
            &ctx.p,
        );
        let ciphertext = Ciphertext {
            pad: alpha.clone(),
            data: beta.clone(),
        };

        // Simulate the branch not taken, pick its challenge/response freely,
        // then solve the real branch's response from the Fiat-Shamir split.
        let (sim_challenge, sim_response) = (BigUint::from(5_u32), BigUint::from(9_u32));

        let (a0, b0, a1, b1, proof_zero_challenge, proof_one_challenge, v0, v1) = if m == 0 {
            // Real branch is zero: pick real nonce u, compute a0=g^u, b0=K^u.
            let u = BigUint::from(13_u32);
            let a0 = ctx.g.modpow(&u, &ctx.p);
            let b0 = ctx.k.modpow(&u, &ctx.p);
            // Simulate branch one: pick c1, v1 freely, derive a1, b1.
            let c1 = sim_challenge.clone();
            let v1 = sim_response.clone();
            // a1 must satisfy g^v1 == a1 * alpha^c1  =>  a1 = g^v1 * alpha^{-c1}
            let alpha_inv = util::algebra_utils::mod_inverse(&alpha, &ctx.p).unwrap();
            let a1 = modmath::mod_p(
                &(ctx.g.modpow(&v1, &ctx.p) * alpha_inv.modpow(&c1, &ctx.p)),
                &ctx.p,
            );
            // b1 must satisfy g^c1 * K^v1 == b1 * beta^c1 => b1 = g^c1 * K^v1 * beta^{-c1}
            let beta_inv = util::algebra_utils::mod_inverse(&beta, &ctx.p).unwrap();
            let b1 = modmath::mod_p(
                &(ctx.g.modpow(&c1, &ctx.p)
                    * ctx.k.modpow(&v1, &ctx.p)
                    * beta_inv.modpow(&c1, &ctx.p)),
                &ctx.p,
            );

            let challenge = hash_elems(
                &[
                    HashInput::biguint_ref(&ctx.extended_base_hash),
                    HashInput::biguint_ref(&alpha),
                    HashInput::biguint_ref(&beta),
                    HashInput::biguint_ref(&a0),
                    HashInput::biguint_ref(&b0),
                    HashInput::biguint_ref(&a1),
                    HashInput::biguint_ref(&b1),
                ],
                &ctx.q,
            );
            let c0 = modmath::mod_q(&(&challenge + &ctx.q - &c1 % &ctx.q), &ctx.q);
            let v0 = modmath::mod_q(&(&u + &c0 * r), &ctx.q);

            (a0, b0, a1, b1, c0, c1, v0, v1)
        } else {
            let u = BigUint::from(13_u32);
            let a1 = ctx.g.modpow(&u, &ctx.p);
            let b1 = ctx.k.modpow(&u, &ctx.p);
            let c0 = sim_challenge.clone();
            let v0 = sim_response.clone();
            let alpha_inv = util::algebra_utils::mod_inverse(&alpha, &ctx.p).unwrap();
            let a0 = modmath::mod_p(
                &(ctx.g.modpow(&v0, &ctx.p) * alpha_inv.modpow(&c0, &ctx.p)),
                &ctx.p,
            );
            let b0 = {
                let beta_inv = util::algebra_utils::mod_inverse(&beta, &ctx.p).unwrap();
                modmath::mod_p(
                    &(ctx.k.modpow(&v0, &ctx.p) * beta_inv.modpow(&c0, &ctx.p)),
                    &ctx.p,
                )
            };

            let challenge = hash_elems(
                &[
                    HashInput::biguint_ref(&ctx.extended_base_hash),
                    HashInput::biguint_ref(&alpha),
                    HashInput::biguint_ref(&beta),
                    HashInput::biguint_ref(&a0),
                    HashInput::biguint_ref(&b0),
                    HashInput::biguint_ref(&a1),
                    HashInput::biguint_ref(&b1),
                ],
                &ctx.q,
            );
            let c1 = modmath::mod_q(&(&challenge + &ctx.q - &c0 % &ctx.q), &ctx.q);
            let v1 = modmath::mod_q(&(&u + &c1 * r), &ctx.q);

            (a0, b0, a1, b1, c0, c1, v0, v1)
        };

        let proof = DisjunctiveChaumPedersenProof {
            proof_zero_pad: a0,
            proof_zero_data: b0,
            proof_one_pad: a1,
            proof_one_data: b1,
            proof_zero_challenge,
            proof_one_challenge,
            proof_zero_response: v0,
            proof_one_response: v1,
        };

        (ciphertext, proof)
    }

    #[test]
    fn valid_zero_encryption_verifies() {
        let ctx = toy_ctx();
        let (ciphertext, proof) = encrypt_and_prove(&ctx, 0, &BigUint::from(17_u32));
        let selection = Selection {
            object_id: "s0".to_string(),
            is_placeholder_selection: false,
            ciphertext,
            proof,
        };
        let report = verify_selection(&ctx, &selection, "s0");
        assert!(report.ok(), "{:?}", report.failures);
    }

    #[test]
    fn valid_one_encryption_verifies() {
        let ctx = toy_ctx();
        let (ciphertext, proof) = encrypt_and_prove(&ctx, 1, &BigUint::from(23_u32));
        let selection = Selection {
            object_id: "s0".to_string(),
            is_placeholder_selection: true,
            ciphertext,
            proof,
        };
        let report = verify_selection(&ctx, &selection, "s0");
        assert!(report.ok(), "{:?}", report.failures);
    }

    #[test]
    fn tampered_ciphertext_fails_e1() {
        let ctx = toy_ctx();
        let (mut ciphertext, proof) = encrypt_and_prove(&ctx, 0, &BigUint::from(17_u32));
        ciphertext.pad = modmath::mod_p(&(&ciphertext.pad * &ctx.g), &ctx.p);
        let selection = Selection {
            object_id: "s0".to_string(),
            is_placeholder_selection: false,
            ciphertext,
            proof,
        };
        let report = verify_selection(&ctx, &selection, "s0");
        assert!(!report.ok());
        assert!(
            report
                .failures
                .iter()
                .any(|f| matches!(&f.kind, FailureKind::EquationFailure(e) if e == "E1")
                    || matches!(&f.kind, FailureKind::ChallengeMismatch(_)))
        );
    }

    #[test]
    fn tampered_challenge_split_fails() {
        let ctx = toy_ctx();
        let (ciphertext, mut proof) = encrypt_and_prove(&ctx, 0, &BigUint::from(17_u32));
        proof.proof_zero_challenge = modmath::mod_q(&(&proof.proof_zero_challenge + BigUint::from(1_u8)), &ctx.q);
        let selection = Selection {
            object_id: "s0".to_string(),
            is_placeholder_selection: false,
            ciphertext,
            proof,
        };
        let report = verify_selection(&ctx, &selection, "s0");
        assert!(!report.ok());
    }
}
