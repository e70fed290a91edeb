//! Contest-level verification: aggregates selections, enforces the vote
//! limit, and validates the contest's Chaum-Pedersen range proof.

use num_bigint::BigUint;
use num_traits::One;

use crate::ctx::VerificationCtx;
use crate::errors::FailureKind;
use crate::fiat_shamir::{HashInput, hash_elems};
use crate::modmath;
use crate::record::Contest;
use crate::report::Report;
use crate::selection::verify_selection;

/// The outcome of verifying one contest: the reference spec reports
/// encryption errors (selection-level proof failures) separately from
/// limit errors (placeholder count, challenge, contest equations), so a
/// caller can distinguish "this ballot's selections don't encrypt 0/1
/// correctly" from "this ballot's vote limit was violated".
#[derive(Debug, Clone)]
pub struct ContestOutcome {
    pub encryption_ok: bool,
    pub limit_ok: bool,
    pub report: Report,
}

impl ContestOutcome {
    pub fn ok(&self) -> bool {
        self.encryption_ok && self.limit_ok
    }
}

/// Verifies one contest: every selection's disjunctive proof, the
/// placeholder count against `l_max` (the contest's vote limit as declared
/// in the election description, never trusted from the proof itself), and
/// the contest-level constant proof.
pub fn verify_contest(ctx: &VerificationCtx, contest: &Contest, l_max: u64) -> ContestOutcome {
    let location = format!("contest={}", contest.object_id);
    let mut report = Report::new();
    let mut encryption_ok = true;
    let mut limit_ok = true;

    let mut placeholder_count: u64 = 0;
    let mut alpha_prod = BigUint::one();
    let mut beta_prod = BigUint::one();

    for selection in &contest.ballot_selections {
        let sel_location = format!("{location} selection={}", selection.object_id);
        let sel_report = verify_selection(ctx, selection, &sel_location);
        if !sel_report.ok() {
            encryption_ok = false;
        }
        report.merge(sel_report);

        alpha_prod = modmath::mod_p(&(&alpha_prod * selection.ciphertext.alpha()), &ctx.p);
        beta_prod = modmath::mod_p(&(&beta_prod * selection.ciphertext.beta()), &ctx.p);

        if selection.is_placeholder_selection {
            placeholder_count += 1;
        }
    }

    // Placeholder count must equal the vote limit from the election
    // description, not from the proof (see design notes: the proof's
    // `constant` is bound to `l_max` separately below, never trusted on
    // its own).
    if placeholder_count != l_max {
        limit_ok = false;
        report.push(
            FailureKind::PlaceholderCountError(format!(
                "{placeholder_count} placeholders, expected {l_max}"
            )),
            location.clone(),
        );
    }

    let proof = &contest.proof;

    if proof.constant != l_max {
        limit_ok = false;
        report.push(
            FailureKind::EquationFailure(format!(
                "proof.constant ({}) does not equal the vote limit ({l_max})",
                proof.constant
            )),
            location.clone(),
        );
    }

    for (name, v) in [("A", &proof.pad), ("B", &proof.data)] {
        if !modmath::in_zrp(v, &ctx.p, &ctx.q) {
            limit_ok = false;
            report.push(
                FailureKind::MembershipError(format!("{name} is not in the order-q subgroup")),
                location.clone(),
            );
        }
    }
    for (name, v) in [("c", &proof.challenge), ("v", &proof.response)] {
        if !modmath::in_zq(v, &ctx.q) {
            limit_ok = false;
            report.push(
                FailureKind::MembershipError(format!("{name} is not in Z_q")),
                location.clone(),
            );
        }
    }

    // Contest challenge: c' = H(Q-bar, alpha_prod, beta_prod, A, B).
    let recomputed = hash_elems(
        &[
            HashInput::biguint_ref(&ctx.extended_base_hash),
            HashInput::biguint_ref(&alpha_prod),
            HashInput::biguint_ref(&beta_prod),
            HashInput::biguint_ref(&proof.pad),
            HashInput::biguint_ref(&proof.data),
        ],
        &ctx.q,
    );
    if !modmath::equals(&recomputed, &modmath::mod_q(&proof.challenge, &ctx.q)) {
        limit_ok = false;
        report.push(
            FailureKind::ChallengeMismatch("contest challenge does not match".to_string()),
            location.clone(),
        );
    }

    // E1: g^v == A * alpha_prod^c
    let e1_lhs = modmath::pow_mod(&ctx.g, &proof.response, &ctx.p);
    let e1_rhs = modmath::mod_p(
        &(&proof.pad * modmath::pow_mod(&alpha_prod, &proof.challenge, &ctx.p)),
        &ctx.p,
    );
    if !modmath::equals(&e1_lhs, &e1_rhs) {
        limit_ok = false;
        report.push(
            FailureKind::EquationFailure("contest E1".to_string()),
            location.clone(),
        );
    }

    // E2: g^{L_max * c} * K^v == B * beta_prod^c, with L_max * c reduced mod q
    // before exponentiation.
    let l_max_c = modmath::mod_q(&(&BigUint::from(l_max) * &proof.challenge), &ctx.q);
    let e2_lhs = modmath::mod_p(
        &(modmath::pow_mod(&ctx.g, &l_max_c, &ctx.p)
            * modmath::pow_mod(&ctx.k, &proof.response, &ctx.p)),
        &ctx.p,
    );
    let e2_rhs = modmath::mod_p(
        &(&proof.data * modmath::pow_mod(&beta_prod, &proof.challenge, &ctx.p)),
        &ctx.p,
    );
    if !modmath::equals(&e2_lhs, &e2_rhs) {
        limit_ok = false;
        report.push(
            FailureKind::EquationFailure("contest E2".to_string()),
            location,
        );
    }

    ContestOutcome {
        encryption_ok,
        limit_ok,
        report,
    }
}
