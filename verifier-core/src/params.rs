//! Baseline parameter validation.
//!
//! The reference implementation keeps the expected `p`/`q` as module-level
//! globals. Here they live in a typed, versioned [`RecordSpec`] value so a
//! verifier binary can support more than one record format generation
//! without any process-global state — an operator pins the constants they
//! trust for a given election rather than the crate hardcoding one
//! generation's primes forever.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::RngCore;

use crate::errors::FailureKind;
use crate::modmath;
use crate::record::ElectionContext;

/// The expected fixed group parameters for one record format generation.
///
/// `None` for `expected_p`/`expected_q` means "don't pin an exact value,
/// only check the algebraic relations below" — useful for record formats
/// whose constants an operator has not yet pinned, or for test fixtures
/// built on toy parameters.
#[derive(Debug, Clone)]
pub struct RecordSpec {
    pub format_version: &'static str,
    pub expected_p: Option<BigUint>,
    pub expected_q: Option<BigUint>,
}

impl RecordSpec {
    /// A spec that only checks the algebraic relations, pinning no exact
    /// constant. Suitable when the exact production constants have not
    /// been configured for this binary.
    pub fn unpinned(format_version: &'static str) -> Self {
        RecordSpec {
            format_version,
            expected_p: None,
            expected_q: None,
        }
    }

    /// A spec pinning exact expected values for `p` and `q`.
    pub fn pinned(format_version: &'static str, expected_p: BigUint, expected_q: BigUint) -> Self {
        RecordSpec {
            format_version,
            expected_p: Some(expected_p),
            expected_q: Some(expected_q),
        }
    }
}

/// Validates `ctx`'s group parameters against `spec`, accumulating every
/// failure rather than stopping at the first, matching the reference
/// baseline verifier's behavior of running all five checks unconditionally.
pub fn validate_params(
    ctx: &ElectionContext,
    spec: &RecordSpec,
    rng: &mut impl RngCore,
) -> Vec<FailureKind> {
    let mut failures = Vec::new();

    if let Some(expected_p) = &spec.expected_p {
        if !modmath::equals(&ctx.p, expected_p) {
            failures.push(FailureKind::ParameterError(format!(
                "p does not match the expected {} constant",
                spec.format_version
            )));
        }
    }
    if let Some(expected_q) = &spec.expected_q {
        if !modmath::equals(&ctx.q, expected_q) {
            failures.push(FailureKind::ParameterError(format!(
                "q does not match the expected {} constant",
                spec.format_version
            )));
        }
    }

    if !util::prime::is_prime(&ctx.p, rng) {
        failures.push(FailureKind::ParameterError("p is not prime".to_string()));
    }
    if !util::prime::is_prime(&ctx.q, rng) {
        failures.push(FailureKind::ParameterError("q is not prime".to_string()));
    }

    // p - 1 = q * r
    if ctx.p.is_zero() {
        failures.push(FailureKind::ParameterError("p is zero".to_string()));
    } else {
        let p_minus_1 = &ctx.p - BigUint::one();
        if p_minus_1 != &ctx.q * &ctx.r {
            failures.push(FailureKind::ParameterError(
                "p - 1 does not equal q * r".to_string(),
            ));
        }
    }

    // q must not divide r
    if !ctx.r.is_zero() && (&ctx.r % &ctx.q).is_zero() {
        failures.push(FailureKind::ParameterError("q divides r".to_string()));
    }

    // 1 < g < p
    if !modmath::in_range_exclusive(&ctx.g, &BigUint::one(), &ctx.p) {
        failures.push(FailureKind::ParameterError(
            "g is not in the range (1, p)".to_string(),
        ));
    }

    // g^q mod p == 1
    if !modmath::pow_mod(&ctx.g, &ctx.q, &ctx.p).is_one() {
        failures.push(FailureKind::ParameterError(
            "g^q mod p does not equal 1".to_string(),
        ));
    }

    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn toy_ctx() -> ElectionContext {
        // p = 59183, q = 127, r = 466, g = 32616 (util::algebra toy parameters).
        ElectionContext {
            p: BigUint::from(59183_u32),
            q: BigUint::from(127_u8),
            r: BigUint::from(466_u32),
            g: BigUint::from(32616_u32),
            k: BigUint::from(2_u8),
            crypto_base_hash: BigUint::from(1_u8),
            crypto_extended_base_hash: BigUint::from(1_u8),
            number_of_guardians: 1,
            quorum: 1,
            guardian_public_keys: HashMap::from([("g1".to_string(), BigUint::from(2_u8))]),
            vote_limits: HashMap::new(),
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn valid_toy_parameters_pass() {
        let ctx = toy_ctx();
        let spec = RecordSpec::unpinned("toy-v1");
        let failures = validate_params(&ctx, &spec, &mut rng());
        assert!(failures.is_empty(), "{failures:?}");
    }

    #[test]
    fn pinned_mismatch_is_reported() {
        let ctx = toy_ctx();
        let spec = RecordSpec::pinned("toy-v1", BigUint::from(9999_u32), ctx.q.clone());
        let failures = validate_params(&ctx, &spec, &mut rng());
        assert!(
            failures
                .iter()
                .any(|f| matches!(f, FailureKind::ParameterError(m) if m.contains("p does not match")))
        );
    }

    #[test]
    fn broken_relation_is_reported() {
        let mut ctx = toy_ctx();
        ctx.r = BigUint::from(467_u32); // no longer satisfies p - 1 = q * r
        let spec = RecordSpec::unpinned("toy-v1");
        let failures = validate_params(&ctx, &spec, &mut rng());
        assert!(
            failures
                .iter()
                .any(|f| matches!(f, FailureKind::ParameterError(m) if m.contains("q * r")))
        );
    }

    #[test]
    fn non_prime_g_relation_is_reported() {
        let mut ctx = toy_ctx();
        ctx.g = BigUint::from(2_u8); // does not satisfy g^q mod p == 1
        let spec = RecordSpec::unpinned("toy-v1");
        let failures = validate_params(&ctx, &spec, &mut rng());
        assert!(
            failures
                .iter()
                .any(|f| matches!(f, FailureKind::ParameterError(m) if m.contains("g^q")))
        );
    }
}
