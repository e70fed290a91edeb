//! An offline, read-only verifier for ElectionGuard-style election
//! records: independently re-checks every non-interactive zero-knowledge
//! proof in a record (selection encryption, contest vote limits,
//! guardian decryption shares) and the record's internal consistency
//! (tally aggregation), without trusting anything the record claims
//! about itself.

pub mod ballot;
pub mod contest;
pub mod ctx;
pub mod errors;
pub mod fiat_shamir;
pub mod ingest;
pub mod modmath;
pub mod params;
pub mod record;
pub mod report;
pub mod selection;
pub mod share;
pub mod tally;

use rand::RngCore;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use ctx::VerificationCtx;
use errors::FailureKind;
use params::RecordSpec;
use record::Record;
use report::Report;

/// Runs the full verification pipeline over `record`: baseline parameters,
/// then every cast ballot's contests and selections, then the tally and
/// its guardian shares, then spoiled ballots. Every stage runs regardless
/// of earlier failures; the returned [`Report`] accumulates everything
/// found.
pub fn verify_record(record: &Record, spec: &RecordSpec, rng: &mut impl RngCore) -> Report {
    let mut report = Report::new();

    for failure in params::validate_params(&record.context, spec, rng) {
        report.push(failure, "params".to_string());
    }

    let vctx = VerificationCtx::from_election_context(&record.context);

    let ballots: Vec<&record::Ballot> = record.cast_ballots().collect();

    #[cfg(feature = "parallel")]
    let ballot_reports: Vec<Report> = ballots
        .par_iter()
        .map(|ballot| ballot::verify_ballot(&vctx, ballot, &record.context.vote_limits).report)
        .collect();

    #[cfg(not(feature = "parallel"))]
    let ballot_reports: Vec<Report> = ballots
        .iter()
        .map(|ballot| ballot::verify_ballot(&vctx, ballot, &record.context.vote_limits).report)
        .collect();

    for r in ballot_reports {
        report.merge(r);
    }

    let guardian_keys = &record.context.guardian_public_keys;

    report.merge(tally::verify_tally(
        &vctx,
        record,
        guardian_keys,
        record.context.quorum,
    ));

    report.merge(tally::verify_spoiled_ballots(
        &vctx,
        &record.spoiled_ballots,
        guardian_keys,
        record.context.quorum,
    ));

    if guardian_keys.len() < record.context.quorum as usize {
        report.push(
            FailureKind::MissingShare(format!(
                "only {} of {} guardian public keys present on record",
                guardian_keys.len(),
                record.context.quorum
            )),
            "guardians".to_string(),
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn empty_record_with_unpinned_params_reports_only_missing_guardians() {
        let context = record::ElectionContext {
            p: num_bigint::BigUint::from(59183_u32),
            q: num_bigint::BigUint::from(127_u8),
            r: num_bigint::BigUint::from(466_u32),
            g: num_bigint::BigUint::from(32616_u32),
            k: num_bigint::BigUint::from(2_u8),
            crypto_base_hash: num_bigint::BigUint::from(1_u8),
            crypto_extended_base_hash: num_bigint::BigUint::from(1_u8),
            number_of_guardians: 0,
            quorum: 0,
            guardian_public_keys: HashMap::new(),
            vote_limits: HashMap::new(),
        };
        let record = Record {
            context,
            ballots: vec![],
            spoiled_ballots: vec![],
            tally: record::Tally::default(),
        };
        let spec = RecordSpec::unpinned("toy-v1");
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let report = verify_record(&record, &spec, &mut rng);
        assert!(report.ok(), "{:?}", report.failures);
    }

    #[test]
    fn record_below_quorum_reports_missing_guardians() {
        let context = record::ElectionContext {
            p: num_bigint::BigUint::from(59183_u32),
            q: num_bigint::BigUint::from(127_u8),
            r: num_bigint::BigUint::from(466_u32),
            g: num_bigint::BigUint::from(32616_u32),
            k: num_bigint::BigUint::from(2_u8),
            crypto_base_hash: num_bigint::BigUint::from(1_u8),
            crypto_extended_base_hash: num_bigint::BigUint::from(1_u8),
            number_of_guardians: 3,
            quorum: 2,
            guardian_public_keys: HashMap::new(),
            vote_limits: HashMap::new(),
        };
        let record = Record {
            context,
            ballots: vec![],
            spoiled_ballots: vec![],
            tally: record::Tally::default(),
        };
        let spec = RecordSpec::unpinned("toy-v1");
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let report = verify_record(&record, &spec, &mut rng);
        assert!(!report.ok());
        assert!(
            report
                .failures
                .iter()
                .any(|f| matches!(f.kind, FailureKind::MissingShare(_)))
        );
    }
}
