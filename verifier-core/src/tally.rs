//! Tally and spoiled-ballot verification: homomorphic aggregation across
//! cast ballots followed by per-guardian share verification, with the
//! same share machinery reused for individually-decrypted spoiled ballots.

use std::collections::HashMap;

use num_bigint::BigUint;
use num_traits::One;

use crate::ctx::VerificationCtx;
use crate::errors::FailureKind;
use crate::modmath;
use crate::record::{Record, SpoiledBallot};
use crate::report::Report;
use crate::share::verify_share;

/// Verifies the homomorphic tally: for every contest/selection pair
/// present in `record.tally`, the product of that selection's ciphertext
/// across all cast ballots must equal the recorded accumulated
/// ciphertext, and every guardian share decrypting it must verify.
///
/// Lagrange combination of shares into a plaintext tally is out of scope;
/// only proof validity is checked here.
pub fn verify_tally(
    ctx: &VerificationCtx,
    record: &Record,
    guardian_keys: &HashMap<String, BigUint>,
    quorum: u32,
) -> Report {
    let mut report = Report::new();

    // contest_id -> selection_id -> (alpha*, beta*) accumulated across cast ballots.
    let mut accumulated: HashMap<(String, String), (BigUint, BigUint)> = HashMap::new();

    for ballot in record.cast_ballots() {
        for contest in &ballot.contests {
            for selection in &contest.ballot_selections {
                if selection.is_placeholder_selection {
                    continue;
                }
                let key = (contest.object_id.clone(), selection.object_id.clone());
                let entry = accumulated
                    .entry(key)
                    .or_insert_with(|| (BigUint::one(), BigUint::one()));
                entry.0 = modmath::mod_p(&(&entry.0 * selection.ciphertext.alpha()), &ctx.p);
                entry.1 = modmath::mod_p(&(&entry.1 * selection.ciphertext.beta()), &ctx.p);
            }
        }
    }

    for (contest_id, tally_contest) in &record.tally.contests {
        for (selection_id, tally_selection) in &tally_contest.selections {
            let location = format!("tally.{contest_id}.{selection_id}");

            let (alpha_star, beta_star) = accumulated
                .get(&(contest_id.clone(), selection_id.clone()))
                .cloned()
                .unwrap_or((BigUint::one(), BigUint::one()));

            if !modmath::equals(&alpha_star, tally_selection.message.alpha())
                || !modmath::equals(&beta_star, tally_selection.message.beta())
            {
                report.push(
                    FailureKind::AggregationMismatch(format!(
                        "accumulated ciphertext for {contest_id}/{selection_id} does not match the recorded tally"
                    )),
                    location.clone(),
                );
            }

            if (tally_selection.shares.len() as u32) < quorum {
                report.push(
                    FailureKind::MissingShare(format!(
                        "{} of {quorum} required shares present",
                        tally_selection.shares.len()
                    )),
                    location.clone(),
                );
            }

            for share in &tally_selection.shares {
                let share_location = format!("{location}.share[{}]", share.guardian_id);
                match guardian_keys.get(&share.guardian_id) {
                    Some(k_i) => {
                        let share_report = verify_share(
                            ctx,
                            tally_selection.message.alpha(),
                            tally_selection.message.beta(),
                            k_i,
                            share,
                            &share_location,
                        );
                        report.merge(share_report);
                    }
                    None => {
                        report.push(
                            FailureKind::MissingShare(format!(
                                "no public key on record for guardian {}",
                                share.guardian_id
                            )),
                            share_location,
                        );
                    }
                }
            }
        }
    }

    report
}

/// Verifies every spoiled ballot's per-selection decryption shares against
/// that ballot's own ciphertext, rather than an aggregate across ballots.
pub fn verify_spoiled_ballots(
    ctx: &VerificationCtx,
    spoiled_ballots: &[SpoiledBallot],
    guardian_keys: &HashMap<String, BigUint>,
    quorum: u32,
) -> Report {
    let mut report = Report::new();

    for ballot in spoiled_ballots {
        for contest in &ballot.contests {
            for selection in &contest.selections {
                let location = format!(
                    "spoiled.{}.{}.{}",
                    ballot.object_id, contest.object_id, selection.object_id
                );

                if (selection.shares.len() as u32) < quorum {
                    report.push(
                        FailureKind::MissingShare(format!(
                            "{} of {quorum} required shares present",
                            selection.shares.len()
                        )),
                        location.clone(),
                    );
                }

                for share in &selection.shares {
                    let share_location = format!("{location}.share[{}]", share.guardian_id);
                    match guardian_keys.get(&share.guardian_id) {
                        Some(k_i) => {
                            let share_report = verify_share(
                                ctx,
                                selection.message.alpha(),
                                selection.message.beta(),
                                k_i,
                                share,
                                &share_location,
                            );
                            report.merge(share_report);
                        }
                        None => {
                            report.push(
                                FailureKind::MissingShare(format!(
                                    "no public key on record for guardian {}",
                                    share.guardian_id
                                )),
                                share_location,
                            );
                        }
                    }
                }
            }
        }
    }

    report
}
