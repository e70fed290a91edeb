//! Ballot-level verification: runs every contest on a cast ballot and
//! aggregates the two independent pass/fail dimensions (encryption
//! correctness, vote-limit correctness) up to the ballot.

use std::collections::HashMap;

use crate::contest::verify_contest;
use crate::ctx::VerificationCtx;
use crate::record::Ballot;
use crate::report::Report;

/// The outcome of verifying one ballot: same two-dimensional split as
/// [`crate::contest::ContestOutcome`], aggregated across all of the
/// ballot's contests.
#[derive(Debug, Clone)]
pub struct BallotOutcome {
    pub encryption_ok: bool,
    pub limit_ok: bool,
    pub report: Report,
}

impl BallotOutcome {
    pub fn ok(&self) -> bool {
        self.encryption_ok && self.limit_ok
    }
}

/// Verifies every contest on `ballot`, looking up each contest's vote
/// limit by `object_id` in `vote_limits` (the election description, not
/// the ballot itself).
pub fn verify_ballot(
    ctx: &VerificationCtx,
    ballot: &Ballot,
    vote_limits: &HashMap<String, u64>,
) -> BallotOutcome {
    let location = format!("ballot={}", ballot.object_id);
    let mut report = Report::new();
    let mut encryption_ok = true;
    let mut limit_ok = true;

    for contest in &ballot.contests {
        let l_max = match vote_limits.get(&contest.object_id) {
            Some(l) => *l,
            None => {
                // No declared vote limit for this contest: the ballot cannot
                // be checked against the election description. Treat as a
                // limit failure rather than panicking or skipping silently.
                limit_ok = false;
                report.push(
                    crate::errors::FailureKind::PlaceholderCountError(format!(
                        "no vote limit declared for contest {}",
                        contest.object_id
                    )),
                    location.clone(),
                );
                continue;
            }
        };

        let outcome = verify_contest(ctx, contest, l_max);
        if !outcome.encryption_ok {
            encryption_ok = false;
        }
        if !outcome.limit_ok {
            limit_ok = false;
        }
        report.merge(outcome.report);
    }

    BallotOutcome {
        encryption_ok,
        limit_ok,
        report,
    }
}
