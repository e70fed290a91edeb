//! Error types used across the verification engine.
//!
//! [`IngestError`] is fatal to the run: if a file is missing or malformed we
//! cannot proceed at all. [`FailureKind`] is the opposite — it is plain data
//! describing a verification check that did not hold, collected into a
//! [`crate::report::Report`] rather than propagated as a Rust `Error`, since
//! a single bad proof should not stop the rest of the record from being
//! checked.

use serde::Serialize;
use thiserror::Error;

/// Fatal errors encountered while reading and parsing an election record.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("could not read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid JSON")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} is missing required field {field:?}")]
    MissingField { path: String, field: String },

    #[error("{path} field {field:?} has value {value:?}, which is not a decimal integer")]
    InvalidInteger {
        path: String,
        field: String,
        value: String,
    },

    #[error("{path}: {detail}")]
    UnexpectedShape { path: String, detail: String },

    #[error("{0}")]
    AnyhowError(String),
}

impl From<anyhow::Error> for IngestError {
    fn from(e: anyhow::Error) -> Self {
        IngestError::AnyhowError(format!("{e:#}"))
    }
}

/// The taxonomy of ways a verification check can fail, per the error
/// handling design: every variant here is fatal to the verdict but never to
/// the run — checking continues and failures accumulate in the [`Report`](crate::report::Report).
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail")]
pub enum FailureKind {
    /// The baseline parameter check (p, q, r, g) did not hold.
    #[error("parameter check failed: {0}")]
    ParameterError(String),

    /// A number was outside `Z_q` or the order-`q` subgroup of `Z_p*`.
    #[error("membership check failed: {0}")]
    MembershipError(String),

    /// A recomputed Fiat-Shamir challenge did not match the stored one.
    #[error("challenge mismatch: {0}")]
    ChallengeMismatch(String),

    /// A proof equation did not hold.
    #[error("equation failure: {0}")]
    EquationFailure(String),

    /// A contest's placeholder count did not match its vote limit.
    #[error("placeholder count error: {0}")]
    PlaceholderCountError(String),

    /// The recorded tally ciphertext did not equal the product of cast ballots.
    #[error("aggregation mismatch: {0}")]
    AggregationMismatch(String),

    /// Fewer than `quorum` decryption shares were present for a selection.
    #[error("missing share: {0}")]
    MissingShare(String),
}
