//! Loads an election record from the filesystem layout into the typed
//! structures in [`crate::record`].
//!
//! Every malformed or missing input is an [`IngestError`] and aborts the
//! run immediately: there is no meaningful way to check proofs over a
//! record that failed to parse.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use num_bigint::BigUint;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::IngestError;
use crate::record::{
    Ballot, Constants, ElectionContext, GuardianCoefficients, Record, SpoiledBallot, Tally,
};

fn read_json(path: &Path) -> Result<Value, IngestError> {
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| IngestError::Json {
        path: path.display().to_string(),
        source,
    })
}

fn parse_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, IngestError> {
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| IngestError::Json {
        path: path.display().to_string(),
        source,
    })
}

fn decimal_field(value: &Value, path: &Path, field: &str) -> Result<BigUint, IngestError> {
    let raw = value
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| IngestError::MissingField {
            path: path.display().to_string(),
            field: field.to_string(),
        })?;
    raw.parse::<BigUint>()
        .map_err(|_| IngestError::InvalidInteger {
            path: path.display().to_string(),
            field: field.to_string(),
            value: raw.to_string(),
        })
}

/// Parses a bounded integer (`u32`, `u64`, ...) field transported, like every
/// other integer-valued field in the record, as a JSON string of decimal
/// digits rather than a bare number.
fn decimal_int_field<T>(value: &Value, path: &Path, field: &str) -> Result<T, IngestError>
where
    T: std::str::FromStr,
{
    let raw = value
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| IngestError::MissingField {
            path: path.display().to_string(),
            field: field.to_string(),
        })?;
    raw.parse::<T>().map_err(|_| IngestError::InvalidInteger {
        path: path.display().to_string(),
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// The paths making up an election record, either derived from a single
/// `--record` root or assembled from individually-specified paths.
#[derive(Debug, Clone)]
pub struct RecordPaths {
    pub constants: PathBuf,
    pub context: PathBuf,
    pub description: PathBuf,
    pub ballots_dir: PathBuf,
    pub spoiled_ballots_dir: PathBuf,
    pub tally: PathBuf,
    pub coefficients_dir: PathBuf,
}

impl RecordPaths {
    /// Derives the standard layout from a single record root directory.
    pub fn from_record_root(root: &Path) -> Self {
        RecordPaths {
            constants: root.join("constants.json"),
            context: root.join("context.json"),
            description: root.join("description.json"),
            ballots_dir: root.join("encrypted_ballots"),
            spoiled_ballots_dir: root.join("spoiled_ballots"),
            tally: root.join("tally.json"),
            coefficients_dir: root.join("coefficients"),
        }
    }
}

/// Loads and parses a full election record from `paths`.
pub fn ingest_record(paths: &RecordPaths) -> Result<Record, IngestError> {
    let constants: Constants = parse_json(&paths.constants)?;

    let context_raw = read_json(&paths.context)?;
    let p = constants.large_prime.clone();
    let q = constants.small_prime.clone();
    let r = constants.cofactor.clone();
    let g = constants.generator.clone();
    let k = decimal_field(&context_raw, &paths.context, "elgamal_public_key")?;
    let crypto_base_hash = decimal_field(&context_raw, &paths.context, "crypto_base_hash")?;
    let crypto_extended_base_hash =
        decimal_field(&context_raw, &paths.context, "crypto_extended_base_hash")?;
    let number_of_guardians: u32 =
        decimal_int_field(&context_raw, &paths.context, "number_of_guardians")?;
    let quorum: u32 = decimal_int_field(&context_raw, &paths.context, "quorum")?;

    let vote_limits = load_vote_limits(&paths.description)?;
    let guardian_coefficients = load_guardian_coefficients(&paths.coefficients_dir)?;
    let guardian_public_keys = guardian_coefficients
        .iter()
        .filter_map(|c| c.public_key().map(|k| (c.object_id.clone(), k.clone())))
        .collect();

    let context = ElectionContext {
        p,
        q,
        r,
        g,
        k,
        crypto_base_hash,
        crypto_extended_base_hash,
        number_of_guardians,
        quorum,
        guardian_public_keys,
        vote_limits,
    };

    let ballots = load_ballots(&paths.ballots_dir)?;
    let spoiled_ballots = load_spoiled_ballots(&paths.spoiled_ballots_dir)?;
    let tally: Tally = parse_json(&paths.tally)?;

    Ok(Record {
        context,
        ballots,
        spoiled_ballots,
        tally,
    })
}

/// The guardian's public key, keyed by `object_id`, used by `share.rs` and
/// `tally.rs` to look up `K_i` by guardian id.
pub fn guardian_key_map(coefficients_dir: &Path) -> Result<HashMap<String, BigUint>, IngestError> {
    let coefficients = load_guardian_coefficients(coefficients_dir)?;
    Ok(coefficients
        .into_iter()
        .filter_map(|c| c.public_key().cloned().map(|k| (c.object_id, k)))
        .collect())
}

fn load_vote_limits(description_path: &Path) -> Result<HashMap<String, u64>, IngestError> {
    let description = read_json(description_path)?;
    let contests = description
        .get("contests")
        .and_then(Value::as_array)
        .ok_or_else(|| IngestError::MissingField {
            path: description_path.display().to_string(),
            field: "contests".to_string(),
        })?;

    let mut vote_limits = HashMap::new();
    for contest in contests {
        let object_id = contest
            .get("object_id")
            .and_then(Value::as_str)
            .ok_or_else(|| IngestError::MissingField {
                path: description_path.display().to_string(),
                field: "contests[].object_id".to_string(),
            })?;
        let votes_allowed: u64 =
            decimal_int_field(contest, description_path, "contests[].votes_allowed")?;
        vote_limits.insert(object_id.to_string(), votes_allowed);
    }
    Ok(vote_limits)
}

fn load_guardian_coefficients(dir: &Path) -> Result<Vec<GuardianCoefficients>, IngestError> {
    let mut out = Vec::new();
    let entries = std::fs::read_dir(dir).map_err(|source| IngestError::Io {
        path: dir.display().to_string(),
        source,
    })?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    for path in paths {
        out.push(parse_json(&path)?);
    }
    Ok(out)
}

fn load_ballots(dir: &Path) -> Result<Vec<Ballot>, IngestError> {
    let mut out = Vec::new();
    let entries = std::fs::read_dir(dir).map_err(|source| IngestError::Io {
        path: dir.display().to_string(),
        source,
    })?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    for path in paths {
        out.push(parse_json(&path)?);
    }
    Ok(out)
}

fn load_spoiled_ballots(dir: &Path) -> Result<Vec<SpoiledBallot>, IngestError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut out = Vec::new();
    let entries = std::fs::read_dir(dir).map_err(|source| IngestError::Io {
        path: dir.display().to_string(),
        source,
    })?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    for path in paths {
        out.push(parse_json(&path)?);
    }
    Ok(out)
}

/// Ingests a record from a single root directory, the common CLI case.
pub fn ingest_from_root(root: &Path) -> anyhow::Result<Record> {
    if !root.exists() {
        bail!("record directory {} does not exist", root.display());
    }
    let paths = RecordPaths::from_record_root(root);
    ingest_record(&paths).with_context(|| format!("ingesting record from {}", root.display()))
}
