//! Tagged-record types for the election record.
//!
//! The reference Python implementation carries the record as nested JSON
//! dictionaries throughout; here every entity is parsed once at ingestion
//! into a typed struct, and proof shapes are distinguished by which struct
//! they are rather than by probing a dictionary for optional keys.

use std::collections::HashMap;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// An ElGamal ciphertext `(alpha, beta)`, transported under the record's
/// own field names `pad`/`data`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ciphertext {
    #[serde(with = "util::biguint_serde")]
    pub pad: BigUint,
    #[serde(with = "util::biguint_serde")]
    pub data: BigUint,
}

impl Ciphertext {
    pub fn alpha(&self) -> &BigUint {
        &self.pad
    }

    pub fn beta(&self) -> &BigUint {
        &self.data
    }
}

/// A Chaum-Pedersen disjunctive proof that a selection's ciphertext
/// encrypts 0 or 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisjunctiveChaumPedersenProof {
    #[serde(with = "util::biguint_serde")]
    pub proof_zero_pad: BigUint,
    #[serde(with = "util::biguint_serde")]
    pub proof_zero_data: BigUint,
    #[serde(with = "util::biguint_serde")]
    pub proof_one_pad: BigUint,
    #[serde(with = "util::biguint_serde")]
    pub proof_one_data: BigUint,
    #[serde(with = "util::biguint_serde")]
    pub proof_zero_challenge: BigUint,
    #[serde(with = "util::biguint_serde")]
    pub proof_one_challenge: BigUint,
    #[serde(with = "util::biguint_serde")]
    pub proof_zero_response: BigUint,
    #[serde(with = "util::biguint_serde")]
    pub proof_one_response: BigUint,
}

/// A Chaum-Pedersen constant proof that a contest's aggregate ciphertext
/// encrypts a value equal to its vote limit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConstantChaumPedersenProof {
    #[serde(with = "util::biguint_serde")]
    pub pad: BigUint,
    #[serde(with = "util::biguint_serde")]
    pub data: BigUint,
    #[serde(with = "util::biguint_serde")]
    pub challenge: BigUint,
    #[serde(with = "util::biguint_serde")]
    pub response: BigUint,
    #[serde(with = "util::decimal_serde")]
    pub constant: u64,
}

/// A Chaum-Pedersen equality proof binding a guardian's decryption share to
/// its public commitment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EqualityChaumPedersenProof {
    #[serde(with = "util::biguint_serde")]
    pub pad: BigUint,
    #[serde(with = "util::biguint_serde")]
    pub data: BigUint,
    #[serde(with = "util::biguint_serde")]
    pub challenge: BigUint,
    #[serde(with = "util::biguint_serde")]
    pub response: BigUint,
}

/// One candidate/option within a contest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selection {
    pub object_id: String,
    #[serde(default)]
    pub is_placeholder_selection: bool,
    pub ciphertext: Ciphertext,
    pub proof: DisjunctiveChaumPedersenProof,
}

/// A group of selections over which a voter may cast up to `votes_allowed` votes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contest {
    pub object_id: String,
    #[serde(with = "util::decimal_serde")]
    pub sequence_order: u64,
    pub ballot_selections: Vec<Selection>,
    pub proof: ConstantChaumPedersenProof,
}

/// Whether a ballot was included in the tally or decrypted individually.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum BallotState {
    Cast,
    Spoiled,
}

/// An ordered set of contests under a ballot style.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ballot {
    pub object_id: String,
    pub state: BallotState,
    pub contests: Vec<Contest>,
}

/// Guardian `i`'s contribution to decrypting a ciphertext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptionShare {
    pub guardian_id: String,
    #[serde(with = "util::biguint_serde")]
    pub share: BigUint,
    pub proof: EqualityChaumPedersenProof,
}

/// A single selection's accumulated ciphertext and the guardian shares
/// decrypting it, as found under `tally.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TallySelection {
    pub message: Ciphertext,
    #[serde(default)]
    pub shares: Vec<DecryptionShare>,
}

/// The per-contest map of tallied selections.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TallyContest {
    pub selections: HashMap<String, TallySelection>,
}

/// The homomorphic tally: per-contest, per-selection accumulated
/// ciphertext plus the guardian decryption shares for it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Tally {
    pub contests: HashMap<String, TallyContest>,
}

/// A selection on an individually-decrypted spoiled ballot, together with
/// the guardian shares decrypting that ballot's own ciphertext (as opposed
/// to an aggregate across cast ballots).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpoiledSelectionShares {
    pub object_id: String,
    pub message: Ciphertext,
    #[serde(default)]
    pub shares: Vec<DecryptionShare>,
}

/// A contest on a spoiled ballot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpoiledContest {
    pub object_id: String,
    pub selections: Vec<SpoiledSelectionShares>,
}

/// A ballot decrypted individually for the voter and excluded from the tally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpoiledBallot {
    pub object_id: String,
    pub contests: Vec<SpoiledContest>,
}

/// One guardian's public commitment, read from `coefficients/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardianCoefficients {
    pub object_id: String,
    #[serde(with = "biguint_vec_serde")]
    pub coefficient_commitments: Vec<BigUint>,
}

impl GuardianCoefficients {
    /// The guardian's public key `K_i`, the zeroth coefficient commitment.
    pub fn public_key(&self) -> Option<&BigUint> {
        self.coefficient_commitments.first()
    }
}

mod biguint_vec_serde {
    use num_bigint::BigUint;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(transparent)]
    struct Elem(#[serde(with = "util::biguint_serde")] BigUint);

    pub fn serialize<S: Serializer>(v: &[BigUint], s: S) -> Result<S::Ok, S::Error> {
        let wrapped: Vec<Elem> = v.iter().cloned().map(Elem).collect();
        wrapped.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<BigUint>, D::Error> {
        let wrapped = Vec::<Elem>::deserialize(d)?;
        Ok(wrapped.into_iter().map(|Elem(v)| v).collect())
    }
}

/// The fixed group parameters, shipped per the record format version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constants {
    #[serde(with = "util::biguint_serde")]
    pub large_prime: BigUint,
    #[serde(with = "util::biguint_serde")]
    pub small_prime: BigUint,
    #[serde(with = "util::biguint_serde")]
    pub cofactor: BigUint,
    #[serde(with = "util::biguint_serde")]
    pub generator: BigUint,
}

/// The election-wide cryptographic context, read from `context.json` plus
/// the vote limits from `description.json` and the guardian keys from
/// `coefficients/`.
#[derive(Debug, Clone)]
pub struct ElectionContext {
    pub p: BigUint,
    pub q: BigUint,
    pub r: BigUint,
    pub g: BigUint,
    /// The joint public key `K`.
    pub k: BigUint,
    /// The base hash `Q`.
    pub crypto_base_hash: BigUint,
    /// The extended base hash `Q-bar`, the domain separator for every
    /// Fiat-Shamir transcript in the record.
    pub crypto_extended_base_hash: BigUint,
    pub number_of_guardians: u32,
    pub quorum: u32,
    /// Guardian public keys `K_i`, keyed by guardian `object_id`.
    pub guardian_public_keys: HashMap<String, BigUint>,
    /// Per-contest vote limit `L_max`, keyed by contest `object_id`.
    pub vote_limits: HashMap<String, u64>,
}

/// The fully-ingested election record.
#[derive(Debug, Clone)]
pub struct Record {
    pub context: ElectionContext,
    pub ballots: Vec<Ballot>,
    pub spoiled_ballots: Vec<SpoiledBallot>,
    pub tally: Tally,
}

impl Record {
    /// Cast ballots only (state `CAST`), in document order.
    pub fn cast_ballots(&self) -> impl Iterator<Item = &Ballot> {
        self.ballots.iter().filter(|b| b.state == BallotState::Cast)
    }
}
