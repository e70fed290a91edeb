//! Shared arithmetic primitives used by the verification engine.
//!
//! This crate has no knowledge of election records, proofs, or reports; it
//! only provides modular-arithmetic helpers, decimal-string serde, and the
//! primality test that the rest of the workspace builds on.

pub mod algebra_utils;
pub mod biguint_serde;
pub mod decimal_serde;
pub mod prime;
