//! Proposal identifiers.

use crate::error::TypesError;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

type Blake2b256 = Blake2b<U32>;

/// A 32-byte opaque proposal identifier, chosen by the proposal author.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProposalId([u8; 32]);

impl ProposalId {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Derive an identifier from a human-readable label (Blake2b-256 of the UTF-8 bytes).
    pub fn from_label(label: &str) -> Self {
        let digest = Blake2b256::digest(label.as_bytes());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    /// Parse a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypesError> {
        let decoded =
            hex::decode(s).map_err(|e| TypesError::InvalidProposalId(e.to_string()))?;
        let bytes: [u8; 32] = decoded.try_into().map_err(|v: Vec<u8>| {
            TypesError::InvalidProposalId(format!("expected 32 bytes, got {}", v.len()))
        })?;
        Ok(Self(bytes))
    }

}

impl fmt::Debug for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProposalId({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for ProposalId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
