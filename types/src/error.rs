//! Errors raised while constructing fundamental types from untrusted input.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("invalid account address: {0:?}")]
    InvalidAddress(String),

    #[error("invalid proposal id: {0}")]
    InvalidProposalId(String),
}
