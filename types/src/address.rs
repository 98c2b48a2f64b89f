//! Opaque account address.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An account that can hold shares, author proposals and vote.
///
/// The governance engine never interprets the address; it is only compared
/// and hashed. Surrounding whitespace is not allowed, and deserialisation
/// goes through the same check as [`AccountAddress::parse`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct AccountAddress(String);

impl AccountAddress {
    /// Create an address from a raw string without validation.
    ///
    /// Use [`AccountAddress::parse`] for untrusted input.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Parse an address from untrusted input.
    pub fn parse(raw: &str) -> Result<Self, TypesError> {
        Self::try_from(raw.to_string())
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-empty and free of surrounding whitespace.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && self.0.trim() == self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AccountAddress {
    type Error = TypesError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        let address = Self(raw);
        if !address.is_valid() {
            return Err(TypesError::InvalidAddress(address.0));
        }
        Ok(address)
    }
}

impl FromStr for AccountAddress {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
