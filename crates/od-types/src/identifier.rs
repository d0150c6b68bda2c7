//! Player identifier normalization.
//!
//! Visitors can paste either the short account id OpenDota uses natively
//! (e.g. `111620041`) or a 64-bit Steam community id
//! (e.g. `76561198071885769`). Both resolve to the same [`AccountId`].
//!
//! # Rules
//!
//! - Up to [`MAX_ACCOUNT_ID_DIGITS`] digits: already an account id, passed
//!   through unchanged.
//! - Longer: a community id, converted by subtracting [`STEAM_ID_BASE`].
//!
//! No network access happens here.

use crate::TypeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Base of the Steam community id namespace.
pub const STEAM_ID_BASE: u64 = 76_561_197_960_265_728;

/// Inputs with at most this many digits are treated as account ids.
pub const MAX_ACCOUNT_ID_DIGITS: usize = 10;

/// A raw identifier, tagged with the namespace it was given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerIdentifier {
    /// Short-form account id, as used by the OpenDota API.
    Account(u64),
    /// 64-bit Steam community id.
    Community(u64),
}

impl PlayerIdentifier {
    /// Parse a user-supplied identifier.
    ///
    /// Surrounding whitespace is ignored. Anything other than ASCII digits
    /// (signs, decimal points, empty input) is rejected.
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        let digits = raw.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypeError::InvalidIdentifier(raw.to_string()));
        }

        let value: u64 = digits
            .parse()
            .map_err(|_| TypeError::InvalidIdentifier(raw.to_string()))?;

        if digits.len() <= MAX_ACCOUNT_ID_DIGITS {
            Ok(Self::Account(value))
        } else {
            Ok(Self::Community(value))
        }
    }

    /// Returns true if the input was a community id.
    pub fn is_community(&self) -> bool {
        matches!(self, Self::Community(_))
    }

    /// The account number this identifier maps to.
    ///
    /// Signed because a community id below [`STEAM_ID_BASE`] maps to a
    /// negative number. Such values never correspond to a real account.
    pub fn account_number(&self) -> i128 {
        match *self {
            Self::Account(id) => i128::from(id),
            Self::Community(id) => i128::from(id) - i128::from(STEAM_ID_BASE),
        }
    }
}

/// Normalize a raw identifier into the decimal account id string.
///
/// Account ids are returned exactly as given (after trimming). Community ids
/// are shifted by [`STEAM_ID_BASE`]; the result may be negative for
/// synthetic inputs below the base, which [`AccountId::resolve`] rejects.
///
/// # Example
///
/// ```rust
/// use od_types::normalize_identifier;
///
/// assert_eq!(normalize_identifier("76561198021931370").unwrap(), "61665642");
/// assert_eq!(normalize_identifier("111620041").unwrap(), "111620041");
/// ```
pub fn normalize_identifier(raw: &str) -> Result<String, TypeError> {
    match PlayerIdentifier::parse(raw)? {
        PlayerIdentifier::Account(_) => Ok(raw.trim().to_string()),
        community => Ok(community.account_number().to_string()),
    }
}

/// Canonical OpenDota account id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(u32);

impl AccountId {
    /// Wrap an already-canonical account id.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Resolve a user-supplied identifier into an account id.
    ///
    /// Fails with [`TypeError::InvalidIdentifier`] for non-numeric input and
    /// [`TypeError::IdentifierOutOfRange`] when the normalized value is
    /// negative or larger than 32 bits.
    pub fn resolve(raw: &str) -> Result<Self, TypeError> {
        let resolved = PlayerIdentifier::parse(raw)?.account_number();
        u32::try_from(resolved)
            .map(Self)
            .map_err(|_| TypeError::IdentifierOutOfRange {
                raw: raw.trim().to_string(),
                resolved,
            })
    }

    /// The numeric value.
    #[inline]
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for AccountId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
