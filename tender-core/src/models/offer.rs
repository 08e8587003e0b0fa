use super::{AuctionId, OfferId, UserId, ValidationError, auction::MIN_DELIVERY_DAYS};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A strictly positive money amount with a granularity of 0.01.
///
/// Stored as an integer count of hundredths, so arithmetic and equality are
/// exact. Serialized as a decimal string (`"8.50"`); deserialization
/// validates, so an untrusted source cannot produce a zero or negative price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Price(i64);

impl Price {
    /// Build a price from a count of hundredths (`850` → `8.50`).
    pub fn from_minor(minor: i64) -> Result<Self, ValidationError> {
        if minor <= 0 {
            Err(ValidationError::NonPositivePrice)
        } else {
            Ok(Self(minor))
        }
    }

    /// The price as a count of hundredths
    pub fn minor(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl std::str::FromStr for Price {
    type Err = ValidationError;

    /// Parse a decimal string with at most two fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::MalformedPrice(s.to_string());

        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };
        if whole.is_empty() || frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(malformed());
        }
        // Sign handling: "-0.50" has a non-negative whole part, so the sign
        // must be rejected before recombining.
        if whole.starts_with('-') {
            return Err(malformed());
        }
        let whole: i64 = whole.parse().map_err(|_| malformed())?;
        let frac: i64 = if frac.is_empty() {
            0
        } else if frac.len() == 1 {
            frac.parse::<i64>().map_err(|_| malformed())? * 10
        } else {
            frac.parse().map_err(|_| malformed())?
        };

        let minor = whole
            .checked_mul(100)
            .and_then(|minor| minor.checked_add(frac))
            .ok_or_else(malformed)?;
        Self::from_minor(minor)
    }
}

impl TryFrom<String> for Price {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Price> for String {
    fn from(value: Price) -> Self {
        value.to_string()
    }
}

/// The seller-controlled terms of an offer: how fast, and for how much.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferTerms {
    /// Proposed delivery time in days
    pub delivery_days: i64,
    /// Proposed price
    pub price: Price,
}

impl OfferTerms {
    /// Check the terms against the domain rules.
    ///
    /// The price bound is already enforced by [`Price`]'s constructors; this
    /// re-checks it so a future widening of that type cannot silently relax
    /// the ledger's contract.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.delivery_days < MIN_DELIVERY_DAYS {
            return Err(ValidationError::DeliveryTooShort);
        }
        if self.price.minor() <= 0 {
            return Err(ValidationError::NonPositivePrice);
        }
        Ok(())
    }
}

/// A stored offer: one seller's live bid on one auction.
///
/// At most one offer exists per `(auction, seller)` pair; re-submission
/// overwrites the terms in place. The seller reference is immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferRecord {
    /// The offer's identity
    pub id: OfferId,
    /// The auction this offer bids on
    pub auction_id: AuctionId,
    /// The seller who submitted the offer
    pub seller: UserId,
    /// Current terms
    #[serde(flatten)]
    pub terms: OfferTerms,
    /// When the terms were last submitted
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
}
