use super::{AuctionId, CategoryId, UserId, ValidationError};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// The minimum length of the bidding window between `start_at` and `end_at`.
pub const MIN_BIDDING_WINDOW: Duration = Duration::hours(24);

/// The minimum desired delivery offset, in days.
pub const MIN_DELIVERY_DAYS: i64 = 1;

/// The lifecycle state of an auction.
///
/// States are strictly ordered: an auction is created `Pending`, opens for
/// bidding once its start time passes, and closes once its end time passes.
/// Transitions are one-directional and never skip a state; only the
/// reconciler advances them, one compare-and-set per edge.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuctionStatus {
    /// Created but not yet open for bidding
    Pending,
    /// Accepting offers
    Open,
    /// Bidding has ended; awaiting (or past) winner selection
    Closed,
}

impl AuctionStatus {
    /// The canonical storage/wire spelling of this status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
        }
    }
}

impl std::fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AuctionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "OPEN" => Ok(Self::Open),
            "CLOSED" => Ok(Self::Closed),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// The buyer-authored description of the job being tendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDetails {
    /// Short human-readable title
    pub title: String,
    /// Free-form description of the work
    pub description: String,
    /// Categories the job is filed under
    pub categories: Vec<CategoryId>,
}

/// The mutable portion of an auction, as supplied on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionData {
    /// What the buyer wants done
    pub details: JobDetails,
    /// Desired delivery offset in days, counted from winner selection
    pub delivery_days: i64,
    /// When bidding opens
    #[serde(with = "time::serde::rfc3339")]
    pub start_at: OffsetDateTime,
    /// When bidding closes
    #[serde(with = "time::serde::rfc3339")]
    pub end_at: OffsetDateTime,
}

impl AuctionData {
    /// Check the schedule and job fields against the domain rules.
    ///
    /// Both timestamps must lie strictly in the future relative to `now`,
    /// the end must follow the start, and the bidding window must cover at
    /// least [`MIN_BIDDING_WINDOW`].
    pub fn validate(&self, now: OffsetDateTime) -> Result<(), ValidationError> {
        if self.details.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.delivery_days < MIN_DELIVERY_DAYS {
            return Err(ValidationError::DeliveryTooShort);
        }
        if self.start_at <= now {
            return Err(ValidationError::StartNotFuture);
        }
        if self.end_at <= self.start_at {
            return Err(ValidationError::EndBeforeStart);
        }
        if self.end_at - self.start_at < MIN_BIDDING_WINDOW {
            return Err(ValidationError::WindowTooShort);
        }
        Ok(())
    }
}

/// A stored auction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionRecord {
    /// The auction's identity
    pub id: AuctionId,
    /// The buyer who posted the job; the only user who may update, delete,
    /// or assign a winner
    pub owner: UserId,
    /// Job description and scheduling data
    #[serde(flatten)]
    pub data: AuctionData,
    /// Current lifecycle state
    pub status: AuctionStatus,
    /// The seller whose offer was selected; `None` until the owner decides,
    /// immutable afterwards
    pub winner: Option<UserId>,
    /// When the ending-soon fan-out was performed, if it has been.
    /// Claimed by compare-and-set so the event fires once per auction.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub ending_soon_at: Option<OffsetDateTime>,
    /// When the auction was created
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
