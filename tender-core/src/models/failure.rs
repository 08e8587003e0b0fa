use super::AuctionStatus;
use thiserror::Error;

/// The ways in which caller-supplied input may be malformed.
///
/// Validation failures are always caller-correctable, reported
/// synchronously, and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The job title is missing or blank
    #[error("title must not be empty")]
    EmptyTitle,
    /// A delivery time below the one-day minimum
    #[error("delivery time must be at least one day")]
    DeliveryTooShort,
    /// A zero or negative price
    #[error("price must be positive")]
    NonPositivePrice,
    /// A price that is not a decimal with at most two fractional digits
    #[error("not a valid price: {0:?}")]
    MalformedPrice(String),
    /// An auction scheduled to start at or before the current time
    #[error("auction must start in the future")]
    StartNotFuture,
    /// An auction scheduled to end at or before it starts
    #[error("auction must end after it starts")]
    EndBeforeStart,
    /// A bidding window shorter than the 24-hour minimum
    #[error("bidding must remain open for at least 24 hours")]
    WindowTooShort,
    /// A lifecycle event name outside the closed kind-set
    #[error("unknown lifecycle event kind: {0:?}")]
    UnknownEvent(String),
    /// An auction status outside the lifecycle
    #[error("unknown auction status: {0:?}")]
    UnknownStatus(String),
}

/// The failure taxonomy shared by every engine operation.
///
/// Each variant corresponds to one externally meaningful failure kind with a
/// stable reason string; callers (e.g. a web layer) map them onto their own
/// error surface. All of these are synchronous domain failures and ride the
/// inner `Result` of an operation; infrastructure errors from the backing
/// store ride the outer `Result` and are never conflated with these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuctionFailure {
    /// Malformed input; see [`ValidationError`] for the specific violation
    #[error("invalid request: {0}")]
    Invalid(#[from] ValidationError),
    /// The operation is not permitted in the auction's current lifecycle
    /// state (e.g. bidding on a closed auction)
    #[error("operation requires a {required} auction, but it is {actual}")]
    WrongState {
        /// The state the operation requires
        required: AuctionStatus,
        /// The state the auction was actually in
        actual: AuctionStatus,
    },
    /// A winner has already been recorded for this auction
    #[error("a winner has already been selected")]
    AlreadyDecided,
    /// The requester does not own the resource. Deliberately distinct from
    /// [`AuctionFailure::DoesNotExist`]: "not yours" is not "not found"
    #[error("requester does not own this resource")]
    AccessDenied,
    /// The referenced auction, offer, or subscription does not exist
    #[error("no such record")]
    DoesNotExist,
    /// A record for this pair already exists (e.g. duplicate subscription)
    #[error("a conflicting record already exists")]
    Conflict,
}
