use crate::models::{AuctionData, AuctionId, AuctionRecord, AuctionStatus, UserId};
use std::future::Future;
use time::{Duration, OffsetDateTime};

/// Repository interface for auction storage and lifecycle bookkeeping.
///
/// Besides plain CRUD, this trait carries the compare-and-set primitives the
/// engine's concurrency model rests on: every state transition is a guarded
/// write keyed on the auction id and the state being left behind, so two
/// racing writers produce exactly one winner and the loser simply observes
/// `false`. Implementations must guarantee that property (optimistic
/// version, row-level lock, or a serialized writer).
pub trait AuctionRepository: super::Repository {
    /// Persist a new auction in [`AuctionStatus::Pending`].
    ///
    /// Input validation is the caller's concern; the repository stores what
    /// it is given.
    fn create_auction(
        &self,
        auction_id: AuctionId,
        owner: UserId,
        data: AuctionData,
        timestamp: OffsetDateTime,
    ) -> impl Future<Output = Result<AuctionRecord, Self::Error>> + Send;

    /// Fetch an auction by id, returning `None` if it does not exist.
    fn get_auction(
        &self,
        auction_id: AuctionId,
    ) -> impl Future<Output = Result<Option<AuctionRecord>, Self::Error>> + Send;

    /// Replace the mutable data of an auction, guarded on it still being
    /// [`AuctionStatus::Pending`].
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` with the updated row if the guard held
    /// - `Ok(None)` if the auction is missing or no longer pending
    fn update_auction(
        &self,
        auction_id: AuctionId,
        data: AuctionData,
    ) -> impl Future<Output = Result<Option<AuctionRecord>, Self::Error>> + Send;

    /// Delete an auction together with its offers and subscriptions.
    ///
    /// The cascade is explicit and atomic: children are removed in the same
    /// transaction as the auction row.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the auction existed.
    fn delete_auction(
        &self,
        auction_id: AuctionId,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// All auctions currently in `status`.
    fn list_by_status(
        &self,
        status: AuctionStatus,
    ) -> impl Future<Output = Result<Vec<AuctionRecord>, Self::Error>> + Send;

    /// All auctions posted by `owner`, optionally narrowed to one status.
    fn list_by_owner(
        &self,
        owner: UserId,
        status: Option<AuctionStatus>,
    ) -> impl Future<Output = Result<Vec<AuctionRecord>, Self::Error>> + Send;

    /// All auctions `user` is subscribed to.
    fn list_subscribed(
        &self,
        user: UserId,
    ) -> impl Future<Output = Result<Vec<AuctionRecord>, Self::Error>> + Send;

    /// Pending auctions whose start time has passed as of `now`.
    fn open_due(
        &self,
        now: OffsetDateTime,
    ) -> impl Future<Output = Result<Vec<AuctionRecord>, Self::Error>> + Send;

    /// Open auctions whose end time has passed as of `now`.
    fn close_due(
        &self,
        now: OffsetDateTime,
    ) -> impl Future<Output = Result<Vec<AuctionRecord>, Self::Error>> + Send;

    /// Open auctions ending within `window` of `now` that have not yet had
    /// their ending-soon fan-out performed.
    ///
    /// Auctions whose end time has already passed are excluded; those belong
    /// to [`AuctionRepository::close_due`].
    fn ending_soon_due(
        &self,
        now: OffsetDateTime,
        window: Duration,
    ) -> impl Future<Output = Result<Vec<AuctionRecord>, Self::Error>> + Send;

    /// Compare-and-set the lifecycle state from `from` to `to`.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if this caller performed the transition; `Ok(false)` if
    /// the auction was not in `from` (missing, already advanced, or lost a
    /// race). A lost race is not an error.
    fn advance_status(
        &self,
        auction_id: AuctionId,
        from: AuctionStatus,
        to: AuctionStatus,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Claim the ending-soon fan-out for an auction, guarded on it not
    /// having been claimed before.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if this caller claimed it and should perform the fan-out.
    fn mark_ending_soon(
        &self,
        auction_id: AuctionId,
        timestamp: OffsetDateTime,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Record the winning seller, guarded on the auction being
    /// [`AuctionStatus::Closed`] with no winner yet.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if this caller recorded the winner; `Ok(false)` if the
    /// guard failed (wrong state, already decided, or missing).
    fn record_winner(
        &self,
        auction_id: AuctionId,
        winner: UserId,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
