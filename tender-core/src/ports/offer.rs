use crate::models::{AuctionId, OfferId, OfferRecord, OfferTerms, UserId};
use std::future::Future;
use time::OffsetDateTime;

/// Repository interface for the offer ledger.
///
/// Offers are unique per `(auction, seller)` pair. The write path is an
/// upsert: a second submission by the same seller replaces the stored terms
/// rather than creating a duplicate. Upserts for one pair must be
/// linearized by the implementation (the reference backend serializes all
/// writes through a single connection).
pub trait OfferRepository: super::AuctionRepository {
    /// Insert or overwrite the offer for `(auction_id, seller)`, atomically
    /// guarded on the parent auction being open.
    ///
    /// The guard lives inside the write so a submission racing the closing
    /// transition cannot slip in after the auction leaves
    /// [`AuctionStatus::Open`](crate::models::AuctionStatus::Open).
    /// `offer_id` is used only when a new row is created; an existing offer
    /// keeps its identity.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` with the stored offer if the guard held
    /// - `Ok(None)` if the parent auction is missing or not open
    fn upsert_offer(
        &self,
        offer_id: OfferId,
        auction_id: AuctionId,
        seller: UserId,
        terms: OfferTerms,
        timestamp: OffsetDateTime,
    ) -> impl Future<Output = Result<Option<OfferRecord>, Self::Error>> + Send;

    /// Fetch an offer by id, returning `None` if it does not exist.
    fn get_offer(
        &self,
        offer_id: OfferId,
    ) -> impl Future<Output = Result<Option<OfferRecord>, Self::Error>> + Send;

    /// Fetch the offer a seller has on an auction, if any.
    fn find_offer(
        &self,
        auction_id: AuctionId,
        seller: UserId,
    ) -> impl Future<Output = Result<Option<OfferRecord>, Self::Error>> + Send;

    /// Remove an offer.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the offer existed.
    fn delete_offer(
        &self,
        offer_id: OfferId,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// All offers on an auction, regardless of auction state.
    ///
    /// Winner selection happens after close, so reads must not be gated on
    /// the lifecycle the way writes are.
    fn list_offers(
        &self,
        auction_id: AuctionId,
    ) -> impl Future<Output = Result<Vec<OfferRecord>, Self::Error>> + Send;
}
