use super::RepoError;
use crate::models::{
    AuctionFailure, AuctionId, AuctionStatus, OfferId, OfferRecord, OfferTerms, UserId,
};
use crate::ports::{Application, AuctionRepository, OfferRepository};

/// Accepts, replaces, and removes competing bids.
///
/// One seller holds at most one live offer per auction: submission is an
/// upsert, never a duplicate. Writes are only legal while the parent
/// auction is open; reads are legal in any state, since winner selection
/// happens after close.
pub struct OfferLedger<'a, A: Application> {
    app: &'a A,
}

impl<'a, A: Application> OfferLedger<'a, A> {
    /// Build a ledger over the given application.
    pub fn new(app: &'a A) -> Self {
        Self { app }
    }

    /// Submit (or re-submit) `seller`'s offer on an auction.
    ///
    /// Re-submission overwrites the existing offer's terms in place. The
    /// open-state requirement is checked up front for a precise failure, and
    /// again inside the write itself, so a submission racing the closing
    /// transition cannot land after the auction closes.
    pub async fn submit_offer(
        &self,
        auction_id: AuctionId,
        seller: UserId,
        terms: OfferTerms,
    ) -> Result<Result<OfferRecord, AuctionFailure>, RepoError<A>> {
        if let Err(error) = terms.validate() {
            return Ok(Err(error.into()));
        }

        let db = self.app.database();
        let Some(auction) = db.get_auction(auction_id).await? else {
            return Ok(Err(AuctionFailure::DoesNotExist));
        };
        if auction.status != AuctionStatus::Open {
            return Ok(Err(AuctionFailure::WrongState {
                required: AuctionStatus::Open,
                actual: auction.status,
            }));
        }

        let offer_id = self.app.generate_offer_id();
        let timestamp = self.app.now();
        match db
            .upsert_offer(offer_id, auction_id, seller, terms, timestamp)
            .await?
        {
            Some(record) => Ok(Ok(record)),
            // The in-write guard failed: the auction moved under us between
            // the read above and the write.
            None => match db.get_auction(auction_id).await? {
                Some(auction) => Ok(Err(AuctionFailure::WrongState {
                    required: AuctionStatus::Open,
                    actual: auction.status,
                })),
                None => Ok(Err(AuctionFailure::DoesNotExist)),
            },
        }
    }

    /// Remove an offer, at its seller's request, while bidding is open.
    pub async fn delete_offer(
        &self,
        offer_id: OfferId,
        requester: UserId,
    ) -> Result<Result<(), AuctionFailure>, RepoError<A>> {
        let db = self.app.database();
        let Some(offer) = db.get_offer(offer_id).await? else {
            return Ok(Err(AuctionFailure::DoesNotExist));
        };
        if offer.seller != requester {
            return Ok(Err(AuctionFailure::AccessDenied));
        }

        let Some(auction) = db.get_auction(offer.auction_id).await? else {
            return Ok(Err(AuctionFailure::DoesNotExist));
        };
        if auction.status != AuctionStatus::Open {
            return Ok(Err(AuctionFailure::WrongState {
                required: AuctionStatus::Open,
                actual: auction.status,
            }));
        }

        if db.delete_offer(offer_id).await? {
            Ok(Ok(()))
        } else {
            Ok(Err(AuctionFailure::DoesNotExist))
        }
    }

    /// Every offer on an auction, in any lifecycle state.
    pub async fn list_offers(
        &self,
        auction_id: AuctionId,
    ) -> Result<Result<Vec<OfferRecord>, AuctionFailure>, RepoError<A>> {
        let db = self.app.database();
        if db.get_auction(auction_id).await?.is_none() {
            return Ok(Err(AuctionFailure::DoesNotExist));
        }
        Ok(Ok(db.list_offers(auction_id).await?))
    }
}
