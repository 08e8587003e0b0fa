use super::{NotificationDispatcher, RepoError};
use crate::models::{
    AuctionFailure, AuctionId, AuctionRecord, AuctionStatus, LifecycleEvent, OfferId, UserId,
};
use crate::ports::{Application, AuctionRepository, OfferRepository, SubscriptionRepository};
use tracing::warn;

/// Finalizes a closed auction by recording the owner's chosen offer.
///
/// This is a manual, one-shot decision: there is no automatic lowest-price
/// rule anywhere in the engine. The winner field transitions from unset to
/// set exactly once, enforced by compare-and-set, and is immutable after.
pub struct WinnerAssignment<'a, A: Application> {
    app: &'a A,
}

impl<'a, A: Application> WinnerAssignment<'a, A> {
    /// Build a winner-assignment service over the given application.
    pub fn new(app: &'a A) -> Self {
        Self { app }
    }

    /// Record the seller behind `offer_id` as the auction's winner.
    ///
    /// Only the auction owner may call this, only on a closed auction with
    /// no winner yet, and only with an offer that belongs to this auction.
    /// On success the chosen seller is notified that they won and every
    /// other subscriber that they did not.
    pub async fn assign_winner(
        &self,
        auction_id: AuctionId,
        offer_id: OfferId,
        requester: UserId,
    ) -> Result<Result<AuctionRecord, AuctionFailure>, RepoError<A>> {
        let db = self.app.database();

        let Some(mut auction) = db.get_auction(auction_id).await? else {
            return Ok(Err(AuctionFailure::DoesNotExist));
        };
        if auction.owner != requester {
            return Ok(Err(AuctionFailure::AccessDenied));
        }
        if auction.status != AuctionStatus::Closed {
            return Ok(Err(AuctionFailure::WrongState {
                required: AuctionStatus::Closed,
                actual: auction.status,
            }));
        }
        if auction.winner.is_some() {
            return Ok(Err(AuctionFailure::AlreadyDecided));
        }

        let Some(offer) = db.get_offer(offer_id).await? else {
            return Ok(Err(AuctionFailure::DoesNotExist));
        };
        if offer.auction_id != auction_id {
            // an offer from some other auction does not exist *here*
            return Ok(Err(AuctionFailure::DoesNotExist));
        }

        if !db.record_winner(auction_id, offer.seller).await? {
            // lost a race with a concurrent assignment
            return Ok(Err(AuctionFailure::AlreadyDecided));
        }
        auction.winner = Some(offer.seller);

        let dispatcher = NotificationDispatcher::new(self.app);
        dispatcher
            .dispatch(&auction, LifecycleEvent::Won, &[offer.seller])
            .await;

        match db.list_subscribers(auction_id).await {
            Ok(subscribers) => {
                let others: Vec<UserId> = subscribers
                    .into_iter()
                    .filter(|user| *user != offer.seller)
                    .collect();
                dispatcher
                    .dispatch(&auction, LifecycleEvent::Lost, &others)
                    .await;
            }
            Err(error) => {
                warn!(auction_id = %auction_id, %error, "could not load subscribers; loss fan-out skipped");
            }
        }

        Ok(Ok(auction))
    }
}
