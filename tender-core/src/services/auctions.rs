use super::RepoError;
use crate::models::{
    AuctionData, AuctionFailure, AuctionId, AuctionRecord, AuctionStatus, UserId,
};
use crate::ports::{Application, AuctionRepository};

/// Buyer-facing auction lifecycle: posting, amending, and withdrawing jobs.
///
/// Auctions are born pending and their terms freeze once bidding opens:
/// updates are permitted only while still pending, so sellers never bid
/// against a moving target. Deletion is owner-only and explicitly removes
/// the auction's offers and subscriptions with it.
pub struct AuctionService<'a, A: Application> {
    app: &'a A,
}

impl<'a, A: Application> AuctionService<'a, A> {
    /// Build an auction service over the given application.
    pub fn new(app: &'a A) -> Self {
        Self { app }
    }

    /// Post a new job for tender.
    ///
    /// The schedule is validated against the application clock: both
    /// timestamps strictly in the future, and a bidding window of at least
    /// 24 hours.
    pub async fn create_auction(
        &self,
        owner: UserId,
        data: AuctionData,
    ) -> Result<Result<AuctionRecord, AuctionFailure>, RepoError<A>> {
        let now = self.app.now();
        if let Err(error) = data.validate(now) {
            return Ok(Err(error.into()));
        }

        let id = self.app.generate_auction_id();
        Ok(Ok(self
            .app
            .database()
            .create_auction(id, owner, data, now)
            .await?))
    }

    /// Replace the job data of a still-pending auction.
    pub async fn update_auction(
        &self,
        auction_id: AuctionId,
        requester: UserId,
        data: AuctionData,
    ) -> Result<Result<AuctionRecord, AuctionFailure>, RepoError<A>> {
        let db = self.app.database();
        let Some(auction) = db.get_auction(auction_id).await? else {
            return Ok(Err(AuctionFailure::DoesNotExist));
        };
        if auction.owner != requester {
            return Ok(Err(AuctionFailure::AccessDenied));
        }
        if auction.status != AuctionStatus::Pending {
            return Ok(Err(AuctionFailure::WrongState {
                required: AuctionStatus::Pending,
                actual: auction.status,
            }));
        }
        if let Err(error) = data.validate(self.app.now()) {
            return Ok(Err(error.into()));
        }

        match db.update_auction(auction_id, data).await? {
            Some(record) => Ok(Ok(record)),
            // The pending guard failed inside the write: the reconciler
            // opened (or someone deleted) the auction under us.
            None => match db.get_auction(auction_id).await? {
                Some(auction) => Ok(Err(AuctionFailure::WrongState {
                    required: AuctionStatus::Pending,
                    actual: auction.status,
                })),
                None => Ok(Err(AuctionFailure::DoesNotExist)),
            },
        }
    }

    /// Withdraw an auction, cascading away its offers and subscriptions.
    pub async fn delete_auction(
        &self,
        auction_id: AuctionId,
        requester: UserId,
    ) -> Result<Result<(), AuctionFailure>, RepoError<A>> {
        let db = self.app.database();
        let Some(auction) = db.get_auction(auction_id).await? else {
            return Ok(Err(AuctionFailure::DoesNotExist));
        };
        if auction.owner != requester {
            return Ok(Err(AuctionFailure::AccessDenied));
        }

        if db.delete_auction(auction_id).await? {
            Ok(Ok(()))
        } else {
            Ok(Err(AuctionFailure::DoesNotExist))
        }
    }

    /// Fetch a single auction.
    pub async fn get_auction(
        &self,
        auction_id: AuctionId,
    ) -> Result<Option<AuctionRecord>, RepoError<A>> {
        self.app.database().get_auction(auction_id).await
    }

    /// All auctions currently in `status`.
    pub async fn list_by_status(
        &self,
        status: AuctionStatus,
    ) -> Result<Vec<AuctionRecord>, RepoError<A>> {
        self.app.database().list_by_status(status).await
    }

    /// All auctions posted by `owner`, optionally narrowed to one status.
    pub async fn list_by_owner(
        &self,
        owner: UserId,
        status: Option<AuctionStatus>,
    ) -> Result<Vec<AuctionRecord>, RepoError<A>> {
        self.app.database().list_by_owner(owner, status).await
    }

    /// All auctions `user` is subscribed to.
    pub async fn list_subscribed(
        &self,
        user: UserId,
    ) -> Result<Vec<AuctionRecord>, RepoError<A>> {
        self.app.database().list_subscribed(user).await
    }
}
