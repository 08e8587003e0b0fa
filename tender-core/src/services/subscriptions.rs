use super::RepoError;
use crate::models::{AuctionFailure, AuctionId, SubscriptionRecord, UserId};
use crate::ports::{Application, AuctionRepository, SubscriptionRepository};

/// Manages interest registrations for an auction.
pub struct SubscriptionRegistry<'a, A: Application> {
    app: &'a A,
}

impl<'a, A: Application> SubscriptionRegistry<'a, A> {
    /// Build a registry over the given application.
    pub fn new(app: &'a A) -> Self {
        Self { app }
    }

    /// Register `user`'s interest in an auction.
    ///
    /// A second subscription by the same user is a conflict, not a no-op.
    pub async fn subscribe(
        &self,
        auction_id: AuctionId,
        user: UserId,
    ) -> Result<Result<SubscriptionRecord, AuctionFailure>, RepoError<A>> {
        let db = self.app.database();
        if db.get_auction(auction_id).await?.is_none() {
            return Ok(Err(AuctionFailure::DoesNotExist));
        }

        let id = self.app.generate_subscription_id();
        if db.insert_subscription(id, auction_id, user).await? {
            Ok(Ok(SubscriptionRecord {
                id,
                auction_id,
                user,
            }))
        } else {
            Ok(Err(AuctionFailure::Conflict))
        }
    }

    /// Remove `user`'s subscription to an auction.
    pub async fn unsubscribe(
        &self,
        auction_id: AuctionId,
        user: UserId,
    ) -> Result<Result<(), AuctionFailure>, RepoError<A>> {
        if self
            .app
            .database()
            .remove_subscription(auction_id, user)
            .await?
        {
            Ok(Ok(()))
        } else {
            Ok(Err(AuctionFailure::DoesNotExist))
        }
    }

    /// Whether `user` is subscribed to the auction.
    pub async fn is_subscribed(
        &self,
        auction_id: AuctionId,
        user: UserId,
    ) -> Result<bool, RepoError<A>> {
        self.app.database().is_subscribed(auction_id, user).await
    }
}
