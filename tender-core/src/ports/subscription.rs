use crate::models::{AuctionId, SubscriptionId, UserId};
use std::future::Future;

/// Repository interface for interest registrations.
///
/// Subscriptions are unique per `(auction, user)`; the boolean returns
/// encode duplicate/absent so the registry can surface conflict and
/// not-found failures without a read-modify-write race.
pub trait SubscriptionRepository: super::OfferRepository {
    /// Register `user`'s interest in an auction.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the subscription was created; `Ok(false)` if one
    /// already existed for this pair.
    fn insert_subscription(
        &self,
        subscription_id: SubscriptionId,
        auction_id: AuctionId,
        user: UserId,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Remove `user`'s subscription to an auction.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if a subscription existed and was removed.
    fn remove_subscription(
        &self,
        auction_id: AuctionId,
        user: UserId,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Whether `user` is subscribed to the auction.
    fn is_subscribed(
        &self,
        auction_id: AuctionId,
        user: UserId,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Every user subscribed to the auction.
    fn list_subscribers(
        &self,
        auction_id: AuctionId,
    ) -> impl Future<Output = Result<Vec<UserId>, Self::Error>> + Send;
}
