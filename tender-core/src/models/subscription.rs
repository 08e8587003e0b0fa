use super::{AuctionId, SubscriptionId, UserId};
use serde::{Deserialize, Serialize};

/// A user's registration of interest in an auction.
///
/// Subscriptions exist purely to drive notification fan-out and carry no
/// other state. They are unique per `(auction, user)` pair: subscribing
/// twice is a conflict, not a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    /// The subscription's identity
    pub id: SubscriptionId,
    /// The auction being watched
    pub auction_id: AuctionId,
    /// The interested user
    pub user: UserId,
}
