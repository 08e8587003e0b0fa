use super::{MarketplaceRepository, Notifier};
use crate::models::{AuctionId, OfferId, SubscriptionId};
use time::OffsetDateTime;

/// The application seam the engine's services hang off.
///
/// An application supplies the concrete repository and notification channel,
/// the clock, and id generation. Keeping the clock here (rather than calling
/// `now_utc()` inline) is what makes the time-driven state machine testable:
/// tests install an application whose `now()` they control and drive the
/// reconciler through hour boundaries without sleeping.
pub trait Application: Send + Sync {
    /// The persistence backend
    type Repository: MarketplaceRepository + Send + Sync;
    /// The notification delivery channel
    type Notifier: Notifier + Send + Sync;

    /// Access the persistence backend
    fn database(&self) -> &Self::Repository;

    /// Access the notification channel
    fn notifier(&self) -> &Self::Notifier;

    /// The current time
    fn now(&self) -> OffsetDateTime;

    /// Mint an id for a new auction
    fn generate_auction_id(&self) -> AuctionId;

    /// Mint an id for a new offer
    fn generate_offer_id(&self) -> OfferId;

    /// Mint an id for a new subscription
    fn generate_subscription_id(&self) -> SubscriptionId;
}
