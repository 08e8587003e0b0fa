use crate::models::{AuctionRecord, UserId};
use std::future::Future;

/// A delivery channel for lifecycle notifications (e.g. email).
///
/// There is one method per event kind, taking the auction and the recipient
/// as context, so a channel can render each kind however it likes. Delivery
/// failures must surface as `Err`, never be swallowed: the dispatcher is
/// responsible for containing them so one recipient's failure does not
/// starve the rest.
pub trait Notifier {
    /// The channel's delivery error type
    type Error: std::error::Error + Send + Sync + 'static;

    /// Bidding on the auction has opened.
    fn auction_opened(
        &self,
        auction: &AuctionRecord,
        user: UserId,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Bidding on the auction has closed.
    fn auction_closed(
        &self,
        auction: &AuctionRecord,
        user: UserId,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// The auction is inside its final bidding window.
    fn auction_ending_soon(
        &self,
        auction: &AuctionRecord,
        user: UserId,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// The recipient's offer was selected by the auction owner.
    fn auction_won(
        &self,
        auction: &AuctionRecord,
        user: UserId,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// A winner was selected, and it was not the recipient.
    fn auction_lost(
        &self,
        auction: &AuctionRecord,
        user: UserId,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
