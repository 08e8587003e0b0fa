//! Notification channels.
//!
//! The daemon itself has no mail infrastructure; deliveries are emitted as
//! structured log events, which doubles as the integration point for an
//! operator tailing the journal. A real deployment substitutes its own
//! [`Notifier`] at the application seam.

use std::convert::Infallible;
use tender_core::models::{AuctionRecord, UserId};
use tender_core::ports::Notifier;
use tracing::info;

/// A `Notifier` that records each delivery as a log event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    type Error = Infallible;

    async fn auction_opened(
        &self,
        auction: &AuctionRecord,
        user: UserId,
    ) -> Result<(), Self::Error> {
        info!(auction_id = %auction.id, %user, title = %auction.data.details.title, "auctionOpened");
        Ok(())
    }

    async fn auction_closed(
        &self,
        auction: &AuctionRecord,
        user: UserId,
    ) -> Result<(), Self::Error> {
        info!(auction_id = %auction.id, %user, title = %auction.data.details.title, "auctionClosed");
        Ok(())
    }

    async fn auction_ending_soon(
        &self,
        auction: &AuctionRecord,
        user: UserId,
    ) -> Result<(), Self::Error> {
        info!(auction_id = %auction.id, %user, title = %auction.data.details.title, "auctionEndingSoon");
        Ok(())
    }

    async fn auction_won(&self, auction: &AuctionRecord, user: UserId) -> Result<(), Self::Error> {
        info!(auction_id = %auction.id, %user, title = %auction.data.details.title, "auctionWinner");
        Ok(())
    }

    async fn auction_lost(&self, auction: &AuctionRecord, user: UserId) -> Result<(), Self::Error> {
        info!(auction_id = %auction.id, %user, title = %auction.data.details.title, "auctionNotWinner");
        Ok(())
    }
}
