use super::NotifyError;
use crate::models::{AuctionRecord, LifecycleEvent, UserId};
use crate::ports::{Application, Notifier};
use tracing::warn;

/// The outcome of one fan-out: how many deliveries succeeded, and which
/// recipients failed with what.
///
/// Deliveries are at-most-once per dispatch; nothing here retries. A failed
/// recipient is logged and reported, and the surrounding event may only
/// reach them again if the event itself legitimately re-fires.
#[derive(Debug)]
pub struct DeliveryReport<E> {
    /// Number of successful deliveries
    pub delivered: usize,
    /// Each failed recipient, paired with the channel's error
    pub failures: Vec<(UserId, E)>,
}

impl<E> Default for DeliveryReport<E> {
    fn default() -> Self {
        Self {
            delivered: 0,
            failures: Vec::new(),
        }
    }
}

/// Fans one lifecycle event out to a set of recipients.
///
/// The dispatcher is the seam between *what happened* (the closed
/// [`LifecycleEvent`] kind-set) and *how it is delivered* (the
/// [`Notifier`] port): each kind resolves to exactly one delivery method,
/// exhaustively, so an unhandled kind cannot compile. One recipient's
/// delivery failure never aborts delivery to the rest.
pub struct NotificationDispatcher<'a, A: Application> {
    app: &'a A,
}

impl<'a, A: Application> NotificationDispatcher<'a, A> {
    /// Build a dispatcher over the given application.
    pub fn new(app: &'a A) -> Self {
        Self { app }
    }

    /// Deliver `event` about `auction` to every recipient in turn.
    ///
    /// Failures are collected into the report and logged individually; this
    /// method itself never fails.
    pub async fn dispatch(
        &self,
        auction: &AuctionRecord,
        event: LifecycleEvent,
        recipients: &[UserId],
    ) -> DeliveryReport<NotifyError<A>> {
        let notifier = self.app.notifier();
        let mut report = DeliveryReport::default();

        for &user in recipients {
            let outcome = match event {
                LifecycleEvent::Opened => notifier.auction_opened(auction, user).await,
                LifecycleEvent::Closed => notifier.auction_closed(auction, user).await,
                LifecycleEvent::EndingSoon => notifier.auction_ending_soon(auction, user).await,
                LifecycleEvent::Won => notifier.auction_won(auction, user).await,
                LifecycleEvent::Lost => notifier.auction_lost(auction, user).await,
            };

            match outcome {
                Ok(()) => report.delivered += 1,
                Err(error) => {
                    warn!(
                        auction_id = %auction.id,
                        user = %user,
                        event = %event,
                        %error,
                        "notification delivery failed"
                    );
                    report.failures.push((user, error));
                }
            }
        }

        report
    }
}
