use super::{NotificationDispatcher, RepoError};
use crate::models::{AuctionRecord, AuctionStatus, LifecycleEvent};
use crate::ports::{Application, AuctionRepository, SubscriptionRepository};
use time::Duration;
use tracing::{debug, warn};

/// How close to its end an auction must be before the ending-soon
/// notification goes out.
pub const DEFAULT_ENDING_SOON_WINDOW: Duration = Duration::hours(1);

/// Counters for one reconciler pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Auctions this pass transitioned to open
    pub opened: usize,
    /// Auctions this pass transitioned to closed
    pub closed: usize,
    /// Auctions whose ending-soon fan-out this pass performed
    pub ending_soon: usize,
    /// Auctions left untouched because their transition hit a store error;
    /// their state is unchanged, so the next pass re-selects them
    pub skipped: usize,
}

/// The periodic process that advances auctions through their lifecycle.
///
/// A pass performs three sweeps against the clock: pending auctions whose
/// start time has arrived are opened, open auctions whose end time has
/// arrived are closed, and open auctions inside their final window get their
/// one-time ending-soon fan-out. Every advancement is a compare-and-set on
/// the state being left, so concurrent reconcilers produce exactly one
/// transition each — the loser observes `false` and moves on, which is not
/// an error.
///
/// The reconciler owns `status` exclusively: no other actor writes it.
pub struct Reconciler<'a, A: Application> {
    app: &'a A,
    window: Duration,
}

impl<'a, A: Application> Reconciler<'a, A> {
    /// Build a reconciler with the default ending-soon window.
    pub fn new(app: &'a A) -> Self {
        Self {
            app,
            window: DEFAULT_ENDING_SOON_WINDOW,
        }
    }

    /// Override the ending-soon window.
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Run one reconciliation pass against the application's clock.
    ///
    /// A store error on a single auction is logged, counted as skipped, and
    /// retried naturally on the next pass (its state is unchanged, so the
    /// due-query re-selects it). An error from the due-queries themselves
    /// aborts the pass, since nothing can proceed without them.
    pub async fn run_once(&self) -> Result<ReconcileReport, RepoError<A>> {
        let now = self.app.now();
        let db = self.app.database();
        let mut report = ReconcileReport::default();

        for mut auction in db.open_due(now).await? {
            match db
                .advance_status(auction.id, AuctionStatus::Pending, AuctionStatus::Open)
                .await
            {
                Ok(true) => {
                    auction.status = AuctionStatus::Open;
                    self.fan_out(&auction, LifecycleEvent::Opened).await;
                    report.opened += 1;
                }
                Ok(false) => {
                    // another reconciler got there first
                    debug!(auction_id = %auction.id, "open transition already performed");
                }
                Err(error) => {
                    warn!(auction_id = %auction.id, %error, "open transition failed; will retry next pass");
                    report.skipped += 1;
                }
            }
        }

        for mut auction in db.close_due(now).await? {
            match db
                .advance_status(auction.id, AuctionStatus::Open, AuctionStatus::Closed)
                .await
            {
                Ok(true) => {
                    auction.status = AuctionStatus::Closed;
                    self.fan_out(&auction, LifecycleEvent::Closed).await;
                    report.closed += 1;
                }
                Ok(false) => {
                    debug!(auction_id = %auction.id, "close transition already performed");
                }
                Err(error) => {
                    warn!(auction_id = %auction.id, %error, "close transition failed; will retry next pass");
                    report.skipped += 1;
                }
            }
        }

        for mut auction in db.ending_soon_due(now, self.window).await? {
            match db.mark_ending_soon(auction.id, now).await {
                Ok(true) => {
                    auction.ending_soon_at = Some(now);
                    self.fan_out(&auction, LifecycleEvent::EndingSoon).await;
                    report.ending_soon += 1;
                }
                Ok(false) => {
                    debug!(auction_id = %auction.id, "ending-soon fan-out already claimed");
                }
                Err(error) => {
                    warn!(auction_id = %auction.id, %error, "ending-soon claim failed; will retry next pass");
                    report.skipped += 1;
                }
            }
        }

        debug!(
            opened = report.opened,
            closed = report.closed,
            ending_soon = report.ending_soon,
            skipped = report.skipped,
            "reconciliation pass complete"
        );

        Ok(report)
    }

    /// Deliver `event` to every subscriber of `auction`.
    ///
    /// By the time fan-out runs the transition has already been won, so a
    /// failure to load the subscriber list cannot be retried by re-running
    /// the transition; it is logged and the event forgone.
    async fn fan_out(&self, auction: &AuctionRecord, event: LifecycleEvent) {
        let subscribers = match self.app.database().list_subscribers(auction.id).await {
            Ok(subscribers) => subscribers,
            Err(error) => {
                warn!(auction_id = %auction.id, %event, %error, "could not load subscribers; fan-out skipped");
                return;
            }
        };

        NotificationDispatcher::new(self.app)
            .dispatch(auction, event, &subscribers)
            .await;
    }
}
