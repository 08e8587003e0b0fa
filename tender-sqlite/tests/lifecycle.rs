mod common;

use common::{TestApp, job, user};
use tender_core::models::{AuctionStatus, LifecycleEvent};
use tender_core::ports::{Application, AuctionRepository};
use tender_core::services::{AuctionService, Reconciler, SubscriptionRegistry};
use time::Duration;

#[tokio::test]
async fn opens_due_auctions_and_notifies_subscribers() -> anyhow::Result<()> {
    let app = TestApp::start().await?;
    let now = app.now();

    let owner = user();
    let auction = AuctionService::new(&app)
        .create_auction(owner, job(now, Duration::hours(1), Duration::hours(24)))
        .await?
        .unwrap();
    assert_eq!(auction.status, AuctionStatus::Pending);

    let registry = SubscriptionRegistry::new(&app);
    let alice = user();
    let bob = user();
    registry.subscribe(auction.id, alice).await?.unwrap();
    registry.subscribe(auction.id, bob).await?.unwrap();

    // Not due yet: nothing moves, nothing is sent.
    let report = Reconciler::new(&app).run_once().await?;
    assert_eq!(report.opened, 0);
    assert!(app.notifier.deliveries().is_empty());

    app.advance(Duration::hours(1) + Duration::minutes(1));
    let report = Reconciler::new(&app).run_once().await?;
    assert_eq!(report.opened, 1);

    let stored = app.db.get_auction(auction.id).await?.unwrap();
    assert_eq!(stored.status, AuctionStatus::Open);
    assert_eq!(stored.winner, None);

    let mut opened = app.notifier.recipients(LifecycleEvent::Opened, auction.id);
    opened.sort();
    let mut expected = vec![alice, bob];
    expected.sort();
    assert_eq!(opened, expected);

    Ok(())
}

#[tokio::test]
async fn fires_ending_soon_once_then_closes() -> anyhow::Result<()> {
    let app = TestApp::start().await?;
    let now = app.now();

    let auction = AuctionService::new(&app)
        .create_auction(user(), job(now, Duration::hours(1), Duration::hours(24)))
        .await?
        .unwrap();
    let watcher = user();
    SubscriptionRegistry::new(&app)
        .subscribe(auction.id, watcher)
        .await?
        .unwrap();

    let reconciler = Reconciler::new(&app);

    app.advance(Duration::hours(1) + Duration::minutes(1));
    reconciler.run_once().await?;

    // 24h05m after creation: inside the final hour.
    app.advance(Duration::hours(23) + Duration::minutes(4));
    let report = reconciler.run_once().await?;
    assert_eq!(report.ending_soon, 1);
    assert_eq!(report.closed, 0);
    assert_eq!(
        app.notifier.recipients(LifecycleEvent::EndingSoon, auction.id),
        vec![watcher]
    );

    // A later tick inside the same window must not re-fire the event.
    app.advance(Duration::minutes(10));
    let report = reconciler.run_once().await?;
    assert_eq!(report.ending_soon, 0);
    assert_eq!(
        app.notifier
            .recipients(LifecycleEvent::EndingSoon, auction.id)
            .len(),
        1
    );

    // 25h01m after creation: past the end.
    app.advance(Duration::minutes(46));
    let report = reconciler.run_once().await?;
    assert_eq!(report.closed, 1);
    assert_eq!(
        app.notifier.recipients(LifecycleEvent::Closed, auction.id),
        vec![watcher]
    );
    assert_eq!(
        app.db.get_auction(auction.id).await?.unwrap().status,
        AuctionStatus::Closed
    );

    Ok(())
}

#[tokio::test]
async fn advances_through_both_edges_without_skipping() -> anyhow::Result<()> {
    let app = TestApp::start().await?;
    let now = app.now();

    // Still pending long after its end time (e.g. the reconciler was down):
    // one pass walks it through open *and* closed, emitting both events,
    // rather than jumping straight to closed.
    let auction = AuctionService::new(&app)
        .create_auction(user(), job(now, Duration::hours(1), Duration::hours(24)))
        .await?
        .unwrap();
    let watcher = user();
    SubscriptionRegistry::new(&app)
        .subscribe(auction.id, watcher)
        .await?
        .unwrap();

    app.advance(Duration::hours(48));
    let report = Reconciler::new(&app).run_once().await?;
    assert_eq!((report.opened, report.closed), (1, 1));

    assert_eq!(
        app.notifier.recipients(LifecycleEvent::Opened, auction.id),
        vec![watcher]
    );
    assert_eq!(
        app.notifier.recipients(LifecycleEvent::Closed, auction.id),
        vec![watcher]
    );
    assert_eq!(
        app.db.get_auction(auction.id).await?.unwrap().status,
        AuctionStatus::Closed
    );

    Ok(())
}

#[tokio::test]
async fn transition_races_have_exactly_one_winner() -> anyhow::Result<()> {
    let app = TestApp::start().await?;
    let now = app.now();

    let auction = AuctionService::new(&app)
        .create_auction(user(), job(now, Duration::hours(1), Duration::hours(24)))
        .await?
        .unwrap();

    // Two reconcilers attempting the same edge: the compare-and-set admits
    // exactly one, and losing is not an error.
    let first = app
        .db
        .advance_status(auction.id, AuctionStatus::Pending, AuctionStatus::Open)
        .await?;
    let second = app
        .db
        .advance_status(auction.id, AuctionStatus::Pending, AuctionStatus::Open)
        .await?;
    assert!(first);
    assert!(!second);

    // Same for the one-shot ending-soon claim.
    let now = app.now();
    assert!(app.db.mark_ending_soon(auction.id, now).await?);
    assert!(!app.db.mark_ending_soon(auction.id, now).await?);

    Ok(())
}

#[tokio::test]
async fn ending_soon_is_not_due_before_the_window() -> anyhow::Result<()> {
    let app = TestApp::start().await?;
    let now = app.now();

    let auction = AuctionService::new(&app)
        .create_auction(user(), job(now, Duration::hours(1), Duration::hours(24)))
        .await?
        .unwrap();
    SubscriptionRegistry::new(&app)
        .subscribe(auction.id, user())
        .await?
        .unwrap();

    let reconciler = Reconciler::new(&app);
    app.advance(Duration::hours(2));
    let report = reconciler.run_once().await?;
    assert_eq!(report.opened, 1);
    assert_eq!(report.ending_soon, 0);
    assert!(app
        .notifier
        .recipients(LifecycleEvent::EndingSoon, auction.id)
        .is_empty());

    Ok(())
}
