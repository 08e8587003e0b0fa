mod common;

use common::{TestApp, job, user};
use tender_core::models::{AuctionFailure, LifecycleEvent};
use tender_core::ports::Application;
use tender_core::services::{AuctionService, Reconciler, SubscriptionRegistry};
use time::Duration;

#[tokio::test]
async fn duplicate_subscription_is_a_conflict() -> anyhow::Result<()> {
    let app = TestApp::start().await?;
    let now = app.now();
    let auction = AuctionService::new(&app)
        .create_auction(user(), job(now, Duration::hours(1), Duration::hours(24)))
        .await?
        .unwrap();

    let registry = SubscriptionRegistry::new(&app);
    let alice = user();

    let subscription = registry.subscribe(auction.id, alice).await?.unwrap();
    assert_eq!(subscription.auction_id, auction.id);
    assert_eq!(subscription.user, alice);

    assert_eq!(
        registry.subscribe(auction.id, alice).await?,
        Err(AuctionFailure::Conflict)
    );
    assert!(registry.is_subscribed(auction.id, alice).await?);

    Ok(())
}

#[tokio::test]
async fn unsubscribing_without_a_subscription_is_not_found() -> anyhow::Result<()> {
    let app = TestApp::start().await?;
    let now = app.now();
    let auction = AuctionService::new(&app)
        .create_auction(user(), job(now, Duration::hours(1), Duration::hours(24)))
        .await?
        .unwrap();

    let registry = SubscriptionRegistry::new(&app);
    let alice = user();

    assert_eq!(
        registry.unsubscribe(auction.id, alice).await?,
        Err(AuctionFailure::DoesNotExist)
    );

    registry.subscribe(auction.id, alice).await?.unwrap();
    registry.unsubscribe(auction.id, alice).await?.unwrap();
    assert!(!registry.is_subscribed(auction.id, alice).await?);

    // Gone means gone: a second removal reports not-found again.
    assert_eq!(
        registry.unsubscribe(auction.id, alice).await?,
        Err(AuctionFailure::DoesNotExist)
    );

    Ok(())
}

#[tokio::test]
async fn subscribing_to_a_missing_auction_is_not_found() -> anyhow::Result<()> {
    let app = TestApp::start().await?;
    assert_eq!(
        SubscriptionRegistry::new(&app)
            .subscribe(app.generate_auction_id(), user())
            .await?,
        Err(AuctionFailure::DoesNotExist)
    );
    Ok(())
}

#[tokio::test]
async fn unsubscribed_users_receive_nothing() -> anyhow::Result<()> {
    let app = TestApp::start().await?;
    let now = app.now();
    let auction = AuctionService::new(&app)
        .create_auction(user(), job(now, Duration::hours(1), Duration::hours(24)))
        .await?
        .unwrap();

    let registry = SubscriptionRegistry::new(&app);
    let (staying, leaving) = (user(), user());
    registry.subscribe(auction.id, staying).await?.unwrap();
    registry.subscribe(auction.id, leaving).await?.unwrap();
    registry.unsubscribe(auction.id, leaving).await?.unwrap();

    app.advance(Duration::hours(2));
    Reconciler::new(&app).run_once().await?;

    assert_eq!(
        app.notifier.recipients(LifecycleEvent::Opened, auction.id),
        vec![staying]
    );
    Ok(())
}

#[tokio::test]
async fn one_failing_delivery_does_not_starve_the_rest() -> anyhow::Result<()> {
    let app = TestApp::start().await?;
    let now = app.now();
    let auction = AuctionService::new(&app)
        .create_auction(user(), job(now, Duration::hours(1), Duration::hours(24)))
        .await?
        .unwrap();

    let registry = SubscriptionRegistry::new(&app);
    let (alice, bob, carol) = (user(), user(), user());
    for subscriber in [alice, bob, carol] {
        registry.subscribe(auction.id, subscriber).await?.unwrap();
    }
    app.notifier.refuse(bob);

    app.advance(Duration::hours(2));
    Reconciler::new(&app).run_once().await?;

    let mut delivered = app.notifier.recipients(LifecycleEvent::Opened, auction.id);
    delivered.sort();
    let mut expected = vec![alice, carol];
    expected.sort();
    assert_eq!(delivered, expected);

    Ok(())
}
