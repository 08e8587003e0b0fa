mod common;

use common::{TestApp, job, user};
use tender_core::models::{
    AuctionFailure, AuctionStatus, OfferTerms, Price, ValidationError,
};
use tender_core::ports::{Application, OfferRepository};
use tender_core::services::{AuctionService, OfferLedger, Reconciler, SubscriptionRegistry};
use time::Duration;

#[tokio::test]
async fn creation_validates_the_schedule() -> anyhow::Result<()> {
    let app = TestApp::start().await?;
    let now = app.now();
    let service = AuctionService::new(&app);

    let mut past_start = job(now, Duration::hours(1), Duration::hours(24));
    past_start.start_at = now - Duration::minutes(1);
    assert_eq!(
        service.create_auction(user(), past_start).await?,
        Err(AuctionFailure::Invalid(ValidationError::StartNotFuture))
    );

    // 23h59m of bidding is below the floor.
    assert_eq!(
        service
            .create_auction(
                user(),
                job(now, Duration::hours(1), Duration::hours(24) - Duration::minutes(1))
            )
            .await?,
        Err(AuctionFailure::Invalid(ValidationError::WindowTooShort))
    );

    let created = service
        .create_auction(user(), job(now, Duration::hours(1), Duration::hours(24)))
        .await?
        .unwrap();
    assert_eq!(created.status, AuctionStatus::Pending);
    assert_eq!(created.winner, None);

    Ok(())
}

#[tokio::test]
async fn updates_are_owner_only_and_pending_only() -> anyhow::Result<()> {
    let app = TestApp::start().await?;
    let now = app.now();
    let service = AuctionService::new(&app);
    let owner = user();
    let auction = service
        .create_auction(owner, job(now, Duration::hours(1), Duration::hours(24)))
        .await?
        .unwrap();

    let mut amended = auction.data.clone();
    amended.details.title = "Refinish the deck and stairs".into();

    assert_eq!(
        service
            .update_auction(auction.id, user(), amended.clone())
            .await?,
        Err(AuctionFailure::AccessDenied)
    );

    let updated = service
        .update_auction(auction.id, owner, amended.clone())
        .await?
        .unwrap();
    assert_eq!(updated.data.details.title, "Refinish the deck and stairs");
    assert_eq!(
        service.get_auction(auction.id).await?.unwrap().data.details.title,
        "Refinish the deck and stairs"
    );

    // Once open, the terms are frozen.
    app.advance(Duration::hours(2));
    Reconciler::new(&app).run_once().await?;
    amended.start_at = app.now() + Duration::hours(1);
    amended.end_at = app.now() + Duration::hours(25);
    assert_eq!(
        service.update_auction(auction.id, owner, amended).await?,
        Err(AuctionFailure::WrongState {
            required: AuctionStatus::Pending,
            actual: AuctionStatus::Open,
        })
    );

    Ok(())
}

#[tokio::test]
async fn deletion_cascades_to_offers_and_subscriptions() -> anyhow::Result<()> {
    let app = TestApp::start().await?;
    let now = app.now();
    let service = AuctionService::new(&app);
    let owner = user();
    let auction = service
        .create_auction(owner, job(now, Duration::hours(1), Duration::hours(24)))
        .await?
        .unwrap();

    let registry = SubscriptionRegistry::new(&app);
    let watcher = user();
    registry.subscribe(auction.id, watcher).await?.unwrap();

    app.advance(Duration::hours(2));
    Reconciler::new(&app).run_once().await?;
    OfferLedger::new(&app)
        .submit_offer(
            auction.id,
            user(),
            OfferTerms {
                delivery_days: 3,
                price: Price::from_minor(1000).unwrap(),
            },
        )
        .await?
        .unwrap();

    assert_eq!(
        service.delete_auction(auction.id, user()).await?,
        Err(AuctionFailure::AccessDenied)
    );

    service.delete_auction(auction.id, owner).await?.unwrap();
    assert!(service.get_auction(auction.id).await?.is_none());
    assert!(app.db.list_offers(auction.id).await?.is_empty());
    assert!(!registry.is_subscribed(auction.id, watcher).await?);

    // Deleting again reports not-found.
    assert_eq!(
        service.delete_auction(auction.id, owner).await?,
        Err(AuctionFailure::DoesNotExist)
    );

    Ok(())
}

#[tokio::test]
async fn listings_filter_by_status_owner_and_subscription() -> anyhow::Result<()> {
    let app = TestApp::start().await?;
    let now = app.now();
    let service = AuctionService::new(&app);
    let (buyer_one, buyer_two, watcher) = (user(), user(), user());

    let first = service
        .create_auction(buyer_one, job(now, Duration::hours(1), Duration::hours(24)))
        .await?
        .unwrap();
    let second = service
        .create_auction(buyer_two, job(now, Duration::hours(6), Duration::hours(24)))
        .await?
        .unwrap();

    SubscriptionRegistry::new(&app)
        .subscribe(second.id, watcher)
        .await?
        .unwrap();

    // Open the first; the second stays pending.
    app.advance(Duration::hours(2));
    Reconciler::new(&app).run_once().await?;

    let open = service.list_by_status(AuctionStatus::Open).await?;
    assert_eq!(
        open.iter().map(|auction| auction.id).collect::<Vec<_>>(),
        vec![first.id]
    );
    let pending = service.list_by_status(AuctionStatus::Pending).await?;
    assert_eq!(
        pending.iter().map(|auction| auction.id).collect::<Vec<_>>(),
        vec![second.id]
    );

    let mine = service.list_by_owner(buyer_one, None).await?;
    assert_eq!(
        mine.iter().map(|auction| auction.id).collect::<Vec<_>>(),
        vec![first.id]
    );
    assert!(service
        .list_by_owner(buyer_one, Some(AuctionStatus::Closed))
        .await?
        .is_empty());

    let watched = service.list_subscribed(watcher).await?;
    assert_eq!(
        watched.iter().map(|auction| auction.id).collect::<Vec<_>>(),
        vec![second.id]
    );

    Ok(())
}
