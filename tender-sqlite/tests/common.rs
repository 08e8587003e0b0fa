#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tender_core::models::{
    AuctionData, AuctionId, AuctionRecord, JobDetails, LifecycleEvent, OfferId, SubscriptionId,
    UserId,
};
use tender_core::ports::{Application, Notifier};
use tender_sqlite::{Db, config::SqliteConfig};
use time::{Duration, OffsetDateTime};

/// An application harness with a programmable clock and a recording
/// notification channel, so tests can time-travel across lifecycle
/// boundaries and assert on exactly which deliveries happened.
pub struct TestApp {
    pub db: Db,
    pub notifier: RecordingNotifier,
    clock: Mutex<OffsetDateTime>,
}

impl TestApp {
    pub async fn start() -> anyhow::Result<Self> {
        let db = Db::open(&SqliteConfig::default()).await?;
        Ok(Self {
            db,
            notifier: RecordingNotifier::default(),
            clock: Mutex::new(OffsetDateTime::now_utc()),
        })
    }

    /// Move the clock forward.
    pub fn advance(&self, delta: Duration) {
        *self.clock.lock().unwrap() += delta;
    }
}

impl Application for TestApp {
    type Repository = Db;
    type Notifier = RecordingNotifier;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn notifier(&self) -> &Self::Notifier {
        &self.notifier
    }

    fn now(&self) -> OffsetDateTime {
        *self.clock.lock().unwrap()
    }

    fn generate_auction_id(&self) -> AuctionId {
        uuid::Uuid::new_v4().into()
    }

    fn generate_offer_id(&self) -> OfferId {
        uuid::Uuid::new_v4().into()
    }

    fn generate_subscription_id(&self) -> SubscriptionId {
        uuid::Uuid::new_v4().into()
    }
}

/// A delivery attempt refused by the test channel.
#[derive(Debug)]
pub struct DeliveryRefused(pub UserId);

impl std::fmt::Display for DeliveryRefused {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "delivery refused for user {}", self.0)
    }
}

impl std::error::Error for DeliveryRefused {}

/// A `Notifier` that records successful deliveries and can be told to
/// refuse specific recipients.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    deliveries: Arc<Mutex<Vec<(LifecycleEvent, AuctionId, UserId)>>>,
    refusing: Arc<Mutex<HashSet<UserId>>>,
}

impl RecordingNotifier {
    /// Make every future delivery to `user` fail.
    pub fn refuse(&self, user: UserId) {
        self.refusing.lock().unwrap().insert(user);
    }

    /// All successful deliveries, in order.
    pub fn deliveries(&self) -> Vec<(LifecycleEvent, AuctionId, UserId)> {
        self.deliveries.lock().unwrap().clone()
    }

    /// The recipients of `event` for `auction_id`, in delivery order.
    pub fn recipients(&self, event: LifecycleEvent, auction_id: AuctionId) -> Vec<UserId> {
        self.deliveries
            .lock()
            .unwrap()
            .iter()
            .filter(|(kind, auction, _)| *kind == event && *auction == auction_id)
            .map(|(_, _, user)| *user)
            .collect()
    }

    fn deliver(
        &self,
        event: LifecycleEvent,
        auction: &AuctionRecord,
        user: UserId,
    ) -> Result<(), DeliveryRefused> {
        if self.refusing.lock().unwrap().contains(&user) {
            return Err(DeliveryRefused(user));
        }
        self.deliveries.lock().unwrap().push((event, auction.id, user));
        Ok(())
    }
}

impl Notifier for RecordingNotifier {
    type Error = DeliveryRefused;

    async fn auction_opened(
        &self,
        auction: &AuctionRecord,
        user: UserId,
    ) -> Result<(), Self::Error> {
        self.deliver(LifecycleEvent::Opened, auction, user)
    }

    async fn auction_closed(
        &self,
        auction: &AuctionRecord,
        user: UserId,
    ) -> Result<(), Self::Error> {
        self.deliver(LifecycleEvent::Closed, auction, user)
    }

    async fn auction_ending_soon(
        &self,
        auction: &AuctionRecord,
        user: UserId,
    ) -> Result<(), Self::Error> {
        self.deliver(LifecycleEvent::EndingSoon, auction, user)
    }

    async fn auction_won(&self, auction: &AuctionRecord, user: UserId) -> Result<(), Self::Error> {
        self.deliver(LifecycleEvent::Won, auction, user)
    }

    async fn auction_lost(&self, auction: &AuctionRecord, user: UserId) -> Result<(), Self::Error> {
        self.deliver(LifecycleEvent::Lost, auction, user)
    }
}

/// A fresh random user.
pub fn user() -> UserId {
    uuid::Uuid::new_v4().into()
}

/// Auction data starting `start_in` from `now` and staying open for
/// `open_for`.
pub fn job(now: OffsetDateTime, start_in: Duration, open_for: Duration) -> AuctionData {
    AuctionData {
        details: JobDetails {
            title: "Refinish the deck".into(),
            description: "Sand, stain, and seal roughly 30 square meters".into(),
            categories: vec![uuid::Uuid::new_v4().into()],
        },
        delivery_days: 14,
        start_at: now + start_in,
        end_at: now + start_in + open_for,
    }
}
