use crate::notify::LogNotifier;
use tender_core::models::{AuctionId, OfferId, SubscriptionId};
use tender_core::ports::Application;
use tender_sqlite::Db;
use time::OffsetDateTime;

/// The daemon's application: SQLite persistence, log-backed notification,
/// the system clock, and random ids.
#[derive(Clone)]
pub struct TenderApp {
    db: Db,
    notifier: LogNotifier,
}

impl TenderApp {
    /// Wire an application over an opened database.
    pub fn new(db: Db) -> Self {
        Self {
            db,
            notifier: LogNotifier,
        }
    }
}

impl Application for TenderApp {
    type Repository = Db;
    type Notifier = LogNotifier;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn notifier(&self) -> &Self::Notifier {
        &self.notifier
    }

    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
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
