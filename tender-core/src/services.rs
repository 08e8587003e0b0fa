mod auctions;
mod dispatch;
mod offers;
mod reconcile;
mod subscriptions;
mod winner;

pub use auctions::AuctionService;
pub use dispatch::{DeliveryReport, NotificationDispatcher};
pub use offers::OfferLedger;
pub use reconcile::{DEFAULT_ENDING_SOON_WINDOW, ReconcileReport, Reconciler};
pub use subscriptions::SubscriptionRegistry;
pub use winner::WinnerAssignment;

use crate::ports::{Application, Notifier, Repository};

/// The backend error type of an application's repository
pub type RepoError<A> = <<A as Application>::Repository as Repository>::Error;

/// The delivery error type of an application's notification channel
pub type NotifyError<A> = <<A as Application>::Notifier as Notifier>::Error;
