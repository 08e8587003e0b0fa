mod auction;
mod event;
mod failure;
mod offer;
mod subscription;

pub use auction::{
    AuctionData, AuctionRecord, AuctionStatus, JobDetails, MIN_BIDDING_WINDOW, MIN_DELIVERY_DAYS,
};
pub use event::LifecycleEvent;
pub use failure::{AuctionFailure, ValidationError};
pub use offer::{OfferRecord, OfferTerms, Price};
pub use subscription::SubscriptionRecord;

macro_rules! entity_id {
    ($struct:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $struct(pub uuid::Uuid);

        impl From<uuid::Uuid> for $struct {
            fn from(value: uuid::Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$struct> for uuid::Uuid {
            fn from(value: $struct) -> Self {
                value.0
            }
        }

        impl std::str::FromStr for $struct {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl std::ops::Deref for $struct {
            type Target = uuid::Uuid;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl std::fmt::Display for $struct {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

entity_id!(AuctionId, "Unique identifier for an auction");
entity_id!(OfferId, "Unique identifier for a seller's offer on an auction");
entity_id!(
    SubscriptionId,
    "Unique identifier for a user's interest registration on an auction"
);
entity_id!(UserId, "Unique identifier for a platform user (buyer or seller)");
entity_id!(
    CategoryId,
    "Reference to a job category maintained elsewhere in the platform"
);
