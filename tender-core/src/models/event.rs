use super::ValidationError;
use serde::{Deserialize, Serialize};

/// The closed set of lifecycle events an auction can emit.
///
/// Every event maps onto exactly one delivery method of the
/// [`Notifier`](crate::ports::Notifier) port, so adding a kind here is a
/// compile error until every channel knows how to deliver it. Parsing a kind
/// name from text fails for anything outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LifecycleEvent {
    /// Bidding has opened
    Opened,
    /// Bidding has closed
    Closed,
    /// The final hour of bidding has begun
    EndingSoon,
    /// The recipient's offer was selected
    Won,
    /// A winner was selected, and it was not the recipient
    Lost,
}

impl LifecycleEvent {
    /// Every event kind, in declaration order
    pub const ALL: [LifecycleEvent; 5] = [
        Self::Opened,
        Self::Closed,
        Self::EndingSoon,
        Self::Won,
        Self::Lost,
    ];

    /// The canonical wire name of this event kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Opened => "auctionOpened",
            Self::Closed => "auctionClosed",
            Self::EndingSoon => "auctionEndingSoon",
            Self::Won => "auctionWinner",
            Self::Lost => "auctionNotWinner",
        }
    }
}

impl std::fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind())
    }
}

impl std::str::FromStr for LifecycleEvent {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|event| event.kind() == s)
            .copied()
            .ok_or_else(|| ValidationError::UnknownEvent(s.to_string()))
    }
}

impl TryFrom<String> for LifecycleEvent {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LifecycleEvent> for String {
    fn from(value: LifecycleEvent) -> Self {
        value.to_string()
    }
}
