//! Repository trait implementations for the SQLite database.
//!
//! Every compare-and-set in the engine's concurrency model appears here as a
//! guarded statement: the `where` clause names the state being left behind,
//! and `rows_affected` tells the caller whether it won the race.

use crate::Db;
use tender_core::ports::{MarketplaceRepository, Repository};

mod auction;
mod offer;
mod subscription;

impl Repository for Db {
    type Error = sqlx::Error;
}

impl MarketplaceRepository for Db {}
