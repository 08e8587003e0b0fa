//! Storage-side representations of the core domain types.
//!
//! Identifiers cross the SQL boundary as TEXT (the core owns the typed uuid
//! newtypes), timestamps as a normalized UTC [`DateTime`], and rows as
//! `FromRow` structs that convert into core records, surfacing any stored
//! value the domain would reject as a decode error rather than a panic.

mod datetime;
mod rows;

pub use datetime::DateTime;
pub(crate) use rows::{AuctionRow, OfferRow};
