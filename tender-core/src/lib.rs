#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

/// Core domain models for the reverse-auction marketplace.
///
/// The types in this module are data structures with validate-on-construct
/// semantics and no I/O. Persistence and delivery concerns live behind the
/// traits in [`ports`].
pub mod models;

/// Interface traits ("ports") between the engine and its collaborators.
///
/// These traits define the contract with external adapters (databases,
/// notification channels, clocks) without fixing an implementation, so
/// infrastructure can be swapped without touching the engine and the
/// time-dependent logic can be tested against a simulated clock.
pub mod ports;

/// The auction lifecycle engine.
///
/// Services orchestrate the ports: validating input, enforcing ownership and
/// lifecycle rules, advancing auction state via compare-and-set, and fanning
/// lifecycle events out to subscribers.
pub mod services;
