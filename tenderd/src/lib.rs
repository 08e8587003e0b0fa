#![doc = include_str!("../README.md")]

mod cli;
mod config;
mod schedule;

/// Application wiring: the concrete [`Application`](tender_core::ports::Application)
/// the daemon runs the engine against.
pub mod impls;
/// Notification channels available to the daemon.
pub mod notify;

pub use cli::Cli;
pub use config::AppConfig;
pub use schedule::Schedule;
