//! # Moneta Core
//!
//! Domain model and port traits for the Moneta account ledger.
//!
//! This crate holds everything the transfer orchestration reasons about,
//! with no I/O of its own:
//!
//! - **Money**: arbitrary-precision signed amounts
//! - **Account**: the aggregate owning a baseline balance and an activity
//!   window, with the withdraw/deposit business rules
//! - **ActivityWindow**: the bounded log of recent movements a balance is
//!   derived from
//! - **Ports**: [`ports::AccountLoader`], [`ports::AccountLock`] and
//!   [`ports::AccountStateUpdater`], the capabilities the runtime services
//!   consume
//! - **Commands & configuration**: validated [`command::SendMoneyCommand`]
//!   and the explicit [`config::TransferProperties`] value object
//!
//! ## Architecture Principles
//!
//! - The domain is pure: balances are re-derived from window contents, never
//!   cached, and all timestamps are injected.
//! - Business rejection is a boolean, not an error. Errors are reserved for
//!   fatal conditions (missing account, broken configuration, storage
//!   failure).
//! - Everything external sits behind a port trait, selected at composition
//!   time.

// Re-export commonly used types
pub use chrono::{DateTime, Utc};

pub mod account;
pub mod activity;
pub mod command;
pub mod config;
pub mod environment;
pub mod money;
pub mod ports;
pub mod window;

pub use account::{Account, AccountId};
pub use activity::{Activity, ActivityId};
pub use command::SendMoneyCommand;
pub use config::TransferProperties;
pub use money::Money;
pub use window::ActivityWindow;
