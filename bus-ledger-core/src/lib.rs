#![doc = "bus-ledger-core: in-memory bus seat reservation ledger."]

//! This crate holds every rule of the ledger: bus registration, the fixed
//! seat grid, ticket issuing, lookup and cancellation. It performs no
//! console I/O; the `bus-ledger` binary crate owns prompting and rendering.
//!
//! # Usage
//! Build a [`ledger::Ledger`] around a [`contract::TicketIdGenerator`], or wrap
//! it in a [`shared::SharedLedger`] when several tasks need it.

pub mod config;
pub mod contract;
pub mod error;
pub mod ledger;
pub mod seat_grid;
pub mod shared;
pub mod ticket_id;
pub mod validate;

pub use error::{LedgerError, SeatInputError};
pub use ledger::{Bus, BusSummary, Ledger, NewBus, Outcome, SeatMap, SeatView, TicketInfo, MAX_BUSES};
