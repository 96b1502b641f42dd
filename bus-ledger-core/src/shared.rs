//! Lock-guarded handle for using one ledger from several tasks.
//!
//! Uniqueness and occupancy span the whole collection, so the lock is
//! coarse: one writer at a time for anything that mutates, shared readers
//! otherwise. The write guard is held across the full check-and-mutate
//! sequence of each operation, so two allotments racing for the same
//! vacant seat cannot both succeed.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::contract::TicketIdGenerator;
use crate::error::LedgerError;
use crate::ledger::{BusSummary, Ledger, NewBus, Outcome, SeatMap, TicketInfo};

pub struct SharedLedger<G> {
    inner: Arc<RwLock<Ledger<G>>>,
}

impl<G> Clone for SharedLedger<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G: TicketIdGenerator> SharedLedger<G> {
    pub fn new(ledger: Ledger<G>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    pub async fn add_bus(&self, new: NewBus) -> Result<String, LedgerError> {
        self.inner.write().await.add_bus(new)
    }

    pub async fn allot_seat(
        &self,
        bus_number: &str,
        seat: i64,
        passenger_name: &str,
    ) -> Result<TicketInfo, LedgerError> {
        self.inner
            .write()
            .await
            .allot_seat(bus_number, seat, passenger_name)
    }

    pub async fn show_seats(&self, bus_number: &str) -> Result<SeatMap, LedgerError> {
        self.inner.read().await.show_seats(bus_number)
    }

    pub async fn list_buses(&self) -> Result<Vec<BusSummary>, LedgerError> {
        self.inner.read().await.list_buses()
    }

    pub async fn delete_bus(
        &self,
        bus_number: &str,
        confirmed: bool,
    ) -> Result<Outcome<BusSummary>, LedgerError> {
        self.inner.write().await.delete_bus(bus_number, confirmed)
    }

    pub async fn find_ticket(&self, ticket_id: &str) -> Result<TicketInfo, LedgerError> {
        self.inner.read().await.find_ticket(ticket_id)
    }

    pub async fn cancel_ticket(
        &self,
        ticket_id: &str,
        confirmed: bool,
    ) -> Result<Outcome<TicketInfo>, LedgerError> {
        self.inner.write().await.cancel_ticket(ticket_id, confirmed)
    }

    pub async fn contains(&self, bus_number: &str) -> bool {
        self.inner.read().await.bus(bus_number).is_some()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
