//! The reservation ledger: every bus, its seat grid and the tickets held in it.
//!
//! # Responsibilities
//! - Registers buses after validating every field, in a fixed order, before
//!   anything is stored (see [`Ledger::add_bus`])
//! - Allocates seats and issues ticket ids through a [`TicketIdGenerator`]
//! - Looks up and cancels tickets by canonical (lowercase) id
//! - Removes buses, taking their tickets with them
//!
//! All operations are all-or-nothing: a returned error means nothing changed.
//! Destructive operations take a `confirmed` flag; a declined confirmation is
//! an [`Outcome::Declined`], not an error.
//!
//! The ledger does no I/O. Callers render the returned [`BusSummary`],
//! [`SeatMap`] and [`TicketInfo`] values however they like.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::{CollisionPolicy, LedgerConfig};
use crate::contract::TicketIdGenerator;
use crate::error::LedgerError;
use crate::seat_grid::{Occupant, SeatGrid, SeatNumber, MAX_SEATS};
use crate::ticket_id::TicketId;
use crate::validate::{validate_bus_number, validate_non_empty, validate_time};

/// Most buses the ledger will hold at once.
pub const MAX_BUSES: usize = 25;

/// Raw fields for a bus registration, as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBus {
    pub bus_number: String,
    pub driver: String,
    pub arrival: String,
    pub departure: String,
    pub origin: String,
    pub destination: String,
}

/// A registered bus. Never modified after creation except through its seats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bus {
    bus_number: String,
    driver: String,
    arrival: String,
    departure: String,
    origin: String,
    destination: String,
    seats: SeatGrid,
}

impl Bus {
    pub fn bus_number(&self) -> &str {
        &self.bus_number
    }

    pub fn summary(&self) -> BusSummary {
        BusSummary {
            bus_number: self.bus_number.clone(),
            driver: self.driver.clone(),
            arrival: self.arrival.clone(),
            departure: self.departure.clone(),
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            empty_seats: self.seats.empty_count(),
            total_seats: MAX_SEATS,
        }
    }

    fn ticket(&self, seat: SeatNumber, occupant: &Occupant) -> TicketInfo {
        TicketInfo {
            passenger_name: occupant.passenger_name.clone(),
            ticket_id: occupant.ticket_id.clone(),
            bus_number: self.bus_number.clone(),
            seat_number: seat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusSummary {
    pub bus_number: String,
    pub driver: String,
    pub arrival: String,
    pub departure: String,
    pub origin: String,
    pub destination: String,
    pub empty_seats: usize,
    pub total_seats: usize,
}

/// A ticket and where it sits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketInfo {
    pub passenger_name: String,
    pub ticket_id: TicketId,
    pub bus_number: String,
    pub seat_number: SeatNumber,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatView {
    pub seat_number: SeatNumber,
    pub passenger_name: Option<String>,
}

/// Every seat of one bus, in seat-number order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatMap {
    pub bus: BusSummary,
    pub seats: Vec<SeatView>,
    pub empty_count: usize,
}

impl SeatMap {
    pub fn occupancy(&self) -> [bool; MAX_SEATS] {
        let mut occupancy = [false; MAX_SEATS];
        for (slot, seat) in occupancy.iter_mut().zip(&self.seats) {
            *slot = seat.passenger_name.is_some();
        }
        occupancy
    }
}

/// Result of an operation guarded by a confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Confirmed and carried out.
    Applied(T),
    /// Not confirmed; nothing changed.
    Declined(T),
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Outcome::Applied(v) | Outcome::Declined(v) => v,
        }
    }
}

pub struct Ledger<G> {
    buses: Vec<Bus>,
    generator: G,
    config: LedgerConfig,
}

impl<G> std::fmt::Debug for Ledger<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("buses", &self.buses)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<G: TicketIdGenerator> Ledger<G> {
    pub fn new(generator: G) -> Self {
        Self::with_config(generator, LedgerConfig::default())
    }

    pub fn with_config(generator: G, config: LedgerConfig) -> Self {
        Self {
            buses: Vec::new(),
            generator,
            config,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.buses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buses.is_empty()
    }

    pub fn bus(&self, bus_number: &str) -> Option<&Bus> {
        self.buses.iter().find(|b| b.bus_number == bus_number)
    }

    /// Registers a bus with an all-vacant seat grid and returns its number.
    ///
    /// Checks run in this order and stop at the first failure: capacity,
    /// bus number format, bus number uniqueness, driver, arrival, departure,
    /// origin, destination.
    pub fn add_bus(&mut self, new: NewBus) -> Result<String, LedgerError> {
        self.check_new_bus(&new)
            .inspect_err(|e| rejected("add_bus", e))?;

        let NewBus {
            bus_number,
            driver,
            arrival,
            departure,
            origin,
            destination,
        } = new;
        info!(bus_number = %bus_number, origin = %origin, destination = %destination, "[LEDGER] Bus added");
        self.buses.push(Bus {
            bus_number: bus_number.clone(),
            driver,
            arrival,
            departure,
            origin,
            destination,
            seats: SeatGrid::new(),
        });
        Ok(bus_number)
    }

    fn check_new_bus(&self, new: &NewBus) -> Result<(), LedgerError> {
        if self.buses.len() >= MAX_BUSES {
            return Err(LedgerError::CapacityExceeded { limit: MAX_BUSES });
        }
        if !validate_bus_number(&new.bus_number) {
            return Err(LedgerError::invalid("bus number", &new.bus_number));
        }
        if self.bus(&new.bus_number).is_some() {
            return Err(LedgerError::DuplicateKey(new.bus_number.clone()));
        }
        if !validate_non_empty(&new.driver) {
            return Err(LedgerError::invalid("driver name", &new.driver));
        }
        if !validate_time(&new.arrival) {
            return Err(LedgerError::invalid("arrival time", &new.arrival));
        }
        if !validate_time(&new.departure) {
            return Err(LedgerError::invalid("departure time", &new.departure));
        }
        if !validate_non_empty(&new.origin) {
            return Err(LedgerError::invalid("origin", &new.origin));
        }
        if !validate_non_empty(&new.destination) {
            return Err(LedgerError::invalid("destination", &new.destination));
        }
        Ok(())
    }

    /// Books `seat` on `bus_number` for `passenger_name` and issues a ticket.
    ///
    /// The first booking of a seat wins: an occupied seat yields
    /// [`LedgerError::SeatTaken`] and is left as it was.
    pub fn allot_seat(
        &mut self,
        bus_number: &str,
        seat: i64,
        passenger_name: &str,
    ) -> Result<TicketInfo, LedgerError> {
        let (index, seat) = self
            .check_allotment(bus_number, seat, passenger_name)
            .inspect_err(|e| rejected("allot_seat", e))?;
        let ticket_id = self
            .issue_ticket_id()
            .inspect_err(|e| rejected("allot_seat", e))?;

        let bus = &mut self.buses[index];
        let occupant = Occupant {
            passenger_name: passenger_name.to_string(),
            ticket_id,
        };
        let ticket = bus.ticket(seat, &occupant);
        if let Err(occupant) = bus.seats.occupy(seat, occupant) {
            // check_allotment saw the seat vacant and nothing ran in between.
            error!(bus_number, seat = seat.get(), ticket_id = %occupant.ticket_id, "[LEDGER] Seat filled during allotment");
            return Err(LedgerError::SeatTaken {
                bus: bus_number.to_string(),
                seat: seat.get(),
            });
        }

        info!(bus_number, seat = seat.get(), ticket_id = %ticket.ticket_id, "[LEDGER] Seat allotted");
        match serde_json::to_string(&ticket) {
            Ok(json) => debug!(json = %json, "[LEDGER] Issued ticket as JSON"),
            Err(e) => error!(error = ?e, "[LEDGER] Failed to serialize issued ticket"),
        }
        Ok(ticket)
    }

    fn check_allotment(
        &self,
        bus_number: &str,
        seat: i64,
        passenger_name: &str,
    ) -> Result<(usize, SeatNumber), LedgerError> {
        let index = self.index_of(bus_number)?;
        let seat = SeatNumber::new(seat)?;
        if self.buses[index].seats.is_occupied(seat) {
            return Err(LedgerError::SeatTaken {
                bus: bus_number.to_string(),
                seat: seat.get(),
            });
        }
        if !validate_non_empty(passenger_name) {
            return Err(LedgerError::invalid("passenger name", passenger_name));
        }
        Ok((index, seat))
    }

    fn issue_ticket_id(&mut self) -> Result<TicketId, LedgerError> {
        let attempts = match self.config.on_collision {
            CollisionPolicy::Allow => {
                return Ok(TicketId::canonical(&self.generator.generate()));
            }
            CollisionPolicy::Reroll => self.config.max_attempts.max(1),
        };
        for attempt in 1..=attempts {
            let candidate = TicketId::canonical(&self.generator.generate());
            if self.locate(&candidate).is_none() {
                return Ok(candidate);
            }
            warn!(attempt, ticket_id = %candidate, "[LEDGER] Generated ticket id already in use, rerolling");
        }
        Err(LedgerError::TicketIdUnavailable { attempts })
    }

    /// Summary and per-seat occupancy of one bus.
    pub fn show_seats(&self, bus_number: &str) -> Result<SeatMap, LedgerError> {
        let index = self
            .index_of(bus_number)
            .inspect_err(|e| rejected("show_seats", e))?;
        let bus = &self.buses[index];
        let seats: Vec<SeatView> = bus
            .seats
            .iter()
            .map(|(seat_number, cell)| SeatView {
                seat_number,
                passenger_name: cell.passenger_name().map(str::to_string),
            })
            .collect();
        let empty_count = seats.iter().filter(|s| s.passenger_name.is_none()).count();
        debug!(bus_number, empty_count, "[LEDGER] Seat map read");
        Ok(SeatMap {
            bus: bus.summary(),
            seats,
            empty_count,
        })
    }

    /// All buses in insertion order, or [`LedgerError::EmptyCollection`] when there are none.
    pub fn list_buses(&self) -> Result<Vec<BusSummary>, LedgerError> {
        if self.buses.is_empty() {
            debug!("[LEDGER] No buses to list");
            return Err(LedgerError::EmptyCollection);
        }
        Ok(self.buses.iter().map(Bus::summary).collect())
    }

    /// Removes a bus and every ticket on it. The order of the remaining buses is kept.
    pub fn delete_bus(
        &mut self,
        bus_number: &str,
        confirmed: bool,
    ) -> Result<Outcome<BusSummary>, LedgerError> {
        let index = self
            .index_of(bus_number)
            .inspect_err(|e| rejected("delete_bus", e))?;
        if !confirmed {
            info!(bus_number, "[LEDGER] Bus deletion declined");
            return Ok(Outcome::Declined(self.buses[index].summary()));
        }
        let removed = self.buses.remove(index);
        let summary = removed.summary();
        info!(
            bus_number,
            dropped_tickets = summary.total_seats - summary.empty_seats,
            "[LEDGER] Bus deleted"
        );
        Ok(Outcome::Applied(summary))
    }

    /// First occupied seat, scanning bus then row then column, holding `ticket_id`.
    pub fn find_ticket(&self, ticket_id: &str) -> Result<TicketInfo, LedgerError> {
        let wanted = TicketId::canonical(ticket_id);
        let (index, seat) = self
            .locate(&wanted)
            .ok_or_else(|| LedgerError::NotFound(format!("ticket {wanted}")))
            .inspect_err(|e| rejected("find_ticket", e))?;
        let ticket = self.ticket_at(index, seat)?;
        debug!(ticket_id = %wanted, bus_number = %ticket.bus_number, seat = seat.get(), "[LEDGER] Ticket found");
        Ok(ticket)
    }

    /// Cancels a ticket, vacating its seat when `confirmed`. Either way the
    /// ticket as it was before the call is returned.
    pub fn cancel_ticket(
        &mut self,
        ticket_id: &str,
        confirmed: bool,
    ) -> Result<Outcome<TicketInfo>, LedgerError> {
        let wanted = TicketId::canonical(ticket_id);
        let (index, seat) = self
            .locate(&wanted)
            .ok_or_else(|| LedgerError::NotFound(format!("ticket {wanted}")))
            .inspect_err(|e| rejected("cancel_ticket", e))?;
        let ticket = self.ticket_at(index, seat)?;
        if !confirmed {
            info!(ticket_id = %wanted, "[LEDGER] Ticket cancellation declined");
            return Ok(Outcome::Declined(ticket));
        }
        self.buses[index].seats.vacate(seat);
        info!(
            ticket_id = %wanted,
            bus_number = %ticket.bus_number,
            seat = seat.get(),
            "[LEDGER] Ticket cancelled"
        );
        Ok(Outcome::Applied(ticket))
    }

    fn index_of(&self, bus_number: &str) -> Result<usize, LedgerError> {
        self.buses
            .iter()
            .position(|b| b.bus_number == bus_number)
            .ok_or_else(|| LedgerError::NotFound(format!("bus {bus_number}")))
    }

    fn locate(&self, ticket_id: &TicketId) -> Option<(usize, SeatNumber)> {
        self.buses
            .iter()
            .enumerate()
            .find_map(|(index, bus)| bus.seats.find(ticket_id).map(|(seat, _)| (index, seat)))
    }

    fn ticket_at(&self, index: usize, seat: SeatNumber) -> Result<TicketInfo, LedgerError> {
        let bus = &self.buses[index];
        bus.seats
            .cell(seat)
            .occupant()
            .map(|occupant| bus.ticket(seat, occupant))
            .ok_or_else(|| LedgerError::NotFound(format!("seat {seat} on bus {}", bus.bus_number)))
    }
}

fn rejected(operation: &'static str, err: &LedgerError) {
    if err.is_anomaly() {
        warn!(operation, kind = err.kind(), error = %err, "[LEDGER] Operation failed");
    } else if err.is_informational() {
        debug!(operation, kind = err.kind(), "[LEDGER] {err}");
    } else {
        info!(operation, kind = err.kind(), error = %err, "[LEDGER] Operation rejected");
    }
}
