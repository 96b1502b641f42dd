//! Fixed 8x4 seat grid owned by every bus.
//!
//! Seats are numbered 1..=32 and map row-major onto the grid:
//! seat `s` lives at `((s - 1) / COLS, (s - 1) % COLS)`. Allocation, display,
//! lookup and cancellation all go through [`SeatNumber`] so the mapping has a
//! single definition.

use serde::Serialize;
use std::fmt;

use crate::error::SeatInputError;
use crate::ticket_id::TicketId;

pub const ROWS: usize = 8;
pub const COLS: usize = 4;
pub const MAX_SEATS: usize = ROWS * COLS;

/// A seat number known to be within `1..=MAX_SEATS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SeatNumber(usize);

impl SeatNumber {
    pub fn new(value: i64) -> Result<Self, SeatInputError> {
        if (1..=MAX_SEATS as i64).contains(&value) {
            Ok(SeatNumber(value as usize))
        } else {
            Err(SeatInputError::OutOfRange {
                value,
                max: MAX_SEATS,
            })
        }
    }

    /// Parses raw user input. Non-integers and out-of-range integers are
    /// reported as different [`SeatInputError`] variants.
    pub fn parse(raw: &str) -> Result<Self, SeatInputError> {
        let value: i64 = raw
            .trim()
            .parse()
            .map_err(|_| SeatInputError::NotANumber(raw.to_string()))?;
        Self::new(value)
    }

    pub fn from_position(row: usize, col: usize) -> Option<Self> {
        if row < ROWS && col < COLS {
            Some(SeatNumber(row * COLS + col + 1))
        } else {
            None
        }
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// `(row, col)`, both zero based.
    pub fn position(self) -> (usize, usize) {
        ((self.0 - 1) / COLS, (self.0 - 1) % COLS)
    }

    fn index(self) -> usize {
        self.0 - 1
    }

    /// All seat numbers in row-major order.
    pub fn all() -> impl Iterator<Item = SeatNumber> {
        (1..=MAX_SEATS).map(SeatNumber)
    }
}

impl fmt::Display for SeatNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The ticket held by an occupied seat. Name and id are set and cleared together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupant {
    pub passenger_name: String,
    pub ticket_id: TicketId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatCell {
    occupant: Option<Occupant>,
}

impl SeatCell {
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn occupant(&self) -> Option<&Occupant> {
        self.occupant.as_ref()
    }

    pub fn passenger_name(&self) -> Option<&str> {
        self.occupant.as_ref().map(|o| o.passenger_name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatGrid {
    cells: [SeatCell; MAX_SEATS],
}

impl Default for SeatGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl SeatGrid {
    /// A grid with every seat vacant.
    pub fn new() -> Self {
        Self {
            cells: std::array::from_fn(|_| SeatCell::default()),
        }
    }

    pub fn cell(&self, seat: SeatNumber) -> &SeatCell {
        &self.cells[seat.index()]
    }

    pub fn is_occupied(&self, seat: SeatNumber) -> bool {
        self.cell(seat).is_occupied()
    }

    /// Places `occupant` on a vacant seat. An occupied seat is never
    /// overwritten; the rejected occupant is handed back.
    pub fn occupy(&mut self, seat: SeatNumber, occupant: Occupant) -> Result<(), Occupant> {
        let cell = &mut self.cells[seat.index()];
        if cell.is_occupied() {
            return Err(occupant);
        }
        cell.occupant = Some(occupant);
        Ok(())
    }

    /// Clears a seat, returning whoever held it.
    pub fn vacate(&mut self, seat: SeatNumber) -> Option<Occupant> {
        self.cells[seat.index()].occupant.take()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_occupied()).count()
    }

    /// Cells in seat-number (row-major) order.
    pub fn iter(&self) -> impl Iterator<Item = (SeatNumber, &SeatCell)> {
        SeatNumber::all().zip(self.cells.iter())
    }

    /// First occupied seat, in row-major order, holding `ticket_id`.
    pub fn find(&self, ticket_id: &TicketId) -> Option<(SeatNumber, &Occupant)> {
        self.iter().find_map(|(seat, cell)| {
            cell.occupant()
                .filter(|o| &o.ticket_id == ticket_id)
                .map(|o| (seat, o))
        })
    }
}
