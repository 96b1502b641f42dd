//! Console formatting for ledger results. Nothing here touches the ledger;
//! every function turns a returned value into text.

use bus_ledger_core::seat_grid::COLS;
use bus_ledger_core::{BusSummary, LedgerError, SeatMap, TicketInfo};
use std::fmt::Write;

pub const RULE_WIDTH: usize = 75;

pub fn rule(ch: char) -> String {
    std::iter::repeat(ch).take(RULE_WIDTH).collect()
}

pub fn menu() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", rule('*'));
    for (n, label) in [
        "Add new bus details",
        "Reserve a seat",
        "Show the seats of a bus",
        "Buses available now",
        "Delete bus",
        "Show ticket info",
        "Cancel ticket",
        "Exit",
    ]
    .iter()
    .enumerate()
    {
        let _ = writeln!(out, "\t\t\t{}. {}", n + 1, label);
    }
    let _ = writeln!(out, "{}", rule('*'));
    out
}

fn bus_header(out: &mut String, bus: &BusSummary) {
    let _ = writeln!(out, "{}", rule('*'));
    let _ = writeln!(out, "Bus no: \t{}", bus.bus_number);
    let _ = writeln!(
        out,
        "Driver: \t{:<16}Arrival time: \t{}\tDeparture time: {}",
        bus.driver, bus.arrival, bus.departure
    );
    let _ = writeln!(out, "From: \t\t{:<16}To: \t\t{}", bus.origin, bus.destination);
    let _ = writeln!(out, "{}", rule('*'));
}

/// Bus header followed by the grid, one row of seats per line.
pub fn seat_map(map: &SeatMap) -> String {
    let mut out = String::new();
    bus_header(&mut out, &map.bus);
    for row in map.seats.chunks(COLS) {
        for seat in row {
            let _ = write!(
                out,
                "{:>5}.{:>10}",
                seat.seat_number.get(),
                seat.passenger_name.as_deref().unwrap_or("Empty")
            );
        }
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "\nThere are {} seats empty in Bus No: {}",
        map.empty_count, map.bus.bus_number
    );
    out
}

pub fn bus_list(buses: &[BusSummary]) -> String {
    let mut out = String::new();
    for bus in buses {
        bus_header(&mut out, bus);
        let _ = writeln!(out, "{}", rule('_'));
        let _ = writeln!(
            out,
            "Available Seats: {}/{}",
            bus.empty_seats, bus.total_seats
        );
    }
    out
}

pub fn ticket(ticket: &TicketInfo) -> String {
    format!(
        "Ticket Info:\nName: {}\nTicket ID: {}\nBus Number: {}\nSeat Number: {}\n",
        ticket.passenger_name, ticket.ticket_id, ticket.bus_number, ticket.seat_number
    )
}

/// User-facing message for a rejected operation.
pub fn error(err: &LedgerError) -> String {
    match err {
        LedgerError::InvalidFormat { field, value } if value.is_empty() => {
            format!("{} cannot be empty. Please re-enter.", capitalise(field))
        }
        LedgerError::InvalidFormat { field, value } if field.ends_with("time") => format!(
            "Invalid {field} {value:?}. Please enter time in the format HH:MM AM/PM."
        ),
        LedgerError::InvalidFormat { field, value } => {
            format!("Invalid {field} {value:?}.")
        }
        LedgerError::DuplicateKey(bus) => {
            format!("Bus number {bus} already exists. Please enter a unique bus number.")
        }
        LedgerError::CapacityExceeded { .. } => {
            "Cannot add more buses. Maximum limit reached.".to_string()
        }
        LedgerError::EmptyCollection => "No buses available at the moment.".to_string(),
        other => {
            let text = other.to_string();
            format!("{}.", capitalise(&text))
        }
    }
}

fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
