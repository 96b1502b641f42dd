//! Interactive menu session: prompts, reads answers, dispatches to the ledger
//! and prints the rendered result.
//!
//! Fields are checked as they are typed so a bad value stops the command
//! early; the ledger re-checks everything when the command is submitted.
//! End of input ends the session as if Exit had been chosen.

use bus_ledger_core::contract::TicketIdGenerator;
use bus_ledger_core::seat_grid::SeatNumber;
use bus_ledger_core::shared::SharedLedger;
use bus_ledger_core::validate::{validate_bus_number, validate_non_empty, validate_time};
use bus_ledger_core::{NewBus, Outcome, MAX_BUSES};
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddBus,
    ReserveSeat,
    ShowSeats,
    ListBuses,
    DeleteBus,
    ShowTicket,
    CancelTicket,
    Exit,
}

impl MenuChoice {
    pub fn from_number(n: u32) -> Option<Self> {
        Some(match n {
            1 => MenuChoice::AddBus,
            2 => MenuChoice::ReserveSeat,
            3 => MenuChoice::ShowSeats,
            4 => MenuChoice::ListBuses,
            5 => MenuChoice::DeleteBus,
            6 => MenuChoice::ShowTicket,
            7 => MenuChoice::CancelTicket,
            8 => MenuChoice::Exit,
            _ => return None,
        })
    }
}

enum Flow {
    Continue,
    Exit,
}

pub struct Session<R, W, G> {
    input: R,
    output: W,
    ledger: SharedLedger<G>,
}

impl<R, W, G> Session<R, W, G>
where
    R: BufRead,
    W: Write,
    G: TicketIdGenerator,
{
    pub fn new(input: R, output: W, ledger: SharedLedger<G>) -> Self {
        Self {
            input,
            output,
            ledger,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub async fn run(&mut self) -> io::Result<()> {
        info!("Menu session started");
        loop {
            write!(self.output, "{}", render::menu())?;
            let Some(line) = self.prompt("\n\t\t\tEnter your choice:-> ")? else {
                break;
            };
            let choice = match line.trim().parse::<u32>() {
                Ok(n) => match MenuChoice::from_number(n) {
                    Some(choice) => choice,
                    None => {
                        self.say("Invalid choice. Please enter a number between 1 and 8.")?;
                        continue;
                    }
                },
                Err(_) => {
                    self.say("Invalid input. Please enter a valid integer.")?;
                    continue;
                }
            };
            debug!(?choice, "Menu choice");
            writeln!(self.output, "{}", render::rule('*'))?;

            let flow = match choice {
                MenuChoice::AddBus => self.add_bus().await?,
                MenuChoice::ReserveSeat => self.reserve_seat().await?,
                MenuChoice::ShowSeats => self.show_seats().await?,
                MenuChoice::ListBuses => self.list_buses().await?,
                MenuChoice::DeleteBus => self.delete_bus().await?,
                MenuChoice::ShowTicket => self.show_ticket().await?,
                MenuChoice::CancelTicket => self.cancel_ticket().await?,
                MenuChoice::Exit => {
                    self.say("Thank You ... Visit Again!")?;
                    Flow::Exit
                }
            };
            if let Flow::Exit = flow {
                break;
            }
        }
        info!("Menu session finished");
        self.output.flush()
    }

    async fn add_bus(&mut self) -> io::Result<Flow> {
        if self.ledger.len().await >= MAX_BUSES {
            self.say("Cannot add more buses. Maximum limit reached.")?;
            return Ok(Flow::Continue);
        }

        let Some(bus_number) = self.prompt("Enter bus number (4 digits): ")? else {
            return Ok(Flow::Exit);
        };
        if !validate_bus_number(&bus_number) {
            self.say("Invalid bus number format. Please enter a valid 4-digit bus number.")?;
            return Ok(Flow::Continue);
        }
        if self.ledger.contains(&bus_number).await {
            self.say("Bus number already exists. Please enter a unique bus number.")?;
            return Ok(Flow::Continue);
        }

        let Some(driver) = self.prompt("Enter driver's name: ")? else {
            return Ok(Flow::Exit);
        };
        if !validate_non_empty(&driver) {
            self.say("Driver's name cannot be empty. Please re-enter.")?;
            return Ok(Flow::Continue);
        }
        let Some(arrival) = self.prompt("Enter arrival time (HH:MM AM/PM): ")? else {
            return Ok(Flow::Exit);
        };
        if !validate_time(&arrival) {
            self.say("Invalid arrival time format. Please enter time in the format HH:MM AM/PM.")?;
            return Ok(Flow::Continue);
        }
        let Some(departure) = self.prompt("Enter departure time (HH:MM AM/PM): ")? else {
            return Ok(Flow::Exit);
        };
        if !validate_time(&departure) {
            self.say(
                "Invalid departure time format. Please enter time in the format HH:MM AM/PM.",
            )?;
            return Ok(Flow::Continue);
        }
        let Some(origin) = self.prompt("Enter source: ")? else {
            return Ok(Flow::Exit);
        };
        if !validate_non_empty(&origin) {
            self.say("Source cannot be empty. Please re-enter.")?;
            return Ok(Flow::Continue);
        }
        let Some(destination) = self.prompt("Enter destination: ")? else {
            return Ok(Flow::Exit);
        };
        if !validate_non_empty(&destination) {
            self.say("Destination cannot be empty. Please re-enter.")?;
            return Ok(Flow::Continue);
        }

        let new_bus = NewBus {
            bus_number,
            driver,
            arrival,
            departure,
            origin,
            destination,
        };
        match self.ledger.add_bus(new_bus).await {
            Ok(_) => self.say("New bus added successfully.")?,
            Err(e) => self.say(&render::error(&e))?,
        }
        Ok(Flow::Continue)
    }

    async fn reserve_seat(&mut self) -> io::Result<Flow> {
        let Some(bus_number) = self.prompt("Enter bus number: ")? else {
            return Ok(Flow::Exit);
        };
        let seats = match self.ledger.show_seats(&bus_number).await {
            Ok(map) => map,
            Err(_) => {
                self.say(&format!("Bus with number {bus_number} not found."))?;
                return Ok(Flow::Continue);
            }
        };

        let Some(raw_seat) =
            self.prompt(&format!("Enter seat number for bus number {bus_number}: "))?
        else {
            return Ok(Flow::Exit);
        };
        let seat = match SeatNumber::parse(&raw_seat) {
            Ok(seat) => seat,
            Err(e) => {
                self.say(&render::error(&e.into()))?;
                return Ok(Flow::Continue);
            }
        };
        if seats.occupancy()[seat.get() - 1] {
            self.say(&format!(
                "Seat number {seat} is already occupied. Please select another seat."
            ))?;
            return Ok(Flow::Continue);
        }

        let Some(name) = self.prompt("Enter passenger name: ")? else {
            return Ok(Flow::Exit);
        };
        match self
            .ledger
            .allot_seat(&bus_number, seat.get() as i64, &name)
            .await
        {
            Ok(ticket) => {
                self.say(&format!(
                    "Seat number {seat} allotted to passenger {name}."
                ))?;
                write!(self.output, "{}", render::ticket(&ticket))?;
            }
            Err(e) => self.say(&render::error(&e))?,
        }
        Ok(Flow::Continue)
    }

    async fn show_seats(&mut self) -> io::Result<Flow> {
        let Some(bus_number) = self.prompt("Enter bus no: ")? else {
            return Ok(Flow::Exit);
        };
        match self.ledger.show_seats(&bus_number).await {
            Ok(map) => write!(self.output, "{}", render::seat_map(&map))?,
            Err(_) => self.say("Invalid bus number. Please enter a correct bus number.")?,
        }
        Ok(Flow::Continue)
    }

    async fn list_buses(&mut self) -> io::Result<Flow> {
        match self.ledger.list_buses().await {
            Ok(buses) => write!(self.output, "{}", render::bus_list(&buses))?,
            Err(e) => self.say(&render::error(&e))?,
        }
        Ok(Flow::Continue)
    }

    async fn delete_bus(&mut self) -> io::Result<Flow> {
        let Some(bus_number) = self.prompt("Enter the bus number you want to delete: ")? else {
            return Ok(Flow::Exit);
        };
        if !self.ledger.contains(&bus_number).await {
            self.say(&format!(
                "Bus number {bus_number} not found. Please enter a valid bus number."
            ))?;
            return Ok(Flow::Continue);
        }
        let Some(confirmed) = self.confirm(&format!(
            "Are you sure you want to delete bus number {bus_number}? (Y/N): "
        ))?
        else {
            return Ok(Flow::Exit);
        };
        match self.ledger.delete_bus(&bus_number, confirmed).await {
            Ok(Outcome::Applied(_)) => {
                self.say(&format!("Bus number {bus_number} deleted successfully."))?
            }
            Ok(Outcome::Declined(_)) => self.say(&format!(
                "Deletion cancelled. Bus number {bus_number} not deleted."
            ))?,
            Err(e) => self.say(&render::error(&e))?,
        }
        Ok(Flow::Continue)
    }

    async fn show_ticket(&mut self) -> io::Result<Flow> {
        let Some(ticket_id) = self.prompt("Enter ticket ID: ")? else {
            return Ok(Flow::Exit);
        };
        match self.ledger.find_ticket(&ticket_id).await {
            Ok(ticket) => write!(self.output, "{}", render::ticket(&ticket))?,
            Err(_) => self.say(&format!(
                "Ticket with ID {} not found.",
                ticket_id.to_lowercase()
            ))?,
        }
        Ok(Flow::Continue)
    }

    async fn cancel_ticket(&mut self) -> io::Result<Flow> {
        let Some(ticket_id) = self.prompt("Enter ticket ID: ")? else {
            return Ok(Flow::Exit);
        };
        match self.ledger.find_ticket(&ticket_id).await {
            Ok(ticket) => write!(self.output, "{}", render::ticket(&ticket))?,
            Err(_) => {
                self.say(&format!(
                    "Ticket with ID {} not found.",
                    ticket_id.to_lowercase()
                ))?;
                return Ok(Flow::Continue);
            }
        }
        let Some(confirmed) =
            self.confirm("Are you sure you want to cancel this ticket? (Y/N): ")?
        else {
            return Ok(Flow::Exit);
        };
        match self.ledger.cancel_ticket(&ticket_id, confirmed).await {
            Ok(Outcome::Applied(ticket)) => self.say(&format!(
                "Ticket for seat number {} cancelled successfully.",
                ticket.seat_number
            ))?,
            Ok(Outcome::Declined(_)) => {
                self.say("Ticket cancellation cancelled. No changes made.")?
            }
            Err(e) => self.say(&render::error(&e))?,
        }
        Ok(Flow::Continue)
    }

    fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    /// Prints `question` and reads one line without its line ending. `None` at end of input.
    ///
    /// Bytes that are not UTF-8 are replaced rather than rejected, so a garbled
    /// line is just another wrong answer.
    fn prompt(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// `y` or `Y` as the first non-blank character confirms; anything else declines.
    fn confirm(&mut self, question: &str) -> io::Result<Option<bool>> {
        Ok(self.prompt(question)?.map(|answer| {
            answer
                .trim_start()
                .chars()
                .next()
                .is_some_and(|c| c.eq_ignore_ascii_case(&'y'))
        }))
    }
}
