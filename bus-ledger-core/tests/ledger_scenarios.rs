use bus_ledger_core::contract::MockTicketIdGenerator;
use bus_ledger_core::seat_grid::MAX_SEATS;
use bus_ledger_core::ticket_id::RandomTicketIdGenerator;
use bus_ledger_core::{Ledger, LedgerError, NewBus, Outcome, SeatInputError, MAX_BUSES};

fn bus(number: &str) -> NewBus {
    NewBus {
        bus_number: number.to_string(),
        driver: "Jane".to_string(),
        arrival: "09:00 AM".to_string(),
        departure: "05:30 PM".to_string(),
        origin: "Springfield".to_string(),
        destination: "Shelbyville".to_string(),
    }
}

fn seeded_ledger() -> Ledger<RandomTicketIdGenerator> {
    Ledger::new(RandomTicketIdGenerator::from_seed(7))
}

#[test]
fn reservation_walkthrough() {
    let mut ledger = seeded_ledger();

    assert_eq!(ledger.add_bus(bus("1234")).unwrap(), "1234");

    let ticket = ledger.allot_seat("1234", 1, "Alice").unwrap();
    assert_eq!(ticket.passenger_name, "Alice");
    assert_eq!(ticket.bus_number, "1234");
    assert_eq!(ticket.seat_number.get(), 1);
    assert!(ticket.ticket_id.is_well_formed());
    assert!(ledger.show_seats("1234").unwrap().occupancy()[0]);

    assert_eq!(
        ledger.allot_seat("1234", 1, "Bob").unwrap_err(),
        LedgerError::SeatTaken {
            bus: "1234".into(),
            seat: 1
        }
    );
    assert_eq!(
        ledger.allot_seat("1234", 33, "Bob").unwrap_err(),
        LedgerError::InvalidInput(SeatInputError::OutOfRange { value: 33, max: 32 })
    );

    let outcome = ledger.delete_bus("1234", true).unwrap();
    assert!(outcome.is_applied());
    assert!(ledger.is_empty());
    assert_eq!(
        ledger.list_buses().unwrap_err(),
        LedgerError::EmptyCollection
    );
}

#[test]
fn list_buses_keeps_insertion_order_across_deletes() {
    let mut ledger = seeded_ledger();
    for number in ["4000", "1000", "3000", "2000"] {
        ledger.add_bus(bus(number)).unwrap();
    }

    let numbers: Vec<String> = ledger
        .list_buses()
        .unwrap()
        .into_iter()
        .map(|s| s.bus_number)
        .collect();
    assert_eq!(numbers, ["4000", "1000", "3000", "2000"]);

    ledger.delete_bus("1000", true).unwrap();
    let numbers: Vec<String> = ledger
        .list_buses()
        .unwrap()
        .into_iter()
        .map(|s| s.bus_number)
        .collect();
    assert_eq!(numbers, ["4000", "3000", "2000"]);
}

#[test]
fn list_buses_counts_empty_seats() {
    let mut ledger = seeded_ledger();
    ledger.add_bus(bus("1111")).unwrap();
    ledger.add_bus(bus("2222")).unwrap();
    ledger.allot_seat("2222", 5, "Alice").unwrap();
    ledger.allot_seat("2222", 6, "Bob").unwrap();

    let summaries = ledger.list_buses().unwrap();
    assert_eq!(summaries[0].empty_seats, MAX_SEATS);
    assert_eq!(summaries[1].empty_seats, MAX_SEATS - 2);
    assert!(summaries.iter().all(|s| s.total_seats == 32));
}

#[test]
fn duplicate_bus_number_leaves_collection_unchanged() {
    let mut ledger = seeded_ledger();
    ledger.add_bus(bus("1234")).unwrap();
    ledger.add_bus(bus("5678")).unwrap();

    let err = ledger.add_bus(bus("1234")).unwrap_err();
    assert_eq!(err, LedgerError::DuplicateKey("1234".into()));
    assert_eq!(ledger.len(), 2);
}

#[test]
fn twenty_sixth_bus_exceeds_capacity() {
    let mut ledger = seeded_ledger();
    for n in 0..MAX_BUSES {
        ledger.add_bus(bus(&format!("{n:04}"))).unwrap();
    }

    // Capacity is checked before anything else, even format.
    assert_eq!(
        ledger.add_bus(bus("9999")).unwrap_err(),
        LedgerError::CapacityExceeded { limit: 25 }
    );
    assert_eq!(
        ledger.add_bus(bus("bad")).unwrap_err(),
        LedgerError::CapacityExceeded { limit: 25 }
    );
    assert_eq!(ledger.len(), MAX_BUSES);
    assert!(ledger.bus("0024").is_some());
}

#[test]
fn allotment_changes_exactly_one_cell() {
    let mut ledger = seeded_ledger();
    ledger.add_bus(bus("1234")).unwrap();
    let before = ledger.show_seats("1234").unwrap().occupancy();

    ledger.allot_seat("1234", 17, "Carol").unwrap();
    let after = ledger.show_seats("1234").unwrap();

    let changed: Vec<usize> = (0..MAX_SEATS).filter(|i| before[*i] != after.occupancy()[*i]).collect();
    assert_eq!(changed, [16]);
    assert_eq!(after.empty_count, MAX_SEATS - 1);
    assert_eq!(after.seats[16].passenger_name.as_deref(), Some("Carol"));
}

#[test]
fn seat_taken_leaves_original_booking() {
    let mut ledger = seeded_ledger();
    ledger.add_bus(bus("1234")).unwrap();
    let first = ledger.allot_seat("1234", 8, "Alice").unwrap();

    ledger.allot_seat("1234", 8, "Mallory").unwrap_err();

    let found = ledger.find_ticket(first.ticket_id.as_str()).unwrap();
    assert_eq!(found, first);
}

#[test]
fn show_seats_for_unknown_bus_is_not_found() {
    let ledger = seeded_ledger();
    assert_eq!(
        ledger.show_seats("0001").unwrap_err(),
        LedgerError::NotFound("bus 0001".into())
    );
}

#[test]
fn ticket_lookup_ignores_case() {
    let mut generator = MockTicketIdGenerator::new();
    generator
        .expect_generate()
        .times(1)
        .returning(|| "Ab3dEfGh".to_string());
    let mut ledger = Ledger::new(generator);
    ledger.add_bus(bus("1234")).unwrap();
    ledger.allot_seat("1234", 4, "Alice").unwrap();

    let found = ledger.find_ticket("AB3DEFGH").unwrap();
    assert_eq!(found.ticket_id.as_str(), "ab3defgh");
    assert_eq!(found.seat_number.position(), (0, 3));
    assert_eq!(ledger.find_ticket("ab3defgh").unwrap(), found);
}

#[test]
fn declined_cancel_does_not_mutate() {
    let mut ledger = seeded_ledger();
    ledger.add_bus(bus("1234")).unwrap();
    let ticket = ledger.allot_seat("1234", 2, "Alice").unwrap();
    let before = ledger.show_seats("1234").unwrap();

    let outcome = ledger
        .cancel_ticket(&ticket.ticket_id.as_str().to_uppercase(), false)
        .unwrap();
    assert_eq!(outcome, Outcome::Declined(ticket.clone()));
    assert_eq!(ledger.show_seats("1234").unwrap(), before);
    assert_eq!(ledger.find_ticket(ticket.ticket_id.as_str()).unwrap(), ticket);
}

#[test]
fn confirmed_cancel_clears_only_the_matched_cell() {
    let mut ledger = seeded_ledger();
    ledger.add_bus(bus("1111")).unwrap();
    ledger.add_bus(bus("2222")).unwrap();
    let keep_a = ledger.allot_seat("1111", 2, "Alice").unwrap();
    let cancel = ledger.allot_seat("2222", 2, "Bob").unwrap();
    let keep_b = ledger.allot_seat("2222", 3, "Carol").unwrap();

    let outcome = ledger
        .cancel_ticket(cancel.ticket_id.as_str(), true)
        .unwrap();
    assert_eq!(outcome, Outcome::Applied(cancel.clone()));

    assert_eq!(
        ledger.find_ticket(cancel.ticket_id.as_str()).unwrap_err(),
        LedgerError::NotFound(format!("ticket {}", cancel.ticket_id))
    );
    assert_eq!(ledger.find_ticket(keep_a.ticket_id.as_str()).unwrap(), keep_a);
    assert_eq!(ledger.find_ticket(keep_b.ticket_id.as_str()).unwrap(), keep_b);
    assert_eq!(ledger.show_seats("2222").unwrap().empty_count, MAX_SEATS - 1);

    // The seat can be booked again.
    ledger.allot_seat("2222", 2, "Dave").unwrap();
}

#[test]
fn cancelling_unknown_ticket_is_not_found() {
    let mut ledger = seeded_ledger();
    ledger.add_bus(bus("1234")).unwrap();
    assert!(matches!(
        ledger.cancel_ticket("nothere1", true),
        Err(LedgerError::NotFound(_))
    ));
}

#[test]
fn delete_unknown_bus_is_not_found_even_when_unconfirmed() {
    let mut ledger = seeded_ledger();
    assert_eq!(
        ledger.delete_bus("4321", false).unwrap_err(),
        LedgerError::NotFound("bus 4321".into())
    );
}
