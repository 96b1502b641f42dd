use bus_ledger_core::seat_grid::{SeatNumber, COLS, MAX_SEATS, ROWS};
use proptest::prelude::*;
use std::collections::HashSet;

#[test]
fn mapping_covers_every_cell_exactly_once() {
    let cells: HashSet<(usize, usize)> = SeatNumber::all().map(SeatNumber::position).collect();
    assert_eq!(cells.len(), MAX_SEATS);
    assert!(cells.iter().all(|(r, c)| *r < ROWS && *c < COLS));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Seat number -> cell -> seat number is the identity.
    #[test]
    fn prop_seat_round_trips_through_position(n in 1i64..=32) {
        let seat = SeatNumber::new(n).unwrap();
        let (row, col) = seat.position();
        prop_assert_eq!(SeatNumber::from_position(row, col), Some(seat));
        prop_assert_eq!(row * COLS + col + 1, n as usize);
    }

    #[test]
    fn prop_out_of_range_numbers_are_rejected(n in prop_oneof![i64::MIN..1i64, 33i64..i64::MAX]) {
        prop_assert!(SeatNumber::new(n).is_err());
        prop_assert!(SeatNumber::parse(&n.to_string()).is_err());
    }
}
