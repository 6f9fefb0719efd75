//! Circle-method seat arrangement and rotation.
//!
//! Seats form two facing rows. Seat 0 is the anchor and never moves; the
//! remaining seats rotate one step per round.

use crate::interner::SlotId;

/// A seat at the table: a real participant slot or the synthetic bye.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Seat {
    Occupied(SlotId),
    Bye,
}

/// Lay out the round-1 seats for `participant_count` participants.
///
/// Participants take seats in slot order. An odd count gets a trailing bye
/// seat so the table is always even.
pub fn initial_seats(participant_count: usize) -> Vec<Seat> {
    let mut seats: Vec<Seat> = (0..participant_count)
        .map(|slot| Seat::Occupied(slot as SlotId))
        .collect();
    if participant_count % 2 == 1 {
        seats.push(Seat::Bye);
    }
    seats
}

/// Rotate the non-anchor seats `steps` times and return the new arrangement.
///
/// One step moves the last seat to the position right after the anchor.
/// `seats.len() - 1` steps bring the table back to where it started.
pub fn rotate(seats: &[Seat], steps: usize) -> Vec<Seat> {
    let mut rotated = seats.to_vec();
    if rotated.len() > 2 {
        let ring = rotated.len() - 1;
        rotated[1..].rotate_right(steps % ring);
    }
    rotated
}

/// Facing seats for one round: seat `i` against seat `len - 1 - i`.
pub fn facing_pairs(seats: &[Seat]) -> impl Iterator<Item = (Seat, Seat)> + '_ {
    let half = seats.len() / 2;
    (0..half).map(move |i| (seats[i], seats[seats.len() - 1 - i]))
}
