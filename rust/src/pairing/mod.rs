//! Round-robin pairing via the circle method.
//!
//! Participants sit at two facing rows of seats. Seat 0 stays put while the
//! rest rotate one step per round; facing seats play each other. Odd fields
//! get a bye seat, and whoever faces it sits the round out.

mod audit;
mod rotation;
mod scheduler;
mod types;

pub use audit::{audit_schedule, ScheduleAudit};
pub use scheduler::{generate_round, InputError, PairingError, RoundRobinScheduler};
pub use types::{Opponent, Pairing, Round, Schedule};
