//! Round-robin scheduler using the circle method.

use chrono::{Days, NaiveDate};
use std::fmt::Debug;
use std::hash::Hash;
use thiserror::Error;

use crate::config::{CyclePolicy, PairingConfig};
use crate::interner::{ParticipantInterner, SlotId};
use crate::{log_changes, log_checks, log_debug};

use super::rotation::{facing_pairs, initial_seats, rotate, Seat};
use super::types::{Pairing, Round, Schedule};

/// Rejected caller input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("At least 2 participants are required, got {0}")]
    TooFewParticipants(usize),
    #[error("Duplicate participant: {0}")]
    DuplicateParticipant(String),
    #[error("Round number must be at least 1, got {0}")]
    NonPositiveRound(i64),
}

/// Errors that can occur while generating pairings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PairingError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),
    #[error("Round {round} is past the last round of the cycle ({max_round})")]
    RoundOutOfRange { round: i64, max_round: u32 },
    #[error("Unknown cycle policy: {0}")]
    UnknownCyclePolicy(String),
    #[error("Date of round {0} is out of range")]
    DateOutOfRange(u32),
}

/// Circle-method scheduler over a fixed, validated participant list.
///
/// Every round is derived from the round-1 seating by replaying `r - 1`
/// rotation steps, so rounds can be requested in any order and identical
/// inputs always give identical pairings.
#[derive(Clone, Debug)]
pub struct RoundRobinScheduler<T> {
    interner: ParticipantInterner<T>,
    seats: Vec<Seat>,
    policy: CyclePolicy,
    config: PairingConfig,
}

impl<T: Clone + Eq + Hash + Debug> RoundRobinScheduler<T> {
    /// Validate participants and lay out the round-1 seating.
    pub fn new(participants: &[T], config: PairingConfig) -> Result<Self, PairingError> {
        let verbosity = config.verbosity;

        let policy = CyclePolicy::parse(&config.cycle_policy)
            .ok_or_else(|| PairingError::UnknownCyclePolicy(config.cycle_policy.clone()))?;

        if participants.len() < 2 {
            return Err(InputError::TooFewParticipants(participants.len()).into());
        }

        let mut interner = ParticipantInterner::with_capacity(participants.len());
        for id in participants {
            if interner.intern_new(id).is_none() {
                log_checks!(verbosity, "Rejecting duplicate participant {:?}", id);
                return Err(InputError::DuplicateParticipant(format!("{:?}", id)).into());
            }
        }

        let seats = initial_seats(interner.slot_count());
        log_checks!(
            verbosity,
            "Seated {} participants at {} seats ({:?} policy)",
            interner.slot_count(),
            seats.len(),
            policy
        );

        Ok(Self {
            interner,
            seats,
            policy,
            config,
        })
    }

    /// Participants in the order given.
    pub fn participants(&self) -> &[T] {
        self.interner.ids()
    }

    pub fn participant_count(&self) -> usize {
        self.interner.slot_count()
    }

    /// Whether a bye seat was added (odd participant count).
    pub fn has_bye(&self) -> bool {
        self.seats.len() != self.interner.slot_count()
    }

    /// Rounds in one full cycle: N-1 for even N, N for odd N.
    pub fn rounds_per_cycle(&self) -> u32 {
        (self.seats.len() - 1) as u32
    }

    /// Pairings for one round.
    pub fn generate_round(&self, round_number: i64) -> Result<Round<T>, PairingError> {
        let (round, cycle) = self.locate(round_number)?;
        let steps = ((round - 1) % self.rounds_per_cycle()) as usize;
        let seats = rotate(&self.seats, steps);
        self.build_round(round, cycle, &seats)
    }

    /// One full cycle: rounds 1..=rounds_per_cycle.
    pub fn generate_schedule(&self) -> Result<Schedule<T>, PairingError> {
        self.generate_rounds(self.rounds_per_cycle())
    }

    /// Rounds 1..=count, generated in order.
    ///
    /// Carries the rotated seating from round to round instead of replaying
    /// from round 1; the result is the same as calling `generate_round` for
    /// each number. Fails as a whole if any round is rejected.
    pub fn generate_rounds(&self, count: u32) -> Result<Schedule<T>, PairingError> {
        let per_cycle = self.rounds_per_cycle();
        if count > per_cycle && self.policy == CyclePolicy::Reject {
            log_checks!(
                self.config.verbosity,
                "Rejecting {} rounds (cycle has {} rounds)",
                count,
                per_cycle
            );
            return Err(PairingError::RoundOutOfRange {
                round: per_cycle as i64 + 1,
                max_round: per_cycle,
            });
        }

        let mut rounds = Vec::with_capacity(count.min(per_cycle) as usize);
        let mut seats = self.seats.clone();

        for round_number in 1..=count {
            let (round, cycle) = self.locate(round_number as i64)?;
            if round > 1 {
                seats = rotate(&seats, 1);
            }
            rounds.push(self.build_round(round, cycle, &seats)?);
        }

        log_changes!(
            self.config.verbosity,
            "Generated {} rounds for {} participants",
            rounds.len(),
            self.participant_count()
        );

        Ok(Schedule {
            participants: self.participants().to_vec(),
            rounds,
        })
    }

    /// Validate a round number and find its cycle.
    fn locate(&self, round_number: i64) -> Result<(u32, u32), PairingError> {
        if round_number < 1 {
            return Err(InputError::NonPositiveRound(round_number).into());
        }

        let per_cycle = self.rounds_per_cycle();
        let out_of_range = PairingError::RoundOutOfRange {
            round: round_number,
            max_round: per_cycle,
        };

        if round_number > per_cycle as i64 && self.policy == CyclePolicy::Reject {
            log_checks!(
                self.config.verbosity,
                "Rejecting round {} (cycle has {} rounds)",
                round_number,
                per_cycle
            );
            return Err(out_of_range);
        }

        let round = u32::try_from(round_number).map_err(|_| out_of_range)?;
        let cycle = (round - 1) / per_cycle + 1;
        if cycle > 1 {
            log_checks!(
                self.config.verbosity,
                "Round {} wraps into cycle {}",
                round,
                cycle
            );
        }
        Ok((round, cycle))
    }

    fn round_date(&self, round: u32) -> Result<Option<NaiveDate>, PairingError> {
        let Some(start) = self.config.start_date else {
            return Ok(None);
        };
        let offset = (round as u64 - 1) * self.config.days_between_rounds as u64;
        start
            .checked_add_days(Days::new(offset))
            .map(Some)
            .ok_or(PairingError::DateOutOfRange(round))
    }

    fn participant(&self, slot: SlotId) -> Option<T> {
        self.interner.resolve(slot).cloned()
    }

    fn build_round(
        &self,
        round: u32,
        cycle: u32,
        seats: &[Seat],
    ) -> Result<Round<T>, PairingError> {
        log_debug!(self.config.verbosity, "  Round {} seats: {:?}", round, seats);

        let pairings: Vec<Pairing<T>> = facing_pairs(seats)
            .filter_map(|pair| match pair {
                (Seat::Occupied(a), Seat::Occupied(b)) => {
                    Some(Pairing::game(self.participant(a)?, self.participant(b)?))
                }
                (Seat::Occupied(a), Seat::Bye) | (Seat::Bye, Seat::Occupied(a)) => {
                    Some(Pairing::bye(self.participant(a)?))
                }
                // Only one bye seat exists.
                (Seat::Bye, Seat::Bye) => None,
            })
            .collect();

        log_changes!(
            self.config.verbosity,
            "Round {} (cycle {}): {} pairings",
            round,
            cycle,
            pairings.len()
        );

        Ok(Round {
            round_number: round,
            cycle,
            date: self.round_date(round)?,
            pairings,
        })
    }
}

/// Pairings for `round_number` with the default configuration.
///
/// Convenience wrapper for callers that only need one round's tables.
pub fn generate_round<T: Clone + Eq + Hash + Debug>(
    participants: &[T],
    round_number: i64,
) -> Result<Vec<Pairing<T>>, PairingError> {
    let scheduler = RoundRobinScheduler::new(participants, PairingConfig::default())?;
    Ok(scheduler.generate_round(round_number)?.pairings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairing::types::Opponent;
    use rustc_hash::FxHashSet;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn reject_config() -> PairingConfig {
        PairingConfig {
            cycle_policy: "reject".to_string(),
            ..PairingConfig::default()
        }
    }

    fn normalized(round: &Round<u32>) -> Vec<(u32, Option<u32>)> {
        let mut pairs: Vec<(u32, Option<u32>)> = round
            .pairings
            .iter()
            .map(|p| match p.player2 {
                Opponent::Participant(p2) => (p.player1.min(p2), Some(p.player1.max(p2))),
                Opponent::Bye => (p.player1, None),
            })
            .collect();
        pairs.sort();
        pairs
    }

    #[test]
    fn test_three_player_scenario() {
        let scheduler = RoundRobinScheduler::new(&[1u32, 2, 3], PairingConfig::default()).unwrap();
        assert_eq!(scheduler.rounds_per_cycle(), 3);
        assert!(scheduler.has_bye());

        let r1 = scheduler.generate_round(1).unwrap();
        assert_eq!(r1.pairings, vec![Pairing::bye(1), Pairing::game(2, 3)]);

        let r2 = scheduler.generate_round(2).unwrap();
        assert_eq!(r2.pairings, vec![Pairing::game(1, 3), Pairing::bye(2)]);

        let r3 = scheduler.generate_round(3).unwrap();
        assert_eq!(r3.pairings, vec![Pairing::game(1, 2), Pairing::bye(3)]);
    }

    #[test]
    fn test_four_player_rounds() {
        let scheduler =
            RoundRobinScheduler::new(&[1u32, 2, 3, 4], PairingConfig::default()).unwrap();
        assert_eq!(scheduler.rounds_per_cycle(), 3);
        assert!(!scheduler.has_bye());

        // seats [1,2,3,4] -> [1,4,2,3] -> [1,3,4,2]
        assert_eq!(
            scheduler.generate_round(1).unwrap().pairings,
            vec![Pairing::game(1, 4), Pairing::game(2, 3)]
        );
        assert_eq!(
            scheduler.generate_round(2).unwrap().pairings,
            vec![Pairing::game(1, 3), Pairing::game(4, 2)]
        );
        assert_eq!(
            scheduler.generate_round(3).unwrap().pairings,
            vec![Pairing::game(1, 2), Pairing::game(3, 4)]
        );
    }

    #[test]
    fn test_two_players() {
        let scheduler = RoundRobinScheduler::new(&["a", "b"], PairingConfig::default()).unwrap();
        assert_eq!(scheduler.rounds_per_cycle(), 1);
        let schedule = scheduler.generate_schedule().unwrap();
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.rounds[0].pairings, vec![Pairing::game("a", "b")]);
    }

    #[test]
    fn test_every_pair_meets_once() {
        for n in 2u32..=16 {
            let participants: Vec<u32> = (1..=n).collect();
            let scheduler =
                RoundRobinScheduler::new(&participants, PairingConfig::default()).unwrap();
            let schedule = scheduler.generate_schedule().unwrap();

            let mut met: FxHashSet<(u32, u32)> = FxHashSet::default();
            let mut byes: Vec<u32> = Vec::new();
            for round in &schedule.rounds {
                let mut seen: FxHashSet<u32> = FxHashSet::default();
                for pairing in &round.pairings {
                    assert!(seen.insert(pairing.player1), "n={} repeat in round", n);
                    match pairing.player2 {
                        Opponent::Participant(p2) => {
                            assert!(seen.insert(p2), "n={} repeat in round", n);
                            let key = (pairing.player1.min(p2), pairing.player1.max(p2));
                            assert!(met.insert(key), "n={} rematch {:?}", n, key);
                        }
                        Opponent::Bye => byes.push(pairing.player1),
                    }
                }
                assert_eq!(seen.len(), n as usize, "n={} incomplete round", n);
            }

            assert_eq!(met.len(), (n * (n - 1) / 2) as usize);
            if n % 2 == 1 {
                byes.sort();
                assert_eq!(byes, participants, "n={} each player sits out once", n);
            } else {
                assert!(byes.is_empty());
            }
        }
    }

    #[test]
    fn test_incremental_matches_replay() {
        let participants: Vec<u32> = (10..19).collect();
        let scheduler = RoundRobinScheduler::new(&participants, PairingConfig::default()).unwrap();

        let schedule = scheduler.generate_rounds(25).unwrap();
        assert_eq!(schedule.len(), 25);
        for round in &schedule.rounds {
            let replayed = scheduler.generate_round(round.round_number as i64).unwrap();
            assert_eq!(*round, replayed);
        }
    }

    #[test]
    fn test_deterministic() {
        let participants = ["w", "x", "y", "z", "v"];
        let a = RoundRobinScheduler::new(&participants, PairingConfig::default()).unwrap();
        let b = RoundRobinScheduler::new(&participants, PairingConfig::default()).unwrap();
        for round in 1..=5 {
            assert_eq!(a.generate_round(round), b.generate_round(round));
            assert_eq!(a.generate_round(round), a.generate_round(round));
        }
    }

    #[test]
    fn test_wrap_repeats_cycle() {
        let participants: Vec<u32> = (1..=6).collect();
        let scheduler = RoundRobinScheduler::new(&participants, PairingConfig::default()).unwrap();

        let first = scheduler.generate_round(2).unwrap();
        let wrapped = scheduler.generate_round(7).unwrap();
        assert_eq!(first.cycle, 1);
        assert_eq!(wrapped.cycle, 2);
        assert_eq!(wrapped.round_number, 7);
        assert_eq!(normalized(&first), normalized(&wrapped));
    }

    #[test]
    fn test_reject_past_cycle() {
        let scheduler = RoundRobinScheduler::new(&[1u32, 2, 3, 4], reject_config()).unwrap();

        assert!(scheduler.generate_round(3).is_ok());
        assert_eq!(
            scheduler.generate_round(4),
            Err(PairingError::RoundOutOfRange {
                round: 4,
                max_round: 3
            })
        );
        assert!(scheduler.generate_rounds(3).is_ok());
        assert!(matches!(
            scheduler.generate_rounds(4),
            Err(PairingError::RoundOutOfRange { round: 4, .. })
        ));
    }

    #[test]
    fn test_reject_huge_round_count() {
        let scheduler = RoundRobinScheduler::new(&[1u32, 2, 3, 4], reject_config()).unwrap();
        assert_eq!(
            scheduler.generate_rounds(u32::MAX),
            Err(PairingError::RoundOutOfRange {
                round: 4,
                max_round: 3
            })
        );
    }

    #[test]
    fn test_date_overflow() {
        let config = PairingConfig {
            start_date: Some(NaiveDate::MAX),
            days_between_rounds: 7,
            ..PairingConfig::default()
        };
        let scheduler = RoundRobinScheduler::new(&[1u32, 2, 3, 4], config).unwrap();

        assert_eq!(
            scheduler.generate_round(1).unwrap().date,
            Some(NaiveDate::MAX)
        );
        assert_eq!(
            scheduler.generate_round(2),
            Err(PairingError::DateOutOfRange(2))
        );
        assert_eq!(
            scheduler.generate_rounds(3),
            Err(PairingError::DateOutOfRange(2))
        );
    }

    #[test]
    fn test_wrap_round_too_large() {
        let scheduler = RoundRobinScheduler::new(&[1u32, 2, 3], PairingConfig::default()).unwrap();
        assert!(matches!(
            scheduler.generate_round(i64::MAX),
            Err(PairingError::RoundOutOfRange { .. })
        ));
    }

    #[test]
    fn test_too_few_participants() {
        let err = RoundRobinScheduler::new(&[1u32], PairingConfig::default()).unwrap_err();
        assert_eq!(
            err,
            PairingError::InvalidInput(InputError::TooFewParticipants(1))
        );
        let empty: [u32; 0] = [];
        assert!(RoundRobinScheduler::new(&empty, PairingConfig::default()).is_err());
    }

    #[test]
    fn test_duplicate_participants() {
        let err = RoundRobinScheduler::new(&["a", "b", "a"], PairingConfig::default()).unwrap_err();
        assert_eq!(
            err,
            PairingError::InvalidInput(InputError::DuplicateParticipant("\"a\"".to_string()))
        );
    }

    #[test]
    fn test_non_positive_round() {
        let scheduler = RoundRobinScheduler::new(&[1u32, 2], PairingConfig::default()).unwrap();
        assert_eq!(
            scheduler.generate_round(0),
            Err(PairingError::InvalidInput(InputError::NonPositiveRound(0)))
        );
        assert_eq!(
            scheduler.generate_round(-3),
            Err(PairingError::InvalidInput(InputError::NonPositiveRound(-3)))
        );
    }

    #[test]
    fn test_unknown_cycle_policy() {
        let config = PairingConfig {
            cycle_policy: "shuffle".to_string(),
            ..PairingConfig::default()
        };
        assert_eq!(
            RoundRobinScheduler::new(&[1u32, 2], config).unwrap_err(),
            PairingError::UnknownCyclePolicy("shuffle".to_string())
        );
    }

    #[test]
    fn test_round_dates() {
        let config = PairingConfig {
            start_date: Some(d(2025, 3, 1)),
            days_between_rounds: 7,
            ..PairingConfig::default()
        };
        let scheduler = RoundRobinScheduler::new(&[1u32, 2, 3, 4], config).unwrap();
        let schedule = scheduler.generate_schedule().unwrap();

        let dates: Vec<_> = schedule.rounds.iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![Some(d(2025, 3, 1)), Some(d(2025, 3, 8)), Some(d(2025, 3, 15))]
        );
    }

    #[test]
    fn test_undated_by_default() {
        let round = RoundRobinScheduler::new(&[1u32, 2], PairingConfig::default())
            .unwrap()
            .generate_round(1)
            .unwrap();
        assert_eq!(round.date, None);
    }

    #[test]
    fn test_generate_round_free_function() {
        let pairings = generate_round(&[1u32, 2, 3], 2).unwrap();
        assert_eq!(pairings, vec![Pairing::game(1, 3), Pairing::bye(2)]);
        assert!(generate_round(&[1u32, 1], 1).is_err());
        assert!(generate_round(&[1u32, 2], 0).is_err());
    }

    #[test]
    fn test_zero_rounds() {
        let scheduler = RoundRobinScheduler::new(&[1u32, 2, 3], PairingConfig::default()).unwrap();
        let schedule = scheduler.generate_rounds(0).unwrap();
        assert!(schedule.is_empty());
        assert_eq!(schedule.participants, vec![1, 2, 3]);
    }
}
