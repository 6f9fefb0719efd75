//! Schedule audit: checks a generated schedule against round-robin rules.

use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::Hash;

use crate::interner::{ParticipantInterner, SlotId};

use super::types::{Opponent, Schedule};

/// Findings from auditing one cycle of a schedule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleAudit<T> {
    /// (round_number, participant) for anyone seated twice in a round.
    pub conflicts: Vec<(u32, T)>,
    /// (round_number, participant) for anyone missing from a round.
    pub absences: Vec<(u32, T)>,
    /// Rounds with more than one bye.
    pub multiple_bye_rounds: Vec<u32>,
    /// Pairs of participants that never met.
    pub missing_pairs: Vec<(T, T)>,
    /// Pairs that met more than once, with their meeting count.
    pub repeated_pairs: Vec<(T, T, u32)>,
    /// Byes per participant, in participant order.
    pub bye_counts: Vec<(T, u32)>,
}

impl<T> ScheduleAudit<T> {
    /// True when the schedule is a clean single round-robin cycle.
    pub fn is_complete(&self) -> bool {
        self.conflicts.is_empty()
            && self.absences.is_empty()
            && self.multiple_bye_rounds.is_empty()
            && self.missing_pairs.is_empty()
            && self.repeated_pairs.is_empty()
            && self.bye_counts.iter().all(|(_, count)| *count <= 1)
    }
}

fn pair_key(a: SlotId, b: SlotId) -> (SlotId, SlotId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Audit `schedule` as a single cycle over `schedule.participants`.
///
/// Works on any schedule, not only ones this crate generated; IDs found in
/// rounds but not in the participant list are counted like any other.
pub fn audit_schedule<T: Clone + Eq + Hash>(schedule: &Schedule<T>) -> ScheduleAudit<T> {
    let mut interner = ParticipantInterner::with_capacity(schedule.participants.len());
    for id in &schedule.participants {
        interner.intern(id);
    }
    let roster = interner.slot_count();

    let mut conflicts = Vec::new();
    let mut absences = Vec::new();
    let mut multiple_bye_rounds = Vec::new();
    let mut meetings: FxHashMap<(SlotId, SlotId), u32> = FxHashMap::default();
    let mut byes: FxHashMap<SlotId, u32> = FxHashMap::default();

    for round in &schedule.rounds {
        let mut seated: FxHashSet<SlotId> = FxHashSet::default();
        let mut round_byes = 0;

        for pairing in &round.pairings {
            let p1 = interner.intern(&pairing.player1);
            if !seated.insert(p1) {
                conflicts.push((round.round_number, pairing.player1.clone()));
            }

            match &pairing.player2 {
                Opponent::Participant(id) => {
                    let p2 = interner.intern(id);
                    if !seated.insert(p2) {
                        conflicts.push((round.round_number, id.clone()));
                    }
                    *meetings.entry(pair_key(p1, p2)).or_insert(0) += 1;
                }
                Opponent::Bye => {
                    round_byes += 1;
                    *byes.entry(p1).or_insert(0) += 1;
                }
            }
        }

        if round_byes > 1 {
            multiple_bye_rounds.push(round.round_number);
        }
        for slot in 0..roster as SlotId {
            if seated.contains(&slot) {
                continue;
            }
            if let Some(id) = interner.resolve(slot) {
                absences.push((round.round_number, id.clone()));
            }
        }
    }

    let ids = interner.ids();
    let mut missing_pairs = Vec::new();
    let mut repeated_pairs = Vec::new();
    for a in 0..roster as SlotId {
        for b in (a + 1)..roster as SlotId {
            let count = meetings.get(&(a, b)).copied().unwrap_or(0);
            let pair = (ids[a as usize].clone(), ids[b as usize].clone());
            match count {
                0 => missing_pairs.push(pair),
                1 => {}
                n => repeated_pairs.push((pair.0, pair.1, n)),
            }
        }
    }

    let bye_counts = (0..roster as SlotId)
        .map(|slot| {
            (
                ids[slot as usize].clone(),
                byes.get(&slot).copied().unwrap_or(0),
            )
        })
        .collect();

    ScheduleAudit {
        conflicts,
        absences,
        multiple_bye_rounds,
        missing_pairs,
        repeated_pairs,
        bye_counts,
    }
}
