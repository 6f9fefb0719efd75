//! Pairing, round and schedule types.

use chrono::NaiveDate;

/// The other side of a pairing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Opponent<T> {
    /// A real participant.
    Participant(T),
    /// Sitting out this round.
    Bye,
}

impl<T> Opponent<T> {
    pub fn is_bye(&self) -> bool {
        matches!(self, Opponent::Bye)
    }

    /// The opposing participant, or `None` for a bye.
    pub fn participant(&self) -> Option<&T> {
        match self {
            Opponent::Participant(id) => Some(id),
            Opponent::Bye => None,
        }
    }
}

/// One table in a round. A bye always has the real participant as `player1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pairing<T> {
    pub player1: T,
    pub player2: Opponent<T>,
}

impl<T: Clone + PartialEq> Pairing<T> {
    /// A match between two participants.
    pub fn game(player1: T, player2: T) -> Self {
        Self {
            player1,
            player2: Opponent::Participant(player2),
        }
    }

    /// A bye for one participant.
    pub fn bye(player: T) -> Self {
        Self {
            player1: player,
            player2: Opponent::Bye,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.player2.is_bye()
    }

    /// Whether `id` sits at this table.
    pub fn involves(&self, id: &T) -> bool {
        self.player1 == *id || self.player2.participant() == Some(id)
    }

    /// Who `id` faces here, if `id` sits at this table.
    pub fn opponent_of(&self, id: &T) -> Option<Opponent<T>> {
        if self.player1 == *id {
            return Some(self.player2.clone());
        }
        match &self.player2 {
            Opponent::Participant(p2) if p2 == id => {
                Some(Opponent::Participant(self.player1.clone()))
            }
            _ => None,
        }
    }
}

/// All pairings for one round number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round<T> {
    /// 1-based round number across all cycles.
    pub round_number: u32,
    /// 1-based cycle this round belongs to.
    pub cycle: u32,
    /// Scheduled date, when the configuration has a start date.
    pub date: Option<NaiveDate>,
    pub pairings: Vec<Pairing<T>>,
}

impl<T: Clone + PartialEq> Round<T> {
    /// Real matches only (byes skipped).
    pub fn games(&self) -> impl Iterator<Item = (&T, &T)> + '_ {
        self.pairings
            .iter()
            .filter_map(|p| p.player2.participant().map(|p2| (&p.player1, p2)))
    }

    /// Participant sitting out this round, if any.
    pub fn bye(&self) -> Option<&T> {
        self.pairings
            .iter()
            .find(|p| p.is_bye())
            .map(|p| &p.player1)
    }

    /// Who `id` faces this round (`None` if `id` is not in the round).
    pub fn opponent_of(&self, id: &T) -> Option<Opponent<T>> {
        self.pairings.iter().find_map(|p| p.opponent_of(id))
    }
}

/// Ordered rounds for a fixed participant list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schedule<T> {
    /// Participants in the order given to the scheduler.
    pub participants: Vec<T>,
    pub rounds: Vec<Round<T>>,
}

impl<T> Schedule<T> {
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Round by 1-based number.
    pub fn round(&self, round_number: u32) -> Option<&Round<T>> {
        self.rounds.iter().find(|r| r.round_number == round_number)
    }
}
