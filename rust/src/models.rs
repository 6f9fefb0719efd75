//! Python-facing data types for pairings, rounds and audits.

use chrono::NaiveDate;
use pyo3::prelude::*;
use std::fmt;

use crate::pairing::{Opponent, Pairing, Round, ScheduleAudit};

/// Participant identifier as passed from Python: an `int` or a `str`.
///
/// `1` and `"1"` are different participants.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, FromPyObject)]
pub enum ParticipantId {
    Int(i64),
    Str(String),
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticipantId::Int(i) => write!(f, "{}", i),
            ParticipantId::Str(s) => write!(f, "{:?}", s),
        }
    }
}

impl ToPyObject for ParticipantId {
    fn to_object(&self, py: Python<'_>) -> PyObject {
        match self {
            ParticipantId::Int(i) => i.to_object(py),
            ParticipantId::Str(s) => s.to_object(py),
        }
    }
}

impl IntoPy<PyObject> for ParticipantId {
    fn into_py(self, py: Python<'_>) -> PyObject {
        self.to_object(py)
    }
}

/// One table in a round.
#[pyclass(name = "Pairing")]
#[derive(Clone, Debug)]
pub struct PyPairing {
    #[pyo3(get)]
    pub player1: ParticipantId,
    /// `None` when `player1` has a bye.
    #[pyo3(get)]
    pub player2: Option<ParticipantId>,
}

#[pymethods]
impl PyPairing {
    #[getter]
    fn is_bye(&self) -> bool {
        self.player2.is_none()
    }

    fn __repr__(&self) -> String {
        match &self.player2 {
            Some(p2) => format!("Pairing({} vs {})", self.player1, p2),
            None => format!("Pairing({} bye)", self.player1),
        }
    }
}

impl From<Pairing<ParticipantId>> for PyPairing {
    fn from(pairing: Pairing<ParticipantId>) -> Self {
        let player2 = match pairing.player2 {
            Opponent::Participant(id) => Some(id),
            Opponent::Bye => None,
        };
        Self {
            player1: pairing.player1,
            player2,
        }
    }
}

/// Pairings for one round.
#[pyclass(name = "Round")]
#[derive(Clone, Debug)]
pub struct PyRound {
    #[pyo3(get)]
    pub round_number: u32,
    #[pyo3(get)]
    pub cycle: u32,
    #[pyo3(get)]
    pub date: Option<NaiveDate>,
    #[pyo3(get)]
    pub pairings: Vec<PyPairing>,
}

#[pymethods]
impl PyRound {
    /// Participant sitting out this round, if any.
    #[getter]
    fn bye(&self) -> Option<ParticipantId> {
        self.pairings
            .iter()
            .find(|p| p.player2.is_none())
            .map(|p| p.player1.clone())
    }

    fn __repr__(&self) -> String {
        format!(
            "Round(round_number={}, cycle={}, date={:?}, pairings={})",
            self.round_number,
            self.cycle,
            self.date,
            self.pairings.len()
        )
    }
}

impl From<Round<ParticipantId>> for PyRound {
    fn from(round: Round<ParticipantId>) -> Self {
        Self {
            round_number: round.round_number,
            cycle: round.cycle,
            date: round.date,
            pairings: round.pairings.into_iter().map(PyPairing::from).collect(),
        }
    }
}

/// Audit findings for a schedule.
#[pyclass(name = "ScheduleAudit")]
#[derive(Clone, Debug)]
pub struct PyScheduleAudit {
    #[pyo3(get)]
    pub complete: bool,
    #[pyo3(get)]
    pub conflicts: Vec<(u32, ParticipantId)>,
    #[pyo3(get)]
    pub absences: Vec<(u32, ParticipantId)>,
    #[pyo3(get)]
    pub multiple_bye_rounds: Vec<u32>,
    #[pyo3(get)]
    pub missing_pairs: Vec<(ParticipantId, ParticipantId)>,
    #[pyo3(get)]
    pub repeated_pairs: Vec<(ParticipantId, ParticipantId, u32)>,
    #[pyo3(get)]
    pub bye_counts: Vec<(ParticipantId, u32)>,
}

#[pymethods]
impl PyScheduleAudit {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleAudit(complete={}, conflicts={}, missing_pairs={}, repeated_pairs={})",
            self.complete,
            self.conflicts.len(),
            self.missing_pairs.len(),
            self.repeated_pairs.len()
        )
    }
}

impl From<ScheduleAudit<ParticipantId>> for PyScheduleAudit {
    fn from(audit: ScheduleAudit<ParticipantId>) -> Self {
        Self {
            complete: audit.is_complete(),
            conflicts: audit.conflicts,
            absences: audit.absences,
            multiple_bye_rounds: audit.multiple_bye_rounds,
            missing_pairs: audit.missing_pairs,
            repeated_pairs: audit.repeated_pairs,
            bye_counts: audit.bye_counts,
        }
    }
}
