//! Round-robin tournament pairing.
//!
//! This crate generates conflict-free round-robin schedules with the circle
//! method and exposes them to Python.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

mod config;
mod interner;
pub mod logging;
mod models;
pub mod pairing;

pub use config::{CyclePolicy, PairingConfig};
pub use interner::{ParticipantInterner, SlotId};
pub use models::{ParticipantId, PyPairing, PyRound, PyScheduleAudit};
pub use pairing::{
    audit_schedule, generate_round, InputError, Opponent, Pairing, PairingError, Round,
    RoundRobinScheduler, Schedule, ScheduleAudit,
};

fn to_py_err(err: PairingError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}

fn build_scheduler(
    participants: &[ParticipantId],
    config: Option<PairingConfig>,
) -> PyResult<RoundRobinScheduler<ParticipantId>> {
    RoundRobinScheduler::new(participants, config.unwrap_or_default()).map_err(to_py_err)
}

/// Generate the pairings for one round.
///
/// # Arguments
/// * `participants` - Unique participant IDs (int or str), at least 2
/// * `round_number` - 1-based round number
/// * `config` - Pairing configuration (cycle policy, dates, verbosity)
///
/// # Returns
/// * Round with its pairings; a bye is a pairing whose `player2` is None
///
/// # Raises
/// * ValueError on too few or duplicate participants, a round number below 1,
///   or a round past the cycle when the policy is "reject"
#[pyfunction]
#[pyo3(name = "generate_round", signature = (participants, round_number, config=None))]
fn py_generate_round(
    participants: Vec<ParticipantId>,
    round_number: i64,
    config: Option<PairingConfig>,
) -> PyResult<PyRound> {
    let scheduler = build_scheduler(&participants, config)?;
    let round = scheduler.generate_round(round_number).map_err(to_py_err)?;
    Ok(round.into())
}

/// Generate one full round-robin cycle.
///
/// # Returns
/// * List of rounds 1..=N-1 (even N) or 1..=N (odd N)
#[pyfunction]
#[pyo3(name = "generate_schedule", signature = (participants, config=None))]
fn py_generate_schedule(
    participants: Vec<ParticipantId>,
    config: Option<PairingConfig>,
) -> PyResult<Vec<PyRound>> {
    let scheduler = build_scheduler(&participants, config)?;
    let schedule = scheduler.generate_schedule().map_err(to_py_err)?;
    Ok(schedule.rounds.into_iter().map(PyRound::from).collect())
}

/// Generate rounds 1..=count in order, wrapping or rejecting past one cycle
/// according to the configured cycle policy.
#[pyfunction]
#[pyo3(name = "generate_rounds", signature = (participants, count, config=None))]
fn py_generate_rounds(
    participants: Vec<ParticipantId>,
    count: u32,
    config: Option<PairingConfig>,
) -> PyResult<Vec<PyRound>> {
    let scheduler = build_scheduler(&participants, config)?;
    let schedule = scheduler.generate_rounds(count).map_err(to_py_err)?;
    Ok(schedule.rounds.into_iter().map(PyRound::from).collect())
}

/// Generate one full cycle and audit it.
///
/// # Returns
/// * ScheduleAudit; `complete` is True when every pair meets exactly once
///   and nobody sits out more than once
#[pyfunction]
#[pyo3(name = "audit_schedule", signature = (participants, config=None))]
fn py_audit_schedule(
    participants: Vec<ParticipantId>,
    config: Option<PairingConfig>,
) -> PyResult<PyScheduleAudit> {
    let scheduler = build_scheduler(&participants, config)?;
    let schedule = scheduler.generate_schedule().map_err(to_py_err)?;
    Ok(audit_schedule(&schedule).into())
}

/// The tourney.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Data types
    m.add_class::<PyPairing>()?;
    m.add_class::<PyRound>()?;
    m.add_class::<PyScheduleAudit>()?;

    // Config types
    m.add_class::<PairingConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_generate_round, m)?)?;
    m.add_function(wrap_pyfunction!(py_generate_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(py_generate_rounds, m)?)?;
    m.add_function(wrap_pyfunction!(py_audit_schedule, m)?)?;

    Ok(())
}
