//! Configuration types for pairing generation.

use chrono::NaiveDate;
use pyo3::prelude::*;

use crate::logging::level_name;

/// What to do with round numbers past the end of one full cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CyclePolicy {
    /// Start a new cycle that repeats the rotation from round 1.
    Wrap,
    /// Fail with `PairingError::RoundOutOfRange`.
    Reject,
}

impl CyclePolicy {
    /// Parse a policy name ("wrap" or "reject").
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "wrap" => Some(Self::Wrap),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// Configuration for round-robin pairing generation.
#[pyclass]
#[derive(Clone, Debug)]
pub struct PairingConfig {
    /// Cycle policy: "wrap" or "reject"
    #[pyo3(get, set)]
    pub cycle_policy: String,
    /// Date of round 1; rounds are undated when unset
    #[pyo3(get, set)]
    pub start_date: Option<NaiveDate>,
    /// Days between consecutive rounds
    #[pyo3(get, set)]
    pub days_between_rounds: u32,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            cycle_policy: "wrap".to_string(),
            start_date: None,
            days_between_rounds: 7,
            verbosity: 0,
        }
    }
}

#[pymethods]
impl PairingConfig {
    #[new]
    #[pyo3(signature = (
        cycle_policy=None,
        start_date=None,
        days_between_rounds=None,
        verbosity=None
    ))]
    fn new(
        cycle_policy: Option<String>,
        start_date: Option<NaiveDate>,
        days_between_rounds: Option<u32>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            cycle_policy: cycle_policy.unwrap_or(defaults.cycle_policy),
            start_date,
            days_between_rounds: days_between_rounds.unwrap_or(defaults.days_between_rounds),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "PairingConfig(cycle_policy={:?}, start_date={:?}, days_between_rounds={}, verbosity={} ({}))",
            self.cycle_policy,
            self.start_date,
            self.days_between_rounds,
            self.verbosity,
            level_name(self.verbosity)
        )
    }
}
