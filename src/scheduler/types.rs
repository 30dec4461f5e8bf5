use crate::grid::ScheduleGrid;
use crate::model::{Day, Shift};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const DEFAULT_WEEKLY_DAY_CAP: u32 = 5;
pub const DEFAULT_MIN_PER_SHIFT: u32 = 2;
pub const DEFAULT_SEED: u64 = 42;

/// Options de planification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedOptions {
    pub weekly_day_cap: u32,
    pub min_per_shift: u32,
    /// Plafond dur par créneau ; `None` = variante « minimum seulement ».
    #[serde(default)]
    pub max_per_shift: Option<u32>,
    pub seed: u64,
}

impl Default for SchedOptions {
    fn default() -> Self {
        Self {
            weekly_day_cap: DEFAULT_WEEKLY_DAY_CAP,
            min_per_shift: DEFAULT_MIN_PER_SHIFT,
            max_per_shift: None,
            seed: DEFAULT_SEED,
        }
    }
}

impl SchedOptions {
    pub fn with_max_per_shift(mut self, max: u32) -> Self {
        self.max_per_shift = Some(max);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), SchedError> {
        if self.weekly_day_cap == 0 {
            return Err(SchedError::InvalidOptions("weekly_day_cap must be > 0"));
        }
        if let Some(max) = self.max_per_shift {
            if max == 0 {
                return Err(SchedError::InvalidOptions("max_per_shift must be > 0"));
            }
            if max < self.min_per_shift {
                return Err(SchedError::InvalidOptions(
                    "max_per_shift must be >= min_per_shift",
                ));
            }
        }
        Ok(())
    }

    /// Occupation visée par la passe par préférences et par le report.
    pub fn fill_target(&self) -> u32 {
        self.max_per_shift.unwrap_or(self.min_per_shift)
    }
}

/// Avertissements non bloquants remontés avec le planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    Infeasible {
        required: u64,
        available: u64,
        additional_employees: u64,
    },
    Understaffed {
        day: Day,
        shift: Shift,
        staffed: usize,
        required: usize,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::Infeasible {
                required,
                available,
                additional_employees,
            } => write!(
                f,
                "infeasible: need {required} person-shifts but only {available} available; \
                 add at least {additional_employees} employee(s) or relax the weekly day cap"
            ),
            Warning::Understaffed {
                day,
                shift,
                staffed,
                required,
            } => write!(
                f,
                "understaffed {day} {shift}: staffed {staffed}/{required} (no eligible employee left)"
            ),
        }
    }
}

/// Écart constaté a posteriori sur un planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    Understaffed {
        day: Day,
        shift: Shift,
        staffed: usize,
        required: usize,
    },
    Overstaffed {
        day: Day,
        shift: Shift,
        staffed: usize,
        max: usize,
    },
    DoubleBooked {
        employee: String,
        day: Day,
    },
    OverWeeklyCap {
        employee: String,
        days: u32,
        cap: u32,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Understaffed {
                day,
                shift,
                staffed,
                required,
            } => write!(f, "understaffed: {day} {shift} -> {staffed}/{required}"),
            Violation::Overstaffed {
                day,
                shift,
                staffed,
                max,
            } => write!(f, "overstaffed: {day} {shift} -> {staffed}/{max}"),
            Violation::DoubleBooked { employee, day } => {
                write!(f, "double-booked: {employee} on {day}")
            }
            Violation::OverWeeklyCap {
                employee,
                days,
                cap,
            } => write!(f, "{employee} worked {days} days (>{cap})"),
        }
    }
}

/// Résultat d'une planification : toujours produit, éventuellement incomplet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleOutcome {
    pub grid: ScheduleGrid,
    pub warnings: Vec<Warning>,
}

impl ScheduleOutcome {
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("roster is empty")]
    EmptyRoster,
    #[error("invalid employee name: {0:?}")]
    InvalidName(String),
    #[error("duplicate employee: {0}")]
    DuplicateEmployee(String),
    #[error("unknown day label: {0}")]
    UnknownDay(String),
    #[error("day listed twice: {0}")]
    DuplicateDay(Day),
    #[error("unknown shift label: {0}")]
    UnknownShift(String),
    #[error("invalid options: {0}")]
    InvalidOptions(&'static str),
}
