#![forbid(unsafe_code)]
//! Shiftplan — planification hebdomadaire d'équipes à partir de préférences classées.
//!
//! - Passes par rang de préférence, départage équitable par charge puis au hasard.
//! - Report des conflits au lendemain, complément au minimum en fin de semaine.
//! - Aléa injecté et ensemencé : même roster + même graine = même planning.
//! - Stockage fichiers (JSON/CSV) ; affichage en dehors de la lib.

pub mod grid;
pub mod io;
pub mod model;
pub mod scheduler;
pub mod storage;

pub use grid::ScheduleGrid;
pub use model::{Day, Employee, EmployeeRecord, Roster, Shift};
pub use scheduler::{SchedError, SchedOptions, ScheduleOutcome, Scheduler, Violation, Warning};
pub use storage::{JsonStorage, Storage};
