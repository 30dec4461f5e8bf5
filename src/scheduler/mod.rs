mod assignment;
mod audit;
mod backfill;
mod carry;
mod fairness;
mod feasibility;
mod types;

pub use types::{
    SchedError, SchedOptions, ScheduleOutcome, Violation, Warning, DEFAULT_MIN_PER_SHIFT,
    DEFAULT_SEED, DEFAULT_WEEKLY_DAY_CAP,
};

use crate::grid::ScheduleGrid;
use crate::model::{Day, Employee, Roster, Shift};
use carry::ConflictQueues;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace, warn};

/// Scheduler : possède les options et la source aléatoire d'une série de runs.
///
/// Le générateur n'est jamais réensemencé : deux appels successifs à
/// [`Scheduler::schedule`] consomment la suite du même flux. Pour rejouer un
/// planning à l'identique, créer un nouveau `Scheduler` avec la même graine.
#[derive(Debug)]
pub struct Scheduler<R = StdRng> {
    opts: SchedOptions,
    rng: R,
}

impl Scheduler<StdRng> {
    /// Ensemence un `StdRng` à partir de `opts.seed`.
    pub fn new(opts: SchedOptions) -> Self {
        let rng = StdRng::seed_from_u64(opts.seed);
        Self { opts, rng }
    }
}

impl<R: Rng> Scheduler<R> {
    /// Injecte une source aléatoire arbitraire (tests, rejeu).
    pub fn with_rng(opts: SchedOptions, rng: R) -> Self {
        Self { opts, rng }
    }

    pub fn options(&self) -> &SchedOptions {
        &self.opts
    }

    /// Planifie la semaine. Les affectations précédentes du roster sont effacées.
    pub fn schedule(&mut self, roster: &mut Roster) -> Result<ScheduleOutcome, SchedError> {
        self.opts.validate()?;
        if roster.is_empty() {
            return Err(SchedError::EmptyRoster);
        }
        roster.validate()?;
        roster.clear_assignments();

        info!(
            employees = roster.len(),
            weekly_day_cap = self.opts.weekly_day_cap,
            min_per_shift = self.opts.min_per_shift,
            max_per_shift = ?self.opts.max_per_shift,
            "scheduling week"
        );

        let mut warnings = Vec::new();
        if let Some(w) = feasibility::check(roster.len(), &self.opts) {
            warn!("{w}");
            warnings.push(w);
        }

        let mut week = WeekState::new(roster.employees_mut(), self.opts);
        let mut queues = ConflictQueues::default();

        for day in Day::ALL {
            for idx in assignment::assign_ranked(&mut week, day, &mut self.rng) {
                queues.enqueue(day, idx);
            }
            carry::carry_forward(&mut week, day, &mut queues);
            debug!(
                %day,
                staffed = week.staffed(day),
                queued = queues.len(day),
                "day processed"
            );
        }

        carry::drop_week_end(&week, &mut queues);

        backfill::backfill(&mut week, &mut self.rng, &mut warnings);

        let grid = week.into_grid();
        info!(
            assignments = grid.total_assignments(),
            warnings = warnings.len(),
            "week scheduled"
        );
        Ok(ScheduleOutcome { grid, warnings })
    }

    /// Contrôle de faisabilité seul, sans planifier.
    pub fn check_feasibility(&self, employee_count: usize) -> Option<Warning> {
        feasibility::check(employee_count, &self.opts)
    }

    /// Recalcule les écarts d'un planning par rapport aux options courantes.
    pub fn audit(&self, grid: &ScheduleGrid) -> Vec<Violation> {
        audit::audit(grid, &self.opts)
    }
}

/// État mutable d'un run, partagé par toutes les passes.
pub(crate) struct WeekState<'r> {
    employees: &'r mut [Employee],
    grid: ScheduleGrid,
    opts: SchedOptions,
}

impl<'r> WeekState<'r> {
    pub(crate) fn new(employees: &'r mut [Employee], opts: SchedOptions) -> Self {
        Self {
            employees,
            grid: ScheduleGrid::new(),
            opts,
        }
    }

    pub(crate) fn employees(&self) -> &[Employee] {
        &*self.employees
    }

    pub(crate) fn grid(&self) -> &ScheduleGrid {
        &self.grid
    }

    pub(crate) fn can_work(&self, idx: usize, day: Day) -> bool {
        self.employees[idx].can_work(day, self.opts.weekly_day_cap)
    }

    /// Indices des employés disponibles ce jour, dans l'ordre du roster.
    pub(crate) fn eligible(&self, day: Day) -> Vec<usize> {
        (0..self.employees.len())
            .filter(|&idx| self.can_work(idx, day))
            .collect()
    }

    /// Places restantes avant la cible de remplissage.
    pub(crate) fn room(&self, day: Day, shift: Shift) -> usize {
        (self.opts.fill_target() as usize).saturating_sub(self.grid.occupancy(day, shift))
    }

    pub(crate) fn assign(&mut self, idx: usize, day: Day, shift: Shift) {
        let employee = &mut self.employees[idx];
        let days_worked = employee.record_assignment(day, shift);
        trace!(employee = employee.name(), %day, %shift, days_worked, "assigned");
        self.grid.push(day, shift, employee.name().to_string());
    }

    fn staffed(&self, day: Day) -> usize {
        Shift::ALL.iter().map(|s| self.grid.occupancy(day, *s)).sum()
    }

    fn into_grid(self) -> ScheduleGrid {
        self.grid
    }
}
