use super::WeekState;
use crate::model::{Day, Shift};
use std::collections::VecDeque;
use tracing::debug;

/// Files de conflits : une FIFO par jour, un employé au plus une fois par file.
#[derive(Debug, Default)]
pub(crate) struct ConflictQueues {
    queues: [VecDeque<usize>; Day::COUNT],
}

impl ConflictQueues {
    pub(crate) fn enqueue(&mut self, day: Day, idx: usize) {
        let queue = &mut self.queues[day.index()];
        if !queue.contains(&idx) {
            queue.push_back(idx);
        }
    }

    /// Vide la file du jour ; elle n'est drainée qu'une fois.
    pub(crate) fn take(&mut self, day: Day) -> VecDeque<usize> {
        std::mem::take(&mut self.queues[day.index()])
    }

    pub(crate) fn len(&self, day: Day) -> usize {
        self.queues[day.index()].len()
    }
}

/// Reporte sur `day` les conflits de la veille, après la passe par préférences.
///
/// Chaque employé reporté est placé sur son premier créneau préféré du jour
/// ayant de la place, sinon sur le premier créneau ayant de la place, sinon
/// remis en file pour le lendemain. Un employé devenu indisponible est
/// abandonné. La file du dimanche n'est jamais drainée : ce qui y reste est
/// perdu en fin de semaine.
pub(super) fn carry_forward(week: &mut WeekState<'_>, day: Day, queues: &mut ConflictQueues) {
    let carried = queues.take(day.previous());
    for idx in carried {
        if !week.can_work(idx, day) {
            debug!(employee = week.employees()[idx].name(), %day, "conflict dropped");
            continue;
        }

        let preferred = week.employees()[idx]
            .preferences(day)
            .iter()
            .copied()
            .find(|&shift| week.room(day, shift) > 0);
        let target =
            preferred.or_else(|| Shift::ALL.into_iter().find(|&shift| week.room(day, shift) > 0));

        match target {
            Some(shift) => week.assign(idx, day, shift),
            None => queues.enqueue(day, idx),
        }
    }
}

/// Fin de semaine : la file du dimanche est vidée sans être reportée.
/// Renvoie le nombre de conflits perdus.
pub(super) fn drop_week_end(week: &WeekState<'_>, queues: &mut ConflictQueues) -> usize {
    let leftovers = queues.take(Day::Sun);
    for &idx in &leftovers {
        debug!(employee = week.employees()[idx].name(), "conflict dropped at week end");
    }
    if !leftovers.is_empty() {
        debug!(dropped = leftovers.len(), "unresolved conflicts dropped at week end");
    }
    leftovers.len()
}
