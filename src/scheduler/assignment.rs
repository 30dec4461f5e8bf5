use super::{fairness, WeekState};
use crate::model::{Day, Shift};
use rand::Rng;

/// Passe par préférences classées pour un jour.
///
/// Pour chaque rang (0 = premier choix) puis chaque créneau dans l'ordre fixe,
/// les intéressés encore disponibles dont le choix de ce rang est ce créneau
/// sont départagés par [`fairness::select`] dans la limite des places
/// restantes. Les non retenus restent candidats aux rangs suivants.
///
/// Renvoie, dans l'ordre du roster, les intéressés restés sans créneau.
pub(super) fn assign_ranked<R: Rng + ?Sized>(
    week: &mut WeekState<'_>,
    day: Day,
    rng: &mut R,
) -> Vec<usize> {
    let interested: Vec<usize> = (0..week.employees().len())
        .filter(|&idx| week.can_work(idx, day) && week.employees()[idx].has_preference(day))
        .collect();

    let max_rank = interested
        .iter()
        .map(|&idx| week.employees()[idx].preferences(day).len())
        .max()
        .unwrap_or(0);

    for rank in 0..max_rank {
        for shift in Shift::ALL {
            let candidates: Vec<usize> = interested
                .iter()
                .copied()
                .filter(|&idx| {
                    week.can_work(idx, day)
                        && week.employees()[idx].preference_at(day, rank) == Some(shift)
                })
                .collect();
            if candidates.is_empty() {
                continue;
            }
            // créneau plein : les candidats retentent au rang suivant ou au report
            let quota = week.room(day, shift);
            if quota == 0 {
                continue;
            }
            for idx in fairness::select(week.employees(), &candidates, quota, rng) {
                week.assign(idx, day, shift);
            }
        }
    }

    interested
        .into_iter()
        .filter(|&idx| week.employees()[idx].assignment(day).is_none())
        .collect()
}
