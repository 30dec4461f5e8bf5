use super::{Warning, WeekState};
use crate::model::{Day, Shift};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

/// Complète chaque créneau sous le minimum, sans tenir compte des préférences.
///
/// Tire uniformément un employé disponible ce jour-là jusqu'à atteindre le
/// minimum ; s'il n'en reste aucun, émet un [`Warning::Understaffed`].
pub(super) fn backfill<R: Rng + ?Sized>(
    week: &mut WeekState<'_>,
    rng: &mut R,
    warnings: &mut Vec<Warning>,
) {
    let required = week.opts.min_per_shift as usize;
    for day in Day::ALL {
        for shift in Shift::ALL {
            while week.grid().occupancy(day, shift) < required {
                let eligible = week.eligible(day);
                let Some(&idx) = eligible.choose(rng) else {
                    let w = Warning::Understaffed {
                        day,
                        shift,
                        staffed: week.grid().occupancy(day, shift),
                        required,
                    };
                    warn!("{w}");
                    warnings.push(w);
                    break;
                };
                week.assign(idx, day, shift);
            }
        }
    }
}
