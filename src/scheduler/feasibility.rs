use super::{SchedOptions, Warning};
use crate::model::{Day, Shift};

/// Vérifie que la capacité hebdomadaire couvre la demande minimale.
///
/// `required = jours × créneaux × min_per_shift`, `available = employés × plafond`.
/// Purement indicatif : le planning est produit quoi qu'il arrive.
pub(super) fn check(employee_count: usize, opts: &SchedOptions) -> Option<Warning> {
    let cap = u64::from(opts.weekly_day_cap);
    let employees = employee_count as u64;
    let required = (Day::COUNT * Shift::COUNT) as u64 * u64::from(opts.min_per_shift);
    let available = employees * cap;
    if available >= required || cap == 0 {
        return None;
    }
    Some(Warning::Infeasible {
        required,
        available,
        additional_employees: required.div_ceil(cap) - employees,
    })
}
