use crate::model::Employee;
use rand::seq::SliceRandom;
use rand::Rng;

/// Sélection équitable de `quota` candidats parmi `pool` (indices dans `employees`).
///
/// Les candidats sont regroupés par paliers de `days_worked` croissants ; un
/// palier n'est mélangé (via `rng`) que s'il est atteint avant que le quota soit
/// rempli. Un candidat ayant moins de jours passe toujours avant un candidat
/// qui en a plus. À palier égal, l'ordre d'entrée (ordre du roster) sert de
/// base au mélange, ce qui rend le tirage reproductible pour une graine donnée.
pub(crate) fn select<R: Rng + ?Sized>(
    employees: &[Employee],
    pool: &[usize],
    quota: usize,
    rng: &mut R,
) -> Vec<usize> {
    if pool.is_empty() || quota == 0 {
        return Vec::new();
    }

    let mut sorted = pool.to_vec();
    sorted.sort_by_key(|&idx| employees[idx].days_worked());

    let mut chosen = Vec::with_capacity(quota.min(sorted.len()));
    for tier in sorted.chunk_by_mut(|a, b| employees[*a].days_worked() == employees[*b].days_worked())
    {
        if chosen.len() == quota {
            break;
        }
        tier.shuffle(rng);
        let take = (quota - chosen.len()).min(tier.len());
        chosen.extend_from_slice(&tier[..take]);
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Day, Shift};
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn staff_with_days(days: &[u32]) -> Vec<Employee> {
        days.iter()
            .enumerate()
            .map(|(i, &n)| {
                let mut e = Employee::new(format!("e{i}"));
                for day in Day::ALL.iter().take(n as usize) {
                    e.record_assignment(*day, Shift::Morning);
                }
                e
            })
            .collect()
    }

    #[test]
    fn lower_workload_tier_is_chosen_first() {
        let employees = staff_with_days(&[2, 0, 1, 0, 3]);
        let pool: Vec<usize> = (0..employees.len()).collect();
        let mut rng = StdRng::seed_from_u64(7);

        let mut two = select(&employees, &pool, 2, &mut rng);
        two.sort_unstable();
        assert_eq!(two, vec![1, 3]);

        let three = select(&employees, &pool, 3, &mut rng);
        assert_eq!(three.len(), 3);
        assert_eq!(three[2], 2);
    }

    #[test]
    fn never_selects_busier_over_idler_candidate() {
        let employees = staff_with_days(&[1, 4, 0, 2, 2, 1, 0, 3]);
        let pool = vec![0, 1, 3, 4, 5, 6, 7];
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = select(&employees, &pool, 4, &mut rng);
            let max_picked = picked
                .iter()
                .map(|&i| employees[i].days_worked())
                .max()
                .unwrap();
            let min_left = pool
                .iter()
                .filter(|&&i| !picked.contains(&i))
                .map(|&i| employees[i].days_worked())
                .min()
                .unwrap();
            assert!(max_picked <= min_left, "seed {seed}: {picked:?}");
        }
    }

    #[test]
    fn result_is_bounded_by_pool_and_unique() {
        let employees = staff_with_days(&[0, 0, 0]);
        let mut rng = StdRng::seed_from_u64(1);
        let mut picked = select(&employees, &[0, 2], 10, &mut rng);
        picked.sort_unstable();
        assert_eq!(picked, vec![0, 2]);
        assert!(select(&employees, &[], 3, &mut rng).is_empty());
        assert!(select(&employees, &[0, 1], 0, &mut rng).is_empty());
    }

    #[test]
    fn zero_stream_reverses_a_two_member_tier() {
        let employees = staff_with_days(&[0, 0]);
        let mut rng = StepRng::new(0, 0);
        assert_eq!(select(&employees, &[0, 1], 1, &mut rng), vec![1]);
    }
}
