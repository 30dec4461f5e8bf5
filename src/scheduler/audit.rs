use super::{SchedOptions, Violation};
use crate::grid::ScheduleGrid;
use crate::model::Day;
use std::collections::BTreeMap;

pub(super) fn audit(grid: &ScheduleGrid, opts: &SchedOptions) -> Vec<Violation> {
    let mut out = Vec::new();
    let required = opts.min_per_shift as usize;

    for (day, shift, staff) in grid.iter() {
        if staff.len() < required {
            out.push(Violation::Understaffed {
                day,
                shift,
                staffed: staff.len(),
                required,
            });
        }
        if let Some(max) = opts.max_per_shift.map(|m| m as usize) {
            if staff.len() > max {
                out.push(Violation::Overstaffed {
                    day,
                    shift,
                    staffed: staff.len(),
                    max,
                });
            }
        }
    }

    // jours travaillés par nom, en comptant une fois un nom présent plusieurs fois le même jour
    let mut days_per_employee: BTreeMap<&str, u32> = BTreeMap::new();
    for day in Day::ALL {
        let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
        for (_, _, staff) in grid.iter().filter(|(d, _, _)| *d == day) {
            for name in staff {
                *seen.entry(name.as_str()).or_default() += 1;
            }
        }
        for (name, count) in seen {
            if count > 1 {
                out.push(Violation::DoubleBooked {
                    employee: name.to_string(),
                    day,
                });
            }
            *days_per_employee.entry(name).or_default() += 1;
        }
    }

    for (name, days) in days_per_employee {
        if days > opts.weekly_day_cap {
            out.push(Violation::OverWeeklyCap {
                employee: name.to_string(),
                days,
                cap: opts.weekly_day_cap,
            });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Shift;

    #[test]
    fn flags_double_booking_and_weekly_cap() {
        let mut grid = ScheduleGrid::new();
        grid.push(Day::Mon, Shift::Morning, "ana".into());
        grid.push(Day::Mon, Shift::Evening, "ana".into());
        grid.push(Day::Tue, Shift::Morning, "ana".into());
        let opts = SchedOptions {
            weekly_day_cap: 1,
            min_per_shift: 0,
            max_per_shift: Some(1),
            ..SchedOptions::default()
        };

        let found = audit(&grid, &opts);

        assert_eq!(
            found,
            vec![
                Violation::DoubleBooked {
                    employee: "ana".into(),
                    day: Day::Mon,
                },
                Violation::OverWeeklyCap {
                    employee: "ana".into(),
                    days: 2,
                    cap: 1,
                },
            ]
        );
    }

    #[test]
    fn empty_grid_is_understaffed_everywhere() {
        let found = audit(&ScheduleGrid::new(), &SchedOptions::default());
        assert_eq!(found.len(), 21);
        assert!(found
            .iter()
            .all(|v| matches!(v, Violation::Understaffed { staffed: 0, required: 2, .. })));
    }
}
