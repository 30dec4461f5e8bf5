use crate::model::{Day, Shift};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Planning de la semaine : jour → créneau → noms, dans l'ordre d'affectation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleGrid {
    cells: [[Vec<String>; Shift::COUNT]; Day::COUNT],
}

impl ScheduleGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn staff(&self, day: Day, shift: Shift) -> &[String] {
        &self.cells[day.index()][shift.index()]
    }

    pub fn occupancy(&self, day: Day, shift: Shift) -> usize {
        self.cells[day.index()][shift.index()].len()
    }

    /// Créneau occupé par `name` ce jour-là, s'il y en a un.
    pub fn shift_of(&self, day: Day, name: &str) -> Option<Shift> {
        Shift::ALL
            .into_iter()
            .find(|s| self.staff(day, *s).iter().any(|n| n == name))
    }

    pub fn total_assignments(&self) -> usize {
        self.iter().map(|(_, _, staff)| staff.len()).sum()
    }

    /// Parcourt les cellules dans l'ordre fixe jour puis créneau.
    pub fn iter(&self) -> impl Iterator<Item = (Day, Shift, &[String])> + '_ {
        Day::ALL.into_iter().flat_map(move |day| {
            Shift::ALL
                .into_iter()
                .map(move |shift| (day, shift, self.staff(day, shift)))
        })
    }

    pub(crate) fn push(&mut self, day: Day, shift: Shift, name: String) {
        self.cells[day.index()][shift.index()].push(name);
    }
}

impl Serialize for ScheduleGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut days = serializer.serialize_map(Some(Day::COUNT))?;
        for day in Day::ALL {
            days.serialize_entry(day.label(), &DayRow(&self.cells[day.index()]))?;
        }
        days.end()
    }
}

struct DayRow<'a>(&'a [Vec<String>; Shift::COUNT]);

impl Serialize for DayRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut shifts = serializer.serialize_map(Some(Shift::COUNT))?;
        for shift in Shift::ALL {
            shifts.serialize_entry(shift.label(), &self.0[shift.index()])?;
        }
        shifts.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_fixed_day_and_shift_order() {
        let mut grid = ScheduleGrid::new();
        grid.push(Day::Sun, Shift::Evening, "zoe".into());
        grid.push(Day::Mon, Shift::Afternoon, "amir".into());

        let json = serde_json::to_string(&grid).unwrap();
        assert!(json.starts_with(r#"{"Mon":{"morning":[],"afternoon":["amir"],"evening":[]}"#));
        assert!(json.ends_with(r#""Sun":{"morning":[],"afternoon":[],"evening":["zoe"]}}"#));
    }

    #[test]
    fn shift_of_finds_the_cell() {
        let mut grid = ScheduleGrid::new();
        grid.push(Day::Wed, Shift::Evening, "li".into());
        assert_eq!(grid.shift_of(Day::Wed, "li"), Some(Shift::Evening));
        assert_eq!(grid.shift_of(Day::Thu, "li"), None);
        assert_eq!(grid.total_assignments(), 1);
    }
}
