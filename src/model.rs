use crate::scheduler::SchedError;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Jour de la semaine. L'ordre des variantes est l'ordre de traitement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    pub const COUNT: usize = 7;
    pub const ALL: [Day; Day::COUNT] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        }
    }

    /// Jour précédent ; la semaine est circulaire (Mon → Sun).
    pub fn previous(self) -> Day {
        Day::ALL[(self.index() + Day::COUNT - 1) % Day::COUNT]
    }
}

impl From<Weekday> for Day {
    fn from(wd: Weekday) -> Self {
        Day::ALL[wd.num_days_from_monday() as usize]
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Day {
    type Err = SchedError;

    /// Accepte `Mon` ou `monday`, sans tenir compte de la casse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Weekday>()
            .map(Day::from)
            .map_err(|_| SchedError::UnknownDay(s.to_string()))
    }
}

/// Créneau d'une journée, dans l'ordre de parcours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    Morning,
    Afternoon,
    Evening,
}

impl Shift {
    pub const COUNT: usize = 3;
    pub const ALL: [Shift; Shift::COUNT] = [Shift::Morning, Shift::Afternoon, Shift::Evening];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Shift::Morning => "morning",
            Shift::Afternoon => "afternoon",
            Shift::Evening => "evening",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Shift {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(Shift::Morning),
            "afternoon" => Ok(Shift::Afternoon),
            "evening" => Ok(Shift::Evening),
            _ => Err(SchedError::UnknownShift(s.to_string())),
        }
    }
}

/// Employé : préférences classées par jour et état d'affectation de la semaine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    name: String,
    preferences: [Vec<Shift>; Day::COUNT],
    assignment: [Option<Shift>; Day::COUNT],
    days_worked: u32,
}

impl Employee {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            preferences: Default::default(),
            assignment: [None; Day::COUNT],
            days_worked: 0,
        }
    }

    pub fn with_preferences<P: Into<Vec<Shift>>>(mut self, day: Day, prefs: P) -> Self {
        self.set_preferences(day, prefs);
        self
    }

    pub fn set_preferences<P: Into<Vec<Shift>>>(&mut self, day: Day, prefs: P) {
        self.preferences[day.index()] = prefs.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Préférences du jour, rang 0 en tête. Vide = pas de préférence.
    pub fn preferences(&self, day: Day) -> &[Shift] {
        &self.preferences[day.index()]
    }

    pub fn preference_at(&self, day: Day, rank: usize) -> Option<Shift> {
        self.preferences[day.index()].get(rank).copied()
    }

    pub fn has_preference(&self, day: Day) -> bool {
        !self.preferences[day.index()].is_empty()
    }

    pub fn assignment(&self, day: Day) -> Option<Shift> {
        self.assignment[day.index()]
    }

    pub fn days_worked(&self) -> u32 {
        self.days_worked
    }

    /// Peut prendre un créneau ce jour-là : pas encore affecté, sous le plafond hebdomadaire.
    pub fn can_work(&self, day: Day, weekly_day_cap: u32) -> bool {
        self.assignment[day.index()].is_none() && self.days_worked < weekly_day_cap
    }

    /// Enregistre l'affectation et renvoie le nouveau nombre de jours travaillés.
    pub(crate) fn record_assignment(&mut self, day: Day, shift: Shift) -> u32 {
        debug_assert!(self.assignment[day.index()].is_none());
        self.assignment[day.index()] = Some(shift);
        self.days_worked += 1;
        self.days_worked
    }

    pub(crate) fn clear_assignments(&mut self) {
        self.assignment = [None; Day::COUNT];
        self.days_worked = 0;
    }

    pub fn to_record(&self) -> EmployeeRecord {
        let preferences = Day::ALL
            .iter()
            .filter(|day| self.has_preference(**day))
            .map(|day| {
                let shifts = self
                    .preferences(*day)
                    .iter()
                    .map(|s| s.label().to_string())
                    .collect();
                (day.label().to_string(), shifts)
            })
            .collect();
        EmployeeRecord {
            name: self.name.clone(),
            preferences,
        }
    }
}

/// Forme sérialisée d'un employé (labels bruts, validés à la conversion).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EmployeeRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub preferences: BTreeMap<String, Vec<String>>,
}

impl TryFrom<EmployeeRecord> for Employee {
    type Error = SchedError;

    fn try_from(record: EmployeeRecord) -> Result<Self, Self::Error> {
        let mut employee = Employee::new(record.name);
        let mut seen = [false; Day::COUNT];
        for (day, shifts) in &record.preferences {
            let day: Day = day.parse()?;
            if std::mem::replace(&mut seen[day.index()], true) {
                return Err(SchedError::DuplicateDay(day));
            }
            let shifts = shifts
                .iter()
                .map(|s| s.parse::<Shift>())
                .collect::<Result<Vec<_>, _>>()?;
            employee.set_preferences(day, shifts);
        }
        Ok(employee)
    }
}

/// Roster : l'ordre des employés est l'ordre des candidats partout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    employees: Vec<Employee>,
}

impl Roster {
    pub fn new(employees: Vec<Employee>) -> Result<Self, SchedError> {
        let roster = Self { employees };
        roster.validate()?;
        Ok(roster)
    }

    pub fn from_records<I>(records: I) -> Result<Self, SchedError>
    where
        I: IntoIterator<Item = EmployeeRecord>,
    {
        let employees = records
            .into_iter()
            .map(Employee::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(employees)
    }

    pub fn to_records(&self) -> Vec<EmployeeRecord> {
        self.employees.iter().map(Employee::to_record).collect()
    }

    /// Noms non vides et uniques.
    pub fn validate(&self) -> Result<(), SchedError> {
        let mut seen = HashSet::new();
        for e in &self.employees {
            if e.name.trim().is_empty() {
                return Err(SchedError::InvalidName(e.name.clone()));
            }
            if !seen.insert(e.name.as_str()) {
                return Err(SchedError::DuplicateEmployee(e.name.clone()));
            }
        }
        Ok(())
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub(crate) fn employees_mut(&mut self) -> &mut [Employee] {
        &mut self.employees
    }

    pub fn find_employee(&self, name: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub(crate) fn clear_assignments(&mut self) {
        self.employees.iter_mut().for_each(Employee::clear_assignments);
    }
}
