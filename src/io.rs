use crate::grid::ScheduleGrid;
use crate::model::{Day, Employee, EmployeeRecord, Roster, Shift};
use crate::scheduler::{SchedError, ScheduleOutcome};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Format fichier du roster : `{ "employees": [...] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterFile {
    #[serde(default)]
    pub employees: Vec<EmployeeRecord>,
}

impl RosterFile {
    pub fn from_roster(roster: &Roster) -> Self {
        Self {
            employees: roster.to_records(),
        }
    }

    pub fn into_roster(self) -> anyhow::Result<Roster> {
        Ok(Roster::from_records(self.employees)?)
    }
}

pub fn import_roster_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Roster> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    parse_roster_json(&data).with_context(|| format!("parsing roster {}", path.display()))
}

pub fn parse_roster_json(data: &[u8]) -> anyhow::Result<Roster> {
    let file: RosterFile = serde_json::from_slice(data)?;
    file.into_roster()
}

/// Import depuis CSV : header `name,<jour>,<jour>,...`, cellules `morning;evening` (rang 0 en tête)
pub fn import_roster_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Roster> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers = rdr.headers()?.clone();
    match headers.get(0).map(str::trim) {
        Some(h) if h.eq_ignore_ascii_case("name") => {}
        _ => bail!("first CSV column must be `name`"),
    }
    let days = headers
        .iter()
        .skip(1)
        .map(|h| h.parse::<Day>())
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(dup) = days
        .iter()
        .enumerate()
        .find_map(|(i, day)| days[..i].contains(day).then_some(*day))
    {
        return Err(SchedError::DuplicateDay(dup).into());
    }

    let mut employees = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid employee row (empty name)");
        }
        let mut employee = Employee::new(name);
        for (col, day) in days.iter().enumerate() {
            let Some(cell) = rec.get(col + 1) else {
                continue;
            };
            let prefs = parse_shift_list(cell)
                .with_context(|| format!("invalid {day} preferences for {name}"))?;
            employee.set_preferences(*day, prefs);
        }
        employees.push(employee);
    }
    Ok(Roster::new(employees)?)
}

fn parse_shift_list(raw: &str) -> anyhow::Result<Vec<Shift>> {
    raw.split(';')
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| chunk.parse::<Shift>().map_err(anyhow::Error::from))
        .collect()
}

/// Export JSON du roster (préférences seules)
pub fn export_roster_json<P: AsRef<Path>>(path: P, roster: &Roster) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(&RosterFile::from_roster(roster))?;
    fs::write(path, s)?;
    Ok(())
}

/// Export JSON du résultat : `{ "grid": ..., "warnings": [...] }`
pub fn export_outcome_json<P: AsRef<Path>>(path: P, outcome: &ScheduleOutcome) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(outcome)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV du planning: header `day,shift,staffed,employees`
pub fn export_grid_csv<P: AsRef<Path>>(path: P, grid: &ScheduleGrid) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["day", "shift", "staffed", "employees"])?;
    for (day, shift, staff) in grid.iter() {
        let staffed = staff.len().to_string();
        let names = staff.join(";");
        w.write_record([day.label(), shift.label(), staffed.as_str(), names.as_str()])?;
    }
    w.flush()?;
    Ok(())
}
