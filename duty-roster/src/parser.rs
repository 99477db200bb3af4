use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::error::{Result, ScheduleError};
use crate::schedule::{Availability, AvailabilityGrid, Person};

/// People read from the availability table, with their grid rows in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    pub people: Vec<Person>,
    pub grid: AvailabilityGrid,
}

/// Column holding the person's name; column 0 is the form timestamp.
const NAME_COL: usize = 1;
/// First per-day column (day 1).
const FIRST_DAY_COL: usize = 2;

/// Parses one availability cell. Blank and unrecognised cells count as Not Preferred.
fn parse_cell(value: &str, name: &str, day: usize) -> Availability {
    match Availability::parse(value) {
        Some(availability) => availability,
        None => {
            if !value.trim().is_empty() {
                warn!(person = name, day, value, "unrecognised availability, treating as Not Preferred");
            }
            Availability::NotPreferred
        }
    }
}

/// Reads an availability table: header row, then one row per person of
/// `timestamp, name, day 1, day 2, ...`.
pub fn parse_availability<R: Read>(reader: R) -> Result<Roster> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut people = Vec::new();
    let mut rows = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| ScheduleError::InputUnreadable(e.to_string()))?;

        let name = record.get(NAME_COL).unwrap_or("").trim().to_string();
        if name.is_empty() {
            // Header is line 1, so data row `index` sits on line index + 2.
            warn!(line = index + 2, "skipping row without a name");
            continue;
        }

        let row: Vec<Availability> = record
            .iter()
            .skip(FIRST_DAY_COL)
            .enumerate()
            .map(|(offset, value)| parse_cell(value, &name, offset + 1))
            .collect();

        people.push(Person::new(name));
        rows.push(row);
    }

    debug!(people = people.len(), "parsed availability table");
    Ok(Roster {
        people,
        grid: AvailabilityGrid::new(rows),
    })
}

/// Loads an availability table from disk.
pub fn load_availability<P: AsRef<Path>>(csv_path: P) -> Result<Roster> {
    let path = csv_path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| ScheduleError::InputUnreadable(format!("{}: {}", path.display(), e)))?;
    parse_availability(file)
}

/// Warns about rows declaring fewer days than the month has; the missing days
/// read as Not Preferred.
pub fn check_day_columns(roster: &Roster, days: u32) -> usize {
    let mut short = 0;
    for (index, person) in roster.people.iter().enumerate() {
        let declared = roster.grid.declared_days(index);
        if declared < days as usize {
            warn!(person = %person.name, declared, days, "row is missing day columns");
            short += 1;
        }
    }
    short
}
