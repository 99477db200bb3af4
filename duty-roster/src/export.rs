use std::path::Path;

use csv::{Terminator, WriterBuilder};
use tracing::warn;

use crate::error::{Result, ScheduleError};
use crate::schedule::{Person, Shift};

pub const EXPORT_FILE_NAME: &str = "schedule.csv";

/// Orders every person's shifts by day. Stable, so same-day shifts keep
/// their assignment order.
pub fn sort_shifts_by_day(people: &mut [Person]) {
    for person in people.iter_mut() {
        person.shifts.sort_by_key(|shift| shift.day);
    }
}

/// One row of cells, day 1 first. A day without a shift is blank.
fn row_cells(person: &Person, days: u32) -> Vec<&'static str> {
    let mut cells = vec![""; days as usize];
    let mut last_day = 0;
    for Shift { day, kind, .. } in &person.shifts {
        let Some(cell) = cells.get_mut((*day as usize).wrapping_sub(1)) else {
            warn!(person = %person.name, day, "shift outside the month, not exported");
            continue;
        };
        if *day == last_day {
            warn!(person = %person.name, day, "second shift on the same day, keeping the first");
            continue;
        }
        *cell = kind.as_str();
        last_day = *day;
    }
    cells
}

/// Renders the day-by-person grid: `Name,1,..,D`, then one row per person in
/// roster order. Sorts each person's shifts first.
pub fn generate_csv_content(days: u32, people: &mut [Person]) -> Result<String> {
    sort_shifts_by_day(people);

    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let mut header = vec!["Name".to_string()];
    header.extend((1..=days).map(|day| day.to_string()));
    wtr.write_record(&header)?;

    for person in people.iter() {
        let mut record = vec![person.name.as_str()];
        record.extend(row_cells(person, days));
        wtr.write_record(&record)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| ScheduleError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| ScheduleError::InvalidConfig(e.to_string()))
}

/// Writes the grid to `csv_path`.
pub fn write_schedule_csv<P: AsRef<Path>>(csv_path: P, days: u32, people: &mut [Person]) -> Result<()> {
    let content = generate_csv_content(days, people)?;
    std::fs::write(csv_path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ShiftKind;

    fn shift(person: &str, kind: ShiftKind, day: u32) -> Shift {
        Shift {
            person: person.to_string(),
            kind,
            day,
        }
    }

    fn person(name: &str, days: &[(u32, ShiftKind)]) -> Person {
        let mut p = Person::new(name);
        p.shifts = days.iter().map(|&(d, k)| shift(name, k, d)).collect();
        p
    }

    #[test]
    fn test_grid_layout() {
        let mut people = vec![
            person("Ana", &[(3, ShiftKind::WeekdayOnCall), (1, ShiftKind::WeekendOnCall)]),
            person("Ben", &[]),
            person("Cy", &[(4, ShiftKind::WeekdayOnCall)]),
        ];

        let csv = generate_csv_content(4, &mut people).unwrap();

        assert_eq!(
            csv,
            "Name,1,2,3,4\n\
             Ana,OnCall-Weekend,,OnCall-Weekday,\n\
             Ben,,,,\n\
             Cy,,,,OnCall-Weekday\n"
        );
    }

    #[test]
    fn test_shifts_end_up_in_increasing_day_order() {
        let mut people = vec![person(
            "Ana",
            &[
                (5, ShiftKind::WeekdayOnCall),
                (2, ShiftKind::WeekdayOnCall),
                (7, ShiftKind::WeekendOnCall),
            ],
        )];
        let csv = generate_csv_content(7, &mut people).unwrap();

        let days: Vec<u32> = people[0].shifts.iter().map(|s| s.day).collect();
        assert_eq!(days, vec![2, 5, 7]);

        let row: Vec<&str> = csv.lines().nth(1).unwrap().split(',').collect();
        let filled: Vec<usize> = row
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(filled, vec![2, 5, 7]);
    }

    #[test]
    fn test_same_day_shift_keeps_first() {
        let mut people = vec![person(
            "Ana",
            &[(1, ShiftKind::WeekendOnCall), (1, ShiftKind::WeekdayOnCall)],
        )];
        let csv = generate_csv_content(2, &mut people).unwrap();
        assert_eq!(csv.lines().nth(1), Some("Ana,OnCall-Weekend,"));
    }

    #[test]
    fn test_names_with_commas_are_quoted() {
        let mut people = vec![person("Lee, Sam", &[(1, ShiftKind::WeekdayOnCall)])];
        let csv = generate_csv_content(1, &mut people).unwrap();
        assert_eq!(csv.lines().nth(1), Some("\"Lee, Sam\",OnCall-Weekday"));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);
        let mut people = vec![person("Ana", &[(2, ShiftKind::WeekdayOnCall)])];
        write_schedule_csv(&path, 2, &mut people).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Name,1,2\nAna,,OnCall-Weekday\n");
    }
}
