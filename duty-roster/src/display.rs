use std::fmt::Write;

use crate::schedule::{CoverageGap, ScheduleOutcome};

const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Formats a day label such as `12 (Fri)`.
pub fn format_day(day: u32, weekday: u8) -> String {
    let name = WEEKDAY_NAMES.get(weekday as usize).copied().unwrap_or("?");
    format!("{} ({})", day, name)
}

/// Human-readable run summary: budget, each day's assignees with gaps
/// flagged, and every person's load.
pub fn render_schedule_summary(outcome: &ScheduleOutcome, first_day: u8) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== On-Call Schedule ===");
    let _ = writeln!(
        out,
        "Point budget: {} ({} per person)",
        outcome.total_point_budget, outcome.points_per_person
    );

    for (day, shifts) in outcome.schedule.iter_days() {
        let weekday = ((u32::from(first_day) + day - 1) % 7) as u8;
        let names: Vec<&str> = shifts.iter().map(|s| s.person.as_str()).collect();
        let label = format_day(day, weekday);
        match outcome.gaps.iter().find(|g| g.day == day) {
            Some(CoverageGap { required, .. }) => {
                let _ = writeln!(out, "  {:<10} {} [SHORT: {}/{}]", label, names.join(", "), names.len(), required);
            }
            None => {
                let _ = writeln!(out, "  {:<10} {}", label, names.join(", "));
            }
        }
    }

    if !outcome.gaps.is_empty() {
        let _ = writeln!(out, "⚠️  Under-covered days: {}", outcome.gaps.len());
    }

    let _ = writeln!(out, "\nLoad per person:");
    for person in &outcome.people {
        let _ = writeln!(
            out,
            "  - {} ({} shifts, {} points)",
            person.name,
            person.shifts.len(),
            person.points
        );
    }
    out
}

/// Prints the run summary to stdout.
pub fn print_schedule_summary(outcome: &ScheduleOutcome, first_day: u8) {
    print!("{}", render_schedule_summary(outcome, first_day));
}
