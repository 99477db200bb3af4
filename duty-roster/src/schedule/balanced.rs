use tracing::{debug, trace};

use super::requirements::ShiftRequirement;
use super::types::{Availability, Person, ShiftKind};
use super::SchedulingContext;

/// Knobs for one greedy pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassConfig {
    pub label: &'static str,
    /// Cooldown set on a person right after they are assigned.
    pub spread: i64,
    /// Lets people flagged Not Available on a day be considered for it.
    pub allow_not_preferred: bool,
    /// Judge eligibility by shift count against a rising threshold, over two
    /// iterations, instead of by points.
    pub use_lower_shift_threshold: bool,
    /// Only weekday shifts, and only while the shift fits under the points cap.
    /// Takes precedence over `use_lower_shift_threshold` for eligibility.
    pub only_fill_weekdays: bool,
    /// Added to the per-person points target to form this pass's cap.
    pub extra_points: i64,
}

impl PassConfig {
    fn iterations(&self) -> usize {
        if self.use_lower_shift_threshold {
            2
        } else {
            1
        }
    }

    fn under_threshold(
        &self,
        person: &Person,
        req: &ShiftRequirement,
        points_cap: i64,
        shift_threshold: i64,
    ) -> bool {
        if self.only_fill_weekdays {
            person.points + req.points <= points_cap && req.kind == ShiftKind::WeekdayOnCall
        } else if self.use_lower_shift_threshold {
            (person.shifts.len() as i64) < shift_threshold
        } else {
            person.points < points_cap
        }
    }
}

/// Shift-count ceiling for a threshold iteration: 65% of the cap, then 80%.
pub fn shift_threshold(points_cap: i64, iteration: usize) -> i64 {
    ((0.65 + 0.15 * iteration as f64) * points_cap as f64).floor() as i64
}

/// Walks the month once per iteration and hands out shifts to people in
/// ranking order until each day reaches its headcount.
///
/// A person qualifies for a day when the day is on their preferred list (or the
/// Not Available override applies), they are under the pass threshold, and
/// their cooldown is zero. After each day the ranking is re-sorted, then
/// cooldowns tick down. Never removes earlier assignments. Returns the number
/// of shifts handed out.
pub fn run_balanced_pass(ctx: &mut SchedulingContext<'_>, config: &PassConfig) -> usize {
    let grid = ctx.grid;
    let reqs = ctx.requirements;
    let points_cap = ctx.points_per_person + config.extra_points;
    let mut assigned = 0;

    for iteration in 0..config.iterations() {
        ctx.ranking.reset_cooldowns();
        let threshold = shift_threshold(points_cap, iteration);
        debug!(pass = config.label, iteration, points_cap, threshold, "starting pass iteration");

        for (day, weekday) in reqs.month.days_with_weekday() {
            let req = ShiftRequirement::for_weekday(weekday, reqs);

            for slot in 0..ctx.ranking.len() {
                if ctx.schedule.day(day).len() >= req.headcount as usize {
                    break;
                }
                let Some(record) = ctx.ranking.get(slot) else {
                    break;
                };
                let person = record.person;
                // Literal override: tests Not Available, not Not Preferred.
                let wanted = record.preferred_days.contains(&day)
                    || (config.allow_not_preferred
                        && grid.get(person, day) == Availability::NotAvailable);
                let rested = record.cooldown == 0;

                if wanted
                    && rested
                    && config.under_threshold(&ctx.people[person], &req, points_cap, threshold)
                {
                    trace!(pass = config.label, day, person = %ctx.people[person].name, "assigned");
                    ctx.assign(person, &req, day);
                    if let Some(record) = ctx.ranking.get_mut(slot) {
                        record.cooldown = config.spread;
                    }
                    assigned += 1;
                }
            }

            ctx.ranking.resort();
            ctx.ranking.tick_cooldowns();
        }
    }

    assigned
}
