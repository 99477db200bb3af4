pub mod types;
pub mod calendar;
pub mod ranking;
pub mod requirements;
pub mod forced;
pub mod balanced;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Requirements;
use crate::error::Result;

pub use balanced::{run_balanced_pass, PassConfig};
pub use forced::assign_forced_coverage;
pub use ranking::PreferenceRanking;
pub use requirements::ShiftRequirement;
pub use types::{Availability, AvailabilityGrid, Person, Schedule, Shift, ShiftKind};

/// Mutable state shared by every assignment pass of one run.
#[derive(Debug)]
pub struct SchedulingContext<'a> {
    pub(crate) grid: &'a AvailabilityGrid,
    pub(crate) requirements: &'a Requirements,
    pub people: Vec<Person>,
    pub schedule: Schedule,
    pub ranking: PreferenceRanking,
    pub total_point_budget: i64,
    pub points_per_person: i64,
}

impl<'a> SchedulingContext<'a> {
    /// Fails with `EmptyRoster` when there is nobody to split the budget over.
    pub fn new(
        people: Vec<Person>,
        grid: &'a AvailabilityGrid,
        requirements: &'a Requirements,
    ) -> Result<Self> {
        let points_per_person = requirements.points_per_person(people.len())?;
        let days = requirements.month.days;
        let ranking = PreferenceRanking::build(grid, people.len(), days);

        Ok(Self {
            grid,
            requirements,
            people,
            schedule: Schedule::new(days),
            ranking,
            total_point_budget: requirements.total_point_budget(),
            points_per_person,
        })
    }

    /// Records a shift for `person` on `day` in both the day bucket and the
    /// person's own list.
    pub fn assign(&mut self, person: usize, req: &ShiftRequirement, day: u32) {
        let Some(owner) = self.people.get_mut(person) else {
            return;
        };
        let shift = Shift {
            person: owner.name.clone(),
            kind: req.kind,
            day,
        };
        owner.points += req.points;
        owner.shifts.push(shift.clone());
        self.schedule.push(shift);
    }

    /// Days left short of their headcount.
    pub fn coverage_gaps(&self) -> Vec<CoverageGap> {
        let reqs = self.requirements;
        reqs.month
            .days_with_weekday()
            .filter_map(|(day, weekday)| {
                let required = ShiftRequirement::for_weekday(weekday, reqs).headcount;
                let assigned = self.schedule.day(day).len() as u32;
                (assigned < required).then_some(CoverageGap {
                    day,
                    weekday,
                    required,
                    assigned,
                })
            })
            .collect()
    }

    pub fn into_outcome(self) -> ScheduleOutcome {
        let gaps = self.coverage_gaps();
        ScheduleOutcome {
            schedule: self.schedule,
            people: self.people,
            total_point_budget: self.total_point_budget,
            points_per_person: self.points_per_person,
            gaps,
        }
    }
}

/// A day that ended with fewer people than it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoverageGap {
    pub day: u32,
    pub weekday: u8,
    pub required: u32,
    pub assigned: u32,
}

/// Result of a full scheduling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleOutcome {
    pub schedule: Schedule,
    pub people: Vec<Person>,
    pub total_point_budget: i64,
    pub points_per_person: i64,
    pub gaps: Vec<CoverageGap>,
}

/// The fixed sequence of greedy passes, from strictest to most permissive.
pub fn pass_plan(days: u32, points_per_person: i64) -> Vec<PassConfig> {
    let spread = if points_per_person > 0 {
        (i64::from(days) - 3).div_euclid(points_per_person)
    } else {
        0
    };

    vec![
        PassConfig {
            label: "spread-preferred",
            spread,
            ..Default::default()
        },
        PassConfig {
            label: "preferred",
            ..Default::default()
        },
        PassConfig {
            label: "not-available-override",
            allow_not_preferred: true,
            ..Default::default()
        },
        PassConfig {
            label: "low-count-weekdays",
            use_lower_shift_threshold: true,
            only_fill_weekdays: true,
            extra_points: 1,
            ..Default::default()
        },
        PassConfig {
            label: "low-count-all-days",
            use_lower_shift_threshold: true,
            extra_points: 1,
            ..Default::default()
        },
        PassConfig {
            label: "low-count-override",
            allow_not_preferred: true,
            use_lower_shift_threshold: true,
            extra_points: 1,
            ..Default::default()
        },
    ]
}

/// Builds the month's schedule: forced coverage first, then every pass of
/// [`pass_plan`] over the same state. Short days are reported, not corrected.
pub fn assign_shifts(
    people: Vec<Person>,
    grid: &AvailabilityGrid,
    requirements: &Requirements,
) -> Result<ScheduleOutcome> {
    let mut ctx = SchedulingContext::new(people, grid, requirements)?;
    info!(
        total = ctx.total_point_budget,
        per_person = ctx.points_per_person,
        people = ctx.people.len(),
        "point budget"
    );

    let forced = assign_forced_coverage(&mut ctx);
    debug!(forced, "forced coverage done");

    for config in pass_plan(requirements.month.days, ctx.points_per_person) {
        let assigned = run_balanced_pass(&mut ctx, &config);
        debug!(pass = config.label, assigned, "pass done");
    }

    let outcome = ctx.into_outcome();
    for gap in &outcome.gaps {
        warn!(
            day = gap.day,
            required = gap.required,
            assigned = gap.assigned,
            "day left under-covered"
        );
    }
    for (day, shifts) in outcome.schedule.iter_days() {
        let required = ShiftRequirement::for_weekday(requirements.month.weekday_of(day), requirements)
            .headcount as usize;
        if shifts.len() > required {
            info!(day, required, assigned = shifts.len(), "day over-covered by forced coverage");
        }
    }
    Ok(outcome)
}
