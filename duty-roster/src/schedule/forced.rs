use tracing::{debug, trace};

use super::requirements::ShiftRequirement;
use super::types::Availability;
use super::SchedulingContext;

/// Staffs every day where availability leaves no choice: if the people not
/// marked unavailable fit within the headcount, all of them get the shift.
///
/// Each forced shift lowers that person's ranking key by one. Returns the number
/// of shifts handed out.
pub fn assign_forced_coverage(ctx: &mut SchedulingContext<'_>) -> usize {
    let grid = ctx.grid;
    let reqs = ctx.requirements;
    let mut forced = 0;

    for (day, weekday) in reqs.month.days_with_weekday() {
        let req = ShiftRequirement::for_weekday(weekday, reqs);
        let available: Vec<usize> = (0..ctx.people.len())
            .filter(|&person| grid.get(person, day) != Availability::NotAvailable)
            .collect();

        if available.is_empty() || available.len() > req.headcount as usize {
            continue;
        }

        debug!(day, available = available.len(), required = req.headcount, "forced coverage");
        for person in available {
            trace!(day, person = %ctx.people[person].name, "forced shift");
            ctx.assign(person, &req, day);
            ctx.ranking.demote_key(person);
            forced += 1;
        }
    }

    forced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Requirements, RequirementsConfig};
    use crate::schedule::types::Availability::{NotAvailable as N, NotPreferred as X, Preferred as P};
    use crate::schedule::types::{AvailabilityGrid, Person};

    fn reqs(days: u32) -> Requirements {
        Requirements::from_config(&RequirementsConfig {
            on_call_sun_to_wed: Some(2),
            on_call_thurs: Some(2),
            on_call_fri_to_sat: Some(2),
            days_in_month: days,
            first_day_of_month: 0,
        })
        .unwrap()
    }

    fn people(n: usize) -> Vec<Person> {
        (0..n).map(|i| Person::new(format!("P{i}"))).collect()
    }

    fn names(ctx: &SchedulingContext<'_>, day: u32) -> Vec<String> {
        ctx.schedule.day(day).iter().map(|s| s.person.clone()).collect()
    }

    #[test]
    fn test_scarce_days_are_forced() {
        let grid = AvailabilityGrid::new(vec![
            vec![P, X, N],
            vec![X, X, N],
            vec![N, P, P],
            vec![N, N, N],
        ]);
        let reqs = reqs(3);
        let mut ctx = SchedulingContext::new(people(4), &grid, &reqs).unwrap();

        let forced = assign_forced_coverage(&mut ctx);

        // Day 1: exactly two available for two seats.
        assert_eq!(names(&ctx, 1), vec!["P0", "P1"]);
        // Day 2: three available, more than required, so nothing forced.
        assert!(ctx.schedule.day(2).is_empty());
        // Day 3: one available; forced even though the day stays short.
        assert_eq!(names(&ctx, 3), vec!["P2"]);
        assert_eq!(forced, 3);
        assert_eq!(ctx.people[0].points, 1);
        assert_eq!(ctx.people[2].shifts.len(), 1);
    }

    #[test]
    fn test_nobody_available_assigns_nobody() {
        let grid = AvailabilityGrid::new(vec![vec![N], vec![N]]);
        let reqs = reqs(1);
        let mut ctx = SchedulingContext::new(people(2), &grid, &reqs).unwrap();
        assert_eq!(assign_forced_coverage(&mut ctx), 0);
        assert!(ctx.schedule.day(1).is_empty());
    }

    #[test]
    fn test_forced_shift_lowers_key_but_keeps_preferred_days() {
        let grid = AvailabilityGrid::new(vec![vec![P, P], vec![N, P], vec![N, X]]);
        let reqs = reqs(2);
        let mut ctx = SchedulingContext::new(people(3), &grid, &reqs).unwrap();

        assign_forced_coverage(&mut ctx);

        let record = ctx.ranking.records().iter().find(|r| r.person == 0).unwrap();
        assert_eq!(record.preferred_count, 1);
        assert_eq!(record.preferred_days, vec![1, 2]);
    }
}
