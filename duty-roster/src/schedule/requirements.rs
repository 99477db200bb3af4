use crate::config::Requirements;

use super::types::ShiftKind;

/// What one calendar day asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftRequirement {
    pub kind: ShiftKind,
    pub headcount: u32,
    pub points: i64,
}

impl ShiftRequirement {
    /// Resolves a weekday index (0 = Sunday .. 6 = Saturday). Thursday is a
    /// weekday shift with its own headcount; Friday and Saturday are weekend shifts.
    pub fn for_weekday(weekday: u8, reqs: &Requirements) -> Self {
        if weekday < 5 {
            let headcount = if weekday == 4 {
                reqs.headcounts.thurs
            } else {
                reqs.headcounts.sun_to_wed
            };
            Self {
                kind: ShiftKind::WeekdayOnCall,
                headcount,
                points: reqs.points.weekday,
            }
        } else {
            Self {
                kind: ShiftKind::WeekendOnCall,
                headcount: reqs.headcounts.fri_to_sat,
                points: reqs.points.weekend,
            }
        }
    }
}
