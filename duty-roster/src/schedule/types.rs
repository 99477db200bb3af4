use serde::{Deserialize, Serialize};

/// Kind of duty a shift covers. The token is what lands in the exported grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftKind {
    #[serde(rename = "OnCall-Weekday")]
    WeekdayOnCall,
    #[serde(rename = "OnCall-Weekend")]
    WeekendOnCall,
    /// Declared for the output format; the assignment passes never produce it.
    #[serde(rename = "Office Hours")]
    OfficeHours,
}

impl ShiftKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftKind::WeekdayOnCall => "OnCall-Weekday",
            ShiftKind::WeekendOnCall => "OnCall-Weekend",
            ShiftKind::OfficeHours => "Office Hours",
        }
    }
}

/// A single duty held by one person on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub person: String,
    pub kind: ShiftKind,
    /// 1-indexed calendar day
    pub day: u32,
}

/// A roster member and everything assigned to them so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub shifts: Vec<Shift>,
    pub points: i64,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shifts: Vec::new(),
            points: 0,
        }
    }
}

/// What a person declared for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    Preferred,
    NotPreferred,
    NotAvailable,
}

impl Availability {
    /// Parses the literal form tokens. Returns `None` for anything else.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim() {
            "Preferred" => Some(Availability::Preferred),
            "Not Preferred" => Some(Availability::NotPreferred),
            "Not Available" => Some(Availability::NotAvailable),
            _ => None,
        }
    }
}

/// Per-person, per-day availability. Row `p` belongs to person `p` of the roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityGrid {
    rows: Vec<Vec<Availability>>,
}

impl AvailabilityGrid {
    /// Each row holds day 1 at index 0.
    pub fn new(rows: Vec<Vec<Availability>>) -> Self {
        Self { rows }
    }

    pub fn person_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of day columns present in a person's row.
    pub fn declared_days(&self, person: usize) -> usize {
        self.rows.get(person).map_or(0, Vec::len)
    }

    /// Days outside a row (short rows, unknown people) read as `NotPreferred`.
    pub fn get(&self, person: usize, day: u32) -> Availability {
        if day == 0 {
            return Availability::NotPreferred;
        }
        self.rows
            .get(person)
            .and_then(|row| row.get(day as usize - 1))
            .copied()
            .unwrap_or(Availability::NotPreferred)
    }
}

/// Day buckets of assigned shifts. Bucket 0 is an unused sentinel so that
/// calendar day `d` lives at index `d`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    buckets: Vec<Vec<Shift>>,
}

impl Schedule {
    pub fn new(days: u32) -> Self {
        Self {
            buckets: vec![Vec::new(); days as usize + 1],
        }
    }

    pub fn days(&self) -> u32 {
        (self.buckets.len() - 1) as u32
    }

    pub fn day(&self, day: u32) -> &[Shift] {
        self.buckets
            .get(day as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn push(&mut self, shift: Shift) {
        let day = shift.day as usize;
        if let Some(bucket) = self.buckets.get_mut(day) {
            bucket.push(shift);
        }
    }

    /// Iterates `(day, shifts)` for days 1..=D.
    pub fn iter_days(&self) -> impl Iterator<Item = (u32, &[Shift])> {
        self.buckets
            .iter()
            .enumerate()
            .skip(1)
            .map(|(day, bucket)| (day as u32, bucket.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_tokens() {
        assert_eq!(Availability::parse("Preferred"), Some(Availability::Preferred));
        assert_eq!(Availability::parse(" Not Preferred "), Some(Availability::NotPreferred));
        assert_eq!(Availability::parse("Not Available"), Some(Availability::NotAvailable));
        assert_eq!(Availability::parse("preferred"), None);
        assert_eq!(Availability::parse(""), None);
    }

    #[test]
    fn test_grid_short_rows_read_as_not_preferred() {
        let grid = AvailabilityGrid::new(vec![vec![Availability::Preferred]]);
        assert_eq!(grid.get(0, 1), Availability::Preferred);
        assert_eq!(grid.get(0, 2), Availability::NotPreferred);
        assert_eq!(grid.get(3, 1), Availability::NotPreferred);
        assert_eq!(grid.get(0, 0), Availability::NotPreferred);
    }

    #[test]
    fn test_schedule_sentinel_bucket() {
        let mut schedule = Schedule::new(3);
        assert_eq!(schedule.days(), 3);
        schedule.push(Shift {
            person: "Ana".to_string(),
            kind: ShiftKind::WeekdayOnCall,
            day: 3,
        });
        assert_eq!(schedule.day(3).len(), 1);
        assert!(schedule.day(0).is_empty());
        assert!(schedule.day(4).is_empty());
        let days: Vec<u32> = schedule.iter_days().map(|(d, _)| d).collect();
        assert_eq!(days, vec![1, 2, 3]);
    }

    #[test]
    fn test_shift_kind_tokens_match_serde_names() {
        for kind in [ShiftKind::WeekdayOnCall, ShiftKind::WeekendOnCall, ShiftKind::OfficeHours] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }
}
