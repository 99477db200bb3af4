use super::types::{Availability, AvailabilityGrid};

/// Per-person scratch state used while assigning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceRecord {
    /// Index into the roster.
    pub person: usize,
    /// Ranking key. Starts as the number of preferred days; forced coverage
    /// lowers it without touching `preferred_days`.
    pub preferred_count: i64,
    pub preferred_days: Vec<u32>,
    /// Days left before this person may be picked again. Only zero is eligible.
    pub cooldown: i64,
}

/// Records ordered from fewest to most preferred days.
///
/// Re-sorting is stable: people with equal keys keep their relative order, and
/// the assignment scan depends on that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceRanking {
    records: Vec<PreferenceRecord>,
}

impl PreferenceRanking {
    /// Counts preferred days per person, walking the roster back to front, then
    /// sorts. The reverse walk decides the initial tie-break.
    pub fn build(grid: &AvailabilityGrid, person_count: usize, days: u32) -> Self {
        let records = (0..person_count)
            .rev()
            .map(|person| {
                let preferred_days: Vec<u32> = (1..=days)
                    .filter(|&day| grid.get(person, day) == Availability::Preferred)
                    .collect();
                PreferenceRecord {
                    person,
                    preferred_count: preferred_days.len() as i64,
                    preferred_days,
                    cooldown: 0,
                }
            })
            .collect();

        let mut ranking = Self { records };
        ranking.resort();
        ranking
    }

    pub fn resort(&mut self) {
        self.records.sort_by_key(|record| record.preferred_count);
    }

    pub fn records(&self) -> &[PreferenceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&PreferenceRecord> {
        self.records.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut PreferenceRecord> {
        self.records.get_mut(slot)
    }

    /// Lowers the ranking key of `person` by one.
    pub fn demote_key(&mut self, person: usize) {
        for record in self.records.iter_mut().filter(|r| r.person == person) {
            record.preferred_count -= 1;
        }
    }

    pub fn reset_cooldowns(&mut self) {
        for record in &mut self.records {
            record.cooldown = 0;
        }
    }

    /// One day has passed: every positive cooldown drops by one.
    pub fn tick_cooldowns(&mut self) {
        for record in &mut self.records {
            if record.cooldown > 0 {
                record.cooldown -= 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::Availability::{NotAvailable as N, NotPreferred as X, Preferred as P};

    fn grid() -> AvailabilityGrid {
        AvailabilityGrid::new(vec![
            vec![P, P, X, X], // 0: 2 preferred
            vec![P, X, X, X], // 1: 1 preferred
            vec![X, P, N, P], // 2: 2 preferred
            vec![P, P, P, N], // 3: 3 preferred
            vec![X, X, X, P], // 4: 1 preferred
        ])
    }

    fn order(ranking: &PreferenceRanking) -> Vec<usize> {
        ranking.records().iter().map(|r| r.person).collect()
    }

    #[test]
    fn test_sorted_ascending_and_stable_on_reverse_roster() {
        let ranking = PreferenceRanking::build(&grid(), 5, 4);
        // Ties keep reverse-roster order: 4 before 1, 2 before 0.
        assert_eq!(order(&ranking), vec![4, 1, 2, 0, 3]);
        let counts: Vec<i64> = ranking.records().iter().map(|r| r.preferred_count).collect();
        assert_eq!(counts, vec![1, 1, 2, 2, 3]);
    }

    #[test]
    fn test_ranking_is_a_permutation() {
        let ranking = PreferenceRanking::build(&grid(), 5, 4);
        let mut people = order(&ranking);
        people.sort_unstable();
        assert_eq!(people, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_preferred_days_and_fresh_cooldowns() {
        let ranking = PreferenceRanking::build(&grid(), 5, 4);
        let record = ranking.records().iter().find(|r| r.person == 2).unwrap();
        assert_eq!(record.preferred_days, vec![2, 4]);
        assert!(ranking.records().iter().all(|r| r.cooldown == 0));
    }

    #[test]
    fn test_demoted_key_moves_ahead_after_resort() {
        let mut ranking = PreferenceRanking::build(&grid(), 5, 4);
        ranking.demote_key(3);
        ranking.demote_key(3);
        ranking.demote_key(3);
        // Not re-sorted until asked.
        assert_eq!(order(&ranking), vec![4, 1, 2, 0, 3]);
        ranking.resort();
        assert_eq!(order(&ranking), vec![3, 4, 1, 2, 0]);
        let record = ranking.get(0).unwrap();
        assert_eq!(record.preferred_count, 0);
        assert_eq!(record.preferred_days, vec![1, 2, 3]);
    }

    #[test]
    fn test_cooldowns_tick_down_to_zero() {
        let mut ranking = PreferenceRanking::build(&grid(), 5, 4);
        ranking.get_mut(0).unwrap().cooldown = 2;
        ranking.tick_cooldowns();
        assert_eq!(ranking.get(0).unwrap().cooldown, 1);
        ranking.tick_cooldowns();
        ranking.tick_cooldowns();
        assert_eq!(ranking.get(0).unwrap().cooldown, 0);

        ranking.get_mut(1).unwrap().cooldown = 5;
        ranking.reset_cooldowns();
        assert!(ranking.records().iter().all(|r| r.cooldown == 0));
    }
}
