//! Activity-list individual with a cached decode.
//!
//! An [`Individual`] owns one precedence-feasible activity list and, once
//! decoded, the resulting [`Schedule`]. Every change to the list goes
//! through methods that drop the cached schedule, so a cached value always
//! belongs to the current list.

use crate::error::Result;
use crate::models::{ActivityId, Schedule, Time};
use crate::scheduler::Decoder;

/// One GA individual.
///
/// Lower makespan = better (minimization convention).
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    activity_list: Vec<ActivityId>,
    schedule: Option<Schedule>,
}

impl Individual {
    /// Wraps an activity list; the decode is pending.
    pub fn new(activity_list: Vec<ActivityId>) -> Self {
        Self {
            activity_list,
            schedule: None,
        }
    }

    /// The encoded activity order.
    #[inline]
    pub fn activity_list(&self) -> &[ActivityId] {
        &self.activity_list
    }

    /// Whether a schedule is cached for the current list.
    #[inline]
    pub fn is_decoded(&self) -> bool {
        self.schedule.is_some()
    }

    /// The cached schedule, `None` while the decode is pending.
    #[inline]
    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    /// Makespan of the cached schedule.
    #[inline]
    pub fn makespan(&self) -> Option<Time> {
        self.schedule.as_ref().map(Schedule::makespan)
    }

    /// Start times `0..=J+1` of the cached schedule.
    pub fn start_times(&self) -> Option<&[Time]> {
        self.schedule.as_ref().map(|s| s.start.as_slice())
    }

    /// Decodes the list unless a schedule is already cached, returning the
    /// makespan.
    pub fn decode(&mut self, decoder: &mut Decoder<'_>) -> Result<Time> {
        if let Some(schedule) = &self.schedule {
            return Ok(schedule.makespan());
        }
        let schedule = decoder.decode(&self.activity_list)?;
        let makespan = schedule.makespan();
        self.schedule = Some(schedule);
        Ok(makespan)
    }

    /// Exchanges positions `i` and `i + 1` and drops the cached schedule.
    ///
    /// Callers check precedence with
    /// [`can_swap_adjacent`](super::can_swap_adjacent) first.
    pub fn swap_adjacent(&mut self, i: usize) {
        self.activity_list.swap(i, i + 1);
        self.schedule = None;
    }

    /// Replaces the list, dropping the cached schedule.
    pub fn set_activity_list(&mut self, activity_list: Vec<ActivityId>) {
        self.activity_list = activity_list;
        self.schedule = None;
    }

    /// Drops the cached schedule.
    pub fn invalidate(&mut self) {
        self.schedule = None;
    }

    /// Consumes the individual, returning its list.
    pub fn into_activity_list(self) -> Vec<ActivityId> {
        self.activity_list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::activity_list::tests::sample_problem;

    #[test]
    fn test_new_is_pending() {
        let ind = Individual::new(vec![1, 2, 3, 4, 5, 6]);
        assert!(!ind.is_decoded());
        assert_eq!(ind.makespan(), None);
        assert_eq!(ind.start_times(), None);
    }

    #[test]
    fn test_decode_caches() {
        let p = sample_problem();
        let mut decoder = p.decoder();
        let mut ind = Individual::new(vec![1, 2, 3, 4, 5, 6]);
        let makespan = ind.decode(&mut decoder).unwrap();
        assert!(ind.is_decoded());
        assert_eq!(ind.makespan(), Some(makespan));
        assert_eq!(ind.start_times().unwrap().len(), 8);
        assert_eq!(ind.decode(&mut decoder).unwrap(), makespan);
    }

    #[test]
    fn test_swap_invalidates() {
        let p = sample_problem();
        let mut decoder = p.decoder();
        let mut ind = Individual::new(vec![1, 2, 3, 4, 5, 6]);
        ind.decode(&mut decoder).unwrap();
        ind.swap_adjacent(0);
        assert_eq!(ind.activity_list(), &[2, 1, 3, 4, 5, 6]);
        assert!(!ind.is_decoded());
    }

    #[test]
    fn test_set_list_and_invalidate() {
        let p = sample_problem();
        let mut decoder = p.decoder();
        let mut ind = Individual::new(vec![1, 2, 3, 4, 5, 6]);
        ind.decode(&mut decoder).unwrap();
        ind.invalidate();
        assert!(!ind.is_decoded());

        ind.decode(&mut decoder).unwrap();
        ind.set_activity_list(vec![6, 2, 4, 1, 3, 5]);
        assert!(ind.schedule().is_none());
        assert_eq!(ind.into_activity_list(), vec![6, 2, 4, 1, 3, 5]);
    }

    #[test]
    fn test_decode_error_leaves_pending() {
        let p = sample_problem();
        let mut decoder = p.decoder();
        let mut ind = Individual::new(vec![5, 1, 2, 3, 4, 6]);
        assert!(ind.decode(&mut decoder).is_err());
        assert!(!ind.is_decoded());
    }
}
