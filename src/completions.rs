use std::collections::HashSet;

use chrono::NaiveDate;

use crate::calendar::date_key;
use crate::models::Habit;

/// Read-only lookup over one habit's completion dates. Membership is exact
/// string match on the `YYYY-MM-DD` keys the provider hands out; mutation
/// only ever happens through the provider round trip.
#[derive(Debug, Clone, Default)]
pub struct CompletionIndex {
    dates: HashSet<String>,
}

impl CompletionIndex {
    pub fn new(completions: &[String]) -> Self {
        Self {
            dates: completions.iter().cloned().collect(),
        }
    }

    pub fn for_habit(habit: &Habit) -> Self {
        Self::new(&habit.completions)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.dates.contains(key)
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.contains_key(&date_key(date))
    }

    /// How many of the supplied days are completed; the size of the
    /// intersection between the day list and the completion set.
    pub fn count_within(&self, days: &[NaiveDate]) -> usize {
        days.iter().filter(|day| self.is_completed_on(**day)).count()
    }
}
