use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::completions::CompletionIndex;
use crate::models::Habit;

/// Completion totals for one displayed month across all habits.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MonthSummary {
    pub monthly_progress: u8,
    pub normalized_progress: u8,
    pub total_completed: usize,
    pub total_possible: usize,
}

/// Integer percentage, rounded half away from zero (half up for these
/// non-negative inputs) and clamped to 0..=100. A zero denominator yields 0.
pub fn percent(numerator: usize, denominator: usize) -> u8 {
    if denominator == 0 {
        return 0;
    }
    let ratio = 100.0 * numerator as f64 / denominator as f64;
    ratio.round().clamp(0.0, 100.0) as u8
}

/// Share of habits completed on `today`. 0 when there are no habits.
pub fn today_completion(habits: &[Habit], today: NaiveDate) -> u8 {
    let completed = habits
        .iter()
        .filter(|habit| CompletionIndex::for_habit(habit).is_completed_on(today))
        .count();
    percent(completed, habits.len())
}

/// Monthly and elapsed-days-normalized progress over the supplied day list.
///
/// Only days on or before `today` can count as completed, so a completion
/// the provider somehow recorded for a future day is ignored. The monthly
/// divisor spans the whole month; the normalized divisor spans elapsed days
/// only, so a fully future month reports 0 rather than dividing by zero.
pub fn month_summary(habits: &[Habit], days: &[NaiveDate], today: NaiveDate) -> MonthSummary {
    let elapsed: Vec<NaiveDate> = days.iter().copied().filter(|day| *day <= today).collect();

    let total_completed: usize = habits
        .iter()
        .map(|habit| CompletionIndex::for_habit(habit).count_within(&elapsed))
        .sum();
    let total_possible = habits.len() * days.len();

    MonthSummary {
        monthly_progress: percent(total_completed, total_possible),
        normalized_progress: percent(total_completed, habits.len() * elapsed.len()),
        total_completed,
        total_possible,
    }
}
