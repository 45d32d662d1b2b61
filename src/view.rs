use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{self, CalendarDay};
use crate::completions::CompletionIndex;
use crate::models::{Frequency, Habit};
use crate::stats::percent;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayCell {
    pub date: String,
    pub completed: bool,
    pub is_future: bool,
    pub is_today: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub frequency: Frequency,
    pub color: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub cells: Vec<DayCell>,
    pub progress: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthView {
    pub label: String,
    pub days: Vec<CalendarDay>,
    pub rows: Vec<HabitRow>,
}

/// Builds the calendar grid for one month: a row per habit, a cell per day,
/// and per-habit progress over the whole month. Deterministic in its inputs;
/// `today` is threaded in rather than read from the clock.
///
/// A future day never shows as completed even if the provider recorded a
/// completion for it, and an empty habit list yields an empty grid.
pub fn build_month_view(habits: &[Habit], reference: NaiveDate, today: NaiveDate) -> MonthView {
    let days = calendar::calendar_days(reference, today);
    let mut rows = Vec::with_capacity(habits.len());

    for habit in habits {
        let index = CompletionIndex::for_habit(habit);
        let cells: Vec<DayCell> = days
            .iter()
            .map(|day| DayCell {
                date: calendar::date_key(day.date),
                completed: !day.is_future && index.is_completed_on(day.date),
                is_future: day.is_future,
                is_today: day.is_today,
            })
            .collect();
        let completed_days = cells.iter().filter(|cell| cell.completed).count();

        rows.push(HabitRow {
            id: habit.id.clone(),
            title: habit.title.clone(),
            description: habit.description.clone(),
            frequency: habit.frequency,
            color: habit.color.clone(),
            current_streak: habit.current_streak,
            longest_streak: habit.longest_streak,
            progress: percent(completed_days, cells.len()),
            cells,
        });
    }

    MonthView {
        label: calendar::month_label(reference),
        days,
        rows,
    }
}
