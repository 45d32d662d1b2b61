use chrono::NaiveDate;

use crate::calendar::date_key;
use crate::completions::CompletionIndex;
use crate::errors::AppError;
use crate::models::Habit;
use crate::provider::HabitProvider;

/// What a successful toggle asked the provider to store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Completed,
    Uncompleted,
}

/// Flips one (habit, date) cell. A future date is rejected locally and the
/// provider is never contacted. Otherwise the target state is the opposite
/// of the habit's current membership and a single `set_completion` request
/// carries it; the caller re-fetches the authoritative copy on success and
/// leaves local state untouched on failure.
///
/// The read happens against the habit list the caller holds, so two
/// concurrent toggles on the same cell can both observe the same state and
/// request the same target. `set_completion` is idempotent and every
/// mutation triggers a wholesale re-fetch, so callers converge rather than
/// relying on toggle as a compare-and-swap.
pub async fn toggle_completion(
    provider: &dyn HabitProvider,
    habit: &Habit,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<Toggle, AppError> {
    if date > today {
        return Err(AppError::future_date(date));
    }

    let completed_now = CompletionIndex::for_habit(habit).is_completed_on(date);
    let target = !completed_now;
    provider
        .set_completion(&habit.id, &date_key(date), target)
        .await?;

    Ok(if target {
        Toggle::Completed
    } else {
        Toggle::Uncompleted
    })
}
