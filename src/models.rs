use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::stats::MonthSummary;
use crate::view::MonthView;

/// Palette offered by the add/edit form. The provider accepts free-form hex
/// values, so anything it returns is kept as-is.
pub const HABIT_COLORS: [&str; 10] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#EC4899", "#06B6D4", "#84CC16",
    "#F97316", "#6366F1",
];

pub const DEFAULT_COLOR: &str = "#3B82F6";

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

/// A habit as the provider reports it. Completion dates are unique
/// `YYYY-MM-DD` strings; streaks are provider-computed and passed through,
/// never recomputed locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub frequency: Frequency,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub completions: Vec<String>,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
}

/// Aggregate counters from the provider's stats endpoint. Opaque to the
/// core; only the completion percentages are derived locally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total_habits: u32,
    pub completed_today: u32,
    pub total_streak: u32,
    pub longest_streak: u32,
    pub success_rate: f64,
}

/// Fields required to create a habit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitFields {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default = "default_color")]
    pub color: String,
}

impl HabitFields {
    /// Local checks that never need a provider round trip.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::validation("habit title must not be empty"));
        }
        Ok(())
    }
}

/// Partial update. Absent fields are left off the wire entirely so the
/// provider keeps their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HabitPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl HabitPatch {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(title) = self.title.as_deref() {
            if title.trim().is_empty() {
                return Err(AppError::validation("habit title must not be empty"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleRequest {
    pub date: String,
}

/// Everything the page needs for one month, assembled from the cached habit
/// list, the pure view-model core, and the provider's stats snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub month: String,
    pub prev_month: String,
    pub next_month: String,
    pub today: String,
    pub view: MonthView,
    pub summary: MonthSummary,
    pub today_completion: u8,
    pub stats: StatsSnapshot,
}
