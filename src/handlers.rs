use axum::extract::{Path, Query, State};
use axum::response::Html;
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::info;

use crate::calendar;
use crate::coordinator;
use crate::errors::AppError;
use crate::models::{DashboardResponse, HabitFields, HabitPatch, ToggleRequest};
use crate::state::{AppState, UserData};
use crate::stats;
use crate::ui::render_index;
use crate::view;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.session.user_id))
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let today = today();
    let reference = resolve_month(&query, today)?;
    let data = state.current().await?;
    Ok(Json(build_dashboard(&data, reference, today)))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
    Json(fields): Json<HabitFields>,
) -> Result<Json<DashboardResponse>, AppError> {
    fields.validate()?;
    let id = state
        .provider
        .create_habit(&state.session.user_id, &fields)
        .await?;
    info!(habit_id = %id, title = %fields.title, "habit created");
    refreshed(&state, &query).await
}

pub async fn update_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<String>,
    Query(query): Query<MonthQuery>,
    Json(patch): Json<HabitPatch>,
) -> Result<Json<DashboardResponse>, AppError> {
    patch.validate()?;
    state.provider.update_habit(&habit_id, &patch).await?;
    info!(habit_id = %habit_id, "habit updated");
    refreshed(&state, &query).await
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<String>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    state.provider.delete_habit(&habit_id).await?;
    info!(habit_id = %habit_id, "habit deleted");
    refreshed(&state, &query).await
}

pub async fn toggle_completion(
    State(state): State<AppState>,
    Path(habit_id): Path<String>,
    Query(query): Query<MonthQuery>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<DashboardResponse>, AppError> {
    let today = today();
    let date = NaiveDate::parse_from_str(&payload.date, "%Y-%m-%d").map_err(|_| {
        AppError::validation(format!(
            "invalid date '{}', expected YYYY-MM-DD",
            payload.date
        ))
    })?;

    let data = state.current().await?;
    let habit = data
        .habits
        .iter()
        .find(|h| h.id == habit_id)
        .ok_or_else(|| AppError::validation(format!("unknown habit {habit_id}")))?;

    let outcome = coordinator::toggle_completion(state.provider.as_ref(), habit, date, today).await?;
    info!(habit_id = %habit_id, date = %payload.date, ?outcome, "completion toggled");
    refreshed(&state, &query).await
}

/// Clock read lives here at the edge; everything below takes `today` as an
/// argument.
fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn resolve_month(query: &MonthQuery, today: NaiveDate) -> Result<NaiveDate, AppError> {
    match query.month.as_deref() {
        None => Ok(today),
        Some(raw) => calendar::parse_month(raw)
            .ok_or_else(|| AppError::validation(format!("invalid month '{raw}', expected YYYY-MM"))),
    }
}

fn build_dashboard(data: &UserData, reference: NaiveDate, today: NaiveDate) -> DashboardResponse {
    let days = calendar::month_days(reference);
    DashboardResponse {
        month: calendar::month_key(reference),
        prev_month: calendar::month_key(calendar::prev_month(reference)),
        next_month: calendar::month_key(calendar::next_month(reference)),
        today: calendar::date_key(today),
        view: view::build_month_view(&data.habits, reference, today),
        summary: stats::month_summary(&data.habits, &days, today),
        today_completion: stats::today_completion(&data.habits, today),
        stats: data.stats.clone(),
    }
}

async fn refreshed(state: &AppState, query: &MonthQuery) -> Result<Json<DashboardResponse>, AppError> {
    let today = today();
    let reference = resolve_month(query, today)?;
    let data = state.refresh().await?;
    Ok(Json(build_dashboard(&data, reference, today)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::{Frequency, StatsSnapshot};
    use crate::provider::memory::{MemoryProvider, habit};
    use crate::session::Session;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn app_state(provider: MemoryProvider) -> AppState {
        AppState::new(
            Session {
                user_id: "u1".to_string(),
                auth_token: None,
            },
            Arc::new(provider),
        )
    }

    #[test]
    fn month_query_falls_back_to_today() {
        let today = date(2024, 3, 14);
        let reference = resolve_month(&MonthQuery::default(), today).unwrap();
        assert_eq!(calendar::month_key(reference), "2024-03");

        let query = MonthQuery {
            month: Some("2023-12".to_string()),
        };
        assert_eq!(resolve_month(&query, today).unwrap(), date(2023, 12, 1));

        let bad = MonthQuery {
            month: Some("not-a-month".to_string()),
        };
        assert!(matches!(
            resolve_month(&bad, today),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn dashboard_composes_view_summary_and_snapshot() {
        let data = UserData {
            habits: vec![habit("h1", &["2024-03-01", "2024-03-03"])],
            stats: StatsSnapshot {
                total_habits: 1,
                completed_today: 0,
                total_streak: 2,
                longest_streak: 5,
                success_rate: 0.0,
            },
        };
        let response = build_dashboard(&data, date(2024, 3, 1), date(2024, 3, 31));
        assert_eq!(response.month, "2024-03");
        assert_eq!(response.prev_month, "2024-02");
        assert_eq!(response.next_month, "2024-04");
        assert_eq!(response.view.rows[0].progress, 6);
        assert_eq!(response.summary.monthly_progress, 6);
        assert_eq!(response.stats.longest_streak, 5);
    }

    #[tokio::test]
    async fn create_rejects_blank_titles_before_the_provider() {
        let state = app_state(MemoryProvider::default());
        let fields = HabitFields {
            title: "  ".to_string(),
            description: None,
            frequency: Frequency::Daily,
            color: "#3B82F6".to_string(),
        };
        let result = create_habit(
            State(state.clone()),
            Query(MonthQuery::default()),
            Json(fields),
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(state.provider.list_habits("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_keeps_fields_the_request_omits() {
        let mut seeded = habit("h1", &[]);
        seeded.color = "#8B5CF6".to_string();
        seeded.description = Some("ten minutes".to_string());
        let state = app_state(MemoryProvider::with_habits(vec![seeded]));

        let patch: HabitPatch = serde_json::from_str(r#"{"title":"Stretch daily"}"#).unwrap();
        update_habit(
            State(state.clone()),
            Path("h1".to_string()),
            Query(MonthQuery::default()),
            Json(patch),
        )
        .await
        .unwrap();

        let habits = state.provider.list_habits("u1").await.unwrap();
        assert_eq!(habits[0].title, "Stretch daily");
        assert_eq!(habits[0].color, "#8B5CF6");
        assert_eq!(habits[0].description.as_deref(), Some("ten minutes"));
    }

    #[tokio::test]
    async fn toggle_handler_refreshes_the_cache() {
        let state = app_state(MemoryProvider::with_habits(vec![habit("h1", &[])]));
        // Prime the cache so the coordinator reads a stable copy.
        state.current().await.unwrap();

        let key = calendar::date_key(Local::now().date_naive());
        let response = toggle_completion(
            State(state.clone()),
            Path("h1".to_string()),
            Query(MonthQuery::default()),
            Json(ToggleRequest { date: key.clone() }),
        )
        .await
        .unwrap();

        let cached = state.current().await.unwrap();
        assert_eq!(cached.habits[0].completions, vec![key]);
        assert_eq!(response.0.today_completion, 100);
    }

    #[tokio::test]
    async fn toggle_rejects_unknown_habits() {
        let state = app_state(MemoryProvider::default());
        let result = toggle_completion(
            State(state),
            Path("missing".to_string()),
            Query(MonthQuery::default()),
            Json(ToggleRequest {
                date: "2024-03-01".to_string(),
            }),
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
