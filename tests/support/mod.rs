//! In-process stub of the habit tracker backend, faithful to its message
//! strings and status codes so provider behavior can be tested end to end.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, Serialize)]
pub struct StubHabit {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub frequency: String,
    pub color: String,
    pub completions: Vec<String>,
    pub current_streak: u32,
    pub longest_streak: u32,
}

#[derive(Debug, Default)]
pub struct StubInner {
    pub habits: Vec<StubHabit>,
    pub next_id: usize,
    pub auth_headers: Vec<Option<String>>,
    pub completion_requests: usize,
}

#[derive(Clone, Default)]
pub struct StubBackend {
    pub inner: Arc<Mutex<StubInner>>,
}

impl StubBackend {
    pub fn seed_habit(&self, user_id: &str, title: &str, completions: &[&str]) -> String {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = format!("stub-{}", inner.next_id);
        inner.habits.push(StubHabit {
            id: id.clone(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            description: None,
            frequency: "daily".to_string(),
            color: "#3B82F6".to_string(),
            completions: completions.iter().map(|c| c.to_string()).collect(),
            current_streak: 0,
            longest_streak: 0,
        });
        id
    }

    pub fn completion_requests(&self) -> usize {
        self.inner.lock().unwrap().completion_requests
    }

    pub fn last_auth_header(&self) -> Option<String> {
        self.inner.lock().unwrap().auth_headers.last().cloned().flatten()
    }

    pub fn completions_of(&self, habit_id: &str) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .habits
            .iter()
            .find(|h| h.id == habit_id)
            .map(|h| h.completions.clone())
            .unwrap_or_default()
    }
}

fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Habit not found" })))
}

async fn list_habits(
    State(backend): State<StubBackend>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
) -> Json<Vec<StubHabit>> {
    let mut inner = backend.inner.lock().unwrap();
    inner.auth_headers.push(
        headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(String::from),
    );
    let habits = inner
        .habits
        .iter()
        .filter(|h| h.user_id == user_id)
        .cloned()
        .collect();
    Json(habits)
}

async fn user_stats(
    State(backend): State<StubBackend>,
    Path(user_id): Path<String>,
) -> Json<Value> {
    let inner = backend.inner.lock().unwrap();
    let total = inner.habits.iter().filter(|h| h.user_id == user_id).count();
    Json(json!({
        "total_habits": total,
        "completed_today": 0,
        "total_streak": 3,
        "longest_streak": 7,
        "success_rate": 0.0,
    }))
}

async fn create_habit(
    State(backend): State<StubBackend>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut inner = backend.inner.lock().unwrap();
    inner.next_id += 1;
    let id = format!("stub-{}", inner.next_id);
    inner.habits.push(StubHabit {
        id: id.clone(),
        user_id: payload["user_id"].as_str().unwrap_or_default().to_string(),
        title: payload["title"].as_str().unwrap_or_default().to_string(),
        description: payload["description"].as_str().map(String::from),
        frequency: payload["frequency"].as_str().unwrap_or("daily").to_string(),
        color: payload["color"].as_str().unwrap_or("#3B82F6").to_string(),
        completions: Vec::new(),
        current_streak: 0,
        longest_streak: 0,
    });
    (
        StatusCode::CREATED,
        Json(json!({ "id": id, "message": "Habit created successfully" })),
    )
}

async fn update_habit(
    State(backend): State<StubBackend>,
    Path(habit_id): Path<String>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut inner = backend.inner.lock().unwrap();
    let Some(habit) = inner.habits.iter_mut().find(|h| h.id == habit_id) else {
        return not_found();
    };
    if let Some(title) = payload["title"].as_str() {
        habit.title = title.to_string();
    }
    if let Some(color) = payload["color"].as_str() {
        habit.color = color.to_string();
    }
    if let Some(description) = payload.get("description") {
        habit.description = description.as_str().map(String::from);
    }
    if let Some(frequency) = payload["frequency"].as_str() {
        habit.frequency = frequency.to_string();
    }
    (
        StatusCode::OK,
        Json(json!({ "message": "Habit updated successfully", "habit_id": habit_id })),
    )
}

async fn delete_habit(
    State(backend): State<StubBackend>,
    Path(habit_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let mut inner = backend.inner.lock().unwrap();
    let before = inner.habits.len();
    inner.habits.retain(|h| h.id != habit_id);
    if inner.habits.len() == before {
        return not_found();
    }
    (
        StatusCode::OK,
        Json(json!({ "message": "Habit deleted successfully" })),
    )
}

async fn complete_habit(
    State(backend): State<StubBackend>,
    Path(habit_id): Path<String>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut inner = backend.inner.lock().unwrap();
    inner.completion_requests += 1;
    let date = payload["date"].as_str().unwrap_or_default().to_string();
    let Some(habit) = inner.habits.iter_mut().find(|h| h.id == habit_id) else {
        return not_found();
    };
    if habit.completions.iter().any(|c| *c == date) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Already completed for this date" })),
        );
    }
    habit.completions.push(date);
    (
        StatusCode::OK,
        Json(json!({ "message": "Habit completed successfully", "streak": 1 })),
    )
}

async fn uncomplete_habit(
    State(backend): State<StubBackend>,
    Path(habit_id): Path<String>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut inner = backend.inner.lock().unwrap();
    inner.completion_requests += 1;
    let date = payload["date"].as_str().unwrap_or_default().to_string();
    let Some(habit) = inner.habits.iter_mut().find(|h| h.id == habit_id) else {
        return not_found();
    };
    let before = habit.completions.len();
    habit.completions.retain(|c| *c != date);
    if habit.completions.len() == before {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Completion not found" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({ "message": "Completion removed successfully" })),
    )
}

pub fn stub_router(backend: StubBackend) -> Router {
    Router::new()
        .route("/api/users/:user_id/habits", get(list_habits))
        .route("/api/users/:user_id/stats", get(user_stats))
        .route("/api/habits", post(create_habit))
        .route("/api/habits/:habit_id", put(update_habit).delete(delete_habit))
        .route("/api/habits/:habit_id/complete", post(complete_habit))
        .route("/api/habits/:habit_id/uncomplete", post(uncomplete_habit))
        .with_state(backend)
}

/// Serves the stub on a free localhost port and returns its base url.
pub async fn spawn_backend(backend: StubBackend) -> String {
    spawn_app(stub_router(backend)).await
}

/// Serves any router on a free localhost port and returns its base url.
pub async fn spawn_app(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind random port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub");
    });
    format!("http://{addr}")
}
