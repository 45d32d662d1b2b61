use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::models::{Habit, HabitFields, HabitPatch, StatsSnapshot};

/// The remote store every habit lives in. All reads and writes go through
/// here; the dashboard keeps only a cache of the last successful fetch.
#[async_trait]
pub trait HabitProvider: Send + Sync {
    async fn list_habits(&self, user_id: &str) -> Result<Vec<Habit>, AppError>;

    async fn fetch_stats(&self, user_id: &str) -> Result<StatsSnapshot, AppError>;

    /// Creates a habit and returns its provider-assigned id.
    async fn create_habit(&self, user_id: &str, fields: &HabitFields) -> Result<String, AppError>;

    /// Applies a partial update. Fields the patch leaves out keep their
    /// stored values.
    async fn update_habit(&self, habit_id: &str, patch: &HabitPatch) -> Result<(), AppError>;

    async fn delete_habit(&self, habit_id: &str) -> Result<(), AppError>;

    /// Sets the completion state of one habit on one `YYYY-MM-DD` date.
    /// Idempotent: repeating a call whose target state is already stored is
    /// a no-op, not an error.
    async fn set_completion(
        &self,
        habit_id: &str,
        date: &str,
        completed: bool,
    ) -> Result<(), AppError>;
}

/// REST implementation against the habit tracker backend.
pub struct HttpProvider {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct CreatedHabit {
    id: String,
}

impl HttpProvider {
    pub fn new(base_url: impl Into<String>, auth_token: Option<&str>) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = auth_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|err| AppError::validation(format!("invalid auth token: {err}")))?;
            headers.insert(AUTHORIZATION, value);
        }
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Pulls the backend's `{"message": ...}` body out of a failed response.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<ApiMessage>().await {
        Ok(body) if !body.message.is_empty() => body.message,
        _ => format!("provider returned {status}"),
    }
}

#[async_trait]
impl HabitProvider for HttpProvider {
    async fn list_habits(&self, user_id: &str) -> Result<Vec<Habit>, AppError> {
        let response = self
            .client
            .get(self.url(&format!("/api/users/{user_id}/habits")))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(AppError::provider(error_message(response).await));
        }
        Ok(response.json().await?)
    }

    async fn fetch_stats(&self, user_id: &str) -> Result<StatsSnapshot, AppError> {
        let response = self
            .client
            .get(self.url(&format!("/api/users/{user_id}/stats")))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(AppError::provider(error_message(response).await));
        }
        Ok(response.json().await?)
    }

    async fn create_habit(&self, user_id: &str, fields: &HabitFields) -> Result<String, AppError> {
        // target_days is part of the backend schema but the dashboard always
        // tracks one day at a time.
        let payload = serde_json::json!({
            "title": fields.title,
            "description": fields.description,
            "frequency": fields.frequency,
            "color": fields.color,
            "user_id": user_id,
            "target_days": 1,
        });
        let response = self
            .client
            .post(self.url("/api/habits"))
            .json(&payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(AppError::provider(error_message(response).await));
        }
        let created: CreatedHabit = response.json().await?;
        Ok(created.id)
    }

    async fn update_habit(&self, habit_id: &str, patch: &HabitPatch) -> Result<(), AppError> {
        let response = self
            .client
            .put(self.url(&format!("/api/habits/{habit_id}")))
            .json(patch)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(AppError::provider(error_message(response).await));
        }
        Ok(())
    }

    async fn delete_habit(&self, habit_id: &str) -> Result<(), AppError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/habits/{habit_id}")))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(AppError::provider(error_message(response).await));
        }
        Ok(())
    }

    async fn set_completion(
        &self,
        habit_id: &str,
        date: &str,
        completed: bool,
    ) -> Result<(), AppError> {
        let endpoint = if completed { "complete" } else { "uncomplete" };
        let response = self
            .client
            .post(self.url(&format!("/api/habits/{habit_id}/{endpoint}")))
            .json(&serde_json::json!({ "date": date }))
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = error_message(response).await;
        let already_in_target = (completed
            && status == StatusCode::BAD_REQUEST
            && message.contains("Already completed"))
            || (!completed
                && status == StatusCode::NOT_FOUND
                && message.contains("Completion not found"));
        if already_in_target {
            debug!(habit_id, date, completed, "completion already in requested state");
            return Ok(());
        }
        Err(AppError::provider(message))
    }
}
