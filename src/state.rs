use std::sync::Arc;

use tokio::sync::Mutex;

use crate::errors::AppError;
use crate::models::{Habit, StatsSnapshot};
use crate::provider::HabitProvider;
use crate::session::Session;

/// The last successful fetch from the provider. Replaced wholesale after
/// every mutation, never patched in place, so local and remote state cannot
/// drift apart for longer than one round trip.
#[derive(Debug, Clone, Default)]
pub struct UserData {
    pub habits: Vec<Habit>,
    pub stats: StatsSnapshot,
}

#[derive(Clone)]
pub struct AppState {
    pub session: Session,
    pub provider: Arc<dyn HabitProvider>,
    cache: Arc<Mutex<Option<UserData>>>,
}

impl AppState {
    pub fn new(session: Session, provider: Arc<dyn HabitProvider>) -> Self {
        Self {
            session,
            provider,
            cache: Arc::new(Mutex::new(None)),
        }
    }

    /// Fetches habits and stats together and replaces the cached copy.
    pub async fn refresh(&self) -> Result<UserData, AppError> {
        let (habits, stats) = tokio::join!(
            self.provider.list_habits(&self.session.user_id),
            self.provider.fetch_stats(&self.session.user_id),
        );
        let data = UserData {
            habits: habits?,
            stats: stats?,
        };
        *self.cache.lock().await = Some(data.clone());
        Ok(data)
    }

    /// The cached copy if one exists, otherwise a fresh fetch.
    pub async fn current(&self) -> Result<UserData, AppError> {
        if let Some(data) = self.cache.lock().await.clone() {
            return Ok(data);
        }
        self.refresh().await
    }
}
