pub mod app;
pub mod calendar;
pub mod completions;
pub mod coordinator;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod provider;
pub mod session;
pub mod state;
pub mod stats;
pub mod ui;
pub mod view;

pub use app::router;
pub use state::AppState;
