pub mod app;
pub mod books;
pub mod config;
pub mod errors;
pub mod goals;
pub mod handlers;
pub mod level;
pub mod milestones;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod tracker;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};
