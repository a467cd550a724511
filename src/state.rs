use crate::models::AppData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub tracker_year: i32,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, tracker_year: i32, data: AppData) -> Self {
        Self {
            data_path,
            tracker_year,
            data: Arc::new(Mutex::new(data)),
        }
    }
}
