use crate::storage::resolve_data_path;
use chrono::{Datelike, Local};
use std::{env, path::PathBuf};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    /// Calendar year shown by the tracker grid.
    pub tracker_year: i32,
}

impl Config {
    pub fn from_env() -> Result<Self, std::io::Error> {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);
        let tracker_year = env::var("TRACKER_YEAR")
            .ok()
            .and_then(|value| value.parse::<i32>().ok())
            .unwrap_or_else(|| Local::now().year());

        Ok(Self {
            port,
            data_path: resolve_data_path()?,
            tracker_year,
        })
    }
}
