use std::path::PathBuf;

/// Where the dashboard reads from and writes to. There are no flags or
/// environment overrides; the defaults match the files the dashboard ships
/// alongside.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// CSV source, read once at startup.
    pub dataset_path: PathBuf,
    /// SQLite database, rebuilt on every start.
    pub database_path: PathBuf,
    /// Append-only log file.
    pub log_path: PathBuf,
    pub window_title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("imdb_movies.csv"),
            database_path: PathBuf::from("imdb.db"),
            log_path: PathBuf::from("imdb_dashboard.log"),
            window_title: "IMDb Movies Analysis Dashboard".to_string(),
        }
    }
}
