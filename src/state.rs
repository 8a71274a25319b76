use crate::report::catalog::ReportId;
use crate::report::dispatcher::{RenderableResult, ReportError};
use crate::session::{Session, StartupError};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// The session, or why it could not be started.
    pub startup: Result<Session, StartupError>,

    /// Report chosen in the selection control.
    pub selected: ReportId,

    /// Output of the selected report. Only recomputed when the selection
    /// changes, not every frame.
    pub outcome: Option<Result<RenderableResult, ReportError>>,
}

impl AppState {
    pub fn new(startup: Result<Session, StartupError>) -> Self {
        let mut state = Self {
            startup,
            selected: ReportId::ALL[0],
            outcome: None,
        };
        state.refresh();
        state
    }

    pub fn session(&self) -> Option<&Session> {
        self.startup.as_ref().ok()
    }

    /// Switch to another report and run it.
    pub fn select(&mut self, id: ReportId) {
        if id != self.selected || self.outcome.is_none() {
            self.selected = id;
            self.refresh();
        }
    }

    fn refresh(&mut self) {
        self.outcome = self.session().map(|s| s.run_report(self.selected));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;

    fn started(dir: &std::path::Path, csv: &str) -> Result<Session, StartupError> {
        let config = DashboardConfig {
            dataset_path: dir.join("imdb_movies.csv"),
            database_path: dir.join("imdb.db"),
            log_path: dir.join("imdb_dashboard.log"),
            ..DashboardConfig::default()
        };
        std::fs::write(&config.dataset_path, csv).unwrap();
        Session::start(config)
    }

    #[test]
    fn first_report_runs_on_start_and_selection_reruns() {
        let dir = tempfile::tempdir().unwrap();
        let csv = "title,genre,rating,release_year,votes,budget,revenue,director,language,country\n\
                   Heat,Crime,8.3,1995,700000,60000000,187000000,Michael Mann,English,USA\n";
        let mut state = AppState::new(started(dir.path(), csv));

        let first = state.outcome.as_ref().unwrap().as_ref().unwrap();
        assert_eq!(first.report, ReportId::TopRated);

        state.select(ReportId::MostProfitable);
        let second = state.outcome.as_ref().unwrap().as_ref().unwrap();
        assert_eq!(second.report, ReportId::MostProfitable);
        assert_eq!(second.result.len(), 1);
    }

    #[test]
    fn failed_start_has_no_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let startup = Session::start(DashboardConfig {
            dataset_path: dir.path().join("absent.csv"),
            database_path: dir.path().join("imdb.db"),
            ..DashboardConfig::default()
        });
        let mut state = AppState::new(startup);
        state.select(ReportId::ByLanguage);
        assert!(state.session().is_none());
        assert!(state.outcome.is_none());
    }
}
