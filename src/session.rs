use std::path::PathBuf;

use anyhow::Context;
use thiserror::Error;

use crate::config::DashboardConfig;
use crate::data::cleaner::{self, CleanReport};
use crate::data::loader::{self, LoadError};
use crate::data::model::CleanTable;
use crate::present::{present, Presenter};
use crate::report::catalog::ReportId;
use crate::report::dispatcher::{self, RenderableResult, ReportError};
use crate::store::Store;

/// Banner text for anything other than a missing dataset.
pub const UNEXPECTED_ERROR_MESSAGE: &str =
    "An unexpected error occurred. Please check the log file for more details.";

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("dataset not found: {}", path.display())]
    DataSourceMissing { path: PathBuf },
    #[error(transparent)]
    Unhandled(#[from] anyhow::Error),
}

impl StartupError {
    /// What the user sees. Details stay in the log.
    pub fn user_message(&self) -> String {
        match self {
            StartupError::DataSourceMissing { path } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                format!("Dataset not found. Please make sure '{name}' is in the working directory.")
            }
            StartupError::Unhandled(_) => UNEXPECTED_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn surface(&self, presenter: &mut dyn Presenter) {
        presenter.error_banner(&self.user_message());
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Everything one dashboard run needs: the clean rows and the store built
/// from them. The store is closed exactly once, either by [`Session::close`]
/// or when the session is dropped.
pub struct Session {
    config: DashboardConfig,
    table: CleanTable,
    clean_report: CleanReport,
    store: Option<Store>,
}

impl Session {
    /// Load, clean and store the dataset. Failures are logged here; the
    /// caller only decides how to show them.
    pub fn start(config: DashboardConfig) -> Result<Self, StartupError> {
        Self::build(config).inspect_err(|e| {
            if let StartupError::Unhandled(err) = e {
                log::error!("Unhandled exception occurred: {err:?}");
            }
        })
    }

    fn build(config: DashboardConfig) -> Result<Self, StartupError> {
        let raw = match loader::load(&config.dataset_path) {
            Ok(raw) => raw,
            Err(LoadError::SourceMissing { path, source }) => {
                log::error!("{} not found: {source}", path.display());
                return Err(StartupError::DataSourceMissing { path });
            }
            Err(e) => return Err(anyhow::Error::new(e).context("loading dataset").into()),
        };
        log::info!("Dataset loaded successfully.");

        let (table, clean_report) = cleaner::clean(raw);
        log::info!(
            "Data cleaned successfully. Kept {} of {} rows, dropped {} ({} duplicate, {} incomplete, {} non-numeric).",
            clean_report.kept,
            clean_report.input_rows,
            clean_report.dropped(),
            clean_report.duplicates,
            clean_report.missing_required,
            clean_report.failed_coercion,
        );

        let store = Store::open(&config.database_path)
            .with_context(|| format!("opening {}", config.database_path.display()))?;

        // From here on the session owns the store, so an early return still
        // closes it.
        let mut session = Session {
            config,
            table,
            clean_report,
            store: Some(store),
        };
        session.rebuild_store()?;
        log::info!("Database created and data inserted.");
        Ok(session)
    }

    fn rebuild_store(&mut self) -> anyhow::Result<()> {
        let store = self.store.as_mut().context("store already closed")?;
        store
            .rebuild(&self.table)
            .context("writing movies into the database")?;
        Ok(())
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn table(&self) -> &CleanTable {
        &self.table
    }

    pub fn clean_report(&self) -> &CleanReport {
        &self.clean_report
    }

    /// Run one report. Errors are logged in full before being returned.
    pub fn run_report(&self, id: ReportId) -> Result<RenderableResult, ReportError> {
        log::info!("Running report {}", id.label());
        self.store
            .as_ref()
            .ok_or(ReportError::StoreClosed)
            .and_then(|store| dispatcher::run(id, store, &self.table))
            .inspect_err(|e| log::error!("Unhandled exception occurred in {}: {e:?}", id.label()))
    }

    /// Release the database handle now instead of at drop.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(store) = self.store.take() {
            match store.close() {
                Ok(()) => log::info!("Database connection closed."),
                Err(e) => log::warn!("Failed to close database connection: {e}"),
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.release();
    }
}

/// Draw a finished report, or the generic banner if it failed.
pub fn show_outcome(
    outcome: &Result<RenderableResult, ReportError>,
    presenter: &mut dyn Presenter,
) {
    match outcome {
        Ok(rendered) => present(rendered, presenter),
        Err(_) => presenter.error_banner(UNEXPECTED_ERROR_MESSAGE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::testing::{Event, Recorder};
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use std::path::Path;
    use std::sync::{Mutex, Once};

    static CAPTURED: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());

    struct Capture;

    impl Log for Capture {
        fn enabled(&self, _: &Metadata<'_>) -> bool {
            true
        }
        fn log(&self, record: &Record<'_>) {
            CAPTURED
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }
        fn flush(&self) {}
    }

    fn capture_logs() {
        static INSTALL: Once = Once::new();
        INSTALL.call_once(|| {
            log::set_logger(&Capture).unwrap();
            log::set_max_level(LevelFilter::Info);
        });
    }

    /// Log lines at `level` that mention `needle`. Tests run in parallel, so
    /// each one filters on its own temp directory.
    fn logged(level: Level, needle: &str) -> Vec<String> {
        CAPTURED
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, m)| *l == level && m.contains(needle))
            .map(|(_, m)| m.clone())
            .collect()
    }

    fn config_in(dir: &Path) -> DashboardConfig {
        DashboardConfig {
            dataset_path: dir.join("imdb_movies.csv"),
            database_path: dir.join("imdb.db"),
            log_path: dir.join("imdb_dashboard.log"),
            ..DashboardConfig::default()
        }
    }

    const CSV: &str = "\
title,genre,rating,release_year,votes,budget,revenue,director,language,country
Heat,Crime,8.3,1995,700000,60000000,187000000,Michael Mann,English,USA
Heat,Crime,8.3,1995,700000,60000000,187000000,Michael Mann,English,USA
Amelie,Romance,8.3,2001,750000,10000000,174000000,Jean-Pierre Jeunet,French,France
Parasite,Thriller,8.5,2019,800000,11400000,258000000,Bong Joon Ho,Korean,South Korea
Broken,Drama,,2010,10,1,1,Nobody,English,USA
Nonsense,Drama,7.0,unknown,10,1,1,Nobody,English,USA
";

    #[test]
    fn missing_dataset_shows_one_error_and_builds_no_store() -> anyhow::Result<()> {
        capture_logs();
        let dir = tempfile::tempdir()?;
        let config = config_in(dir.path());

        let err = match Session::start(config.clone()) {
            Err(e) => e,
            Ok(_) => panic!("session started without a dataset"),
        };
        assert!(matches!(err, StartupError::DataSourceMissing { .. }));

        let mut recorder = Recorder::default();
        err.surface(&mut recorder);
        assert_eq!(
            recorder.events,
            vec![Event::Error(
                "Dataset not found. Please make sure 'imdb_movies.csv' is in the working directory."
                    .into()
            )]
        );

        let needle = dir.path().to_string_lossy().into_owned();
        assert_eq!(logged(Level::Error, &needle).len(), 1);
        assert!(!config.database_path.exists());
        Ok(())
    }

    #[test]
    fn full_session_cleans_stores_and_runs_every_report() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let config = config_in(dir.path());
        std::fs::write(&config.dataset_path, CSV)?;

        let session = Session::start(config.clone())?;
        assert_eq!(session.table().len(), 3);
        assert_eq!(session.clean_report().dropped(), 3);

        let mut recorder = Recorder::default();
        for id in ReportId::ALL {
            show_outcome(&session.run_report(id), &mut recorder);
        }
        assert!(recorder.errors().is_empty());
        assert!(recorder.events.contains(&Event::ScatterPlot(3)));
        assert!(recorder.events.contains(&Event::LineChart(3)));

        let top = session.run_report(ReportId::TopRated)?;
        assert_eq!(top.result.rows[0][0].as_str(), Some("Parasite"));

        session.close();
        assert!(config.database_path.exists());
        Ok(())
    }

    #[test]
    fn restart_replaces_previous_database_contents() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let config = config_in(dir.path());
        std::fs::write(&config.dataset_path, CSV)?;
        Session::start(config.clone())?.close();

        let header = CSV.lines().next().unwrap_or_default();
        std::fs::write(
            &config.dataset_path,
            format!("{header}\nSolo,Drama,6.0,2020,5,1,2,Someone,English,USA\n"),
        )?;
        let session = Session::start(config)?;
        let rows = session.run_report(ReportId::TopRated)?.result.rows;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0].as_str(), Some("Solo"));
        Ok(())
    }

    #[test]
    fn unexpected_failure_shows_generic_banner() -> anyhow::Result<()> {
        capture_logs();
        let dir = tempfile::tempdir()?;
        let config = config_in(dir.path());
        std::fs::write(&config.dataset_path, "title,genre\nHeat,Crime\n")?;

        let err = match Session::start(config) {
            Err(e) => e,
            Ok(_) => panic!("session started on a malformed dataset"),
        };
        assert!(matches!(err, StartupError::Unhandled(_)));
        assert_eq!(err.user_message(), UNEXPECTED_ERROR_MESSAGE);
        Ok(())
    }

    #[test]
    fn fully_dirty_dataset_yields_empty_reports() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let config = config_in(dir.path());
        let header = CSV.lines().next().unwrap_or_default();
        std::fs::write(
            &config.dataset_path,
            format!("{header}\nA,Drama,bad,2000,1,1,1,,,\n,Drama,7,2000,1,1,1,,,\n"),
        )?;

        let session = Session::start(config)?;
        assert!(session.table().is_empty());
        for id in ReportId::ALL {
            assert!(session.run_report(id)?.result.is_empty(), "{id:?}");
        }
        Ok(())
    }
}
