use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::DashboardConfig;
use crate::data::export::export_csv;
use crate::data::loader::load_file;
use crate::session::Session;

// ---------------------------------------------------------------------------
// Central panel tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    BarChart,
    ScatterPlot,
    DataTable,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::BarChart, Tab::ScatterPlot, Tab::DataTable];

    pub fn label(self) -> &'static str {
        match self {
            Tab::BarChart => "Bar Chart",
            Tab::ScatterPlot => "Scatter Plot",
            Tab::DataTable => "Data Table",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// A dataset that could not be loaded at startup. Nothing else is shown.
#[derive(Debug, Clone)]
pub struct FatalLoad {
    pub path: PathBuf,
    pub message: String,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Active session (None until a dataset loads).
    pub session: Option<Session>,

    /// Set when the startup load failed and no session exists.
    pub fatal: Option<FatalLoad>,

    /// Which view the central panel shows.
    pub tab: Tab,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the state and load the configured dataset.
    pub fn new(config: DashboardConfig) -> Self {
        let mut state = Self {
            config,
            session: None,
            fatal: None,
            tab: Tab::default(),
            status_message: None,
        };
        let path = state.config.dataset_path.clone();
        state.load(&path);
        state
    }

    /// Load a dataset and start a fresh session over it.
    ///
    /// On failure an existing session is kept and the error goes to the
    /// status bar; without a session the failure is fatal.
    pub fn load(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => {
                let (min_age, max_age) = dataset.age_bounds();
                log::info!(
                    "Loaded {} players from {} (ages {min_age}-{max_age}, {} nationalities)",
                    dataset.len(),
                    path.display(),
                    dataset.nationalities().len()
                );
                self.session = Some(Session::new(
                    Arc::new(dataset),
                    self.config.initial_statistic,
                    self.config.top_n,
                ));
                self.fatal = None;
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                if self.session.is_some() {
                    self.status_message = Some(format!("Error: {e}"));
                } else {
                    self.fatal = Some(FatalLoad {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    });
                }
            }
        }
    }

    /// Write the current filtered view to `path` as CSV.
    pub fn export_view(&mut self, path: &Path) -> Result<()> {
        let session = self.session.as_ref().context("no dataset loaded")?;
        let view = session.view();
        export_csv(&view, path).with_context(|| format!("exporting to {}", path.display()))?;
        let count = view.len();
        self.status_message = Some(format!("Exported {count} players to {}", path.display()));
        Ok(())
    }
}
