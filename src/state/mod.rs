// src/state/mod.rs
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::analysis::{self, AnalysisPayload, AnalysisRequest, Dataset};
use crate::charts::{ColumnActivated, SortKey};
use crate::config::Settings;
use crate::file::{FileManager, LoadedFile};

pub mod selection;
pub mod store;

pub use selection::{guard, Navigation, PageState, Selection};
pub use store::{AnalysisStore, StoreChange, SubscriptionId};

// Screen/tab tracking
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Home,
    Dashboard,
}

/// Identifies the generation currently in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRun {
    pub id: Uuid,
    pub source: String,
    pub finished_at: DateTime<Utc>,
}

impl AnalysisRun {
    fn new(source: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: source.into(),
            finished_at: Utc::now(),
        }
    }
}

// Core application state
#[derive(Debug)]
pub struct AppState {
    pub settings: Settings,

    // Analysis data
    pub store: AnalysisStore,
    pub dataset: Option<Dataset>,
    pub last_run: Option<AnalysisRun>,
    // column targets of the analysis currently in the store
    pub request: AnalysisRequest,

    // View state, never written to the store
    pub selection: Rc<RefCell<Selection>>,
    pub table_sort: Option<SortKey>,

    // Minimal UI state
    pub current_screen: Screen,
    pub error_message: Option<String>,

    // File management
    pub file_manager: FileManager,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let mut store = AnalysisStore::new();
        let selection = Rc::new(RefCell::new(Selection::default()));

        // every new generation re-seeds, whichever sub-reports it changed
        let sink = Rc::clone(&selection);
        store.subscribe(&[], move |change| {
            sink.borrow_mut().on_store_change(change.snapshot);
        });

        Self {
            settings,
            store,
            dataset: None,
            last_run: None,
            request: AnalysisRequest::default(),
            selection,
            table_sort: None,
            current_screen: Screen::Home,
            error_message: None,
            file_manager: FileManager::new(),
        }
    }

    pub fn selected_column(&self) -> Option<String> {
        self.selection.borrow().selected_column().map(str::to_string)
    }

    /// Opens a data file and analyzes it, or installs a prepared analysis.
    pub fn open_file(&mut self, path: &Path) -> Result<()> {
        match self.file_manager.load(path)? {
            LoadedFile::Dataset(dataset) => {
                self.dataset = Some(dataset);
                self.run_analysis(AnalysisRequest::default())
            }
            LoadedFile::Payload(payload) => {
                self.dataset = None;
                self.request = AnalysisRequest::default();
                let source = path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.publish(payload, source);
                Ok(())
            }
        }
    }

    /// Analyzes the loaded dataset. The KPI currently in the store becomes the
    /// baseline for the new deltas. The store and `request` are untouched when
    /// the run fails.
    pub fn run_analysis(&mut self, request: AnalysisRequest) -> Result<()> {
        let dataset = self.dataset.as_ref()
            .ok_or_else(|| anyhow!("No dataset loaded"))?;
        let snapshot = self.store.read();

        let payload = analysis::run_analysis(
            dataset,
            &request,
            &self.settings.analysis,
            snapshot.kpi.present(),
        )
        .with_context(|| format!("Analysis of {} failed", dataset.name))?;

        let source = dataset.name.clone();
        self.request = request;
        self.publish(payload, source);
        Ok(())
    }

    /// Re-runs the analysis with the selected column as distribution target.
    pub fn rerun_for_selection(&mut self) -> Result<()> {
        let request = AnalysisRequest {
            distribution_column: self.selected_column(),
            ..self.request.clone()
        };
        self.run_analysis(request)
    }

    /// Re-runs the analysis with the selected column as time column.
    pub fn rerun_with_time_column(&mut self) -> Result<()> {
        let column = self.selected_column()
            .ok_or_else(|| anyhow!("No column selected"))?;
        let request = AnalysisRequest {
            time_column: Some(column),
            ..self.request.clone()
        };
        self.run_analysis(request)
    }

    fn publish(&mut self, payload: AnalysisPayload, source: String) {
        let before = self.store.generation();
        self.store.set_analysis_data(Some(payload));
        let generation = self.store.generation();

        if generation != before {
            let run = AnalysisRun::new(source);
            log::info!("Analysis run {} for {} at generation {}", run.id, run.source, generation);
            self.last_run = Some(run);
            self.table_sort = None;
        } else {
            log::debug!("Analysis of {} unchanged, keeping generation {}", source, generation);
        }
        self.current_screen = Screen::Dashboard;
    }

    pub fn export_analysis(&self, path: &Path) -> Result<()> {
        let snapshot = self.store.read();
        if !snapshot.is_loaded() {
            return Err(anyhow!("No analysis to export"));
        }
        self.file_manager.export_payload(&snapshot.to_payload(), path)
    }

    pub fn clear(&mut self) {
        self.store.clear_analysis_data();
        self.dataset = None;
        self.last_run = None;
        self.request = AnalysisRequest::default();
        self.table_sort = None;
        self.current_screen = Screen::Home;
    }

    pub fn activate_column(&mut self, event: ColumnActivated) {
        self.selection.borrow_mut().activate(event);
    }

    /// Whether the Dashboard tab can be entered.
    pub fn dashboard_available(&self) -> bool {
        guard(&self.store.read()) == Navigation::Stay
    }

    /// Evaluates the dashboard guard and follows a redirect.
    pub fn dashboard_navigation(&mut self) -> Navigation {
        let navigation = guard(&self.store.read());
        if navigation == Navigation::RedirectHome {
            self.current_screen = Screen::Home;
        }
        navigation
    }
}
