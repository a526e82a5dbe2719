// src/state/selection.rs
use crate::analysis::AnalysisResult;
use crate::charts::ColumnActivated;

/// Dashboard page lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Uninitialized,
    Loaded,
}

impl PageState {
    pub fn of(snapshot: &AnalysisResult) -> Self {
        if snapshot.is_loaded() {
            PageState::Loaded
        } else {
            PageState::Uninitialized
        }
    }
}

/// Where the dashboard should go after evaluating its guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    RedirectHome,
}

pub fn guard(snapshot: &AnalysisResult) -> Navigation {
    match PageState::of(snapshot) {
        PageState::Loaded => Navigation::Stay,
        PageState::Uninitialized => Navigation::RedirectHome,
    }
}

/// The active column for detail charts. Lives next to the view, never in the
/// store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    selected_column: Option<String>,
}

impl Selection {
    pub fn selected_column(&self) -> Option<&str> {
        self.selected_column.as_deref()
    }

    /// Called once per new store generation. Any reload or clear drops the
    /// user's choice and re-seeds from the distribution column.
    pub fn on_store_change(&mut self, snapshot: &AnalysisResult) {
        if !snapshot.is_loaded() {
            self.reset();
            return;
        }
        let column = snapshot.selected_distribution_column().map(str::to_string);
        log::debug!("Selection seeded from distribution column {:?}", column);
        self.selected_column = column;
    }

    pub fn activate(&mut self, event: ColumnActivated) {
        log::debug!("Column activated: {}", event.0);
        self.selected_column = Some(event.0);
    }

    pub fn reset(&mut self) {
        self.selected_column = None;
    }
}
