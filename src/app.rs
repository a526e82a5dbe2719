// src/app.rs
use eframe::egui;

use crate::config::Settings;
use crate::state::{AppState, Screen};
use crate::ui;

pub struct DashboardApp {
    state: AppState,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        let mut state = AppState::new(settings);

        // store writes can come from menu actions outside the frame's input
        let ctx = cc.egui_ctx.clone();
        state.store.subscribe(&[], move |change| {
            log::trace!("Repaint for store generation {}", change.generation);
            ctx.request_repaint();
        });

        Self { state }
    }

    fn show_menu(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open Data File...").clicked() {
                    ui::open_file_dialog(&mut self.state);
                    ui.close_menu();
                }
                let loaded = self.state.store.read().is_loaded();
                if ui.add_enabled(loaded, egui::Button::new("Export Analysis...")).clicked() {
                    ui::export_file_dialog(&mut self.state);
                    ui.close_menu();
                }
                if ui.add_enabled(loaded, egui::Button::new("Clear Analysis")).clicked() {
                    self.state.clear();
                    ui.close_menu();
                }
            });

            ui.menu_button("Analysis", |ui| {
                let can_rerun = self.state.dataset.is_some() && self.state.selected_column().is_some();
                if ui.add_enabled(can_rerun, egui::Button::new("Re-run for selected column")).clicked() {
                    if let Err(e) = self.state.rerun_for_selection() {
                        self.state.error_message = Some(format!("{:#}", e));
                    }
                    ui.close_menu();
                }
                if ui.add_enabled(can_rerun, egui::Button::new("Use selected column as time column")).clicked() {
                    if let Err(e) = self.state.rerun_with_time_column() {
                        self.state.error_message = Some(format!("{:#}", e));
                    }
                    ui.close_menu();
                }
            });

            ui.separator();

            // Tab selection using buttons; the dashboard needs a loaded analysis
            let tabs = [
                (Screen::Home, "Home", true),
                (Screen::Dashboard, "Dashboard", self.state.dashboard_available()),
            ];

            for (mode, label, enabled) in tabs {
                let tab = egui::SelectableLabel::new(self.state.current_screen == mode, label);
                if ui.add_enabled(enabled, tab).clicked() {
                    self.state.current_screen = mode;
                }
            }
        });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.show_menu(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            match self.state.current_screen {
                Screen::Home => ui::home::show_home_view(ui, &mut self.state),
                Screen::Dashboard => ui::dashboard::show_dashboard_view(ui, &mut self.state),
            }
        });

        // Show error modal if needed
        let error_msg = self.state.error_message.clone();
        if let Some(error) = error_msg {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.state.error_message = None;
                    }
                });
        }
    }
}
