use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::filter::{nationality_options, AgeRange, NationalityFilter};
use crate::data::model::Statistic;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(session) = state.session.as_mut() else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Statistic selector ----
            ui.strong("Choose a statistic to visualize:");
            let mut statistic = session.statistic();
            egui::ComboBox::from_id_salt("statistic")
                .selected_text(statistic.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for stat in Statistic::ALL {
                        ui.selectable_value(&mut statistic, stat, stat.label());
                    }
                });
            session.set_statistic(statistic);
            ui.separator();

            // ---- Age range (bounded by the dataset) ----
            ui.strong("Select Age Range:");
            let (lo, hi) = session.dataset().age_bounds();
            let mut range: AgeRange = session.criteria().age_range;
            ui.add(Slider::new(&mut range.min, lo..=hi).text("from"));
            ui.add(Slider::new(&mut range.max, lo..=hi).text("to"));
            session.set_age_range(range);
            ui.separator();

            // ---- Nationality ----
            ui.strong("Filter by Nationality:");
            let options = nationality_options(session.dataset());
            let mut selected = session.criteria().nationality.label().to_string();
            egui::ComboBox::from_id_salt("nationality")
                .selected_text(selected.as_str())
                .height(320.0)
                .show_ui(ui, |ui: &mut Ui| {
                    for option in &options {
                        ui.selectable_value(&mut selected, option.clone(), option.as_str());
                    }
                });
            session.set_nationality(NationalityFilter::from_label(&selected));
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.session.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export CSV…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            ui.label(format!(
                "{} players loaded, {} displayed",
                session.dataset().len(),
                session.view().len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Startup failure
// ---------------------------------------------------------------------------

/// Shown instead of the dashboard when no dataset could be loaded.
pub fn load_failure(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(40.0);
        ui.heading(RichText::new("Could not load the player dataset").color(Color32::RED));
        ui.add_space(8.0);
        match &state.fatal {
            Some(fatal) => {
                ui.monospace(fatal.path.display().to_string());
                ui.label(fatal.message.as_str());
            }
            None => {
                ui.label("No dataset loaded.");
            }
        }
        ui.add_space(12.0);
        if ui.button("Open another file…").clicked() {
            open_file_dialog(state);
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open player statistics")
        .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered players")
        .add_filter("CSV", &["csv"])
        .set_file_name("players.csv")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_view(&path) {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
