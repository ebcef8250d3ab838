use deuda_viewer::data::export::EXPORT_FILE_NAME;
use deuda_viewer::data::filter::{FilterKey, Selection};
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    // ---- Logo (centered, optional) ----
    if let Some(logo) = &state.config.logo_path {
        let uri = format!("file://{}", logo.display());
        ui.vertical_centered(|ui: &mut Ui| {
            ui.add(
                egui::Image::new(uri)
                    .max_width(ui.available_width() * 0.8)
                    .max_height(120.0),
            );
        });
        ui.add_space(4.0);
    }

    ui.heading("Filtros");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No hay datos cargados.");
        return;
    }

    let mut changed: Option<(FilterKey, Selection)> = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for key in FilterKey::ALL {
                let Some(Some(entries)) = state.choices.get(&key) else {
                    ui.label(RichText::new(format!("{}: No encontrado", key.label())).weak());
                    continue;
                };

                let current = state.filters.get(&key).cloned().unwrap_or_default();
                ui.strong(key.label());
                egui::ComboBox::from_id_salt(key.column())
                    .selected_text(current.label())
                    .width(ui.available_width())
                    .show_ui(ui, |ui: &mut Ui| {
                        for entry in entries {
                            let is_selected = current.label() == entry.as_str();
                            if ui.selectable_label(is_selected, entry.as_str()).clicked()
                                && !is_selected
                            {
                                changed = Some((key, Selection::from_choice(entry)));
                            }
                        }
                    });
                ui.add_space(6.0);
            }
        });

    // Recompute the view after a selection change.
    if let Some((key, selection)) = changed {
        state.set_filter(key, selection);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Archivo", |ui: &mut Ui| {
            if ui.button("Abrir…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let can_export = state.current_view().is_some();
        if ui
            .add_enabled(can_export, egui::Button::new("Descargar Reporte en Excel"))
            .clicked()
        {
            export_file_dialog(state);
        }

        ui.separator();

        if let Some(path) = &state.source {
            ui.label(RichText::new(path.display().to_string()).weak());
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        } else if let Some(msg) = &state.notice {
            ui.label(RichText::new(msg).color(Color32::DARK_GREEN));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Abrir base de deuda")
        .add_filter(
            "Archivos soportados",
            &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv", "parquet", "pq"],
        )
        .add_filter("Excel", &["xlsx", "xlsm", "xlsb", "xls"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_source(path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Guardar reporte")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("Excel", &["xlsx"])
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.export_to(&path);
    }
}
