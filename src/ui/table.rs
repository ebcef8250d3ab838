use deuda_viewer::data::error::ViewError;
use deuda_viewer::data::format::format_count;
use deuda_viewer::data::model::Table;
use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Results table + totals (central panel)
// ---------------------------------------------------------------------------

/// Render the filtered rows and the totals row in the central panel.
pub fn debt_table(ui: &mut Ui, state: &AppState) {
    ui.heading(&state.config.title);
    ui.separator();

    let view = match &state.view {
        Some(Ok(view)) => view,
        Some(Err(ViewError::EmptyResult)) => {
            ui.label(RichText::new("No hay datos con esos filtros.").color(egui::Color32::YELLOW));
            return;
        }
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Abra un archivo para ver la deuda  (Archivo → Abrir…)");
            });
            return;
        }
    };

    ui.strong(format!("Registros encontrados: {} filas", format_count(view.row_count())));

    // Leave room below for the totals block.
    let rows_height = (ui.available_height() - 120.0).max(120.0);
    ui.push_id("rows", |ui: &mut Ui| {
        grid(ui, &view.rows, &view.financial_columns, rows_height);
    });

    ui.separator();
    ui.strong("Total General");
    ui.push_id("totals", |ui: &mut Ui| {
        grid(ui, &view.totals_row, &view.financial_columns, 40.0);
    });
}

/// One scrollable grid. Financial columns are right-aligned in monospace so
/// the digits line up.
fn grid(ui: &mut Ui, table: &Table, financial: &[String], max_height: f32) {
    let columns = table.columns();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(max_height)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(TableColumn::auto().at_least(90.0), columns.len())
        .header(20.0, |mut header| {
            for column in columns {
                header.col(|ui: &mut Ui| {
                    ui.strong(&column.name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, table.len(), |mut row| {
                let idx = row.index();
                for column in columns {
                    let text = column.values[idx].to_string();
                    let numeric = financial.contains(&column.name);
                    row.col(|ui: &mut Ui| {
                        if numeric {
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
                                ui.monospace(text);
                            });
                        } else {
                            ui.label(text);
                        }
                    });
                }
            });
        });
}
