use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use deuda_viewer::config::AppConfig;
use deuda_viewer::data::cache::DatasetCache;
use deuda_viewer::data::error::ViewError;
use deuda_viewer::data::filter::{choices, FilterKey, FilterState, Selection};
use deuda_viewer::data::model::Table;
use deuda_viewer::data::view::{build_view, DebtView};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Path of the loaded (or last attempted) dataset.
    pub source: Option<PathBuf>,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Arc<Table>>,

    /// Choice list per filter; None when the dataset lacks the column.
    pub choices: BTreeMap<FilterKey, Option<Vec<String>>>,

    /// Per-key filter selections.
    pub filters: FilterState,

    /// Result of the current render cycle.
    pub view: Option<Result<DebtView, ViewError>>,

    /// Error shown in the UI (load or export failure).
    pub status_message: Option<String>,

    /// Confirmation shown after a successful action.
    pub notice: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            source: None,
            dataset: None,
            choices: BTreeMap::new(),
            filters: FilterState::new(),
            view: None,
            status_message: None,
            notice: None,
        }
    }

    /// Load `path` through the process-wide cache. A failure clears the
    /// current dataset: nothing is shown until a load succeeds.
    pub fn load_source(&mut self, path: PathBuf) {
        match DatasetCache::global().get_or_load(&path) {
            Ok(table) => {
                self.source = Some(path);
                self.set_dataset(table);
                self.notice = Some("Cargado correctamente".to_string());
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.source = Some(path);
                self.dataset = None;
                self.choices.clear();
                self.view = None;
                self.notice = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a loaded dataset, reset filters and choice lists.
    pub fn set_dataset(&mut self, dataset: Arc<Table>) {
        self.choices = FilterKey::ALL
            .iter()
            .map(|&key| (key, choices(&dataset, key)))
            .collect();
        self.filters = FilterKey::ALL.iter().map(|&key| (key, Selection::All)).collect();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Change one filter and recompute the view.
    pub fn set_filter(&mut self, key: FilterKey, selection: Selection) {
        self.filters.insert(key, selection);
        self.refilter();
    }

    /// Recompute the view after a filter change.
    pub fn refilter(&mut self) {
        self.view = self
            .dataset
            .as_ref()
            .map(|ds| build_view(ds, &self.filters, &self.config.financial_markers));
    }

    /// The current view when it has rows to show.
    pub fn current_view(&self) -> Option<&DebtView> {
        self.view.as_ref().and_then(|v| v.as_ref().ok())
    }

    /// Write the displayed table to `path`: CSV for a `.csv` target, xlsx
    /// otherwise.
    pub fn export_to(&mut self, path: &Path) {
        match self.write_export(path) {
            Ok(rows) => {
                log::info!("Exported {rows} rows to {}", path.display());
                self.status_message = None;
                self.notice = Some(format!("Exportado: {}", path.display()));
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    fn write_export(&self, path: &Path) -> Result<usize> {
        let view = self
            .current_view()
            .context("no filtered rows to export")?;
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        let bytes = if is_csv {
            view.export_csv().context("building CSV")?
        } else {
            view.export_xlsx().context("building spreadsheet")?
        };
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(view.row_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_csv(contents: &str) -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deuda.csv");
        std::fs::write(&path, contents).unwrap();
        let mut state = AppState::new(AppConfig::default());
        state.load_source(path);
        (dir, state)
    }

    #[test]
    fn load_populates_choices_and_view() {
        let (_dir, state) =
            state_with_csv("Periodo,Mes,Saldo Inicial\n2021,enero,100\n2022,marzo,200\n");
        assert!(state.status_message.is_none());
        assert_eq!(
            state.choices[&FilterKey::Periodo],
            Some(vec!["Todos".to_string(), "2021".to_string(), "2022".to_string()])
        );
        assert_eq!(state.choices[&FilterKey::Deudor], None);
        assert_eq!(state.current_view().unwrap().row_count(), 2);
    }

    #[test]
    fn empty_selection_blocks_export() {
        let (dir, mut state) = state_with_csv("Periodo,Saldo Final\n2021,1\n");
        state.set_filter(FilterKey::Periodo, Selection::Value("2030".into()));
        assert_eq!(state.view, Some(Err(ViewError::EmptyResult)));

        let target = dir.path().join("deuda_filtrada.xlsx");
        state.export_to(&target);
        assert!(state.status_message.is_some());
        assert!(!target.exists());
    }

    #[test]
    fn export_format_follows_target_extension() {
        let (dir, mut state) = state_with_csv("Periodo,Saldo Final\n2021,1234.5\n2022,1\n");
        state.set_filter(FilterKey::Periodo, Selection::Value("2021".into()));

        let csv_target = dir.path().join("deuda_filtrada.csv");
        state.export_to(&csv_target);
        assert!(state.status_message.is_none());
        let text = std::fs::read_to_string(&csv_target).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["PERIODO,SALDO FINAL", "2021,\"1,234.50\""]);

        let xlsx_target = dir.path().join("deuda_filtrada.xlsx");
        state.export_to(&xlsx_target);
        assert!(state.status_message.is_none());
        assert!(std::fs::read(&xlsx_target).unwrap().starts_with(b"PK"));
    }

    #[test]
    fn missing_source_is_reported() {
        let mut state = AppState::new(AppConfig::default());
        state.load_source(PathBuf::from("/no/such/dir/Base Plana 20-25.xlsx"));
        assert!(state.dataset.is_none());
        assert!(state.status_message.unwrap().contains("Base Plana 20-25.xlsx"));
    }
}
