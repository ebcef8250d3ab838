use std::collections::{BTreeMap, BTreeSet};

use super::model::{Column, Table};
use super::ordering::OrdinalMapping;

/// Choice-list label meaning "no filter".
pub const ALL_SENTINEL: &str = "Todos";

// ---------------------------------------------------------------------------
// Filter keys and selections
// ---------------------------------------------------------------------------

/// The fixed set of categorical filters offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterKey {
    Periodo,
    Trimestre,
    Mes,
    TipoAcreedor,
    NombreAcreedor,
    Deudor,
    NPrestamos,
}

impl FilterKey {
    /// All keys in display order.
    pub const ALL: [FilterKey; 7] = [
        FilterKey::Periodo,
        FilterKey::Trimestre,
        FilterKey::Mes,
        FilterKey::TipoAcreedor,
        FilterKey::NombreAcreedor,
        FilterKey::Deudor,
        FilterKey::NPrestamos,
    ];

    /// Canonical column name the key filters on.
    pub fn column(self) -> &'static str {
        match self {
            FilterKey::Periodo => "PERIODO",
            FilterKey::Trimestre => "TRIMESTRE",
            FilterKey::Mes => "MES",
            FilterKey::TipoAcreedor => "TIPO DE ACREEDOR",
            FilterKey::NombreAcreedor => "NOMBRE DEL ACREEDOR",
            FilterKey::Deudor => "DEUDOR",
            FilterKey::NPrestamos => "N_PRESTAMOS",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterKey::Periodo => "Periodo",
            FilterKey::Trimestre => "Trimestre",
            FilterKey::Mes => "Mes",
            FilterKey::TipoAcreedor => "Tipo de Acreedor",
            FilterKey::NombreAcreedor => "Nombre del Acreedor",
            FilterKey::Deudor => "Deudor",
            FilterKey::NPrestamos => "No. Préstamos",
        }
    }
}

/// One filter's state: inactive, or pinned to a single value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Value(String),
}

impl Selection {
    /// Interpret a choice-list entry; the sentinel maps to [`Selection::All`].
    pub fn from_choice(choice: &str) -> Self {
        if choice == ALL_SENTINEL {
            Selection::All
        } else {
            Selection::Value(choice.to_string())
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Selection::All => None,
            Selection::Value(v) => Some(v),
        }
    }

    pub fn label(&self) -> &str {
        self.value().unwrap_or(ALL_SENTINEL)
    }
}

/// Per-key selection state. Keys not present are inactive.
pub type FilterState = BTreeMap<FilterKey, Selection>;

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return the rows of `table` that pass every active filter.
///
/// A filter is active when its selection holds a value and its column exists
/// in the table. Filters on absent columns are ignored so the same selection
/// works across datasets with different layouts. Values are compared as
/// trimmed strings. The input is never modified.
pub fn apply(table: &Table, selections: &FilterState) -> Table {
    let active: Vec<(&Column, &str)> = selections
        .iter()
        .filter_map(|(key, selection)| {
            let value = selection.value()?;
            match table.column(key.column()) {
                Some(column) => Some((column, value.trim())),
                None => {
                    log::debug!("Filter {} inert: column not in dataset", key.column());
                    None
                }
            }
        })
        .collect();

    if active.is_empty() {
        return table.clone();
    }

    let indices = filtered_indices(table.len(), &active);
    log::debug!("{} of {} rows pass {} filters", indices.len(), table.len(), active.len());
    table.select_rows(&indices)
}

fn filtered_indices(rows: usize, active: &[(&Column, &str)]) -> Vec<usize> {
    (0..rows)
        .filter(|&row| {
            active
                .iter()
                .all(|(column, wanted)| column.values[row].key() == *wanted)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Choice lists
// ---------------------------------------------------------------------------

/// Distinct trimmed values of a column, blanks dropped.
///
/// The month column follows calendar order and omits anything that is not a
/// month name; every other column sorts lexicographically. An absent column
/// yields an empty list.
pub fn distinct_values(table: &Table, column: &str) -> Vec<String> {
    let Some(col) = table.column(column) else {
        return Vec::new();
    };

    let unique: BTreeSet<String> = col
        .values
        .iter()
        .map(|v| v.key())
        .filter(|k| !k.is_empty())
        .collect();

    if column == FilterKey::Mes.column() {
        OrdinalMapping::spanish_months().sort_known(unique)
    } else {
        unique.into_iter().collect()
    }
}

/// Entries for a filter's choice list: the sentinel followed by the distinct
/// values. `None` when the dataset has no such column.
pub fn choices(table: &Table, key: FilterKey) -> Option<Vec<String>> {
    if !table.has_column(key.column()) {
        return None;
    }
    let mut entries = vec![ALL_SENTINEL.to_string()];
    entries.extend(distinct_values(table, key.column()));
    Some(entries)
}
