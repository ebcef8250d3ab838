use std::collections::HashMap;
use std::sync::OnceLock;

/// Canonical Spanish month names, January first.
pub const SPANISH_MONTHS: [&str; 12] = [
    "ENERO",
    "FEBRERO",
    "MARZO",
    "ABRIL",
    "MAYO",
    "JUNIO",
    "JULIO",
    "AGOSTO",
    "SEPTIEMBRE",
    "OCTUBRE",
    "NOVIEMBRE",
    "DICIEMBRE",
];

/// A closed set of names with a fixed display order.
///
/// Used for choice lists only; filtering still compares plain strings.
#[derive(Debug, Clone)]
pub struct OrdinalMapping {
    ordinals: HashMap<String, usize>,
}

impl OrdinalMapping {
    /// Ordinals follow iteration order, starting at 1.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ordinals = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| (name.into(), i + 1))
            .collect();
        OrdinalMapping { ordinals }
    }

    pub fn spanish_months() -> &'static OrdinalMapping {
        static MONTHS: OnceLock<OrdinalMapping> = OnceLock::new();
        MONTHS.get_or_init(|| OrdinalMapping::new(SPANISH_MONTHS))
    }

    pub fn ordinal(&self, name: &str) -> Option<usize> {
        self.ordinals.get(name).copied()
    }

    /// Sort by ordinal, dropping names outside the mapping.
    pub fn sort_known<I>(&self, values: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut known: Vec<(usize, String)> = values
            .into_iter()
            .filter_map(|v| self.ordinal(&v).map(|o| (o, v)))
            .collect();
        known.sort();
        known.into_iter().map(|(_, v)| v).collect()
    }
}
