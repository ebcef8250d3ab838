//! Filterable, aggregatable view over public external debt spreadsheets,
//! with export of the filtered slice.
//!
//! The desktop front-end lives in the `deuda-viewer` binary; everything it
//! calls is here.

pub mod config;
pub mod data;
