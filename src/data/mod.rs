//! Data layer: loading, filtering, totals, formatting and export.
//!
//! Architecture:
//! ```text
//!  .xlsx / .csv / .parquet
//!        │
//!        ▼
//!   ┌───────────┐
//!   │  loader    │  parse file → columns, normalize headers (cache keeps it)
//!   └───────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │  filter    │  selections → filtered rows
//!   └───────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ financial  │  classify monetary columns, coerce to numbers
//!   └───────────┘
//!        │
//!        ├──────────────┐
//!        ▼              ▼
//!   ┌───────────┐  ┌───────────┐
//!   │ aggregate  │  │  format    │  totals / display strings
//!   └───────────┘  └───────────┘
//!        │              │
//!        └──────┬───────┘
//!               ▼
//!         ┌───────────┐
//!         │  export    │  xlsx / csv bytes
//!         └───────────┘
//! ```
//!
//! [`view::build_view`] runs the whole chain for one selection.

pub mod aggregate;
pub mod cache;
pub mod error;
pub mod export;
pub mod filter;
pub mod financial;
pub mod format;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod ordering;
pub mod view;
