//! Data layer: core types, loading, filtering, and the query engine.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → LaunchDataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────────┐
//!   │ LaunchDataset │  Vec<LaunchRecord>, derived sites + bounds
//!   └───────────────┘
//!        │            ┌─────────────┐
//!        ├──────◄─────│ FilterState │  site selection + payload range
//!        ▼            └─────────────┘
//!   ┌──────────┐
//!   │  query    │  outcome_distribution / payload_correlation
//!   └──────────┘
//! ```
//!
//! Everything here is framework-free and pure after the one-time load;
//! the chart builders and the egui layer sit on top.

pub mod filter;
pub mod loader;
pub mod model;
pub mod query;
