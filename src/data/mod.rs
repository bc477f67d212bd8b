/// Data layer: core types, loading, filtering, metrics and ranking.
///
/// Architecture:
/// ```text
///  .json / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (trimmed column labels)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Player>, age bounds, nationalities
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  age range + nationality → FilteredView
///   └──────────┘
///        │
///        ├──────────────┬──────────────┐
///        ▼              ▼              ▼
///   ┌─────────┐    ┌────────┐    ┌─────────┐
///   │ summary  │    │  rank   │    │ export   │
///   └─────────┘    └────────┘    └─────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod rank;
pub mod summary;
