/// Data layer: core types, loading, and cleaning.
///
/// Architecture:
/// ```text
///   imdb_movies.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table (untyped rows)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cleaner  │  dedupe, drop incomplete rows, coerce numbers → CleanTable
///   └──────────┘
///        │
///        ▼
///   store (SQLite) and in-memory reports
/// ```

pub mod cleaner;
pub mod loader;
pub mod model;
