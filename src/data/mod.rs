/// Data layer: core types, loading, and export.
///
/// Architecture:
/// ```text
///   delimited text file
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ColumnTable (non-numeric columns dropped)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ ColumnTable  │  Vec<Column>, header order
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  visible columns → CSV, plot pixels → PNG
///   └──────────┘
/// ```

pub mod export;
pub mod loader;
pub mod model;
