/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → TopicTable (cached per path)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ TopicTable │  Vec<TopicRecord>, year index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐      ┌───────────┐
///   │  filter   │ ───▶ │ aggregate  │  topic/year totals, detail series
///   └──────────┘      └───────────┘
/// ```
pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
