/// Data layer: core types, normalization, filtering, and projections.
///
/// Architecture:
/// ```text
///  report .json document
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  decoded JSON → flat Vec<MeasurementRecord>
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ RecordSet  │  flat records, report-id index
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │  filter    │  report/sample/bin selection → filtered subset
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  chart series, size ranking, table rows
///   └───────────┘
/// ```
pub mod aggregate;
pub mod filter;
pub mod model;
pub mod normalize;
