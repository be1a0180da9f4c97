// Deterministic layout estimation and page packing for the briefing viewport.

pub mod font_metrics;
pub mod paginator;
pub mod prober;

// Re-export the public API consumed by other modules (assembler, main).
pub use font_metrics::TextStyle;
pub use paginator::{paginate, PageContent, PageGeometry};
pub use prober::{HeightProber, TextMetricsProber};
