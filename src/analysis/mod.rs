//! Intensity and texture metrics over normalized arrays.

mod edges;
mod metrics;
mod stats;

pub use edges::{detect_edges, edge_density, EdgeChannelMode, EdgeParams};
pub use metrics::{analyze_single_image, compute_metrics, MetricsRecord};
pub use stats::{intensity_stats, to_u8_samples, IntensityStats};
