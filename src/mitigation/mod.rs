//! MitigationPipeline: layered hit-point damage mitigation

pub mod applicator;
pub mod entries;
pub mod hardness;
pub mod immunity;
pub mod pipeline;
pub mod vulnerability;

pub use applicator::{apply_category, redistribute_remainder};
pub use entries::{collect_entries, parse_custom_entry, MitigationEntry};
pub use pipeline::{run_pipeline, PipelineConfig};
