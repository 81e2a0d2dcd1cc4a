pub mod classify;
pub mod columns;
pub mod config;
pub mod error;
pub mod graph;
pub mod ingest;
pub mod model;
pub mod normalize;
pub mod report;
pub mod validate;
pub mod view;

pub use classify::{ClusterRule, CompiledRule, RuleSet};
pub use config::SitegraphConfig;
pub use error::{GraphError, Result};
pub use ingest::build_dataset;
pub use model::{Edge, GraphDataset, InputFormat, PageRecord, SeoMetadata};
pub use view::DisplayMode;
