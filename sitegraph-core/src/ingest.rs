use crate::config::SitegraphConfig;
use crate::error::Result;
use crate::graph::assemble_edges_with;
use crate::model::{GraphDataset, InputFormat};
use crate::normalize::normalize_csv;
use crate::validate::validate_pages;
use serde_json::Value;
use tracing::info;

/// Run the whole pipeline over one export.
///
/// CSV is first normalized into canonical page JSON; both formats then pass
/// the same validator before edges are assembled. Any failure aborts the run,
/// there is never a partial dataset.
pub fn build_dataset(
    content: &str,
    format: InputFormat,
    config: &SitegraphConfig,
) -> Result<GraphDataset> {
    let data: Value = match format {
        InputFormat::Csv => serde_json::to_value(normalize_csv(content, config)?)?,
        InputFormat::Json => serde_json::from_str(content)?,
    };

    let pages = validate_pages(&data)?;
    let edges = assemble_edges_with(&pages, config.display.edge_length_base);

    info!(
        "Built {} dataset: {} pages, {} edges",
        format.as_str(),
        pages.len(),
        edges.len()
    );

    Ok(GraphDataset {
        full_search_index: pages,
        edges,
    })
}
