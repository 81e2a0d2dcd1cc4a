// Tests for validation, edge assembly and the full build pipeline

use serde_json::json;
use sitegraph_core::config::SitegraphConfig;
use sitegraph_core::graph::{assemble_edges, assemble_edges_with, edge_label};
use sitegraph_core::validate::{dedupe_last_wins, page_from_value, validate_pages};
use sitegraph_core::{Edge, GraphError, InputFormat, PageRecord, build_dataset};

// ============================================================================
// Validator Tests
// ============================================================================

#[test]
fn test_validate_rejects_non_array() {
    let result = validate_pages(&json!({"url": "https://ex.com/"}));
    assert!(matches!(result, Err(GraphError::InvalidOrEmptyInput)));

    let result = validate_pages(&json!("pages"));
    assert!(matches!(result, Err(GraphError::InvalidOrEmptyInput)));
}

#[test]
fn test_validate_rejects_empty_array() {
    let result = validate_pages(&json!([]));
    assert!(matches!(result, Err(GraphError::InvalidOrEmptyInput)));
}

#[test]
fn test_validate_no_valid_pages() {
    let result = validate_pages(&json!([{"title": "x"}, {"url": ""}, {"url": 5}]));
    assert!(matches!(result, Err(GraphError::NoValidPages)));
}

#[test]
fn test_validate_skips_entries_without_url() {
    let data = json!([
        {"url": "https://ex.com/"},
        {"title": "no url"},
        null,
        {"url": "https://ex.com/a"}
    ]);
    let pages = validate_pages(&data).unwrap();
    let urls: Vec<&str> = pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls, ["https://ex.com/", "https://ex.com/a"]);
}

#[test]
fn test_validate_duplicate_url_last_wins() {
    let data = json!([
        {"url": "https://ex.com/a", "title": "First"},
        {"url": "https://ex.com/"},
        {"url": "https://ex.com/a", "title": "Second"}
    ]);
    let pages = validate_pages(&data).unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].url, "https://ex.com/a");
    assert_eq!(pages[0].title, "Second");
    assert_eq!(pages[1].url, "https://ex.com/");
}

#[test]
fn test_dedupe_keeps_unique_pages_in_order() {
    let pages = vec![
        PageRecord::new("https://ex.com/1"),
        PageRecord::new("https://ex.com/2"),
        PageRecord::new("https://ex.com/3"),
    ];
    let unique = dedupe_last_wins(pages.clone());
    assert_eq!(unique, pages);
}

#[test]
fn test_page_from_value_defaults() {
    let page = page_from_value(&json!({"url": "https://ex.com/a"})).unwrap();
    assert_eq!(page.title, "https://ex.com/a");
    assert_eq!(page.seo.crawl_depth, None);
    assert_eq!(page.seo.internal_link_equity, 0);
    assert!(!page.seo.is_no_index);
    assert!(!page.seo.is_orphan);
    assert!(page.outgoing_links().is_empty());
}

#[test]
fn test_page_from_value_reads_seo_fields() {
    let value = json!({
        "url": "https://ex.com/a",
        "title": "A",
        "seo": {
            "crawlDepth": 2,
            "isNoIndex": true,
            "internalLinkEquity": 9,
            "contentAnalysis": {
                "outgoingInternalLinks": ["https://ex.com/", 3, "https://ex.com/b"]
            }
        }
    });
    let page = page_from_value(&value).unwrap();

    assert_eq!(page.title, "A");
    assert_eq!(page.seo.crawl_depth, Some(2));
    assert!(page.seo.is_no_index);
    assert_eq!(page.seo.internal_link_equity, 9);
    assert_eq!(
        page.outgoing_links(),
        ["https://ex.com/".to_string(), "https://ex.com/b".to_string()]
    );
}

#[test]
fn test_page_from_value_rederives_orphan() {
    // Claimed orphan but has inbound links
    let page = page_from_value(&json!({
        "url": "https://ex.com/a",
        "seo": {"crawlDepth": 3, "internalLinkEquity": 4, "isOrphan": true}
    }))
    .unwrap();
    assert!(!page.seo.is_orphan);

    // Claimed linked but has none
    let page = page_from_value(&json!({
        "url": "https://ex.com/b",
        "seo": {"crawlDepth": 3, "internalLinkEquity": 0, "isOrphan": false}
    }))
    .unwrap();
    assert!(page.seo.is_orphan);
}

#[test]
fn test_page_from_value_wrong_types_fall_back() {
    let page = page_from_value(&json!({
        "url": "https://ex.com/a",
        "title": 12,
        "seo": {"crawlDepth": "deep", "internalLinkEquity": -1, "isNoIndex": "yes"}
    }))
    .unwrap();
    assert_eq!(page.title, "https://ex.com/a");
    assert_eq!(page.seo.crawl_depth, None);
    assert_eq!(page.seo.internal_link_equity, 0);
    assert!(!page.seo.is_no_index);
}

// ============================================================================
// Graph Assembler Tests
// ============================================================================

#[test]
fn test_assemble_single_link() {
    let pages = vec![
        PageRecord::new("https://ex.com/a").with_outgoing_links(["https://ex.com/"]),
        PageRecord::new("https://ex.com/"),
    ];
    let edges = assemble_edges(&pages);

    assert_eq!(edges.len(), 1);
    let edge = &edges[0];
    assert_eq!(edge.from, "https://ex.com/a");
    assert_eq!(edge.to, "https://ex.com/");
    assert_eq!(edge.count, 1);
    assert_eq!(edge.weight, 1);
    assert_eq!(edge.length, 350.0);
    assert_eq!(edge.label, "One-way link");
    assert!(!edge.is_reciprocal);
}

#[test]
fn test_assemble_folds_reciprocal_links() {
    let pages = vec![
        PageRecord::new("A").with_outgoing_links(["B"]),
        PageRecord::new("B").with_outgoing_links(["A"]),
    ];
    let edges = assemble_edges(&pages);

    assert_eq!(edges.len(), 1);
    let edge = &edges[0];
    assert_eq!(edge.from, "A");
    assert_eq!(edge.to, "B");
    assert_eq!(edge.count, 2);
    assert_eq!(edge.weight, 2);
    assert_eq!(edge.length, 175.0);
    assert_eq!(edge.label, "Reciprocal link (x2)");
    assert!(edge.is_reciprocal);
}

#[test]
fn test_assemble_keeps_first_seen_direction() {
    let pages = vec![
        PageRecord::new("Z").with_outgoing_links(["A"]),
        PageRecord::new("A").with_outgoing_links(["Z"]),
    ];
    let edges = assemble_edges(&pages);
    assert_eq!(edges[0].from, "Z");
    assert_eq!(edges[0].to, "A");
}

#[test]
fn test_assemble_counts_repeated_links() {
    let pages = vec![
        PageRecord::new("A").with_outgoing_links(["B", "B", "B"]),
        PageRecord::new("B"),
    ];
    let edges = assemble_edges(&pages);
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].count, 3);
    assert_eq!(edges[0].label, "Reciprocal link (x3)");
}

#[test]
fn test_assemble_drops_self_and_dangling_links() {
    let pages = vec![
        PageRecord::new("A").with_outgoing_links(["A", "missing", "B"]),
        PageRecord::new("B"),
    ];
    let edges = assemble_edges(&pages);

    assert_eq!(edges.len(), 1);
    assert_eq!(Edge::canonical_key(&edges[0].from, &edges[0].to), "A|B");
}

#[test]
fn test_assemble_one_edge_per_pair() {
    let pages = vec![
        PageRecord::new("A").with_outgoing_links(["B", "C"]),
        PageRecord::new("B").with_outgoing_links(["A", "C"]),
        PageRecord::new("C").with_outgoing_links(["A", "B"]),
    ];
    let edges = assemble_edges(&pages);

    assert_eq!(edges.len(), 3);
    let mut keys: Vec<String> = edges
        .iter()
        .map(|e| Edge::canonical_key(&e.from, &e.to))
        .collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), 3);
    assert!(edges.iter().all(|e| e.count == 2 && e.weight == e.count));
}

#[test]
fn test_assemble_empty_and_linkless() {
    assert!(assemble_edges(&[]).is_empty());
    assert!(assemble_edges(&[PageRecord::new("A")]).is_empty());
}

#[test]
fn test_assemble_custom_length_base() {
    let pages = vec![
        PageRecord::new("A").with_outgoing_links(["B"]),
        PageRecord::new("B").with_outgoing_links(["A"]),
    ];
    let edges = assemble_edges_with(&pages, 100.0);
    assert_eq!(edges[0].length, 50.0);
}

#[test]
fn test_canonical_key_is_symmetric() {
    assert_eq!(Edge::canonical_key("a", "b"), "a|b");
    assert_eq!(Edge::canonical_key("b", "a"), "a|b");
}

#[test]
fn test_edge_label() {
    assert_eq!(edge_label(1), "One-way link");
    assert_eq!(edge_label(4), "Reciprocal link (x4)");
}

// ============================================================================
// Build Pipeline Tests
// ============================================================================

const EXAMPLE_CSV: &str = "URL,Title 1,Content Type,Inlinks,Crawl Depth,Indexability\n\
https://ex.com/a,A,text/html,0,1,Indexable\n\
https://ex.com/,Home,text/html,1,0,Indexable";

#[test]
fn test_build_from_csv() {
    let dataset = build_dataset(EXAMPLE_CSV, InputFormat::Csv, &SitegraphConfig::default()).unwrap();

    assert_eq!(dataset.full_search_index.len(), 2);
    assert!(dataset.page("https://ex.com/a").unwrap().seo.is_orphan);
    assert_eq!(dataset.edges.len(), 1);
    assert_eq!(dataset.edges[0].from, "https://ex.com/a");
    assert_eq!(dataset.edges[0].to, "https://ex.com/");
    assert_eq!(dataset.edges[0].count, 1);
}

#[test]
fn test_build_from_json() {
    let content = r#"[
        {"url": "https://ex.com/", "title": "Home",
         "seo": {"crawlDepth": 0, "internalLinkEquity": 2,
                 "contentAnalysis": {"outgoingInternalLinks": ["https://ex.com/b"]}}},
        {"url": "https://ex.com/b", "title": "B",
         "seo": {"crawlDepth": 1, "internalLinkEquity": 1,
                 "contentAnalysis": {"outgoingInternalLinks": ["https://ex.com/"]}}}
    ]"#;
    let dataset = build_dataset(content, InputFormat::Json, &SitegraphConfig::default()).unwrap();

    assert_eq!(dataset.full_search_index.len(), 2);
    assert_eq!(dataset.edges.len(), 1);
    assert!(dataset.edges[0].is_reciprocal);
    assert_eq!(dataset.max_depth(), Some(1));
}

#[test]
fn test_build_malformed_json() {
    let result = build_dataset("{not json", InputFormat::Json, &SitegraphConfig::default());
    assert!(matches!(result, Err(GraphError::MalformedJson(_))));
}

#[test]
fn test_build_surfaces_csv_errors() {
    let config = SitegraphConfig::default();
    assert!(matches!(
        build_dataset("URL", InputFormat::Csv, &config),
        Err(GraphError::EmptyOrInvalidInput)
    ));
    assert!(matches!(
        build_dataset("Title\nHome", InputFormat::Csv, &config),
        Err(GraphError::MissingRequiredColumn)
    ));
}

#[test]
fn test_build_serializes_camel_case() {
    let dataset = build_dataset(EXAMPLE_CSV, InputFormat::Csv, &SitegraphConfig::default()).unwrap();
    let value = serde_json::to_value(&dataset).unwrap();

    assert!(value["fullSearchIndex"].is_array());
    let page = &value["fullSearchIndex"][0];
    assert_eq!(page["seo"]["crawlDepth"], 1);
    assert_eq!(page["seo"]["isOrphan"], true);
    assert_eq!(page["seo"]["internalLinkEquity"], 0);
    assert_eq!(
        page["seo"]["contentAnalysis"]["outgoingInternalLinks"][0],
        "https://ex.com/"
    );
    assert_eq!(value["edges"][0]["isReciprocal"], false);
}

#[test]
fn test_build_is_deterministic() {
    let config = SitegraphConfig::default();
    let first = build_dataset(EXAMPLE_CSV, InputFormat::Csv, &config).unwrap();
    let second = build_dataset(EXAMPLE_CSV, InputFormat::Csv, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_build_from_dataset_output_again() {
    // Output pages are valid input for the JSON path
    let config = SitegraphConfig::default();
    let first = build_dataset(EXAMPLE_CSV, InputFormat::Csv, &config).unwrap();
    let pages = serde_json::to_string(&first.full_search_index).unwrap();
    let second = build_dataset(&pages, InputFormat::Json, &config).unwrap();
    assert_eq!(first, second);
}
