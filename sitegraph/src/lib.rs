pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    GlobalOptions, build_from_file, load_cluster_rules, load_config, load_input, resolve_format,
    run_engine,
};
