//! Configuration module for Kernel-Profiler
//!
//! Defaults target Kaggle as it rendered at the time of writing; an optional
//! TOML file can override any of them, most usefully the extraction schema
//! when the site's DOM changes.
//!
//! # Example
//!
//! ```no_run
//! use kernel_profiler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("profiler.toml")).unwrap();
//! println!("Report goes to: {}", config.output.report_path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CardErrorPolicy, Config, OutputConfig, ScraperConfig};

// Re-export parser functions
pub use parser::load_config;

// Re-export validation for use after CLI overrides
pub use validation::validate;
