//! Build order computation for JavaScript module trees.
//!
//! This crate reads entry files, scans their live `import` statements with
//! `depscan_core`, resolves each request lexically against the importing file
//! and walks the resulting graph so that every module is listed after the
//! modules it depends on. Import cycles, unreadable modules and excluded
//! modules are reported alongside the order.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use depscan_build_order::{Config, run_build_order};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut cfg = Config {
//!     root: Some(std::path::PathBuf::from("/path/to/project")),
//!     options: Some(std::path::PathBuf::from("build.json")),
//!     entry_glob: None,
//!     json: false,
//!     build_options: Default::default(),
//! };
//!
//! let report = run_build_order(&mut cfg)?;
//!
//! // Use buffered output for better performance
//! let mut stdout = BufWriter::new(std::io::stdout());
//! depscan_build_order::print_build_order(&mut stdout, &report, &cfg)?;
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```

mod checker;
mod collector;
mod config;
mod constants;
mod order;
mod parser;
mod reporter;
mod resolver;
mod types;

// Re-export public API
pub use checker::run_build_order;
pub use collector::{CollectorConfig, collect_entries};
pub use config::{Config, find_git_root, load_options};
pub use constants::{DEFAULT_EXTENSION, JS_EXTENSIONS};
pub use order::build_order;
pub use parser::imports_for;
pub use reporter::{print_build_order, print_imports, print_json};
pub use resolver::{clean_path, resolve_request};
pub use types::{BuildOrder, BuildReport, Cycle};
