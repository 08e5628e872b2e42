//! Comment-aware import scanning for ECMAScript-like sources.
//!
//! This crate extracts the static `import` declarations of a source file
//! without building an AST, including:
//! - Classifying offsets as line comment, block comment, or live code
//! - Stripping comments one at a time or all at once
//! - Recognising import statements and splitting them into path and binding
//! - Scanning a whole file into an ordered list of dependency edges
//!
//! Every function is pure and total: inputs outside the documented domain
//! produce `false`, an empty string, or an empty list rather than an error.
//!
//! # Examples
//!
//! ```
//! use depscan_core::{ImportEdge, get_file_imports};
//!
//! let source = "
//! import chart from './chart.js'
//! // import legacy from './legacy.js'
//! import './polyfills.js'
//! ";
//!
//! assert_eq!(
//!     get_file_imports(source),
//!     vec![
//!         ImportEdge::new("./chart.js", Some("chart".to_string())),
//!         ImportEdge::new("./polyfills.js", None),
//!     ]
//! );
//! ```

mod comments;
mod options;
mod scanner;
mod statement;
mod types;

// Re-export public API
pub use comments::{
    CommentMap, is_inside_block_comment, is_inside_line_comment, remove_first_block_comment,
    remove_first_line_comment, strip_comments,
};
pub use options::{BuildType, DefaultOptions, FileOptions};
pub use scanner::get_file_imports;
pub use statement::{get_import_info, is_import_statement, regex_get_capture};
pub use types::{CommentKind, CommentSpan, ImportEdge, Region};
