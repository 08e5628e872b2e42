//! File extensions recognised when collecting and resolving modules.

/// Source files that may be scanned for imports
pub const JS_EXTENSIONS: &[&str] = &[
    "js",  // JavaScript
    "mjs", // JavaScript module
    "cjs", // JavaScript CommonJS
    "jsx", // JavaScript with JSX
    "ts",  // TypeScript
    "mts", // TypeScript module
    "cts", // TypeScript CommonJS
    "tsx", // TypeScript with JSX
];

/// Appended to import requests that carry no recognised extension
pub const DEFAULT_EXTENSION: &str = "js";
