//! Lexical module path resolution.
//!
//! Import requests are joined onto the importing file's directory (or the
//! source base for bare requests) and normalised without touching the file
//! system.

use log::trace;
use path_clean::clean;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_EXTENSION, JS_EXTENSIONS};

/// Normalises separators to `/` and collapses `.`, `..` and repeated slashes.
pub fn clean_path(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    let cleaned = PathBuf::from(clean(normalized.as_str()));
    cleaned.to_string_lossy().replace('\\', "/")
}

/// Resolves `request` as imported from `from_file`.
///
/// `.js` is appended unless the request already ends in a script extension
/// from [`JS_EXTENSIONS`].
pub fn resolve_request(base: &Path, from_file: &Path, request: &str) -> PathBuf {
    let joined = if request.starts_with("./") || request.starts_with("../") {
        from_file.parent().unwrap_or(base).join(request)
    } else if request.starts_with('/') {
        PathBuf::from(request)
    } else {
        base.join(request)
    };

    let has_known_extension = Path::new(request)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| JS_EXTENSIONS.contains(&ext));

    let mut candidate = joined.to_string_lossy().to_string();
    if !has_known_extension {
        candidate = format!("{candidate}.{DEFAULT_EXTENSION}");
    }

    let resolved = PathBuf::from(clean_path(&candidate));
    trace!("Resolved '{}' from {} to {}", request, from_file.display(), resolved.display());
    resolved
}
