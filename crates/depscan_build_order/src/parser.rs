use anyhow::{Context, Result};
use dashmap::DashMap;
use depscan_core::{ImportEdge, get_file_imports};
use log::{debug, trace};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Reads `file` and returns its live import edges, memoised in `cache`.
pub fn imports_for(
    file: &Path,
    cache: &DashMap<PathBuf, Vec<ImportEdge>>,
) -> Result<Vec<ImportEdge>> {
    let file_buf = file.to_path_buf();
    if let Some(v) = cache.get(&file_buf) {
        trace!("Cache hit for imports: {}", file.display());
        return Ok(v.clone());
    }
    trace!("Scanning file for imports: {}", file.display());
    let src =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;

    let edges = get_file_imports(src.as_str());

    debug!("Found {} imports in {}", edges.len(), file.display());
    cache.insert(file_buf, edges.clone());
    Ok(edges)
}
