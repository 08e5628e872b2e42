use anyhow::Result;
use ignore::WalkBuilder;
use log::{debug, trace};
use std::path::PathBuf;

use crate::constants::JS_EXTENSIONS;
use crate::resolver::clean_path;

pub struct CollectorConfig {
    pub base: PathBuf,
    /// Explicit entries relative to `base`; walk the tree when `None`
    pub files: Option<Vec<String>>,
    pub entry_glob: Option<String>,
}

pub fn collect_entries(cfg: &CollectorConfig) -> Result<Vec<PathBuf>> {
    debug!("Collecting entry files");
    let base = &cfg.base;

    if let Some(listed) = &cfg.files {
        debug!("Using {} entries listed in options", listed.len());
        let files = listed
            .iter()
            .map(|f| PathBuf::from(clean_path(&base.join(f).to_string_lossy())))
            .filter(|p| matches_glob(cfg, p))
            .collect::<Vec<_>>();
        debug!("Collected {} entry files", files.len());
        return Ok(files);
    }

    debug!("Walking directory tree from base: {}", base.display());
    let walker = WalkBuilder::new(base).hidden(false).ignore(true).git_ignore(true).build();

    let mut files: Vec<PathBuf> = Vec::new();
    for res in walker {
        let dent = res?;
        let p = dent.path();
        if !p.is_file() {
            continue;
        }

        // Skip test files (*.test.*, *.spec.*)
        let path_str = p.to_string_lossy();
        if path_str.contains(".test.") || path_str.contains(".spec.") {
            trace!("Skipping test file: {}", path_str);
            continue;
        }

        if let Some(ext) = p.extension().and_then(|e| e.to_str())
            && JS_EXTENSIONS.contains(&ext)
            && matches_glob(cfg, p)
        {
            trace!("Found entry file: {}", p.display());
            files.push(p.to_path_buf());
        }
    }

    files.sort();
    debug!("Collected {} entry files", files.len());
    Ok(files)
}

fn matches_glob(cfg: &CollectorConfig, p: &std::path::Path) -> bool {
    let Some(gl) = &cfg.entry_glob else {
        return true;
    };
    match p.strip_prefix(&cfg.base) {
        Ok(rel) => {
            let matched = rel.to_string_lossy().contains(gl.as_str());
            if matched {
                trace!("Matched entry file with glob '{}': {}", gl, rel.display());
            }
            matched
        }
        Err(_) => false,
    }
}
