use anyhow::{Context, Result, anyhow};
use dashmap::DashMap;
use depscan_core::ImportEdge;
use log::{debug, info, trace, warn};
use rayon::prelude::*;
use regex::Regex;
use std::{path::PathBuf, sync::Arc, thread};

use crate::{
    collector::{CollectorConfig, collect_entries},
    config::Config,
    order::build_order,
    types::{BuildOrder, BuildReport},
};

/// Initializes `cfg` in place and computes the build order of every entry.
///
/// The caller keeps the initialized config for reporting.
pub fn run_build_order(cfg: &mut Config) -> Result<BuildReport> {
    info!("Starting build order computation");

    // Initialize config (resolve root, load options file)
    cfg.initialize()?;
    let base = cfg.source_base()?;
    info!("Resolving modules against {}", base.display());

    debug!("Collecting entry files with glob: {:?}", cfg.entry_glob);
    let collector_cfg = CollectorConfig {
        base: base.clone(),
        files: cfg.build_options.files.clone(),
        entry_glob: cfg.entry_glob.clone(),
    };

    let entries = collect_entries(&collector_cfg)?;
    if entries.is_empty() {
        warn!("No entry files found under {}", base.display());
        return Err(anyhow!("No entry files found under {}", base.display()));
    }
    info!("Found {} entry files", entries.len());

    // Thread-safe cache using DashMap
    let import_cache: Arc<DashMap<PathBuf, Vec<ImportEdge>>> = Arc::new(DashMap::new());

    let build_options = &cfg.build_options;

    info!("Processing {} entry files in parallel", entries.len());

    let orders: Vec<BuildOrder> = entries
        .par_iter()
        .map(|entry| -> Result<BuildOrder> {
            let thread_id = thread::current().id();
            debug!("Thread {:?} processing: {}", thread_id, entry.display());

            let import_cache = Arc::clone(&import_cache);

            let rel_entry =
                entry.strip_prefix(&base).unwrap_or(entry).to_string_lossy().replace('\\', "/");
            let options = build_options.options_for(&rel_entry);
            let exclude = options
                .exclude
                .as_deref()
                .map(Regex::new)
                .transpose()
                .with_context(|| format!("Invalid exclude pattern for {rel_entry}"))?;

            trace!("Computing build order for entry: {}", entry.display());
            Ok(build_order(&base, entry, exclude.as_ref(), &import_cache))
        })
        .collect::<Result<Vec<_>>>()?;

    let problems = orders.iter().filter(|o| o.has_problems()).count();
    info!("Build order complete for {} entries ({} with problems)", orders.len(), problems);
    debug!("Cache statistics: imports={}", import_cache.len());

    Ok(BuildReport { orders, files_analyzed: import_cache.len() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use depscan_core::DefaultOptions;
    use std::{fs, path::Path};
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    fn config_for(root: &Path, options: Option<&str>) -> Config {
        Config {
            root: Some(root.to_path_buf()),
            options: options.map(PathBuf::from),
            entry_glob: None,
            json: false,
            build_options: DefaultOptions::default(),
        }
    }

    #[test]
    fn test_listed_entries_with_file_options() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(
            root,
            "build.json",
            r#"{
                "base": "js",
                "files": ["highcharts.src.js", "modules/map.src.js"],
                "fileOptions": { "modules/map.src.js": { "exclude": "^parts/Globals" } }
            }"#,
        );
        create_test_file(root, "js/highcharts.src.js", "import H from './parts/Globals.js'");
        create_test_file(root, "js/modules/map.src.js", "import H from '../parts/Globals.js'");
        create_test_file(root, "js/parts/Globals.js", "");

        let report = run_build_order(&mut config_for(root, Some("build.json"))).unwrap();
        assert_eq!(report.orders.len(), 2);

        let highcharts = &report.orders[0];
        assert_eq!(highcharts.files.len(), 2);
        assert!(highcharts.files[0].ends_with("parts/Globals.js"));

        let map = &report.orders[1];
        assert_eq!(map.files.len(), 1);
        assert_eq!(map.excluded.len(), 1);
        assert!(!report.has_problems());
        assert_eq!(report.files_analyzed, 3);
    }

    #[test]
    fn test_caller_keeps_initialized_config() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "build.json", r#"{ "product": "Highmaps", "pretty": false }"#);
        create_test_file(root, "a.js", "");

        let mut cfg = config_for(root, Some("build.json"));
        run_build_order(&mut cfg).unwrap();
        assert_eq!(cfg.build_options.product, "Highmaps");
        assert!(!cfg.build_options.pretty);
        assert!(cfg.root().is_ok());
    }

    #[test]
    fn test_no_entries_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = run_build_order(&mut config_for(temp_dir.path(), None)).unwrap_err();
        assert!(err.to_string().contains("No entry files found"));
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "build.json", r#"{ "exclude": "(" }"#);
        create_test_file(root, "a.js", "");

        let err = run_build_order(&mut config_for(root, Some("build.json"))).unwrap_err();
        assert!(err.to_string().contains("Invalid exclude pattern"));
    }
}
