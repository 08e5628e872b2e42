use dashmap::DashMap;
use depscan_core::ImportEdge;
use log::{debug, trace, warn};
use regex::Regex;
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use crate::{
    parser::imports_for,
    resolver::{clean_path, resolve_request},
    types::{BuildOrder, Cycle},
};

/// Computes the order in which `entry` and everything it imports must be built.
///
/// This performs a depth-first walk of the import graph and emits each file
/// after all of its dependencies (post-order), so the entry comes last and
/// every file appears once. An import that leads back to a file still on the
/// walk is recorded as a [`Cycle`] and not followed. Files whose path
/// relative to `base` matches `exclude` are left out together with anything
/// only they import.
///
/// # Arguments
/// * `base` - Directory bare import requests are resolved against
/// * `entry` - The file to start from
/// * `exclude` - Optional pattern of modules to leave out
/// * `import_cache` - Cache of scanned imports for each file, shared across entries
pub fn build_order(
    base: &Path,
    entry: &Path,
    exclude: Option<&Regex>,
    import_cache: &DashMap<PathBuf, Vec<ImportEdge>>,
) -> BuildOrder {
    let entry = PathBuf::from(clean_path(&entry.to_string_lossy()));
    let mut walk = Walk {
        base,
        exclude,
        import_cache,
        visiting: HashSet::new(),
        done: HashSet::new(),
        order: BuildOrder { entry: entry.clone(), ..Default::default() },
    };
    walk.visit(&entry);

    debug!(
        "Ordered {} files from {} ({} cycles, {} missing)",
        walk.order.files.len(),
        entry.display(),
        walk.order.cycles.len(),
        walk.order.missing.len()
    );
    walk.order
}

struct Walk<'a> {
    base: &'a Path,
    exclude: Option<&'a Regex>,
    import_cache: &'a DashMap<PathBuf, Vec<ImportEdge>>,
    visiting: HashSet<PathBuf>,
    done: HashSet<PathBuf>,
    order: BuildOrder,
}

impl Walk<'_> {
    fn visit(&mut self, file: &Path) {
        trace!("Visiting: {}", file.display());
        self.visiting.insert(file.to_path_buf());

        let edges = match imports_for(file, self.import_cache) {
            Ok(edges) => edges,
            Err(e) => {
                warn!("Skipping unreadable module {}: {:#}", file.display(), e);
                self.finish(file);
                self.order.missing.push(file.to_path_buf());
                return;
            }
        };

        for edge in edges {
            let dep = resolve_request(self.base, file, &edge.module_path);

            if self.done.contains(&dep) {
                trace!("Already ordered: {}", dep.display());
                continue;
            }
            if self.visiting.contains(&dep) {
                warn!("Import cycle: {} -> {}", file.display(), dep.display());
                self.order.cycles.push(Cycle { from: file.to_path_buf(), to: dep });
                continue;
            }
            if self.is_excluded(&dep) {
                trace!("Excluded: {}", dep.display());
                if !self.order.excluded.contains(&dep) {
                    self.order.excluded.push(dep);
                }
                continue;
            }

            self.visit(&dep);
        }

        self.finish(file);
        self.order.files.push(file.to_path_buf());
    }

    fn finish(&mut self, file: &Path) {
        self.visiting.remove(file);
        self.done.insert(file.to_path_buf());
    }

    fn is_excluded(&self, file: &Path) -> bool {
        let Some(exclude) = self.exclude else {
            return false;
        };
        let rel = file.strip_prefix(self.base).unwrap_or(file);
        exclude.is_match(&rel.to_string_lossy().replace('\\', "/"))
    }
}
