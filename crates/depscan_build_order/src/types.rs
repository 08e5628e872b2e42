use serde::Serialize;
use std::path::PathBuf;

/// An import that points back at a file still being visited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cycle {
    pub from: PathBuf,
    pub to: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildOrder {
    pub entry: PathBuf,
    /// Dependencies first; the entry itself comes last
    pub files: Vec<PathBuf>,
    pub cycles: Vec<Cycle>,
    /// Imported files that could not be read
    pub missing: Vec<PathBuf>,
    /// Imported files dropped by the exclude pattern
    pub excluded: Vec<PathBuf>,
}

impl BuildOrder {
    pub fn has_problems(&self) -> bool {
        !self.cycles.is_empty() || !self.missing.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub orders: Vec<BuildOrder>,
    pub files_analyzed: usize,
}

impl BuildReport {
    pub fn has_problems(&self) -> bool {
        self.orders.iter().any(BuildOrder::has_problems)
    }
}
