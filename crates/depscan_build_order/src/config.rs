use anyhow::{Context, Result, anyhow};
use clap::Parser;
use depscan_core::DefaultOptions;
use log::{debug, info, trace};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Parser)]
#[command(name = "order")]
#[command(about = "Compute the build order of JavaScript modules from their imports")]
pub struct Config {
    /// Root directory of the project (defaults to git root)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// JSON options file; missing keys fall back to the defaults
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// Only use entry files whose path relative to the base contains this pattern
    #[arg(long)]
    pub entry_glob: Option<String>,

    /// Print the build orders as JSON
    #[arg(long)]
    pub json: bool,

    #[clap(skip)]
    pub build_options: DefaultOptions,
}

impl Config {
    /// Initialize the config by resolving the root directory and loading the options file
    pub fn initialize(&mut self) -> Result<()> {
        // Resolve root directory
        let root = if let Some(r) = self.root.take() {
            debug!("Using provided root directory: {:?}", r);
            r.canonicalize().unwrap_or(r)
        } else {
            debug!("No root provided, searching for git root");
            find_git_root()?
        };
        info!("Using root directory: {}", root.display());

        if let Some(path) = &self.options {
            let path = if path.is_relative() { root.join(path) } else { path.clone() };
            self.build_options = load_options(&path)?;
        } else {
            debug!("No options file given, using defaults");
        }

        self.root = Some(root);
        Ok(())
    }

    /// Get the root directory, returning an error if not initialized
    pub fn root(&self) -> Result<&PathBuf> {
        self.root
            .as_ref()
            .ok_or_else(|| anyhow!("Config not initialized - call initialize() first"))
    }

    /// Directory module paths are resolved against: `base` from the options,
    /// relative to the root, or the root itself.
    pub fn source_base(&self) -> Result<PathBuf> {
        let root = self.root()?;
        Ok(match &self.build_options.base {
            Some(base) => root.join(base),
            None => root.clone(),
        })
    }
}

pub fn find_git_root() -> Result<PathBuf> {
    debug!("Searching for git root");
    let mut current_dir = env::current_dir()?;
    trace!("Starting search from: {:?}", current_dir);

    loop {
        if current_dir.join(".git").exists() {
            debug!("Found git root at: {:?}", current_dir);
            return Ok(current_dir);
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => {
                debug!("Could not find .git directory in any parent folder");
                return Err(anyhow!("Could not find .git directory in any parent folder"));
            }
        }
    }
}

/// Reads build options from a JSON file, layering them over the defaults.
pub fn load_options(path: &Path) -> Result<DefaultOptions> {
    debug!("Loading options from {}", path.display());
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read options file {}", path.display()))?;
    let options: DefaultOptions = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse options file {}", path.display()))?;
    trace!("Loaded options: {:?}", options);
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    fn config_for(root: &Path) -> Config {
        Config {
            root: Some(root.to_path_buf()),
            options: None,
            entry_glob: None,
            json: false,
            build_options: DefaultOptions::default(),
        }
    }

    #[test]
    fn test_find_git_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join(".git")).unwrap();
        let subdir = root.join("js").join("parts");
        fs::create_dir_all(&subdir).unwrap();

        let original_dir = env::current_dir().unwrap();
        env::set_current_dir(&subdir).unwrap();

        let git_root = find_git_root().unwrap();
        // Normalize paths for comparison (canonicalize can add /private prefix on macOS)
        assert_eq!(git_root.canonicalize().unwrap(), root.canonicalize().unwrap());

        env::set_current_dir(original_dir).unwrap();
    }

    #[test]
    fn test_load_options_partial() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_test_file(
            temp_dir.path(),
            "build.json",
            r#"{ "base": "js", "files": ["highcharts.src.js"], "version": "11.0.0" }"#,
        );
        let options = load_options(&path).unwrap();
        assert_eq!(options.base.as_deref(), Some("js"));
        assert_eq!(options.files, Some(vec!["highcharts.src.js".to_string()]));
        assert_eq!(options.version, "11.0.0");
        assert_eq!(options.product, "Highcharts");
    }

    #[test]
    fn test_load_options_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_test_file(temp_dir.path(), "build.json", "{ base: ");
        let err = load_options(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse options file"));
    }

    #[test]
    fn test_load_options_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_options(&temp_dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn test_initialize_reads_relative_options() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "build.json", r#"{ "base": "js" }"#);

        let mut cfg = config_for(temp_dir.path());
        cfg.options = Some(PathBuf::from("build.json"));
        cfg.initialize().unwrap();

        let base = cfg.source_base().unwrap();
        assert!(base.ends_with("js"));
        assert_eq!(cfg.build_options.base.as_deref(), Some("js"));
    }

    #[test]
    fn test_root_before_initialize() {
        let cfg = Config { root: None, ..config_for(Path::new(".")) };
        assert!(cfg.root().is_err());
    }
}
