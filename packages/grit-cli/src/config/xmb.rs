use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Output written to stdout instead of a file
pub const STDOUT_OUTPUT: &str = "-";

/// Batch configuration for `grit-xmb --config`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct XmbConfig {
    pub input: PathBuf,
    /// Defaults to the input document's directory
    pub base_dir: Option<PathBuf>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub handler: Option<String>,
    /// Run the file gatherer over structures before exporting
    #[serde(default)]
    pub gather: bool,
    pub jobs: Vec<XmbJob>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct XmbJob {
    pub output: String,
    pub limit: Option<PathBuf>,
    #[serde(default)]
    pub limit_is_grd: bool,
}

impl XmbJob {
    pub fn writes_to_stdout(&self) -> bool {
        self.output == STDOUT_OUTPUT
    }
}

impl XmbConfig {
    /// Loads a config file; relative paths inside it are taken from the file's directory
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: XmbConfig = serde_json::from_str(&content)?;
        let root = path.parent().unwrap_or(Path::new("."));
        Ok(config.relative_to(root))
    }

    fn relative_to(mut self, root: &Path) -> Self {
        self.input = root.join(&self.input);
        self.base_dir = self.base_dir.map(|dir| root.join(dir));
        for job in &mut self.jobs {
            if !job.writes_to_stdout() {
                job.output = root.join(&job.output).to_string_lossy().into_owned();
            }
            job.limit = job.limit.take().map(|limit| root.join(limit));
        }
        self
    }

    pub fn base_dir(&self) -> PathBuf {
        match &self.base_dir {
            Some(dir) => dir.clone(),
            None => self
                .input
                .parent()
                .unwrap_or(Path::new("."))
                .to_path_buf(),
        }
    }
}
