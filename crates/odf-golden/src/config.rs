//! Harness configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{HarnessError, HarnessResult};

/// Extension of generated and golden documents
pub const ODT_EXTENSION: &str = "odt";

/// Configuration for a golden-file run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Program that runs the generation script. Default: "python".
    pub interpreter: PathBuf,
    /// Generation script, passed as the interpreter's only argument.
    pub script: PathBuf,
    /// Working directory of the script. If None, the script's directory.
    pub working_dir: Option<PathBuf>,
    /// Where the script writes its document.
    pub generated: PathBuf,
    /// Committed reference document.
    pub expected: PathBuf,
    /// Environment variable pointing the script at its libraries. Default: "PYTHONPATH".
    pub search_path_var: String,
    /// Value of `search_path_var`. If None, the inherited environment is left alone.
    pub search_path: Option<PathBuf>,
    /// Delete the generated document on teardown. Default: true.
    pub cleanup: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            interpreter: PathBuf::from("python"),
            script: PathBuf::new(),
            working_dir: None,
            generated: PathBuf::new(),
            expected: PathBuf::new(),
            search_path_var: "PYTHONPATH".to_string(),
            search_path: None,
            cleanup: true,
        }
    }
}

impl HarnessConfig {
    /// Derive artifact paths from a script and a directory of golden files.
    ///
    /// The script `dir/example_tables.py` is expected to write
    /// `dir/example_tables.odt`, which is compared against
    /// `expected_dir/example_tables.odt`.
    pub fn for_script(script: impl Into<PathBuf>, expected_dir: impl AsRef<Path>) -> Self {
        let script = script.into();
        let file_name = script.with_extension(ODT_EXTENSION);
        let file_name = file_name.file_name().map(PathBuf::from).unwrap_or_default();

        Self {
            generated: script_dir(&script).join(&file_name),
            expected: expected_dir.as_ref().join(&file_name),
            script,
            ..Default::default()
        }
    }

    /// Read a JSON configuration file.
    ///
    /// Relative paths in the file are resolved against the file's directory.
    pub fn from_json_file(path: impl AsRef<Path>) -> HarnessResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self =
            serde_json::from_str(&text).map_err(|source| HarnessError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(config.resolve_relative_to(base))
    }

    /// Set the interpreter
    pub fn with_interpreter(mut self, interpreter: impl Into<PathBuf>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    /// Set the search-path variable and its value
    pub fn with_search_path(mut self, var: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.search_path_var = var.into();
        self.search_path = Some(path.into());
        self
    }

    /// Enable or disable teardown deletion
    pub fn with_cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Effective working directory of the script
    pub fn effective_working_dir(&self) -> PathBuf {
        self.working_dir
            .clone()
            .unwrap_or_else(|| script_dir(&self.script))
    }

    /// Check that the paths needed for a run are set.
    pub fn validate(&self) -> HarnessResult<()> {
        if self.script.as_os_str().is_empty() {
            return Err(HarnessError::Config("script is not set".into()));
        }
        if self.generated.as_os_str().is_empty() {
            return Err(HarnessError::Config("generated path is not set".into()));
        }
        if self.expected.as_os_str().is_empty() {
            return Err(HarnessError::Config("expected path is not set".into()));
        }
        if self.search_path_var.is_empty() {
            return Err(HarnessError::Config("search_path_var is empty".into()));
        }
        Ok(())
    }

    fn resolve_relative_to(mut self, base: &Path) -> Self {
        let resolve = |p: &mut PathBuf| {
            if !p.as_os_str().is_empty() && p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.script);
        resolve(&mut self.generated);
        resolve(&mut self.expected);
        if let Some(dir) = self.working_dir.as_mut() {
            resolve(dir);
        }
        if let Some(dir) = self.search_path.as_mut() {
            resolve(dir);
        }
        self
    }
}

fn script_dir(script: &Path) -> PathBuf {
    match script.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
