//! Generation step: runs the script that produces the document under test.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};

/// One-shot invocation of the external generation script.
pub struct GenerationStep<'a> {
    config: &'a HarnessConfig,
}

impl<'a> GenerationStep<'a> {
    pub fn new(config: &'a HarnessConfig) -> Self {
        Self { config }
    }

    /// The command this step will run
    pub fn command(&self) -> Command {
        // The script runs from its own directory, so a relative path would no
        // longer point at it.
        let script = self
            .config
            .script
            .canonicalize()
            .unwrap_or_else(|_| self.config.script.clone());

        let mut cmd = Command::new(&self.config.interpreter);
        cmd.arg(script)
            .current_dir(self.config.effective_working_dir());
        if let Some(search_path) = &self.config.search_path {
            cmd.env(&self.config.search_path_var, search_path);
        }
        cmd
    }

    /// Run the script to completion and check that it produced its document.
    ///
    /// Blocks until the script exits; there is no timeout. A non-zero exit
    /// status and a missing output file are distinct errors.
    pub fn run(&self) -> HarnessResult<GeneratedArtifact> {
        let mut cmd = self.command();
        log::info!("Running generation script: {:?}", cmd);

        let output = cmd.output().map_err(|source| HarnessError::Spawn {
            program: self.config.interpreter.display().to_string(),
            source,
        })?;

        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            log::error!(
                "Subprocess failed with return code: {:?}\nOutput: {}\nError: {}",
                output.status.code(),
                stdout,
                stderr
            );
            return Err(HarnessError::GenerationFailed {
                exit_code: output.status.code(),
                stdout,
                stderr,
            });
        }

        if !self.config.generated.exists() {
            return Err(HarnessError::MissingArtifact(self.config.generated.clone()));
        }

        log::debug!("Generated {}", self.config.generated.display());
        Ok(GeneratedArtifact {
            path: self.config.generated.clone(),
            cleanup: self.config.cleanup,
            released: false,
        })
    }
}

/// A generated document on disk.
///
/// Releasing the artifact deletes the file when cleanup is enabled and the
/// file still exists. Release happens once: through [`teardown`], which
/// reports deletion errors, or on drop, which only logs them.
///
/// [`teardown`]: GeneratedArtifact::teardown
#[derive(Debug)]
pub struct GeneratedArtifact {
    path: PathBuf,
    cleanup: bool,
    released: bool,
}

impl GeneratedArtifact {
    /// Path of the generated document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the generated file if it exists and cleanup is enabled.
    pub fn teardown(mut self) -> std::io::Result<()> {
        self.released = true;
        self.remove()
    }

    fn remove(&self) -> std::io::Result<()> {
        if self.cleanup && self.path.exists() {
            log::debug!("Removing {}", self.path.display());
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

impl Drop for GeneratedArtifact {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.remove() {
            log::warn!("Failed to remove {}: {e}", self.path.display());
        }
    }
}
