//! The three golden-file checks and their outcomes.

use std::fmt;
use std::path::Path;

use odf_golden_odt::Document;

use crate::compare::{self, Mismatch};
use crate::error::HarnessError;

/// A comparison between the generated document and its golden file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    /// Same number of tables
    TableCount,
    /// Same rows per table and cells per row
    TableDimensions,
    /// Same text in every cell
    CellContent,
}

impl Check {
    /// Every check, in the order a suite runs them
    pub const ALL: [Check; 3] = [Check::TableCount, Check::TableDimensions, Check::CellContent];

    /// Name used in reports and skip reasons
    pub fn name(self) -> &'static str {
        match self {
            Check::TableCount => "test_table_elements_count",
            Check::TableDimensions => "test_table_dimensions",
            Check::CellContent => "test_table_cell_content",
        }
    }

    /// Run the check on two already loaded documents.
    pub fn compare(self, generated: &Document, expected: &Document) -> Result<(), Mismatch> {
        match self {
            Check::TableCount => compare::compare_table_count(generated, expected),
            Check::TableDimensions => compare::compare_table_dimensions(generated, expected),
            Check::CellContent => compare::compare_cell_content(generated, expected),
        }
    }

    /// Load both files and run the check.
    ///
    /// Each call reads both documents from disk again. A missing file skips
    /// the check instead of failing it.
    pub fn run_on_paths(self, generated: &Path, expected: &Path) -> CheckOutcome {
        if !generated.exists() {
            let reason = format!("Skipping {}: test file not found.", self.name());
            log::warn!("{reason}");
            return CheckOutcome::Skipped(reason);
        }
        if !expected.exists() {
            let reason = format!("Skipping {}: golden file not found.", self.name());
            log::warn!("{reason}");
            return CheckOutcome::Skipped(reason);
        }

        let load = |path: &Path| {
            Document::open(path).map_err(|source| HarnessError::Load {
                path: path.to_path_buf(),
                source,
            })
        };
        let (doc1, doc2) = match (load(generated), load(expected)) {
            (Ok(doc1), Ok(doc2)) => (doc1, doc2),
            (Err(e), _) | (_, Err(e)) => {
                log::error!("{}: {e}", self.name());
                return CheckOutcome::Errored(e);
            }
        };

        match self.compare(&doc1, &doc2) {
            Ok(()) => CheckOutcome::Passed,
            Err(mismatch) => {
                log::error!("{} failed: {mismatch}", self.name());
                CheckOutcome::Failed(mismatch)
            }
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of running one check.
#[derive(Debug)]
pub enum CheckOutcome {
    Passed,
    /// A required file was missing
    Skipped(String),
    /// The documents differ
    Failed(Mismatch),
    /// A document could not be loaded
    Errored(HarnessError),
}

impl CheckOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, CheckOutcome::Passed)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, CheckOutcome::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CheckOutcome::Failed(_))
    }

    pub fn is_errored(&self) -> bool {
        matches!(self, CheckOutcome::Errored(_))
    }

    /// The mismatch, if the check failed
    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            CheckOutcome::Failed(mismatch) => Some(mismatch),
            _ => None,
        }
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckOutcome::Passed => f.write_str("PASSED"),
            CheckOutcome::Skipped(reason) => write!(f, "SKIPPED ({reason})"),
            CheckOutcome::Failed(mismatch) => write!(f, "FAILED: {mismatch}"),
            CheckOutcome::Errored(error) => write!(f, "ERROR: {error}"),
        }
    }
}
