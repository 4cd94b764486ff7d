//! Suite runner: generate once, run every check, tear down.

use std::fmt;
use std::path::Path;

use crate::check::{Check, CheckOutcome};
use crate::config::HarnessConfig;
use crate::error::HarnessResult;
use crate::generation::GenerationStep;

/// Outcome of every check in a run, in execution order.
#[derive(Debug)]
pub struct SuiteReport {
    outcomes: Vec<(Check, CheckOutcome)>,
}

impl SuiteReport {
    pub fn outcomes(&self) -> &[(Check, CheckOutcome)] {
        &self.outcomes
    }

    /// Outcome of one check, if it ran
    pub fn outcome(&self, check: Check) -> Option<&CheckOutcome> {
        self.outcomes
            .iter()
            .find(|(c, _)| *c == check)
            .map(|(_, outcome)| outcome)
    }

    /// No check failed or errored. Skipped checks do not count against a run.
    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.errored() == 0
    }

    pub fn passed(&self) -> usize {
        self.count(CheckOutcome::is_passed)
    }

    pub fn failed(&self) -> usize {
        self.count(CheckOutcome::is_failed)
    }

    pub fn skipped(&self) -> usize {
        self.count(CheckOutcome::is_skipped)
    }

    pub fn errored(&self) -> usize {
        self.count(CheckOutcome::is_errored)
    }

    fn count(&self, pred: impl Fn(&CheckOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (check, outcome) in &self.outcomes {
            writeln!(f, "{check}: {outcome}")?;
        }
        write!(
            f,
            "{} passed, {} failed, {} skipped, {} errors",
            self.passed(),
            self.failed(),
            self.skipped(),
            self.errored()
        )
    }
}

/// Run every check on two existing files, without generating anything.
pub fn compare_documents(generated: &Path, expected: &Path) -> SuiteReport {
    SuiteReport {
        outcomes: Check::ALL
            .iter()
            .map(|&check| (check, check.run_on_paths(generated, expected)))
            .collect(),
    }
}

/// A golden-file test suite for one generation script.
pub struct GoldenSuite {
    config: HarnessConfig,
}

impl GoldenSuite {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    /// Generate the document, run all checks and tear down.
    ///
    /// Setup failures abort the run before any check. Once the document
    /// exists, it is released after the checks whatever their outcomes; a
    /// deletion error is returned in place of the report.
    pub fn run(&self) -> HarnessResult<SuiteReport> {
        self.config.validate()?;
        let artifact = GenerationStep::new(&self.config).run()?;

        let report = compare_documents(artifact.path(), &self.config.expected);
        log::info!(
            "{}: {} passed, {} failed, {} skipped, {} errors",
            self.config.script.display(),
            report.passed(),
            report.failed(),
            report.skipped(),
            report.errored()
        );

        artifact.teardown()?;
        Ok(report)
    }
}
