//! # odf-golden
//!
//! Golden-file testing for documents with tables.
//!
//! A run has three phases:
//! 1. **Generate** - run an external script that writes an `.odt` file
//!    ([`GenerationStep`]).
//! 2. **Compare** - load the generated file and the committed golden file and
//!    check, at increasing granularity, that they agree ([`Check`]): the number
//!    of tables, the rows and cells of each table, then the text of each cell.
//! 3. **Teardown** - delete the generated file ([`GeneratedArtifact`]).
//!
//! ## Example
//!
//! ```rust,no_run
//! use odf_golden::{GoldenSuite, HarnessConfig};
//!
//! let config = HarnessConfig::for_script(
//!     "src/examples/odt/example_tables.py",
//!     "tests/expected_outputs",
//! )
//! .with_search_path("PYTHONPATH", "src");
//!
//! let report = GoldenSuite::new(config).run().unwrap();
//! println!("{report}");
//! assert!(report.is_success());
//! ```

pub mod check;
pub mod compare;
pub mod config;
pub mod error;
pub mod generation;
pub mod suite;

pub use check::{Check, CheckOutcome};
pub use compare::{compare_cell_content, compare_table_count, compare_table_dimensions, Mismatch};
pub use config::HarnessConfig;
pub use error::{HarnessError, HarnessResult};
pub use generation::{GeneratedArtifact, GenerationStep};
pub use suite::{compare_documents, GoldenSuite, SuiteReport};
