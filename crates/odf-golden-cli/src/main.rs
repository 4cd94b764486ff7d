//! odf-golden CLI - golden-file checks for generated ODT tables

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use odf_golden::{compare_documents, GoldenSuite, HarnessConfig, SuiteReport};
use odf_golden_odt::Document;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "odf-golden")]
#[command(
    author,
    version,
    about = "Compare generated OpenDocument tables against golden files"
)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a generation script and compare its output with the golden file
    Run(RunArgs),

    /// Compare two existing documents
    Compare {
        /// Generated document
        generated: PathBuf,

        /// Golden (expected) document
        expected: PathBuf,
    },

    /// Show the tables of a document
    Info {
        /// Input document
        input: PathBuf,

        /// Print the text of every cell
        #[arg(short, long)]
        cells: bool,
    },
}

#[derive(Args)]
struct RunArgs {
    /// JSON configuration file
    #[arg(short, long, conflicts_with_all = ["script", "expected_dir"])]
    config: Option<PathBuf>,

    /// Generation script
    script: Option<PathBuf>,

    /// Directory holding golden files
    #[arg(short, long)]
    expected_dir: Option<PathBuf>,

    /// Program that runs the script
    #[arg(short, long)]
    interpreter: Option<PathBuf>,

    /// Library directory exported to the script
    #[arg(long)]
    search_path: Option<PathBuf>,

    /// Environment variable carrying the library directory
    #[arg(long, default_value = "PYTHONPATH")]
    search_path_var: String,

    /// Keep the generated document after the run
    #[arg(short, long)]
    keep: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _ = {
        use log::LevelFilter::*;

        let level = if cli.verbose { Debug } else { Info };
        env_logger::builder()
            .filter_module("odf_golden", level)
            .filter_module("odf_golden_odt", level)
            .parse_default_env()
            .try_init()
    };

    let report = match cli.command {
        Commands::Run(args) => run(args)?,
        Commands::Compare {
            generated,
            expected,
        } => compare_documents(&generated, &expected),
        Commands::Info { input, cells } => return show_info(&input, cells),
    };

    println!("{report}");
    if !report.is_success() {
        bail!("Golden-file comparison failed");
    }
    Ok(())
}

fn run(args: RunArgs) -> Result<SuiteReport> {
    let mut config = match (args.config, args.script) {
        (Some(path), _) => HarnessConfig::from_json_file(&path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        (None, Some(script)) => {
            let expected_dir = args
                .expected_dir
                .context("--expected-dir is required when running a script")?;
            HarnessConfig::for_script(script, expected_dir)
        }
        (None, None) => bail!("Either a script or --config must be given"),
    };

    if let Some(interpreter) = args.interpreter {
        config = config.with_interpreter(interpreter);
    }
    if let Some(search_path) = args.search_path {
        config = config.with_search_path(args.search_path_var, search_path);
    }
    if args.keep {
        config = config.with_cleanup(false);
    }

    GoldenSuite::new(config)
        .run()
        .context("Golden-file suite could not run")
}

fn show_info(input: &Path, cells: bool) -> Result<()> {
    let doc =
        Document::open(input).with_context(|| format!("Failed to open '{}'", input.display()))?;

    println!("File: {}", input.display());
    if let Some(mimetype) = doc.mimetype() {
        println!("Mimetype: {mimetype}");
    }

    let shapes = doc.table_shapes();
    println!("Tables: {}", shapes.len());

    let tables = doc.tables();
    for (idx, (shape, table)) in shapes.iter().zip(tables).enumerate() {
        println!(
            "  {}. {} ({} rows x {} columns)",
            idx + 1,
            shape.name.as_deref().unwrap_or("<unnamed>"),
            shape.row_count(),
            shape.max_cells()
        );

        if cells {
            use odf_golden_odt::ElementKind;
            for (row_idx, row) in table
                .descendants_of_kind(ElementKind::TableRow)
                .into_iter()
                .enumerate()
            {
                let texts: Vec<String> = row
                    .descendants_of_kind(ElementKind::TableCell)
                    .into_iter()
                    .map(odf_golden_odt::cell_text)
                    .collect();
                println!("     row {}: {}", row_idx + 1, texts.join(" | "));
            }
        }
    }

    Ok(())
}
