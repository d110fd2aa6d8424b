// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All pipeline work is delegated to Layer 2 (application).
//
// Three commands are supported:
//   1. `run`         — train + evaluate, print metrics tables
//   2. `inspect`     — describe a dataset's columns
//   3. `init-config` — write the default config as JSON
//
// A failing format is reported and the next one still runs.

pub mod commands;

pub mod render;

use anyhow::{bail, Result};
use clap::Parser;
use commands::{Commands, InitConfigArgs, InspectArgs, RunArgs};

use crate::application::{
    inspect_use_case::InspectUseCase,
    pipeline_use_case::{PipelineConfig, PipelineUseCase},
};
use crate::domain::errors::PipelineError;
use crate::infra::{config_store::ConfigStore, report::ReportWriter};

#[derive(Parser, Debug)]
#[command(
    name = "cricket-runs",
    version = "0.1.0",
    about = "Predict a batter's career runs from T20, ODI and Test statistics with a random forest."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Run(args)        => run_pipeline(args),
            Commands::Inspect(args)    => run_inspect(args),
            Commands::InitConfig(args) => run_init_config(args),
        }
    }
}

/// Config file when given, defaults otherwise
fn base_config(path: Option<&str>) -> Result<PipelineConfig> {
    match path {
        Some(p) => ConfigStore::new(p).load(),
        None    => Ok(PipelineConfig::default()),
    }
}

fn run_pipeline(args: RunArgs) -> Result<()> {
    let config  = args.apply(base_config(args.config.as_deref())?);
    let writer  = args.out.as_deref().map(ReportWriter::new).transpose()?;
    let formats = args.format.formats();

    let use_case = PipelineUseCase::new(config);
    tracing::info!("Reading datasets from: {}", use_case.config().data_dir);

    let mut failed = 0usize;
    for format in &formats {
        match use_case.execute(*format) {
            Ok(report) => {
                println!("{}", render::report(&report));
                if let Some(w) = &writer {
                    let paths = w.write(&report)?;
                    println!("Saved {} and {}\n", paths.report.display(), paths.residuals.display());
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("{format}: {}\n", user_message(&e));
            }
        }
    }

    if failed == formats.len() {
        bail!("no format could be modelled");
    }
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let mut config = base_config(args.config.as_deref())?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    let use_case = InspectUseCase::new(&config);

    for format in args.format.formats() {
        match use_case.overview(format) {
            Ok(overview) => println!("{}", render::overview(&overview)),
            Err(e)       => eprintln!("{format}: {}\n", user_message(&e)),
        }
    }
    Ok(())
}

fn run_init_config(args: InitConfigArgs) -> Result<()> {
    let store = ConfigStore::new(&args.path);
    store.save(&PipelineConfig::default())?;
    println!("Wrote default config to {}", store.path().display());
    Ok(())
}

/// Error text plus a hint on what to change
pub fn user_message(err: &PipelineError) -> String {
    let hint = match err {
        PipelineError::DataLoad { .. } => "check --data-dir and the dataset file name",
        PipelineError::SchemaMismatch { .. } => "the dataset needs a Runs column and at least one of Mat, Inns, NO, BF, SR",
        PipelineError::InsufficientData(_) => "the dataset has too few usable rows",
        PipelineError::DegenerateMetric { .. } => "add rows or raise --test-fraction so evaluation rows exceed features + 1",
        PipelineError::InvalidConfig(_) => "fix the config file or command line flags",
    };
    format!("{err} ({hint})")
}
