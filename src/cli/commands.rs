// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `run`, `inspect` and
// `init-config`, and all their configurable flags.
//
// Flags given on the command line override the config file
// (or the built-in defaults when no file is given).

use clap::{Args, Subcommand, ValueEnum};

use crate::application::pipeline_use_case::PipelineConfig;
use crate::domain::format::Format;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train and evaluate the runs model for one or every format
    Run(RunArgs),

    /// Describe a dataset's columns without training
    Inspect(InspectArgs),

    /// Write the default pipeline config as JSON
    InitConfig(InitConfigArgs),
}

/// Format selection on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    T20,
    Odi,
    Test,
    All,
}

impl FormatArg {
    pub fn formats(self) -> Vec<Format> {
        match self {
            FormatArg::T20  => vec![Format::T20],
            FormatArg::Odi  => vec![Format::Odi],
            FormatArg::Test => vec![Format::Test],
            FormatArg::All  => Format::ALL.to_vec(),
        }
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Match format to model
    #[arg(long, value_enum, default_value_t = FormatArg::All)]
    pub format: FormatArg,

    /// Directory holding t20.csv, "ODI data.csv" and test.csv
    #[arg(long)]
    pub data_dir: Option<String>,

    /// JSON pipeline config (see `init-config`)
    #[arg(long)]
    pub config: Option<String>,

    /// Number of trees in the forest
    #[arg(long)]
    pub n_trees: Option<usize>,

    /// Maximum tree depth (unlimited when omitted)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Seed for both the split and the forest
    #[arg(long)]
    pub seed: Option<u64>,

    /// Share of rows held out for evaluation
    #[arg(long)]
    pub test_fraction: Option<f64>,

    /// Write JSON reports and residual CSVs here
    #[arg(long)]
    pub out: Option<String>,
}

impl RunArgs {
    /// Lay the flags that were given over `base`
    pub fn apply(&self, mut base: PipelineConfig) -> PipelineConfig {
        if let Some(dir) = &self.data_dir {
            base.data_dir = dir.clone();
        }
        if let Some(n) = self.n_trees {
            base.forest.n_trees = n;
        }
        if self.max_depth.is_some() {
            base.forest.max_depth = self.max_depth;
        }
        if let Some(seed) = self.seed {
            base.split_seed  = seed;
            base.forest.seed = seed;
        }
        if let Some(frac) = self.test_fraction {
            base.test_fraction = frac;
        }
        base
    }
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[arg(long, value_enum, default_value_t = FormatArg::All)]
    pub format: FormatArg,

    #[arg(long)]
    pub data_dir: Option<String>,

    #[arg(long)]
    pub config: Option<String>,
}

#[derive(Args, Debug)]
pub struct InitConfigArgs {
    /// Where to write the config file
    #[arg(long, default_value = "pipeline.json")]
    pub path: String,
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn parse(args: &[&str]) -> Commands {
        Cli::try_parse_from(std::iter::once("cricket-runs").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_run_defaults_to_all_formats() {
        let Commands::Run(args) = parse(&["run"]) else { panic!("expected run") };
        assert_eq!(args.format.formats(), Format::ALL.to_vec());
        assert_eq!(args.apply(PipelineConfig::default()), PipelineConfig::default());
    }

    #[test]
    fn test_run_flags_override_config() {
        let Commands::Run(args) = parse(&[
            "run", "--format", "odi", "--n-trees", "50", "--max-depth", "6",
            "--seed", "9", "--test-fraction", "0.25", "--data-dir", "csv",
        ]) else {
            panic!("expected run")
        };
        assert_eq!(args.format.formats(), vec![Format::Odi]);

        let cfg = args.apply(PipelineConfig::default());
        assert_eq!(cfg.forest.n_trees, 50);
        assert_eq!(cfg.forest.max_depth, Some(6));
        assert_eq!(cfg.split_seed, 9);
        assert_eq!(cfg.forest.seed, 9);
        assert_eq!(cfg.test_fraction, 0.25);
        assert_eq!(cfg.data_dir, "csv");
    }

    #[test]
    fn test_unknown_format_rejected() {
        let parsed = Cli::try_parse_from(["cricket-runs", "run", "--format", "hundred"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_init_config_path() {
        let Commands::InitConfig(args) = parse(&["init-config", "--path", "cfg/p.json"]) else {
            panic!("expected init-config")
        };
        assert_eq!(args.path, "cfg/p.json");
    }
}
