//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use enkf_iter_domain::OutputFormat;
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// Aligned human-readable output
    Text,
    /// JSON output
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Text => OutputFormat::Text,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

/// Library implementation to bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendChoice {
    /// In-process reference implementation
    Memory,
    /// Linked libenkf (requires the `native` feature)
    Native,
}

/// CLI arguments for enkf-iter
#[derive(Parser, Debug)]
#[command(name = "enkf-iter")]
#[command(author, version, about = "Inspect and plan iterated-smoother analysis settings")]
#[command(long_about = r#"
enkf-iter builds an analysis iteration record (iteration count, case and
run path templates, rerun flags, alpha) from configuration and shows what
the iterated ensemble smoother will do with it.

Configuration is merged from (lowest to highest priority):
1. Built-in defaults
2. ~/.config/enkf-iter/config.toml          Global config
3. ./enkf-iter.toml                          Project-level config
4. --config <path>                           Explicit config file
5. ENKF_ITER_<SECTION>__<KEY>                Environment
6. --ert-config <path>                       ERT keyword file
7. --set KEY=VALUE                           Command-line overrides

Example:
  enkf-iter plan --ert-config model.ert
  enkf-iter --set num_iterations=6 --set case_fmt=case_%02d plan
  enkf-iter -o json show
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// ERT keyword file (ITER_COUNT, ITER_CASE, ...) applied over the TOML config
    #[arg(long, value_name = "PATH", global = true)]
    pub ert_config: Option<PathBuf>,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Library backend (overrides `backend.kind`)
    #[arg(long, value_enum, global = true)]
    pub backend: Option<BackendChoice>,

    /// Set a field after configuration is applied (can be specified multiple times)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value, global = true)]
    pub set: Vec<(String, String)>,

    /// Output format (overrides `output.format`)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputArg>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress warnings
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show every field of the record (default)
    Show,
    /// Print a single field
    Get {
        /// Field key, e.g. `num_iterations` or `case_fmt`
        key: String,
    },
    /// List the field keys
    Keys,
    /// List the case name and run path of each iteration
    Plan,
    /// Validate the configuration; exits non-zero on errors
    Check,
}

impl Cli {
    /// The subcommand to run, `show` when none was given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Show)
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}
