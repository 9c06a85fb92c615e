//! Command-line argument parsing for petrocost.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use petrocost_ai::OutputMode;

/// petrocost - estimate the final cost of an oil-operations project
#[derive(Parser, Debug)]
#[command(name = "petrocost")]
#[command(version)]
#[command(about = "Predict final project cost from planned cost and cost-code features", long_about = None)]
pub struct Args {
    /// Configuration directory (default.toml, <env>.toml)
    #[arg(short, long, global = true, default_value = "config")]
    pub config: PathBuf,

    /// Model artifact path (overrides configuration)
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,

    /// Verbosity: -v (info), -vv (debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a single prediction from flags and/or a form file
    Predict(PredictArgs),

    /// Fill in the form interactively; submit as many times as needed
    Form(OutputArgs),

    /// Print the feature columns in model order
    Schema,
}

/// Output options shared by `predict` and `form`.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct OutputArgs {
    /// How to read the model output: direct | overrun
    #[arg(long)]
    pub mode: Option<OutputMode>,

    /// Print the estimate as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct PredictArgs {
    /// Form file (TOML or JSON) keyed by column name
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// PROYECTO
    #[arg(long)]
    pub project: Option<String>,

    /// DEPARTAMENTO
    #[arg(long)]
    pub department: Option<String>,

    /// OBJETIVO_EVENTO
    #[arg(long)]
    pub objective: Option<String>,

    /// COSTO_TOTAL_PLANEADO (US)
    #[arg(long, allow_negative_numbers = true)]
    pub planned: Option<f64>,

    /// Cost code value, e.g. --code 1000=12.5 (repeatable)
    #[arg(long = "code", value_name = "CODE=VALUE", value_parser = parse_code_assignment)]
    pub codes: Vec<(String, f64)>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Parse `CODE=VALUE`.
pub fn parse_code_assignment(raw: &str) -> Result<(String, f64), String> {
    let (code, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected CODE=VALUE, got '{raw}'"))?;
    let code = code.trim();
    if code.is_empty() {
        return Err(format!("missing cost code in '{raw}'"));
    }
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("'{}' is not a number", value.trim()))?;
    Ok((code.to_string(), value))
}

impl Args {
    /// Log filter implied by `-v` flags, if any.
    pub fn verbosity_filter(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("info"),
            _ => Some("debug"),
        }
    }
}

impl Commands {
    pub fn output(&self) -> Option<&OutputArgs> {
        match self {
            Commands::Predict(p) => Some(&p.output),
            Commands::Form(o) => Some(o),
            Commands::Schema => None,
        }
    }
}
