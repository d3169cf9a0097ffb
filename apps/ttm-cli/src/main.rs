mod error;

use clap::{Parser, Subcommand, ValueEnum};
use error::{AppError, AppResult};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use ttm_project::{build_model, build_transformer};
use ttm_sim::{CalibrationOptions, PaperInsulationType, calibrate_hot_spot_factor};
use ttm_spec::ThermalCharacteristics;

#[derive(Parser)]
#[command(name = "ttm-cli")]
#[command(about = "Transformer thermal model - top-oil and hot-spot simulation", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a scenario file and build its model
    Validate {
        /// Path to the scenario (YAML, or JSON with a .json extension)
        scenario: PathBuf,
    },
    /// Run the thermal model over the scenario profile
    Simulate {
        scenario: PathBuf,
        /// Output CSV file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the output profile as JSON instead of CSV
        #[arg(long)]
        json: bool,
    },
    /// Calibrate the hot-spot factor of the scenario transformer
    Calibrate {
        scenario: PathBuf,
        /// Hot-spot limit [°C]
        #[arg(long)]
        limit: f64,
        /// Constant ambient temperature [°C]
        #[arg(long)]
        ambient: f64,
        #[arg(long, default_value_t = 1.1)]
        min: f64,
        #[arg(long, default_value_t = 1.3)]
        max: f64,
    },
    /// Equivalent paper aging over the simulated profile
    Aging {
        scenario: PathBuf,
        #[arg(long, value_enum, default_value_t = Paper::Normal)]
        paper: Paper,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Paper {
    Normal,
    ThermallyUpgraded,
}

impl From<Paper> for PaperInsulationType {
    fn from(paper: Paper) -> Self {
        match paper {
            Paper::Normal => PaperInsulationType::Normal,
            Paper::ThermallyUpgraded => PaperInsulationType::ThermallyUpgraded,
        }
    }
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Validate { scenario } => cmd_validate(&scenario),
        Commands::Simulate {
            scenario,
            output,
            json,
        } => cmd_simulate(&scenario, output.as_deref(), json),
        Commands::Calibrate {
            scenario,
            limit,
            ambient,
            min,
            max,
        } => cmd_calibrate(
            &scenario,
            &CalibrationOptions {
                hot_spot_limit: limit,
                ambient_temp: ambient,
                hot_spot_factor_min: min,
                hot_spot_factor_max: max,
            },
        ),
        Commands::Aging { scenario, paper } => cmd_aging(&scenario, paper.into()),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn cmd_validate(path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", path.display());
    let scenario = ttm_project::load(path)?;
    let model = build_model(&scenario)?;
    println!("✓ Scenario is valid");
    println!("  Name: {}", scenario.name);
    println!(
        "  Transformer: {} {}",
        model.transformer().kind(),
        model.transformer().cooling()
    );
    println!("  Points: {}", model.profile().len());
    Ok(())
}

fn cmd_simulate(path: &Path, output: Option<&Path>, json: bool) -> AppResult<()> {
    let scenario = ttm_project::load(path)?;
    let model = build_model(&scenario)?;
    let profile = model.run()?;

    let mut buf = Vec::new();
    if json {
        serde_json::to_writer_pretty(&mut buf, &profile)?;
        buf.push(b'\n');
    } else {
        profile.write_csv(&mut buf)?;
    }

    if let Some(path) = output {
        std::fs::write(path, &buf).map_err(|source| AppError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;
        println!("✓ Exported {} points to {}", profile.len(), path.display());
        if let (Some(top_oil), Some(hot_spot)) = (profile.peak_top_oil(), profile.peak_hot_spot()) {
            println!("  Peak top-oil: {top_oil:.2} °C");
            println!("  Peak hot-spot: {hot_spot:.2} °C");
        }
    } else {
        io::stdout().write_all(&buf)?;
    }
    Ok(())
}

fn cmd_calibrate(path: &Path, options: &CalibrationOptions) -> AppResult<()> {
    let scenario = ttm_project::load(path)?;
    let transformer = build_transformer(&scenario.transformer)?;
    info!(scenario = %scenario.name, "calibrating hot-spot factor");
    let calibrated = calibrate_hot_spot_factor(&transformer, options)?;
    println!("✓ Calibrated hot-spot factor: {:.2}", calibrated.base().hot_spot_fac);
    println!(
        "  Limit {:.1} °C at {:.1} °C ambient, bounds [{}, {}]",
        options.hot_spot_limit,
        options.ambient_temp,
        options.hot_spot_factor_min,
        options.hot_spot_factor_max
    );
    Ok(())
}

fn cmd_aging(path: &Path, insulation: PaperInsulationType) -> AppResult<()> {
    let scenario = ttm_project::load(path)?;
    let profile = build_model(&scenario)?.run()?;
    let days = profile.days_aged(insulation)?;
    println!("✓ Equivalent aging: {days:.4} days ({insulation:?} paper)");
    Ok(())
}
