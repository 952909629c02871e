//! `ridgefield` command-line tool.
//!
//! ```text
//! ridgefield detect --input t850.json --angle 5 --output ridges.json
//! ridgefield detect --config run.json -v
//! ridgefield crop --input t850.json --lat-min 30 --lat-max 70 --lon-min -40 --lon-max 30 --output box.json
//! ```

use clap::{ArgAction, Args, Parser, Subcommand};
use ridgefield::hessian::RidgeDetectConfig;
use ridgefield::{crop_grid_file, detect_grid_file};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "ridgefield", version, about = "Hessian ridge detection on lat/lon grids")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON log lines (only with the `tracing` feature).
    #[arg(long, global = true)]
    json_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Detect ridges in a JSON grid and write a JSON report.
    Detect(DetectArgs),
    /// Crop a JSON grid to an open latitude/longitude box.
    Crop(CropArgs),
}

#[derive(Args, Debug)]
struct DetectArgs {
    /// JSON run configuration; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input grid file.
    #[arg(long, required_unless_present = "config")]
    input: Option<PathBuf>,

    /// Gaussian smoothing width in grid steps.
    #[arg(long, conflicts_with = "no_smooth")]
    sigma: Option<f64>,

    /// Skip smoothing.
    #[arg(long)]
    no_smooth: bool,

    /// Difference scheme: first_order or second_order.
    #[arg(long)]
    scheme: Option<String>,

    /// Maximum eigenvector/gradient angle in degrees.
    #[arg(long)]
    angle: Option<f64>,

    /// Smoothing boundary mode: reflect, mirror, nearest, wrap or constant.
    #[arg(long)]
    boundary: Option<String>,

    /// Report path (default ridge_detect_report.json).
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CropArgs {
    #[arg(long)]
    input: PathBuf,
    #[arg(long, allow_hyphen_values = true)]
    lat_min: f64,
    #[arg(long, allow_hyphen_values = true)]
    lat_max: f64,
    #[arg(long, allow_hyphen_values = true)]
    lon_min: f64,
    #[arg(long, allow_hyphen_values = true)]
    lon_max: f64,
    #[arg(long)]
    output: PathBuf,
}

fn init_logging(verbose: u8, json: bool) {
    let level = ridgefield::core::level_from_verbosity(verbose);
    #[cfg(feature = "tracing")]
    {
        let _ = tracing_log::LogTracer::init();
        ridgefield::core::init_tracing(level, json);
    }
    #[cfg(not(feature = "tracing"))]
    {
        if json {
            eprintln!("--json-log needs the `tracing` feature; using plain logs");
        }
        let _ = ridgefield::core::init_with_level(level);
    }
}

fn detect_config(args: DetectArgs) -> Result<RidgeDetectConfig, Box<dyn Error>> {
    let mut cfg = match &args.config {
        Some(path) => RidgeDetectConfig::load_json(path)?,
        None => RidgeDetectConfig::default(),
    };
    if let Some(input) = args.input {
        cfg.input_path = input.to_string_lossy().into_owned();
    }
    if let Some(output) = args.output {
        cfg.output_path = Some(output.to_string_lossy().into_owned());
    }
    if args.no_smooth {
        cfg.no_smoothing = true;
    } else if args.sigma.is_some() {
        cfg.sigma = args.sigma;
        cfg.no_smoothing = false;
    }
    if args.scheme.is_some() {
        cfg.scheme = args.scheme;
    }
    if args.angle.is_some() {
        cfg.angle_deg = args.angle;
    }
    if args.boundary.is_some() {
        cfg.boundary = args.boundary;
    }
    Ok(cfg)
}

fn run(command: Commands) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Detect(args) => {
            let cfg = detect_config(args)?;
            let report = detect_grid_file(&cfg)?;
            if let Some(stats) = &report.stats {
                println!(
                    "ridge points: {} of {} valid ({} dropped)",
                    stats.ridge_points, stats.valid_points, stats.dropped_points
                );
            }
            println!("report: {}", cfg.output_path().display());
        }
        Commands::Crop(args) => {
            let cropped = crop_grid_file(
                &args.input,
                [args.lat_min, args.lat_max],
                [args.lon_min, args.lon_max],
                &args.output,
            )?;
            println!(
                "cropped to {}x{}: {}",
                cropped.rows(),
                cropped.cols(),
                args.output.display()
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.json_log);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
