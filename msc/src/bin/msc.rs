//! Command line access to MSC files

use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use log::{info, warn};
use msc::{
    read_matrix, read_msc_header_with, MatrixRequest, MscFileReader, MscHeader, MscWriter,
    PointRecord, ReaderConfig, ScaleSet, ScaleTolerance, Transform,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

type CliResult<T> = std::result::Result<T, Box<dyn Error>>;

#[derive(Parser)]
#[command(
    name = "msc",
    version,
    about = "Inspect, validate and generate MSC multi-scale descriptor files"
)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON reader configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the header of an MSC file
    Header {
        file: PathBuf,
    },
    /// Print points as JSON
    Points {
        file: PathBuf,

        /// First point index
        #[arg(long, default_value_t = 0)]
        start: usize,

        /// Maximum number of points (default: all remaining)
        #[arg(long)]
        count: Option<usize>,

        /// Project descriptors onto the triangle plane
        #[arg(long)]
        planar: bool,
    },
    /// Print a descriptor matrix as JSON
    Matrix {
        file: PathBuf,

        /// First point index
        #[arg(long, default_value_t = 0)]
        start: usize,

        /// Maximum number of points (default: all remaining)
        #[arg(long)]
        count: Option<usize>,

        /// Scale indices to keep, comma separated (default: all)
        #[arg(long, value_delimiter = ',')]
        scales: Option<Vec<usize>>,

        /// Project descriptors onto the triangle plane
        #[arg(long)]
        planar: bool,
    },
    /// Check that files share the same scales
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Absolute tolerance for scale comparison (default: exact)
        #[arg(long)]
        tolerance: Option<f32>,
    },
    /// Write a synthetic MSC file
    Generate {
        file: PathBuf,

        /// Number of points
        #[arg(long, default_value_t = 1000)]
        points: usize,

        /// Scales, comma separated
        #[arg(long, value_delimiter = ',', default_values_t = [0.1, 0.25, 0.5, 1.0])]
        scales: Vec<f32>,

        /// Parameters per point
        #[arg(long, default_value_t = 3)]
        params: usize,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Serialize)]
struct HeaderReport<'a> {
    file: &'a Path,
    header: &'a MscHeader,
    file_len: u64,
    expected_len: u64,
    complete: bool,
}

#[derive(Serialize)]
struct CheckReport {
    file: PathBuf,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<ExitCode> {
    let config = match &cli.config {
        Some(path) => ReaderConfig::from_json_file(path)?,
        None => ReaderConfig::default(),
    };

    match cli.command {
        Commands::Header { file } => show_header(&file, &config)?,
        Commands::Points {
            file,
            start,
            count,
            planar,
        } => {
            let points = read_points(&file, &config, start, count, Transform::from(planar))?;
            print_json(&points)?
        }
        Commands::Matrix {
            file,
            start,
            count,
            scales,
            planar,
        } => {
            let request = MatrixRequest {
                count,
                start: Some(start),
                scales,
                transform: Transform::from(planar),
            };
            show_matrix(&file, &config, &request)?
        }
        Commands::Check { files, tolerance } => {
            let config = match tolerance {
                Some(eps) => config.with_scale_tolerance(ScaleTolerance::Absolute(eps)),
                None => config,
            };
            let reports = check_files(&files, config);
            print_json(&reports)?;
            return Ok(if all_passed(&reports) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            });
        }
        Commands::Generate {
            file,
            points,
            scales,
            params,
            seed,
        } => generate(&file, points, scales, params, seed)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

fn show_header(file: &Path, config: &ReaderConfig) -> CliResult<()> {
    let header = read_msc_header_with(file, config)?;
    let file_len = std::fs::metadata(file)?.len();
    let expected_len = header.expected_file_len()?;
    if file_len < expected_len {
        warn!(
            "{} is {} bytes short of its declared {} points",
            file.display(),
            expected_len - file_len,
            header.point_count()
        );
    }
    print_json(&HeaderReport {
        file,
        header: &header,
        file_len,
        expected_len,
        complete: file_len >= expected_len,
    })
}

/// Points wanted from `start`, capped at what the file holds after it
fn clamp_count(point_count: usize, start: usize, count: Option<usize>) -> usize {
    let available = point_count.saturating_sub(start);
    count.map_or(available, |n| n.min(available))
}

fn read_points(
    file: &Path,
    config: &ReaderConfig,
    start: usize,
    count: Option<usize>,
    transform: Transform,
) -> CliResult<Vec<PointRecord>> {
    let mut reader = MscFileReader::open_with(file, config)?;
    let count = clamp_count(reader.header().point_count(), start, count);
    Ok(reader.read_points(count, Some(start), transform)?)
}

fn show_matrix(file: &Path, config: &ReaderConfig, request: &MatrixRequest) -> CliResult<()> {
    let mut reader = MscFileReader::open_with(file, config)?;
    let matrix = read_matrix(&mut reader, request)?;
    print_json(&matrix)
}

fn check_files(files: &[PathBuf], config: ReaderConfig) -> Vec<CheckReport> {
    let mut set = ScaleSet::new(config);
    files
        .iter()
        .map(|file| match set.open(file) {
            Ok(_) => CheckReport {
                file: file.clone(),
                ok: true,
                error: None,
            },
            Err(e) => {
                warn!("{}: {e}", file.display());
                CheckReport {
                    file: file.clone(),
                    ok: false,
                    error: Some(e.to_string()),
                }
            }
        })
        .collect()
}

fn all_passed(reports: &[CheckReport]) -> bool {
    reports.iter().all(|r| r.ok)
}

fn generate(
    file: &Path,
    points: usize,
    scales: Vec<f32>,
    params: usize,
    seed: Option<u64>,
) -> CliResult<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let scale_count = scales.len();
    let header = MscHeader::new(points, scales, params)?;
    let mut writer = MscWriter::create(file, header)?;
    for _ in 0..points {
        let record = PointRecord::new(
            (0..params).map(|_| rng.gen_range(-100.0..100.0)).collect(),
            (0..scale_count).map(|_| random_barycentric(&mut rng)).collect(),
        );
        let neighbors: Vec<f32> = (0..scale_count)
            .map(|_| rng.gen_range(1..500) as f32)
            .collect();
        writer.write_point_with_auxiliary(&record, &neighbors)?;
    }
    writer.finish()?;
    info!("wrote {} points to {}", points, file.display());
    Ok(())
}

/// `(d1, d2)` with both non-negative and `d1 + d2 <= 1`
fn random_barycentric<R: Rng>(rng: &mut R) -> (f32, f32) {
    let a: f32 = rng.gen();
    let b: f32 = rng.gen();
    if a + b > 1.0 {
        (1.0 - a, 1.0 - b)
    } else {
        (a, b)
    }
}
