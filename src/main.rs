use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use detect_hole::utils::{find_files, output_path};
use detect_hole::{DetectorParams, Hole, HoleDetector, HoleKind, VisionGate};
use log::{error, info, LevelFilter};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;
use strum::IntoEnumIterator;

/// Count and label bright holes in photographs.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Image paths or glob patterns.
    #[arg(required = true)]
    patterns: Vec<String>,

    /// Directory for the annotated images.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// JSON file with detector parameters.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    twin_ratio: Option<f32>,

    #[arg(long)]
    threshold: Option<u8>,

    /// Write the JSON report here instead of stdout.
    #[arg(long)]
    report: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct FileReport {
    path: PathBuf,
    output: Option<PathBuf>,
    hole_count: u32,
    holes: Vec<Hole>,
    error: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let gate = VisionGate::new();
    gate.initialize().context("vision library")?;
    info!("Vision gate {}", gate.readiness());

    let detector = gate.detector(load_params(&cli)?)?;

    let files = find_files(&cli.patterns);
    if files.is_empty() {
        return Err(anyhow!("no image matched {:?}", cli.patterns));
    }
    fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("creating {}", cli.output_dir.display()))?;

    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|file| process(&detector, file, &cli.output_dir))
        .collect();

    print_summary(&reports);
    write_report(&reports, cli.report.as_deref())?;

    if reports.iter().all(|r| r.error.is_some()) {
        return Err(anyhow!("every input failed"));
    }
    Ok(())
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_params(cli: &Cli) -> Result<DetectorParams> {
    let mut params = match &cli.config {
        Some(path) => DetectorParams::from_json_file(path)?,
        None => DetectorParams::default(),
    };
    if let Some(ratio) = cli.twin_ratio {
        params.twin_area_ratio = ratio;
    }
    if let Some(threshold) = cli.threshold {
        params.threshold = threshold;
    }
    Ok(params)
}

fn process(detector: &HoleDetector, file: &Path, output_dir: &Path) -> FileReport {
    info!("Process: {} ...", file.display());
    match detect_file(detector, file, output_dir) {
        Ok((output, hole_count, holes)) => FileReport {
            path: file.to_path_buf(),
            output: Some(output),
            hole_count,
            holes,
            error: None,
        },
        Err(err) => {
            error!("{}: {:#}", file.display(), err);
            FileReport {
                path: file.to_path_buf(),
                output: None,
                hole_count: 0,
                holes: Vec::new(),
                error: Some(format!("{:#}", err)),
            }
        }
    }
}

fn detect_file(
    detector: &HoleDetector,
    file: &Path,
    output_dir: &Path,
) -> Result<(PathBuf, u32, Vec<Hole>)> {
    let image = image::open(file)
        .with_context(|| format!("reading {}", file.display()))?
        .to_rgb8();
    let result = detector.detect(&image)?;

    let output = output_path(output_dir, file);
    result
        .image
        .save(&output)
        .with_context(|| format!("writing {}", output.display()))?;
    info!("{}: {} holes -> {}", file.display(), result.hole_count, output.display());

    Ok((output, result.hole_count, result.holes))
}

fn print_summary(reports: &[FileReport]) {
    let total: u32 = reports.iter().map(|r| r.hole_count).sum();
    let failed = reports.iter().filter(|r| r.error.is_some()).count();
    info!(
        "{} images, {} failed, {} holes in total",
        reports.len(),
        failed,
        total
    );
    for kind in HoleKind::iter() {
        let regions = reports
            .iter()
            .flat_map(|r| &r.holes)
            .filter(|h| h.kind == kind)
            .count();
        info!("  {} regions: {}", kind, regions);
    }
}

fn write_report(reports: &[FileReport], target: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(reports)?;
    match target {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?
        }
        None => println!("{}", json),
    }
    Ok(())
}
