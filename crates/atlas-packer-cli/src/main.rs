use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use atlas_packer_core::config::{Algorithm, SizeSolver};
use atlas_packer_core::export::placements_json_pretty;
use atlas_packer_core::{
    CancelToken, InputImage, PackingConfig, pack_images_with_cancel, pack_layout_with_cancel,
};
use clap::{ArgAction, Parser, Subcommand};
use image::ImageReader;
use tracing::{error, info};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "atlas-packer",
    about = "Pack images into a texture atlas",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack images into an atlas PNG plus a JSON sidecar
    Pack(PackArgs),
    /// Layout only: compute placements and write the JSON sidecar, no PNG
    Layout(PackArgs),
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    // Input/Output
    /// Input file or directory (directories are walked recursively)
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = "out", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// Atlas base name (files will be name.png/.json)
    #[arg(short, long, default_value = "atlas", help_heading = "Input/Output")]
    name: String,

    // Layout
    /// Algorithm: shelf | maxrects
    #[arg(long, value_parser = ["shelf", "maxrects"], default_value = "shelf", help_heading = "Layout")]
    algorithm: String,
    /// Size solver: fixed | fast | bestfit
    #[arg(long, value_parser = ["fixed", "fast", "bestfit"], default_value = "fast", help_heading = "Layout")]
    size_solver: String,
    /// Max atlas width
    #[arg(long, default_value_t = 4096, help_heading = "Layout")]
    max_width: i32,
    /// Max atlas height
    #[arg(long, default_value_t = 4096, help_heading = "Layout")]
    max_height: i32,
    /// Atlas width for the fixed solver
    #[arg(long, default_value_t = 1024, help_heading = "Layout")]
    fixed_width: i32,
    /// Atlas height for the fixed solver
    #[arg(long, default_value_t = 1024, help_heading = "Layout")]
    fixed_height: i32,
    /// Force a square atlas
    #[arg(long, default_value_t = false, help_heading = "Layout")]
    square: bool,
    /// Force power-of-two atlas dimensions
    #[arg(long, default_value_t = false, help_heading = "Layout")]
    pow2: bool,
    /// Minimum pixel gap between placed images (0..=32)
    #[arg(long, default_value_t = 0, help_heading = "Layout")]
    padding: i32,

    // Limits
    /// Abort the pack if it runs longer than this many milliseconds
    #[arg(long, help_heading = "Limits")]
    timeout: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Pack(args) => run_pack(args, false),
        Commands::Layout(args) => run_pack(args, true),
    }
}

fn run_pack(args: &PackArgs, layout_only: bool) -> anyhow::Result<()> {
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create out_dir {}", args.out_dir.display()))?;

    let cfg = build_config(args)?;
    let cancel = match args.timeout {
        Some(ms) => CancelToken::with_deadline(Duration::from_millis(ms)),
        None => CancelToken::new(),
    };

    let paths = gather_paths(&args.input)?;
    anyhow::ensure!(!paths.is_empty(), "no images found under {}", args.input.display());

    let json_path = args.out_dir.join(format!("{}.json", args.name));
    if layout_only {
        // Layout needs only the dimensions; read headers, skip pixel decode.
        let items = read_dimensions(&paths)?;
        info!(count = items.len(), "read input dimensions");
        let out = pack_layout_with_cancel(items, &cfg, &cancel)?;
        fs::write(&json_path, placements_json_pretty(&out.placements)?)
            .with_context(|| format!("write {}", json_path.display()))?;
        info!(?json_path, w = out.atlas_size.w, h = out.atlas_size.h, "layout written");
        info!("{}", out.stats.summary());
        return Ok(());
    }

    let inputs = load_images(&paths)?;
    info!(count = inputs.len(), "loaded input images");
    let out = pack_images_with_cancel(&inputs, &cfg, &cancel)?;

    let png_path = args.out_dir.join(format!("{}.png", args.name));
    out.atlas
        .save(&png_path)
        .with_context(|| format!("write {}", png_path.display()))?;
    fs::write(&json_path, placements_json_pretty(&out.placements)?)
        .with_context(|| format!("write {}", json_path.display()))?;

    info!(?png_path, ?json_path, w = out.atlas_size.w, h = out.atlas_size.h, "atlas written");
    info!("{}", out.stats.summary());
    Ok(())
}

fn build_config(args: &PackArgs) -> anyhow::Result<PackingConfig> {
    let algorithm: Algorithm = args
        .algorithm
        .parse()
        .map_err(|_| anyhow::anyhow!("unknown algorithm: {}", args.algorithm))?;
    let size_solver: SizeSolver = args
        .size_solver
        .parse()
        .map_err(|_| anyhow::anyhow!("unknown size solver: {}", args.size_solver))?;
    Ok(PackingConfig::builder()
        .algorithm(algorithm)
        .size_solver(size_solver)
        .max_dimensions(args.max_width, args.max_height)
        .fixed_dimensions(args.fixed_width, args.fixed_height)
        .force_square(args.square)
        .power_of_two(args.pow2)
        .padding(args.padding)
        .build())
}

fn gather_paths(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut list: Vec<PathBuf> = Vec::new();
    if path.is_file() {
        if is_image(path) {
            list.push(path.to_path_buf());
        }
    } else {
        for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && is_image(p) {
                list.push(p.to_path_buf());
            }
        }
    }
    // Stable keys regardless of directory iteration order.
    list.sort();
    Ok(list)
}

fn is_image(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ext) if matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "bmp" | "tga" | "gif")
    )
}

fn read_dimensions(paths: &[PathBuf]) -> anyhow::Result<Vec<(String, u32, u32)>> {
    let mut list = Vec::with_capacity(paths.len());
    for p in paths {
        match ImageReader::open(p)
            .map_err(anyhow::Error::from)
            .and_then(|r| Ok(r.with_guessed_format()?.into_dimensions()?))
        {
            Ok((w, h)) => {
                let key = p.to_string_lossy().replace('\\', "/");
                list.push((key, w, h));
            }
            Err(e) => {
                error!(?p, error = %e, "skip image");
            }
        }
    }
    Ok(list)
}

fn load_images(paths: &[PathBuf]) -> anyhow::Result<Vec<InputImage>> {
    let mut list = Vec::with_capacity(paths.len());
    for p in paths {
        match ImageReader::open(p)
            .map_err(anyhow::Error::from)
            .and_then(|r| Ok(r.with_guessed_format()?.decode()?))
        {
            Ok(img) => {
                let key = p.to_string_lossy().replace('\\', "/");
                list.push(InputImage {
                    key,
                    image: img.to_rgba8(),
                });
            }
            Err(e) => {
                error!(?p, error = %e, "skip image");
            }
        }
    }
    Ok(list)
}

fn init_tracing(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}
